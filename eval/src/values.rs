//! Values produced by evaluating expressions.

use core::fmt;

/// Value produced by evaluating an expression or its part.
///
/// Leaf operands evaluate to [`Str`](Self::Str) holding the operand text (after variable
/// substitution). Operators and functions coerce these strings to numbers as they see fit;
/// the evaluator never interprets them.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<T> {
    /// Raw text, e.g. an operand that was not coerced by any operator.
    Str(String),
    /// Boolean value, e.g. the result of a comparison.
    Bool(bool),
    /// Number produced by the arithmetic backend.
    Number(T),
}

impl<T> Value<T> {
    /// Creates a string value.
    pub fn str(text: impl Into<String>) -> Self {
        Self::Str(text.into())
    }

    /// Creates an empty string value, which is the result of an empty expression.
    pub fn empty() -> Self {
        Self::Str(String::new())
    }

    /// Checks whether this is an empty string.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Str(s) if s.is_empty())
    }

    /// Returns the contained string, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the contained number, if any.
    pub fn as_number(&self) -> Option<&T> {
        match self {
            Self::Number(num) => Some(num),
            _ => None,
        }
    }

    /// Returns the contained boolean, if any.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Returns a short description of the value type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
        }
    }
}

impl<T: fmt::Display> fmt::Display for Value<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => formatter.write_str(s),
            Self::Bool(flag) => fmt::Display::fmt(flag, formatter),
            Self::Number(num) => fmt::Display::fmt(num, formatter),
        }
    }
}

impl<T> From<bool> for Value<T> {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl<T> From<String> for Value<T> {
    fn from(text: String) -> Self {
        Self::Str(text)
    }
}

impl<T> From<&str> for Value<T> {
    fn from(text: &str) -> Self {
        Self::Str(text.to_owned())
    }
}

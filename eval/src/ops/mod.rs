//! Operators and operator tables.
//!
//! An [`Operator`] is a symbol with a precedence and up to two evaluation functions:
//! a [`BinaryFn`] used in the infix position and a [`UnaryFn`] used in the prefix position.
//! Operators are grouped into an [`OperatorTable`], which is also responsible for locating
//! operator symbols in the expression text.
//!
//! The evaluator does not know anything about the semantics of operators; a ready-to-use
//! set of arithmetic, comparison and logical operators is available in the [`standard`]
//! module.

use core::fmt;

use crate::{error::OpPosition, Error, EvalResult, Value};

pub mod standard;

/// Precedence constants used by the standard operators. Custom operators may use any `u32`;
/// greater values bind tighter.
pub mod precedence {
    /// Grouping parens. This is the lowest precedence; operators are never reduced past
    /// an opening paren.
    pub const GROUP: u32 = 0;
    /// Boolean OR (`||`).
    pub const OR: u32 = 1;
    /// Boolean AND (`&&`).
    pub const AND: u32 = 2;
    /// Equality comparisons: `==`, `!=`.
    pub const EQUALITY: u32 = 3;
    /// Order comparisons: `<`, `<=`, `>`, `>=`.
    pub const COMPARISON: u32 = 4;
    /// Addition or subtraction: `+` or `-`.
    pub const ADD_OR_SUB: u32 = 5;
    /// Multiplication, division or remainder: `*`, `/` or `%`.
    pub const MUL_OR_DIV: u32 = 6;
    /// Power (`^`).
    pub const POWER: u32 = 7;
}

pub(crate) const OPEN_PAREN: &str = "(";
pub(crate) const CLOSE_PAREN: &str = ")";

/// Evaluation function of an operator in the infix position.
pub trait BinaryFn<T> {
    /// Applies the operator to the provided operands.
    fn apply(&self, lhs: Value<T>, rhs: Value<T>) -> EvalResult<T>;
}

impl<T, F> BinaryFn<T> for F
where
    F: Fn(Value<T>, Value<T>) -> EvalResult<T>,
{
    fn apply(&self, lhs: Value<T>, rhs: Value<T>) -> EvalResult<T> {
        self(lhs, rhs)
    }
}

/// Evaluation function of an operator in the prefix position.
pub trait UnaryFn<T> {
    /// Applies the operator to the provided operand.
    fn apply(&self, operand: Value<T>) -> EvalResult<T>;
}

impl<T, F> UnaryFn<T> for F
where
    F: Fn(Value<T>) -> EvalResult<T>,
{
    fn apply(&self, operand: Value<T>) -> EvalResult<T> {
        self(operand)
    }
}

/// Operator recognized in expressions.
///
/// # Examples
///
/// ```
/// use infix_eval::{ops::{precedence, Operator}, Value};
///
/// let concat = Operator::new("~", precedence::ADD_OR_SUB).with_binary(
///     |lhs: Value<f64>, rhs: Value<f64>| Ok(Value::Str(format!("{lhs}{rhs}"))),
/// );
/// assert_eq!(concat.symbol(), "~");
/// assert!(concat.has_binary() && !concat.has_unary());
/// ```
pub struct Operator<T> {
    symbol: String,
    precedence: u32,
    binary: Option<Box<dyn BinaryFn<T>>>,
    unary: Option<Box<dyn UnaryFn<T>>>,
}

impl<T> fmt::Debug for Operator<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Operator")
            .field("symbol", &self.symbol)
            .field("precedence", &self.precedence)
            .field("binary", &self.binary.is_some())
            .field("unary", &self.unary.is_some())
            .finish()
    }
}

impl<T> Operator<T> {
    /// Creates an operator without evaluation functions.
    ///
    /// # Panics
    ///
    /// Panics if `symbol` is empty.
    pub fn new(symbol: impl Into<String>, precedence: u32) -> Self {
        let symbol = symbol.into();
        assert!(!symbol.is_empty(), "operator symbol cannot be empty");
        Self {
            symbol,
            precedence,
            binary: None,
            unary: None,
        }
    }

    /// Sets the infix evaluation function.
    #[must_use]
    pub fn with_binary(mut self, function: impl BinaryFn<T> + 'static) -> Self {
        self.binary = Some(Box::new(function));
        self
    }

    /// Sets the prefix evaluation function.
    #[must_use]
    pub fn with_unary(mut self, function: impl UnaryFn<T> + 'static) -> Self {
        self.unary = Some(Box::new(function));
        self
    }

    /// Returns the operator symbol.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Returns the operator precedence.
    pub fn precedence(&self) -> u32 {
        self.precedence
    }

    /// Checks whether the operator can be used in the infix position.
    pub fn has_binary(&self) -> bool {
        self.binary.is_some()
    }

    /// Checks whether the operator can be used in the prefix position.
    pub fn has_unary(&self) -> bool {
        self.unary.is_some()
    }

    pub(crate) fn is_open_paren(&self) -> bool {
        self.symbol == OPEN_PAREN
    }

    pub(crate) fn is_close_paren(&self) -> bool {
        self.symbol == CLOSE_PAREN
    }

    fn missing(&self, position: OpPosition) -> Error {
        Error::MissingOpFunction {
            symbol: self.symbol.clone(),
            position,
        }
    }

    /// Applies the infix evaluation function.
    ///
    /// # Errors
    ///
    /// Returns an error if the operator has no infix function, or propagates the error
    /// returned by the function.
    pub fn apply_binary(&self, lhs: Value<T>, rhs: Value<T>) -> EvalResult<T> {
        let function = self
            .binary
            .as_ref()
            .ok_or_else(|| self.missing(OpPosition::Binary))?;
        function.apply(lhs, rhs)
    }

    /// Applies the prefix evaluation function.
    ///
    /// # Errors
    ///
    /// Returns an error if the operator has no prefix function, or propagates the error
    /// returned by the function.
    pub fn apply_unary(&self, operand: Value<T>) -> EvalResult<T> {
        let function = self
            .unary
            .as_ref()
            .ok_or_else(|| self.missing(OpPosition::Unary))?;
        function.apply(operand)
    }
}

/// Ordered set of operators.
///
/// The table always contains grouping parens `(` and `)`. When several operators match
/// at the same position in the text, the one inserted first wins, so multi-char symbols
/// (e.g., `<=`) must be inserted before their prefixes (`<`).
pub struct OperatorTable<T> {
    operators: Vec<Operator<T>>,
}

impl<T> fmt::Debug for OperatorTable<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_list()
            .entries(self.operators.iter().map(Operator::symbol))
            .finish()
    }
}

impl<T> Default for OperatorTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OperatorTable<T> {
    /// Creates a table containing only grouping parens.
    pub fn new() -> Self {
        Self {
            operators: vec![
                Operator::new(OPEN_PAREN, precedence::GROUP),
                Operator::new(CLOSE_PAREN, precedence::GROUP),
            ],
        }
    }

    /// Inserts an operator into the table. If an operator with the same symbol is already
    /// present, it is replaced while retaining its position.
    pub fn insert(&mut self, operator: Operator<T>) -> &mut Self {
        if let Some(existing) = self
            .operators
            .iter_mut()
            .find(|existing| existing.symbol == operator.symbol)
        {
            *existing = operator;
        } else {
            self.operators.push(operator);
        }
        self
    }

    /// Inserts an operator and returns the modified table.
    #[must_use]
    pub fn with(mut self, operator: Operator<T>) -> Self {
        self.insert(operator);
        self
    }

    /// Gets an operator by its symbol.
    pub fn get(&self, symbol: &str) -> Option<&Operator<T>> {
        self.operators.iter().find(|op| op.symbol == symbol)
    }

    /// Iterates over operators in the table order.
    pub fn iter(&self) -> impl Iterator<Item = &Operator<T>> + '_ {
        self.operators.iter()
    }

    /// Finds the next operator occurrence at or after the `start` byte index in `text`.
    /// Returns the byte index of the occurrence together with the operator.
    ///
    /// A sign `-` or `+` immediately preceded by `e` / `E`, which itself is preceded
    /// by a digit, is considered a part of a float exponent (as in `1.2e-2`) and is skipped.
    pub fn find_next<'s>(&'s self, text: &str, start: usize) -> Option<(usize, &'s Operator<T>)> {
        let tail = text.get(start..)?;
        tail.char_indices().find_map(|(offset, _)| {
            let index = start + offset;
            let rest = &text[index..];
            self.operators
                .iter()
                .find(|op| rest.starts_with(op.symbol.as_str()) && !is_exponent_sign(text, index, op))
                .map(|op| (index, op))
        })
    }
}

fn is_exponent_sign<T>(text: &str, index: usize, op: &Operator<T>) -> bool {
    if op.symbol != "-" && op.symbol != "+" {
        return false;
    }
    let bytes = text.as_bytes();
    index >= 2 && matches!(bytes[index - 1], b'e' | b'E') && bytes[index - 2].is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> OperatorTable<f64> {
        let ok = |lhs: Value<f64>, _: Value<f64>| Ok::<_, Error>(lhs);
        OperatorTable::new()
            .with(Operator::new("<=", precedence::COMPARISON).with_binary(ok))
            .with(Operator::new("<", precedence::COMPARISON).with_binary(ok))
            .with(Operator::new("+", precedence::ADD_OR_SUB).with_binary(ok))
            .with(
                Operator::new("-", precedence::ADD_OR_SUB)
                    .with_binary(ok)
                    .with_unary(|x: Value<f64>| Ok::<_, Error>(x)),
            )
    }

    #[test]
    fn finding_operators() {
        let table = table();
        let (index, op) = table.find_next("1 + 2", 0).unwrap();
        assert_eq!((index, op.symbol()), (2, "+"));
        let (index, op) = table.find_next("1 + 2 - 3", 3).unwrap();
        assert_eq!((index, op.symbol()), (6, "-"));
        assert!(table.find_next("1 + 2", 3).is_none());
        assert!(table.find_next("1 + 2", 10).is_none());

        let (index, op) = table.find_next("x <= y", 0).unwrap();
        assert_eq!((index, op.symbol()), (2, "<="));
        let (index, op) = table.find_next("f(x)", 0).unwrap();
        assert_eq!((index, op.symbol()), (1, "("));
    }

    #[test]
    fn exponent_sign_is_not_an_operator() {
        let table = table();
        assert!(table.find_next("1.2e-2", 0).is_none());
        assert!(table.find_next("1.2E+2", 0).is_none());
        let (index, op) = table.find_next("1e-2 - 3", 0).unwrap();
        assert_eq!((index, op.symbol()), (5, "-"));

        // `e` not preceded by a digit
        let (index, _) = table.find_next("te-2", 0).unwrap();
        assert_eq!(index, 2);
        // sign not directly following `e`
        let (index, _) = table.find_next("1e -2", 0).unwrap();
        assert_eq!(index, 3);
    }

    #[test]
    fn replacing_operator_retains_order() {
        let mut table = table();
        table.insert(Operator::new("<=", precedence::EQUALITY));
        let symbols: Vec<_> = table.iter().map(Operator::symbol).collect();
        assert_eq!(symbols, ["(", ")", "<=", "<", "+", "-"]);
        assert_eq!(table.get("<=").unwrap().precedence(), precedence::EQUALITY);
        assert!(!table.get("<=").unwrap().has_binary());
    }

    #[test]
    fn applying_missing_function() {
        let table = table();
        let err = table
            .get("+")
            .unwrap()
            .apply_unary(Value::str("1"))
            .unwrap_err();
        assert!(err.to_string().contains("does not have unary Evaluate function"));
    }
}

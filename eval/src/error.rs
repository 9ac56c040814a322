//! Evaluation errors.

use thiserror::Error;

use core::fmt;

use crate::Value;

/// Errors that can occur when performing arithmetic operations via an
/// [`Arithmetic`](crate::arith::Arithmetic) or coercing values for these operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ArithmeticError {
    /// Integer overflow or underflow.
    #[error("integer overflow or underflow")]
    IntegerOverflow,

    /// Division by zero.
    #[error("integer division by zero")]
    DivisionByZero,

    /// Exponent of [`Arithmetic::pow()`](crate::arith::Arithmetic::pow()) cannot be converted
    /// to `usize`, for example because it is too large or negative.
    #[error("exponent is too large or negative")]
    InvalidExponent,

    /// Operand text cannot be parsed as a number.
    #[error("cannot parse `{0}` as a number")]
    InvalidLiteral(String),

    /// Two values cannot be compared.
    #[error("values are not comparable")]
    NotComparable,

    /// Operand has an unexpected type for this operation (e.g., a boolean in addition).
    #[error("unexpected operand: expected {expected}, got `{actual}`")]
    UnexpectedType {
        /// Expected type description.
        expected: &'static str,
        /// Display form of the operand.
        actual: String,
    },
}

/// Syntax error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SyntaxErrorKind {
    /// Operand text between two operators is empty.
    EmptyOperand,
    /// Operand directly follows another operand or a closing paren.
    UnexpectedOperand,
    /// Operator cannot be used in the prefix position.
    UnexpectedOperator,
    /// Two unary operators in a row, such as `--1`.
    ConsecutiveUnary,
    /// Unary operator is not followed by an operand.
    DanglingUnary,
    /// Binary operator is missing its right-hand side operand.
    MissingOperand,
    /// Closing paren without the matching opening one.
    UnmatchedClosingParen,
    /// Opening paren is never closed.
    UnclosedParen,
    /// Parens do not enclose anything.
    EmptyGroup,
    /// Function call is never closed.
    FunctionNotClosed,
    /// Call parens are preceded by something other than a function name.
    ExpectedFunctionName,
    /// Operands and operators do not form an expression.
    InvalidExpression,
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::EmptyOperand => "operand is empty",
            Self::UnexpectedOperand => "operand must be preceded by an operator",
            Self::UnexpectedOperator => "operator cannot be used as a prefix",
            Self::ConsecutiveUnary => "consecutive unary operators",
            Self::DanglingUnary => "unary operator is not followed by an operand",
            Self::MissingOperand => "binary operator is missing an operand",
            Self::UnmatchedClosingParen => "`)` has no matching `(`",
            Self::UnclosedParen => "`(` is not closed",
            Self::EmptyGroup => "parentheses are empty",
            Self::FunctionNotClosed => "function not closed",
            Self::ExpectedFunctionName => "call parentheses must follow a function name",
            Self::InvalidExpression => "expression is invalid",
        })
    }
}

/// Position of an operator in an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpPosition {
    /// Prefix position (e.g., `-` in `-x`).
    Unary,
    /// Infix position (e.g., `-` in `x - y`).
    Binary,
}

impl fmt::Display for OpPosition {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Unary => "unary",
            Self::Binary => "binary",
        })
    }
}

/// Errors that can occur during parsing and evaluating expressions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Malformed expression.
    #[error("syntax error at index {index}: {kind}")]
    Syntax {
        /// Approximate char index in the expression.
        index: usize,
        /// Error kind.
        kind: SyntaxErrorKind,
    },

    /// `$` sigil is not followed by a variable name.
    #[error("invalid variable at index {index}")]
    InvalidVariable {
        /// Byte index of the sigil in the substituted string.
        index: usize,
    },

    /// Resolver has returned a blank value for the variable.
    #[error("unable to resolve variable `{0}`")]
    UnresolvedVariable(String),

    /// Expression references a variable, but no resolver is configured.
    #[error("no variable resolver configured to resolve `{0}`")]
    NoResolver(String),

    /// Too many variable substitutions in a single string, which usually means
    /// a self-referential variable.
    #[error("variable expansion limit ({limit}) exceeded")]
    ExpansionLimit {
        /// Configured limit.
        limit: usize,
    },

    /// Function with the enclosed name is not defined.
    #[error("function `{0}` is not defined")]
    UndefinedFunction(String),

    /// Operator is used in a position without a configured evaluation function.
    #[error("operator `{symbol}` does not have {position} Evaluate function defined")]
    MissingOpFunction {
        /// Operator symbol.
        symbol: String,
        /// Position the operator was used in.
        position: OpPosition,
    },

    /// Arithmetic error, such as division by zero or integer overflow.
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),

    /// Mismatch between the expected and actual number of function args.
    #[error("function `{name}` expects {expected} arg(s), got {actual}")]
    ArgsCount {
        /// Function name.
        name: &'static str,
        /// Human-readable description of the expected number of args.
        expected: &'static str,
        /// Actual number of args.
        actual: usize,
    },

    /// Generic error raised by a native function.
    #[error("failed executing native function: {0}")]
    Native(#[source] anyhow::Error),
}

impl Error {
    /// Creates a syntax error.
    pub fn syntax(index: usize, kind: SyntaxErrorKind) -> Self {
        Self::Syntax { index, kind }
    }

    /// Creates a native error with the specified message.
    pub fn native(message: impl fmt::Display + fmt::Debug + Send + Sync + 'static) -> Self {
        Self::Native(anyhow::Error::msg(message))
    }

    /// Returns the syntax error kind, if this is a syntax error.
    pub fn syntax_kind(&self) -> Option<SyntaxErrorKind> {
        match self {
            Self::Syntax { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// Result of an expression evaluation.
pub type EvalResult<T> = Result<Value<T>, Error>;

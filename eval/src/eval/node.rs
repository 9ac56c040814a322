//! Expression tree.

use core::fmt;

use crate::{ops::Operator, NativeFn};

/// Leaf operand: trimmed text between operators.
pub(crate) struct Operand<'a, T> {
    pub text: &'a str,
    /// Unary operator directly preceding the operand.
    pub unary: Option<&'a Operator<T>>,
}

/// Function call with raw (unevaluated) args.
pub(crate) struct Call<'a, T> {
    pub name: &'a str,
    pub function: &'a dyn NativeFn<T>,
    pub args: &'a str,
    pub unary: Option<&'a Operator<T>>,
}

/// Node of a parsed expression. Nodes borrow both from the expression text
/// and from the environment.
pub(crate) enum Node<'a, T> {
    Operand(Operand<'a, T>),
    Binary {
        op: &'a Operator<T>,
        lhs: Box<Node<'a, T>>,
        rhs: Box<Node<'a, T>>,
    },
    /// Unary operator applied to a parenthesized group.
    Unary {
        op: &'a Operator<T>,
        inner: Box<Node<'a, T>>,
    },
    Call(Call<'a, T>),
}

fn write_with_unary<T>(
    formatter: &mut fmt::Formatter<'_>,
    unary: Option<&Operator<T>>,
    inner: impl fmt::Display,
) -> fmt::Result {
    if let Some(op) = unary {
        write!(formatter, "({} {inner})", op.symbol())
    } else {
        write!(formatter, "{inner}")
    }
}

/// S-expression form, e.g. `(+ 1 (* 2 3))`.
impl<T> fmt::Display for Node<'_, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Operand(operand) => write_with_unary(formatter, operand.unary, operand.text),
            Self::Binary { op, lhs, rhs } => write!(formatter, "({} {lhs} {rhs})", op.symbol()),
            Self::Unary { op, inner } => write!(formatter, "({} {inner})", op.symbol()),
            Self::Call(call) => {
                let call_text = format!("{}[{}]", call.name, call.args);
                write_with_unary(formatter, call.unary, call_text)
            }
        }
    }
}

impl<T> fmt::Debug for Node<'_, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, formatter)
    }
}

//! Standard arithmetic, comparison and logical operators.
//!
//! | Symbol | Position | Precedence | Semantics |
//! |--------|----------|------------|-----------|
//! | `\|\|` | binary | [`OR`](precedence::OR) | boolean OR (eager) |
//! | `&&` | binary | [`AND`](precedence::AND) | boolean AND (eager) |
//! | `==`, `!=` | binary | [`EQUALITY`](precedence::EQUALITY) | equality |
//! | `<=`, `>=`, `<`, `>` | binary | [`COMPARISON`](precedence::COMPARISON) | order comparison |
//! | `+`, `-` | binary / unary | [`ADD_OR_SUB`](precedence::ADD_OR_SUB) | addition, subtraction / identity, negation |
//! | `*`, `/`, `%` | binary | [`MUL_OR_DIV`](precedence::MUL_OR_DIV) | multiplication, division, remainder |
//! | `^` | binary | [`POWER`](precedence::POWER) | exponentiation |
//! | `!` | unary | n/a | boolean NOT |
//!
//! Operands are coerced with [`to_number()`] and [`to_bool()`]. Equality is the only
//! operation that also accepts non-numeric strings: if neither side can be interpreted
//! as a number or a boolean, the trimmed strings are compared.
//!
//! All binary operators are left-associative, including `^`.

use log::trace;
use num_traits::Zero;

use core::{cmp::Ordering, fmt};
use std::rc::Rc;

use super::{precedence, Operator, OperatorTable};
use crate::{
    arith::{NumLiteral, OrdArithmetic},
    error::ArithmeticError,
    fns::{to_bool, to_number},
    EvalResult, Value,
};

/// Binary operator from the standard set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum BinaryOp {
    /// Boolean OR (`||`).
    Or,
    /// Boolean AND (`&&`).
    And,
    /// Equality (`==`).
    Eq,
    /// Non-equality (`!=`).
    NotEq,
    /// "Less or equal" comparison (`<=`).
    Le,
    /// "Greater or equal" comparison (`>=`).
    Ge,
    /// "Less than" comparison (`<`).
    Lt,
    /// "Greater than" comparison (`>`).
    Gt,
    /// Addition (`+`).
    Add,
    /// Subtraction (`-`).
    Sub,
    /// Multiplication (`*`).
    Mul,
    /// Division (`/`).
    Div,
    /// Remainder (`%`).
    Rem,
    /// Exponentiation (`^`).
    Power,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl BinaryOp {
    /// All binary ops in the order of insertion into the table. Multi-char symbols
    /// precede their single-char prefixes.
    pub const ALL: [Self; 14] = [
        Self::Or,
        Self::And,
        Self::Eq,
        Self::NotEq,
        Self::Le,
        Self::Ge,
        Self::Lt,
        Self::Gt,
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Rem,
        Self::Power,
    ];

    /// Returns the operator symbol.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Or => "||",
            Self::And => "&&",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Le => "<=",
            Self::Ge => ">=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Power => "^",
        }
    }

    /// Returns the priority of this operation.
    pub fn precedence(self) -> u32 {
        match self {
            Self::Or => precedence::OR,
            Self::And => precedence::AND,
            Self::Eq | Self::NotEq => precedence::EQUALITY,
            Self::Le | Self::Ge | Self::Lt | Self::Gt => precedence::COMPARISON,
            Self::Add | Self::Sub => precedence::ADD_OR_SUB,
            Self::Mul | Self::Div | Self::Rem => precedence::MUL_OR_DIV,
            Self::Power => precedence::POWER,
        }
    }

    /// Checks if this operation is arithmetic.
    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Rem | Self::Power
        )
    }

    /// Checks if this operation is an order comparison.
    pub fn is_order_comparison(self) -> bool {
        matches!(self, Self::Le | Self::Ge | Self::Lt | Self::Gt)
    }

    /// Applies the operation using the provided arithmetic.
    ///
    /// # Errors
    ///
    /// Returns an error if operands cannot be coerced, or if the arithmetic operation fails.
    pub fn apply<T>(
        self,
        arithmetic: &dyn OrdArithmetic<T>,
        lhs: Value<T>,
        rhs: Value<T>,
    ) -> EvalResult<T>
    where
        T: NumLiteral + Zero,
    {
        Ok(match self {
            Self::Or => Value::Bool(to_bool(lhs, arithmetic)? || to_bool(rhs, arithmetic)?),
            Self::And => Value::Bool(to_bool(lhs, arithmetic)? && to_bool(rhs, arithmetic)?),
            Self::Eq => Value::Bool(values_eq(arithmetic, lhs, rhs)),
            Self::NotEq => Value::Bool(!values_eq(arithmetic, lhs, rhs)),

            Self::Le | Self::Ge | Self::Lt | Self::Gt => {
                let (lhs, rhs) = (to_number(lhs)?, to_number(rhs)?);
                let ordering = arithmetic
                    .partial_cmp(&lhs, &rhs)
                    .ok_or(ArithmeticError::NotComparable)?;
                Value::Bool(match self {
                    Self::Le => ordering != Ordering::Greater,
                    Self::Ge => ordering != Ordering::Less,
                    Self::Lt => ordering == Ordering::Less,
                    _ => ordering == Ordering::Greater,
                })
            }

            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Rem | Self::Power => {
                let (lhs, rhs) = (to_number(lhs)?, to_number(rhs)?);
                let number = match self {
                    Self::Add => arithmetic.add(lhs, rhs),
                    Self::Sub => arithmetic.sub(lhs, rhs),
                    Self::Mul => arithmetic.mul(lhs, rhs),
                    Self::Div => arithmetic.div(lhs, rhs),
                    Self::Rem => arithmetic.rem(lhs, rhs),
                    _ => arithmetic.pow(lhs, rhs),
                };
                Value::Number(number?)
            }
        })
    }
}

/// Unary operator from the standard set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum UnaryOp {
    /// Negation (`-`).
    Neg,
    /// Identity (`+`); coerces the operand to a number.
    Plus,
    /// Boolean negation (`!`).
    Not,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl UnaryOp {
    /// Returns the operator symbol.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Plus => "+",
            Self::Not => "!",
        }
    }

    /// Applies the operation using the provided arithmetic.
    ///
    /// # Errors
    ///
    /// Returns an error if the operand cannot be coerced, or if negation fails.
    pub fn apply<T>(self, arithmetic: &dyn OrdArithmetic<T>, operand: Value<T>) -> EvalResult<T>
    where
        T: NumLiteral + Zero,
    {
        Ok(match self {
            Self::Neg => Value::Number(arithmetic.neg(to_number(operand)?)?),
            Self::Plus => Value::Number(to_number(operand)?),
            Self::Not => Value::Bool(!to_bool(operand, arithmetic)?),
        })
    }
}

fn try_bool<T>(value: &Value<T>) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::Str(text) => match text.trim() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        Value::Number(_) => None,
    }
}

fn values_eq<T>(arithmetic: &dyn OrdArithmetic<T>, lhs: Value<T>, rhs: Value<T>) -> bool
where
    T: NumLiteral,
{
    if let (Some(lhs), Some(rhs)) = (try_bool(&lhs), try_bool(&rhs)) {
        return lhs == rhs;
    }
    match (lhs, rhs) {
        (Value::Str(lhs), Value::Str(rhs)) => {
            let (lhs, rhs) = (lhs.trim(), rhs.trim());
            match (T::parse_literal(lhs), T::parse_literal(rhs)) {
                (Ok(lhs), Ok(rhs)) => arithmetic.eq(&lhs, &rhs),
                _ => lhs == rhs,
            }
        }
        (Value::Bool(_), _) | (_, Value::Bool(_)) => false,
        (lhs, rhs) => match (to_number(lhs), to_number(rhs)) {
            (Ok(lhs), Ok(rhs)) => arithmetic.eq(&lhs, &rhs),
            _ => false,
        },
    }
}

/// Creates a table with the standard operators based on the provided arithmetic.
///
/// # Examples
///
/// ```
/// use infix_eval::{arith::StdArithmetic, ops::standard, Environment, Error, Value};
/// use std::rc::Rc;
///
/// let env = Environment::<f32>::new().with_operators(standard::operators(Rc::new(StdArithmetic)));
/// assert_eq!(env.evaluate("2 + 3 * 4 == 14")?, Value::Bool(true));
/// assert_eq!(env.evaluate("!(1 > 2) && 10 % 4 == 2")?, Value::Bool(true));
/// # Ok::<_, Error>(())
/// ```
pub fn operators<T>(arithmetic: Rc<dyn OrdArithmetic<T>>) -> OperatorTable<T>
where
    T: NumLiteral + Zero,
{
    let mut table = OperatorTable::new();
    for op in BinaryOp::ALL {
        let arith = Rc::clone(&arithmetic);
        let mut operator = Operator::new(op.as_str(), op.precedence()).with_binary(
            move |lhs: Value<T>, rhs: Value<T>| {
                trace!("applying `{op}`");
                op.apply(&*arith, lhs, rhs)
            },
        );
        if let Some(unary) = unary_counterpart(op) {
            let arith = Rc::clone(&arithmetic);
            operator = operator.with_unary(move |operand: Value<T>| {
                trace!("applying unary `{unary}`");
                unary.apply(&*arith, operand)
            });
        }
        table.insert(operator);
    }

    let not = UnaryOp::Not;
    table.insert(
        Operator::new(not.as_str(), precedence::POWER)
            .with_unary(move |operand: Value<T>| not.apply(&*arithmetic, operand)),
    );
    table
}

fn unary_counterpart(op: BinaryOp) -> Option<UnaryOp> {
    match op {
        BinaryOp::Add => Some(UnaryOp::Plus),
        BinaryOp::Sub => Some(UnaryOp::Neg),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::{
        arith::{Checked, CheckedArithmetic, StdArithmetic},
        Error,
    };

    fn float_table() -> OperatorTable<f64> {
        operators(Rc::new(StdArithmetic))
    }

    #[test]
    fn table_order() {
        let table = float_table();
        let symbols: Vec<_> = table.iter().map(Operator::symbol).collect();
        assert_eq!(
            symbols,
            [
                "(", ")", "||", "&&", "==", "!=", "<=", ">=", "<", ">", "+", "-", "*", "/", "%", "^",
                "!"
            ]
        );
        assert!(table.get("-").unwrap().has_unary());
        assert!(table.get("!").unwrap().has_unary());
        assert!(!table.get("!").unwrap().has_binary());
        assert!(!table.get("*").unwrap().has_unary());
    }

    #[test]
    fn not_equal_is_not_split() {
        let table = float_table();
        let (index, op) = table.find_next("1 != 2", 0).unwrap();
        assert_eq!((index, op.symbol()), (2, "!="));
        let (index, op) = table.find_next("!x", 0).unwrap();
        assert_eq!((index, op.symbol()), (0, "!"));
    }

    #[test]
    fn arithmetic_ops() {
        let arith = StdArithmetic;
        let apply = |op: BinaryOp, lhs: &str, rhs: &str| {
            op.apply::<f64>(&arith, Value::str(lhs), Value::str(rhs))
        };
        assert_eq!(apply(BinaryOp::Add, "1", " 2 ").unwrap(), Value::Number(3.0));
        assert_eq!(apply(BinaryOp::Power, "2", "10").unwrap(), Value::Number(1024.0));
        assert_eq!(apply(BinaryOp::Rem, "7", "4").unwrap(), Value::Number(3.0));
        assert_matches!(
            apply(BinaryOp::Mul, "foo", "2").unwrap_err(),
            Error::Arithmetic(ArithmeticError::InvalidLiteral(s)) if s == "foo"
        );
        let err = BinaryOp::Add
            .apply::<f64>(&arith, Value::Bool(true), Value::Number(1.0))
            .unwrap_err();
        assert_matches!(err, Error::Arithmetic(ArithmeticError::UnexpectedType { .. }));
    }

    #[test]
    fn comparison_ops() {
        let arith = CheckedArithmetic::<Checked>::new();
        let apply = |op: BinaryOp, lhs: i64, rhs: i64| {
            op.apply::<i64>(&arith, Value::Number(lhs), Value::Number(rhs))
        };
        assert_eq!(apply(BinaryOp::Lt, 1, 2).unwrap(), Value::Bool(true));
        assert_eq!(apply(BinaryOp::Le, 2, 2).unwrap(), Value::Bool(true));
        assert_eq!(apply(BinaryOp::Gt, 2, 2).unwrap(), Value::Bool(false));
        assert_eq!(apply(BinaryOp::Ge, 3, 2).unwrap(), Value::Bool(true));
        assert_eq!(apply(BinaryOp::Eq, 3, 3).unwrap(), Value::Bool(true));
        assert_eq!(apply(BinaryOp::NotEq, 3, 3).unwrap(), Value::Bool(false));
    }

    #[test]
    fn equality_of_mixed_values() {
        let arith = StdArithmetic;
        let eq = |lhs: Value<f64>, rhs: Value<f64>| values_eq(&arith, lhs, rhs);
        assert!(eq(Value::str("1.0"), Value::str(" 1")));
        assert!(eq(Value::str("abc"), Value::str("abc ")));
        assert!(!eq(Value::str("abc"), Value::str("abd")));
        assert!(eq(Value::Bool(true), Value::str("true")));
        assert!(!eq(Value::Bool(true), Value::Number(1.0)));
        assert!(eq(Value::Number(2.0), Value::str("2")));
        assert!(!eq(Value::Number(2.0), Value::str("two")));
    }

    #[test]
    fn logical_ops() {
        let arith = StdArithmetic;
        let apply =
            |op: BinaryOp, lhs: Value<f64>, rhs: Value<f64>| op.apply::<f64>(&arith, lhs, rhs);
        assert_eq!(
            apply(BinaryOp::And, Value::Bool(true), Value::str("0")).unwrap(),
            Value::Bool(false)
        );
        assert_eq!(
            apply(BinaryOp::Or, Value::str("false"), Value::Number(2.0)).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            UnaryOp::Not.apply::<f64>(&arith, Value::str("false")).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            UnaryOp::Neg.apply::<f64>(&arith, Value::str("2.5")).unwrap(),
            Value::Number(-2.5)
        );
        assert_eq!(
            UnaryOp::Plus.apply::<f64>(&arith, Value::str(" 7")).unwrap(),
            Value::Number(7.0)
        );
    }

    #[test]
    fn checked_negation_overflow() {
        let arith = CheckedArithmetic::<Checked>::new();
        let err = UnaryOp::Neg
            .apply::<i8>(&arith, Value::Number(i8::MIN))
            .unwrap_err();
        assert_matches!(err, Error::Arithmetic(ArithmeticError::IntegerOverflow));
    }
}

//! Standard functions and helpers to define new native functions.
//!
//! # Defining native functions
//!
//! A function receives its raw argument text together with the [`Evaluator`] it is called
//! from. To get argument values, split the text with [`next_arg()`](crate::next_arg) or
//! [`split_args()`](crate::split_args) and evaluate the parts via
//! [`Evaluator::evaluate_new()`]. Args that are never evaluated have no effect; this is how
//! [`If`], [`And`] and [`Or`] short-circuit.
//!
//! Values produced by operands are strings; use [`to_number()`] and [`to_bool()`] to coerce
//! them in the same way as the [standard operators](crate::ops::standard) do.

use num_traits::Zero;

use core::{cmp::Ordering, fmt};
use std::rc::Rc;

use crate::{
    arith::{NumLiteral, OrdArithmetic},
    error::ArithmeticError,
    split_args, Error, EvalResult, Evaluator, NativeFn, Value,
};

mod flow;
mod float;

pub use self::{
    float::FloatFn,
    flow::{And, If, Or},
};

/// Coerces a value to a number. Strings are trimmed and parsed via [`NumLiteral`].
///
/// # Errors
///
/// Returns an error if the string is not a number or the value is a boolean.
pub fn to_number<T: NumLiteral>(value: Value<T>) -> Result<T, ArithmeticError> {
    match value {
        Value::Number(number) => Ok(number),
        Value::Str(text) => T::parse_literal(text.trim()),
        Value::Bool(flag) => Err(ArithmeticError::UnexpectedType {
            expected: "number",
            actual: flag.to_string(),
        }),
    }
}

/// Coerces a value to a boolean.
///
/// - Booleans are returned as is.
/// - Strings `true` and `false` (after trimming) are converted to the corresponding booleans.
/// - Other strings are coerced to numbers via [`to_number()`].
/// - Numbers are truthy iff they are not equal to zero according to `arithmetic`.
///
/// # Errors
///
/// Returns an error if the value is a string that is neither a boolean nor a number.
pub fn to_bool<T>(value: Value<T>, arithmetic: &dyn OrdArithmetic<T>) -> Result<bool, ArithmeticError>
where
    T: NumLiteral + Zero,
{
    if let Value::Str(text) = &value {
        match text.trim() {
            "true" => return Ok(true),
            "false" => return Ok(false),
            _ => { /* coerce to a number below */ }
        }
    }
    match value {
        Value::Bool(flag) => Ok(flag),
        other => {
            let number = to_number(other)?;
            Ok(!arithmetic.eq(&number, &T::zero()))
        }
    }
}

/// Evaluates `arg` in a fresh evaluator and coerces the result to a number.
///
/// # Errors
///
/// Propagates evaluation and coercion errors.
pub fn evaluate_number<T: NumLiteral>(evaluator: &Evaluator<'_, T>, arg: &str) -> Result<T, Error> {
    let value = evaluator.evaluate_new(arg)?;
    Ok(to_number(value)?)
}

fn check_args_count(name: &'static str, args: &str, expected: &'static str) -> Result<(), Error> {
    let actual = split_args(args).count();
    if expected.parse::<usize>() == Ok(actual) {
        Ok(())
    } else {
        Err(Error::ArgsCount {
            name,
            expected,
            actual,
        })
    }
}

/// Function that selects the minimum or maximum of one or more numeric args.
///
/// All args are evaluated. Comparison is performed via [`OrdArithmetic::partial_cmp()`].
///
/// # Examples
///
/// ```
/// # use infix_eval::{Environment, Error, Value};
/// let env = Environment::<f64>::standard_float();
/// assert_eq!(env.evaluate("min(3, 1 + 1, 5)")?, Value::Number(2.0));
/// assert_eq!(env.evaluate("max(-1, -2)")?, Value::Number(-1.0));
/// # Ok::<_, Error>(())
/// ```
pub struct Compare<T> {
    arithmetic: Rc<dyn OrdArithmetic<T>>,
    name: &'static str,
    keep: Ordering,
}

impl<T> fmt::Debug for Compare<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_tuple("Compare").field(&self.name).finish()
    }
}

impl<T> Compare<T> {
    /// Creates the `min` function.
    pub fn min(arithmetic: Rc<dyn OrdArithmetic<T>>) -> Self {
        Self {
            arithmetic,
            name: "min",
            keep: Ordering::Less,
        }
    }

    /// Creates the `max` function.
    pub fn max(arithmetic: Rc<dyn OrdArithmetic<T>>) -> Self {
        Self {
            arithmetic,
            name: "max",
            keep: Ordering::Greater,
        }
    }
}

impl<T: NumLiteral> NativeFn<T> for Compare<T> {
    fn call(&self, evaluator: &Evaluator<'_, T>, args: &str) -> EvalResult<T> {
        let mut best = None::<T>;
        for arg in split_args(args) {
            let number = evaluate_number(evaluator, arg)?;
            best = Some(match best {
                None => number,
                Some(current) => {
                    let ordering = self
                        .arithmetic
                        .partial_cmp(&number, &current)
                        .ok_or(ArithmeticError::NotComparable)?;
                    if ordering == self.keep {
                        number
                    } else {
                        current
                    }
                }
            });
        }

        best.map(Value::Number).ok_or(Error::ArgsCount {
            name: self.name,
            expected: "at least 1",
            actual: 0,
        })
    }
}

/// Absolute value of a single numeric arg.
pub struct Abs<T> {
    arithmetic: Rc<dyn OrdArithmetic<T>>,
}

impl<T> fmt::Debug for Abs<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Abs").finish_non_exhaustive()
    }
}

impl<T> Abs<T> {
    /// Creates the function.
    pub fn new(arithmetic: Rc<dyn OrdArithmetic<T>>) -> Self {
        Self { arithmetic }
    }
}

impl<T: NumLiteral + Zero> NativeFn<T> for Abs<T> {
    fn call(&self, evaluator: &Evaluator<'_, T>, args: &str) -> EvalResult<T> {
        check_args_count("abs", args, "1")?;
        let number = evaluate_number(evaluator, args)?;
        let ordering = self
            .arithmetic
            .partial_cmp(&number, &T::zero())
            .ok_or(ArithmeticError::NotComparable)?;
        let number = if ordering == Ordering::Less {
            self.arithmetic.neg(number)?
        } else {
            number
        };
        Ok(Value::Number(number))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::{
        arith::{Checked, CheckedArithmetic, StdArithmetic},
        Environment,
    };

    #[test]
    fn coercing_values() {
        assert_eq!(to_number::<f64>(Value::str(" 2.5 ")).unwrap(), 2.5);
        assert_matches!(
            to_number::<f64>(Value::Bool(true)),
            Err(ArithmeticError::UnexpectedType { expected: "number", .. })
        );
        assert_matches!(
            to_number::<i64>(Value::str("1.5")),
            Err(ArithmeticError::InvalidLiteral(s)) if s == "1.5"
        );

        let arithmetic = StdArithmetic;
        assert!(to_bool::<f64>(Value::str(" true"), &arithmetic).unwrap());
        assert!(!to_bool::<f64>(Value::str("0"), &arithmetic).unwrap());
        assert!(to_bool::<f64>(Value::Number(-0.5), &arithmetic).unwrap());
        assert!(to_bool::<f64>(Value::str("yes"), &arithmetic).is_err());
    }

    #[test]
    fn min_max_with_integers() {
        let env = Environment::<i64>::with_arithmetic(CheckedArithmetic::<Checked>::new());
        assert_eq!(env.evaluate("min(4, -3, 2)").unwrap(), Value::Number(-3));
        assert_eq!(env.evaluate("max(4, min(10, 7))").unwrap(), Value::Number(7));
        assert_matches!(
            env.evaluate("max()").unwrap_err(),
            Error::ArgsCount { name: "max", actual: 0, .. }
        );
    }

    #[test]
    fn abs_function() {
        let env = Environment::<i64>::with_arithmetic(CheckedArithmetic::<Checked>::new());
        assert_eq!(env.evaluate("abs(3 - 10)").unwrap(), Value::Number(7));
        assert_eq!(env.evaluate("abs(5)").unwrap(), Value::Number(5));
        assert_matches!(
            env.evaluate("abs(1, 2)").unwrap_err(),
            Error::ArgsCount { name: "abs", expected: "1", actual: 2 }
        );
    }

    #[test]
    fn comparing_nan() {
        let env = Environment::<f64>::standard_float();
        let err = env.evaluate("max(1, 0 / 0)").unwrap_err();
        assert_matches!(err, Error::Arithmetic(ArithmeticError::NotComparable));
    }
}

//! Environments for the supported number types.

use num_bigint::BigInt;
use num_traits::{Float, Zero};

use std::{f64::consts, fmt};

use infix_eval::{
    arith::{
        CheckedArithmetic, NumLiteral, OrdArithmetic, StdArithmetic, Unchecked,
        WrappingArithmetic, ZeroOnDivision,
    },
    Environment,
};

/// Number types usable in the REPL.
pub trait ReplLiteral: NumLiteral + Zero + fmt::Display {}

impl<T: NumLiteral + Zero + fmt::Display> ReplLiteral for T {}

fn with_division_policy<T, A>(arithmetic: A, zero_div: bool) -> Environment<T>
where
    T: ReplLiteral,
    A: OrdArithmetic<T> + 'static,
{
    if zero_div {
        Environment::with_arithmetic(ZeroOnDivision::new(arithmetic))
    } else {
        Environment::with_arithmetic(arithmetic)
    }
}

/// Creates an environment for a primitive integer type. `Kind` determines how negation
/// is checked (e.g., only zero can be negated for unsigned ints).
pub fn create_int_env<T, Kind>(wrapping: bool, zero_div: bool) -> Environment<T>
where
    T: ReplLiteral,
    Kind: 'static,
    CheckedArithmetic<Kind>: OrdArithmetic<T>,
    WrappingArithmetic: OrdArithmetic<T>,
{
    if wrapping {
        with_division_policy(WrappingArithmetic, zero_div)
    } else {
        with_division_policy(CheckedArithmetic::<Kind>::new(), zero_div)
    }
}

pub fn create_bigint_env(zero_div: bool) -> Environment<BigInt> {
    with_division_policy(CheckedArithmetic::<Unchecked>::new(), zero_div)
}

/// Creates an environment for a float type with float functions, such as `sqrt`.
pub fn create_float_env<T>(zero_div: bool) -> Environment<T>
where
    T: ReplLiteral + Float,
    StdArithmetic: OrdArithmetic<T>,
{
    let mut env = with_division_policy(StdArithmetic, zero_div);
    env.insert_float_fns();
    env
}

/// Variables predefined for float environments.
pub fn float_constants() -> Vec<(String, String)> {
    vec![
        ("pi".to_owned(), consts::PI.to_string()),
        ("e".to_owned(), consts::E.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use infix_eval::{
        arith::{Checked, NegateOnlyZero},
        error::ArithmeticError,
        Error, Value,
    };

    use super::*;

    #[test]
    fn int_env_policies() {
        let env = create_int_env::<i64, Checked>(false, false);
        assert_matches!(
            env.evaluate("1 / 0").unwrap_err(),
            Error::Arithmetic(ArithmeticError::DivisionByZero)
        );
        let env = create_int_env::<i64, Checked>(false, true);
        assert_eq!(env.evaluate("1 / 0").unwrap(), Value::Number(0));

        let env = create_int_env::<u64, NegateOnlyZero>(true, false);
        assert_eq!(env.evaluate("1 - 2").unwrap(), Value::Number(u64::MAX));
        let env = create_int_env::<u64, NegateOnlyZero>(false, false);
        assert_matches!(
            env.evaluate("1 - 2").unwrap_err(),
            Error::Arithmetic(ArithmeticError::IntegerOverflow)
        );
    }

    #[test]
    fn bigint_env() {
        let env = create_bigint_env(false);
        let value = env.evaluate("2 ^ 100").unwrap();
        assert_eq!(value.to_string(), "1267650600228229401496703205376");
    }

    #[test]
    fn float_env_has_functions() {
        let env = create_float_env::<f32>(false);
        assert_eq!(env.evaluate("sqrt(16) + 1").unwrap(), Value::Number(5.0));
        assert_eq!(env.evaluate("1 / 0").unwrap(), Value::Number(f32::INFINITY));
        let env = create_float_env::<f64>(true);
        assert_eq!(env.evaluate("1 / 0 + sqrt(4)").unwrap(), Value::Number(2.0));
        for (_, value) in float_constants() {
            assert!(value.parse::<f32>().is_ok());
        }
    }
}

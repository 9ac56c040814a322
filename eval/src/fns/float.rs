//! Single-arg functions on floating-point numbers.

use num_traits::Float;

use core::fmt;

use super::{check_args_count, evaluate_number};
use crate::{arith::NumLiteral, EvalResult, Evaluator, NativeFn, Value};

/// Function of a single float arg, such as `sqrt`.
///
/// # Examples
///
/// ```
/// # use infix_eval::{Environment, Error, Value};
/// let env = Environment::<f64>::standard_float();
/// assert_eq!(env.evaluate("sqrt(cbrt(8) + 7)")?, Value::Number(3.0));
/// assert_eq!(env.evaluate("-floor(2.5)")?, Value::Number(-2.0));
/// # Ok::<_, Error>(())
/// ```
#[derive(Clone, Copy)]
pub struct FloatFn<T> {
    name: &'static str,
    function: fn(T) -> T,
}

impl<T> fmt::Debug for FloatFn<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_tuple("FloatFn").field(&self.name).finish()
    }
}

impl<T> FloatFn<T> {
    /// Creates a function with the specified name.
    pub const fn new(name: &'static str, function: fn(T) -> T) -> Self {
        Self { name, function }
    }

    /// Returns the function name.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T: Float> FloatFn<T> {
    /// Returns all standard float functions: `sqrt`, `cbrt`, `exp`, `ln`, `log2`, `log10`,
    /// `sin`, `cos`, `tan`, `asin`, `acos`, `atan`, `floor`, `ceil`, `round` and `trunc`.
    pub fn all() -> [Self; 16] {
        [
            Self::new("sqrt", T::sqrt),
            Self::new("cbrt", T::cbrt),
            Self::new("exp", T::exp),
            Self::new("ln", T::ln),
            Self::new("log2", T::log2),
            Self::new("log10", T::log10),
            Self::new("sin", T::sin),
            Self::new("cos", T::cos),
            Self::new("tan", T::tan),
            Self::new("asin", T::asin),
            Self::new("acos", T::acos),
            Self::new("atan", T::atan),
            Self::new("floor", T::floor),
            Self::new("ceil", T::ceil),
            Self::new("round", T::round),
            Self::new("trunc", T::trunc),
        ]
    }
}

impl<T: NumLiteral> NativeFn<T> for FloatFn<T> {
    fn call(&self, evaluator: &Evaluator<'_, T>, args: &str) -> EvalResult<T> {
        check_args_count(self.name, args, "1")?;
        let number = evaluate_number(evaluator, args)?;
        Ok(Value::Number((self.function)(number)))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::{Environment, Error};

    #[test]
    fn nested_float_functions() {
        let env = Environment::<f64>::standard_float();
        assert_eq!(env.evaluate("sqrt(cbrt(8)+7)").unwrap(), Value::Number(3.0));
        assert_eq!(env.evaluate("round(2.4) + ceil(0.1)").unwrap(), Value::Number(3.0));
        assert_eq!(env.evaluate("ln(exp(0))").unwrap(), Value::Number(0.0));
    }

    #[test]
    fn float_fn_errors() {
        let env = Environment::<f32>::standard_float();
        assert_matches!(
            env.evaluate("sqrt()").unwrap_err(),
            Error::ArgsCount { name: "sqrt", actual: 0, .. }
        );
        assert_matches!(
            env.evaluate("sqrt(x)").unwrap_err(),
            Error::Arithmetic(crate::error::ArithmeticError::InvalidLiteral(s)) if s == "x"
        );
    }
}

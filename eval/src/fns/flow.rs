//! Flow control functions.

use log::trace;
use num_traits::Zero;

use core::fmt;
use std::rc::Rc;

use super::{check_args_count, to_bool};
use crate::{
    arith::{NumLiteral, OrdArithmetic},
    next_arg, split_args, Error, EvalResult, Evaluator, NativeFn, Value,
};

/// `if` function that lazily evaluates "then" / "else" branches.
///
/// The condition is evaluated and [coerced to a boolean](super::to_bool()); then, only
/// the selected branch is evaluated.
///
/// # Examples
///
/// ```
/// # use infix_eval::{Environment, Error, Value};
/// # use std::collections::HashMap;
/// let vars: HashMap<String, String> =
///     [("foo".to_owned(), "3".to_owned()), ("bar".to_owned(), "5".to_owned())].into();
/// let env = Environment::<f64>::standard_float().with_resolver(vars);
/// assert_eq!(env.evaluate("if($foo > $bar, yes, no)")?, Value::str("no"));
/// // The "else" branch is not evaluated, so it does not fail.
/// assert_eq!(env.evaluate("if($foo < $bar, 1, sqrt(oops))")?, Value::str("1"));
/// # Ok::<_, Error>(())
/// ```
pub struct If<T> {
    arithmetic: Rc<dyn OrdArithmetic<T>>,
}

impl<T> fmt::Debug for If<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("If").finish_non_exhaustive()
    }
}

impl<T> If<T> {
    /// Creates the function.
    pub fn new(arithmetic: Rc<dyn OrdArithmetic<T>>) -> Self {
        Self { arithmetic }
    }
}

impl<T: NumLiteral + Zero> NativeFn<T> for If<T> {
    fn call(&self, evaluator: &Evaluator<'_, T>, args: &str) -> EvalResult<T> {
        check_args_count("if", args, "3")?;
        let (condition, rest) = next_arg(args);
        let (then_branch, else_branch) = next_arg(rest);

        let condition = to_bool(evaluator.evaluate_new(condition)?, &*self.arithmetic)?;
        trace!("`if` condition evaluated to {condition}");
        evaluator.evaluate_new(if condition { then_branch } else { else_branch })
    }
}

/// Evaluates args left to right, stopping as soon as an arg is equal to `stop_on`.
fn short_circuit<T: NumLiteral + Zero>(
    name: &'static str,
    evaluator: &Evaluator<'_, T>,
    args: &str,
    arithmetic: &dyn OrdArithmetic<T>,
    stop_on: bool,
) -> EvalResult<T> {
    let mut count = 0;
    for arg in split_args(args) {
        count += 1;
        if to_bool(evaluator.evaluate_new(arg)?, arithmetic)? == stop_on {
            trace!("`{name}` short-circuited on arg #{count}");
            return Ok(Value::Bool(stop_on));
        }
    }

    if count == 0 {
        Err(Error::ArgsCount {
            name,
            expected: "at least 1",
            actual: 0,
        })
    } else {
        Ok(Value::Bool(!stop_on))
    }
}

/// Lazy boolean AND of one or more args. Evaluation stops on the first falsy arg.
///
/// # Examples
///
/// ```
/// # use infix_eval::{Environment, Error, Value};
/// let env = Environment::<f64>::standard_float();
/// assert_eq!(env.evaluate("and(1 < 2, 2 < 3)")?, Value::Bool(true));
/// assert_eq!(env.evaluate("and(1 > 2, sqrt(oops))")?, Value::Bool(false));
/// # Ok::<_, Error>(())
/// ```
pub struct And<T> {
    arithmetic: Rc<dyn OrdArithmetic<T>>,
}

impl<T> fmt::Debug for And<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("And").finish_non_exhaustive()
    }
}

impl<T> And<T> {
    /// Creates the function.
    pub fn new(arithmetic: Rc<dyn OrdArithmetic<T>>) -> Self {
        Self { arithmetic }
    }
}

impl<T: NumLiteral + Zero> NativeFn<T> for And<T> {
    fn call(&self, evaluator: &Evaluator<'_, T>, args: &str) -> EvalResult<T> {
        short_circuit("and", evaluator, args, &*self.arithmetic, false)
    }
}

/// Lazy boolean OR of one or more args. Evaluation stops on the first truthy arg.
pub struct Or<T> {
    arithmetic: Rc<dyn OrdArithmetic<T>>,
}

impl<T> fmt::Debug for Or<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Or").finish_non_exhaustive()
    }
}

impl<T> Or<T> {
    /// Creates the function.
    pub fn new(arithmetic: Rc<dyn OrdArithmetic<T>>) -> Self {
        Self { arithmetic }
    }
}

impl<T: NumLiteral + Zero> NativeFn<T> for Or<T> {
    fn call(&self, evaluator: &Evaluator<'_, T>, args: &str) -> EvalResult<T> {
        short_circuit("or", evaluator, args, &*self.arithmetic, true)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use core::cell::Cell;
    use std::collections::HashMap;

    use super::*;
    use crate::Environment;

    fn env_with_vars(vars: &[(&str, &str)]) -> Environment<f64> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|&(name, value)| (name.to_owned(), value.to_owned()))
            .collect();
        Environment::standard_float().with_resolver(vars)
    }

    #[test]
    fn if_selects_branch() {
        let env = env_with_vars(&[("foo", "3"), ("bar", "2")]);
        assert_eq!(env.evaluate("if($foo > $bar, yes, no)").unwrap(), Value::str("yes"));
        let env = env_with_vars(&[("foo", "1"), ("bar", "2")]);
        assert_eq!(env.evaluate("if($foo > $bar, yes, no)").unwrap(), Value::str("no"));
        assert_eq!(
            env.evaluate("if(true, 1 + 1, 0) * 3").unwrap(),
            Value::Number(6.0)
        );
    }

    #[test]
    fn if_only_evaluates_selected_branch() {
        let calls = Rc::new(Cell::new(0));
        let mut env = Environment::<f64>::standard_float();
        let calls_ = Rc::clone(&calls);
        env.insert_fn("tick", move |_, _| {
            calls_.set(calls_.get() + 1);
            Ok(Value::Number(1.0))
        });

        assert_eq!(env.evaluate("if(1, 2, tick())").unwrap(), Value::str("2"));
        assert_eq!(calls.get(), 0);
        assert_eq!(env.evaluate("if(0, 2, tick())").unwrap(), Value::Number(1.0));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn if_args_count() {
        let env = Environment::<f64>::standard_float();
        assert_matches!(
            env.evaluate("if(1, 2)").unwrap_err(),
            Error::ArgsCount { name: "if", expected: "3", actual: 2 }
        );
    }

    #[test]
    fn and_or_short_circuit() {
        let env = Environment::<f64>::standard_float();
        assert_eq!(env.evaluate("and(1, 2 > 1, true)").unwrap(), Value::Bool(true));
        assert_eq!(env.evaluate("and(1, 0, sqrt(boom))").unwrap(), Value::Bool(false));
        assert_eq!(env.evaluate("or(0, 1 == 1, sqrt(boom))").unwrap(), Value::Bool(true));
        assert_eq!(env.evaluate("or(false, 0)").unwrap(), Value::Bool(false));
        // Variables in args are substituted before the call, even in unevaluated args
        assert_matches!(
            env.evaluate("or(1, $boom)").unwrap_err(),
            Error::NoResolver(name) if name == "boom"
        );
        assert_matches!(env.evaluate("and()").unwrap_err(), Error::ArgsCount { .. });
    }
}

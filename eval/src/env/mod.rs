//! [`Environment`] and the traits used to extend it.
//!
//! An environment holds everything the [`Evaluator`] consults while processing expressions:
//! the operator table, named functions and the variable resolver. The evaluator only borrows
//! the environment, so a single environment can be shared among any number of evaluations.

use num_traits::{Float, Zero};

use core::fmt;
use std::{collections::HashMap, rc::Rc};

use crate::{
    arith::{NumLiteral, OrdArithmetic},
    fns,
    ops::{standard, Operator, OperatorTable},
    EvalResult, Evaluator,
};

mod resolver;

pub use self::resolver::Resolver;

/// Default maximum number of variable substitutions performed on a single string.
pub const DEFAULT_EXPANSION_LIMIT: usize = 1_024;

/// Function callable from expressions.
///
/// Functions receive their argument text *unevaluated*; the only processing applied to it
/// is variable substitution. This allows implementing short-circuiting functions: a function
/// can evaluate any part of its args via [`Evaluator::evaluate_new()`] and split args via
/// [`next_arg()`](crate::next_arg).
///
/// The trait is implemented for closures with the matching signature. Argument types
/// of such closures should be specified explicitly (see the example below).
///
/// # Examples
///
/// ```
/// use infix_eval::{next_arg, Environment, Error, EvalResult, Evaluator, Value};
///
/// let mut env = Environment::<f64>::standard_float();
/// env.insert_fn("second", |evaluator: &Evaluator<'_, f64>, args: &str| {
///     let (_, rest) = next_arg(args);
///     let (second, _) = next_arg(rest);
///     evaluator.evaluate_new(second)
/// });
/// assert_eq!(env.evaluate("second(1, 2 + 3)")?, Value::Number(5.0));
/// # Ok::<_, Error>(())
/// ```
pub trait NativeFn<T> {
    /// Executes the function on the raw `args` text.
    ///
    /// # Errors
    ///
    /// Returns an error if the args are invalid, or propagates errors from evaluating them.
    fn call(&self, evaluator: &Evaluator<'_, T>, args: &str) -> EvalResult<T>;
}

impl<T, F> NativeFn<T> for F
where
    F: Fn(&Evaluator<'_, T>, &str) -> EvalResult<T>,
{
    fn call(&self, evaluator: &Evaluator<'_, T>, args: &str) -> EvalResult<T> {
        self(evaluator, args)
    }
}

/// Configuration shared by evaluations: operators, functions and variable resolution.
///
/// # Examples
///
/// ```
/// use infix_eval::{arith::{Checked, CheckedArithmetic}, Environment, Error, Value};
/// use std::collections::HashMap;
///
/// let vars: HashMap<String, String> = [("x".to_owned(), "3".to_owned())].into();
/// let env = Environment::<i64>::with_arithmetic(CheckedArithmetic::<Checked>::new())
///     .with_resolver(vars);
/// assert_eq!(env.evaluate("max($x, 2) * -2")?, Value::Number(-6));
/// assert_eq!(env.evaluate("if($x > 2, big, small)")?, Value::str("big"));
/// # Ok::<_, Error>(())
/// ```
pub struct Environment<T> {
    operators: OperatorTable<T>,
    functions: HashMap<String, Box<dyn NativeFn<T>>>,
    resolver: Option<Box<dyn Resolver>>,
    expansion_limit: usize,
}

impl<T> fmt::Debug for Environment<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut functions: Vec<_> = self.functions.keys().collect();
        functions.sort_unstable();
        formatter
            .debug_struct("Environment")
            .field("operators", &self.operators)
            .field("functions", &functions)
            .field("has_resolver", &self.resolver.is_some())
            .field("expansion_limit", &self.expansion_limit)
            .finish()
    }
}

impl<T> Default for Environment<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Environment<T> {
    /// Creates an environment that only knows about grouping parens. Such an environment
    /// is useful as a base for a fully custom set of operators.
    pub fn new() -> Self {
        Self {
            operators: OperatorTable::new(),
            functions: HashMap::new(),
            resolver: None,
            expansion_limit: DEFAULT_EXPANSION_LIMIT,
        }
    }

    /// Replaces the operator table.
    #[must_use]
    pub fn with_operators(mut self, operators: OperatorTable<T>) -> Self {
        self.operators = operators;
        self
    }

    /// Returns the operator table.
    pub fn operators(&self) -> &OperatorTable<T> {
        &self.operators
    }

    /// Inserts an operator, replacing an existing one with the same symbol.
    pub fn insert_operator(&mut self, operator: Operator<T>) -> &mut Self {
        self.operators.insert(operator);
        self
    }

    /// Inserts a native function with the specified name, replacing an existing one.
    pub fn insert_native_fn(
        &mut self,
        name: impl Into<String>,
        function: impl NativeFn<T> + 'static,
    ) -> &mut Self {
        self.functions.insert(name.into(), Box::new(function));
        self
    }

    /// Inserts a function defined by a closure. Unlike [`Self::insert_native_fn()`],
    /// this method allows to omit argument types in the closure.
    pub fn insert_fn<F>(&mut self, name: impl Into<String>, function: F) -> &mut Self
    where
        F: Fn(&Evaluator<'_, T>, &str) -> EvalResult<T> + 'static,
    {
        self.insert_native_fn(name, function)
    }

    /// Returns a function with the specified name.
    pub fn get_fn(&self, name: &str) -> Option<&dyn NativeFn<T>> {
        self.functions.get(name).map(Box::as_ref)
    }

    /// Iterates over the names of defined functions in no particular order.
    pub fn fn_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.functions.keys().map(String::as_str)
    }

    /// Sets the resolver for `$name` variables.
    #[must_use]
    pub fn with_resolver(mut self, resolver: impl Resolver + 'static) -> Self {
        self.set_resolver(resolver);
        self
    }

    /// Sets the resolver for `$name` variables.
    pub fn set_resolver(&mut self, resolver: impl Resolver + 'static) -> &mut Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    /// Returns the variable resolver, if one is set.
    pub fn resolver(&self) -> Option<&dyn Resolver> {
        self.resolver.as_deref()
    }

    /// Sets the maximum number of variable substitutions in a single string
    /// (default: [`DEFAULT_EXPANSION_LIMIT`]).
    #[must_use]
    pub fn with_expansion_limit(mut self, limit: usize) -> Self {
        self.expansion_limit = limit;
        self
    }

    /// Returns the variable expansion limit.
    pub fn expansion_limit(&self) -> usize {
        self.expansion_limit
    }

    /// Creates an evaluator borrowing this environment.
    pub fn evaluator(&self) -> Evaluator<'_, T> {
        Evaluator::new(self)
    }

    /// Evaluates an expression. This is a shortcut for `self.evaluator().evaluate(expression)`.
    ///
    /// # Errors
    ///
    /// Returns syntax errors or errors raised during evaluation.
    pub fn evaluate(&self, expression: &str) -> EvalResult<T> {
        self.evaluator().evaluate(expression)
    }
}

impl<T: NumLiteral + Zero> Environment<T> {
    /// Creates an environment with the [standard operators](standard) and the generic
    /// functions (`if`, `and`, `or`, `min`, `max`, `abs`) based on the provided arithmetic.
    pub fn with_arithmetic<A>(arithmetic: A) -> Self
    where
        A: OrdArithmetic<T> + 'static,
    {
        let arithmetic: Rc<dyn OrdArithmetic<T>> = Rc::new(arithmetic);
        let mut env = Self::new().with_operators(standard::operators(Rc::clone(&arithmetic)));
        env.insert_native_fn("if", fns::If::new(Rc::clone(&arithmetic)))
            .insert_native_fn("and", fns::And::new(Rc::clone(&arithmetic)))
            .insert_native_fn("or", fns::Or::new(Rc::clone(&arithmetic)))
            .insert_native_fn("min", fns::Compare::min(Rc::clone(&arithmetic)))
            .insert_native_fn("max", fns::Compare::max(Rc::clone(&arithmetic)))
            .insert_native_fn("abs", fns::Abs::new(arithmetic));
        env
    }
}

impl<T: Float + NumLiteral> Environment<T> {
    /// Inserts single-arg float functions, such as `sqrt`, `cbrt`, `ln` or `sin`.
    /// See [`fns::FloatFn::all()`] for the full list.
    pub fn insert_float_fns(&mut self) -> &mut Self {
        for function in fns::FloatFn::all() {
            self.insert_native_fn(function.name(), function);
        }
        self
    }
}

impl<T: Float + NumLiteral> Environment<T>
where
    crate::arith::StdArithmetic: OrdArithmetic<T>,
{
    /// Creates an environment with [`StdArithmetic`](crate::arith::StdArithmetic), standard
    /// operators, generic and float functions.
    pub fn standard_float() -> Self {
        let mut env = Self::with_arithmetic(crate::arith::StdArithmetic);
        env.insert_float_fns();
        env
    }
}

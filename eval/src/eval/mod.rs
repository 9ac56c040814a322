//! [`Evaluator`] and its supporting parts: the parser, expression tree and variable
//! substitution.

use log::{debug, trace};

use core::fmt;

use self::{
    node::{Call, Node},
    parser::Parser,
};
use crate::{ops::Operator, Environment, Error, EvalResult, Value};

mod node;
mod parser;
mod vars;

/// Expression evaluator.
///
/// An evaluator holds no mutable state: each call to [`Self::evaluate()`] parses
/// the expression into a fresh tree and evaluates it. Thus, an evaluator can be reused
/// for any number of expressions, and nested evaluations (e.g., from [native functions])
/// do not interfere with the outer one.
///
/// [native functions]: crate::NativeFn
///
/// # Examples
///
/// ```
/// use infix_eval::{Environment, Error, Value};
/// use std::collections::HashMap;
///
/// let vars: HashMap<String, String> = [("foo".to_owned(), "22 + 2".to_owned())].into();
/// let env = Environment::<f64>::standard_float().with_resolver(vars);
/// let evaluator = env.evaluator();
///
/// assert_eq!(evaluator.evaluate("(1 + 2) * 3")?, Value::Number(9.0));
/// // Variable substitution is textual; the result is a string unless
/// // an operator coerces it.
/// assert_eq!(evaluator.evaluate("$foo")?, Value::str("22 + 2"));
/// // An empty expression evaluates to an empty string.
/// assert!(evaluator.evaluate("  ")?.is_empty());
/// # Ok::<_, Error>(())
/// ```
pub struct Evaluator<'env, T> {
    env: &'env Environment<T>,
}

impl<T> fmt::Debug for Evaluator<'_, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Evaluator")
            .field("env", self.env)
            .finish()
    }
}

impl<T> Clone for Evaluator<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Evaluator<'_, T> {}

impl<'env, T> Evaluator<'env, T> {
    /// Creates an evaluator over the provided environment.
    pub fn new(env: &'env Environment<T>) -> Self {
        Self { env }
    }

    /// Returns the environment of this evaluator.
    pub fn env(&self) -> &'env Environment<T> {
        self.env
    }

    /// Parses and evaluates an expression.
    ///
    /// # Errors
    ///
    /// Returns an error if the expression is syntactically invalid, if a variable
    /// cannot be substituted, or if an operator / function fails.
    pub fn evaluate(&self, expression: &str) -> EvalResult<T> {
        debug!("evaluating `{expression}`");
        let tree = Parser::new(self.env, expression).parse()?;
        let Some(tree) = tree else {
            return Ok(Value::empty());
        };
        trace!("parsed `{expression}` as {tree}");
        self.evaluate_node(&tree)
    }

    /// Evaluates an expression with a fresh evaluator over the same environment.
    /// This is the method [native functions](crate::NativeFn) should use to evaluate
    /// their args.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Self::evaluate()`].
    pub fn evaluate_new(&self, expression: &str) -> EvalResult<T> {
        Self::new(self.env).evaluate(expression)
    }

    /// Substitutes all `$name` variables in `text` using the environment resolver.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is malformed or cannot be resolved, or if
    /// the expansion limit is exceeded.
    pub fn substitute(&self, text: &str) -> Result<String, Error> {
        let substituted =
            vars::substitute(text, self.env.resolver(), self.env.expansion_limit())?;
        Ok(substituted.into_owned())
    }

    fn evaluate_node(&self, node: &Node<'_, T>) -> EvalResult<T> {
        match node {
            Node::Operand(operand) => {
                let text = vars::substitute(
                    operand.text,
                    self.env.resolver(),
                    self.env.expansion_limit(),
                )?;
                apply_unary(operand.unary, Value::Str(text.into_owned()))
            }
            Node::Binary { op, lhs, rhs } => {
                let lhs = self.evaluate_node(lhs)?;
                let rhs = self.evaluate_node(rhs)?;
                op.apply_binary(lhs, rhs)
            }
            Node::Unary { op, inner } => {
                let inner = self.evaluate_node(inner)?;
                op.apply_unary(inner)
            }
            Node::Call(call) => self.evaluate_call(call),
        }
    }

    fn evaluate_call(&self, call: &Call<'_, T>) -> EvalResult<T> {
        let args = vars::substitute(call.args, self.env.resolver(), self.env.expansion_limit())?;
        debug!("calling `{}` with args `{args}`", call.name);
        let value = call.function.call(self, &args)?;
        apply_unary(call.unary, value)
    }
}

fn apply_unary<T>(unary: Option<&Operator<T>>, value: Value<T>) -> EvalResult<T> {
    match unary {
        Some(op) => op.apply_unary(value),
        None => Ok(value),
    }
}

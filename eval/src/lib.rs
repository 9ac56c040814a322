//! Evaluator for infix expressions with pluggable operators, functions and number types.
//!
//! # How it works
//!
//! 1. An expression is scanned for operator symbols from an [`OperatorTable`]. The text
//!   between operators forms *operands*; the scanner does not tokenize otherwise, so operands
//!   may be numbers, words, or anything else not containing operator symbols.
//! 2. Operands and operators are processed with a variant of the shunting-yard algorithm,
//!   producing an expression tree. A `-` or `+` symbol directly following `e` / `E`
//!   after a digit (e.g., in `1.5e-3`) is a part of the operand, not an operator.
//!   Parenthesis directly following an operand denote a function call.
//! 3. The tree is evaluated bottom-up. Leaf operands undergo [variable substitution](Resolver)
//!   and evaluate to [`Value::Str`]; operators and functions coerce values as they see fit.
//!   Function args are passed to the function *unevaluated*, so that functions like `if`
//!   evaluate only what they need.
//!
//! The evaluator itself knows nothing about numbers. The [standard operators](ops::standard)
//! and [functions](fns) are generic over an [`Arithmetic`](arith::Arithmetic), which defines
//! number semantics (overflow handling, division by zero etc.).
//!
//! # Crate features
//!
//! - `bigint`. Implements [`NumLiteral`](arith::NumLiteral) for big integers from
//!   the [`num-bigint`] crate (i.e., `BigInt` and `BigUint`), so that they can be used
//!   with [`CheckedArithmetic`](arith::CheckedArithmetic).
//!
//! [`num-bigint`]: https://crates.io/crates/num-bigint
//!
//! # Examples
//!
//! ```
//! use infix_eval::{Environment, Error, Value};
//! use std::collections::HashMap;
//!
//! let vars: HashMap<String, String> = [
//!     ("foo".to_owned(), "3".to_owned()),
//!     ("bar".to_owned(), "2".to_owned()),
//! ]
//! .into();
//! let env = Environment::<f64>::standard_float().with_resolver(vars);
//!
//! assert_eq!(env.evaluate("1 + 2 * 3")?, Value::Number(7.0));
//! assert_eq!(env.evaluate("sqrt(cbrt(8) + 7)")?, Value::Number(3.0));
//! assert_eq!(env.evaluate("if($foo > $bar, yes, no)")?, Value::str("yes"));
//! assert_eq!(env.evaluate("$foo * -$bar ^ 2")?, Value::Number(12.0));
//! # Ok::<_, Error>(())
//! ```
//!
//! Integer arithmetic with custom functions:
//!
//! ```
//! use infix_eval::{arith::{Checked, CheckedArithmetic}, fns, split_args, Environment, Error, Value};
//!
//! let mut env = Environment::<i64>::with_arithmetic(CheckedArithmetic::<Checked>::new());
//! env.insert_fn("sum", |evaluator, args| {
//!     let mut sum = 0_i64;
//!     for arg in split_args(args) {
//!         sum += fns::evaluate_number(evaluator, arg)?;
//!     }
//!     Ok(Value::Number(sum))
//! });
//!
//! assert_eq!(env.evaluate("sum(1, 2 * 3, max(4, 5))")?, Value::Number(12));
//! assert!(env.evaluate("9223372036854775807 + 1").is_err());
//! # Ok::<_, Error>(())
//! ```

#![doc(html_root_url = "https://docs.rs/infix-eval/0.1.0")]
#![warn(missing_docs, missing_debug_implementations)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]

pub use self::{
    args::{next_arg, split_args, SplitArgs},
    env::{Environment, NativeFn, Resolver},
    error::{Error, EvalResult},
    eval::Evaluator,
    ops::{Operator, OperatorTable},
    values::Value,
};

pub mod arith;
mod args;
pub mod env;
pub mod error;
mod eval;
pub mod fns;
pub mod ops;
mod values;

//! Value backends: `Arithmetic` trait and its implementations.
//!
//! # Traits
//!
//! An [`Arithmetic`] defines fallible arithmetic operations on numbers of a certain type,
//! namely, addition, subtraction, multiplication, division, remainder, exponentiation
//! (all binary ops), and negation (a unary op). The evaluator itself never touches numbers;
//! arithmetics are used by the [standard operators](crate::ops::standard) and
//! [functions](crate::fns), which can be swapped for custom ones.
//!
//! [`OrdArithmetic`] extends [`Arithmetic`] with a partial comparison operation
//! (i.e., an analogue to [`PartialOrd`]).
//!
//! [`NumLiteral`] defines how operand text is coerced into a number.
//!
//! # Implementations
//!
//! This module defines the following kinds of arithmetics:
//!
//! - [`StdArithmetic`] takes all implementations from the corresponding [`ops`](core::ops)
//!   traits. This means that it's safe to use *provided* the ops are infallible, as is the case
//!   for floating-point numbers.
//! - [`WrappingArithmetic`] is defined for integer types; it uses wrapping semantics for all ops.
//! - [`CheckedArithmetic`] is defined for integer types; it uses checked semantics for all ops.
//! - [`ZeroOnDivision`] wraps another arithmetic so that division by zero yields zero
//!   instead of an error or a non-finite value.

use num_traits::Zero;

use core::cmp::Ordering;

use crate::error::ArithmeticError;

#[cfg(feature = "bigint")]
mod bigint;
mod generic;

pub use self::generic::{
    Checked, CheckedArithmetic, CheckedArithmeticKind, NegateOnlyZero, StdArithmetic, Unchecked,
    WrappingArithmetic,
};

/// Number semantics used by the standard operators and functions.
///
/// All ops take operands by value and may fail; for example, integer arithmetics fail
/// on overflow. An arithmetic may have a state (e.g., a modulus), hence the `&self` receiver.
pub trait Arithmetic<T> {
    /// Computes `x + y`.
    ///
    /// # Errors
    ///
    /// Fails if the sum cannot be represented, e.g. on integer overflow.
    fn add(&self, x: T, y: T) -> Result<T, ArithmeticError>;

    /// Computes `x - y`.
    ///
    /// # Errors
    ///
    /// Fails if the difference cannot be represented, e.g. when it is negative
    /// for an unsigned type.
    fn sub(&self, x: T, y: T) -> Result<T, ArithmeticError>;

    /// Computes `x * y`.
    ///
    /// # Errors
    ///
    /// Fails if the product cannot be represented.
    fn mul(&self, x: T, y: T) -> Result<T, ArithmeticError>;

    /// Computes `x / y`.
    ///
    /// # Errors
    ///
    /// Usually fails with [`ArithmeticError::DivisionByZero`] if `y` is zero.
    fn div(&self, x: T, y: T) -> Result<T, ArithmeticError>;

    /// Computes the remainder `x % y`.
    ///
    /// # Errors
    ///
    /// Usually fails with [`ArithmeticError::DivisionByZero`] if `y` is zero.
    fn rem(&self, x: T, y: T) -> Result<T, ArithmeticError>;

    /// Computes `x` raised to the power `y`.
    ///
    /// # Errors
    ///
    /// Integer arithmetics fail if `y` is negative or the result overflows.
    fn pow(&self, x: T, y: T) -> Result<T, ArithmeticError>;

    /// Computes `-x`.
    ///
    /// # Errors
    ///
    /// Fails if `-x` cannot be represented, e.g. for `i64::MIN` or non-zero unsigned ints.
    fn neg(&self, x: T) -> Result<T, ArithmeticError>;

    /// Checks whether `x` and `y` are equal.
    fn eq(&self, x: &T, y: &T) -> bool;
}

/// [`Arithmetic`] that can also compare numbers. Order comparisons, `min` / `max`
/// and `abs` require it.
pub trait OrdArithmetic<T>: Arithmetic<T> {
    /// Compares `x` and `y`, returning `None` for incomparable values (e.g., NaN floats).
    fn partial_cmp(&self, x: &T, y: &T) -> Option<Ordering>;
}

/// Number that can be parsed from operand text.
pub trait NumLiteral: Clone + 'static {
    /// Parses a number from the trimmed operand text.
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::InvalidLiteral`] if the text is not a number.
    fn parse_literal(text: &str) -> Result<Self, ArithmeticError>;
}

macro_rules! impl_num_literal {
    ($($num:ty),+) => {
        $(
        impl NumLiteral for $num {
            fn parse_literal(text: &str) -> Result<Self, ArithmeticError> {
                text.parse()
                    .map_err(|_| ArithmeticError::InvalidLiteral(text.to_owned()))
            }
        }
        )+
    };
}

impl_num_literal!(i8, u8, i16, u16, i32, u32, i64, u64, i128, u128, f32, f64);

/// Arithmetic in which division or remainder by zero produce zero.
///
/// # Examples
///
/// ```
/// use infix_eval::arith::{Arithmetic, CheckedArithmetic, ZeroOnDivision};
///
/// let checked: CheckedArithmetic = CheckedArithmetic::new();
/// assert!(Arithmetic::<i64>::div(&checked, 1, 0).is_err());
/// let lenient = ZeroOnDivision::new(checked);
/// assert_eq!(Arithmetic::<i64>::div(&lenient, 1, 0).unwrap(), 0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroOnDivision<A> {
    base: A,
}

impl<A> ZeroOnDivision<A> {
    /// Wraps the provided arithmetic.
    pub const fn new(base: A) -> Self {
        Self { base }
    }
}

impl<T, A> Arithmetic<T> for ZeroOnDivision<A>
where
    T: Zero,
    A: Arithmetic<T>,
{
    #[inline]
    fn add(&self, x: T, y: T) -> Result<T, ArithmeticError> {
        self.base.add(x, y)
    }

    #[inline]
    fn sub(&self, x: T, y: T) -> Result<T, ArithmeticError> {
        self.base.sub(x, y)
    }

    #[inline]
    fn mul(&self, x: T, y: T) -> Result<T, ArithmeticError> {
        self.base.mul(x, y)
    }

    fn div(&self, x: T, y: T) -> Result<T, ArithmeticError> {
        if y.is_zero() {
            Ok(T::zero())
        } else {
            self.base.div(x, y)
        }
    }

    fn rem(&self, x: T, y: T) -> Result<T, ArithmeticError> {
        if y.is_zero() {
            Ok(T::zero())
        } else {
            self.base.rem(x, y)
        }
    }

    #[inline]
    fn pow(&self, x: T, y: T) -> Result<T, ArithmeticError> {
        self.base.pow(x, y)
    }

    #[inline]
    fn neg(&self, x: T) -> Result<T, ArithmeticError> {
        self.base.neg(x)
    }

    #[inline]
    fn eq(&self, x: &T, y: &T) -> bool {
        self.base.eq(x, y)
    }
}

impl<T, A> OrdArithmetic<T> for ZeroOnDivision<A>
where
    T: Zero,
    A: OrdArithmetic<T>,
{
    #[inline]
    fn partial_cmp(&self, x: &T, y: &T) -> Option<Ordering> {
        self.base.partial_cmp(x, y)
    }
}

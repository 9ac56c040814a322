//! Arithmetics generic over `num-traits` number types.

use num_traits::{
    checked_pow, CheckedAdd, CheckedDiv, CheckedMul, CheckedNeg, CheckedSub, NumOps, One, Pow,
    Signed, Unsigned, WrappingAdd, WrappingMul, WrappingNeg, WrappingSub, Zero,
};

use core::{cmp::Ordering, marker::PhantomData, ops};

use crate::{
    arith::{Arithmetic, OrdArithmetic},
    error::ArithmeticError,
};

/// Implements `OrdArithmetic` via `PartialOrd` for the specified arithmetics.
macro_rules! impl_ord_via_partial_ord {
    ($($arith:ident $(<$kind:ident>)?),+) => {
        $(
        impl<T $(, $kind)?> OrdArithmetic<T> for $arith $(<$kind>)?
        where
            Self: Arithmetic<T>,
            T: PartialOrd,
        {
            #[inline]
            fn partial_cmp(&self, x: &T, y: &T) -> Option<Ordering> {
                x.partial_cmp(y)
            }
        }
        )+
    };
}

impl_ord_via_partial_ord!(StdArithmetic, CheckedArithmetic<Kind>, WrappingArithmetic);

/// Converts the `pow` exponent, which must be a non-negative number fitting into `usize`.
fn exponent<T>(y: T) -> Result<usize, ArithmeticError>
where
    usize: TryFrom<T>,
{
    usize::try_from(y).map_err(|_| ArithmeticError::InvalidExponent)
}

/// Arithmetic delegating to the `core::ops` implementations of the number type.
///
/// This is the natural backend for `f32` and `f64`, for which all ops are infallible.
/// Division by zero follows IEEE 754 and produces a non-finite value rather than an error;
/// wrap the arithmetic into [`ZeroOnDivision`](crate::arith::ZeroOnDivision) to get zero
/// instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdArithmetic;

impl<T> Arithmetic<T> for StdArithmetic
where
    T: Clone + NumOps + PartialEq + ops::Neg<Output = T> + Pow<T, Output = T>,
{
    fn add(&self, x: T, y: T) -> Result<T, ArithmeticError> {
        Ok(x + y)
    }

    fn sub(&self, x: T, y: T) -> Result<T, ArithmeticError> {
        Ok(x - y)
    }

    fn mul(&self, x: T, y: T) -> Result<T, ArithmeticError> {
        Ok(x * y)
    }

    fn div(&self, x: T, y: T) -> Result<T, ArithmeticError> {
        Ok(x / y)
    }

    fn rem(&self, x: T, y: T) -> Result<T, ArithmeticError> {
        Ok(x % y)
    }

    fn pow(&self, x: T, y: T) -> Result<T, ArithmeticError> {
        Ok(x.pow(y))
    }

    fn neg(&self, x: T) -> Result<T, ArithmeticError> {
        Ok(-x)
    }

    fn eq(&self, x: &T, y: &T) -> bool {
        x == y
    }
}

/// Negation strategy of a [`CheckedArithmetic`].
pub trait CheckedArithmeticKind<T> {
    /// Negates `value`. Returns `None` if the negation overflows.
    fn checked_neg(value: T) -> Option<T>;
}

/// Negation via [`CheckedNeg`]; the default for primitive signed integers.
#[derive(Debug)]
pub struct Checked(());

impl<T: CheckedNeg> CheckedArithmeticKind<T> for Checked {
    fn checked_neg(value: T) -> Option<T> {
        value.checked_neg()
    }
}

/// Negation for unsigned types: only zero can be negated.
#[derive(Debug)]
pub struct NegateOnlyZero(());

impl<T: Unsigned + Zero> CheckedArithmeticKind<T> for NegateOnlyZero {
    fn checked_neg(value: T) -> Option<T> {
        value.is_zero().then_some(value)
    }
}

/// Negation that never fails, which is the case for signed big integers.
#[derive(Debug)]
pub struct Unchecked(());

impl<T: Signed> CheckedArithmeticKind<T> for Unchecked {
    fn checked_neg(value: T) -> Option<T> {
        Some(-value)
    }
}

/// Integer arithmetic failing with [`ArithmeticError::IntegerOverflow`] whenever the result
/// does not fit into the number type.
///
/// `Kind` determines how negation is checked: [`Checked`] (the default) for primitive signed
/// ints, [`NegateOnlyZero`] for unsigned ints, or [`Unchecked`] for signed big ints.
///
/// # Examples
///
/// ```
/// use infix_eval::{
///     arith::{CheckedArithmetic, NegateOnlyZero},
///     error::ArithmeticError, Environment, Error, Value,
/// };
///
/// let env = Environment::<u32>::with_arithmetic(CheckedArithmetic::<NegateOnlyZero>::new());
/// assert_eq!(env.evaluate("2 ^ 10 - 24")?, Value::Number(1_000));
/// assert!(matches!(
///     env.evaluate("2 - 3"),
///     Err(Error::Arithmetic(ArithmeticError::IntegerOverflow))
/// ));
/// # Ok::<_, Error>(())
/// ```
#[derive(Debug)]
pub struct CheckedArithmetic<Kind = Checked>(PhantomData<Kind>);

impl<Kind> Clone for CheckedArithmetic<Kind> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Kind> Copy for CheckedArithmetic<Kind> {}

impl<Kind> Default for CheckedArithmetic<Kind> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Kind> CheckedArithmetic<Kind> {
    /// Creates an arithmetic instance.
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

fn no_overflow<T>(value: Option<T>) -> Result<T, ArithmeticError> {
    value.ok_or(ArithmeticError::IntegerOverflow)
}

fn nonzero_divisor<T: Zero>(y: &T) -> Result<(), ArithmeticError> {
    if y.is_zero() {
        Err(ArithmeticError::DivisionByZero)
    } else {
        Ok(())
    }
}

impl<T, Kind> Arithmetic<T> for CheckedArithmetic<Kind>
where
    T: Clone + PartialEq + Zero + One + CheckedAdd + CheckedSub + CheckedMul + CheckedDiv,
    Kind: CheckedArithmeticKind<T>,
    usize: TryFrom<T>,
{
    fn add(&self, x: T, y: T) -> Result<T, ArithmeticError> {
        no_overflow(x.checked_add(&y))
    }

    fn sub(&self, x: T, y: T) -> Result<T, ArithmeticError> {
        no_overflow(x.checked_sub(&y))
    }

    fn mul(&self, x: T, y: T) -> Result<T, ArithmeticError> {
        no_overflow(x.checked_mul(&y))
    }

    fn div(&self, x: T, y: T) -> Result<T, ArithmeticError> {
        nonzero_divisor(&y)?;
        // Overflows only for `MIN / -1`.
        no_overflow(x.checked_div(&y))
    }

    /// Truncated remainder, i.e., `x - (x / y) * y`. The sign of the result follows `x`.
    fn rem(&self, x: T, y: T) -> Result<T, ArithmeticError> {
        nonzero_divisor(&y)?;
        let truncated = no_overflow(x.checked_div(&y))?;
        let truncated = no_overflow(truncated.checked_mul(&y))?;
        no_overflow(x.checked_sub(&truncated))
    }

    fn pow(&self, x: T, y: T) -> Result<T, ArithmeticError> {
        no_overflow(checked_pow(x, exponent(y)?))
    }

    fn neg(&self, x: T) -> Result<T, ArithmeticError> {
        no_overflow(Kind::checked_neg(x))
    }

    fn eq(&self, x: &T, y: &T) -> bool {
        x == y
    }
}

/// Integer arithmetic with wrapping (modulo `2^N`) semantics for all ops.
/// Dividing by zero is still an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct WrappingArithmetic;

impl WrappingArithmetic {
    /// Checks whether `y` is `-1` for a signed type, in which case `x / y` may overflow.
    fn is_minus_one<T>(y: &T) -> bool
    where
        T: Copy + PartialOrd + Zero + One + WrappingNeg,
    {
        *y < T::zero() && y.wrapping_neg().is_one()
    }
}

impl<T> Arithmetic<T> for WrappingArithmetic
where
    T: Copy
        + PartialOrd
        + Zero
        + One
        + WrappingAdd
        + WrappingSub
        + WrappingMul
        + WrappingNeg
        + ops::Div<T, Output = T>
        + ops::Rem<T, Output = T>,
    usize: TryFrom<T>,
{
    fn add(&self, x: T, y: T) -> Result<T, ArithmeticError> {
        Ok(x.wrapping_add(&y))
    }

    fn sub(&self, x: T, y: T) -> Result<T, ArithmeticError> {
        Ok(x.wrapping_sub(&y))
    }

    fn mul(&self, x: T, y: T) -> Result<T, ArithmeticError> {
        Ok(x.wrapping_mul(&y))
    }

    fn div(&self, x: T, y: T) -> Result<T, ArithmeticError> {
        nonzero_divisor(&y)?;
        Ok(if Self::is_minus_one(&y) {
            x.wrapping_neg()
        } else {
            x / y
        })
    }

    fn rem(&self, x: T, y: T) -> Result<T, ArithmeticError> {
        nonzero_divisor(&y)?;
        Ok(if Self::is_minus_one(&y) {
            T::zero()
        } else {
            x % y
        })
    }

    fn pow(&self, x: T, y: T) -> Result<T, ArithmeticError> {
        let mut exp = exponent(y)?;
        let (mut base, mut acc) = (x, T::one());
        // Exponentiation by squaring.
        while exp > 0 {
            if exp % 2 == 1 {
                acc = acc.wrapping_mul(&base);
            }
            exp /= 2;
            if exp > 0 {
                base = base.wrapping_mul(&base);
            }
        }
        Ok(acc)
    }

    fn neg(&self, x: T) -> Result<T, ArithmeticError> {
        Ok(x.wrapping_neg())
    }

    fn eq(&self, x: &T, y: &T) -> bool {
        x == y
    }
}

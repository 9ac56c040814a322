//! Support of arbitrary-precision integers from `num-bigint`.

use num_bigint::{BigInt, BigUint};

use crate::{arith::NumLiteral, error::ArithmeticError};

impl NumLiteral for BigInt {
    fn parse_literal(text: &str) -> Result<Self, ArithmeticError> {
        text.parse()
            .map_err(|_| ArithmeticError::InvalidLiteral(text.to_owned()))
    }
}

impl NumLiteral for BigUint {
    fn parse_literal(text: &str) -> Result<Self, ArithmeticError> {
        text.parse()
            .map_err(|_| ArithmeticError::InvalidLiteral(text.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use num_traits::{One, Zero};

    use super::*;
    use crate::arith::{Arithmetic, CheckedArithmetic, NegateOnlyZero, OrdArithmetic, Unchecked};

    static_assertions::assert_impl_all!(CheckedArithmetic<Unchecked>: OrdArithmetic<BigInt>);
    static_assertions::assert_impl_all!(CheckedArithmetic<NegateOnlyZero>: OrdArithmetic<BigUint>);

    #[test]
    fn big_integer_ops() {
        let arithmetic = CheckedArithmetic::<Unchecked>::new();
        let x = BigInt::parse_literal("340282366920938463463374607431768211456").unwrap();
        let square = arithmetic.mul(x.clone(), x.clone()).unwrap();
        assert_eq!(arithmetic.div(square, x.clone()).unwrap(), x);
        assert_eq!(
            arithmetic.div(BigInt::one(), BigInt::zero()).unwrap_err(),
            ArithmeticError::DivisionByZero
        );

        let arithmetic = CheckedArithmetic::<NegateOnlyZero>::new();
        assert_eq!(
            arithmetic.sub(BigUint::one(), BigUint::from(2_u8)).unwrap_err(),
            ArithmeticError::IntegerOverflow
        );
    }
}

//! Exact rational helpers shared by the arctangent algebra.
//!
//! All reduction happens on `BigRational`, which keeps every value in lowest terms
//! with a positive denominator. Nothing here rounds.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use crate::error::MachinError;

/// Returns -1, 0 or 1 according to the sign of `value`.
pub fn sign(value: &BigInt) -> i64 {
    if value.is_positive() {
        1
    } else if value.is_negative() {
        -1
    } else {
        0
    }
}

/// Applies the tangent addition formula `(a + b) / (1 - a*b)` exactly.
///
/// For `a = tan(alpha)` and `b = tan(beta)` with both angles in (-pi/2, pi/2), the
/// sum `alpha + beta` stays inside (-pi/2, pi/2) exactly when `a*b < 1`. At
/// `a*b = 1` the sum is ±pi/2 and the formula divides by zero; past it the result
/// is the tangent of an angle on another branch, and the arctangent of that value
/// is not `alpha + beta`. Both cases fail with [`MachinError::DomainError`].
pub fn tangent_sum(a: &BigRational, b: &BigRational) -> Result<BigRational, MachinError> {
    let denom = BigRational::one() - a * b;
    if !denom.is_positive() {
        return Err(MachinError::DomainError);
    }
    Ok((a + b) / denom)
}

/// Splits a rational into `(sign, |numer|, denom)` with `denom > 0`.
pub fn split_sign(value: &BigRational) -> (i64, BigInt, BigInt) {
    (
        sign(value.numer()),
        value.numer().abs(),
        value.denom().clone(),
    )
}

/// Builds `coeff * numer / denom` as a reduced rational.
///
/// `denom` must be nonzero; a zero denominator yields zero.
pub fn signed_ratio(coeff: i64, numer: &BigInt, denom: &BigInt) -> BigRational {
    if denom.is_zero() {
        return BigRational::zero();
    }
    BigRational::new(BigInt::from(coeff) * numer, denom.clone())
}

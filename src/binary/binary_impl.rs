//! Core signed binary number implementation.
//!
//! This module provides `Binary`, an exact binary representation of dyadic rationals
//! as `mantissa * 2^exponent` where the mantissa is normalized to be odd (unless zero).
//! Non-dyadic quantities (quotients, arctangent arguments) enter through
//! [`Binary::from_ratio`] and [`Binary::div_integer`], which truncate toward zero at a
//! caller-chosen number of significant bits.

use std::cmp::Ordering;
use std::fmt;
use std::num::NonZeroU64;

use num_bigint::{BigInt, Sign};
use num_traits::{Signed, ToPrimitive, Zero};

/// Exact binary number represented as `mantissa * 2^exponent`.
///
/// The mantissa is normalized to be odd unless the value is zero.
/// This normalization ensures a canonical representation for each value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binary {
    mantissa: BigInt,
    exponent: BigInt,
}

impl Binary {
    /// Creates a new Binary number, normalizing the representation.
    pub fn new(mantissa: BigInt, exponent: BigInt) -> Self {
        Self::normalize(mantissa, exponent)
    }

    /// Returns the zero value.
    pub fn zero() -> Self {
        Self {
            mantissa: BigInt::zero(),
            exponent: BigInt::zero(),
        }
    }

    /// Returns the integer `value` as an exact Binary.
    pub fn from_integer(value: impl Into<BigInt>) -> Self {
        Self::normalize(value.into(), BigInt::zero())
    }

    /// Approximates `numer / denom` with at least `precision_bits` significant bits,
    /// truncating toward zero.
    ///
    /// A zero denominator yields zero; callers validate denominators before lowering.
    pub fn from_ratio(numer: &BigInt, denom: &BigInt, precision_bits: u64) -> Self {
        if numer.is_zero() || denom.is_zero() {
            return Self::zero();
        }
        let negative = numer.is_negative() != denom.is_negative();
        let num = numer.magnitude();
        let den = denom.magnitude();

        // Scale so the quotient carries `precision_bits` bits: q = num * 2^shift / den.
        let shift = i128::from(precision_bits) + i128::from(den.bits()) - i128::from(num.bits());
        let (quotient, exponent) = if shift >= 0 {
            let Ok(amount) = usize::try_from(shift) else {
                return Self::zero();
            };
            ((num << amount) / den, -BigInt::from(amount))
        } else {
            let Ok(amount) = usize::try_from(-shift) else {
                return Self::zero();
            };
            (num / (den << amount), BigInt::from(amount))
        };

        let sign = if negative { Sign::Minus } else { Sign::Plus };
        Self::normalize(BigInt::from_biguint(sign, quotient), exponent)
    }

    /// Returns a reference to the mantissa.
    pub fn mantissa(&self) -> &BigInt {
        &self.mantissa
    }

    /// Returns a reference to the exponent.
    pub fn exponent(&self) -> &BigInt {
        &self.exponent
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.mantissa.is_negative()
    }

    /// Adds two Binary numbers.
    pub fn add(&self, other: &Self) -> Self {
        let (lhs, rhs, exponent) = Self::align_mantissas(self, other);
        Self::normalize(lhs + rhs, exponent)
    }

    /// Subtracts another Binary number from this one.
    pub fn sub(&self, other: &Self) -> Self {
        let (lhs, rhs, exponent) = Self::align_mantissas(self, other);
        Self::normalize(lhs - rhs, exponent)
    }

    /// Negates this Binary number.
    pub fn neg(&self) -> Self {
        if self.mantissa.is_zero() {
            return self.clone();
        }
        Self {
            mantissa: -self.mantissa.clone(),
            exponent: self.exponent.clone(),
        }
    }

    pub fn abs(&self) -> Self {
        if self.mantissa.is_negative() {
            self.neg()
        } else {
            self.clone()
        }
    }

    /// Multiplies two Binary numbers.
    pub fn mul(&self, other: &Self) -> Self {
        let exponent = &self.exponent + &other.exponent;
        let mantissa = &self.mantissa * &other.mantissa;
        Self::normalize(mantissa, exponent)
    }

    /// Multiplies a Binary by an integer.
    pub fn mul_integer(&self, k: impl Into<BigInt>) -> Self {
        Self::normalize(&self.mantissa * k.into(), self.exponent.clone())
    }

    /// Divides by a positive integer, keeping at least `precision_bits` significant bits.
    pub fn div_integer(&self, divisor: NonZeroU64, precision_bits: u64) -> Self {
        let divisor = BigInt::from(divisor.get());
        let quotient = Self::from_ratio(&self.mantissa, &divisor, precision_bits);
        if quotient.is_zero() {
            return quotient;
        }
        Self::normalize(quotient.mantissa, quotient.exponent + &self.exponent)
    }

    /// Truncates a Binary to at most `precision_bits` of mantissa, rounding toward zero.
    pub fn truncate_precision(&self, precision_bits: u64) -> Self {
        let bit_length = self.mantissa.magnitude().bits();
        if bit_length <= precision_bits {
            return self.clone();
        }

        let shift = bit_length - precision_bits;
        let Ok(shift_usize) = usize::try_from(shift) else {
            return Self::zero();
        };
        // `>>` on a negative BigInt rounds toward negative infinity; shift the magnitude.
        let magnitude = self.mantissa.magnitude() >> shift_usize;
        let truncated = BigInt::from_biguint(self.mantissa.sign(), magnitude);
        Self::normalize(truncated, &self.exponent + BigInt::from(shift))
    }

    /// Returns the position of the highest set bit plus one, i.e. the `p` with
    /// `2^(p-1) <= |self| < 2^p`. Zero has no magnitude and returns `None`.
    pub fn magnitude_bits(&self) -> Option<BigInt> {
        if self.mantissa.is_zero() {
            return None;
        }
        Some(&self.exponent + BigInt::from(self.mantissa.magnitude().bits()))
    }

    /// Approximates this value as an `f64`. Values outside the `f64` range saturate
    /// to zero or infinity.
    pub fn to_f64(&self) -> f64 {
        let reduced = self.truncate_precision(64);
        let Some(mantissa) = reduced.mantissa.to_f64() else {
            return 0.0;
        };
        match reduced.exponent.to_i32() {
            Some(exponent) => mantissa * 2f64.powi(exponent),
            None if reduced.exponent.is_negative() => 0.0,
            None => mantissa * f64::INFINITY,
        }
    }

    /// Normalizes the representation by factoring out powers of 2 from the mantissa.
    fn normalize(mantissa: BigInt, exponent: BigInt) -> Self {
        match mantissa.trailing_zeros() {
            None => Self::zero(),
            Some(0) => Self { mantissa, exponent },
            Some(zeros) => {
                let magnitude = mantissa.magnitude() >> zeros as usize;
                Self {
                    mantissa: BigInt::from_biguint(mantissa.sign(), magnitude),
                    exponent: exponent + BigInt::from(zeros),
                }
            }
        }
    }

    /// Aligns the mantissas of two Binary numbers to a common exponent.
    /// Returns (lhs_mantissa, rhs_mantissa, common_exponent) where both mantissas
    /// are shifted to the minimum exponent of the two inputs.
    fn align_mantissas(lhs: &Self, rhs: &Self) -> (BigInt, BigInt, BigInt) {
        if lhs.mantissa.is_zero() {
            return (BigInt::zero(), rhs.mantissa.clone(), rhs.exponent.clone());
        }
        if rhs.mantissa.is_zero() {
            return (lhs.mantissa.clone(), BigInt::zero(), lhs.exponent.clone());
        }
        let exponent = if lhs.exponent <= rhs.exponent {
            lhs.exponent.clone()
        } else {
            rhs.exponent.clone()
        };
        let lhs_mantissa = Self::shift_mantissa(&lhs.mantissa, &(&lhs.exponent - &exponent));
        let rhs_mantissa = Self::shift_mantissa(&rhs.mantissa, &(&rhs.exponent - &exponent));
        (lhs_mantissa, rhs_mantissa, exponent)
    }

    /// Shifts a mantissa left by a non-negative exponent difference.
    ///
    /// Exponent gaps wider than the address space cannot be materialized; those
    /// only arise from values no series here can produce.
    fn shift_mantissa(mantissa: &BigInt, shift: &BigInt) -> BigInt {
        match shift.to_usize() {
            Some(0) | None => mantissa.clone(),
            Some(amount) => mantissa << amount,
        }
    }
}

impl Ord for Binary {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs_sign = self.mantissa.sign();
        let rhs_sign = other.mantissa.sign();
        if lhs_sign != rhs_sign {
            return lhs_sign.cmp(&rhs_sign);
        }
        let (lhs, rhs, _) = Self::align_mantissas(self, other);
        lhs.cmp(&rhs)
    }
}

impl PartialOrd for Binary {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = f.precision().unwrap_or(super::DEFAULT_DISPLAY_DIGITS);
        f.write_str(&super::display::to_decimal_string(self, digits))
    }
}

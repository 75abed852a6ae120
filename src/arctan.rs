//! Arctangent terms and their exact algebra.
//!
//! An [`ArctanTerm`] stands for `coeff * arctan(numer / denom)`. Two reductions turn
//! any Machin-like sum into a single arctangent without rounding:
//!
//! - [`ArctanTerm::composite`] folds a multiplicity `k * arctan(x)` into
//!   `sign(k) * arctan(y)` by applying the tangent addition formula `|k| - 1` times.
//! - [`ArctanTerm::combine`] folds `arctan(a) + arctan(b)` into one `±arctan(y)`.
//!
//! Both work on `BigRational` and only lower to [`Binary`] when a series asks for the
//! argument through [`ArctanTerm::x`].

use std::fmt;

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive};

use crate::binary::Binary;
use crate::error::MachinError;
use crate::rational::{signed_ratio, split_sign, tangent_sum};

/// `coeff * arctan(numer / denom)` with `numer, denom >= 1`.
///
/// Freshly constructed terms keep their parameters verbatim: `|coeff| > 1` means the
/// arctangent counts `coeff` times and `numer / denom` need not be in lowest terms.
/// Terms produced by `composite` and `combine` are normalized: `coeff` is -1, 0 or 1
/// and the fraction is reduced. The sign of the represented angle lives in `coeff`.
///
/// Equality is structural on `(coeff, numer, denom)`, so `atan(2/4)` and `atan(1/2)`
/// are different values even though they denote the same angle.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ArctanTerm {
    coeff: i64,
    numer: BigInt,
    denom: BigInt,
}

impl ArctanTerm {
    /// Creates `coeff * arctan(numer / denom)`.
    ///
    /// Fails with a validation error when `numer` or `denom` is not positive. Any
    /// `coeff` is accepted here; `composite` and `combine` reject `coeff == 0`.
    pub fn new(
        coeff: i64,
        numerator: impl Into<BigInt>,
        denominator: impl Into<BigInt>,
    ) -> Result<Self, MachinError> {
        let numer = numerator.into();
        let denom = denominator.into();
        if !numer.is_positive() {
            return Err(MachinError::NonpositiveNumerator);
        }
        if !denom.is_positive() {
            return Err(MachinError::NonpositiveDenominator);
        }
        Ok(Self {
            coeff,
            numer,
            denom,
        })
    }

    /// The term `0 * arctan(1)`, the normalized form of a zero angle.
    pub fn zero() -> Self {
        Self {
            coeff: 0,
            numer: BigInt::one(),
            denom: BigInt::one(),
        }
    }

    pub fn coeff(&self) -> i64 {
        self.coeff
    }

    pub fn numer(&self) -> &BigInt {
        &self.numer
    }

    pub fn denom(&self) -> &BigInt {
        &self.denom
    }

    /// Whether `coeff` is -1, 0 or 1 and `numer / denom` is in lowest terms.
    pub fn is_normalized(&self) -> bool {
        (-1..=1).contains(&self.coeff) && self.numer.gcd(&self.denom).is_one()
    }

    /// The unsigned argument `numer / denom` as a reduced rational.
    pub fn ratio(&self) -> BigRational {
        signed_ratio(1, &self.numer, &self.denom)
    }

    /// `coeff * numer / denom` as a reduced rational. For a normalized term this is
    /// the tangent of the represented angle.
    pub fn signed_ratio(&self) -> BigRational {
        signed_ratio(self.coeff, &self.numer, &self.denom)
    }

    /// The argument `x = numer / denom` lowered to `precision_bits` significant bits.
    pub fn x(&self, precision_bits: u64) -> Binary {
        Binary::from_ratio(&self.numer, &self.denom, precision_bits)
    }

    /// Approximates `x = numer / denom` as an `f64`.
    pub fn x_f64(&self) -> f64 {
        self.x(64).to_f64()
    }

    /// Reduces `coeff * arctan(x)` to `sign(coeff) * arctan(y)`.
    ///
    /// Starting from `r = x`, applies `r <- (r + x) / (1 - r*x)` `|coeff| - 1` times in
    /// exact arithmetic. Fails with `ZeroCoefficient` for `coeff == 0` and with
    /// `DomainError` if the accumulated angle reaches or passes pi/2.
    pub fn composite(&self) -> Result<Self, MachinError> {
        if self.coeff == 0 {
            return Err(MachinError::ZeroCoefficient);
        }
        let x = self.ratio();
        let mut angle = x.clone();
        for _ in 1..self.coeff.unsigned_abs() {
            angle = tangent_sum(&angle, &x)?;
        }
        let (_, numer, denom) = split_sign(&angle);
        Ok(Self {
            coeff: self.coeff.signum(),
            numer,
            denom,
        })
    }

    /// Reduces `self + other` to a single normalized term.
    ///
    /// Both operands are normalized with `composite` first, so either may carry a
    /// multiplicity. A sum of exactly zero comes back as [`ArctanTerm::zero`].
    /// Longer sums are folded left to right by the caller.
    pub fn combine(&self, other: &Self) -> Result<Self, MachinError> {
        let a = self.composite()?.signed_ratio();
        let b = other.composite()?.signed_ratio();
        let sum = tangent_sum(&a, &b)?;
        Ok(Self::from_signed_ratio(&sum))
    }

    /// Raw structural equality on `(coeff, numer, denom)`.
    ///
    /// Terms that denote the same angle but were never normalized compare unequal.
    pub fn equal_to(&self, other: &Self) -> bool {
        self == other
    }

    fn from_signed_ratio(value: &BigRational) -> Self {
        let (coeff, numer, denom) = split_sign(value);
        if coeff == 0 {
            return Self::zero();
        }
        Self {
            coeff,
            numer,
            denom,
        }
    }

    /// Approximates the represented angle `coeff * arctan(numer / denom)` in `f64`.
    pub fn angle_f64(&self) -> f64 {
        let coeff = self.coeff.to_f64().unwrap_or(0.0);
        coeff * self.x_f64().atan()
    }
}

impl fmt::Display for ArctanTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}*atan({}/{})", self.coeff, self.numer, self.denom)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::panic)]

    use std::f64::consts::{FRAC_PI_2, PI};

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::error::ErrorKind;
    use crate::test_utils::{assert_close, term};

    fn ratio_f64(value: &ArctanTerm) -> f64 {
        let numer = value.numer().to_f64().expect("numerator fits in f64");
        let denom = value.denom().to_f64().expect("denominator fits in f64");
        numer / denom
    }

    #[test]
    fn new_rejects_nonpositive_arguments() {
        assert_eq!(
            ArctanTerm::new(1, 0, 5),
            Err(MachinError::NonpositiveNumerator)
        );
        assert_eq!(
            ArctanTerm::new(1, -1, 5),
            Err(MachinError::NonpositiveNumerator)
        );
        let err = ArctanTerm::new(1, 1, 0).expect_err("zero denominator");
        assert_eq!(err, MachinError::NonpositiveDenominator);
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn new_keeps_parameters_verbatim() {
        let value = term(-3, 2, 4);
        assert_eq!(value.coeff(), -3);
        assert_eq!(value.numer(), &BigInt::from(2));
        assert_eq!(value.denom(), &BigInt::from(4));
        assert!(!value.is_normalized());
    }

    #[test]
    fn composite_of_machin_leading_term() {
        // 4*atan(1/5) = atan(120/119)
        let reduced = term(4, 1, 5).composite().expect("4*atan(1/5) < pi/2");
        assert_eq!(reduced, term(1, 120, 119));
        assert!(reduced.is_normalized());
    }

    #[test]
    fn composite_keeps_sign_in_coefficient() {
        // 2*atan(1/3) = atan(3/4)
        let reduced = term(-2, 1, 3).composite().expect("2*atan(1/3) < pi/2");
        assert_eq!(reduced, term(-1, 3, 4));
    }

    #[test]
    fn composite_of_single_term_reduces_fraction() {
        let reduced = term(1, 6, 8).composite().expect("no addition needed");
        assert_eq!(reduced, term(1, 3, 4));
        assert_eq!(term(-1, 1, 7).composite(), Ok(term(-1, 1, 7)));
    }

    #[test]
    fn composite_rejects_zero_coefficient() {
        let err = term(0, 1, 5).composite().expect_err("coefficient 0");
        assert_eq!(err, MachinError::ZeroCoefficient);
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn composite_at_right_angle_is_domain_error() {
        // 2*atan(1) = pi/2
        let err = term(2, 1, 1).composite().expect_err("pi/2");
        assert_eq!(err, MachinError::DomainError);
        assert_eq!(err.kind(), ErrorKind::Domain);
        // 3*atan(1/2) is fine, 4*atan(1/2) > pi/2 is not
        assert_eq!(term(3, 1, 2).composite(), Ok(term(1, 11, 2)));
        assert_eq!(term(4, 1, 2).composite(), Err(MachinError::DomainError));
    }

    #[test]
    fn composite_matches_float_tangent() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let magnitude: i64 = rng.gen_range(1..=6);
            let coeff = if rng.gen_bool(0.5) { magnitude } else { -magnitude };
            let numer: i64 = rng.gen_range(1..=5);
            let denom: i64 = rng.gen_range(1..=60);
            let input = term(coeff, numer, denom);
            let angle = magnitude as f64 * (numer as f64 / denom as f64).atan();

            match input.composite() {
                Ok(reduced) => {
                    assert!(angle < FRAC_PI_2, "{input} should not reduce");
                    assert!(reduced.is_normalized());
                    assert_eq!(reduced.coeff(), coeff.signum());
                    let expected = angle.tan();
                    assert_close(ratio_f64(&reduced), expected, expected * 1e-9);
                }
                Err(err) => {
                    assert_eq!(err, MachinError::DomainError);
                    assert!(angle > FRAC_PI_2 - 1e-9, "{input} should reduce");
                }
            }
        }
    }

    #[test]
    fn combine_machin_identity_to_atan_one() {
        let sum = term(4, 1, 5)
            .combine(&term(-1, 1, 239))
            .expect("Machin terms combine");
        assert_eq!(sum, term(1, 1, 1));
        assert_close(4.0 * sum.angle_f64(), PI, 1e-12);
    }

    #[test]
    fn combine_euler_identity() {
        // atan(1/2) + atan(1/3) = pi/4
        let sum = term(1, 1, 2).combine(&term(1, 1, 3)).expect("combine");
        assert_eq!(sum, term(1, 1, 1));
    }

    #[test]
    fn combine_is_commutative() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut random_term = || {
            let magnitude: i64 = rng.gen_range(1..=4);
            let coeff = if rng.gen_bool(0.5) { magnitude } else { -magnitude };
            term(coeff, rng.gen_range(1..=4), rng.gen_range(1..=40))
        };
        for _ in 0..200 {
            let lhs = random_term();
            let rhs = random_term();
            let forward = lhs.combine(&rhs);
            let backward = rhs.combine(&lhs);
            assert_eq!(forward, backward, "{lhs} + {rhs}");
            if let Ok(sum) = forward {
                assert!(sum.is_normalized());
                assert_close(
                    sum.angle_f64(),
                    lhs.angle_f64() + rhs.angle_f64(),
                    1e-9,
                );
            }
        }
    }

    #[test]
    fn combine_to_zero_angle() {
        let sum = term(1, 1, 3).combine(&term(-1, 2, 6)).expect("cancels");
        assert_eq!(sum, ArctanTerm::zero());
        assert!(sum.is_normalized());
        assert_eq!(sum.composite(), Err(MachinError::ZeroCoefficient));
    }

    #[test]
    fn combine_rejects_zero_coefficient_operand() {
        assert_eq!(
            term(1, 1, 3).combine(&term(0, 1, 2)),
            Err(MachinError::ZeroCoefficient)
        );
    }

    #[test]
    fn combine_at_right_angle_is_domain_error() {
        // atan(2) + atan(1/2) = pi/2
        assert_eq!(
            term(1, 2, 1).combine(&term(1, 1, 2)),
            Err(MachinError::DomainError)
        );
        // same-sign operands past pi/2
        assert_eq!(
            term(-1, 3, 1).combine(&term(-1, 1, 1)),
            Err(MachinError::DomainError)
        );
    }

    #[test]
    fn equal_to_is_reflexive_and_symmetric() {
        let lhs = term(2, 1, 5);
        let rhs = term(2, 1, 5);
        assert!(lhs.equal_to(&lhs));
        assert!(lhs.equal_to(&rhs));
        assert!(rhs.equal_to(&lhs));
        assert!(!lhs.equal_to(&term(-2, 1, 5)));
    }

    #[test]
    fn equal_to_is_structural_not_semantic() {
        // 2*atan(1/5) and atan(5/12) denote the same angle
        let multiple = term(2, 1, 5);
        let single = term(1, 5, 12);
        assert!(!multiple.equal_to(&single));
        let reduced = multiple.composite().expect("2*atan(1/5) < pi/2");
        assert!(reduced.equal_to(&single));

        // unreduced fractions are distinct from their reduced forms
        let unreduced = term(1, 10, 24);
        assert!(!unreduced.equal_to(&single));
        assert!(!unreduced.equal_to(&multiple));
        let unreduced_normalized = unreduced.composite().expect("single term");
        assert!(unreduced_normalized.equal_to(&reduced));
    }

    #[test]
    fn display_shows_parameters() {
        assert_eq!(term(-4, 1, 5).to_string(), "-4*atan(1/5)");
    }
}

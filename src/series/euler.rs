//! Euler-transformed arctangent expansion.
//!
//! `atan(x) = sum_n (2^(2n) (n!)^2 / (2n+1)!) * x^(2n+1) / (1 + x^2)^(n+1)`.
//! Successive terms differ by the factor `(2n+2)/(2n+3) * x^2/(1+x^2)`, which stays
//! below 1/2 for `|x| <= 1`, so every step adds at least one bit even at `x = 1`.

use std::num::NonZeroU64;

use num_bigint::BigInt;

use crate::arctan::ArctanTerm;
use crate::binary::Binary;

use super::{Series, SeriesKind, SeriesState};

/// `coeff * atan(x)` through the Euler transform.
///
/// Seeds `term_0 = coeff * x / (1 + x^2)` and multiplies each term by
/// `(2n+2)/(2n+3) * x^2/(1+x^2)`. All terms share the sign of `coeff`.
#[derive(Clone, Debug)]
pub struct EulerTransformSeries {
    param: ArctanTerm,
    /// `x^2 / (1 + x^2)`
    ratio: Binary,
    state: SeriesState,
}

impl EulerTransformSeries {
    pub fn new(param: &ArctanTerm, precision_bits: u64) -> Self {
        let numer = param.numer();
        let denom = param.denom();
        let numer_squared = numer * numer;
        // 1 + x^2 = (denom^2 + numer^2) / denom^2
        let norm = &numer_squared + denom * denom;
        let first_term = Binary::from_ratio(
            &(numer * denom * BigInt::from(param.coeff())),
            &norm,
            precision_bits,
        );
        let ratio = Binary::from_ratio(&numer_squared, &norm, precision_bits);
        Self {
            param: param.clone(),
            ratio,
            state: SeriesState::seeded(first_term, param.x(precision_bits), precision_bits),
        }
    }

    /// Computes `term_{n+1} = term_n * (2n+2)/(2n+3) * x^2/(1+x^2)`.
    fn next_term(&self) -> Binary {
        let n = self.state.n() as u64;
        let even = 2 * n + 2;
        let next_odd = NonZeroU64::MIN.saturating_add(2 * n + 2);
        self.state
            .term()
            .mul(&self.ratio)
            .mul_integer(even)
            .div_integer(next_odd, self.state.precision_bits())
    }
}

impl Series for EulerTransformSeries {
    fn state(&self) -> &SeriesState {
        &self.state
    }

    fn advance(&mut self) -> &Binary {
        let next = self.next_term();
        self.state.accumulate(next)
    }

    fn param(&self) -> &ArctanTerm {
        &self.param
    }

    fn kind(&self) -> SeriesKind {
        SeriesKind::Euler
    }
}

impl Iterator for EulerTransformSeries {
    type Item = Binary;

    /// Yields the running sum after each step; never ends.
    fn next(&mut self) -> Option<Binary> {
        Some(self.advance().clone())
    }
}

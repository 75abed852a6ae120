//! Direct Taylor expansion of the arctangent.

use std::num::NonZeroU64;

use num_bigint::BigInt;

use crate::arctan::ArctanTerm;
use crate::binary::Binary;

use super::{Series, SeriesKind, SeriesState};

/// `coeff * (x - x^3/3 + x^5/5 - ...)`.
///
/// Seeds `term_0 = coeff * x` and multiplies each term by `-x^2 * (2n+1)/(2n+3)`.
/// Converges for `|x| <= 1`; each step gains roughly `-log10(x^2)` digits, so the
/// Euler transform is the better choice as `|x|` approaches 1.
#[derive(Clone, Debug)]
pub struct ArctanSeries {
    param: ArctanTerm,
    x_squared: Binary,
    state: SeriesState,
}

impl ArctanSeries {
    pub fn new(param: &ArctanTerm, precision_bits: u64) -> Self {
        let numer = param.numer();
        let denom = param.denom();
        let first_term =
            Binary::from_ratio(&(numer * BigInt::from(param.coeff())), denom, precision_bits);
        let x_squared = Binary::from_ratio(&(numer * numer), &(denom * denom), precision_bits);
        Self {
            param: param.clone(),
            x_squared,
            state: SeriesState::seeded(first_term, param.x(precision_bits), precision_bits),
        }
    }

    /// Computes `term_{n+1} = -term_n * x^2 * (2n+1) / (2n+3)`.
    fn next_term(&self) -> Binary {
        let n = self.state.n() as u64;
        let odd = 2 * n + 1;
        let next_odd = NonZeroU64::MIN.saturating_add(2 * n + 2);
        self.state
            .term()
            .mul(&self.x_squared)
            .mul_integer(odd)
            .div_integer(next_odd, self.state.precision_bits())
            .neg()
    }
}

impl Series for ArctanSeries {
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
        SeriesKind::Taylor
    }
}

impl Iterator for ArctanSeries {
    type Item = Binary;

    /// Yields the running sum after each step; never ends.
    fn next(&mut self) -> Option<Binary> {
        Some(self.advance().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_close, bin, term};

    const BITS: u64 = 128;

    #[test]
    fn seed_is_coefficient_times_x() {
        let series = ArctanSeries::new(&term(-1, 1, 4), BITS);
        assert_eq!(series.n(), 0);
        assert_eq!(series.term(), &bin(-1, -2));
        assert_eq!(series.val(), &bin(-1, -2));
        assert_eq!(series.x(), &bin(1, -2));
    }

    #[test]
    fn first_steps_follow_alternating_expansion() {
        // atan(1/2) = 1/2 - 1/24 + 1/160 - ...
        let mut series = ArctanSeries::new(&term(1, 1, 2), BITS);
        series.advance();
        assert_eq!(series.n(), 1);
        assert_close(series.term().to_f64(), -1.0 / 24.0, 1e-18);
        series.advance();
        assert_close(series.term().to_f64(), 1.0 / 160.0, 1e-18);
        assert_close(series.val().to_f64(), 0.5 - 1.0 / 24.0 + 1.0 / 160.0, 1e-15);
    }

    #[test]
    fn terms_strictly_decrease_in_magnitude() {
        for param in [term(1, 1, 2), term(-1, 9, 10), term(1, 1, 239)] {
            let mut series = ArctanSeries::new(&param, BITS);
            let mut previous = series.term().abs();
            for _ in 0..300 {
                series.advance();
                let current = series.term().abs();
                assert!(current < previous, "{param} at step {}", series.n());
                previous = current;
            }
        }
    }

    #[test]
    fn iterator_yields_running_sums() {
        let sums: Vec<Binary> = ArctanSeries::new(&term(1, 1, 2), BITS).take(3).collect();
        assert_eq!(sums.len(), 3);
        assert!(sums[0] < bin(1, -1));
        assert!(sums[1] > sums[0]);
        assert!(sums[2] < sums[1]);
    }

    #[test]
    fn multiplicity_scales_the_sum() {
        let mut series = ArctanSeries::new(&term(4, 1, 5), BITS);
        for _ in 0..60 {
            series.advance();
        }
        assert_close(series.val().to_f64(), 4.0 * 0.2f64.atan(), 1e-15);
    }
}

//! Lazy series evaluation of a single arctangent term.
//!
//! A [`Series`] is seeded from one [`ArctanTerm`] and produces increasingly accurate
//! partial sums of `coeff * arctan(numer / denom)`, one [`Series::advance`] at a time.
//! It never rewinds and never decides it is finished: callers stop advancing once the
//! partial sum is good enough for them (see [`SeriesState::is_converged`]).
//!
//! Two strategies share the same shape:
//! - [`ArctanSeries`]: the alternating Taylor expansion `x - x^3/3 + x^5/5 - ...`
//! - [`EulerTransformSeries`]: the Euler-transformed expansion in powers of
//!   `x^2 / (1 + x^2)`, which converges geometrically even at `x = 1`

mod euler;
mod taylor;

pub use euler::EulerTransformSeries;
pub use taylor::ArctanSeries;

use std::fmt;

use num_bigint::BigInt;

use crate::arctan::ArctanTerm;
use crate::binary::Binary;

/// Step counter, latest increment and running sum shared by every series strategy.
///
/// After `n` steps `val` is the sum of the seed and the `n` increments produced since,
/// each truncated to `precision_bits` significant bits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeriesState {
    n: usize,
    term: Binary,
    val: Binary,
    x: Binary,
    precision_bits: u64,
}

impl SeriesState {
    /// Starts a series at step 0 with `first_term` as both increment and sum.
    pub(crate) fn seeded(first_term: Binary, x: Binary, precision_bits: u64) -> Self {
        let term = first_term.truncate_precision(precision_bits);
        Self {
            n: 0,
            val: term.clone(),
            term,
            x,
            precision_bits,
        }
    }

    /// Records `next` as the step `n + 1` increment and returns the new sum.
    pub(crate) fn accumulate(&mut self, next: Binary) -> &Binary {
        self.term = next.truncate_precision(self.precision_bits);
        if !self.is_negligible(&self.term) {
            self.val = self.val.add(&self.term).truncate_precision(self.precision_bits);
        }
        self.n += 1;
        &self.val
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn term(&self) -> &Binary {
        &self.term
    }

    pub fn val(&self) -> &Binary {
        &self.val
    }

    pub fn x(&self) -> &Binary {
        &self.x
    }

    pub fn precision_bits(&self) -> u64 {
        self.precision_bits
    }

    /// Whether the latest increment no longer changes the sum at the working precision.
    pub fn is_converged(&self) -> bool {
        self.is_negligible(&self.term)
    }

    /// A value is negligible when it lies entirely below the last bit kept for `val`.
    fn is_negligible(&self, value: &Binary) -> bool {
        let Some(value_bits) = value.magnitude_bits() else {
            return true;
        };
        let Some(val_bits) = self.val.magnitude_bits() else {
            return false;
        };
        value_bits + BigInt::from(self.precision_bits) < val_bits
    }
}

/// Forward-only generator of partial sums for one arctangent term.
pub trait Series {
    /// Shared step state.
    fn state(&self) -> &SeriesState;

    /// Produces the next increment, adds it to the running sum, increments `n` and
    /// returns the new sum.
    fn advance(&mut self) -> &Binary;

    /// The term this series evaluates.
    fn param(&self) -> &ArctanTerm;

    fn kind(&self) -> SeriesKind;

    fn n(&self) -> usize {
        self.state().n()
    }

    fn term(&self) -> &Binary {
        self.state().term()
    }

    fn val(&self) -> &Binary {
        self.state().val()
    }

    fn x(&self) -> &Binary {
        self.state().x()
    }
}

/// Which expansion evaluates an arctangent.
///
/// Taylor needs no preprocessing but slows down sharply as `|x| -> 1`; the Euler
/// transform costs a few more operations per step and keeps a ratio of at most 1/2.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SeriesKind {
    Taylor,
    #[default]
    Euler,
}

impl SeriesKind {
    /// Builds a series of this kind for `param` at `precision_bits` working precision.
    pub fn build(self, param: &ArctanTerm, precision_bits: u64) -> Box<dyn Series> {
        match self {
            Self::Taylor => Box::new(ArctanSeries::new(param, precision_bits)),
            Self::Euler => Box::new(EulerTransformSeries::new(param, precision_bits)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Taylor => "taylor",
            Self::Euler => "euler",
        }
    }
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

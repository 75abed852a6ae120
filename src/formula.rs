//! Machin-like identities as explicit, ordered lists of arctangent terms.
//!
//! Each identity states `pi/4 = sum_i c_i * atan(p_i / q_i)`. [`MachinFormula::reduce`]
//! folds the list into one normalized [`ArctanTerm`] with exact arithmetic, so a
//! correct identity always reduces to `atan(1)`.

use std::fmt;

use crate::arctan::ArctanTerm;
use crate::error::MachinError;

/// Names and `(coeff, numer, denom)` parameters of the built-in identities.
const KNOWN_FORMULAS: &[(&str, &[(i64, u64, u64)])] = &[
    ("machin", &[(4, 1, 5), (-1, 1, 239)]),
    ("euler", &[(1, 1, 2), (1, 1, 3)]),
    ("hermann", &[(2, 1, 2), (-1, 1, 7)]),
    ("hutton", &[(2, 1, 3), (1, 1, 7)]),
    ("gauss", &[(12, 1, 18), (8, 1, 57), (-5, 1, 239)]),
    (
        "stormer",
        &[(44, 1, 57), (7, 1, 239), (-12, 1, 682), (24, 1, 12943)],
    ),
    (
        "takano",
        &[(12, 1, 49), (32, 1, 57), (-5, 1, 239), (12, 1, 110443)],
    ),
];

/// A named sum of arctangent terms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MachinFormula {
    name: String,
    terms: Vec<ArctanTerm>,
}

impl MachinFormula {
    pub fn new(name: impl Into<String>, terms: Vec<ArctanTerm>) -> Self {
        Self {
            name: name.into(),
            terms,
        }
    }

    /// Builds a formula from raw `(coeff, numer, denom)` parameters, validating each.
    pub fn from_params(
        name: impl Into<String>,
        params: &[(i64, u64, u64)],
    ) -> Result<Self, MachinError> {
        let terms = params
            .iter()
            .map(|&(coeff, numer, denom)| ArctanTerm::new(coeff, numer, denom))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(name, terms))
    }

    /// Looks up a built-in identity by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<Self> {
        KNOWN_FORMULAS
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(name))
            .and_then(|(known, params)| Self::from_params(*known, params).ok())
    }

    /// Names of the built-in identities, in table order.
    pub fn known_names() -> impl Iterator<Item = &'static str> {
        KNOWN_FORMULAS.iter().map(|(name, _)| *name)
    }

    pub fn machin() -> Self {
        Self::builtin("machin")
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn terms(&self) -> &[ArctanTerm] {
        &self.terms
    }

    /// Folds the terms left to right into a single normalized term.
    ///
    /// A single term reduces through `composite`; longer lists through repeated
    /// `combine`. Fails on an empty list and propagates validation and domain errors
    /// from the first failing step.
    pub fn reduce(&self) -> Result<ArctanTerm, MachinError> {
        let (first, rest) = self.terms.split_first().ok_or(MachinError::EmptyFormula)?;
        rest.iter()
            .try_fold(first.composite()?, |acc, next| acc.combine(next))
    }

    fn builtin(name: &str) -> Self {
        Self::by_name(name).unwrap_or_else(|| Self::new(name, Vec::new()))
    }
}

impl fmt::Display for MachinFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: pi/4 =", self.name)?;
        for (index, term) in self.terms.iter().enumerate() {
            if index > 0 {
                write!(f, " +")?;
            }
            write!(f, " {term}")?;
        }
        Ok(())
    }
}

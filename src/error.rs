//! Error types for arctangent reduction and pi evaluation.
//!
//! Every failure is one of two kinds:
//!
//! - **Validation**: the input itself is malformed (a nonpositive argument, a zero
//!   coefficient handed to the reduction, an empty formula, a digit count the
//!   reference strings cannot cover).
//! - **Domain**: the input is well formed but a tangent-addition step reaches or
//!   passes ±pi/2, so the combined angle has no principal arctangent.
//!
//! Errors are returned, never logged or swallowed by the library.

use std::fmt;

/// Coarse classification of a [`MachinError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Domain,
}

/// Errors that can occur while building, reducing or evaluating arctangent terms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MachinError {
    /// The numerator of an arctangent argument must be at least 1.
    NonpositiveNumerator,
    /// The denominator of an arctangent argument must be at least 1.
    NonpositiveDenominator,
    /// A term with coefficient 0 has no defined reduction.
    ZeroCoefficient,
    /// A formula needs at least one term.
    EmptyFormula,
    /// Tangent addition divided by zero or left the principal branch.
    DomainError,
    /// The reference digit string is shorter than the requested digit count.
    ReferenceTooShort { available: usize, requested: usize },
}

impl MachinError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DomainError => ErrorKind::Domain,
            Self::NonpositiveNumerator
            | Self::NonpositiveDenominator
            | Self::ZeroCoefficient
            | Self::EmptyFormula
            | Self::ReferenceTooShort { .. } => ErrorKind::Validation,
        }
    }
}

impl fmt::Display for MachinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonpositiveNumerator => write!(f, "arctangent numerator must be positive"),
            Self::NonpositiveDenominator => write!(f, "arctangent denominator must be positive"),
            Self::ZeroCoefficient => write!(f, "cannot reduce a term with coefficient 0"),
            Self::EmptyFormula => write!(f, "formula has no terms"),
            Self::DomainError => {
                write!(f, "tangent addition reached pi/2; the angle sum has no arctangent")
            }
            Self::ReferenceTooShort {
                available,
                requested,
            } => write!(
                f,
                "reference has {available} characters but {requested} digits were requested"
            ),
        }
    }
}

impl std::error::Error for MachinError {}

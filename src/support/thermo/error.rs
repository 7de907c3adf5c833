use std::convert::Infallible;

use thiserror::Error;

/// Errors that may occur when evaluating thermodynamic properties.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    /// The property is undefined at the given state.
    #[error("undefined property: {context}")]
    Undefined { context: String },

    /// The input state is outside the model's valid domain.
    ///
    /// Lookups backed by fitted tabular data report queries outside the
    /// data's support with this variant rather than extrapolating.
    #[error("out of domain: {context}")]
    OutOfDomain { context: String },

    /// The provided state is invalid or inconsistent.
    #[error("invalid state: {context}")]
    InvalidState { context: String },

    /// The calculation failed due to a numerical or internal error.
    #[error("calculation error: {context}")]
    Calculation { context: String },
}

impl PropertyError {
    /// Returns `true` if the error reports a query outside the model's domain.
    #[must_use]
    pub fn is_out_of_domain(&self) -> bool {
        matches!(self, Self::OutOfDomain { .. })
    }
}

impl From<Infallible> for PropertyError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

use thiserror::Error;

use crate::domain::measurement::Dimension;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("invalid measurement: {dimension} must be a positive number (got {value})")]
    InvalidMeasurement { dimension: Dimension, value: f64 },
    #[error("unknown size label `{0}`")]
    UnknownSizeLabel(String),
    #[error("unknown measurement field `{0}`")]
    UnknownMeasurementField(String),
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

/// Returned in place of a recommendation. The display text is what callers
/// show to the user, so it is kept stable.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RecommendationError {
    #[error("Missing required parameters")]
    MissingParameters,
    #[error("Brand \"{0}\" not found in database")]
    BrandNotFound(String),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl RecommendationError {
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::MissingParameters | Self::BrandNotFound(_))
            || matches!(self, Self::Domain(DomainError::InvalidMeasurement { .. }))
    }
}

pub mod config;
pub mod domain;
pub mod errors;
pub mod fit;

pub use domain::body_type::{BodyType, BodyTypeProfile, StyleRecommendations};
pub use domain::brand::{
    alternative_sizes, Brand, FitStyle, MeasurementRange, SizeChart, SizeEntry, SizeLabel,
};
pub use domain::measurement::{Dimension, Measurements};
pub use domain::recommendation::{
    FitDescriptor, FitPrediction, ProductType, Recommendation, RecommendationRequest, SizeMatch,
};
pub use errors::{DomainError, RecommendationError};
pub use fit::classifier::{BodyTypeClassifier, RuleCascadeClassifier};
pub use fit::matcher::{confidence_for_error, RangeDistanceMatcher, SizeMatcher};
pub use fit::reference::{ReferenceData, ReferenceDataError};
pub use fit::RecommendationEngine;

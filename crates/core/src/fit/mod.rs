//! Size recommendation engine.
//!
//! Classifies the body shape, scores every size in the brand's chart and
//! turns the winner into a `Recommendation` with advice and a per-dimension
//! fit prediction. Everything here is synchronous and read-only, so a single
//! engine can be shared across threads.

pub mod classifier;
pub mod matcher;
pub mod reference;

use tracing::debug;

use crate::domain::body_type::{BodyType, BodyTypeProfile};
use crate::domain::brand::{Brand, SizeEntry};
use crate::domain::measurement::{Dimension, Measurements};
use crate::domain::recommendation::{
    FitDescriptor, FitPrediction, Recommendation, RecommendationRequest, SizeMatch,
};
use crate::errors::{DomainError, RecommendationError};

use self::{
    classifier::{BodyTypeClassifier, RuleCascadeClassifier},
    matcher::{RangeDistanceMatcher, SizeMatcher},
    reference::ReferenceData,
};

/// Below this confidence the user is told to try more than one size.
pub const MULTI_SIZE_ADVICE_THRESHOLD: u8 = 70;

pub struct RecommendationEngine<C = RuleCascadeClassifier, M = RangeDistanceMatcher> {
    reference: ReferenceData,
    classifier: C,
    matcher: M,
}

impl RecommendationEngine {
    pub fn new(reference: ReferenceData) -> Self {
        Self::with_components(reference, RuleCascadeClassifier::default(), RangeDistanceMatcher)
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(ReferenceData::standard())
    }
}

impl<C, M> RecommendationEngine<C, M>
where
    C: BodyTypeClassifier,
    M: SizeMatcher,
{
    pub fn with_components(reference: ReferenceData, classifier: C, matcher: M) -> Self {
        Self { reference, classifier, matcher }
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn supported_brands(&self) -> Vec<&str> {
        self.reference.brand_names()
    }

    pub fn brand(&self, name: &str) -> Option<&Brand> {
        self.reference.brand(name)
    }

    pub fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Recommendation, RecommendationError> {
        let (measurements, brand_name) = match (&request.measurements, &request.brand) {
            (Some(measurements), Some(brand)) if !brand.is_empty() => (measurements, brand),
            _ => return Err(RecommendationError::MissingParameters),
        };

        let brand = self
            .reference
            .brand(brand_name)
            .ok_or_else(|| RecommendationError::BrandNotFound(brand_name.clone()))?;

        let body_type = self.classifier.classify(measurements)?;
        let profile = self.reference.body_type(body_type).ok_or_else(|| {
            DomainError::InvariantViolation(format!("no profile for body type `{body_type}`"))
        })?;

        let size_match = self.matcher.find_best_size(measurements, &brand.size_chart);
        let advice = compose_advice(brand, profile, &size_match);
        let fit_prediction = size_match
            .size
            .and_then(|size| brand.size_chart.get(size))
            .map(|entry| predict_fit(measurements, entry))
            .unwrap_or_default();

        debug!(
            event_name = "fit.recommendation.composed",
            brand = %brand.name,
            body_type = %body_type,
            size = ?size_match.size,
            confidence = ?size_match.confidence,
            "size recommendation composed"
        );

        Ok(Recommendation {
            brand: brand.name.clone(),
            product_type: request.product_type.clone(),
            recommended_size: size_match.size,
            confidence: size_match.confidence,
            body_type,
            body_type_description: profile.description.clone(),
            brand_fit_style: brand.fit_style,
            advice,
            alternative_sizes: size_match.size.map(|size| size.neighbors()).unwrap_or_default(),
            fit_prediction,
        })
    }
}

/// Advice lines in a fixed order; each condition is checked on its own.
pub fn compose_advice(
    brand: &Brand,
    profile: &BodyTypeProfile,
    size_match: &SizeMatch,
) -> Vec<String> {
    let mut advice = Vec::new();

    if brand.runs_small {
        advice.push(format!("{} tends to run small. Consider sizing up.", brand.name));
    }
    if profile.avoids(brand.fit_style) {
        advice.push(style_mismatch_advice(brand, profile.body_type));
    }
    if size_match.confidence.is_some_and(|confidence| confidence < MULTI_SIZE_ADVICE_THRESHOLD) {
        advice.push("Consider trying multiple sizes for best fit.".to_string());
    }

    advice
}

fn style_mismatch_advice(brand: &Brand, body_type: BodyType) -> String {
    format!(
        "This brand's {} fit may not be ideal for your {} body type.",
        brand.fit_style, body_type
    )
}

pub fn predict_fit(measurements: &Measurements, entry: &SizeEntry) -> FitPrediction {
    Dimension::SIZED
        .into_iter()
        .map(|dimension| {
            (dimension, FitDescriptor::describe(measurements.get(dimension), entry.range(dimension)))
        })
        .collect()
}

use crate::domain::body_type::BodyType;
use crate::domain::measurement::Measurements;
use crate::errors::DomainError;

pub const ATHLETIC_MIN_CHEST_TO_WAIST: f64 = 1.25;
pub const TRIANGLE_MIN_HIP_TO_CHEST: f64 = 1.05;
pub const OVAL_MIN_WAIST_TO_CHEST: f64 = 0.9;

/// The three shape ratios the rules look at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyRatios {
    pub chest_to_waist: f64,
    pub hip_to_chest: f64,
    pub waist_to_chest: f64,
}

impl BodyRatios {
    pub fn from_measurements(measurements: &Measurements) -> Result<Self, DomainError> {
        measurements.validate_for_sizing()?;

        Ok(Self {
            chest_to_waist: measurements.chest / measurements.waist,
            hip_to_chest: measurements.hips / measurements.chest,
            waist_to_chest: measurements.waist / measurements.chest,
        })
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ClassificationRule {
    pub body_type: BodyType,
    pub matches: fn(&BodyRatios) -> bool,
}

pub trait BodyTypeClassifier: Send + Sync {
    fn classify(&self, measurements: &Measurements) -> Result<BodyType, DomainError>;
}

/// Rules are tried in order and the first match wins, so an athletic build
/// with wide hips is still athletic.
#[derive(Clone, Debug)]
pub struct RuleCascadeClassifier {
    rules: Vec<ClassificationRule>,
    fallback: BodyType,
}

impl RuleCascadeClassifier {
    pub fn new(rules: Vec<ClassificationRule>, fallback: BodyType) -> Self {
        Self { rules, fallback }
    }

    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }

    pub fn fallback(&self) -> BodyType {
        self.fallback
    }

    pub fn classify_ratios(&self, ratios: &BodyRatios) -> BodyType {
        self.rules
            .iter()
            .find(|rule| (rule.matches)(ratios))
            .map(|rule| rule.body_type)
            .unwrap_or(self.fallback)
    }
}

impl Default for RuleCascadeClassifier {
    fn default() -> Self {
        Self::new(
            vec![
                ClassificationRule {
                    body_type: BodyType::Athletic,
                    matches: |ratios| ratios.chest_to_waist >= ATHLETIC_MIN_CHEST_TO_WAIST,
                },
                ClassificationRule {
                    body_type: BodyType::Triangle,
                    matches: |ratios| ratios.hip_to_chest > TRIANGLE_MIN_HIP_TO_CHEST,
                },
                ClassificationRule {
                    body_type: BodyType::Oval,
                    matches: |ratios| ratios.waist_to_chest > OVAL_MIN_WAIST_TO_CHEST,
                },
            ],
            BodyType::Rectangle,
        )
    }
}

impl BodyTypeClassifier for RuleCascadeClassifier {
    fn classify(&self, measurements: &Measurements) -> Result<BodyType, DomainError> {
        let ratios = BodyRatios::from_measurements(measurements)?;
        Ok(self.classify_ratios(&ratios))
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::body_type::BodyType;
    use crate::domain::measurement::{Dimension, Measurements};
    use crate::errors::DomainError;

    use super::{BodyTypeClassifier, RuleCascadeClassifier};

    fn classify(chest: f64, waist: f64, hips: f64) -> BodyType {
        RuleCascadeClassifier::default()
            .classify(&Measurements::new(chest, waist, hips))
            .expect("classification")
    }

    #[test]
    fn rule_order_is_athletic_triangle_oval_then_rectangle() {
        let order: Vec<BodyType> =
            RuleCascadeClassifier::default().rules().iter().map(|rule| rule.body_type).collect();

        assert_eq!(order, vec![BodyType::Athletic, BodyType::Triangle, BodyType::Oval]);
        assert_eq!(RuleCascadeClassifier::default().fallback(), BodyType::Rectangle);
    }

    #[test]
    fn athletic_wins_over_triangle_when_both_ratios_qualify() {
        // chest/waist = 1.3, hips/chest = 1.1
        assert_eq!(classify(104.0, 80.0, 114.4), BodyType::Athletic);
    }

    #[test]
    fn athletic_threshold_is_inclusive() {
        assert_eq!(classify(100.0, 80.0, 100.0), BodyType::Athletic);
    }

    #[test]
    fn triangle_and_oval_thresholds_are_exclusive() {
        assert_eq!(classify(100.0, 85.0, 105.0), BodyType::Rectangle);
        assert_eq!(classify(100.0, 85.0, 106.0), BodyType::Triangle);
        assert_eq!(classify(100.0, 90.0, 100.0), BodyType::Rectangle);
        assert_eq!(classify(100.0, 91.0, 100.0), BodyType::Oval);
    }

    #[test]
    fn triangle_takes_precedence_over_oval() {
        // waist/chest = 0.95 and hips/chest = 1.1
        assert_eq!(classify(100.0, 95.0, 110.0), BodyType::Triangle);
    }

    #[test]
    fn balanced_measurements_fall_back_to_rectangle() {
        assert_eq!(classify(95.0, 80.0, 96.0), BodyType::Rectangle);
    }

    #[test]
    fn zero_waist_fails_instead_of_dividing() {
        let error = RuleCascadeClassifier::default()
            .classify(&Measurements::new(95.0, 0.0, 96.0))
            .expect_err("zero waist");

        assert!(matches!(
            error,
            DomainError::InvalidMeasurement { dimension: Dimension::Waist, .. }
        ));
    }

    #[test]
    fn custom_rule_sets_are_honoured() {
        let classifier = RuleCascadeClassifier::new(Vec::new(), BodyType::Oval);
        assert_eq!(
            classifier.classify(&Measurements::new(120.0, 80.0, 90.0)).expect("classify"),
            BodyType::Oval
        );
    }
}

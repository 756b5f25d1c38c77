use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::measurement::Dimension;
use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SizeLabel {
    Xs,
    S,
    M,
    L,
    Xl,
    Xxl,
}

impl SizeLabel {
    /// Smallest to largest.
    pub const LADDER: [SizeLabel; 6] =
        [SizeLabel::Xs, SizeLabel::S, SizeLabel::M, SizeLabel::L, SizeLabel::Xl, SizeLabel::Xxl];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Xs => "XS",
            Self::S => "S",
            Self::M => "M",
            Self::L => "L",
            Self::Xl => "XL",
            Self::Xxl => "XXL",
        }
    }

    fn ladder_index(&self) -> usize {
        Self::LADDER.iter().position(|label| label == self).unwrap_or_default()
    }

    pub fn smaller(&self) -> Option<SizeLabel> {
        self.ladder_index().checked_sub(1).map(|index| Self::LADDER[index])
    }

    pub fn larger(&self) -> Option<SizeLabel> {
        Self::LADDER.get(self.ladder_index() + 1).copied()
    }

    /// The sizes directly below and above this one, smaller first.
    pub fn neighbors(&self) -> Vec<SizeLabel> {
        self.smaller().into_iter().chain(self.larger()).collect()
    }
}

impl fmt::Display for SizeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SizeLabel {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::LADDER
            .into_iter()
            .find(|label| label.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| DomainError::UnknownSizeLabel(value.to_string()))
    }
}

/// Neighbouring sizes for a free-form label; unrecognised labels have none.
pub fn alternative_sizes(label: &str) -> Vec<SizeLabel> {
    label.parse::<SizeLabel>().map(|label| label.neighbors()).unwrap_or_default()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitStyle {
    Athletic,
    Regular,
    Slim,
    VerySlim,
    Relaxed,
}

impl FitStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Athletic => "athletic",
            Self::Regular => "regular",
            Self::Slim => "slim",
            Self::VerySlim => "very_slim",
            Self::Relaxed => "relaxed",
        }
    }
}

impl fmt::Display for FitStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed interval `[min, max]` in centimetres.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRange {
    pub min: f64,
    pub max: f64,
}

impl MeasurementRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Relative distance outside the range, zero inside it.
    pub fn relative_error(&self, value: f64) -> f64 {
        if self.contains(value) {
            0.0
        } else if value < self.min {
            (self.min - value) / self.min
        } else {
            (value - self.max) / self.max
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SizeEntry {
    pub label: SizeLabel,
    pub chest: MeasurementRange,
    pub waist: MeasurementRange,
    pub hips: MeasurementRange,
}

impl SizeEntry {
    pub fn range(&self, dimension: Dimension) -> &MeasurementRange {
        match dimension {
            Dimension::Chest => &self.chest,
            Dimension::Waist => &self.waist,
            Dimension::Hips => &self.hips,
        }
    }
}

/// Size rows in declaration order. Matching walks them in this order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SizeChart {
    sizes: Vec<SizeEntry>,
}

impl SizeChart {
    pub fn new(sizes: Vec<SizeEntry>) -> Self {
        Self { sizes }
    }

    pub fn entries(&self) -> &[SizeEntry] {
        &self.sizes
    }

    pub fn get(&self, label: SizeLabel) -> Option<&SizeEntry> {
        self.sizes.iter().find(|entry| entry.label == label)
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub name: String,
    pub runs_small: bool,
    /// Size steps the brand is off by. Advisory only, never used in scoring.
    #[serde(default)]
    pub size_adjustment: i32,
    pub fit_style: FitStyle,
    #[serde(default)]
    pub size_chart: SizeChart,
}

#[cfg(test)]
mod tests {
    use super::{alternative_sizes, MeasurementRange, SizeLabel};

    #[test]
    fn alternatives_omit_missing_edges() {
        assert_eq!(alternative_sizes("XS"), vec![SizeLabel::S]);
        assert_eq!(alternative_sizes("XXL"), vec![SizeLabel::Xl]);
        assert_eq!(alternative_sizes("M"), vec![SizeLabel::S, SizeLabel::L]);
    }

    #[test]
    fn unknown_label_has_no_alternatives() {
        assert!(alternative_sizes("XXXL").is_empty());
        assert!(alternative_sizes("").is_empty());
    }

    #[test]
    fn label_parsing_is_case_insensitive() {
        assert_eq!("xl".parse::<SizeLabel>().expect("parse xl"), SizeLabel::Xl);
        assert_eq!(SizeLabel::Xxl.to_string(), "XXL");
    }

    #[test]
    fn relative_error_is_zero_inside_and_scaled_outside() {
        let range = MeasurementRange::new(90.0, 100.0);

        assert_eq!(range.relative_error(90.0), 0.0);
        assert_eq!(range.relative_error(100.0), 0.0);
        assert!((range.relative_error(81.0) - 0.1).abs() < 1e-12);
        assert!((range.relative_error(110.0) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn size_labels_serialize_uppercase() {
        let encoded = serde_json::to_string(&vec![SizeLabel::Xs, SizeLabel::Xxl]).expect("encode");
        assert_eq!(encoded, r#"["XS","XXL"]"#);
    }
}

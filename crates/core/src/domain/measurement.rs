use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Body dimensions in centimetres.
///
/// Only `chest`, `waist` and `hips` take part in sizing; the rest are carried
/// through unchanged for storage.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    pub chest: f64,
    pub waist: f64,
    pub hips: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shoulders: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inseam: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleeve_length: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Chest,
    Waist,
    Hips,
}

impl Dimension {
    pub const SIZED: [Dimension; 3] = [Dimension::Chest, Dimension::Waist, Dimension::Hips];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chest => "chest",
            Self::Waist => "waist",
            Self::Hips => "hips",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Measurements {
    pub fn new(chest: f64, waist: f64, hips: f64) -> Self {
        Self { chest, waist, hips, ..Self::default() }
    }

    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Chest => self.chest,
            Dimension::Waist => self.waist,
            Dimension::Hips => self.hips,
        }
    }

    /// Rejects values that would make the body-shape ratios meaningless.
    pub fn validate_for_sizing(&self) -> Result<(), DomainError> {
        for dimension in Dimension::SIZED {
            let value = self.get(dimension);
            if !value.is_finite() || value <= 0.0 {
                return Err(DomainError::InvalidMeasurement { dimension, value });
            }
        }
        Ok(())
    }
}

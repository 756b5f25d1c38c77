use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::body_type::BodyType;
use crate::domain::measurement::Measurements;
use crate::domain::profile::MeasurementUnit;
use crate::errors::DomainError;

/// Measurements as kept on the device, stamped with when they were taken.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredMeasurements {
    #[serde(flatten)]
    pub measurements: Measurements,
    #[serde(default)]
    pub unit: MeasurementUnit,
    pub saved_at: DateTime<Utc>,
}

impl StoredMeasurements {
    pub fn new(measurements: Measurements, unit: MeasurementUnit, now: DateTime<Utc>) -> Self {
        Self { measurements, unit, saved_at: now }
    }

    /// Sets a single named field, as used by piecemeal form edits.
    pub fn set_field(
        &mut self,
        field: &str,
        value: f64,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let m = &mut self.measurements;
        match field {
            "chest" => m.chest = value,
            "waist" => m.waist = value,
            "hips" => m.hips = value,
            "height" => m.height = Some(value),
            "weight" => m.weight = Some(value),
            "shoulders" => m.shoulders = Some(value),
            "inseam" => m.inseam = Some(value),
            "sleeve_length" => m.sleeve_length = Some(value),
            other => return Err(DomainError::UnknownMeasurementField(other.to_string())),
        }
        self.saved_at = now;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AvatarData {
    pub mesh_data: serde_json::Value,
    pub skin_tone: String,
    pub hair_style: String,
    pub body_type: Option<BodyType>,
    pub generated_at: DateTime<Utc>,
}

impl AvatarData {
    pub fn new(
        mesh_data: serde_json::Value,
        skin_tone: Option<String>,
        hair_style: Option<String>,
        body_type: Option<BodyType>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            mesh_data,
            skin_tone: skin_tone.unwrap_or_else(|| "default".to_string()),
            hair_style: hair_style.unwrap_or_else(|| "default".to_string()),
            body_type,
            generated_at: now,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanView {
    Front,
    Side,
    Back,
}

impl ScanView {
    pub const ALL: [ScanView; 3] = [ScanView::Front, ScanView::Side, ScanView::Back];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Side => "side",
            Self::Back => "back",
        }
    }
}

impl fmt::Display for ScanView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A camera capture; `image_data` is base64 or a file path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanImage {
    pub image_data: String,
    pub captured_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanImages {
    pub front: Option<ScanImage>,
    pub side: Option<ScanImage>,
    pub back: Option<ScanImage>,
}

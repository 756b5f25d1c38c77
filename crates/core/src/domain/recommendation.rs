use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::body_type::BodyType;
use crate::domain::brand::{FitStyle, MeasurementRange, SizeLabel};
use crate::domain::measurement::{Dimension, Measurements};

/// Garment category. Categories outside the known set keep their text so it
/// survives into size history.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProductType {
    #[default]
    Shirt,
    Pants,
    Jacket,
    Dress,
    Other(String),
}

impl ProductType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Shirt => "shirt",
            Self::Pants => "pants",
            Self::Jacket => "jacket",
            Self::Dress => "dress",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for ProductType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "shirt" => Self::Shirt,
            "pants" => Self::Pants,
            "jacket" => Self::Jacket,
            "dress" => Self::Dress,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for ProductType {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<ProductType> for String {
    fn from(value: ProductType) -> Self {
        match value {
            ProductType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inbound recommendation request. Fields are optional so that a caller
/// forwarding untrusted input gets a "missing parameters" error back instead
/// of a decode failure.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub measurements: Option<Measurements>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub product_type: ProductType,
}

impl RecommendationRequest {
    pub fn new(measurements: Measurements, brand: impl Into<String>) -> Self {
        Self {
            measurements: Some(measurements),
            brand: Some(brand.into()),
            product_type: ProductType::default(),
        }
    }

    pub fn with_product_type(mut self, product_type: ProductType) -> Self {
        self.product_type = product_type;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SizeMatch {
    pub size: Option<SizeLabel>,
    pub confidence: Option<u8>,
    pub total_error: Option<f64>,
}

impl SizeMatch {
    pub const NONE: SizeMatch = SizeMatch { size: None, confidence: None, total_error: None };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitDescriptor {
    #[serde(rename = "Loose fit")]
    Loose,
    #[serde(rename = "Snug fit")]
    Snug,
    #[serde(rename = "Perfect fit")]
    Perfect,
    #[serde(rename = "Good fit")]
    Good,
}

impl FitDescriptor {
    /// Tolerance around the range midpoint that still reads as a perfect fit.
    pub const PERFECT_BAND_CM: f64 = 2.0;

    pub fn describe(value: f64, range: &MeasurementRange) -> Self {
        if value < range.min {
            Self::Loose
        } else if value > range.max {
            Self::Snug
        } else if (value - range.midpoint()).abs() < Self::PERFECT_BAND_CM {
            Self::Perfect
        } else {
            Self::Good
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loose => "Loose fit",
            Self::Snug => "Snug fit",
            Self::Perfect => "Perfect fit",
            Self::Good => "Good fit",
        }
    }
}

impl fmt::Display for FitDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type FitPrediction = BTreeMap<Dimension, FitDescriptor>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub brand: String,
    pub product_type: ProductType,
    pub recommended_size: Option<SizeLabel>,
    pub confidence: Option<u8>,
    pub body_type: BodyType,
    pub body_type_description: String,
    pub brand_fit_style: FitStyle,
    pub advice: Vec<String>,
    pub alternative_sizes: Vec<SizeLabel>,
    pub fit_prediction: FitPrediction,
}

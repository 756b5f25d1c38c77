//! Brand size charts and body-type profiles.
//!
//! The tables are fixed at construction. The built-in set covers the brands
//! the app ships with; an alternate set can be read from a TOML file with the
//! same shape (see `ReferenceData::from_toml_str`).

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::body_type::{BodyType, BodyTypeProfile, StyleRecommendations};
use crate::domain::brand::{Brand, FitStyle, MeasurementRange, SizeChart, SizeEntry, SizeLabel};
use crate::domain::measurement::Dimension;

#[derive(Debug, Error)]
pub enum ReferenceDataError {
    #[error("could not read reference data file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse reference data: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("duplicate brand `{0}`")]
    DuplicateBrand(String),
    #[error("brand `{brand}` declares size {label} more than once")]
    DuplicateSize { brand: String, label: SizeLabel },
    #[error("brand `{brand}` size {label} has an invalid {dimension} range {min}-{max}")]
    InvalidRange { brand: String, label: SizeLabel, dimension: Dimension, min: f64, max: f64 },
    #[error("no profile defined for body type `{0}`")]
    MissingBodyType(BodyType),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    brands: Vec<Brand>,
    #[serde(default = "standard_body_types")]
    body_types: Vec<BodyTypeProfile>,
}

impl ReferenceData {
    pub fn new(
        brands: Vec<Brand>,
        body_types: Vec<BodyTypeProfile>,
    ) -> Result<Self, ReferenceDataError> {
        let data = Self { brands, body_types };
        data.validate()?;
        Ok(data)
    }

    pub fn standard() -> Self {
        Self { brands: standard_brands(), body_types: standard_body_types() }
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ReferenceDataError> {
        let data: Self = toml::from_str(raw)?;
        data.validate()?;
        Ok(data)
    }

    pub fn from_path(path: &Path) -> Result<Self, ReferenceDataError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| ReferenceDataError::ReadFile { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&raw)
    }

    pub fn brands(&self) -> &[Brand] {
        &self.brands
    }

    /// Exact, case-sensitive lookup.
    pub fn brand(&self, name: &str) -> Option<&Brand> {
        self.brands.iter().find(|brand| brand.name == name)
    }

    pub fn brand_names(&self) -> Vec<&str> {
        self.brands.iter().map(|brand| brand.name.as_str()).collect()
    }

    pub fn body_types(&self) -> &[BodyTypeProfile] {
        &self.body_types
    }

    pub fn body_type(&self, body_type: BodyType) -> Option<&BodyTypeProfile> {
        self.body_types.iter().find(|profile| profile.body_type == body_type)
    }

    pub fn validate(&self) -> Result<(), ReferenceDataError> {
        let mut names = HashSet::new();
        for brand in &self.brands {
            if !names.insert(brand.name.as_str()) {
                return Err(ReferenceDataError::DuplicateBrand(brand.name.clone()));
            }
            validate_chart(brand)?;
        }

        for body_type in
            [BodyType::Athletic, BodyType::Rectangle, BodyType::Triangle, BodyType::Oval]
        {
            if self.body_type(body_type).is_none() {
                return Err(ReferenceDataError::MissingBodyType(body_type));
            }
        }

        Ok(())
    }
}

fn validate_chart(brand: &Brand) -> Result<(), ReferenceDataError> {
    let mut labels = HashSet::new();
    for entry in brand.size_chart.entries() {
        if !labels.insert(entry.label) {
            return Err(ReferenceDataError::DuplicateSize {
                brand: brand.name.clone(),
                label: entry.label,
            });
        }

        for dimension in Dimension::SIZED {
            let range = entry.range(dimension);
            if !(range.min > 0.0 && range.min <= range.max) {
                return Err(ReferenceDataError::InvalidRange {
                    brand: brand.name.clone(),
                    label: entry.label,
                    dimension,
                    min: range.min,
                    max: range.max,
                });
            }
        }
    }
    Ok(())
}

type Row = (SizeLabel, (f64, f64), (f64, f64), (f64, f64));

fn chart(rows: &[Row]) -> SizeChart {
    SizeChart::new(
        rows.iter()
            .map(|(label, chest, waist, hips)| SizeEntry {
                label: *label,
                chest: MeasurementRange::new(chest.0, chest.1),
                waist: MeasurementRange::new(waist.0, waist.1),
                hips: MeasurementRange::new(hips.0, hips.1),
            })
            .collect(),
    )
}

fn brand(
    name: &str,
    runs_small: bool,
    size_adjustment: i32,
    fit_style: FitStyle,
    rows: &[Row],
) -> Brand {
    Brand {
        name: name.to_string(),
        runs_small,
        size_adjustment,
        fit_style,
        size_chart: chart(rows),
    }
}

fn standard_brands() -> Vec<Brand> {
    use SizeLabel::{Xl, L, M, S};

    vec![
        brand(
            "Nike",
            true,
            1,
            FitStyle::Athletic,
            &[
                (S, (86.0, 91.0), (71.0, 76.0), (86.0, 91.0)),
                (M, (91.0, 97.0), (76.0, 81.0), (91.0, 97.0)),
                (L, (97.0, 104.0), (81.0, 89.0), (97.0, 104.0)),
                (Xl, (104.0, 114.0), (89.0, 99.0), (104.0, 114.0)),
            ],
        ),
        brand(
            "Adidas",
            false,
            0,
            FitStyle::Regular,
            &[
                (S, (88.0, 93.0), (73.0, 78.0), (88.0, 93.0)),
                (M, (93.0, 99.0), (78.0, 84.0), (93.0, 99.0)),
                (L, (99.0, 106.0), (84.0, 92.0), (99.0, 106.0)),
                (Xl, (106.0, 116.0), (92.0, 102.0), (106.0, 116.0)),
            ],
        ),
        brand(
            "H&M",
            true,
            1,
            FitStyle::Slim,
            &[
                (S, (84.0, 89.0), (70.0, 75.0), (88.0, 93.0)),
                (M, (89.0, 94.0), (75.0, 80.0), (93.0, 98.0)),
                (L, (94.0, 101.0), (80.0, 87.0), (98.0, 105.0)),
                (Xl, (101.0, 110.0), (87.0, 96.0), (105.0, 114.0)),
            ],
        ),
        brand(
            "Zara",
            true,
            2,
            FitStyle::VerySlim,
            &[
                (S, (82.0, 87.0), (68.0, 73.0), (86.0, 91.0)),
                (M, (87.0, 92.0), (73.0, 78.0), (91.0, 96.0)),
                (L, (92.0, 99.0), (78.0, 85.0), (96.0, 103.0)),
                (Xl, (99.0, 108.0), (85.0, 94.0), (103.0, 112.0)),
            ],
        ),
        brand(
            "Levi's",
            false,
            0,
            FitStyle::Relaxed,
            &[
                (S, (89.0, 94.0), (74.0, 79.0), (89.0, 94.0)),
                (M, (94.0, 102.0), (79.0, 87.0), (94.0, 102.0)),
                (L, (102.0, 112.0), (87.0, 97.0), (102.0, 112.0)),
                (Xl, (112.0, 122.0), (97.0, 107.0), (112.0, 122.0)),
            ],
        ),
        brand(
            "Uniqlo",
            false,
            0,
            FitStyle::Regular,
            &[
                (S, (88.0, 94.0), (76.0, 82.0), (91.0, 97.0)),
                (M, (94.0, 100.0), (82.0, 88.0), (97.0, 103.0)),
                (L, (100.0, 108.0), (88.0, 96.0), (103.0, 111.0)),
                (Xl, (108.0, 118.0), (96.0, 106.0), (111.0, 121.0)),
            ],
        ),
    ]
}

fn profile(
    body_type: BodyType,
    description: &str,
    avoid: &[FitStyle],
    prefer: &[FitStyle],
) -> BodyTypeProfile {
    BodyTypeProfile {
        body_type,
        description: description.to_string(),
        recommendations: StyleRecommendations { avoid: avoid.to_vec(), prefer: prefer.to_vec() },
    }
}

fn standard_body_types() -> Vec<BodyTypeProfile> {
    use FitStyle::{Athletic, Regular, Relaxed, Slim, VerySlim};

    vec![
        profile(
            BodyType::Athletic,
            "Broad shoulders, defined chest, narrow waist",
            &[VerySlim],
            &[Athletic, Regular],
        ),
        profile(BodyType::Rectangle, "Similar measurements throughout", &[], &[Regular, Relaxed]),
        profile(BodyType::Triangle, "Wider hips than chest", &[Slim, VerySlim], &[Regular, Relaxed]),
        profile(BodyType::Oval, "Fuller midsection", &[Slim, VerySlim], &[Relaxed, Regular]),
    ]
}

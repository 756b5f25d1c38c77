use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::brand::FitStyle;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyType {
    Athletic,
    Rectangle,
    Triangle,
    Oval,
}

impl BodyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Athletic => "athletic",
            Self::Rectangle => "rectangle",
            Self::Triangle => "triangle",
            Self::Oval => "oval",
        }
    }
}

impl fmt::Display for BodyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRecommendations {
    #[serde(default)]
    pub avoid: Vec<FitStyle>,
    #[serde(default)]
    pub prefer: Vec<FitStyle>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyTypeProfile {
    pub body_type: BodyType,
    pub description: String,
    pub recommendations: StyleRecommendations,
}

impl BodyTypeProfile {
    pub fn avoids(&self, style: FitStyle) -> bool {
        self.recommendations.avoid.contains(&style)
    }
}

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::body_type::BodyType;
use crate::domain::brand::SizeLabel;
use crate::domain::recommendation::{ProductType, Recommendation};

/// Entries are kept newest-first and capped at this many by default.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SizeHistoryEntry {
    pub brand: String,
    pub product_type: ProductType,
    pub recommended_size: Option<SizeLabel>,
    pub confidence: Option<u8>,
    pub body_type: BodyType,
    pub saved_at: DateTime<Utc>,
}

impl SizeHistoryEntry {
    pub fn from_recommendation(recommendation: &Recommendation, now: DateTime<Utc>) -> Self {
        Self {
            brand: recommendation.brand.clone(),
            product_type: recommendation.product_type.clone(),
            recommended_size: recommendation.recommended_size,
            confidence: recommendation.confidence,
            body_type: recommendation.body_type,
            saved_at: now,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFavorite {
    pub id: Option<String>,
    pub brand: String,
    pub product: String,
    pub size: Option<String>,
    pub price: Option<Decimal>,
    pub image_url: Option<String>,
    pub url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: String,
    pub brand: String,
    pub product: String,
    pub size: Option<String>,
    pub price: Option<Decimal>,
    pub image_url: Option<String>,
    pub url: Option<String>,
    pub saved_at: DateTime<Utc>,
}

impl Favorite {
    pub fn from_new(item: NewFavorite, now: DateTime<Utc>) -> Self {
        Self {
            id: item.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            brand: item.brand,
            product: item.product,
            size: item.size,
            price: item.price,
            image_url: item.image_url,
            url: item.url,
            saved_at: now,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NewOutfit {
    pub id: Option<String>,
    pub name: String,
    pub items: Vec<serde_json::Value>,
    pub total_cost: Option<Decimal>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Outfit {
    pub id: String,
    pub name: String,
    pub items: Vec<serde_json::Value>,
    pub total_cost: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

impl Outfit {
    pub fn from_new(outfit: NewOutfit, now: DateTime<Utc>) -> Self {
        Self {
            id: outfit.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: outfit.name,
            items: outfit.items,
            total_cost: outfit.total_cost,
            created_at: now,
        }
    }
}

/// Prepends `entry` and drops whatever falls past `limit`.
pub fn push_newest_first<T>(list: &mut Vec<T>, entry: T, limit: Option<usize>) {
    list.insert(0, entry);
    if let Some(limit) = limit {
        list.truncate(limit);
    }
}

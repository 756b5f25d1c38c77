use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields to merge onto the stored profile; `None` keeps the current value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UserProfile {
    pub fn new(name: Option<String>, email: Option<String>, now: DateTime<Utc>) -> Self {
        Self { name, email, created_at: now, updated_at: now }
    }

    pub fn merged(mut self, update: ProfileUpdate, now: DateTime<Utc>) -> Self {
        if let Some(name) = update.name {
            self.name = Some(name);
        }
        if let Some(email) = update.email {
            self.email = Some(email);
        }
        self.updated_at = now;
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementUnit {
    #[default]
    Cm,
    In,
}

/// Missing fields in a stored record fall back to the defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub measurement_unit: MeasurementUnit,
    pub currency: String,
    pub notifications: bool,
    pub dark_mode: bool,
    pub language: String,
    pub privacy_mode: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            measurement_unit: MeasurementUnit::Cm,
            currency: "USD".to_string(),
            notifications: true,
            dark_mode: false,
            language: "en".to_string(),
            privacy_mode: true,
            updated_at: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionPlan {
    #[default]
    Free,
    Student,
    Pro,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub plan: SubscriptionPlan,
    pub expires_at: Option<DateTime<Utc>>,
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl Subscription {
    pub fn is_premium(&self) -> bool {
        matches!(self.plan, SubscriptionPlan::Student | SubscriptionPlan::Pro)
    }
}

impl Default for Subscription {
    fn default() -> Self {
        Self {
            plan: SubscriptionPlan::Free,
            expires_at: None,
            features: vec!["basic_avatar".to_string(), "basic_recommendations".to_string()],
            saved_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::{
        MeasurementUnit, Preferences, ProfileUpdate, Subscription, SubscriptionPlan, UserProfile,
    };

    #[test]
    fn merge_keeps_untouched_fields_and_creation_time() {
        let created = Utc::now() - Duration::days(3);
        let profile =
            UserProfile::new(Some("Ada".to_string()), Some("ada@example.com".to_string()), created);

        let now = Utc::now();
        let merged = profile.merged(
            ProfileUpdate { email: Some("ada@fit.example".to_string()), ..ProfileUpdate::default() },
            now,
        );

        assert_eq!(merged.name.as_deref(), Some("Ada"));
        assert_eq!(merged.email.as_deref(), Some("ada@fit.example"));
        assert_eq!(merged.created_at, created);
        assert_eq!(merged.updated_at, now);
    }

    #[test]
    fn only_paid_plans_are_premium() {
        assert!(!Subscription::default().is_premium());
        for plan in [SubscriptionPlan::Student, SubscriptionPlan::Pro] {
            assert!(Subscription { plan, ..Subscription::default() }.is_premium());
        }
    }

    #[test]
    fn partial_preferences_fill_in_defaults() {
        let prefs: Preferences =
            serde_json::from_str(r#"{"dark_mode":true,"measurement_unit":"in"}"#).expect("parse");

        assert!(prefs.dark_mode);
        assert_eq!(prefs.measurement_unit, MeasurementUnit::In);
        assert_eq!(prefs.currency, "USD");
        assert!(prefs.notifications);
        assert!(prefs.privacy_mode);
    }
}

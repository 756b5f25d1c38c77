use chrono::{DateTime, Utc};
use fitsize_core::domain::body_scan::{
    AvatarData, ScanImage, ScanImages, ScanView, StoredMeasurements,
};
use fitsize_core::domain::profile::{
    MeasurementUnit, Preferences, ProfileUpdate, Subscription, UserProfile,
};
use fitsize_core::domain::wardrobe::{
    push_newest_first, Favorite, NewFavorite, NewOutfit, Outfit, SizeHistoryEntry,
    DEFAULT_HISTORY_LIMIT,
};
use fitsize_core::{Measurements, Recommendation};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::storage::{DeviceStorage, StorageError, StorageOutcome};

pub const USER_PROFILE_KEY: &str = "user_profile";
pub const MEASUREMENTS_KEY: &str = "measurements";
pub const AVATAR_KEY: &str = "avatar";
pub const SIZE_HISTORY_KEY: &str = "size_history";
pub const FAVORITES_KEY: &str = "favorites";
pub const OUTFITS_KEY: &str = "outfits";
pub const PREFERENCES_KEY: &str = "preferences";
pub const SUBSCRIPTION_KEY: &str = "subscription";

pub fn scan_key(view: ScanView) -> String {
    format!("scan_{}", view.as_str())
}

/// Everything the store holds for one user, as a single document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserDataExport {
    #[serde(default)]
    pub profile: Option<UserProfile>,
    #[serde(default)]
    pub measurements: Option<StoredMeasurements>,
    #[serde(default)]
    pub avatar: Option<AvatarData>,
    #[serde(default)]
    pub history: Vec<SizeHistoryEntry>,
    #[serde(default)]
    pub favorites: Vec<Favorite>,
    #[serde(default)]
    pub outfits: Vec<Outfit>,
    #[serde(default)]
    pub preferences: Preferences,
    #[serde(default)]
    pub subscription: Subscription,
    pub exported_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StorageInfo {
    pub total_items: usize,
    pub size_bytes: usize,
    pub size_kb: String,
    pub size_mb: String,
    pub last_updated: DateTime<Utc>,
}

/// Typed user records layered over [`DeviceStorage`].
#[derive(Clone)]
pub struct UserDataStore {
    storage: DeviceStorage,
    history_limit: usize,
}

impl UserDataStore {
    pub fn new(storage: DeviceStorage) -> Self {
        Self::with_history_limit(storage, DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_history_limit(storage: DeviceStorage, history_limit: usize) -> Self {
        Self { storage, history_limit: history_limit.max(1) }
    }

    pub fn storage(&self) -> &DeviceStorage {
        &self.storage
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    /// Current value of `key` for a read-modify-write. A stored value that no
    /// longer decodes is reported as a failed outcome so it is never overwritten.
    async fn load_for_update<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<T>, StorageOutcome> {
        self.storage.try_load(key).await.map_err(|err| {
            error!(
                event_name = "storage.update.unreadable",
                key,
                error = %err,
                "stored value unreadable; update skipped"
            );
            StorageOutcome::failure(format!("stored `{key}` could not be read: {err}"))
        })
    }

    // profile

    pub async fn create_user_profile(
        &self,
        name: Option<String>,
        email: Option<String>,
    ) -> StorageOutcome {
        self.save_user_profile(UserProfile::new(name, email, Utc::now())).await
    }

    /// Stores the profile wholesale, keeping its `created_at` and refreshing `updated_at`.
    pub async fn save_user_profile(&self, mut profile: UserProfile) -> StorageOutcome {
        profile.updated_at = Utc::now();
        self.storage.save(USER_PROFILE_KEY, &profile).await
    }

    pub async fn user_profile(&self) -> Option<UserProfile> {
        self.storage.load(USER_PROFILE_KEY).await
    }

    pub async fn update_user_profile(&self, update: ProfileUpdate) -> StorageOutcome {
        let now = Utc::now();
        let current = match self.load_for_update::<UserProfile>(USER_PROFILE_KEY).await {
            Ok(current) => current.unwrap_or_else(|| UserProfile::new(None, None, now)),
            Err(outcome) => return outcome,
        };
        self.storage.save(USER_PROFILE_KEY, &current.merged(update, now)).await
    }

    // measurements

    pub async fn save_measurements(
        &self,
        measurements: Measurements,
        unit: Option<MeasurementUnit>,
    ) -> StorageOutcome {
        let record = StoredMeasurements::new(measurements, unit.unwrap_or_default(), Utc::now());
        self.storage.save(MEASUREMENTS_KEY, &record).await
    }

    pub async fn measurements(&self) -> Option<StoredMeasurements> {
        self.storage.load(MEASUREMENTS_KEY).await
    }

    pub async fn update_measurement(&self, field: &str, value: f64) -> StorageOutcome {
        let Some(mut current) = self.measurements().await else {
            return StorageOutcome::failure("no measurements saved");
        };
        if let Err(err) = current.set_field(field, value, Utc::now()) {
            warn!(
                event_name = "storage.measurement.rejected",
                field,
                error = %err,
                "measurement update rejected"
            );
            return StorageOutcome::failure(err.to_string());
        }
        self.storage.save(MEASUREMENTS_KEY, &current).await
    }

    // avatar and scans

    pub async fn save_avatar(&self, avatar: &AvatarData) -> StorageOutcome {
        self.storage.save(AVATAR_KEY, avatar).await
    }

    pub async fn avatar(&self) -> Option<AvatarData> {
        self.storage.load(AVATAR_KEY).await
    }

    pub async fn save_scan_image(
        &self,
        view: ScanView,
        image_data: impl Into<String>,
    ) -> StorageOutcome {
        let image = ScanImage { image_data: image_data.into(), captured_at: Utc::now() };
        self.storage.save(&scan_key(view), &image).await
    }

    pub async fn scan_image(&self, view: ScanView) -> Option<ScanImage> {
        self.storage.load(&scan_key(view)).await
    }

    pub async fn scan_images(&self) -> ScanImages {
        let (front, side, back) = tokio::join!(
            self.scan_image(ScanView::Front),
            self.scan_image(ScanView::Side),
            self.scan_image(ScanView::Back),
        );
        ScanImages { front, side, back }
    }

    // size history

    /// Prepends a history entry for `recommendation`, dropping the oldest past the limit.
    pub async fn record_recommendation(&self, recommendation: &Recommendation) -> StorageOutcome {
        let mut history: Vec<SizeHistoryEntry> =
            match self.load_for_update(SIZE_HISTORY_KEY).await {
                Ok(history) => history.unwrap_or_default(),
                Err(outcome) => return outcome,
            };
        let entry = SizeHistoryEntry::from_recommendation(recommendation, Utc::now());
        push_newest_first(&mut history, entry, Some(self.history_limit));
        debug!(
            event_name = "storage.history.recorded",
            brand = %recommendation.brand,
            entries = history.len(),
            "size recommendation recorded"
        );
        self.storage.save(SIZE_HISTORY_KEY, &history).await
    }

    pub async fn size_history(&self) -> Vec<SizeHistoryEntry> {
        self.storage.load(SIZE_HISTORY_KEY).await.unwrap_or_default()
    }

    pub async fn clear_size_history(&self) -> StorageOutcome {
        self.storage.delete(SIZE_HISTORY_KEY).await
    }

    // favorites

    pub async fn save_favorite(&self, item: NewFavorite) -> StorageOutcome {
        let mut favorites: Vec<Favorite> = match self.load_for_update(FAVORITES_KEY).await {
            Ok(favorites) => favorites.unwrap_or_default(),
            Err(outcome) => return outcome,
        };
        push_newest_first(&mut favorites, Favorite::from_new(item, Utc::now()), None);
        self.storage.save(FAVORITES_KEY, &favorites).await
    }

    pub async fn favorites(&self) -> Vec<Favorite> {
        self.storage.load(FAVORITES_KEY).await.unwrap_or_default()
    }

    pub async fn remove_favorite(&self, id: &str) -> StorageOutcome {
        let mut favorites: Vec<Favorite> = match self.load_for_update(FAVORITES_KEY).await {
            Ok(favorites) => favorites.unwrap_or_default(),
            Err(outcome) => return outcome,
        };
        favorites.retain(|favorite| favorite.id != id);
        self.storage.save(FAVORITES_KEY, &favorites).await
    }

    // outfits

    pub async fn save_outfit(&self, outfit: NewOutfit) -> StorageOutcome {
        let mut outfits: Vec<Outfit> = match self.load_for_update(OUTFITS_KEY).await {
            Ok(outfits) => outfits.unwrap_or_default(),
            Err(outcome) => return outcome,
        };
        push_newest_first(&mut outfits, Outfit::from_new(outfit, Utc::now()), None);
        self.storage.save(OUTFITS_KEY, &outfits).await
    }

    pub async fn outfits(&self) -> Vec<Outfit> {
        self.storage.load(OUTFITS_KEY).await.unwrap_or_default()
    }

    pub async fn delete_outfit(&self, id: &str) -> StorageOutcome {
        let mut outfits: Vec<Outfit> = match self.load_for_update(OUTFITS_KEY).await {
            Ok(outfits) => outfits.unwrap_or_default(),
            Err(outcome) => return outcome,
        };
        outfits.retain(|outfit| outfit.id != id);
        self.storage.save(OUTFITS_KEY, &outfits).await
    }

    // preferences and subscription

    pub async fn save_preferences(&self, mut preferences: Preferences) -> StorageOutcome {
        preferences.updated_at = Some(Utc::now());
        self.storage.save(PREFERENCES_KEY, &preferences).await
    }

    pub async fn preferences(&self) -> Preferences {
        self.storage.load(PREFERENCES_KEY).await.unwrap_or_default()
    }

    pub async fn save_subscription(&self, mut subscription: Subscription) -> StorageOutcome {
        subscription.saved_at = Some(Utc::now());
        self.storage.save(SUBSCRIPTION_KEY, &subscription).await
    }

    pub async fn subscription(&self) -> Subscription {
        self.storage.load(SUBSCRIPTION_KEY).await.unwrap_or_default()
    }

    pub async fn is_premium(&self) -> bool {
        self.subscription().await.is_premium()
    }

    // export / import

    pub async fn export_all(&self) -> UserDataExport {
        let (profile, measurements, avatar, history, favorites, outfits, preferences, subscription) =
            tokio::join!(
                self.user_profile(),
                self.measurements(),
                self.avatar(),
                self.size_history(),
                self.favorites(),
                self.outfits(),
                self.preferences(),
                self.subscription(),
            );
        UserDataExport {
            profile,
            measurements,
            avatar,
            history,
            favorites,
            outfits,
            preferences,
            subscription,
            exported_at: Utc::now(),
        }
    }

    /// Writes every record in `data`; succeeds only if every write succeeded.
    pub async fn import_all(&self, data: UserDataExport) -> StorageOutcome {
        let UserDataExport {
            profile,
            measurements,
            avatar,
            mut history,
            favorites,
            outfits,
            preferences,
            subscription,
            ..
        } = data;
        history.truncate(self.history_limit);

        let mut outcomes = Vec::with_capacity(8);
        if let Some(profile) = profile {
            outcomes.push(self.save_user_profile(profile).await);
        }
        if let Some(measurements) = measurements {
            outcomes.push(self.storage.save(MEASUREMENTS_KEY, &measurements).await);
        }
        if let Some(avatar) = avatar {
            outcomes.push(self.save_avatar(&avatar).await);
        }
        let (history, favorites, outfits, preferences, subscription) = tokio::join!(
            self.storage.save(SIZE_HISTORY_KEY, &history),
            self.storage.save(FAVORITES_KEY, &favorites),
            self.storage.save(OUTFITS_KEY, &outfits),
            self.save_preferences(preferences),
            self.save_subscription(subscription),
        );
        outcomes.extend([history, favorites, outfits, preferences, subscription]);

        match outcomes.into_iter().find(|outcome| !outcome.success) {
            None => StorageOutcome::ok(),
            Some(failed) => StorageOutcome {
                success: false,
                error: failed.error.or_else(|| Some("import failed".to_string())),
            },
        }
    }

    /// Item count under the namespace plus the serialized size of a full export.
    pub async fn storage_info(&self) -> Result<StorageInfo, StorageError> {
        let total_items = self.storage.keys().await?.len();
        let export = self.export_all().await;
        let size_bytes = serde_json::to_string(&export)?.len();
        let last_updated =
            export.profile.as_ref().map(|profile| profile.updated_at).unwrap_or(export.exported_at);

        Ok(StorageInfo {
            total_items,
            size_bytes,
            size_kb: format!("{:.2}", size_bytes as f64 / 1024.0),
            size_mb: format!("{:.2}", size_bytes as f64 / 1024.0 / 1024.0),
            last_updated,
        })
    }
}

#[cfg(test)]
mod tests {
    use fitsize_core::domain::body_scan::{AvatarData, ScanView};
    use fitsize_core::domain::profile::{
        MeasurementUnit, Preferences, ProfileUpdate, Subscription, SubscriptionPlan,
    };
    use fitsize_core::domain::wardrobe::{NewFavorite, NewOutfit};
    use fitsize_core::{
        BodyType, Measurements, RecommendationEngine, RecommendationRequest, SizeLabel,
    };
    use rust_decimal::Decimal;

    use super::{UserDataStore, FAVORITES_KEY, OUTFITS_KEY, SIZE_HISTORY_KEY};
    use crate::storage::DeviceStorage;

    fn store() -> UserDataStore {
        UserDataStore::new(DeviceStorage::in_memory())
    }

    #[tokio::test]
    async fn profile_update_merges_and_keeps_created_at() {
        let store = store();
        assert!(store.create_user_profile(Some("Ada".to_string()), None).await.success);
        let created = store.user_profile().await.expect("profile").created_at;

        let outcome = store
            .update_user_profile(ProfileUpdate {
                email: Some("ada@example.com".to_string()),
                ..ProfileUpdate::default()
            })
            .await;
        assert!(outcome.success);

        let profile = store.user_profile().await.expect("profile");
        assert_eq!(profile.name.as_deref(), Some("Ada"));
        assert_eq!(profile.email.as_deref(), Some("ada@example.com"));
        assert_eq!(profile.created_at, created);
        assert!(profile.updated_at >= created);
    }

    #[tokio::test]
    async fn update_without_profile_creates_one() {
        let store = store();
        store
            .update_user_profile(ProfileUpdate {
                name: Some("Grace".to_string()),
                ..ProfileUpdate::default()
            })
            .await;

        assert_eq!(store.user_profile().await.expect("profile").name.as_deref(), Some("Grace"));
    }

    #[tokio::test]
    async fn measurements_default_to_cm_and_accept_field_updates() {
        let store = store();
        store.save_measurements(Measurements::new(95.0, 80.0, 96.0), None).await;

        let saved = store.measurements().await.expect("measurements");
        assert_eq!(saved.unit, MeasurementUnit::Cm);

        assert!(store.update_measurement("waist", 82.0).await.success);
        assert!(store.update_measurement("height", 180.0).await.success);
        let updated = store.measurements().await.expect("measurements");
        assert_eq!(updated.measurements.waist, 82.0);
        assert_eq!(updated.measurements.height, Some(180.0));
        assert_eq!(updated.measurements.chest, 95.0);
    }

    #[tokio::test]
    async fn measurement_update_rejects_unknown_field_and_missing_record() {
        let store = store();
        assert!(!store.update_measurement("chest", 90.0).await.success);

        store.save_measurements(Measurements::new(95.0, 80.0, 96.0), Some(MeasurementUnit::In)).await;
        let outcome = store.update_measurement("neck", 40.0).await;
        assert!(!outcome.success);
        assert!(outcome.error.expect("error").contains("neck"));
    }

    #[tokio::test]
    async fn avatar_and_scan_images_round_trip() {
        let store = store();
        let avatar = AvatarData::new(
            serde_json::json!({"vertices": 1024}),
            None,
            Some("curly".to_string()),
            Some(BodyType::Athletic),
            chrono::Utc::now(),
        );
        store.save_avatar(&avatar).await;
        store.save_scan_image(ScanView::Front, "data:image/png;base64,AAAA").await;
        store.save_scan_image(ScanView::Back, "/tmp/back.png").await;

        let loaded = store.avatar().await.expect("avatar");
        assert_eq!(loaded.skin_tone, "default");
        assert_eq!(loaded.hair_style, "curly");

        let scans = store.scan_images().await;
        assert_eq!(scans.front.expect("front").image_data, "data:image/png;base64,AAAA");
        assert!(scans.side.is_none());
        assert_eq!(scans.back.expect("back").image_data, "/tmp/back.png");
        assert!(store.scan_image(ScanView::Side).await.is_none());
    }

    #[tokio::test]
    async fn history_is_newest_first_and_capped() {
        let store = UserDataStore::with_history_limit(DeviceStorage::in_memory(), 3);
        let engine = RecommendationEngine::default();

        for brand in ["Nike", "Adidas", "Zara", "Uniqlo"] {
            let recommendation = engine
                .recommend(&RecommendationRequest::new(Measurements::new(95.0, 80.0, 96.0), brand))
                .expect("recommendation");
            assert!(store.record_recommendation(&recommendation).await.success);
        }

        let history = store.size_history().await;
        let brands: Vec<_> = history.iter().map(|entry| entry.brand.as_str()).collect();
        assert_eq!(brands, vec!["Uniqlo", "Zara", "Adidas"]);
        assert_eq!(history[1].recommended_size, Some(SizeLabel::L));

        assert!(store.clear_size_history().await.success);
        assert!(store.size_history().await.is_empty());
        assert!(store.storage().load::<serde_json::Value>(SIZE_HISTORY_KEY).await.is_none());
    }

    #[tokio::test]
    async fn favorites_generate_ids_and_can_be_removed() {
        let store = store();
        store
            .save_favorite(NewFavorite {
                id: Some("fav-1".to_string()),
                brand: "Nike".to_string(),
                product: "Running tee".to_string(),
                size: Some("M".to_string()),
                price: Some(Decimal::new(2999, 2)),
                ..NewFavorite::default()
            })
            .await;
        store
            .save_favorite(NewFavorite {
                brand: "Zara".to_string(),
                product: "Blazer".to_string(),
                ..NewFavorite::default()
            })
            .await;

        let favorites = store.favorites().await;
        assert_eq!(favorites.len(), 2);
        assert_eq!(favorites[0].brand, "Zara");
        assert!(!favorites[0].id.is_empty());
        assert_eq!(favorites[1].price, Some(Decimal::new(2999, 2)));

        assert!(store.remove_favorite("fav-1").await.success);
        let remaining = store.favorites().await;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].brand, "Zara");
    }

    #[tokio::test]
    async fn outfits_are_prepended_and_deletable() {
        let store = store();
        store
            .save_outfit(NewOutfit {
                id: Some("o-1".to_string()),
                name: "Office".to_string(),
                items: vec![serde_json::json!({"product": "Blazer"})],
                total_cost: Some(Decimal::new(12000, 2)),
            })
            .await;
        store.save_outfit(NewOutfit { name: "Gym".to_string(), ..NewOutfit::default() }).await;

        let names: Vec<_> = store.outfits().await.into_iter().map(|outfit| outfit.name).collect();
        assert_eq!(names, vec!["Gym", "Office"]);

        assert!(store.delete_outfit("o-1").await.success);
        assert_eq!(store.outfits().await.len(), 1);
    }

    #[tokio::test]
    async fn preferences_and_subscription_fall_back_to_defaults() {
        let store = store();
        assert_eq!(store.preferences().await, Preferences::default());
        assert_eq!(store.subscription().await, Subscription::default());
        assert!(!store.is_premium().await);

        store
            .save_preferences(Preferences { dark_mode: true, ..Preferences::default() })
            .await;
        store
            .save_subscription(Subscription { plan: SubscriptionPlan::Student, ..Subscription::default() })
            .await;

        let preferences = store.preferences().await;
        assert!(preferences.dark_mode);
        assert!(preferences.updated_at.is_some());
        assert!(store.is_premium().await);
    }

    #[tokio::test]
    async fn export_then_import_into_fresh_store() {
        let source = store();
        source.create_user_profile(Some("Ada".to_string()), None).await;
        source.save_measurements(Measurements::new(95.0, 80.0, 96.0), None).await;
        source
            .save_favorite(NewFavorite {
                id: Some("fav-1".to_string()),
                brand: "Nike".to_string(),
                product: "Tee".to_string(),
                ..NewFavorite::default()
            })
            .await;

        let export = source.export_all().await;
        assert!(export.avatar.is_none());
        assert_eq!(export.favorites.len(), 1);

        let target = store();
        assert!(target.import_all(export.clone()).await.success);
        assert_eq!(target.user_profile().await.expect("profile").name.as_deref(), Some("Ada"));
        assert_eq!(target.measurements().await, export.measurements);
        assert_eq!(target.favorites().await, export.favorites);
        assert!(target.avatar().await.is_none());
    }

    #[tokio::test]
    async fn storage_info_counts_namespaced_items() {
        let store = store();
        store.create_user_profile(Some("Ada".to_string()), None).await;
        store.save_preferences(Preferences::default()).await;

        let info = store.storage_info().await.expect("info");
        assert_eq!(info.total_items, 2);
        assert!(info.size_bytes > 0);
        assert_eq!(info.size_kb, format!("{:.2}", info.size_bytes as f64 / 1024.0));
        assert_eq!(
            info.last_updated,
            store.user_profile().await.expect("profile").updated_at
        );
    }

    #[tokio::test]
    async fn free_text_product_type_reaches_history() {
        let store = store();
        let request: RecommendationRequest = serde_json::from_str(
            r#"{"measurements":{"chest":95.0,"waist":80.0,"hips":96.0},"brand":"Nike","product_type":"hoodie"}"#,
        )
        .expect("parse request");
        let recommendation = RecommendationEngine::default().recommend(&request).expect("recommend");

        assert!(store.record_recommendation(&recommendation).await.success);

        let history = store.size_history().await;
        assert_eq!(history[0].product_type.as_str(), "hoodie");
        let raw = store.storage().load::<serde_json::Value>(SIZE_HISTORY_KEY).await.expect("raw");
        assert_eq!(raw[0]["product_type"], "hoodie");
    }

    #[tokio::test]
    async fn free_form_favorite_sizes_are_kept() {
        let store = store();
        store
            .save_favorite(NewFavorite {
                brand: "Levi's".to_string(),
                product: "501 jeans".to_string(),
                size: Some("32x34".to_string()),
                ..NewFavorite::default()
            })
            .await;
        store
            .save_favorite(NewFavorite {
                brand: "Zara".to_string(),
                product: "Blazer".to_string(),
                size: Some("M".to_string()),
                ..NewFavorite::default()
            })
            .await;

        let sizes: Vec<_> =
            store.favorites().await.into_iter().map(|favorite| favorite.size).collect();
        assert_eq!(sizes, vec![Some("M".to_string()), Some("32x34".to_string())]);
    }

    #[tokio::test]
    async fn unreadable_lists_are_not_overwritten() {
        let store = store();
        let stored = serde_json::json!([
            {"id": "fav-1", "brand": "Levi's", "product": 501, "saved_at": "yesterday"},
            {"id": "fav-2", "brand": "Nike"}
        ]);
        store.storage().save(FAVORITES_KEY, &stored).await;
        store.storage().save(OUTFITS_KEY, &stored).await;
        store.storage().save(SIZE_HISTORY_KEY, &stored).await;

        let outcome = store
            .save_favorite(NewFavorite {
                brand: "Zara".to_string(),
                product: "Blazer".to_string(),
                ..NewFavorite::default()
            })
            .await;
        assert!(!outcome.success);
        assert!(outcome.error.expect("error").contains(FAVORITES_KEY));
        assert!(!store.remove_favorite("fav-1").await.success);
        let gym = NewOutfit { name: "Gym".to_string(), ..NewOutfit::default() };
        assert!(!store.save_outfit(gym).await.success);
        assert!(!store.delete_outfit("fav-1").await.success);

        let recommendation = RecommendationEngine::default()
            .recommend(&RecommendationRequest::new(Measurements::new(95.0, 80.0, 96.0), "Nike"))
            .expect("recommend");
        assert!(!store.record_recommendation(&recommendation).await.success);

        for key in [FAVORITES_KEY, OUTFITS_KEY, SIZE_HISTORY_KEY] {
            let raw = store.storage().load::<serde_json::Value>(key).await.expect("raw list");
            assert_eq!(raw, stored, "{key} should be untouched");
        }
    }

    #[tokio::test]
    async fn import_caps_history_at_limit() {
        let source = UserDataStore::with_history_limit(DeviceStorage::in_memory(), 10);
        let engine = RecommendationEngine::default();
        for brand in ["Nike", "Adidas", "H&M", "Zara", "Uniqlo"] {
            let recommendation = engine
                .recommend(&RecommendationRequest::new(Measurements::new(95.0, 80.0, 96.0), brand))
                .expect("recommend");
            source.record_recommendation(&recommendation).await;
        }
        let export = source.export_all().await;
        assert_eq!(export.history.len(), 5);

        let target = UserDataStore::with_history_limit(DeviceStorage::in_memory(), 3);
        assert!(target.import_all(export).await.success);

        let brands: Vec<_> =
            target.size_history().await.into_iter().map(|entry| entry.brand).collect();
        assert_eq!(brands, vec!["Uniqlo", "Zara", "H&M"]);
    }
}

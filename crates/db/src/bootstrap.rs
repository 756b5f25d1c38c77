use std::sync::Arc;

use fitsize_core::config::{
    AppConfig, ConfigError, LoadOptions, LogFormat, LoggingConfig, StorageBackend,
};
use fitsize_core::{RecommendationEngine, ReferenceData, ReferenceDataError};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::repositories::{InMemoryKeyValueRepository, KeyValueRepository, SqlKeyValueRepository};
use crate::storage::DeviceStorage;
use crate::user_data::UserDataStore;
use crate::{connect, migrations, DbPool};

pub struct FitsizeApp {
    pub config: AppConfig,
    pub engine: RecommendationEngine,
    pub store: UserDataStore,
    /// Present only when the sqlite backend is selected.
    pub db_pool: Option<DbPool>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    ReferenceData(#[from] ReferenceDataError),
    #[error("database connection failed: {0}")]
    DatabaseConnect(#[source] sqlx::Error),
    #[error("database migration failed: {0}")]
    Migration(#[source] sqlx::migrate::MigrateError),
}

/// Installs the global subscriber. A second call is a no-op.
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_target(false).with_env_filter(filter);

    let _ = match config.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

pub async fn bootstrap(options: LoadOptions) -> Result<FitsizeApp, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<FitsizeApp, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        backend = ?config.storage.backend,
        namespace = %config.storage.namespace,
        "starting fitsize bootstrap"
    );

    let reference = match &config.reference.brands_path {
        Some(path) => ReferenceData::from_path(path)?,
        None => ReferenceData::standard(),
    };
    info!(
        event_name = "system.bootstrap.reference_loaded",
        brands = reference.brands().len(),
        "reference data loaded"
    );

    let (backend, db_pool): (Arc<dyn KeyValueRepository>, Option<DbPool>) =
        match config.storage.backend {
            StorageBackend::Memory => (Arc::new(InMemoryKeyValueRepository::default()), None),
            StorageBackend::Sqlite => {
                let pool =
                    connect(&config.database).await.map_err(BootstrapError::DatabaseConnect)?;
                info!(
                    event_name = "system.bootstrap.database_connected",
                    "database connection established"
                );

                migrations::run_pending(&pool).await.map_err(BootstrapError::Migration)?;
                info!(
                    event_name = "system.bootstrap.migrations_applied",
                    "database migrations applied"
                );

                (Arc::new(SqlKeyValueRepository::new(pool.clone())), Some(pool))
            }
        };

    let storage = DeviceStorage::new(backend, config.storage.namespace.clone());
    let store = UserDataStore::with_history_limit(storage, config.storage.history_limit);

    info!(event_name = "system.bootstrap.ready", "fitsize bootstrap complete");

    Ok(FitsizeApp { engine: RecommendationEngine::new(reference), store, db_pool, config })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use fitsize_core::config::{
        AppConfig, ConfigOverrides, LoadOptions, LogFormat, LoggingConfig, StorageBackend,
    };
    use fitsize_core::{Measurements, RecommendationRequest, SizeLabel};

    use super::{bootstrap, bootstrap_with_config, init_logging, BootstrapError};

    fn memory_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.storage.backend = StorageBackend::Memory;
        config
    }

    #[tokio::test]
    async fn memory_backend_has_no_pool() {
        let app = bootstrap_with_config(memory_config()).await.expect("bootstrap");

        assert!(app.db_pool.is_none());
        assert_eq!(app.store.storage().namespace(), "fitsize_");
        assert_eq!(app.engine.supported_brands().len(), 6);
    }

    #[tokio::test]
    async fn sqlite_backend_connects_and_migrates() {
        let mut config = AppConfig::default();
        config.database.url = "sqlite::memory:".to_string();
        config.database.max_connections = 1;

        let app = bootstrap_with_config(config).await.expect("bootstrap");
        let pool = app.db_pool.as_ref().expect("sqlite backend keeps its pool");

        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'kv_entry'",
        )
        .fetch_one(pool)
        .await
        .expect("kv_entry table");
        assert_eq!(count, 1);

        assert!(app.store.create_user_profile(Some("Ada".to_string()), None).await.success);
        assert!(app.store.user_profile().await.is_some());
    }

    #[tokio::test]
    async fn custom_brand_table_replaces_builtin_one() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"
[[brands]]
name = "Acme"
runs_small = false
fit_style = "regular"

[[brands.size_chart]]
label = "M"
chest = {{ min = 90.0, max = 100.0 }}
waist = {{ min = 75.0, max = 85.0 }}
hips = {{ min = 90.0, max = 100.0 }}
"#
        )
        .expect("write brands");

        let mut config = memory_config();
        config.reference.brands_path = Some(file.path().to_path_buf());

        let app = bootstrap_with_config(config).await.expect("bootstrap");
        assert_eq!(app.engine.supported_brands(), vec!["Acme"]);

        let recommendation = app
            .engine
            .recommend(&RecommendationRequest::new(Measurements::new(95.0, 80.0, 95.0), "Acme"))
            .expect("recommendation");
        assert_eq!(recommendation.recommended_size, Some(SizeLabel::M));
    }

    #[tokio::test]
    async fn invalid_config_fails_fast() {
        let result = bootstrap(LoadOptions {
            overrides: ConfigOverrides {
                storage_backend: Some(StorageBackend::Memory),
                storage_namespace: Some("   ".to_string()),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        })
        .await;

        assert!(matches!(result, Err(BootstrapError::Config(_))));
    }

    #[tokio::test]
    async fn missing_brand_table_is_reported() {
        let mut config = memory_config();
        config.reference.brands_path = Some("/definitely/not/here/brands.toml".into());

        let result = bootstrap_with_config(config).await;
        assert!(matches!(result, Err(BootstrapError::ReferenceData(_))));
    }

    #[test]
    fn init_logging_tolerates_repeat_calls() {
        let config = LoggingConfig { level: "not a directive [".to_string(), format: LogFormat::Json };
        init_logging(&config);
        init_logging(&LoggingConfig { level: "debug".to_string(), format: LogFormat::Compact });
    }
}

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

use crate::repositories::{InMemoryKeyValueRepository, KeyValueRepository, RepositoryError};

pub const DEFAULT_NAMESPACE: &str = "fitsize_";

/// Result of a write-side storage call. Failures are reported, never raised.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StorageOutcome {
    pub fn ok() -> Self {
        Self { success: true, error: None }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self { success: false, error: Some(message.into()) }
    }

    pub fn is_ok(&self) -> bool {
        self.success
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Namespaced JSON persistence over a raw key-value backend.
#[derive(Clone)]
pub struct DeviceStorage {
    backend: Arc<dyn KeyValueRepository>,
    namespace: String,
}

impl DeviceStorage {
    pub fn new(backend: Arc<dyn KeyValueRepository>, namespace: impl Into<String>) -> Self {
        Self { backend, namespace: namespace.into() }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryKeyValueRepository::default()), DEFAULT_NAMESPACE)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.namespace, key)
    }

    pub async fn save<T>(&self, key: &str, data: &T) -> StorageOutcome
    where
        T: Serialize + Sync + ?Sized,
    {
        match self.try_save(key, data).await {
            Ok(()) => StorageOutcome::ok(),
            Err(err) => {
                error!(event_name = "storage.save.failed", key, error = %err, "storage save failed");
                StorageOutcome::failure(err.to_string())
            }
        }
    }

    async fn try_save<T>(&self, key: &str, data: &T) -> Result<(), StorageError>
    where
        T: Serialize + Sync + ?Sized,
    {
        let raw = serde_json::to_string(data)?;
        self.backend.put(&self.full_key(key), &raw).await?;
        Ok(())
    }

    /// Missing keys, backend failures and undecodable payloads all read as `None`.
    pub async fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.try_load(key).await {
            Ok(value) => value,
            Err(err) => {
                error!(event_name = "storage.load.failed", key, error = %err, "storage load failed");
                None
            }
        }
    }

    pub async fn try_load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.backend.get(&self.full_key(key)).await? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// Raw JSON text as stored, without decoding.
    pub async fn load_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.backend.get(&self.full_key(key)).await?)
    }

    pub async fn delete(&self, key: &str) -> StorageOutcome {
        match self.backend.remove(&self.full_key(key)).await {
            Ok(()) => StorageOutcome::ok(),
            Err(err) => {
                error!(event_name = "storage.delete.failed", key, error = %err, "storage delete failed");
                StorageOutcome::failure(err.to_string())
            }
        }
    }

    /// Removes every key under this namespace; keys of other namespaces survive.
    pub async fn clear_all(&self) -> StorageOutcome {
        match self.backend.remove_with_prefix(&self.namespace).await {
            Ok(removed) => {
                warn!(
                    event_name = "storage.clear_all",
                    namespace = %self.namespace,
                    removed,
                    "cleared namespaced storage"
                );
                StorageOutcome::ok()
            }
            Err(err) => {
                error!(event_name = "storage.clear.failed", error = %err, "storage clear failed");
                StorageOutcome::failure(err.to_string())
            }
        }
    }

    /// Logical keys (namespace stripped) currently stored.
    pub async fn keys(&self) -> Result<Vec<String>, StorageError> {
        let keys = self.backend.keys_with_prefix(&self.namespace).await?;
        Ok(keys
            .into_iter()
            .filter_map(|key| key.strip_prefix(&self.namespace).map(str::to_string))
            .collect())
    }
}

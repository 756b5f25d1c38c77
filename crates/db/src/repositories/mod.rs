use async_trait::async_trait;
use thiserror::Error;

pub mod memory;
pub mod sqlite;

pub use memory::InMemoryKeyValueRepository;
pub use sqlite::SqlKeyValueRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

/// Raw string storage keyed by full (already namespaced) keys.
#[async_trait]
pub trait KeyValueRepository: Send + Sync {
    async fn put(&self, key: &str, value: &str) -> Result<(), RepositoryError>;
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError>;
    async fn remove(&self, key: &str) -> Result<(), RepositoryError>;
    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, RepositoryError>;
    async fn remove_with_prefix(&self, prefix: &str) -> Result<u64, RepositoryError>;
}

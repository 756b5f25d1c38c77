use chrono::Utc;
use sqlx::Row;

use super::{KeyValueRepository, RepositoryError};
use crate::DbPool;

pub struct SqlKeyValueRepository {
    pool: DbPool,
}

impl SqlKeyValueRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn prefix_len(prefix: &str) -> i64 {
    prefix.chars().count() as i64
}

#[async_trait::async_trait]
impl KeyValueRepository for SqlKeyValueRepository {
    async fn put(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO kv_entry (key, value, updated_at)
             VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        let row = sqlx::query("SELECT value FROM kv_entry WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| row.try_get::<String, _>("value"))
            .transpose()
            .map_err(|e| RepositoryError::Decode(e.to_string()))
    }

    async fn remove(&self, key: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM kv_entry WHERE key = ?").bind(key).execute(&self.pool).await?;
        Ok(())
    }

    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, RepositoryError> {
        // substr instead of LIKE so `_` and `%` in a namespace are literal.
        let rows = sqlx::query(
            "SELECT key FROM kv_entry WHERE substr(key, 1, ?) = ? ORDER BY key",
        )
        .bind(prefix_len(prefix))
        .bind(prefix)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| row.try_get::<String, _>("key"))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| RepositoryError::Decode(e.to_string()))
    }

    async fn remove_with_prefix(&self, prefix: &str) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM kv_entry WHERE substr(key, 1, ?) = ?")
            .bind(prefix_len(prefix))
            .bind(prefix)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

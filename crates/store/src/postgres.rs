use crate::error::StoreError;
use crate::kv::KvStore;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgPool;
use sqlx::Row;
use std::future::Future;
use std::time::Duration;

/// The PostgreSQL-backed store: one `kv_store` table mapping TEXT keys to
/// JSONB values. All access goes through the shared connection pool.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
    op_timeout: Duration,
}

impl PostgresStore {
    /// Creates a new `PostgresStore` with a shared database connection pool.
    ///
    /// `op_timeout` bounds every individual store operation; an access that
    /// exceeds it fails with [`StoreError::Unavailable`] instead of hanging.
    pub fn new(pool: PgPool, op_timeout: Duration) -> Self {
        Self { pool, op_timeout }
    }

    /// Applies the operation timeout to a single store access.
    async fn bounded<T, F>(&self, op: &str, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.op_timeout, fut).await {
            Ok(result) => result.map_err(StoreError::from),
            Err(_elapsed) => Err(StoreError::Unavailable(format!(
                "{} timed out after {:?}",
                op, self.op_timeout
            ))),
        }
    }
}

#[async_trait]
impl KvStore for PostgresStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let row = self
            .bounded(
                "get",
                sqlx::query("SELECT value FROM kv_store WHERE key = $1")
                    .bind(key)
                    .fetch_optional(&self.pool),
            )
            .await?;

        Ok(row.map(|r| r.get::<Value, _>("value")))
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.bounded(
            "set",
            sqlx::query(
                "INSERT INTO kv_store (key, value) VALUES ($1, $2) \
                 ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value",
            )
            .bind(key)
            .bind(value)
            .execute(&self.pool),
        )
        .await?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.bounded(
            "delete",
            sqlx::query("DELETE FROM kv_store WHERE key = $1")
                .bind(key)
                .execute(&self.pool),
        )
        .await?;

        Ok(())
    }

    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        // LIKE treats % and _ as wildcards; escape them so the prefix is
        // matched literally.
        let escaped = prefix.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");
        let pattern = format!("{}%", escaped);

        let rows = self
            .bounded(
                "keys_with_prefix",
                sqlx::query("SELECT key FROM kv_store WHERE key LIKE $1")
                    .bind(pattern)
                    .fetch_all(&self.pool),
            )
            .await?;

        Ok(rows.into_iter().map(|r| r.get::<String, _>("key")).collect())
    }
}

use crate::error::StoreError;
use async_trait::async_trait;
use serde_json::Value;

/// The generic, abstract interface to the key-addressed store.
/// This trait is the contract the ledger is written against, allowing the
/// underlying implementation (Postgres or in-memory) to be swapped out.
///
/// Keys are opaque strings; values are structured JSON. Callers must never
/// assume any ordering from the store itself.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Point lookup of a single key. `None` when the key is absent.
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Writes a single key, replacing any previous value atomically.
    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Removes a single key. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Lists every key starting with `prefix`. Used by maintenance sweeps to
    /// enumerate the authoritative record set; the result order carries no
    /// meaning.
    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError>;
}

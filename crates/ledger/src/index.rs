use crate::error::LedgerError;
use crate::keys;
use crate::retry::{with_retry, RetryPolicy};
use core_types::TradeId;
use std::sync::Arc;
use store::KvStore;
use tokio::sync::Mutex;

/// Maintains the active/closed trade-id sequences.
///
/// The sequences are stored as JSON arrays under two dedicated keys, separate
/// from the records, so membership queries never scan all records. The price
/// of that split is that record mutation and index mutation must be
/// explicitly synchronized: every read-modify-write of the sequences (and
/// every read) holds this maintainer's mutex, which rules out the lost-update
/// race between concurrent writers and keeps the two-key promote invisible in
/// its intermediate state.
pub struct IndexMaintainer {
    store: Arc<dyn KvStore>,
    retry: RetryPolicy,
    lock: Mutex<()>,
}

impl IndexMaintainer {
    pub fn new(store: Arc<dyn KvStore>, retry: RetryPolicy) -> Self {
        Self {
            store,
            retry,
            lock: Mutex::new(()),
        }
    }

    /// Appends an id to the active sequence. Called exactly once per created
    /// trade, after the record write succeeded.
    pub async fn add_active(&self, id: &TradeId) -> Result<(), LedgerError> {
        let _guard = self.lock.lock().await;

        let mut active = self.read(keys::ACTIVE_INDEX).await?;
        if !active.contains(id) {
            active.push(id.clone());
        }
        self.write(keys::ACTIVE_INDEX, &active).await
    }

    /// Moves an id from the active sequence to the end of the closed one, as
    /// one logical operation under the index lock.
    ///
    /// Both steps are idempotent (remove tolerates absence, append is
    /// guarded by membership), so a retry after a partial store failure
    /// converges instead of duplicating.
    pub async fn promote_to_closed(&self, id: &TradeId) -> Result<(), LedgerError> {
        let _guard = self.lock.lock().await;

        let mut active = self.read(keys::ACTIVE_INDEX).await?;
        let mut closed = self.read(keys::CLOSED_INDEX).await?;

        active.retain(|x| x != id);
        if !closed.contains(id) {
            closed.push(id.clone());
        }

        self.write(keys::ACTIVE_INDEX, &active).await?;
        self.write(keys::CLOSED_INDEX, &closed).await
    }

    pub async fn list_active(&self) -> Result<Vec<TradeId>, LedgerError> {
        let _guard = self.lock.lock().await;
        self.read(keys::ACTIVE_INDEX).await
    }

    pub async fn list_closed(&self) -> Result<Vec<TradeId>, LedgerError> {
        let _guard = self.lock.lock().await;
        self.read(keys::CLOSED_INDEX).await
    }

    /// Swaps in freshly rebuilt sequences, used by the reconciliation sweep.
    pub async fn replace(
        &self,
        active: &[TradeId],
        closed: &[TradeId],
    ) -> Result<(), LedgerError> {
        let _guard = self.lock.lock().await;
        self.write(keys::ACTIVE_INDEX, active).await?;
        self.write(keys::CLOSED_INDEX, closed).await
    }

    /// An absent index key reads as an empty sequence.
    async fn read(&self, key: &'static str) -> Result<Vec<TradeId>, LedgerError> {
        let value = with_retry(&self.retry, "index_get", || self.store.get(key)).await?;
        match value {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(Vec::new()),
        }
    }

    async fn write(&self, key: &'static str, ids: &[TradeId]) -> Result<(), LedgerError> {
        let value = serde_json::to_value(ids)?;
        with_retry(&self.retry, "index_set", || self.store.set(key, value.clone())).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::MemoryStore;

    fn maintainer() -> IndexMaintainer {
        IndexMaintainer::new(Arc::new(MemoryStore::new()), RetryPolicy::default())
    }

    #[tokio::test]
    async fn indices_start_empty() {
        let index = maintainer();
        assert!(index.list_active().await.unwrap().is_empty());
        assert!(index.list_closed().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn add_active_appends_in_order() {
        let index = maintainer();
        let a = TradeId::from("trade:1:aaaaaaaa");
        let b = TradeId::from("trade:2:bbbbbbbb");

        index.add_active(&a).await.unwrap();
        index.add_active(&b).await.unwrap();

        assert_eq!(index.list_active().await.unwrap(), vec![a, b]);
    }

    #[tokio::test]
    async fn promote_moves_id_between_sequences() {
        let index = maintainer();
        let a = TradeId::from("trade:1:aaaaaaaa");
        let b = TradeId::from("trade:2:bbbbbbbb");

        index.add_active(&a).await.unwrap();
        index.add_active(&b).await.unwrap();
        index.promote_to_closed(&a).await.unwrap();

        assert_eq!(index.list_active().await.unwrap(), vec![b]);
        assert_eq!(index.list_closed().await.unwrap(), vec![a]);
    }

    #[tokio::test]
    async fn promote_is_idempotent() {
        let index = maintainer();
        let a = TradeId::from("trade:1:aaaaaaaa");

        index.add_active(&a).await.unwrap();
        index.promote_to_closed(&a).await.unwrap();
        index.promote_to_closed(&a).await.unwrap();

        assert!(index.list_active().await.unwrap().is_empty());
        assert_eq!(index.list_closed().await.unwrap(), vec![a]);
    }
}

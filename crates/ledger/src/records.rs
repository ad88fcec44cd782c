use crate::error::LedgerError;
use crate::retry::{with_retry, RetryPolicy};
use chrono::Utc;
use core_types::{TradeId, TradeIntent, TradeRecord};
use rust_decimal::Decimal;
use std::sync::Arc;
use store::KvStore;

/// Creates, mutates, and retrieves individual trade records by id.
///
/// Each record is stored as one JSON value under its own id. The manager
/// performs single-record operations only; index consistency is the
/// [`LedgerService`](crate::LedgerService)'s concern.
pub struct TradeRecordManager {
    store: Arc<dyn KvStore>,
    retry: RetryPolicy,
}

impl TradeRecordManager {
    pub fn new(store: Arc<dyn KvStore>, retry: RetryPolicy) -> Self {
        Self { store, retry }
    }

    /// Validates the intent and writes a fresh open record.
    pub async fn create(&self, intent: TradeIntent) -> Result<TradeRecord, LedgerError> {
        intent.validate()?;

        let record = TradeRecord::open(intent);
        self.put(&record).await?;
        Ok(record)
    }

    /// Point lookup; fails with `NotFound` when the id is absent.
    pub async fn get(&self, id: &TradeId) -> Result<TradeRecord, LedgerError> {
        self.try_get(id)
            .await?
            .ok_or_else(|| LedgerError::NotFound(id.clone()))
    }

    /// Point lookup that distinguishes "absent" from store failure. Used by
    /// the list operations, which drop dangling ids instead of failing.
    pub async fn try_get(&self, id: &TradeId) -> Result<Option<TradeRecord>, LedgerError> {
        let value = with_retry(&self.retry, "record_get", || self.store.get(id.as_str())).await?;

        match value {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Transitions a record to closed, computing its realized P&L.
    ///
    /// Fails with `NotFound` if the id is absent and `AlreadyClosed` if the
    /// record was closed before — the idempotency guard that keeps a second
    /// close attempt from double-counting P&L. The mutation is written as a
    /// single whole-record value, so no partial closure state is ever
    /// observable.
    pub async fn mark_closed(
        &self,
        id: &TradeId,
        exit_price: Decimal,
    ) -> Result<TradeRecord, LedgerError> {
        let mut record = self.get(id).await?;

        if !record.is_open() {
            return Err(LedgerError::AlreadyClosed(id.clone()));
        }

        record.close(exit_price, Utc::now());
        self.put(&record).await?;
        Ok(record)
    }

    async fn put(&self, record: &TradeRecord) -> Result<(), LedgerError> {
        let value = serde_json::to_value(record)?;
        with_retry(&self.retry, "record_set", || {
            self.store.set(record.id.as_str(), value.clone())
        })
        .await?;
        Ok(())
    }
}

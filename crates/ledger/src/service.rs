use crate::error::LedgerError;
use crate::index::IndexMaintainer;
use crate::keys;
use crate::records::TradeRecordManager;
use crate::retry::{with_retry, RetryPolicy};
use core_types::{TradeId, TradeIntent, TradeRecord};
use futures::future::join_all;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use store::KvStore;
use tokio::sync::Mutex;

/// The single owner of all writes to trade records and indices.
///
/// Shared across request handlers via `Arc`; every public operation is safe
/// under concurrent callers. Two locks carry the correctness story:
///
/// - the [`IndexMaintainer`]'s internal mutex serializes every index
///   read-modify-write, closing the lost-update race between writers;
/// - `close_lock` makes the whole close path (read record, status check,
///   conditional write, index promote) atomic, so of two concurrent closes
///   of the same id exactly one succeeds and the other observes
///   `AlreadyClosed`.
pub struct LedgerService {
    records: TradeRecordManager,
    index: IndexMaintainer,
    store: Arc<dyn KvStore>,
    retry: RetryPolicy,
    close_lock: Mutex<()>,
    needs_reconcile: AtomicBool,
}

impl LedgerService {
    pub fn new(store: Arc<dyn KvStore>, retry: RetryPolicy) -> Self {
        Self {
            records: TradeRecordManager::new(store.clone(), retry.clone()),
            index: IndexMaintainer::new(store.clone(), retry.clone()),
            store,
            retry,
            close_lock: Mutex::new(()),
            needs_reconcile: AtomicBool::new(false),
        }
    }

    /// Opens a trade: record first, then the active-index append.
    ///
    /// The record is the source of truth — if the index append keeps failing
    /// after its retries, the trade still exists; we flag the ledger for the
    /// reconciliation sweep instead of surfacing index trouble to a caller
    /// whose trade has already been written.
    pub async fn execute_trade(&self, intent: TradeIntent) -> Result<TradeRecord, LedgerError> {
        let record = self.records.create(intent).await?;

        if let Err(e) = self.index.add_active(&record.id).await {
            tracing::error!(
                trade_id = %record.id,
                error = %e,
                "active-index append failed after record write; scheduling reconciliation"
            );
            self.flag_for_reconcile();
        }

        Ok(record)
    }

    /// Closes a trade: realized P&L is computed and written once, then the id
    /// moves from the active index to the closed one.
    pub async fn close_trade(
        &self,
        id: &TradeId,
        exit_price: Decimal,
    ) -> Result<TradeRecord, LedgerError> {
        let _guard = self.close_lock.lock().await;

        let record = self.records.mark_closed(id, exit_price).await?;

        if let Err(e) = self.index.promote_to_closed(id).await {
            tracing::error!(
                trade_id = %id,
                error = %e,
                "index promote failed after record close; scheduling reconciliation"
            );
            self.flag_for_reconcile();
        }

        Ok(record)
    }

    pub async fn get_trade(&self, id: &TradeId) -> Result<TradeRecord, LedgerError> {
        self.records.get(id).await
    }

    /// Resolves the active index to records, in index order.
    ///
    /// Ids whose record lookup misses are dropped (transient index/record
    /// divergence must not fail the whole call), as is any record the index
    /// holds but whose status has already moved on — callers never see a
    /// closed record in an active listing.
    pub async fn list_active_trades(&self) -> Result<Vec<TradeRecord>, LedgerError> {
        let ids = self.index.list_active().await?;
        let resolved = self.resolve(&ids).await?;
        Ok(resolved.into_iter().filter(|r| r.is_open()).collect())
    }

    /// Resolves the closed index to records, in index order, dropping
    /// dangling ids and any record still marked open.
    pub async fn closed_trades(&self) -> Result<Vec<TradeRecord>, LedgerError> {
        let ids = self.index.list_closed().await?;
        let resolved = self.resolve(&ids).await?;
        Ok(resolved.into_iter().filter(|r| !r.is_open()).collect())
    }

    async fn resolve(&self, ids: &[TradeId]) -> Result<Vec<TradeRecord>, LedgerError> {
        let lookups = ids.iter().map(|id| self.records.try_get(id));
        let results = join_all(lookups).await;

        let mut records = Vec::with_capacity(ids.len());
        for (id, result) in ids.iter().zip(results) {
            match result? {
                Some(record) => records.push(record),
                None => {
                    tracing::warn!(trade_id = %id, "index entry has no record; dropping");
                    self.flag_for_reconcile();
                }
            }
        }
        Ok(records)
    }

    // ------------------------------------------------------------------
    // Pass-through persistence. Opaque values, no business logic; the key
    // namespaces are disjoint from the trade and index keys (see `keys`).
    // ------------------------------------------------------------------

    pub async fn store_signals(&self, signals: Value) -> Result<(), LedgerError> {
        with_retry(&self.retry, "signals_set", || {
            self.store.set(keys::MARKET_SIGNALS, signals.clone())
        })
        .await?;
        Ok(())
    }

    /// An absent signal list reads as an empty one.
    pub async fn get_signals(&self) -> Result<Value, LedgerError> {
        let value = with_retry(&self.retry, "signals_get", || {
            self.store.get(keys::MARKET_SIGNALS)
        })
        .await?;
        Ok(value.unwrap_or_else(|| json!([])))
    }

    pub async fn store_strategy_config(
        &self,
        strategy_id: &str,
        config: Value,
    ) -> Result<(), LedgerError> {
        let key = keys::strategy_config(strategy_id);
        with_retry(&self.retry, "strategy_config_set", || {
            self.store.set(&key, config.clone())
        })
        .await?;
        Ok(())
    }

    pub async fn get_strategy_config(
        &self,
        strategy_id: &str,
    ) -> Result<Option<Value>, LedgerError> {
        let key = keys::strategy_config(strategy_id);
        let value = with_retry(&self.retry, "strategy_config_get", || self.store.get(&key)).await?;
        Ok(value)
    }

    // ------------------------------------------------------------------
    // Reconciliation plumbing (the sweep itself lives in `reconcile`).
    // ------------------------------------------------------------------

    pub fn needs_reconcile(&self) -> bool {
        self.needs_reconcile.load(Ordering::Relaxed)
    }

    pub(crate) fn flag_for_reconcile(&self) {
        self.needs_reconcile.store(true, Ordering::Relaxed);
    }

    pub(crate) fn clear_reconcile_flag(&self) {
        self.needs_reconcile.store(false, Ordering::Relaxed);
    }

    pub(crate) fn record_manager(&self) -> &TradeRecordManager {
        &self.records
    }

    pub(crate) fn index_maintainer(&self) -> &IndexMaintainer {
        &self.index
    }

    pub(crate) fn store(&self) -> &Arc<dyn KvStore> {
        &self.store
    }

    pub(crate) fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }
}

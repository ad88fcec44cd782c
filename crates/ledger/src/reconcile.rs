use crate::error::LedgerError;
use crate::keys;
use crate::retry::with_retry;
use crate::service::LedgerService;
use core_types::{TradeId, TradeRecord};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;

/// The outcome of one reconciliation sweep.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReconcileReport {
    /// Trade records found under the `trade:` prefix.
    pub scanned: usize,
    /// Open records after the sweep (== rebuilt active index length).
    pub open: usize,
    /// Closed records after the sweep (== rebuilt closed index length).
    pub closed: usize,
    /// Human-readable description of every divergence repaired.
    pub findings: Vec<String>,
}

impl ReconcileReport {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

impl LedgerService {
    /// The maintenance sweep: rebuilds both indices from the authoritative
    /// record set.
    ///
    /// Records whose status matches their current index position keep their
    /// relative order; strays (records missing from their index) are
    /// appended in creation order. Dangling ids, misplaced ids, and
    /// duplicates are dropped. Divergence is reported and repaired, never
    /// surfaced to trade callers — the indices are accelerators, the
    /// records are the truth.
    pub async fn reconcile_indices(&self) -> Result<ReconcileReport, LedgerError> {
        let trade_keys = with_retry(self.retry_policy(), "trade_scan", || {
            self.store().keys_with_prefix(keys::TRADE_PREFIX)
        })
        .await?;

        let mut records: Vec<TradeRecord> = Vec::with_capacity(trade_keys.len());
        let mut findings: Vec<String> = Vec::new();

        for key in trade_keys {
            let id = TradeId::from(key);
            match self.record_manager().try_get(&id).await {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {}
                // A record that no longer parses must not abort the sweep;
                // everything else (store down, etc.) does.
                Err(LedgerError::JsonError(e)) => {
                    findings.push(format!("record {} is unreadable: {}", id, e));
                }
                Err(e) => return Err(e),
            }
        }

        let by_id: HashMap<&TradeId, &TradeRecord> =
            records.iter().map(|r| (&r.id, r)).collect();

        let current_active = self.index_maintainer().list_active().await?;
        let current_closed = self.index_maintainer().list_closed().await?;

        let rebuilt_active = rebuild(
            "active",
            &current_active,
            &records,
            |record| record.is_open(),
            &by_id,
            &mut findings,
        );
        let rebuilt_closed = rebuild(
            "closed",
            &current_closed,
            &records,
            |record| !record.is_open(),
            &by_id,
            &mut findings,
        );

        let report = ReconcileReport {
            scanned: records.len(),
            open: rebuilt_active.len(),
            closed: rebuilt_closed.len(),
            findings,
        };

        if !report.is_clean() {
            let inconsistency =
                LedgerError::IndexInconsistency(report.findings.join("; "));
            tracing::warn!(error = %inconsistency, "sweep found divergence; rebuilding indices");
            self.index_maintainer()
                .replace(&rebuilt_active, &rebuilt_closed)
                .await?;
        }

        self.clear_reconcile_flag();
        Ok(report)
    }
}

/// Rebuilds one index: keeps the current relative order for ids whose record
/// still belongs here, drops everything else with a finding, then appends
/// records this index should hold but doesn't, in creation order.
fn rebuild<'a>(
    name: &str,
    current: &[TradeId],
    records: &'a [TradeRecord],
    belongs: impl Fn(&TradeRecord) -> bool,
    by_id: &HashMap<&'a TradeId, &'a TradeRecord>,
    findings: &mut Vec<String>,
) -> Vec<TradeId> {
    let mut rebuilt: Vec<TradeId> = Vec::new();
    let mut seen: HashSet<&'a TradeId> = HashSet::new();

    for id in current {
        match by_id.get(id).copied() {
            None => findings.push(format!("{} index holds dangling id {}", name, id)),
            Some(record) if !belongs(record) => {
                findings.push(format!("{} index holds misplaced id {}", name, id));
            }
            Some(_) if seen.contains(id) => {
                findings.push(format!("{} index holds duplicate id {}", name, id));
            }
            Some(record) => {
                seen.insert(&record.id);
                rebuilt.push(id.clone());
            }
        }
    }

    let mut strays: Vec<&TradeRecord> = records
        .iter()
        .filter(|&r| belongs(r) && !seen.contains(&r.id))
        .collect();
    strays.sort_by_key(|r| r.created_at);
    for record in strays {
        findings.push(format!("{} index was missing id {}", name, record.id));
        rebuilt.push(record.id.clone());
    }

    rebuilt
}

/// The safety net for index drift.
///
/// Runs in a concurrent background task and periodically re-derives both
/// indices from the records, repairing whatever an interrupted open/close
/// left behind. A failed sweep only delays the next one.
pub struct ReconcileWorker {
    ledger: Arc<LedgerService>,
    period: Duration,
}

impl ReconcileWorker {
    pub fn new(ledger: Arc<LedgerService>, period: Duration) -> Self {
        Self { ledger, period }
    }

    pub async fn start(self) {
        tracing::info!(period = ?self.period, "starting index reconciliation worker");
        let mut timer = interval(self.period);

        loop {
            timer.tick().await;

            match self.ledger.reconcile_indices().await {
                Ok(report) if report.is_clean() => {
                    tracing::debug!(scanned = report.scanned, "sweep clean");
                }
                Ok(report) => {
                    tracing::info!(
                        scanned = report.scanned,
                        repaired = report.findings.len(),
                        "sweep rebuilt indices"
                    );
                }
                Err(e) => {
                    tracing::error!(error = %e, "reconciliation sweep failed");
                }
            }
        }
    }
}

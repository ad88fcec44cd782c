use crate::error::AnalyticsError;
use ledger::LedgerService;

pub mod engine;
pub mod error;
pub mod summary;

// Re-export the core types to provide a clean public API.
pub use engine::PerformanceEngine;
pub use summary::PerformanceSummary;

/// The read-only performance view over the ledger.
///
/// Fetches the closed-trade set through the service (inheriting its
/// drop-dangling-ids policy) and folds it with the stateless
/// [`PerformanceEngine`]. Pure function of ledger state: no side effects,
/// safe to call concurrently with writers.
#[derive(Debug, Default)]
pub struct PerformanceAggregator {
    engine: PerformanceEngine,
}

impl PerformanceAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn summarize(
        &self,
        ledger: &LedgerService,
    ) -> Result<PerformanceSummary, AnalyticsError> {
        let closed = ledger.closed_trades().await?;
        Ok(self.engine.summarize(&closed))
    }
}

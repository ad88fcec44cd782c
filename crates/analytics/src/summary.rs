use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Aggregate performance over all closed trades.
///
/// This is a derived view, recomputed per request from the closed-trade set;
/// it is never persisted and carries no lifecycle of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    /// Sum of realized P&L over every closed trade.
    pub total_pnl: Decimal,
    pub total_trades: usize,
    /// Share of closed trades with positive P&L, in percent. Zero — not
    /// NaN — when there are no closed trades.
    pub win_rate_pct: Decimal,
    pub winning_trades: usize,
    pub losing_trades: usize,
}

impl PerformanceSummary {
    /// Creates a new, zeroed-out PerformanceSummary.
    /// This is useful as a default or starting point before calculations.
    pub fn new() -> Self {
        Self {
            total_pnl: Decimal::ZERO,
            total_trades: 0,
            win_rate_pct: Decimal::ZERO,
            winning_trades: 0,
            losing_trades: 0,
        }
    }
}

impl Default for PerformanceSummary {
    fn default() -> Self {
        Self::new()
    }
}

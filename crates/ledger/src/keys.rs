//! The key-namespace layout of the store.
//!
//! Trade record keys are the trade ids themselves (`trade:{millis}:{suffix}`),
//! so the `trade:` prefix both names a record and scopes the maintenance
//! sweep's scan. The remaining namespaces are disjoint from it and from each
//! other; nothing outside this module builds a store key by hand.

/// Ordered sequence of open trade ids.
pub const ACTIVE_INDEX: &str = "trades:active";

/// Ordered sequence of closed trade ids.
pub const CLOSED_INDEX: &str = "trades:closed";

/// Prefix shared by every trade record key.
pub const TRADE_PREFIX: &str = "trade:";

/// Opaque market-signal list persisted on behalf of the signal pipeline.
pub const MARKET_SIGNALS: &str = "market:signals";

/// Key for a strategy's opaque configuration blob.
pub fn strategy_config(strategy_id: &str) -> String {
    format!("strategy:{}:config", strategy_id)
}

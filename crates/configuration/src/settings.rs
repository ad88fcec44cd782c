use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub reconciler: ReconcilerConfig,
    pub price_feed: PriceFeedConfig,
}

/// Contains parameters for the HTTP boundary.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// The socket address the API listens on (e.g., "0.0.0.0:3000").
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Contains parameters for the key-addressed store and the ledger's retry
/// behaviour against it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Size of the PostgreSQL connection pool.
    pub max_connections: u32,
    /// How long to wait for a pooled connection before giving up.
    pub acquire_timeout_secs: u64,
    /// Per-operation bound; a store access exceeding it counts as unavailable.
    pub op_timeout_ms: u64,
    /// Bounded attempts per ledger store access.
    pub max_retries: u32,
    /// Backoff before the first retry; doubles per attempt.
    pub retry_backoff_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout_secs: 5,
            op_timeout_ms: 2_000,
            max_retries: 3,
            retry_backoff_ms: 50,
        }
    }
}

/// Contains parameters for the background index reconciliation sweep.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReconcilerConfig {
    pub interval_secs: u64,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self { interval_secs: 30 }
    }
}

/// Contains parameters for the simulated price poll loop.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PriceFeedConfig {
    pub poll_interval_secs: u64,
    /// Per-tick drift bound of the random walk, in percent.
    pub volatility_pct: Decimal,
}

impl Default for PriceFeedConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 5,
            volatility_pct: dec!(0.5),
        }
    }
}

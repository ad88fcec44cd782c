//! # Meridian Price Feed Crate
//!
//! The price reconciliation client: a polling actor that periodically
//! re-fetches the active trades and independently recomputes their
//! unrealized P&L from simulated price ticks.
//!
//! It is strictly a boundary collaborator. It reads ledger state and
//! mutates only its own copy (the price board); the authoritative records
//! never see an interim price. Consumers of the board tolerate a staleness
//! window of one poll period.

pub mod error;
pub mod poller;
pub mod source;

// Re-export the key components to create a clean, public-facing API.
pub use error::PriceFeedError;
pub use poller::{PriceBoard, PricePoller, TradeMark};
pub use source::{PriceSource, RandomWalkSource};

pub mod enums;
pub mod error;
pub mod ids;
pub mod trade;

// Re-export the core types to provide a clean public API.
pub use enums::{TradeMode, TradeSide, TradeStatus};
pub use error::CoreError;
pub use ids::TradeId;
pub use trade::{TradeIntent, TradeRecord};

use core_types::{CoreError, TradeId};
use store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Validation failed: {0}")]
    Validation(#[from] CoreError),

    #[error("Trade not found: {0}")]
    NotFound(TradeId),

    #[error("Trade already closed: {0}")]
    AlreadyClosed(TradeId),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("An error occurred during JSON serialization/deserialization: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Index inconsistency detected: {0}")]
    IndexInconsistency(String),
}

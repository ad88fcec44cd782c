use thiserror::Error;

#[derive(Error, Debug)]
pub enum PriceFeedError {
    #[error("Ledger error: {0}")]
    Ledger(#[from] ledger::LedgerError),
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Ledger error: {0}")]
    Ledger(#[from] ledger::LedgerError),
}

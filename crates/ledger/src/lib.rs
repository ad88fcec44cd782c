//! # Meridian Ledger Crate
//!
//! The core of the system: opening and closing trades, keeping the derived
//! active/closed id indices consistent with the per-trade records, and
//! repairing the indices when they drift.
//!
//! ## Architectural Principles
//!
//! - **Records are the source of truth.** The indices are best-effort
//!   accelerators for membership queries; when record and index disagree,
//!   the record wins and a reconciliation sweep rebuilds the indices.
//! - **No ambient state.** The [`LedgerService`] is an explicit context
//!   object with an injected store, constructed once per process and shared
//!   via `Arc`; there are no module-level singletons.
//! - **Writes are exclusive.** Only the ledger service mutates records and
//!   indices. Everything else (aggregator, web read handlers, price poller)
//!   observes.
//!
//! ## Public API
//!
//! - `LedgerService`: open/close/list operations plus the pass-through
//!   signal and strategy-config persistence.
//! - `ReconcileWorker` / `ReconcileReport`: the background maintenance sweep.
//! - `RetryPolicy`: bounded retry-with-backoff applied to store accesses.
//! - `LedgerError`: the specific error types that can be returned from this crate.

pub mod error;
pub mod index;
pub mod keys;
pub mod reconcile;
pub mod records;
pub mod retry;
pub mod service;

// Re-export the key components to create a clean, public-facing API.
pub use error::LedgerError;
pub use reconcile::{ReconcileReport, ReconcileWorker};
pub use retry::RetryPolicy;
pub use service::LedgerService;

//! # Meridian Store Crate
//!
//! This crate is the boundary to the key-addressed store the ledger persists
//! into. Every durable value in the system lives under an opaque string key;
//! the store itself knows nothing about trades or indices.
//!
//! ## Architectural Principles
//!
//! - **One small contract:** the [`KvStore`] trait exposes get / set / delete
//!   of a single key plus a prefix scan for maintenance sweeps. Ordering is
//!   never derived from the store; it is carried inside the stored values.
//! - **Bounded access:** every operation either completes or fails within a
//!   configured timeout, surfacing [`StoreError::Unavailable`] instead of
//!   hanging its caller.
//! - **Swappable backends:** a PostgreSQL implementation for durable
//!   deployments and an in-memory implementation for paper mode and tests.
//!
//! ## Public API
//!
//! - `connect`: the async function to establish the database connection pool.
//! - `run_migrations`: a utility to apply migrations, ensuring the schema is up-to-date.
//! - `KvStore`: the abstract store contract the ledger is written against.
//! - `PostgresStore` / `MemoryStore`: the two backends.
//! - `StoreError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod kv;
pub mod memory;
pub mod postgres;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use error::StoreError;
pub use kv::KvStore;
pub use memory::MemoryStore;
pub use postgres::PostgresStore;

//! # Ledger Store Adapters
//!
//! Concrete store implementations (adapters) for the transaction ledger.
//! The in-memory adapter backs tests and single-process deployments; it
//! honours the same compare-and-set transition contract a database
//! adapter must.

pub mod memory;

#[cfg(test)]
mod memory_tests;

pub use memory::MemoryStore;

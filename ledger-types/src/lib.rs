//! # Ledger Types
//!
//! Domain types and port traits for the merchant transaction ledger.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Amount, Transaction, Service, Repayment)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    Amount, Article, Client, DEV_PROVIDER, Repayment, RepaymentId, Service, ServiceId, Step,
    Transaction, TransactionId, TransactionKind,
};
pub use dto::*;
pub use error::{DomainError, LedgerError, StoreError};
pub use ports::{LedgerStore, PaymentProvider, ProviderError};

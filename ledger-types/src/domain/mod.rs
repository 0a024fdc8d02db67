//! Domain models for the transaction ledger.

pub mod amount;
pub mod service;
pub mod transaction;

pub use amount::Amount;
pub use service::{Repayment, RepaymentId, Service, ServiceId};
pub use transaction::{
    Article, Client, DEV_PROVIDER, Step, Transaction, TransactionId, TransactionKind,
};

//! Ledger store port trait.
//!
//! This is the primary port in our hexagonal architecture.
//! Adapters (in-memory, database) will implement this trait.

use crate::domain::{Repayment, Service, ServiceId, Step, Transaction, TransactionId};
use crate::dto::{NewRepayment, NewTransaction};
use crate::error::StoreError;

/// The main store port for ledger operations.
///
/// Step transitions are conditional on the current state
/// (compare-and-set semantics), never unconditional overwrites, so two
/// racing provider callbacks cannot produce lost updates.
#[async_trait::async_trait]
pub trait LedgerStore: Send + Sync + 'static {
    // ─────────────────────────────────────────────────────────────────────────────
    // Service Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Creates a new service.
    async fn create_service(&self, name: String) -> Result<Service, StoreError>;

    /// Gets a service by ID.
    async fn get_service(&self, id: ServiceId) -> Result<Option<Service>, StoreError>;

    // ─────────────────────────────────────────────────────────────────────────────
    // Transaction Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Records a new transaction, assigning id, uuid, timestamps and the
    /// initial Pending step.
    async fn record_transaction(&self, new: NewTransaction) -> Result<Transaction, StoreError>;

    /// Gets a transaction by ID.
    async fn get_transaction(
        &self,
        id: TransactionId,
    ) -> Result<Option<Transaction>, StoreError>;

    /// Lists all transactions recorded against a service.
    async fn transactions_for_service(
        &self,
        service_id: ServiceId,
    ) -> Result<Vec<Transaction>, StoreError>;

    /// Lists transactions whose parent is `id` (derived back-reference).
    async fn children_of(&self, id: TransactionId) -> Result<Vec<Transaction>, StoreError>;

    /// Moves a transaction from `expected` to `to`.
    ///
    /// Fails with `Conflict` when the stored step no longer equals
    /// `expected` (a concurrent callback won the race). No state change
    /// on failure.
    async fn transition_step(
        &self,
        id: TransactionId,
        expected: Step,
        to: Step,
    ) -> Result<Transaction, StoreError>;

    // ─────────────────────────────────────────────────────────────────────────────
    // Repayment Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Records a payout to a service.
    async fn record_repayment(&self, new: NewRepayment) -> Result<Repayment, StoreError>;

    /// Lists all repayments for a service.
    async fn repayments_for_service(
        &self,
        service_id: ServiceId,
    ) -> Result<Vec<Repayment>, StoreError>;
}

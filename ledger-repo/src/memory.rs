//! In-memory ledger store.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use ledger_types::{
    LedgerStore, NewRepayment, NewTransaction, Repayment, RepaymentId, Service, ServiceId, Step,
    StoreError, Transaction, TransactionId,
};

/// Concurrent in-memory store.
///
/// Identifiers are assigned from per-table monotonic counters, external
/// uuids at record time. Listings come back id-ordered so aggregation
/// inputs are stable across calls.
pub struct MemoryStore {
    services: DashMap<ServiceId, Service>,
    transactions: DashMap<TransactionId, Transaction>,
    repayments: DashMap<RepaymentId, Repayment>,
    next_service_id: AtomicI64,
    next_transaction_id: AtomicI64,
    next_repayment_id: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            services: DashMap::new(),
            transactions: DashMap::new(),
            repayments: DashMap::new(),
            next_service_id: AtomicI64::new(1),
            next_transaction_id: AtomicI64::new(1),
            next_repayment_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl LedgerStore for MemoryStore {
    async fn create_service(&self, name: String) -> Result<Service, StoreError> {
        let id = ServiceId::new(self.next_service_id.fetch_add(1, Ordering::SeqCst));
        let service = Service::from_parts(id, name, Utc::now());
        self.services.insert(id, service.clone());
        tracing::debug!(service = %id, "service created");
        Ok(service)
    }

    async fn get_service(&self, id: ServiceId) -> Result<Option<Service>, StoreError> {
        Ok(self.services.get(&id).map(|entry| entry.value().clone()))
    }

    async fn record_transaction(&self, new: NewTransaction) -> Result<Transaction, StoreError> {
        let id = TransactionId::new(self.next_transaction_id.fetch_add(1, Ordering::SeqCst));
        let now = Utc::now();
        let tx = Transaction::from_parts(
            id,
            Uuid::new_v4(),
            new.kind,
            new.amount,
            new.service_id,
            new.parent,
            Step::Pending,
            new.provider,
            new.client,
            new.description,
            new.service_data,
            new.articles,
            now,
            now,
        );
        self.transactions.insert(id, tx.clone());
        tracing::debug!(transaction = %id, kind = %tx.kind, "transaction recorded");
        Ok(tx)
    }

    async fn get_transaction(
        &self,
        id: TransactionId,
    ) -> Result<Option<Transaction>, StoreError> {
        Ok(self.transactions.get(&id).map(|entry| entry.value().clone()))
    }

    async fn transactions_for_service(
        &self,
        service_id: ServiceId,
    ) -> Result<Vec<Transaction>, StoreError> {
        let mut txs: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|entry| entry.service_id == service_id)
            .map(|entry| entry.value().clone())
            .collect();
        txs.sort_by_key(|tx| tx.id);
        Ok(txs)
    }

    async fn children_of(&self, id: TransactionId) -> Result<Vec<Transaction>, StoreError> {
        let mut txs: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|entry| entry.parent == Some(id))
            .map(|entry| entry.value().clone())
            .collect();
        txs.sort_by_key(|tx| tx.id);
        Ok(txs)
    }

    async fn transition_step(
        &self,
        id: TransactionId,
        expected: Step,
        to: Step,
    ) -> Result<Transaction, StoreError> {
        let mut entry = self.transactions.get_mut(&id).ok_or(StoreError::NotFound)?;
        if entry.step != expected {
            return Err(StoreError::Conflict(format!(
                "step is {}, expected {}",
                entry.step, expected
            )));
        }
        entry.step = to;
        entry.updated_at = Utc::now();
        tracing::debug!(transaction = %id, from = %expected, to = %to, "step transition");
        Ok(entry.clone())
    }

    async fn record_repayment(&self, new: NewRepayment) -> Result<Repayment, StoreError> {
        let id = RepaymentId::new(self.next_repayment_id.fetch_add(1, Ordering::SeqCst));
        let repayment =
            Repayment::from_parts(id, new.service_id, new.amount, new.done_at, Utc::now());
        self.repayments.insert(id, repayment.clone());
        Ok(repayment)
    }

    async fn repayments_for_service(
        &self,
        service_id: ServiceId,
    ) -> Result<Vec<Repayment>, StoreError> {
        let mut repayments: Vec<Repayment> = self
            .repayments
            .iter()
            .filter(|entry| entry.service_id == service_id)
            .map(|entry| entry.value().clone())
            .collect();
        repayments.sort_by_key(|r| r.id);
        Ok(repayments)
    }
}

//! Ledger Application Service
//!
//! Orchestrates domain operations through the store port.
//! Contains NO infrastructure logic - pure business orchestration.

use std::collections::HashSet;
use std::time::Duration;

use ledger_types::{
    Amount, AuthorisationRequest, DomainError, LedgerError, LedgerStore, NewRepayment,
    NewTransaction, PaymentRequest, ProviderError, RefundRequest, Repayment, RepaymentRequest,
    Service, ServiceId, Step, Transaction, TransactionId, TransactionKind, TransactionSummary,
    TransactionView,
};

use crate::registry::ProviderRegistry;

/// How long a provider capability call may block before it is treated
/// like any other provider failure.
const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(5);

/// Application service for ledger operations.
///
/// Generic over `S: LedgerStore` - the adapter is injected at compile time.
/// This enables:
/// - Swapping stores without code changes
/// - Testing with an in-memory store
/// - Compile-time checks for port implementation
pub struct LedgerService<S: LedgerStore> {
    store: S,
    providers: ProviderRegistry,
    provider_timeout: Duration,
}

impl<S: LedgerStore> LedgerService<S> {
    /// Creates a new ledger service with the given store and providers.
    pub fn new(store: S, providers: ProviderRegistry) -> Self {
        Self {
            store,
            providers,
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
        }
    }

    /// Overrides the bound on provider capability calls.
    pub fn with_provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = timeout;
        self
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Service Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Creates a new service.
    pub async fn create_service(&self, name: &str) -> Result<Service, LedgerError> {
        Service::validate_name(name)?;
        self.store
            .create_service(name.to_string())
            .await
            .map_err(Into::into)
    }

    /// Gets a service by ID.
    pub async fn get_service(&self, id: ServiceId) -> Result<Service, LedgerError> {
        self.store
            .get_service(id)
            .await
            .map_err(Into::into)
            .and_then(|opt| opt.ok_or_else(|| LedgerError::NotFound(format!("Service {}", id))))
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Recording Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Records a one-step payment.
    pub async fn record_payment(&self, req: PaymentRequest) -> Result<Transaction, LedgerError> {
        let amount = Amount::from_minor(req.amount)?;
        Self::validate_provider(&req.provider)?;
        self.get_service(req.service_id).await?;

        if let Some(parent_id) = req.parent_id {
            self.checked_parent(req.service_id, parent_id).await?;
        }

        self.store
            .record_transaction(NewTransaction {
                kind: TransactionKind::Immediate,
                service_id: req.service_id,
                amount,
                parent: req.parent_id,
                provider: req.provider,
                client: req.client,
                description: req.description,
                service_data: req.service_data,
                articles: req.articles,
            })
            .await
            .map_err(Into::into)
    }

    /// Places an authorisation hold.
    pub async fn record_authorisation(
        &self,
        req: AuthorisationRequest,
    ) -> Result<Transaction, LedgerError> {
        let amount = Amount::from_minor(req.amount)?;
        Self::validate_provider(&req.provider)?;
        self.get_service(req.service_id).await?;

        if let Some(parent_id) = req.parent_id {
            self.checked_parent(req.service_id, parent_id).await?;
        }

        self.store
            .record_transaction(NewTransaction {
                kind: TransactionKind::Authorisation,
                service_id: req.service_id,
                amount,
                parent: req.parent_id,
                provider: req.provider,
                client: req.client,
                description: req.description,
                service_data: req.service_data,
                articles: req.articles,
            })
            .await
            .map_err(Into::into)
    }

    /// Records a refund against a prior payment.
    ///
    /// The parent must be an Immediate transaction in the same service.
    /// A capture is itself an Immediate child of its authorisation, so
    /// refunds of captures are admitted by the same rule.
    pub async fn record_refund(&self, req: RefundRequest) -> Result<Transaction, LedgerError> {
        let amount = Amount::from_minor(req.amount)?;
        Self::validate_provider(&req.provider)?;
        self.get_service(req.service_id).await?;

        let parent = self.checked_parent(req.service_id, req.parent_id).await?;
        if parent.kind != TransactionKind::Immediate {
            return Err(LedgerError::BadRequest(
                "Refund parent must be an immediate payment".into(),
            ));
        }

        self.store
            .record_transaction(NewTransaction {
                kind: TransactionKind::Refund,
                service_id: req.service_id,
                amount,
                parent: Some(req.parent_id),
                provider: req.provider,
                client: parent.client,
                description: req.description,
                service_data: req.service_data,
                articles: Vec::new(),
            })
            .await
            .map_err(Into::into)
    }

    /// Records a payout to a service.
    pub async fn record_repayment(&self, req: RepaymentRequest) -> Result<Repayment, LedgerError> {
        let amount = Amount::from_minor(req.amount)?;
        self.get_service(req.service_id).await?;

        self.store
            .record_repayment(NewRepayment {
                service_id: req.service_id,
                amount,
                done_at: req.done_at,
            })
            .await
            .map_err(Into::into)
    }

    fn validate_provider(provider: &str) -> Result<(), LedgerError> {
        if provider.trim().is_empty() {
            return Err(LedgerError::BadRequest(
                "Provider identifier cannot be empty".into(),
            ));
        }
        Ok(())
    }

    /// Fetches a parent transaction and checks it belongs to `service_id`.
    async fn checked_parent(
        &self,
        service_id: ServiceId,
        parent_id: TransactionId,
    ) -> Result<Transaction, LedgerError> {
        let parent = self.get_transaction(parent_id).await?;
        if parent.service_id != service_id {
            return Err(DomainError::ParentServiceMismatch.into());
        }
        Ok(parent)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Step Transitions
    // ─────────────────────────────────────────────────────────────────────────────

    /// Moves a transaction to a new lifecycle step.
    ///
    /// The target must be reachable from the current step for the
    /// transaction's variant; illegal transitions are rejected with no
    /// state change. The write itself is conditional on the step read
    /// here, so a racing callback surfaces as a Conflict instead of a
    /// lost update.
    pub async fn apply_step(
        &self,
        id: TransactionId,
        to: Step,
    ) -> Result<Transaction, LedgerError> {
        let tx = self.get_transaction(id).await?;
        tx.step_transition(to)?;
        self.store
            .transition_step(id, tx.step, to)
            .await
            .map_err(Into::into)
    }

    /// Gets a transaction by ID.
    pub async fn get_transaction(&self, id: TransactionId) -> Result<Transaction, LedgerError> {
        self.store
            .get_transaction(id)
            .await
            .map_err(Into::into)
            .and_then(|opt| {
                opt.ok_or_else(|| LedgerError::NotFound(format!("Transaction {}", id)))
            })
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Graph Traversal
    // ─────────────────────────────────────────────────────────────────────────────

    /// Walks the parent chain from `tx` up to its root, nearest first.
    ///
    /// The chain is bounded by a visited set: a corrupted parent
    /// pointer that loops fails with `CyclicTransactionGraph` instead
    /// of spinning.
    pub async fn parent_chain(&self, tx: &Transaction) -> Result<Vec<Transaction>, LedgerError> {
        let mut seen: HashSet<TransactionId> = HashSet::from([tx.id]);
        let mut chain = Vec::new();
        let mut next = tx.parent;
        while let Some(id) = next {
            if !seen.insert(id) {
                return Err(LedgerError::CyclicTransactionGraph(id));
            }
            let parent = self.get_transaction(id).await?;
            next = parent.parent;
            chain.push(parent);
        }
        Ok(chain)
    }

    /// Lists the direct children of a transaction.
    pub async fn children(&self, id: TransactionId) -> Result<Vec<Transaction>, LedgerError> {
        self.store.children_of(id).await.map_err(Into::into)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Derived Fields
    // ─────────────────────────────────────────────────────────────────────────────

    /// Attempts the provider capability call, keeping the failure.
    ///
    /// `Ok(None)` means the transaction has no resolvable provider;
    /// `Err` means the provider was found but the call failed. The call
    /// is time-bounded; a timeout is reported like any other failure.
    pub async fn try_bank_explanation(
        &self,
        tx: &Transaction,
    ) -> Result<Option<String>, ProviderError> {
        let Some(provider) = self.providers.get(&tx.provider) else {
            return Ok(None);
        };
        let report = tokio::time::timeout(self.provider_timeout, provider.humanised_report(tx))
            .await
            .map_err(|_| ProviderError::Timeout)??;
        Ok(Some(report))
    }

    /// Settlement explanation for display.
    ///
    /// Provider failures are absorbed here: the explanation is
    /// supplementary and must never block resolution of the rest of
    /// the transaction.
    pub async fn bank_explanation(&self, tx: &Transaction) -> Option<String> {
        match self.try_bank_explanation(tx).await {
            Ok(report) => report,
            Err(err) => {
                tracing::warn!(
                    transaction = %tx.uuid,
                    provider = %tx.provider,
                    error = %err,
                    "provider settlement report unavailable"
                );
                None
            }
        }
    }

    /// Assembles the full presentation view of a transaction.
    ///
    /// Parent and children come back as restricted summaries
    /// (type, id, amount) to bound nested response size.
    pub async fn transaction_view(
        &self,
        id: TransactionId,
    ) -> Result<TransactionView, LedgerError> {
        let tx = self.get_transaction(id).await?;

        let parent = match tx.parent {
            Some(parent_id) => {
                if parent_id == tx.id {
                    return Err(LedgerError::CyclicTransactionGraph(parent_id));
                }
                Some(TransactionSummary::from(
                    &self.get_transaction(parent_id).await?,
                ))
            }
            None => None,
        };

        let children = self
            .children(tx.id)
            .await?
            .iter()
            .map(TransactionSummary::from)
            .collect();

        let bank_explanation = self.bank_explanation(&tx).await;

        Ok(TransactionView {
            id: tx.id,
            uuid: tx.uuid,
            kind: tx.kind,
            amount: tx.amount.minor_units(),
            step: tx.step,
            is_real: tx.is_real(),
            bank_explanation,
            parent,
            children,
            lastname: tx.client.lastname,
            firstname: tx.client.firstname,
            mail: tx.client.mail,
            description: tx.description,
            service_data: tx.service_data,
            articles: tx.articles,
            created_at: tx.created_at.to_rfc3339(),
            updated_at: tx.updated_at.to_rfc3339(),
            provider: tx.provider,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Balance
    // ─────────────────────────────────────────────────────────────────────────────

    /// Computes the net settled balance ("solde") owed to a service.
    ///
    /// Paid, non-simulated payments and captures count in; settled
    /// repayments count out. Refund rows never enter the sum: a refund
    /// is accounted for on the provider side, and summing it alongside
    /// its parent would credit the service twice.
    ///
    /// Pure read aggregation: same inputs, same output, no side
    /// effects.
    pub async fn balance(&self, service_id: ServiceId) -> Result<i64, LedgerError> {
        self.get_service(service_id).await?;

        let paid: i64 = self
            .store
            .transactions_for_service(service_id)
            .await?
            .iter()
            .filter(|tx| {
                tx.step == Step::Paid && tx.is_real() && tx.kind != TransactionKind::Refund
            })
            .map(|tx| tx.amount.minor_units())
            .sum();

        let repaid: i64 = self
            .store
            .repayments_for_service(service_id)
            .await?
            .iter()
            .filter(|r| r.is_settled())
            .map(|r| r.amount.minor_units())
            .sum();

        Ok(paid - repaid)
    }
}

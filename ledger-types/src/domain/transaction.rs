//! Transaction domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::amount::Amount;
use super::service::ServiceId;
use crate::error::DomainError;

/// Provider identifier marking simulated transactions.
///
/// Traffic recorded under this provider never settles and is excluded
/// from real balance accounting.
pub const DEV_PROVIDER: &str = "Dev";

/// Unique identifier for a Transaction, assigned by the store at creation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TransactionId(i64);

impl TransactionId {
    /// Wraps a raw store-assigned identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier value.
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TransactionId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// The closed set of transaction variants.
///
/// The variant is fixed at creation and a transaction never migrates
/// between variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    /// A completed payment charged in one step.
    Immediate,
    /// A hold that may later be captured or released.
    Authorisation,
    /// A reversal referencing a prior payment as its parent.
    Refund,
}

impl TransactionKind {
    /// The stored discriminant for this variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Immediate => "IMMEDIATE",
            TransactionKind::Authorisation => "AUTHORISATION",
            TransactionKind::Refund => "REFUND",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IMMEDIATE" => Ok(TransactionKind::Immediate),
            "AUTHORISATION" => Ok(TransactionKind::Authorisation),
            "REFUND" => Ok(TransactionKind::Refund),
            other => Err(DomainError::UnknownTransactionVariant(other.to_string())),
        }
    }
}

/// Lifecycle state of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Step {
    /// Initial state, awaiting provider confirmation.
    #[default]
    Pending,
    /// Hold placed, awaiting capture or release. Authorisations only.
    Authorised,
    Paid,
    Failed,
    Cancelled,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Pending => "PENDING",
            Step::Authorised => "AUTHORISED",
            Step::Paid => "PAID",
            Step::Failed => "FAILED",
            Step::Cancelled => "CANCELLED",
        }
    }

    /// Paid, Failed and Cancelled admit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Step::Paid | Step::Failed | Step::Cancelled)
    }

    /// Whether `to` is reachable from this step for the given variant.
    ///
    /// Authorised is only reachable for authorisation holds; a released
    /// hold goes to Cancelled, a captured one to Paid.
    pub fn can_become(&self, kind: TransactionKind, to: Step) -> bool {
        match (self, to) {
            (Step::Pending, Step::Authorised) => kind == TransactionKind::Authorisation,
            (Step::Pending, Step::Paid | Step::Failed | Step::Cancelled) => true,
            (Step::Authorised, Step::Paid | Step::Cancelled) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Step {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Step::Pending),
            "AUTHORISED" => Ok(Step::Authorised),
            "PAID" => Ok(Step::Paid),
            "FAILED" => Ok(Step::Failed),
            "CANCELLED" => Ok(Step::Cancelled),
            other => Err(DomainError::UnknownStep(other.to_string())),
        }
    }
}

/// Client details attached at payment time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Client {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub mail: Option<String>,
}

/// A line item from the cart attached to a transaction.
///
/// The cart is an association carried for display; the transaction
/// does not manage article lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub name: String,
    pub price: Amount,
    pub quantity: u32,
}

/// A financial transaction recorded against a service.
///
/// Transactions are never physically deleted in normal operation -
/// they form the audit trail. Mutation is limited to step transitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier, immutable once assigned
    pub id: TransactionId,
    /// External identifier, safe to hand to third parties
    pub uuid: Uuid,
    /// Variant, fixed at creation
    pub kind: TransactionKind,
    /// Amount in minor units; for refunds, the refunded amount
    pub amount: Amount,
    /// Owning service
    pub service_id: ServiceId,
    /// Parent transaction, e.g. the payment a refund reverses
    pub parent: Option<TransactionId>,
    /// Current lifecycle state
    pub step: Step,
    /// Payment provider integration that created the transaction
    pub provider: String,
    /// Client details
    pub client: Client,
    pub description: Option<String>,
    /// Opaque tag supplied by the originating service request
    pub service_data: Option<String>,
    /// Cart line items
    pub articles: Vec<Article>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Reconstructs a transaction from stored fields.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: TransactionId,
        uuid: Uuid,
        kind: TransactionKind,
        amount: Amount,
        service_id: ServiceId,
        parent: Option<TransactionId>,
        step: Step,
        provider: String,
        client: Client,
        description: Option<String>,
        service_data: Option<String>,
        articles: Vec<Article>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            uuid,
            kind,
            amount,
            service_id,
            parent,
            step,
            provider,
            client,
            description,
            service_data,
            articles,
            created_at,
            updated_at,
        }
    }

    /// Simulated transactions are recorded under the "Dev" provider.
    pub fn is_real(&self) -> bool {
        self.provider != DEV_PROVIDER
    }

    /// Validates that `to` is reachable from the current step.
    pub fn step_transition(&self, to: Step) -> Result<Step, DomainError> {
        if self.step.can_become(self.kind, to) {
            Ok(to)
        } else {
            Err(DomainError::InvalidStepTransition {
                from: self.step,
                to,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transaction(kind: TransactionKind, step: Step, provider: &str) -> Transaction {
        Transaction::from_parts(
            TransactionId::new(1),
            Uuid::new_v4(),
            kind,
            Amount::from_minor(1000).unwrap(),
            ServiceId::new(1),
            None,
            step,
            provider.to_string(),
            Client::default(),
            None,
            None,
            Vec::new(),
            Utc::now(),
            Utc::now(),
        )
    }

    #[test]
    fn test_kind_roundtrip() {
        for kind in [
            TransactionKind::Immediate,
            TransactionKind::Authorisation,
            TransactionKind::Refund,
        ] {
            assert_eq!(kind.as_str().parse::<TransactionKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_kind_is_an_error() {
        let result = "GIFT_CARD".parse::<TransactionKind>();
        assert!(matches!(
            result,
            Err(DomainError::UnknownTransactionVariant(s)) if s == "GIFT_CARD"
        ));
    }

    #[test]
    fn test_unknown_step_is_an_error() {
        assert!(matches!(
            "SHIPPED".parse::<Step>(),
            Err(DomainError::UnknownStep(_))
        ));
    }

    #[test]
    fn test_pending_reaches_terminal_steps() {
        let tx = transaction(TransactionKind::Immediate, Step::Pending, "Stripe");
        assert!(tx.step_transition(Step::Paid).is_ok());
        assert!(tx.step_transition(Step::Failed).is_ok());
        assert!(tx.step_transition(Step::Cancelled).is_ok());
    }

    #[test]
    fn test_terminal_steps_are_final() {
        for step in [Step::Paid, Step::Failed, Step::Cancelled] {
            let tx = transaction(TransactionKind::Immediate, step, "Stripe");
            assert!(step.is_terminal());
            assert!(matches!(
                tx.step_transition(Step::Pending),
                Err(DomainError::InvalidStepTransition { .. })
            ));
        }
    }

    #[test]
    fn test_authorised_only_for_authorisations() {
        let payment = transaction(TransactionKind::Immediate, Step::Pending, "Stripe");
        assert!(matches!(
            payment.step_transition(Step::Authorised),
            Err(DomainError::InvalidStepTransition { .. })
        ));

        let hold = transaction(TransactionKind::Authorisation, Step::Pending, "Stripe");
        assert!(hold.step_transition(Step::Authorised).is_ok());
    }

    #[test]
    fn test_authorised_captures_or_releases() {
        let hold = transaction(TransactionKind::Authorisation, Step::Authorised, "Stripe");
        assert!(hold.step_transition(Step::Paid).is_ok());
        assert!(hold.step_transition(Step::Cancelled).is_ok());
        assert!(matches!(
            hold.step_transition(Step::Failed),
            Err(DomainError::InvalidStepTransition { .. })
        ));
    }

    #[test]
    fn test_is_real() {
        assert!(transaction(TransactionKind::Immediate, Step::Paid, "Stripe").is_real());
        assert!(!transaction(TransactionKind::Immediate, Step::Paid, DEV_PROVIDER).is_real());
    }
}

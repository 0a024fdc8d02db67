//! Data Transfer Objects (DTOs) for requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    Amount, Article, Client, ServiceId, Step, Transaction, TransactionId, TransactionKind,
};

// ─────────────────────────────────────────────────────────────────────────────
// Recording DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to record a one-step payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Owning service
    pub service_id: ServiceId,
    /// Amount in minor currency units
    pub amount: i64,
    /// Provider integration the payment goes through
    pub provider: String,
    /// Parent transaction; set when this payment is the capture of an
    /// authorisation hold
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<TransactionId>,
    #[serde(default)]
    pub client: Client,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Opaque tag from the originating service request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_data: Option<String>,
    #[serde(default)]
    pub articles: Vec<Article>,
}

/// Request to place an authorisation hold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorisationRequest {
    pub service_id: ServiceId,
    /// Amount to hold, in minor currency units
    pub amount: i64,
    pub provider: String,
    /// Optional parent transaction in the same service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<TransactionId>,
    #[serde(default)]
    pub client: Client,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_data: Option<String>,
    #[serde(default)]
    pub articles: Vec<Article>,
}

/// Request to record a refund against a prior payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefundRequest {
    pub service_id: ServiceId,
    /// The payment being reversed
    pub parent_id: TransactionId,
    /// Refunded amount, in minor currency units
    pub amount: i64,
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_data: Option<String>,
}

/// Request to record a payout to a service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepaymentRequest {
    pub service_id: ServiceId,
    /// Amount in minor currency units
    pub amount: i64,
    /// When the payout was executed; leave unset for a scheduled payout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done_at: Option<DateTime<Utc>>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Store payloads (validated by the application service)
// ─────────────────────────────────────────────────────────────────────────────

/// Validated transaction payload handed to the store.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub service_id: ServiceId,
    pub amount: Amount,
    pub parent: Option<TransactionId>,
    pub provider: String,
    pub client: Client,
    pub description: Option<String>,
    pub service_data: Option<String>,
    pub articles: Vec<Article>,
}

/// Validated repayment payload handed to the store.
#[derive(Debug, Clone)]
pub struct NewRepayment {
    pub service_id: ServiceId,
    pub amount: Amount,
    pub done_at: Option<DateTime<Utc>>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Presentation DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Restricted field subset guaranteed populated for nested traversal
/// results (parent and children display). Full detail is deliberately
/// not carried here to bound response size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionSummary {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub id: TransactionId,
    /// Amount in minor currency units
    pub amount: i64,
}

impl From<&Transaction> for TransactionSummary {
    fn from(tx: &Transaction) -> Self {
        Self {
            kind: tx.kind,
            id: tx.id,
            amount: tx.amount.minor_units(),
        }
    }
}

/// Fully resolved transaction for the query layer.
///
/// Plain data only; timestamps are rendered in their canonical RFC 3339
/// string form regardless of storage representation.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionView {
    pub id: TransactionId,
    pub uuid: Uuid,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: i64,
    pub step: Step,
    pub provider: String,
    /// False for simulated ("Dev") traffic
    pub is_real: bool,
    /// Humanised settlement report; absent whenever the provider could
    /// not supply one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<TransactionSummary>,
    pub children: Vec<TransactionSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_data: Option<String>,
    pub articles: Vec<Article>,
    pub created_at: String,
    pub updated_at: String,
}

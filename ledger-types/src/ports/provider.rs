//! Payment provider capability port.
//!
//! Every transaction was created by a provider integration; this port
//! lets the ledger ask that integration how the money settled.
//! Implementations can be HTTP clients, SDK wrappers, or the simulated
//! dev provider.

use crate::domain::Transaction;

/// Error type for provider capability calls.
///
/// Network and integration failures are expected here. Callers absorb
/// them into an absent explanation instead of propagating; the
/// settlement explanation is supplementary, never blocking.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Connection failure: {0}")]
    Connection(String),

    #[error("Provider call timed out")]
    Timeout,

    #[error("Malformed provider response: {0}")]
    InvalidResponse(String),
}

/// Port trait for payment provider integrations.
#[async_trait::async_trait]
pub trait PaymentProvider: Send + Sync {
    /// The provider identifier stored on transactions it creates.
    fn name(&self) -> &str;

    /// Produces a human-readable settlement explanation for `tx`.
    async fn humanised_report(&self, tx: &Transaction) -> Result<String, ProviderError>;
}

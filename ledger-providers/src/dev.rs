//! Simulated provider for dev-mode traffic.

use async_trait::async_trait;

use ledger_types::{DEV_PROVIDER, PaymentProvider, ProviderError, Transaction};

/// Provider backing simulated transactions.
///
/// Transactions it creates are excluded from real balance accounting,
/// but they still resolve a settlement explanation so integrating
/// services can exercise the full display path.
pub struct DevProvider;

#[async_trait]
impl PaymentProvider for DevProvider {
    fn name(&self) -> &str {
        DEV_PROVIDER
    }

    async fn humanised_report(&self, tx: &Transaction) -> Result<String, ProviderError> {
        Ok(format!(
            "Simulated transaction {}: {} held in dev mode, no funds were moved.",
            tx.uuid, tx.amount
        ))
    }
}

//! Generic HTTP report client.
//!
//! Talks to a provider's settlement report endpoint. Any transport or
//! decoding failure maps onto `ProviderError`; the ledger core decides
//! whether to absorb it.

use std::env;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use ledger_types::{PaymentProvider, ProviderError, Transaction};

const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Settings for one provider's report endpoint.
#[derive(Debug, Clone)]
pub struct HttpProviderConfig {
    /// Identifier stored on transactions created by this provider
    pub name: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl HttpProviderConfig {
    /// Loads endpoint settings from environment variables.
    ///
    /// Reads `{NAME}_REPORT_URL` (required) and `{NAME}_REPORT_TIMEOUT_MS`
    /// (defaults to 5000).
    pub fn from_env(name: &str) -> anyhow::Result<Self> {
        let prefix = name.to_uppercase();

        let base_url = env::var(format!("{}_REPORT_URL", prefix)).map_err(|_| {
            anyhow::anyhow!("{}_REPORT_URL environment variable is required", prefix)
        })?;

        let timeout_ms = match env::var(format!("{}_REPORT_TIMEOUT_MS", prefix)) {
            Ok(raw) => raw.parse()?,
            Err(_) => DEFAULT_TIMEOUT_MS,
        };

        Ok(Self {
            name: name.to_string(),
            base_url,
            timeout: Duration::from_millis(timeout_ms),
        })
    }
}

/// Report payload returned by provider endpoints.
#[derive(Debug, Deserialize)]
struct ReportBody {
    message: String,
}

/// `PaymentProvider` adapter over a provider's HTTP report endpoint.
pub struct HttpProvider {
    name: String,
    base_url: String,
    http: Client,
}

impl HttpProvider {
    pub fn new(config: HttpProviderConfig) -> anyhow::Result<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            name: config.name,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }
}

#[async_trait::async_trait]
impl PaymentProvider for HttpProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn humanised_report(&self, tx: &Transaction) -> Result<String, ProviderError> {
        let url = format!("{}/transactions/{}/report", self.base_url, tx.uuid);

        let response = self.http.get(&url).send().await.map_err(|err| {
            if err.is_timeout() {
                ProviderError::Timeout
            } else {
                ProviderError::Connection(err.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::InvalidResponse(format!(
                "unexpected status {}",
                status
            )));
        }

        let body: ReportBody = response
            .json()
            .await
            .map_err(|err| ProviderError::InvalidResponse(err.to_string()))?;

        tracing::debug!(provider = %self.name, transaction = %tx.uuid, "settlement report fetched");
        Ok(body.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // Var names are unique to this test to avoid cross-test races.
        unsafe {
            env::set_var("ACMEPAY_REPORT_URL", "https://acmepay.example/api/");
            env::set_var("ACMEPAY_REPORT_TIMEOUT_MS", "250");
        }

        let config = HttpProviderConfig::from_env("AcmePay").unwrap();

        assert_eq!(config.name, "AcmePay");
        assert_eq!(config.base_url, "https://acmepay.example/api/");
        assert_eq!(config.timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_config_requires_url() {
        let result = HttpProviderConfig::from_env("MissingPay");
        assert!(result.is_err());
    }

    #[test]
    fn test_base_url_is_normalised() {
        let provider = HttpProvider::new(HttpProviderConfig {
            name: "AcmePay".to_string(),
            base_url: "https://acmepay.example/api/".to_string(),
            timeout: Duration::from_millis(250),
        })
        .unwrap();

        assert_eq!(provider.base_url, "https://acmepay.example/api");
        assert_eq!(provider.name(), "AcmePay");
    }
}

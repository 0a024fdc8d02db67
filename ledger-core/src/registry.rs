//! Provider registry.
//!
//! Maps the provider identifier stored on a transaction to the
//! integration that created it. Registration is explicit, so the set
//! of resolvable providers is fixed at wiring time; a transaction
//! whose identifier matches nothing simply has no resolvable provider.

use std::collections::HashMap;
use std::sync::Arc;

use ledger_types::PaymentProvider;

/// Registry of provider integrations keyed by their identifier.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn PaymentProvider>>,
}

impl ProviderRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider under its own name.
    pub fn register(mut self, provider: Arc<dyn PaymentProvider>) -> Self {
        self.providers
            .insert(provider.name().to_string(), provider);
        self
    }

    /// Looks up the provider for an identifier.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn PaymentProvider>> {
        self.providers.get(name)
    }

    /// Number of registered providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

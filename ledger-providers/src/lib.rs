//! # Ledger Providers
//!
//! Payment provider adapters implementing the `PaymentProvider` port:
//! the simulated dev provider and a generic HTTP report client.
//! Provider-specific settlement logic stays behind each integration;
//! the ledger only ever sees the port.

pub mod dev;
pub mod http;

pub use dev::DevProvider;
pub use http::{HttpProvider, HttpProviderConfig};

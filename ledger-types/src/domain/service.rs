//! Service (merchant account) and repayment models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::amount::Amount;
use crate::error::DomainError;

/// Unique identifier for a Service, assigned by the store at creation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ServiceId(i64);

impl ServiceId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ServiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ServiceId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Unique identifier for a Repayment.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RepaymentId(i64);

impl RepaymentId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for RepaymentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A merchant account that transactions are recorded against.
///
/// Services are administered externally; the ledger only reads them
/// for ownership checks and aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    /// Human-readable service name
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Service {
    /// Creates a service with all fields specified (for store reconstruction).
    pub fn from_parts(id: ServiceId, name: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            created_at,
        }
    }

    /// Validates a service name.
    pub fn validate_name(name: &str) -> Result<(), DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "Service name cannot be empty".into(),
            ));
        }
        Ok(())
    }
}

/// A payout from the platform to a service.
///
/// Only repayments with `done_at` set have actually been paid out;
/// a pending repayment does not reduce the balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repayment {
    pub id: RepaymentId,
    pub service_id: ServiceId,
    pub amount: Amount,
    /// When the payout was executed, if it has been
    pub done_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Repayment {
    pub fn from_parts(
        id: RepaymentId,
        service_id: ServiceId,
        amount: Amount,
        done_at: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            service_id,
            amount,
            done_at,
            created_at,
        }
    }

    /// Whether the payout has been executed.
    pub fn is_settled(&self) -> bool {
        self.done_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_name_fails() {
        assert!(matches!(
            Service::validate_name("   "),
            Err(DomainError::ValidationError(_))
        ));
        assert!(Service::validate_name("BDE Cafeteria").is_ok());
    }

    #[test]
    fn test_repayment_settlement() {
        let pending = Repayment::from_parts(
            RepaymentId::new(1),
            ServiceId::new(1),
            Amount::from_minor(200).unwrap(),
            None,
            Utc::now(),
        );
        assert!(!pending.is_settled());

        let settled = Repayment::from_parts(
            RepaymentId::new(2),
            ServiceId::new(1),
            Amount::from_minor(200).unwrap(),
            Some(Utc::now()),
            Utc::now(),
        );
        assert!(settled.is_settled());
    }
}

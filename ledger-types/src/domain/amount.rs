//! Monetary amounts in minor currency units.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// A monetary amount expressed in minor currency units (centimes).
///
/// Amounts are stored as integers to avoid floating-point precision
/// issues. A stored amount is never negative: refunds and repayments
/// are debits by construction, not by sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    /// Creates an Amount from minor units.
    pub fn from_minor(minor: i64) -> Result<Self, DomainError> {
        if minor < 0 {
            return Err(DomainError::NegativeAmount);
        }
        Ok(Self(minor))
    }

    /// The zero amount.
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Returns the amount in minor units.
    pub const fn minor_units(&self) -> i64 {
        self.0
    }

    /// Checked addition.
    pub fn checked_add(&self, other: Amount) -> Result<Amount, DomainError> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(DomainError::AmountOverflow)
    }

    /// Checked subtraction - fails if the result would be negative.
    pub fn checked_sub(&self, other: Amount) -> Result<Amount, DomainError> {
        if self.0 < other.0 {
            return Err(DomainError::NegativeAmount);
        }
        Ok(Self(self.0 - other.0))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let major = self.0 / 100;
        let minor = self.0 % 100;
        write!(f, "{}.{:02}", major, minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_creation() {
        let amount = Amount::from_minor(1000).unwrap();
        assert_eq!(amount.minor_units(), 1000);
    }

    #[test]
    fn test_negative_amount_fails() {
        let result = Amount::from_minor(-100);
        assert!(matches!(result, Err(DomainError::NegativeAmount)));
    }

    #[test]
    fn test_amount_addition() {
        let a = Amount::from_minor(100).unwrap();
        let b = Amount::from_minor(50).unwrap();
        assert_eq!(a.checked_add(b).unwrap().minor_units(), 150);
    }

    #[test]
    fn test_amount_addition_overflow() {
        let a = Amount::from_minor(i64::MAX).unwrap();
        let b = Amount::from_minor(1).unwrap();
        assert!(matches!(a.checked_add(b), Err(DomainError::AmountOverflow)));
    }

    #[test]
    fn test_amount_subtraction_underflow() {
        let a = Amount::from_minor(100).unwrap();
        let b = Amount::from_minor(200).unwrap();
        assert!(matches!(a.checked_sub(b), Err(DomainError::NegativeAmount)));
    }

    #[test]
    fn test_amount_display() {
        let amount = Amount::from_minor(1050).unwrap();
        assert_eq!(format!("{}", amount), "10.50");
    }
}

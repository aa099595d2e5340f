//! Payment type model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::{validate_name, NameValidationError};
use super::ids::PaymentTypeId;

pub const SEED_PAYMENT_TYPES: [(&str, bool); 4] = [
    ("Cash", true),
    ("Card", true),
    ("UPI", false),
    ("Net Banking", false),
];

/// How a transaction was paid (cash, card, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentType {
    pub id: PaymentTypeId,
    pub name: String,
    #[serde(default)]
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
}

impl PaymentType {
    pub fn new(name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: PaymentTypeId::new(),
            name: name.into(),
            is_default: false,
            created_at,
        }
    }

    pub fn seeds(created_at: DateTime<Utc>) -> Vec<Self> {
        SEED_PAYMENT_TYPES
            .iter()
            .map(|(name, is_default)| Self {
                is_default: *is_default,
                ..Self::new(*name, created_at)
            })
            .collect()
    }

    pub fn validate(&self) -> Result<(), NameValidationError> {
        validate_name(&self.name)
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeds() {
        let seeds = PaymentType::seeds(Utc::now());
        assert_eq!(seeds.len(), 4);
        assert_eq!(seeds[3].name, "Net Banking");
        assert!(seeds[0].is_default);
        assert!(!seeds[2].is_default);
    }

    #[test]
    fn test_validate() {
        assert!(PaymentType::new("Wallet", Utc::now()).validate().is_ok());
        assert!(PaymentType::new("", Utc::now()).validate().is_err());
    }
}

//! Payment type catalog

use chrono::{DateTime, Utc};

use crate::models::{category::validate_name, NameValidationError, PaymentType, PaymentTypeId};

use super::catalog::{CatalogEntry, CatalogRepository};
use super::transactions::TransactionRepository;

/// Repository of payment types
pub type PaymentTypeRepository = CatalogRepository<PaymentType>;

impl CatalogEntry for PaymentType {
    type Id = PaymentTypeId;

    const KIND: &'static str = "Payment type";

    fn create(name: String, created_at: DateTime<Utc>) -> Self {
        PaymentType::new(name, created_at)
    }

    fn seeds(created_at: DateTime<Utc>) -> Vec<Self> {
        PaymentType::seeds(created_at)
    }

    fn id(&self) -> PaymentTypeId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn renamed(&self, name: String) -> Self {
        Self {
            name,
            ..self.clone()
        }
    }

    fn validate(&self) -> Result<(), NameValidationError> {
        validate_name(&self.name)
    }

    fn id_matches(&self, reference: &str) -> bool {
        self.id.matches(reference)
    }

    fn usage(transactions: &TransactionRepository, name: &str) -> usize {
        transactions.payment_type_usage(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;
    use std::sync::Arc;

    #[test]
    fn test_seeded_and_find_by_short_id() {
        let clock = Arc::new(SystemClock);
        let transactions = Arc::new(TransactionRepository::new(clock.clone()));
        let repo = PaymentTypeRepository::new(clock, transactions, true);

        let names: Vec<_> = repo.list().into_iter().map(|p| p.name).collect();
        assert_eq!(names, ["Cash", "Card", "UPI", "Net Banking"]);

        let upi = repo.find("upi").unwrap();
        assert_eq!(repo.find(&upi.id.to_string()).unwrap().name, "UPI");
        assert!(!repo.is_in_use("UPI"));

        let err = repo.find("Cheque").unwrap_err();
        assert_eq!(err.to_string(), "Payment type not found: Cheque");
    }
}

//! Category catalog
//!
//! Seeded with Food, Travel, Shopping, Bills and Entertainment unless the
//! config disables the default catalog.

use chrono::{DateTime, Utc};

use crate::models::{category::validate_name, Category, CategoryId, NameValidationError};

use super::catalog::{CatalogEntry, CatalogRepository};
use super::transactions::TransactionRepository;

/// Repository of transaction categories
pub type CategoryRepository = CatalogRepository<Category>;

impl CatalogEntry for Category {
    type Id = CategoryId;

    const KIND: &'static str = "Category";

    fn create(name: String, created_at: DateTime<Utc>) -> Self {
        Category::new(name, created_at)
    }

    fn seeds(created_at: DateTime<Utc>) -> Vec<Self> {
        Category::seeds(created_at)
    }

    fn id(&self) -> CategoryId {
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
        transactions.category_usage(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::models::{Money, TransactionDraft, TransactionType};
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn setup(seed: bool) -> (Arc<TransactionRepository>, CategoryRepository) {
        let clock = Arc::new(FixedClock::new(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()));
        let transactions = Arc::new(TransactionRepository::new(clock.clone()));
        let categories = CategoryRepository::new(clock, Arc::clone(&transactions), seed);
        (transactions, categories)
    }

    #[test]
    fn test_seeded_catalog() {
        let (_, repo) = setup(true);
        let names: Vec<_> = repo.list().into_iter().map(|c| c.name).collect();
        assert_eq!(names, ["Food", "Travel", "Shopping", "Bills", "Entertainment"]);

        let (_, empty) = setup(false);
        assert!(empty.list().is_empty());
    }

    #[test]
    fn test_add_rename_delete() {
        let (_, repo) = setup(false);
        let added = repo.add("  Groceries ").unwrap();
        assert_eq!(added.name, "Groceries");
        assert!(!added.is_default);

        let renamed = repo.update(added.id, "Supermarket").unwrap();
        assert_eq!(renamed.id, added.id);
        assert_eq!(repo.list()[0].name, "Supermarket");

        repo.delete(added.id).unwrap();
        assert!(repo.list().is_empty());
    }

    #[test]
    fn test_invalid_names_rejected() {
        let (_, repo) = setup(true);
        assert!(repo.add("   ").unwrap_err().is_validation());

        let food = repo.find("food").unwrap();
        assert!(repo.update(food.id, "").unwrap_err().is_validation());
        assert_eq!(repo.find("Food").unwrap().name, "Food");
    }

    #[test]
    fn test_unknown_id_not_found() {
        let (_, repo) = setup(false);
        let err = repo.delete(CategoryId::new()).unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().starts_with("Category not found"));
        assert!(repo.update(CategoryId::new(), "x").unwrap_err().is_not_found());
    }

    #[test]
    fn test_in_use_consults_transactions() {
        let (transactions, repo) = setup(true);
        assert!(!repo.is_in_use("Food"));

        transactions
            .add(TransactionDraft {
                kind: TransactionType::Expense,
                amount: Money::from_cents(100),
                category: "Food".into(),
                payment_type: "Cash".into(),
                note: String::new(),
                date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            })
            .unwrap();
        assert!(repo.is_in_use("Food"));
        assert!(!repo.is_in_use("Travel"));
    }

    #[test]
    fn test_duplicate_names_allowed() {
        let (_, repo) = setup(true);
        repo.add("Food").unwrap();
        assert_eq!(repo.list().iter().filter(|c| c.name == "Food").count(), 2);
    }
}

//! Category model
//!
//! Categories label what a transaction was for. Transactions refer to them by
//! name; the id is only used to address a catalog entry for rename/delete.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;

/// Maximum length of a category or payment type name
pub const MAX_NAME_LENGTH: usize = 50;

/// Names seeded into a fresh catalog, with their default flag
pub const SEED_CATEGORIES: [(&str, bool); 5] = [
    ("Food", true),
    ("Travel", true),
    ("Shopping", false),
    ("Bills", false),
    ("Entertainment", false),
];

/// A transaction category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Seeded entries are flagged as default
    #[serde(default)]
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Create a new user category
    pub fn new(name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            is_default: false,
            created_at,
        }
    }

    /// The seed catalog
    pub fn seeds(created_at: DateTime<Utc>) -> Vec<Self> {
        SEED_CATEGORIES
            .iter()
            .map(|(name, is_default)| Self {
                is_default: *is_default,
                ..Self::new(*name, created_at)
            })
            .collect()
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), NameValidationError> {
        validate_name(&self.name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Check a catalog entry name: non-empty after trimming, bounded length
pub fn validate_name(name: &str) -> Result<(), NameValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(NameValidationError::EmptyName);
    }
    let len = trimmed.chars().count();
    if len > MAX_NAME_LENGTH {
        return Err(NameValidationError::NameTooLong(len));
    }
    Ok(())
}

/// Validation errors for category and payment type names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for NameValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Name cannot be empty"),
            Self::NameTooLong(len) => write!(
                f,
                "Name too long ({} characters, max {})",
                len, MAX_NAME_LENGTH
            ),
        }
    }
}

impl std::error::Error for NameValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category() {
        let category = Category::new("Groceries", Utc::now());
        assert_eq!(category.name, "Groceries");
        assert!(!category.is_default);
        assert!(category.validate().is_ok());
    }

    #[test]
    fn test_seeds() {
        let seeds = Category::seeds(Utc::now());
        let names: Vec<_> = seeds.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Food", "Travel", "Shopping", "Bills", "Entertainment"]);
        assert!(seeds[0].is_default && seeds[1].is_default);
        assert!(!seeds[2].is_default);
    }

    #[test]
    fn test_name_validation() {
        assert_eq!(validate_name("   "), Err(NameValidationError::EmptyName));
        assert_eq!(
            validate_name(&"a".repeat(51)),
            Err(NameValidationError::NameTooLong(51))
        );
        assert!(validate_name(&"a".repeat(50)).is_ok());
    }
}

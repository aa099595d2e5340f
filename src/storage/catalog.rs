//! Shared repository for named catalogs (categories, payment types)
//!
//! Both catalogs are a list of named entries that transactions reference by
//! name. An entry is "in use" while any transaction names it.

use std::fmt::Display;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::clock::Clock;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::NameValidationError;

use super::snapshot::{Observable, Stream};
use super::transactions::TransactionRepository;

/// An entry in a named catalog
pub trait CatalogEntry: Clone + Send + Sync + 'static {
    type Id: Copy + Eq + Display + Send + Sync + 'static;

    /// Entity name used in not-found errors
    const KIND: &'static str;

    fn create(name: String, created_at: DateTime<Utc>) -> Self;
    fn seeds(created_at: DateTime<Utc>) -> Vec<Self>;
    fn id(&self) -> Self::Id;
    fn name(&self) -> &str;
    fn renamed(&self, name: String) -> Self;
    fn validate(&self) -> Result<(), NameValidationError>;
    fn id_matches(&self, reference: &str) -> bool;

    /// How many transactions reference `name`
    fn usage(transactions: &TransactionRepository, name: &str) -> usize;
}

/// In-memory catalog of entries
pub struct CatalogRepository<T: CatalogEntry> {
    clock: Arc<dyn Clock>,
    transactions: Arc<TransactionRepository>,
    entries: Observable<Vec<T>>,
}

impl<T: CatalogEntry> CatalogRepository<T> {
    /// Create a catalog, optionally seeded with the default entries
    pub fn new(clock: Arc<dyn Clock>, transactions: Arc<TransactionRepository>, seed: bool) -> Self {
        let initial = if seed { T::seeds(clock.now()) } else { Vec::new() };
        Self {
            clock,
            transactions,
            entries: Observable::new(initial),
        }
    }

    /// Stream of the catalog, in insertion order
    pub fn stream(&self) -> Stream<Vec<T>> {
        self.entries.stream()
    }

    pub fn list(&self) -> Vec<T> {
        self.entries.get()
    }

    /// Add an entry named `name` (trimmed)
    pub fn add(&self, name: &str) -> ExpenseResult<T> {
        let entry = T::create(name.trim().to_string(), self.clock.now());
        entry
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        let added = entry.clone();
        self.entries.update(move |current| {
            let mut next = current.clone();
            next.push(entry);
            next
        });
        debug!(kind = T::KIND, name = added.name(), "catalog entry added");
        Ok(added)
    }

    /// Rename the entry with `id`
    pub fn update(&self, id: T::Id, name: &str) -> ExpenseResult<T> {
        let name = name.trim().to_string();
        let updated = self.entries.try_update(|current| {
            let existing = current
                .iter()
                .find(|e| e.id() == id)
                .ok_or_else(|| not_found::<T>(id))?;
            let renamed = existing.renamed(name);
            renamed
                .validate()
                .map_err(|e| ExpenseError::Validation(e.to_string()))?;
            let next = current
                .iter()
                .map(|e| if e.id() == id { renamed.clone() } else { e.clone() })
                .collect();
            Ok((next, renamed))
        })?;
        debug!(kind = T::KIND, id = %id, name = updated.name(), "catalog entry renamed");
        Ok(updated)
    }

    /// Remove the entry with `id`, returning it
    pub fn delete(&self, id: T::Id) -> ExpenseResult<T> {
        let removed = self.entries.try_update(|current| {
            let removed = current
                .iter()
                .find(|e| e.id() == id)
                .cloned()
                .ok_or_else(|| not_found::<T>(id))?;
            let next = current.iter().filter(|e| e.id() != id).cloned().collect();
            Ok((next, removed))
        })?;
        debug!(kind = T::KIND, id = %id, "catalog entry deleted");
        Ok(removed)
    }

    /// Whether any transaction references `name`
    pub fn is_in_use(&self, name: &str) -> bool {
        T::usage(&self.transactions, name) > 0
    }

    /// Resolve an entry by id (full or short) or by name, ignoring case
    pub fn find(&self, reference: &str) -> ExpenseResult<T> {
        let reference = reference.trim();
        self.entries
            .read(|list| {
                list.iter()
                    .find(|e| e.id_matches(reference))
                    .or_else(|| list.iter().find(|e| e.name().eq_ignore_ascii_case(reference)))
                    .cloned()
            })
            .ok_or_else(|| ExpenseError::NotFound {
                entity_type: T::KIND,
                identifier: reference.to_string(),
            })
    }
}

fn not_found<T: CatalogEntry>(id: T::Id) -> ExpenseError {
    ExpenseError::NotFound {
        entity_type: T::KIND,
        identifier: id.to_string(),
    }
}

//! Storage layer for the expense tracker
//!
//! All repositories are in-memory. Each holds one current snapshot in an
//! [`Observable`] and hands out [`Stream`]s over it; every write replaces the
//! snapshot with a new copy. Data lives as long as the [`Storage`] does.

pub mod auth;
pub mod catalog;
pub mod categories;
pub mod file_io;
pub mod payment_types;
pub mod settings;
pub mod snapshot;
pub mod transactions;

pub use auth::AuthRepository;
pub use catalog::{CatalogEntry, CatalogRepository};
pub use categories::CategoryRepository;
pub use file_io::{read_json, write_atomic, write_json_atomic};
pub use payment_types::PaymentTypeRepository;
pub use settings::SettingsRepository;
pub use snapshot::{Observable, Stream};
pub use transactions::{newest_first, TransactionQuery, TransactionRepository, TransactionStream};

use std::sync::Arc;

use crate::clock::Clock;
use crate::models::UserSettings;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    clock: Arc<dyn Clock>,
    pub transactions: Arc<TransactionRepository>,
    pub categories: CategoryRepository,
    pub payment_types: PaymentTypeRepository,
    pub settings: SettingsRepository,
    pub auth: AuthRepository,
}

impl Storage {
    /// Create empty in-memory storage
    ///
    /// `seed_catalog` controls whether the default categories and payment
    /// types are present from the start.
    pub fn in_memory(clock: Arc<dyn Clock>, settings: UserSettings, seed_catalog: bool) -> Self {
        let transactions = Arc::new(TransactionRepository::new(Arc::clone(&clock)));
        Self {
            categories: CategoryRepository::new(
                Arc::clone(&clock),
                Arc::clone(&transactions),
                seed_catalog,
            ),
            payment_types: PaymentTypeRepository::new(
                Arc::clone(&clock),
                Arc::clone(&transactions),
                seed_catalog,
            ),
            settings: SettingsRepository::new(settings),
            auth: AuthRepository::new(),
            transactions,
            clock,
        }
    }

    /// The time source shared by every repository
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }
}

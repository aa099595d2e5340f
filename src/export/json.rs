//! JSON Export functionality
//!
//! Snapshots the whole session (settings, profile, catalogs, transactions)
//! with schema versioning and summary metadata.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, PaymentType, Transaction, UserProfile, UserSettings};
use crate::services::Summary;
use crate::storage::{newest_first, Storage};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full session export structure
#[derive(Debug, Clone, Serialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub profile: Option<UserProfile>,

    pub settings: UserSettings,

    pub categories: Vec<Category>,

    pub payment_types: Vec<PaymentType>,

    /// Newest recorded first
    pub transactions: Vec<Transaction>,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize)]
pub struct ExportMetadata {
    pub transaction_count: usize,
    pub category_count: usize,
    pub payment_type_count: usize,

    /// Income and expense over every transaction
    pub totals: Summary,

    /// Date range of transactions (earliest)
    pub earliest_transaction: Option<String>,

    /// Date range of transactions (latest)
    pub latest_transaction: Option<String>,
}

impl FullExport {
    /// Snapshot the current contents of `storage`
    pub fn from_storage(storage: &Storage) -> Self {
        let transactions = newest_first(storage.transactions.all());
        let categories = storage.categories.list();
        let payment_types = storage.payment_types.list();

        let metadata = ExportMetadata {
            transaction_count: transactions.len(),
            category_count: categories.len(),
            payment_type_count: payment_types.len(),
            totals: Summary::of(&transactions),
            earliest_transaction: transactions.iter().map(|t| t.date).min().map(|d| d.to_string()),
            latest_transaction: transactions.iter().map(|t| t.date).max().map(|d| d.to_string()),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: storage.clock().now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            profile: storage.auth.user(),
            settings: storage.settings.current(),
            categories,
            payment_types,
            transactions,
            metadata,
        }
    }
}

/// Export the full session to pretty-printed JSON
pub fn export_full_json<W: Write>(storage: &Storage, writer: W) -> ExpenseResult<usize> {
    let export = FullExport::from_storage(storage);
    serde_json::to_writer_pretty(writer, &export)
        .map_err(|e| ExpenseError::Export(e.to_string()))?;
    Ok(export.metadata.transaction_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::models::{Money, TransactionDraft, TransactionType};
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn storage() -> Storage {
        Storage::in_memory(
            Arc::new(FixedClock::new(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())),
            UserSettings::default(),
            true,
        )
    }

    fn record(storage: &Storage, kind: TransactionType, cents: i64, day: u32) {
        storage
            .transactions
            .add(TransactionDraft {
                kind,
                amount: Money::from_cents(cents),
                category: "Food".into(),
                payment_type: "Cash".into(),
                note: String::new(),
                date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            })
            .unwrap();
    }

    #[test]
    fn test_full_export_metadata() {
        let storage = storage();
        record(&storage, TransactionType::Income, 10_000, 2);
        record(&storage, TransactionType::Expense, 2_500, 9);

        let export = FullExport::from_storage(&storage);
        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.metadata.transaction_count, 2);
        assert_eq!(export.metadata.category_count, 5);
        assert_eq!(export.metadata.payment_type_count, 4);
        assert_eq!(export.metadata.totals.balance().cents(), 7_500);
        assert_eq!(export.metadata.earliest_transaction.as_deref(), Some("2024-03-02"));
        assert_eq!(export.metadata.latest_transaction.as_deref(), Some("2024-03-09"));
        assert!(export.profile.is_none());
    }

    #[test]
    fn test_json_export() {
        let storage = storage();
        storage.auth.sign_in_with_google().unwrap();
        record(&storage, TransactionType::Expense, 1_999, 3);

        let mut output = Vec::new();
        assert_eq!(export_full_json(&storage, &mut output).unwrap(), 1);

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["schema_version"], "1.0.0");
        assert_eq!(value["profile"]["email"], "user@example.com");
        assert_eq!(value["settings"]["currency"], "USD");
        assert_eq!(value["transactions"][0]["type"], "EXPENSE");
        assert_eq!(value["transactions"][0]["paymentType"], "Cash");
    }
}

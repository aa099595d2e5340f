//! CSV Export functionality
//!
//! Exports transactions in a spreadsheet-friendly layout, newest first.

use std::io::Write;

use serde::Serialize;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Transaction;
use crate::storage::{newest_first, Storage};

#[derive(Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Type")]
    kind: String,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Payment Type")]
    payment_type: &'a str,
    #[serde(rename = "Note")]
    note: &'a str,
    #[serde(rename = "Recorded At")]
    recorded_at: String,
}

impl<'a> From<&'a Transaction> for CsvRow<'a> {
    fn from(txn: &'a Transaction) -> Self {
        Self {
            id: txn.id.as_uuid().to_string(),
            date: txn.date.to_string(),
            kind: txn.kind.to_string(),
            amount: format!("{}.{:02}", txn.amount.major(), txn.amount.minor()),
            category: &txn.category,
            payment_type: &txn.payment_type,
            note: &txn.note,
            recorded_at: txn.created_at.to_rfc3339(),
        }
    }
}

/// Write `transactions` as CSV with a header row
pub fn write_transactions_csv<W: Write>(
    transactions: &[Transaction],
    writer: W,
) -> ExpenseResult<usize> {
    let mut out = ::csv::Writer::from_writer(writer);
    for txn in transactions {
        out.serialize(CsvRow::from(txn))
            .map_err(|e| ExpenseError::Export(e.to_string()))?;
    }
    if transactions.is_empty() {
        out.write_record([
            "ID",
            "Date",
            "Type",
            "Amount",
            "Category",
            "Payment Type",
            "Note",
            "Recorded At",
        ])
        .map_err(|e| ExpenseError::Export(e.to_string()))?;
    }
    out.flush()
        .map_err(|e| ExpenseError::Export(e.to_string()))?;
    Ok(transactions.len())
}

/// Export all transactions to CSV
pub fn export_transactions_csv<W: Write>(storage: &Storage, writer: W) -> ExpenseResult<usize> {
    let transactions = newest_first(storage.transactions.all());
    write_transactions_csv(&transactions, writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::models::{Money, TransactionDraft, TransactionType, UserSettings};
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn storage() -> Storage {
        Storage::in_memory(
            Arc::new(FixedClock::new(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())),
            UserSettings::default(),
            true,
        )
    }

    #[test]
    fn test_csv_export() {
        let storage = storage();
        storage
            .transactions
            .add(TransactionDraft {
                kind: TransactionType::Expense,
                amount: Money::from_cents(123_405),
                category: "Food".into(),
                payment_type: "Card".into(),
                note: "Dinner, with friends".into(),
                date: NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
            })
            .unwrap();

        let mut output = Vec::new();
        let count = export_transactions_csv(&storage, &mut output).unwrap();
        assert_eq!(count, 1);

        let csv_str = String::from_utf8(output).unwrap();
        let mut lines = csv_str.lines();
        assert_eq!(
            lines.next().unwrap(),
            "ID,Date,Type,Amount,Category,Payment Type,Note,Recorded At"
        );
        let row = lines.next().unwrap();
        assert!(row.contains(",2024-03-14,Expense,1234.05,Food,Card,\"Dinner, with friends\","));
    }

    #[test]
    fn test_empty_export_has_header() {
        let storage = storage();
        let mut output = Vec::new();
        assert_eq!(export_transactions_csv(&storage, &mut output).unwrap(), 0);
        let csv_str = String::from_utf8(output).unwrap();
        assert!(csv_str.starts_with("ID,Date,Type,Amount"));
    }
}

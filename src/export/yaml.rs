//! YAML Export functionality
//!
//! The same snapshot as the JSON export, in a human-readable layout.

use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

/// Export the full session to YAML with a comment header
pub fn export_full_yaml<W: Write>(storage: &Storage, mut writer: W) -> ExpenseResult<usize> {
    let export = FullExport::from_storage(storage);

    let header = format!(
        "# Expense Tracker Export\n\
         # Generated: {}\n\
         # App Version: {}\n\
         # Transactions: {}\n\n",
        export.exported_at, export.app_version, export.metadata.transaction_count
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| ExpenseError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| ExpenseError::Export(e.to_string()))?;

    Ok(export.metadata.transaction_count)
}

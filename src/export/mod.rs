//! Export module for the expense tracker
//!
//! Point-in-time snapshots of the session in three formats:
//! - CSV: transactions only (spreadsheet-compatible)
//! - JSON: machine-readable full export
//! - YAML: human-readable full export
//!
//! Nothing is ever read back.

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_transactions_csv, write_transactions_csv};
pub use json::{export_full_json, ExportMetadata, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_full_yaml;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use tracing::info;

use crate::error::ExpenseResult;
use crate::storage::{write_atomic, Storage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Yaml,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Yaml => "yaml",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(format!("Unknown export format: '{}'. Use csv, json or yaml", other)),
        }
    }
}

/// Export `storage` to `path`, returning the number of transactions written
///
/// The file is replaced atomically; a failed export leaves any existing
/// file untouched.
pub fn export_to_file(storage: &Storage, format: ExportFormat, path: &Path) -> ExpenseResult<usize> {
    let mut buffer = Vec::new();
    let count = match format {
        ExportFormat::Csv => export_transactions_csv(storage, &mut buffer)?,
        ExportFormat::Json => export_full_json(storage, &mut buffer)?,
        ExportFormat::Yaml => export_full_yaml(storage, &mut buffer)?,
    };
    write_atomic(path, &buffer)?;
    info!(format = %format, path = %path.display(), count, "export written");
    Ok(count)
}

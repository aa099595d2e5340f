//! Path management for the expense tracker
//!
//! Only the config file and its directory live on disk; tracked data is
//! in-memory.
//!
//! ## Path Resolution Order
//!
//! 1. An explicit directory (`--config-dir`, or `EXPENSE_TRACKER_DIR`)
//! 2. The platform config directory, e.g. `~/.config/expense-tracker` on
//!    Linux or `%APPDATA%\expense-tracker\config` on Windows

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::ExpenseError;

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "EXPENSE_TRACKER_DIR";

/// Manages the paths used by the expense tracker
#[derive(Debug, Clone)]
pub struct ExpensePaths {
    base_dir: PathBuf,
}

impl ExpensePaths {
    /// Resolve the config directory
    ///
    /// # Errors
    ///
    /// Returns an error if no override is given and the platform has no
    /// home directory.
    pub fn new(override_dir: Option<PathBuf>) -> Result<Self, ExpenseError> {
        let base_dir = match override_dir {
            Some(dir) => dir,
            None => match std::env::var_os(CONFIG_DIR_ENV) {
                Some(dir) if !dir.is_empty() => PathBuf::from(dir),
                _ => resolve_default_path()?,
            },
        };
        Ok(Self { base_dir })
    }

    /// Paths rooted at `base_dir` (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn config_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to the config file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Whether `expense init` has written a config file
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, ExpenseError> {
    ProjectDirs::from("io.github", "deepankumarpn", "expense-tracker")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| ExpenseError::Config("Could not determine a home directory".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.config_dir(), temp_dir.path());
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_explicit_override_wins() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::new(Some(temp_dir.path().to_path_buf())).unwrap();
        assert_eq!(paths.config_dir(), temp_dir.path());
    }
}

//! Application config for the expense tracker
//!
//! A small JSON file seeding each session: the starting currency and home
//! summary preferences, whether the default catalog is created, history
//! paging and the log level. Changes made in a session are not written back.

use serde::{Deserialize, Serialize};

use super::paths::ExpensePaths;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{CurrencyType, DurationFilter, UserSettings, DEFAULT_CUSTOM_DAYS};
use crate::platform::AppInfo;
use crate::screens::DEFAULT_PAGE_SIZE;
use crate::storage::{read_json, write_json_atomic};

/// Application config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Starting currency code; detected from the locale when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<CurrencyType>,

    /// Window for the home summary
    #[serde(default)]
    pub home_duration: DurationFilter,

    #[serde(default = "default_custom_days")]
    pub custom_days: u32,

    #[serde(default)]
    pub custom_summary_items: Vec<String>,

    /// Create the default categories and payment types at startup
    #[serde(default = "default_true")]
    pub seed_default_catalog: bool,

    /// Transactions per history page
    #[serde(default = "default_page_size")]
    pub history_page_size: usize,

    /// `tracing` filter directive, e.g. `info` or `expense_tracker=debug`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_custom_days() -> u32 {
    DEFAULT_CUSTOM_DAYS
}

fn default_true() -> bool {
    true
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency: None,
            home_duration: DurationFilter::default(),
            custom_days: default_custom_days(),
            custom_summary_items: Vec::new(),
            seed_default_catalog: true,
            history_page_size: default_page_size(),
            log_level: None,
        }
    }
}

impl AppConfig {
    /// Load the config file, or defaults if there is none
    ///
    /// Never writes; `expense init` saves explicitly.
    pub fn load_or_create(paths: &ExpensePaths) -> ExpenseResult<Self> {
        let config: Self = read_json(paths.settings_file())?;
        config.validate()?;
        Ok(config)
    }

    /// Save the config file
    pub fn save(&self, paths: &ExpensePaths) -> ExpenseResult<()> {
        self.validate()?;
        write_json_atomic(paths.settings_file(), self)
    }

    pub fn validate(&self) -> ExpenseResult<()> {
        if self.custom_days == 0 {
            return Err(ExpenseError::Config(
                "custom_days must be at least 1".into(),
            ));
        }
        if self.history_page_size == 0 {
            return Err(ExpenseError::Config(
                "history_page_size must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Settings a new session starts with
    pub fn initial_user_settings(&self, platform: &dyn AppInfo) -> UserSettings {
        UserSettings {
            currency: self.currency.unwrap_or_else(|| platform.default_currency()),
            home_duration: self.home_duration,
            custom_days: self.custom_days,
            custom_summary_items: self.custom_summary_items.clone(),
        }
    }
}

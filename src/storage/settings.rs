//! Settings repository

use tracing::debug;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{CurrencyType, DurationFilter, UserSettings};

use super::snapshot::{Observable, Stream};

/// Holds the session's user settings
pub struct SettingsRepository {
    settings: Observable<UserSettings>,
}

impl SettingsRepository {
    pub fn new(initial: UserSettings) -> Self {
        Self {
            settings: Observable::new(initial),
        }
    }

    pub fn stream(&self) -> Stream<UserSettings> {
        self.settings.stream()
    }

    pub fn current(&self) -> UserSettings {
        self.settings.get()
    }

    pub fn update_currency(&self, currency: CurrencyType) -> ExpenseResult<()> {
        self.settings.update(|s| UserSettings {
            currency,
            ..s.clone()
        });
        debug!(currency = currency.code(), "currency updated");
        Ok(())
    }

    pub fn update_home_duration(&self, duration: DurationFilter) -> ExpenseResult<()> {
        self.settings.update(|s| UserSettings {
            home_duration: duration,
            ..s.clone()
        });
        debug!(duration = %duration, "home duration updated");
        Ok(())
    }

    pub fn update_custom_days(&self, days: u32) -> ExpenseResult<()> {
        if days == 0 {
            return Err(ExpenseError::Validation(
                "Custom days must be at least 1".into(),
            ));
        }
        self.settings.update(|s| UserSettings {
            custom_days: days,
            ..s.clone()
        });
        debug!(days, "custom days updated");
        Ok(())
    }

    /// Append a summary item; adding one already present is a no-op
    pub fn add_custom_summary_item(&self, item: &str) -> ExpenseResult<()> {
        let item = item.trim().to_string();
        if item.is_empty() {
            return Err(ExpenseError::Validation(
                "Summary item cannot be empty".into(),
            ));
        }
        self.settings.update(|s| {
            let mut next = s.clone();
            if !next.has_summary_item(&item) {
                next.custom_summary_items.push(item.clone());
            }
            next
        });
        debug!(item = %item, "summary item added");
        Ok(())
    }

    pub fn remove_custom_summary_item(&self, item: &str) -> ExpenseResult<()> {
        let item = item.trim();
        self.settings.update(|s| UserSettings {
            custom_summary_items: s
                .custom_summary_items
                .iter()
                .filter(|i| !i.eq_ignore_ascii_case(item))
                .cloned()
                .collect(),
            ..s.clone()
        });
        debug!(item, "summary item removed");
        Ok(())
    }

    /// Replace the settings wholesale
    pub fn update_settings(&self, settings: UserSettings) -> ExpenseResult<()> {
        settings.validate().map_err(ExpenseError::Validation)?;
        self.settings.update(|_| settings);
        Ok(())
    }
}

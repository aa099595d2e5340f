//! User settings model

use serde::{Deserialize, Serialize};

use super::currency::CurrencyType;
use super::duration::{DurationFilter, DEFAULT_CUSTOM_DAYS};

/// Preferences that drive the home summary and amount formatting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    #[serde(default)]
    pub currency: CurrencyType,

    /// Window used by the home summary
    #[serde(default)]
    pub home_duration: DurationFilter,

    /// Day count for [`DurationFilter::Custom`]
    #[serde(default = "default_custom_days")]
    pub custom_days: u32,

    /// Category or payment type names with their own home total
    #[serde(default)]
    pub custom_summary_items: Vec<String>,
}

fn default_custom_days() -> u32 {
    DEFAULT_CUSTOM_DAYS
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            currency: CurrencyType::default(),
            home_duration: DurationFilter::default(),
            custom_days: DEFAULT_CUSTOM_DAYS,
            custom_summary_items: Vec::new(),
        }
    }
}

impl UserSettings {
    /// Settings with the given currency and defaults elsewhere
    pub fn with_currency(currency: CurrencyType) -> Self {
        Self {
            currency,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.custom_days == 0 {
            return Err("Custom days must be at least 1".to_string());
        }
        if self.custom_summary_items.iter().any(|i| i.trim().is_empty()) {
            return Err("Summary item cannot be empty".to_string());
        }
        Ok(())
    }

    pub fn has_summary_item(&self, item: &str) -> bool {
        self.custom_summary_items
            .iter()
            .any(|i| i.eq_ignore_ascii_case(item.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = UserSettings::default();
        assert_eq!(settings.currency, CurrencyType::USD);
        assert_eq!(settings.home_duration, DurationFilter::Monthly);
        assert_eq!(settings.custom_days, 30);
        assert!(settings.custom_summary_items.is_empty());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_custom_days() {
        let settings = UserSettings {
            custom_days: 0,
            ..UserSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: UserSettings = serde_json::from_str(r#"{"currency":"INR"}"#).unwrap();
        assert_eq!(settings.currency, CurrencyType::INR);
        assert_eq!(settings.custom_days, 30);
    }

    #[test]
    fn test_has_summary_item() {
        let settings = UserSettings {
            custom_summary_items: vec!["Food".into()],
            ..UserSettings::default()
        };
        assert!(settings.has_summary_item("food"));
        assert!(!settings.has_summary_item("Travel"));
    }
}

//! Platform identity
//!
//! Version, device and locale facts about the machine the tracker runs on.
//! Detected once per process and shared through [`app_info`].

use std::fs;

use once_cell::sync::OnceCell;
use uuid::Uuid;

use crate::models::CurrencyType;

/// Country used when the locale does not name one
pub const DEFAULT_COUNTRY: &str = "US";

/// App-level information about the running build and device
pub trait AppInfo: Send + Sync {
    fn version_name(&self) -> &str;
    fn package_name(&self) -> &str;
    fn platform(&self) -> &str;
    fn os_version(&self) -> &str;
    fn device_model(&self) -> &str;
    fn is_debug(&self) -> bool;

    /// Two-letter country code from the locale, e.g. `IN`
    fn country_code(&self) -> &str;

    /// Currency for the country, falling back to USD
    fn default_currency(&self) -> CurrencyType {
        CurrencyType::for_country(self.country_code()).unwrap_or_default()
    }

    fn currency_code(&self) -> &'static str {
        self.default_currency().code()
    }

    /// Desktop builds have no advertising identifier
    fn advertising_id(&self) -> Option<String> {
        None
    }

    fn installation_id(&self) -> Option<String>;
    fn device_id(&self) -> String;
    fn launch_session_id(&self) -> String;
}

/// [`AppInfo`] for desktop operating systems
#[derive(Debug, Clone)]
pub struct DesktopAppInfo {
    os_version: String,
    device_model: String,
    country_code: String,
    installation_id: String,
    device_id: String,
    session_id: String,
}

impl DesktopAppInfo {
    /// Inspect the environment
    pub fn detect() -> Self {
        let locale = ["LC_ALL", "LC_MONETARY", "LANG"]
            .iter()
            .find_map(|key| std::env::var(key).ok().filter(|v| !v.is_empty()));
        let machine_id = fs::read_to_string("/etc/machine-id")
            .ok()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());
        Self::new(locale.as_deref(), machine_id, os_release())
    }

    fn new(locale: Option<&str>, machine_id: Option<String>, os_version: Option<String>) -> Self {
        let installation_id = Uuid::new_v4().to_string();
        Self {
            os_version: os_version.unwrap_or_else(|| std::env::consts::OS.to_string()),
            device_model: std::env::consts::ARCH.to_string(),
            country_code: locale
                .and_then(country_from_locale)
                .unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
            device_id: machine_id.unwrap_or_else(|| installation_id.clone()),
            installation_id,
            session_id: Uuid::new_v4().to_string(),
        }
    }
}

impl AppInfo for DesktopAppInfo {
    fn version_name(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn package_name(&self) -> &str {
        env!("CARGO_PKG_NAME")
    }

    fn platform(&self) -> &str {
        std::env::consts::OS
    }

    fn os_version(&self) -> &str {
        &self.os_version
    }

    fn device_model(&self) -> &str {
        &self.device_model
    }

    fn is_debug(&self) -> bool {
        cfg!(debug_assertions)
    }

    fn country_code(&self) -> &str {
        &self.country_code
    }

    fn installation_id(&self) -> Option<String> {
        Some(self.installation_id.clone())
    }

    fn device_id(&self) -> String {
        self.device_id.clone()
    }

    fn launch_session_id(&self) -> String {
        self.session_id.clone()
    }
}

static APP_INFO: OnceCell<DesktopAppInfo> = OnceCell::new();

/// The process-wide [`AppInfo`]
pub fn app_info() -> &'static DesktopAppInfo {
    APP_INFO.get_or_init(DesktopAppInfo::detect)
}

/// Country part of a POSIX locale such as `en_IN.UTF-8`
fn country_from_locale(locale: &str) -> Option<String> {
    let name = locale.split(['.', '@']).next()?;
    let (_, country) = name.split_once(['_', '-'])?;
    (country.len() == 2 && country.chars().all(|c| c.is_ascii_alphabetic()))
        .then(|| country.to_ascii_uppercase())
}

fn os_release() -> Option<String> {
    let contents = fs::read_to_string("/etc/os-release").ok()?;
    contents.lines().find_map(|line| {
        line.strip_prefix("PRETTY_NAME=")
            .map(|v| v.trim_matches('"').to_string())
    })
}

//! Screen view-models
//!
//! One module per screen. Each exposes a state, an event enum, an effect
//! enum and a view-model implementing [`crate::state::ViewModel`].

pub mod history;
pub mod home;
pub mod login;
pub mod settings;

pub use history::{HistoryEffect, HistoryEvent, HistoryState, HistoryViewModel, DEFAULT_PAGE_SIZE};
pub use home::{HomeEffect, HomeEvent, HomeState, HomeViewModel};
pub use login::{LoginEffect, LoginEvent, LoginState, LoginViewModel};
pub use settings::{SettingsEffect, SettingsEvent, SettingsState, SettingsViewModel};

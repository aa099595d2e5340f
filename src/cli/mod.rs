//! CLI command handlers
//!
//! Bridges clap argument parsing with the screen view-models held by a
//! [`Session`](crate::session::Session).

pub mod catalog;
pub mod settings;
pub mod shell;
pub mod transaction;

pub use catalog::{handle_category_command, handle_payment_command, CatalogCommands};
pub use settings::{handle_settings_command, SettingsCommands};
pub use shell::{run_shell, split_words};
pub use transaction::{
    handle_add, handle_delete, handle_edit, handle_history, handle_show, handle_summary,
    AddArgs, EditArgs, HistoryArgs,
};

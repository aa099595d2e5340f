//! Display formatting for terminal output
//!
//! Turns screen state into text for the shell: `tabled` tables for lists,
//! aligned blocks for summaries and settings.

pub mod catalog;
pub mod settings;
pub mod summary;
pub mod transaction;

pub use catalog::{format_category_list, format_payment_type_list};
pub use settings::{format_currency_list, format_settings};
pub use summary::{format_history_header, format_home_summary, format_item_summaries};
pub use transaction::{format_transaction_details, format_transaction_table};

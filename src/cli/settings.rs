//! Settings commands

use std::io::Write;

use clap::Subcommand;

use crate::display::format_settings;
use crate::error::ExpenseResult;
use crate::models::{CurrencyType, DurationFilter};
use crate::screens::SettingsEvent;
use crate::session::Session;

/// Settings subcommands
#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Show current settings
    Show,

    /// Set the display currency
    Currency {
        /// ISO code, e.g. INR
        code: CurrencyType,
    },

    /// Set the home summary window
    Duration {
        /// daily, weekly, monthly, quarter, half or custom
        duration: DurationFilter,
    },

    /// Set the day count for the custom window
    #[command(name = "custom-days")]
    CustomDays { days: u32 },

    /// Track a category or payment type on the home summary
    #[command(name = "summary-add")]
    SummaryAdd { item: String },

    /// Stop tracking a summary item
    #[command(name = "summary-remove")]
    SummaryRemove { item: String },
}

/// Handle a `settings` command
pub fn handle_settings_command(
    session: &mut Session,
    cmd: SettingsCommands,
    out: &mut dyn Write,
) -> ExpenseResult<()> {
    let event = match cmd {
        SettingsCommands::Show => {
            let state = session.settings(SettingsEvent::LoadProfile)?;
            write!(out, "{}", format_settings(&state))?;
            return Ok(());
        }
        SettingsCommands::Currency { code } => SettingsEvent::CurrencyChanged(code),
        SettingsCommands::Duration { duration } => SettingsEvent::HomeDurationChanged(duration),
        SettingsCommands::CustomDays { days } => SettingsEvent::CustomDaysChanged(days),
        SettingsCommands::SummaryAdd { item } => SettingsEvent::AddSummaryItem(item),
        SettingsCommands::SummaryRemove { item } => SettingsEvent::RemoveSummaryItem(item),
    };
    session.settings(event)?;
    Ok(())
}

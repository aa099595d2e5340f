//! Category and payment type commands
//!
//! Both catalogs share one subcommand set and go through the settings
//! screen, so deleting an entry still in use is refused there.

use std::io::Write;
use std::sync::Arc;

use clap::Subcommand;

use crate::display::{format_category_list, format_payment_type_list};
use crate::error::ExpenseResult;
use crate::screens::SettingsEvent;
use crate::session::Session;

/// Catalog subcommands
#[derive(Subcommand, Debug)]
pub enum CatalogCommands {
    /// List entries, marking those used by transactions
    List,

    /// Add an entry
    Add {
        /// Name (quote names with spaces)
        name: String,
    },

    /// Rename an entry
    Rename {
        /// Current name or ID
        entry: String,
        /// New name
        name: String,
    },

    /// Delete an entry that no transaction uses
    Delete {
        /// Name or ID
        entry: String,
    },
}

/// Handle a `category` command
pub fn handle_category_command(
    session: &mut Session,
    cmd: CatalogCommands,
    out: &mut dyn Write,
) -> ExpenseResult<()> {
    let storage = Arc::clone(session.storage());

    match cmd {
        CatalogCommands::List => {
            let state = session.settings(SettingsEvent::LoadCategories)?;
            writeln!(
                out,
                "{}",
                format_category_list(&state.categories, &state.categories_in_use)
            )?;
        }
        CatalogCommands::Add { name } => {
            session.settings(SettingsEvent::AddCategory(name))?;
        }
        CatalogCommands::Rename { entry, name } => {
            let category = storage.categories.find(&entry)?;
            session.settings(SettingsEvent::UpdateCategory(category.id, name))?;
        }
        CatalogCommands::Delete { entry } => {
            let category = storage.categories.find(&entry)?;
            session.settings(SettingsEvent::DeleteCategory(category.id))?;
        }
    }

    Ok(())
}

/// Handle a `payment` command
pub fn handle_payment_command(
    session: &mut Session,
    cmd: CatalogCommands,
    out: &mut dyn Write,
) -> ExpenseResult<()> {
    let storage = Arc::clone(session.storage());

    match cmd {
        CatalogCommands::List => {
            let state = session.settings(SettingsEvent::LoadPaymentTypes)?;
            writeln!(
                out,
                "{}",
                format_payment_type_list(&state.payment_types, &state.payment_types_in_use)
            )?;
        }
        CatalogCommands::Add { name } => {
            session.settings(SettingsEvent::AddPaymentType(name))?;
        }
        CatalogCommands::Rename { entry, name } => {
            let payment_type = storage.payment_types.find(&entry)?;
            session.settings(SettingsEvent::UpdatePaymentType(payment_type.id, name))?;
        }
        CatalogCommands::Delete { entry } => {
            let payment_type = storage.payment_types.find(&entry)?;
            session.settings(SettingsEvent::DeletePaymentType(payment_type.id))?;
        }
    }

    Ok(())
}

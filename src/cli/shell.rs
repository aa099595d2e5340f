//! Interactive shell
//!
//! Reads one command per line and routes it through the [`Session`]. The
//! same loop serves a terminal and a piped script; only the prompt and
//! banner differ.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use tracing::debug;

use super::catalog::{handle_category_command, handle_payment_command, CatalogCommands};
use super::settings::{handle_settings_command, SettingsCommands};
use super::transaction::{
    handle_add, handle_delete, handle_edit, handle_history, handle_show, handle_summary,
    AddArgs, EditArgs, HistoryArgs,
};
use crate::display::format_currency_list;
use crate::error::{ExpenseError, ExpenseResult};
use crate::export::{export_to_file, ExportFormat};
use crate::screens::{LoginEvent, SettingsEvent};
use crate::session::{Screen, Session};

const PROMPT: &str = "expense> ";

/// One line of shell input
#[derive(Parser, Debug)]
#[command(no_binary_name = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug)]
enum ShellCommand {
    /// Sign in with Google
    Login,

    /// Sign out and return to the login screen
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Show or switch the current screen
    Screen {
        /// login, home, history or settings
        name: Option<Screen>,
    },

    /// Record a transaction
    Add(AddArgs),

    /// Show the home summary
    Summary,

    /// List transactions with the history filters
    History(HistoryArgs),

    /// Show one transaction
    Show { id: String },

    /// Change a transaction
    Edit(EditArgs),

    /// Delete a transaction
    Delete { id: String },

    /// Manage categories
    #[command(subcommand)]
    Category(CatalogCommands),

    /// Manage payment types
    #[command(subcommand, alias = "payment-type")]
    Payment(CatalogCommands),

    /// View and change settings
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// List supported currencies
    Currencies {
        /// Match on code or name
        filter: Option<String>,
    },

    /// Write a snapshot to a file
    Export {
        /// csv, json or yaml
        format: ExportFormat,
        path: PathBuf,
    },

    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

/// Split a line into words, honouring single and double quotes
pub fn split_words(line: &str) -> ExpenseResult<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err(ExpenseError::Validation("Unterminated quote".into()));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

/// Run the shell until `quit` or end of input
pub fn run_shell<R: BufRead>(
    session: &mut Session,
    input: R,
    out: &mut dyn Write,
    interactive: bool,
) -> ExpenseResult<()> {
    if interactive {
        writeln!(out, "Expense Tracker {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(out, "Type 'help' for commands, 'quit' to leave.")?;
        if !session.storage().auth.is_authenticated() {
            writeln!(out, "Not signed in. Run 'login' to continue.")?;
        }
    }

    let mut lines = input.lines();
    loop {
        if interactive {
            write!(out, "{}", PROMPT)?;
            out.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let words = match split_words(trimmed) {
            Ok(words) => words,
            Err(e) => {
                writeln!(out, "Error: {}", e)?;
                continue;
            }
        };
        let command = match ShellLine::try_parse_from(&words) {
            Ok(parsed) => parsed.command,
            Err(e) if e.kind() == ErrorKind::DisplayHelp => {
                write!(out, "{}", e)?;
                continue;
            }
            Err(e) => {
                let message = e.to_string();
                let message = message.strip_prefix("error: ").unwrap_or(&message);
                write!(out, "Error: {}", message)?;
                continue;
            }
        };

        debug!(?command, "shell command");
        if matches!(command, ShellCommand::Quit) {
            break;
        }

        let result = run_command(session, command, out);
        for notification in session.take_notifications() {
            writeln!(out, "{}", notification)?;
        }
        if let Err(e) = result {
            writeln!(out, "Error: {}", e)?;
        }
    }

    Ok(())
}

fn run_command(
    session: &mut Session,
    command: ShellCommand,
    out: &mut dyn Write,
) -> ExpenseResult<()> {
    match command {
        ShellCommand::Login => {
            if let Some(user) = session.storage().auth.user() {
                writeln!(out, "Already signed in as {} <{}>", user.name, user.email)?;
                return Ok(());
            }
            let state = session.login(LoginEvent::SignInWithGoogleClicked)?;
            if state.is_authenticated {
                if let Some(user) = session.storage().auth.user() {
                    writeln!(out, "Signed in as {} <{}>", user.name, user.email)?;
                }
            }
        }
        ShellCommand::Logout => {
            if !session.storage().auth.is_authenticated() {
                writeln!(out, "Not signed in")?;
                return Ok(());
            }
            session.settings(SettingsEvent::SignOut)?;
            writeln!(out, "Signed out")?;
        }
        ShellCommand::Whoami => match session.storage().auth.user() {
            Some(user) => writeln!(out, "{} <{}>", user.name, user.email)?,
            None => writeln!(out, "Not signed in")?,
        },
        ShellCommand::Screen { name } => {
            if let Some(screen) = name {
                session.navigate(screen)?;
            }
            writeln!(out, "Current screen: {}", session.screen())?;
        }
        ShellCommand::Add(args) => handle_add(session, args)?,
        ShellCommand::Summary => handle_summary(session, out)?,
        ShellCommand::History(args) => handle_history(session, args, out)?,
        ShellCommand::Show { id } => {
            require_sign_in(session)?;
            handle_show(session, &id, out)?
        }
        ShellCommand::Edit(args) => handle_edit(session, args)?,
        ShellCommand::Delete { id } => handle_delete(session, &id)?,
        ShellCommand::Category(cmd) => handle_category_command(session, cmd, out)?,
        ShellCommand::Payment(cmd) => handle_payment_command(session, cmd, out)?,
        ShellCommand::Settings(cmd) => handle_settings_command(session, cmd, out)?,
        ShellCommand::Currencies { filter } => {
            writeln!(out, "{}", format_currency_list(filter.as_deref()))?
        }
        ShellCommand::Export { format, path } => {
            require_sign_in(session)?;
            let count = export_to_file(session.storage(), format, &path)?;
            writeln!(out, "Exported {} transactions to {}", count, path.display())?;
        }
        ShellCommand::Quit => {}
    }
    Ok(())
}

fn require_sign_in(session: &Session) -> ExpenseResult<()> {
    if session.storage().auth.is_authenticated() {
        Ok(())
    } else {
        Err(ExpenseError::Auth("Not signed in. Run 'login' first".into()))
    }
}

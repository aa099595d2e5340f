//! Transaction commands
//!
//! `add` and `summary` drive the home screen; `history`, `show`, `edit` and
//! `delete` drive the history screen.

use std::io::Write;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::Args;

use crate::display::{
    format_history_header, format_home_summary, format_transaction_details,
    format_transaction_table,
};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{DurationFilter, Money, TransactionType};
use crate::screens::{HistoryEvent, HomeEvent};
use crate::services::period::parse_month;
use crate::session::Session;

/// Arguments for `add`
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Amount, e.g. 250 or 1,250.50
    #[arg(allow_hyphen_values = true)]
    pub amount: String,

    /// Record as income instead of expense
    #[arg(short, long)]
    pub income: bool,

    /// Category name (defaults to the current selection)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Payment type name (defaults to the current selection)
    #[arg(short, long)]
    pub payment: Option<String>,

    #[arg(short, long)]
    pub note: Option<String>,

    /// Transaction date (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub date: Option<NaiveDate>,
}

/// Arguments for `history`
///
/// Filters stick until changed; `history` on its own reprints the list.
#[derive(Args, Debug, Default)]
pub struct HistoryArgs {
    /// daily, weekly, monthly, quarter, half or custom
    #[arg(short, long)]
    pub duration: Option<DurationFilter>,

    /// Year to show under the monthly filter
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Month to show under the monthly filter (number or name)
    #[arg(short, long, value_parser = month_arg)]
    pub month: Option<u32>,

    /// Only transactions paid this way
    #[arg(short, long, conflicts_with = "all_payments")]
    pub payment: Option<String>,

    /// Clear the payment type filter
    #[arg(long)]
    pub all_payments: bool,

    /// Only income or only expense
    #[arg(short = 't', long = "type", conflicts_with = "all_types")]
    pub kind: Option<TransactionType>,

    /// Clear the transaction type filter
    #[arg(long)]
    pub all_types: bool,

    /// Show the next page
    #[arg(long)]
    pub more: bool,
}

/// Arguments for `edit`
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Transaction ID (full or short)
    pub id: String,

    #[arg(short, long, allow_hyphen_values = true)]
    pub amount: Option<String>,

    /// income or expense
    #[arg(short = 't', long = "type")]
    pub kind: Option<TransactionType>,

    #[arg(short, long)]
    pub category: Option<String>,

    #[arg(short, long)]
    pub payment: Option<String>,

    #[arg(short, long)]
    pub note: Option<String>,

    #[arg(short, long)]
    pub date: Option<NaiveDate>,
}

fn month_arg(s: &str) -> Result<u32, String> {
    parse_month(s).ok_or_else(|| format!("Invalid month: '{}'", s))
}

/// Handle `add`
pub fn handle_add(session: &mut Session, args: AddArgs) -> ExpenseResult<()> {
    let storage = Arc::clone(session.storage());
    let kind = if args.income {
        TransactionType::Income
    } else {
        TransactionType::Expense
    };

    session.home(HomeEvent::TypeSelected(kind))?;
    if let Some(category) = args.category {
        let category = storage.categories.find(&category)?;
        session.home(HomeEvent::CategorySelected(category))?;
    }
    if let Some(payment) = args.payment {
        let payment_type = storage.payment_types.find(&payment)?;
        session.home(HomeEvent::PaymentTypeSelected(payment_type))?;
    }
    if let Some(date) = args.date {
        session.home(HomeEvent::DateSelected(date))?;
    }
    session.home(HomeEvent::NoteChanged(args.note.unwrap_or_default()))?;
    session.home(HomeEvent::AmountChanged(args.amount))?;
    let state = session.home(HomeEvent::SubmitTransaction)?;

    // A rejected entry stays in the form; start the next command clean
    if !state.amount.is_empty() {
        session.home(HomeEvent::AmountChanged(String::new()))?;
        session.home(HomeEvent::NoteChanged(String::new()))?;
        session.home(HomeEvent::DateSelected(storage.clock().today()))?;
    }
    Ok(())
}

/// Handle `summary`
pub fn handle_summary(session: &mut Session, out: &mut dyn Write) -> ExpenseResult<()> {
    let state = session.home(HomeEvent::LoadSummary)?;
    write!(out, "{}", format_home_summary(&state))?;
    Ok(())
}

/// Handle `history`
pub fn handle_history(
    session: &mut Session,
    args: HistoryArgs,
    out: &mut dyn Write,
) -> ExpenseResult<()> {
    let storage = Arc::clone(session.storage());

    let mut state = session.history_state()?;
    if let Some(duration) = args.duration {
        state = session.history(HistoryEvent::DurationFilterChanged(duration))?;
    }
    if let Some(year) = args.year {
        state = session.history(HistoryEvent::YearChanged(year))?;
    }
    if let Some(month) = args.month {
        state = session.history(HistoryEvent::MonthChanged(month))?;
    }
    if let Some(payment) = args.payment {
        let name = storage.payment_types.find(&payment)?.name;
        state = session.history(HistoryEvent::PaymentTypeFilterChanged(Some(name)))?;
    }
    if args.all_payments {
        state = session.history(HistoryEvent::PaymentTypeFilterChanged(None))?;
    }
    if let Some(kind) = args.kind {
        state = session.history(HistoryEvent::TransactionTypeFilterChanged(Some(kind)))?;
    }
    if args.all_types {
        state = session.history(HistoryEvent::TransactionTypeFilterChanged(None))?;
    }
    if args.more {
        state = session.history(HistoryEvent::LoadMore)?;
    }

    write!(out, "{}", format_history_header(&state))?;
    writeln!(out)?;
    writeln!(out, "{}", format_transaction_table(&state.transactions, state.currency))?;
    if state.has_more {
        writeln!(out, "More available: run 'history --more'")?;
    }
    Ok(())
}

/// Handle `show`
pub fn handle_show(session: &Session, id: &str, out: &mut dyn Write) -> ExpenseResult<()> {
    let txn = session.storage().transactions.find(id)?;
    let currency = session.storage().settings.current().currency;
    write!(out, "{}", format_transaction_details(&txn, currency))?;
    Ok(())
}

/// Handle `edit`
pub fn handle_edit(session: &mut Session, args: EditArgs) -> ExpenseResult<()> {
    let storage = Arc::clone(session.storage());
    let mut txn = storage.transactions.find(&args.id)?;

    if args.amount.is_none()
        && args.kind.is_none()
        && args.category.is_none()
        && args.payment.is_none()
        && args.note.is_none()
        && args.date.is_none()
    {
        return Err(ExpenseError::Validation(
            "No changes specified. Use --amount, --type, --category, --payment, --note or --date"
                .into(),
        ));
    }

    if let Some(amount) = args.amount {
        txn.amount =
            Money::parse(&amount).map_err(|e| ExpenseError::Validation(e.to_string()))?;
    }
    if let Some(kind) = args.kind {
        txn.kind = kind;
    }
    if let Some(category) = args.category {
        txn.category = storage.categories.find(&category)?.name;
    }
    if let Some(payment) = args.payment {
        txn.payment_type = storage.payment_types.find(&payment)?.name;
    }
    if let Some(note) = args.note {
        txn.note = note.trim().to_string();
    }
    if let Some(date) = args.date {
        txn.date = date;
    }

    session.history(HistoryEvent::UpdateTransaction(txn))?;
    Ok(())
}

/// Handle `delete`
pub fn handle_delete(session: &mut Session, id: &str) -> ExpenseResult<()> {
    let txn = session.storage().transactions.find(id)?;
    session.history(HistoryEvent::DeleteTransaction(txn.id))?;
    Ok(())
}

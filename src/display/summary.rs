//! Summary display formatting
//!
//! The home screen's income/expense block and the history header.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::{CurrencyType, Money};
use crate::screens::{HistoryState, HomeState};
use crate::services::ItemSummary;

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Expense")]
    expense: String,
    #[tabled(rename = "Balance")]
    balance: String,
}

fn totals(label: &str, income: Money, expense: Money, currency: CurrencyType) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n", label));
    output.push_str(&format!("  Income:  {:>16}\n", income.format_with(currency)));
    output.push_str(&format!("  Expense: {:>16}\n", expense.format_with(currency)));
    output.push_str(&format!(
        "  Balance: {:>16}\n",
        (income - expense).format_with(currency)
    ));
    output
}

/// Format the home summary, including any custom summary items
pub fn format_home_summary(state: &HomeState) -> String {
    let mut output = totals(
        &state.duration_label,
        state.total_income,
        state.total_expense,
        state.currency,
    );
    if !state.custom_summaries.is_empty() {
        output.push('\n');
        output.push_str(&format_item_summaries(&state.custom_summaries, state.currency));
        output.push('\n');
    }
    output
}

/// Format per-item totals as a table
pub fn format_item_summaries(items: &[ItemSummary], currency: CurrencyType) -> String {
    let rows = items.iter().map(|i| ItemRow {
        item: i.item.clone(),
        income: i.summary.income.format_with(currency),
        expense: i.summary.expense.format_with(currency),
        balance: i.summary.balance().format_with(currency),
    });
    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .modify(Columns::new(1..), Alignment::right());
    table.to_string()
}

/// Format the history header: period, filters, totals and paging
pub fn format_history_header(state: &HistoryState) -> String {
    let mut output = totals(
        &state.period_label,
        state.total_income,
        state.total_expense,
        state.currency,
    );

    let mut filters = Vec::new();
    if let Some(payment_type) = &state.payment_type_filter {
        filters.push(format!("payment = {}", payment_type));
    }
    if let Some(kind) = state.type_filter {
        filters.push(format!("type = {}", kind));
    }
    if !filters.is_empty() {
        output.push_str(&format!("  Filters: {}\n", filters.join(", ")));
    }

    output.push_str(&format!(
        "  Showing {} of {}\n",
        state.transactions.len(),
        state.total_count
    ));
    output
}

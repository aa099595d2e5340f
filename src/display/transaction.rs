//! Transaction display formatting
//!
//! Register-style tables for the history screen and a detail view for a
//! single transaction.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::{CurrencyType, Transaction, TransactionType};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: TransactionType,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Payment")]
    payment_type: String,
    #[tabled(rename = "Note")]
    note: String,
}

impl TransactionRow {
    fn new(txn: &Transaction, currency: CurrencyType) -> Self {
        let sign = match txn.kind {
            TransactionType::Income => "+",
            TransactionType::Expense => "-",
        };
        Self {
            id: txn.id.to_string(),
            date: txn.date.format("%Y-%m-%d").to_string(),
            kind: txn.kind,
            amount: format!("{}{}", sign, txn.amount.format_with(currency)),
            category: txn.category.clone(),
            payment_type: txn.payment_type.clone(),
            note: truncate(&txn.note, 30),
        }
    }
}

/// Format transactions as a table, in the order given
pub fn format_transaction_table(transactions: &[Transaction], currency: CurrencyType) -> String {
    if transactions.is_empty() {
        return "No transactions found.".to_string();
    }

    let rows = transactions.iter().map(|t| TransactionRow::new(t, currency));
    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .modify(Columns::single(3), Alignment::right());
    table.to_string()
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, currency: CurrencyType) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d")));
    output.push_str(&format!("Amount:      {}\n", txn.amount.format_with(currency)));
    output.push_str(&format!("Category:    {}\n", txn.category));
    output.push_str(&format!("Payment:     {}\n", txn.payment_type));
    if !txn.note.is_empty() {
        output.push_str(&format!("Note:        {}\n", txn.note));
    }
    output.push_str(&format!(
        "Recorded:    {}\n",
        txn.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}

/// Shorten `s` to at most `max_chars` characters
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

//! Category and payment type display formatting

use std::collections::BTreeSet;

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Category, PaymentType};

#[derive(Tabled)]
struct CatalogRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Default")]
    default: &'static str,
    #[tabled(rename = "In Use")]
    in_use: &'static str,
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        ""
    }
}

fn render(rows: Vec<CatalogRow>, empty: &str) -> String {
    if rows.is_empty() {
        return empty.to_string();
    }
    Table::new(rows).with(Style::psql()).to_string()
}

/// Format categories, marking those referenced by transactions
pub fn format_category_list(categories: &[Category], in_use: &BTreeSet<String>) -> String {
    let rows = categories
        .iter()
        .map(|c| CatalogRow {
            id: c.id.to_string(),
            name: c.name.clone(),
            default: yes_no(c.is_default),
            in_use: yes_no(in_use.contains(&c.name)),
        })
        .collect();
    render(rows, "No categories found.")
}

/// Format payment types, marking those referenced by transactions
pub fn format_payment_type_list(
    payment_types: &[PaymentType],
    in_use: &BTreeSet<String>,
) -> String {
    let rows = payment_types
        .iter()
        .map(|p| CatalogRow {
            id: p.id.to_string(),
            name: p.name.clone(),
            default: yes_no(p.is_default),
            in_use: yes_no(in_use.contains(&p.name)),
        })
        .collect();
    render(rows, "No payment types found.")
}

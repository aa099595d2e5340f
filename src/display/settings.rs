//! Settings and currency display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::CurrencyType;
use crate::screens::SettingsState;

/// Format the settings screen
pub fn format_settings(state: &SettingsState) -> String {
    let mut output = String::new();

    if !state.user_name.is_empty() {
        output.push_str(&format!("Signed in as: {} <{}>\n", state.user_name, state.user_email));
    }
    output.push_str(&format!("Currency:      {}\n", state.selected_currency));
    output.push_str(&format!(
        "Home summary:  {} ({})\n",
        state.home_duration.home_label(state.custom_days),
        state.home_duration
    ));
    output.push_str(&format!("Custom days:   {}\n", state.custom_days));

    let items = if state.custom_summary_items.is_empty() {
        "(none)".to_string()
    } else {
        state.custom_summary_items.join(", ")
    };
    output.push_str(&format!("Summary items: {}\n", items));
    output.push_str(&format!(
        "Catalog:       {} categories, {} payment types\n",
        state.categories.len(),
        state.payment_types.len()
    ));

    output
}

#[derive(Tabled)]
struct CurrencyRow {
    #[tabled(rename = "Code")]
    code: &'static str,
    #[tabled(rename = "Symbol")]
    symbol: &'static str,
    #[tabled(rename = "Name")]
    name: &'static str,
}

/// Format currencies whose code or name contains `filter`, ignoring case
pub fn format_currency_list(filter: Option<&str>) -> String {
    let needle = filter.map(|f| f.trim().to_lowercase()).unwrap_or_default();
    let rows: Vec<CurrencyRow> = CurrencyType::all()
        .iter()
        .filter(|c| {
            needle.is_empty()
                || c.code().to_lowercase().contains(&needle)
                || c.name().to_lowercase().contains(&needle)
        })
        .map(|c| CurrencyRow {
            code: c.code(),
            symbol: c.symbol(),
            name: c.name(),
        })
        .collect();

    if rows.is_empty() {
        return "No currencies found.".to_string();
    }
    Table::new(rows).with(Style::psql()).to_string()
}

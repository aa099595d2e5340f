//! Period service
//!
//! Resolves duration filters to date windows against the clock and produces
//! the labels and pickers the home and history screens show.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};

use crate::clock::Clock;
use crate::models::{DateWindow, DurationFilter};

/// Month names, January first
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Years offered on either side of the current one
const YEAR_SPAN: i32 = 5;

/// Service for date windows and period labels
pub struct PeriodService {
    clock: Arc<dyn Clock>,
}

impl PeriodService {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Window for `filter`, honoring an explicit month under `Monthly`
    pub fn window_for(
        &self,
        filter: DurationFilter,
        month: Option<(i32, u32)>,
        custom_days: u32,
    ) -> DateWindow {
        filter.resolve(self.today(), month, custom_days)
    }

    /// Label for the home summary, e.g. `This Month`
    pub fn home_label(&self, filter: DurationFilter, custom_days: u32) -> String {
        filter.home_label(custom_days)
    }

    /// Label for the history header
    ///
    /// Under `Monthly` this names the selected month, e.g. `March 2024`.
    pub fn history_label(
        &self,
        filter: DurationFilter,
        year: i32,
        month: u32,
        custom_days: u32,
    ) -> String {
        match filter {
            DurationFilter::Monthly => match month_name(month) {
                Some(name) => format!("{} {}", name, year),
                None => filter.home_label(custom_days),
            },
            _ => filter.home_label(custom_days),
        }
    }

    /// Selectable years: the current year plus and minus five
    pub fn years(&self) -> Vec<i32> {
        let year = self.today().year();
        ((year - YEAR_SPAN)..=(year + YEAR_SPAN)).collect()
    }

    /// Selectable months, January first
    pub fn months(&self) -> &'static [&'static str; 12] {
        &MONTH_NAMES
    }

    /// Today's year and month
    pub fn current_month(&self) -> (i32, u32) {
        let today = self.today();
        (today.year(), today.month())
    }
}

/// Name of month `month` (1-12)
pub fn month_name(month: u32) -> Option<&'static str> {
    MONTH_NAMES.get(month.checked_sub(1)? as usize).copied()
}

/// Parse a month given as a number (`3`) or a name (`march`, `Mar`)
pub fn parse_month(s: &str) -> Option<u32> {
    let s = s.trim();
    if let Ok(n) = s.parse::<u32>() {
        return (1..=12).contains(&n).then_some(n);
    }
    if s.len() < 3 {
        return None;
    }
    let lower = s.to_ascii_lowercase();
    MONTH_NAMES
        .iter()
        .position(|name| name.to_ascii_lowercase().starts_with(&lower))
        .map(|i| i as u32 + 1)
}

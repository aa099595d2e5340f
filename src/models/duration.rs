//! Duration filters and the inclusive date windows they resolve to

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Day count used by [`DurationFilter::Custom`] when none is configured
pub const DEFAULT_CUSTOM_DAYS: u32 = 30;

/// Time window used to filter and summarize transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DurationFilter {
    Daily,
    Weekly,
    #[default]
    Monthly,
    QuarterYear,
    HalfYear,
    Custom,
}

impl DurationFilter {
    pub const ALL: [DurationFilter; 6] = [
        DurationFilter::Daily,
        DurationFilter::Weekly,
        DurationFilter::Monthly,
        DurationFilter::QuarterYear,
        DurationFilter::HalfYear,
        DurationFilter::Custom,
    ];

    /// Resolve this filter to a window around `today`
    ///
    /// Trailing windows (`Weekly`, `QuarterYear`, `HalfYear`, `Custom`) start
    /// a fixed number of days back and have no upper bound, so future-dated
    /// entries count. `Monthly` is the calendar month of `today`.
    pub fn window(&self, today: NaiveDate, custom_days: u32) -> DateWindow {
        match self {
            Self::Daily => DateWindow::new(today, today),
            Self::Weekly => DateWindow::trailing(today, 7),
            Self::Monthly => DateWindow::month(today.year(), today.month()).unwrap_or(DateWindow {
                start: today,
                end: today,
            }),
            Self::QuarterYear => DateWindow::trailing(today, 90),
            Self::HalfYear => DateWindow::trailing(today, 180),
            Self::Custom => DateWindow::trailing(today, i64::from(custom_days)),
        }
    }

    /// Like [`DurationFilter::window`], but under `Monthly` an explicit
    /// `(year, month)` selects that calendar month instead of today's.
    pub fn resolve(
        &self,
        today: NaiveDate,
        month: Option<(i32, u32)>,
        custom_days: u32,
    ) -> DateWindow {
        match (self, month) {
            (Self::Monthly, Some((year, month))) => DateWindow::month(year, month)
                .unwrap_or_else(|| self.window(today, custom_days)),
            _ => self.window(today, custom_days),
        }
    }

    /// Label shown next to the home summary
    pub fn home_label(&self, custom_days: u32) -> String {
        match self {
            Self::Daily => "Today".to_string(),
            Self::Weekly => "This Week".to_string(),
            Self::Monthly => "This Month".to_string(),
            Self::QuarterYear => "Last 3 Months".to_string(),
            Self::HalfYear => "Last 6 Months".to_string(),
            Self::Custom => format!("Last {} Days", custom_days),
        }
    }

    /// Constant-style name, e.g. `QUARTER_YEAR`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::QuarterYear => "QUARTER_YEAR",
            Self::HalfYear => "HALF_YEAR",
            Self::Custom => "CUSTOM",
        }
    }
}

impl fmt::Display for DurationFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DurationFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "daily" | "day" | "today" => Ok(Self::Daily),
            "weekly" | "week" => Ok(Self::Weekly),
            "monthly" | "month" => Ok(Self::Monthly),
            "quarter_year" | "quarter" | "quarterly" => Ok(Self::QuarterYear),
            "half_year" | "half" => Ok(Self::HalfYear),
            "custom" => Ok(Self::Custom),
            _ => Err(format!(
                "Invalid duration: '{}'. Use daily, weekly, monthly, quarter, half or custom",
                s.trim()
            )),
        }
    }
}

/// Inclusive range of calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Everything from `today - days` on, floored at the earliest date
    pub fn trailing(today: NaiveDate, days: i64) -> Self {
        Self {
            start: today
                .checked_sub_signed(Duration::days(days))
                .unwrap_or(NaiveDate::MIN),
            end: NaiveDate::MAX,
        }
    }

    /// Whether the window has no upper bound
    pub fn is_open_ended(&self) -> bool {
        self.end == NaiveDate::MAX
    }

    /// The calendar month `month` (1-12) of `year`, or None if out of range
    pub fn month(year: i32, month: u32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        Some(Self {
            start,
            end: next.pred_opt()?,
        })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_open_ended() {
            write!(f, "since {}", self.start)
        } else {
            write!(f, "{} to {}", self.start, self.end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_daily_window() {
        let today = date(2024, 3, 15);
        let window = DurationFilter::Daily.window(today, 30);
        assert_eq!(window, DateWindow::new(today, today));
    }

    #[test]
    fn test_trailing_windows() {
        let today = date(2024, 3, 15);
        assert_eq!(
            DurationFilter::Weekly.window(today, 30).start,
            date(2024, 3, 8)
        );
        assert_eq!(
            DurationFilter::QuarterYear.window(today, 30).start,
            date(2023, 12, 16)
        );
        assert_eq!(
            DurationFilter::HalfYear.window(today, 30).start,
            date(2023, 9, 17)
        );
        let custom = DurationFilter::Custom.window(today, 10);
        assert_eq!(custom.start, date(2024, 3, 5));
        assert!(custom.is_open_ended());
        assert!(custom.contains(date(2024, 3, 20)));
        assert!(!custom.contains(date(2024, 3, 4)));
        assert_eq!(custom.to_string(), "since 2024-03-05");
    }

    #[test]
    fn test_huge_custom_days_floor_at_earliest_date() {
        let today = date(2024, 3, 15);
        let window = DurationFilter::Custom.window(today, u32::MAX);
        assert_eq!(window.start, NaiveDate::MIN);
        assert!(window.contains(date(1900, 1, 1)));
    }

    #[test]
    fn test_monthly_window_is_calendar_month() {
        let window = DurationFilter::Monthly.window(date(2024, 3, 15), 30);
        assert_eq!(window, DateWindow::new(date(2024, 3, 1), date(2024, 3, 31)));
        assert!(window.contains(date(2024, 3, 28)));
        assert!(!window.contains(date(2024, 4, 1)));
        assert!(!window.contains(date(2024, 2, 29)));
    }

    #[test]
    fn test_month_window_edges() {
        assert_eq!(
            DateWindow::month(2024, 2).unwrap().end,
            date(2024, 2, 29)
        );
        assert_eq!(
            DateWindow::month(2023, 12).unwrap().end,
            date(2023, 12, 31)
        );
        assert!(DateWindow::month(2024, 13).is_none());
        assert!(DateWindow::month(2024, 0).is_none());
    }

    #[test]
    fn test_resolve_explicit_month() {
        let today = date(2024, 3, 15);
        let window = DurationFilter::Monthly.resolve(today, Some((2023, 11)), 30);
        assert_eq!(window, DateWindow::new(date(2023, 11, 1), date(2023, 11, 30)));

        // Only Monthly honors the month selection
        let weekly = DurationFilter::Weekly.resolve(today, Some((2023, 11)), 30);
        assert_eq!(weekly.start, date(2024, 3, 8));

        // Invalid month falls back to the current one
        let fallback = DurationFilter::Monthly.resolve(today, Some((2024, 13)), 30);
        assert_eq!(fallback.start, date(2024, 3, 1));
    }

    #[test]
    fn test_home_labels() {
        assert_eq!(DurationFilter::Daily.home_label(30), "Today");
        assert_eq!(DurationFilter::Monthly.home_label(30), "This Month");
        assert_eq!(DurationFilter::QuarterYear.home_label(30), "Last 3 Months");
        assert_eq!(DurationFilter::Custom.home_label(45), "Last 45 Days");
    }

    #[test]
    fn test_parse_and_serde() {
        assert_eq!("quarter".parse::<DurationFilter>().unwrap(), DurationFilter::QuarterYear);
        assert_eq!("HALF_YEAR".parse::<DurationFilter>().unwrap(), DurationFilter::HalfYear);
        assert_eq!("half-year".parse::<DurationFilter>().unwrap(), DurationFilter::HalfYear);
        assert!("fortnight".parse::<DurationFilter>().is_err());

        let json = serde_json::to_string(&DurationFilter::QuarterYear).unwrap();
        assert_eq!(json, "\"QUARTER_YEAR\"");
        assert_eq!(DurationFilter::default(), DurationFilter::Monthly);
    }
}

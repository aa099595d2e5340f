//! Money type for representing currency amounts
//!
//! Internally stores amounts in minor units (hundredths, i64) to avoid
//! floating-point precision issues, so income and expense sums are exact.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use super::currency::CurrencyType;

/// Maximum number of digits accepted before the decimal point
pub const MAX_AMOUNT_DIGITS: usize = 10;

/// Represents a monetary amount stored as hundredths of the currency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from minor units
    ///
    /// # Examples
    /// ```
    /// use expense_tracker::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from major and minor units
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        Self(major * 100 + minor)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in minor units
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole units (truncated toward zero)
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Minor-unit portion (0-99)
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Parse a user-entered amount
    ///
    /// Accepts `1234`, `1234.5`, `1,234.50`. Commas are ignored, at most two
    /// decimal places and [`MAX_AMOUNT_DIGITS`] integer digits are allowed,
    /// and the result must be greater than zero.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
        if cleaned.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let (whole, fraction) = match cleaned.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (cleaned.as_str(), None),
        };

        if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
            return Err(MoneyParseError::InvalidFormat(s.trim().to_string()));
        }
        if whole.len() > MAX_AMOUNT_DIGITS {
            return Err(MoneyParseError::TooLarge(s.trim().to_string()));
        }

        let minor = match fraction {
            None => 0,
            Some(f) if (1..=2).contains(&f.len()) && f.chars().all(|c| c.is_ascii_digit()) => {
                let value: i64 = f
                    .parse()
                    .map_err(|_| MoneyParseError::InvalidFormat(s.trim().to_string()))?;
                if f.len() == 1 {
                    value * 10
                } else {
                    value
                }
            }
            Some(_) => return Err(MoneyParseError::InvalidFormat(s.trim().to_string())),
        };

        let major: i64 = whole
            .parse()
            .map_err(|_| MoneyParseError::InvalidFormat(s.trim().to_string()))?;

        let amount = Self(major * 100 + minor);
        if amount.is_zero() {
            return Err(MoneyParseError::NotPositive);
        }
        Ok(amount)
    }

    /// Format with thousands separators and no symbol, e.g. `1,234.50`
    pub fn format_plain(&self) -> String {
        let digits = self.major().abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}.{:02}", sign, grouped, self.minor())
    }

    /// Format with the currency symbol, e.g. `₹1,234.50`
    pub fn format_with(&self, currency: CurrencyType) -> String {
        let plain = self.format_plain();
        match plain.strip_prefix('-') {
            Some(rest) => format!("-{}{}", currency.symbol(), rest),
            None => format!("{}{}", currency.symbol(), plain),
        }
    }

    /// Amount as a decimal number, for export formats
    pub fn as_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_plain())
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    Empty,
    InvalidFormat(String),
    TooLarge(String),
    NotPositive,
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Amount is empty"),
            Self::InvalidFormat(s) => write!(f, "Invalid amount: {}", s),
            Self::TooLarge(s) => write!(
                f,
                "Amount too large: {} (max {} digits)",
                s, MAX_AMOUNT_DIGITS
            ),
            Self::NotPositive => write!(f, "Amount must be greater than zero"),
        }
    }
}

impl std::error::Error for MoneyParseError {}

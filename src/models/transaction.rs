//! Transaction model
//!
//! A transaction is a single income or expense entry. Category and payment
//! type are stored by name, so renaming a category does not rewrite history.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::TransactionId;
use super::money::Money;

/// Maximum note length in characters
pub const MAX_NOTE_LENGTH: usize = 500;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Income,
    #[default]
    Expense,
}

impl TransactionType {
    pub fn is_income(&self) -> bool {
        matches!(self, Self::Income)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "out" => Ok(Self::Expense),
            other => Err(format!(
                "Invalid transaction type: '{}'. Use income or expense",
                other
            )),
        }
    }
}

/// Fields a user supplies when recording a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    pub kind: TransactionType,
    pub amount: Money,
    pub category: String,
    pub payment_type: String,
    pub note: String,
    pub date: NaiveDate,
}

/// A recorded income or expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,

    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Always positive; direction comes from `kind`
    pub amount: Money,

    pub category: String,

    pub payment_type: String,

    #[serde(default)]
    pub note: String,

    /// Calendar date the transaction applies to
    pub date: NaiveDate,

    /// When the entry was recorded; orders history newest-first
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Build a transaction from a draft, assigning a fresh id
    pub fn from_draft(draft: TransactionDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id: TransactionId::new(),
            kind: draft.kind,
            amount: draft.amount,
            category: draft.category,
            payment_type: draft.payment_type,
            note: draft.note,
            date: draft.date,
            created_at,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind.is_income()
    }

    /// Amount with sign applied: positive for income, negative for expense
    pub fn signed_amount(&self) -> Money {
        if self.is_income() {
            self.amount
        } else {
            -self.amount
        }
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        validate_fields(self.amount, &self.category, &self.payment_type, &self.note)
    }
}

impl TransactionDraft {
    /// Validate the draft before it is recorded
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        validate_fields(self.amount, &self.category, &self.payment_type, &self.note)
    }
}

fn validate_fields(
    amount: Money,
    category: &str,
    payment_type: &str,
    note: &str,
) -> Result<(), TransactionValidationError> {
    if !amount.is_positive() {
        return Err(TransactionValidationError::NonPositiveAmount);
    }
    if category.trim().is_empty() {
        return Err(TransactionValidationError::MissingCategory);
    }
    if payment_type.trim().is_empty() {
        return Err(TransactionValidationError::MissingPaymentType);
    }
    let note_len = note.chars().count();
    if note_len > MAX_NOTE_LENGTH {
        return Err(TransactionValidationError::NoteTooLong(note_len));
    }
    Ok(())
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({}, {})",
            self.date, self.kind, self.amount, self.category, self.payment_type
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount,
    MissingCategory,
    MissingPaymentType,
    NoteTooLong(usize),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Please enter a valid amount"),
            Self::MissingCategory => write!(f, "Please select a category"),
            Self::MissingPaymentType => write!(f, "Please select a payment type"),
            Self::NoteTooLong(len) => write!(
                f,
                "Note too long ({} characters, max {})",
                len, MAX_NOTE_LENGTH
            ),
        }
    }
}

impl std::error::Error for TransactionValidationError {}

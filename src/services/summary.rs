//! Income and expense aggregation

use serde::Serialize;

use crate::models::{Money, Transaction};

/// Totals over a set of transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Summary {
    pub income: Money,
    pub expense: Money,
}

impl Summary {
    /// Sum income and expense separately
    pub fn of<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Self {
        transactions
            .into_iter()
            .fold(Self::default(), |mut acc, txn| {
                if txn.is_income() {
                    acc.income += txn.amount;
                } else {
                    acc.expense += txn.amount;
                }
                acc
            })
    }

    /// Income minus expense
    pub fn balance(&self) -> Money {
        self.income - self.expense
    }
}

/// Totals for one custom summary item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemSummary {
    pub item: String,
    pub summary: Summary,
}

/// Per-item totals
///
/// An item matches a transaction whose category or payment type has the same
/// name, ignoring case.
pub fn item_summaries(transactions: &[Transaction], items: &[String]) -> Vec<ItemSummary> {
    items
        .iter()
        .map(|item| ItemSummary {
            item: item.clone(),
            summary: Summary::of(transactions.iter().filter(|t| {
                t.category.eq_ignore_ascii_case(item) || t.payment_type.eq_ignore_ascii_case(item)
            })),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TransactionDraft, TransactionType};
    use chrono::{NaiveDate, Utc};

    fn txn(kind: TransactionType, cents: i64, category: &str, payment: &str) -> Transaction {
        Transaction::from_draft(
            TransactionDraft {
                kind,
                amount: Money::from_cents(cents),
                category: category.into(),
                payment_type: payment.into(),
                note: String::new(),
                date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_summary() {
        let list = vec![
            txn(TransactionType::Income, 10_000, "Salary", "Card"),
            txn(TransactionType::Expense, 2_500, "Food", "Cash"),
            txn(TransactionType::Expense, 1_500, "Travel", "Card"),
        ];
        let summary = Summary::of(&list);
        assert_eq!(summary.income.cents(), 10_000);
        assert_eq!(summary.expense.cents(), 4_000);
        assert_eq!(summary.balance().cents(), 6_000);
        assert_eq!(Summary::of(&Vec::<Transaction>::new()), Summary::default());
    }

    #[test]
    fn test_item_summaries_match_category_or_payment_type() {
        let list = vec![
            txn(TransactionType::Expense, 2_500, "Food", "Cash"),
            txn(TransactionType::Expense, 1_500, "Travel", "Card"),
            txn(TransactionType::Income, 900, "Refund", "card"),
        ];
        let items = vec!["food".to_string(), "Card".to_string(), "Gifts".to_string()];
        let totals = item_summaries(&list, &items);

        assert_eq!(totals[0].summary.expense.cents(), 2_500);
        assert_eq!(totals[1].summary.expense.cents(), 1_500);
        assert_eq!(totals[1].summary.income.cents(), 900);
        assert_eq!(totals[2].summary, Summary::default());
    }
}

//! Transaction repository
//!
//! Holds the session's transactions in insertion order. Filtered views are
//! streams whose date window is re-resolved against the clock every time the
//! collection changes.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;

use crate::clock::Clock;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{
    DateWindow, DurationFilter, Money, Transaction, TransactionDraft, TransactionId,
    TransactionType, DEFAULT_CUSTOM_DAYS,
};

use super::snapshot::{Observable, Stream};

/// Stream of transaction lists
pub type TransactionStream = Stream<Vec<Transaction>>;

/// Criteria for a filtered transaction view
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransactionQuery {
    pub duration: DurationFilter,
    /// Explicit calendar month, honored under `Monthly`
    pub month: Option<(i32, u32)>,
    /// Day count for `Custom`; defaults to 30
    pub custom_days: Option<u32>,
    pub payment_type: Option<String>,
    pub kind: Option<TransactionType>,
}

impl TransactionQuery {
    pub fn for_duration(duration: DurationFilter) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    /// Date window this query covers on `today`
    pub fn window(&self, today: chrono::NaiveDate) -> DateWindow {
        self.duration.resolve(
            today,
            self.month,
            self.custom_days.unwrap_or(DEFAULT_CUSTOM_DAYS),
        )
    }

    /// Whether `txn` passes the non-date criteria
    pub fn matches(&self, txn: &Transaction) -> bool {
        if let Some(payment_type) = &self.payment_type {
            if &txn.payment_type != payment_type {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if txn.kind != kind {
                return false;
            }
        }
        true
    }
}

/// Order transactions newest-recorded first
///
/// Entries recorded at the same instant keep reverse insertion order.
pub fn newest_first(mut transactions: Vec<Transaction>) -> Vec<Transaction> {
    transactions.reverse();
    transactions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    transactions
}

/// In-memory transaction store
pub struct TransactionRepository {
    clock: Arc<dyn Clock>,
    transactions: Observable<Vec<Transaction>>,
}

impl TransactionRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            transactions: Observable::new(Vec::new()),
        }
    }

    /// Record a new transaction
    pub fn add(&self, draft: TransactionDraft) -> ExpenseResult<Transaction> {
        draft
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        let txn = Transaction::from_draft(draft, self.clock.now());
        let added = txn.clone();
        self.transactions.update(move |current| {
            let mut next = current.clone();
            next.push(txn);
            next
        });
        debug!(id = %added.id, amount = %added.amount, "transaction added");
        Ok(added)
    }

    /// Stream of every transaction, in insertion order
    pub fn transactions(&self) -> TransactionStream {
        self.transactions.stream()
    }

    /// Snapshot of every transaction, in insertion order
    pub fn all(&self) -> Vec<Transaction> {
        self.transactions.get()
    }

    pub fn count(&self) -> usize {
        self.transactions.read(|list| list.len())
    }

    /// Transactions dated within `window`
    pub fn by_date_range(&self, window: DateWindow) -> TransactionStream {
        self.transactions.stream_map(move |list: &Vec<Transaction>| {
            list.iter()
                .filter(|t| window.contains(t.date))
                .cloned()
                .collect()
        })
    }

    /// Transactions matching `query`, with the window resolved per emission
    pub fn by_filter(&self, query: TransactionQuery) -> TransactionStream {
        let clock = Arc::clone(&self.clock);
        self.transactions.stream_map(move |list: &Vec<Transaction>| {
            let window = query.window(clock.today());
            list.iter()
                .filter(|t| window.contains(t.date) && query.matches(t))
                .cloned()
                .collect()
        })
    }

    /// Sum of income dated within `window`
    pub fn total_income(&self, window: DateWindow) -> Money {
        self.total(window, TransactionType::Income)
    }

    /// Sum of expenses dated within `window`
    pub fn total_expense(&self, window: DateWindow) -> Money {
        self.total(window, TransactionType::Expense)
    }

    fn total(&self, window: DateWindow, kind: TransactionType) -> Money {
        self.transactions.read(|list| {
            list.iter()
                .filter(|t| t.kind == kind && window.contains(t.date))
                .map(|t| t.amount)
                .sum()
        })
    }

    pub fn by_type(&self, kind: TransactionType) -> TransactionStream {
        self.transactions.stream_map(move |list: &Vec<Transaction>| {
            list.iter().filter(|t| t.kind == kind).cloned().collect()
        })
    }

    pub fn by_payment_type(&self, payment_type: impl Into<String>) -> TransactionStream {
        let payment_type = payment_type.into();
        self.transactions.stream_map(move |list: &Vec<Transaction>| {
            list.iter()
                .filter(|t| t.payment_type == payment_type)
                .cloned()
                .collect()
        })
    }

    pub fn by_category(&self, category: impl Into<String>) -> TransactionStream {
        let category = category.into();
        self.transactions.stream_map(move |list: &Vec<Transaction>| {
            list.iter()
                .filter(|t| t.category == category)
                .cloned()
                .collect()
        })
    }

    /// Replace the transaction with the same id
    pub fn update(&self, txn: Transaction) -> ExpenseResult<()> {
        txn.validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        let id = txn.id;
        self.transactions.try_update(move |current| {
            if !current.iter().any(|t| t.id == txn.id) {
                return Err(ExpenseError::transaction_not_found(txn.id.to_string()));
            }
            let next = current
                .iter()
                .map(|t| if t.id == txn.id { txn.clone() } else { t.clone() })
                .collect();
            Ok((next, ()))
        })?;
        debug!(id = %id, "transaction updated");
        Ok(())
    }

    /// Remove the transaction with `id`, returning it
    pub fn delete(&self, id: TransactionId) -> ExpenseResult<Transaction> {
        let removed = self.transactions.try_update(|current| {
            let removed = current
                .iter()
                .find(|t| t.id == id)
                .cloned()
                .ok_or_else(|| ExpenseError::transaction_not_found(id.to_string()))?;
            let next = current.iter().filter(|t| t.id != id).cloned().collect();
            Ok((next, removed))
        })?;
        debug!(id = %id, "transaction deleted");
        Ok(removed)
    }

    pub fn get(&self, id: TransactionId) -> Option<Transaction> {
        self.transactions
            .read(|list| list.iter().find(|t| t.id == id).cloned())
    }

    /// Resolve a full or short (`txn-xxxxxxxx`) id
    pub fn find(&self, reference: &str) -> ExpenseResult<Transaction> {
        self.transactions
            .read(|list| list.iter().find(|t| t.id.matches(reference)).cloned())
            .ok_or_else(|| ExpenseError::transaction_not_found(reference.trim()))
    }

    /// Number of transactions filed under `category`
    pub fn category_usage(&self, category: &str) -> usize {
        self.transactions
            .read(|list| list.iter().filter(|t| t.category == category).count())
    }

    /// Number of transactions paid with `payment_type`
    pub fn payment_type_usage(&self, payment_type: &str) -> usize {
        self.transactions
            .read(|list| list.iter().filter(|t| t.payment_type == payment_type).count())
    }

    /// Stream of category names referenced by any transaction
    pub fn used_categories(&self) -> Stream<Vec<Transaction>, BTreeSet<String>> {
        self.transactions.stream_map(|list: &Vec<Transaction>| {
            list.iter().map(|t| t.category.clone()).collect()
        })
    }

    /// Stream of payment type names referenced by any transaction
    pub fn used_payment_types(&self) -> Stream<Vec<Transaction>, BTreeSet<String>> {
        self.transactions.stream_map(|list: &Vec<Transaction>| {
            list.iter().map(|t| t.payment_type.clone()).collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn repo() -> TransactionRepository {
        TransactionRepository::new(Arc::new(FixedClock::new(date(2024, 3, 15))))
    }

    fn draft(kind: TransactionType, cents: i64, day: NaiveDate) -> TransactionDraft {
        TransactionDraft {
            kind,
            amount: Money::from_cents(cents),
            category: "Food".into(),
            payment_type: "Cash".into(),
            note: String::new(),
            date: day,
        }
    }

    #[test]
    fn test_added_transaction_appears_once() {
        let repo = repo();
        let added = repo
            .add(draft(TransactionType::Expense, 500, date(2024, 3, 15)))
            .unwrap();

        let all = repo.all();
        assert_eq!(all.iter().filter(|t| t.id == added.id).count(), 1);
        assert_eq!(repo.get(added.id), Some(added));
    }

    #[test]
    fn test_add_rejects_invalid_draft() {
        let repo = repo();
        let err = repo
            .add(draft(TransactionType::Expense, 0, date(2024, 3, 15)))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(repo.count(), 0);
    }

    #[test]
    fn test_delete_preserves_order() {
        let repo = repo();
        let ids: Vec<_> = (1..=4)
            .map(|i| {
                repo.add(draft(TransactionType::Expense, i * 100, date(2024, 3, 1)))
                    .unwrap()
                    .id
            })
            .collect();

        let removed = repo.delete(ids[1]).unwrap();
        assert_eq!(removed.id, ids[1]);

        let remaining: Vec<_> = repo.all().into_iter().map(|t| t.id).collect();
        assert_eq!(remaining, vec![ids[0], ids[2], ids[3]]);
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let repo = repo();
        let txn = repo
            .add(draft(TransactionType::Expense, 100, date(2024, 3, 1)))
            .unwrap();
        repo.delete(txn.id).unwrap();

        assert!(repo.delete(txn.id).unwrap_err().is_not_found());
        assert!(repo.update(txn).unwrap_err().is_not_found());
    }

    #[test]
    fn test_update_replaces_in_place() {
        let repo = repo();
        let first = repo
            .add(draft(TransactionType::Expense, 100, date(2024, 3, 1)))
            .unwrap();
        repo.add(draft(TransactionType::Income, 200, date(2024, 3, 2)))
            .unwrap();

        let mut edited = first.clone();
        edited.amount = Money::from_cents(999);
        repo.update(edited).unwrap();

        let all = repo.all();
        assert_eq!(all[0].id, first.id);
        assert_eq!(all[0].amount.cents(), 999);
    }

    #[test]
    fn test_monthly_filter_is_calendar_month() {
        let repo = repo();
        repo.add(draft(TransactionType::Expense, 100, date(2024, 3, 1))).unwrap();
        repo.add(draft(TransactionType::Expense, 200, date(2024, 3, 28))).unwrap();
        repo.add(draft(TransactionType::Expense, 300, date(2024, 2, 29))).unwrap();
        repo.add(draft(TransactionType::Expense, 400, date(2023, 3, 15))).unwrap();

        let mut stream = repo.by_filter(TransactionQuery::for_duration(DurationFilter::Monthly));
        let march = stream.poll_next().unwrap();
        let cents: Vec<_> = march.iter().map(|t| t.amount.cents()).collect();
        assert_eq!(cents, vec![100, 200]);
    }

    #[test]
    fn test_filter_stream_follows_writes() {
        let repo = repo();
        let mut stream = repo.by_filter(TransactionQuery {
            duration: DurationFilter::Weekly,
            kind: Some(TransactionType::Income),
            ..TransactionQuery::default()
        });
        assert!(stream.poll_next().unwrap().is_empty());

        repo.add(draft(TransactionType::Income, 100, date(2024, 3, 10))).unwrap();
        repo.add(draft(TransactionType::Expense, 100, date(2024, 3, 10))).unwrap();
        repo.add(draft(TransactionType::Income, 100, date(2024, 3, 1))).unwrap();

        assert_eq!(stream.poll_next().unwrap().len(), 1);
        assert!(stream.poll_next().is_none());
    }

    #[test]
    fn test_trailing_window_includes_future_dates() {
        let repo = repo();
        repo.add(draft(TransactionType::Expense, 100, date(2024, 3, 18))).unwrap();
        let mut weekly = repo.by_filter(TransactionQuery::for_duration(DurationFilter::Weekly));
        assert_eq!(weekly.poll_next().unwrap().len(), 1);

        // Daily stays pinned to today
        let mut daily = repo.by_filter(TransactionQuery::for_duration(DurationFilter::Daily));
        assert!(daily.poll_next().unwrap().is_empty());
    }

    #[test]
    fn test_huge_custom_days_does_not_panic() {
        let repo = repo();
        repo.add(draft(TransactionType::Expense, 100, date(2024, 3, 10))).unwrap();
        let stream = repo.by_filter(TransactionQuery {
            duration: DurationFilter::Custom,
            custom_days: Some(4_000_000_000),
            ..TransactionQuery::default()
        });
        assert_eq!(stream.current().len(), 1);
    }

    #[test]
    fn test_explicit_month_and_payment_filter() {
        let repo = repo();
        repo.add(draft(TransactionType::Expense, 100, date(2024, 1, 5))).unwrap();
        let mut card = draft(TransactionType::Expense, 200, date(2024, 1, 6));
        card.payment_type = "Card".into();
        repo.add(card).unwrap();

        let mut stream = repo.by_filter(TransactionQuery {
            duration: DurationFilter::Monthly,
            month: Some((2024, 1)),
            payment_type: Some("Card".into()),
            ..TransactionQuery::default()
        });
        let january = stream.poll_next().unwrap();
        assert_eq!(january.len(), 1);
        assert_eq!(january[0].amount.cents(), 200);
    }

    #[test]
    fn test_totals_match_full_list_computation() {
        let repo = repo();
        for (kind, cents, day) in [
            (TransactionType::Income, 10_000, 1),
            (TransactionType::Expense, 2_500, 3),
            (TransactionType::Expense, 1_250, 14),
            (TransactionType::Income, 500, 20),
        ] {
            repo.add(draft(kind, cents, date(2024, 3, day))).unwrap();
        }
        repo.add(draft(TransactionType::Expense, 7_000, date(2024, 4, 1))).unwrap();

        let window = DateWindow::month(2024, 3).unwrap();
        let all = repo.all();
        let expected_income: Money = all
            .iter()
            .filter(|t| t.is_income() && window.contains(t.date))
            .map(|t| t.amount)
            .sum();
        let expected_expense: Money = all
            .iter()
            .filter(|t| !t.is_income() && window.contains(t.date))
            .map(|t| t.amount)
            .sum();

        assert_eq!(repo.total_income(window), expected_income);
        assert_eq!(repo.total_expense(window), expected_expense);
        assert_eq!(repo.total_expense(window).cents(), 3_750);
    }

    #[test]
    fn test_find_by_short_id_and_usage() {
        let repo = repo();
        let txn = repo
            .add(draft(TransactionType::Expense, 100, date(2024, 3, 1)))
            .unwrap();
        assert_eq!(repo.find(&txn.id.to_string()).unwrap().id, txn.id);
        assert!(repo.find("txn-zzzzzzzz").unwrap_err().is_not_found());

        assert_eq!(repo.category_usage("Food"), 1);
        assert_eq!(repo.payment_type_usage("Card"), 0);
        let used = repo.used_categories().current();
        assert!(used.contains("Food"));
    }

    #[test]
    fn test_simple_views() {
        let repo = repo();
        repo.add(draft(TransactionType::Income, 100, date(2024, 3, 1))).unwrap();
        repo.add(draft(TransactionType::Expense, 100, date(2024, 3, 2))).unwrap();

        assert_eq!(repo.by_type(TransactionType::Income).current().len(), 1);
        assert_eq!(repo.by_category("Food").current().len(), 2);
        assert_eq!(repo.by_payment_type("UPI").current().len(), 0);
        let window = DateWindow::new(date(2024, 3, 2), date(2024, 3, 2));
        assert_eq!(repo.by_date_range(window).current().len(), 1);
    }

    #[test]
    fn test_newest_first() {
        let repo = repo();
        let a = repo.add(draft(TransactionType::Expense, 1, date(2024, 3, 1))).unwrap();
        let b = repo.add(draft(TransactionType::Expense, 2, date(2024, 3, 1))).unwrap();
        let ordered = newest_first(repo.all());
        assert_eq!(ordered[0].id, b.id);
        assert_eq!(ordered[1].id, a.id);
    }
}

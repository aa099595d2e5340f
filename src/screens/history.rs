//! History screen
//!
//! Lists transactions newest first, filtered by duration (or an explicit
//! month under `Monthly`), payment type and transaction type, one page at a
//! time. Edits and deletes go straight to the repository and come back
//! through the open stream.

use std::sync::Arc;

use crate::models::{
    CurrencyType, DurationFilter, Money, PaymentType, Transaction, TransactionId,
    TransactionType, UserSettings,
};
use crate::services::{PeriodService, Summary};
use crate::state::{
    FlowUseCase, StateFullResult, Store, UiEffect, UiEvent, UiState, UseCase, ViewModel,
};
use crate::storage::{newest_first, Storage, Stream, TransactionQuery};

/// Rows shown per page unless configured otherwise
pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryState {
    /// The visible page, newest first
    pub transactions: Vec<Transaction>,
    pub selected_duration: DurationFilter,
    pub selected_year: i32,
    pub selected_month: u32,
    pub payment_type_filter: Option<String>,
    pub type_filter: Option<TransactionType>,
    pub payment_types: Vec<PaymentType>,
    pub total_income: Money,
    pub total_expense: Money,
    pub currency: CurrencyType,
    pub period_label: String,
    pub visible_limit: usize,
    pub has_more: bool,
    /// Matches across all pages
    pub total_count: usize,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl HistoryState {
    pub fn balance(&self) -> Money {
        self.total_income - self.total_expense
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryEvent {
    DurationFilterChanged(DurationFilter),
    YearChanged(i32),
    MonthChanged(u32),
    PaymentTypeFilterChanged(Option<String>),
    TransactionTypeFilterChanged(Option<TransactionType>),
    LoadTransactions,
    LoadMore,
    UpdateTransaction(Transaction),
    DeleteTransaction(TransactionId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryEffect {
    ShowError(String),
    ShowSuccess(String),
}

impl UiState for HistoryState {}
impl UiEvent for HistoryEvent {}
impl UiEffect for HistoryEffect {}

pub struct HistoryViewModel {
    store: Store<HistoryState, HistoryEffect>,
    period: PeriodService,
    page_size: usize,
    custom_days: u32,
    matching: Vec<Transaction>,
    results: Stream<Vec<Transaction>>,
    settings: Stream<UserSettings>,
    payment_types: Stream<Vec<PaymentType>>,
    filtered: FlowUseCase<TransactionQuery, Vec<Transaction>>,
    update_transaction: UseCase<Transaction, ()>,
    delete_transaction: UseCase<TransactionId, Transaction>,
}

impl HistoryViewModel {
    pub fn new(storage: Arc<Storage>, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let period = PeriodService::new(Arc::clone(storage.clock()));
        let settings = storage.settings.current();
        let (year, month) = period.current_month();

        let initial = HistoryState {
            transactions: Vec::new(),
            selected_duration: DurationFilter::Monthly,
            selected_year: year,
            selected_month: month,
            payment_type_filter: None,
            type_filter: None,
            payment_types: Vec::new(),
            total_income: Money::zero(),
            total_expense: Money::zero(),
            currency: settings.currency,
            period_label: period.history_label(
                DurationFilter::Monthly,
                year,
                month,
                settings.custom_days,
            ),
            visible_limit: page_size,
            has_more: false,
            total_count: 0,
            is_loading: true,
            error: None,
        };

        let repo = Arc::clone(&storage.transactions);
        let filtered = FlowUseCase::new("history_transactions", move |query| repo.by_filter(query));
        let repo = Arc::clone(&storage.transactions);
        let update_transaction = UseCase::new("update_transaction", move |txn| repo.update(txn));
        let repo = Arc::clone(&storage.transactions);
        let delete_transaction = UseCase::new("delete_transaction", move |id| repo.delete(id));

        let mut vm = Self {
            results: filtered.invoke(query_for(&initial, settings.custom_days)),
            store: Store::new(initial),
            period,
            page_size,
            custom_days: settings.custom_days,
            matching: Vec::new(),
            settings: storage.settings.stream(),
            payment_types: storage.payment_types.stream(),
            filtered,
            update_transaction,
            delete_transaction,
        };
        vm.sync();
        vm
    }

    /// Reopen the result stream for the current filters, back at page one
    fn reload(&mut self) {
        let page_size = self.page_size;
        let custom_days = self.custom_days;
        let period = &self.period;
        self.store.set_state(|s| HistoryState {
            is_loading: true,
            visible_limit: page_size,
            period_label: period.history_label(
                s.selected_duration,
                s.selected_year,
                s.selected_month,
                custom_days,
            ),
            ..s.clone()
        });
        let query = self.store.with_state(|s| query_for(s, custom_days));
        self.results = self.filtered.invoke(query);
    }

    fn apply_results(&mut self, transactions: Vec<Transaction>) {
        self.matching = newest_first(transactions);
        let totals = Summary::of(&self.matching);
        let matching = &self.matching;
        self.store.set_state(|s| HistoryState {
            is_loading: false,
            total_income: totals.income,
            total_expense: totals.expense,
            ..page(s, matching)
        });
    }

    fn apply_settings(&mut self, settings: UserSettings) {
        let days_changed = settings.custom_days != self.custom_days;
        self.custom_days = settings.custom_days;
        self.store.set_state(|s| HistoryState {
            currency: settings.currency,
            ..s.clone()
        });
        if days_changed {
            self.reload();
        }
    }

    fn load_more(&mut self) {
        let page_size = self.page_size;
        let matching = &self.matching;
        self.store.set_state(|s| {
            if !s.has_more {
                return s.clone();
            }
            page(
                &HistoryState {
                    visible_limit: s.visible_limit + page_size,
                    ..s.clone()
                },
                matching,
            )
        });
    }

    fn update(&mut self, txn: Transaction) {
        match self.update_transaction.invoke(txn) {
            StateFullResult::Success(()) => self
                .store
                .set_effect(HistoryEffect::ShowSuccess("Transaction updated".to_string())),
            StateFullResult::Error { message } => self.show_error(message),
            StateFullResult::Loading => {}
        }
    }

    fn delete(&mut self, id: TransactionId) {
        match self.delete_transaction.invoke(id) {
            StateFullResult::Success(_) => self
                .store
                .set_effect(HistoryEffect::ShowSuccess("Transaction deleted".to_string())),
            StateFullResult::Error { message } => self.show_error(message),
            StateFullResult::Loading => {}
        }
    }

    fn show_error(&mut self, message: String) {
        self.store.set_state(|s| HistoryState {
            error: Some(message.clone()),
            ..s.clone()
        });
        self.store.set_effect(HistoryEffect::ShowError(message));
    }
}

fn query_for(state: &HistoryState, custom_days: u32) -> TransactionQuery {
    TransactionQuery {
        duration: state.selected_duration,
        month: Some((state.selected_year, state.selected_month)),
        custom_days: Some(custom_days),
        payment_type: state.payment_type_filter.clone(),
        kind: state.type_filter,
    }
}

/// `state` with the first `visible_limit` of `matching` on screen
fn page(state: &HistoryState, matching: &[Transaction]) -> HistoryState {
    let shown = state.visible_limit.min(matching.len());
    HistoryState {
        transactions: matching[..shown].to_vec(),
        has_more: matching.len() > shown,
        total_count: matching.len(),
        ..state.clone()
    }
}

impl ViewModel for HistoryViewModel {
    type State = HistoryState;
    type Event = HistoryEvent;
    type Effect = HistoryEffect;

    fn state(&self) -> HistoryState {
        self.store.current()
    }

    fn on_event(&mut self, event: HistoryEvent) {
        if self.store.is_closed() {
            return;
        }
        match event {
            HistoryEvent::DurationFilterChanged(duration) => {
                self.store.set_state(|s| HistoryState {
                    selected_duration: duration,
                    ..s.clone()
                });
                self.reload();
            }
            HistoryEvent::YearChanged(year) => {
                self.store.set_state(|s| HistoryState {
                    selected_year: year,
                    ..s.clone()
                });
                self.reload();
            }
            HistoryEvent::MonthChanged(month) => {
                if !(1..=12).contains(&month) {
                    self.show_error(format!("Invalid month: {}", month));
                    return;
                }
                self.store.set_state(|s| HistoryState {
                    selected_month: month,
                    ..s.clone()
                });
                self.reload();
            }
            HistoryEvent::PaymentTypeFilterChanged(payment_type) => {
                self.store.set_state(|s| HistoryState {
                    payment_type_filter: payment_type,
                    ..s.clone()
                });
                self.reload();
            }
            HistoryEvent::TransactionTypeFilterChanged(kind) => {
                self.store.set_state(|s| HistoryState {
                    type_filter: kind,
                    ..s.clone()
                });
                self.reload();
            }
            HistoryEvent::LoadTransactions => self.reload(),
            HistoryEvent::LoadMore => self.load_more(),
            HistoryEvent::UpdateTransaction(txn) => self.update(txn),
            HistoryEvent::DeleteTransaction(id) => self.delete(id),
        }
    }

    fn sync(&mut self) {
        if self.store.is_closed() {
            return;
        }
        if let Some(settings) = self.settings.poll_next() {
            self.apply_settings(settings);
        }
        if let Some(payment_types) = self.payment_types.poll_next() {
            self.store.set_state(|s| HistoryState {
                payment_types,
                ..s.clone()
            });
        }
        if let Some(transactions) = self.results.poll_next() {
            self.apply_results(transactions);
        }
    }

    fn drain_effects(&mut self) -> Vec<HistoryEffect> {
        self.store.drain_effects()
    }

    fn close(&mut self) {
        self.store.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::models::TransactionDraft;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn storage() -> Arc<Storage> {
        Arc::new(Storage::in_memory(
            Arc::new(FixedClock::new(date(2024, 3, 15))),
            UserSettings::default(),
            true,
        ))
    }

    fn record(storage: &Storage, kind: TransactionType, cents: i64, payment: &str, on: NaiveDate) {
        storage
            .transactions
            .add(TransactionDraft {
                kind,
                amount: Money::from_cents(cents),
                category: "Food".into(),
                payment_type: payment.into(),
                note: String::new(),
                date: on,
            })
            .unwrap();
    }

    #[test]
    fn test_defaults_to_current_month() {
        let storage = storage();
        record(&storage, TransactionType::Expense, 1_000, "Cash", date(2024, 3, 1));
        record(&storage, TransactionType::Expense, 2_000, "Cash", date(2024, 3, 31));
        record(&storage, TransactionType::Expense, 4_000, "Cash", date(2024, 2, 29));

        let vm = HistoryViewModel::new(storage, DEFAULT_PAGE_SIZE);
        let state = vm.state();
        assert_eq!(state.period_label, "March 2024");
        assert_eq!(state.total_count, 2);
        assert_eq!(state.total_expense.cents(), 3_000);
        assert!(!state.is_loading);
    }

    #[test]
    fn test_month_selection() {
        let storage = storage();
        record(&storage, TransactionType::Income, 5_000, "Cash", date(2024, 2, 10));
        record(&storage, TransactionType::Expense, 700, "Cash", date(2024, 3, 10));

        let mut vm = HistoryViewModel::new(storage, DEFAULT_PAGE_SIZE);
        vm.dispatch(HistoryEvent::MonthChanged(2));
        let state = vm.state();
        assert_eq!(state.period_label, "February 2024");
        assert_eq!(state.total_count, 1);
        assert_eq!(state.total_income.cents(), 5_000);

        vm.dispatch(HistoryEvent::MonthChanged(13));
        assert_eq!(
            vm.drain_effects(),
            vec![HistoryEffect::ShowError("Invalid month: 13".into())]
        );
        assert_eq!(vm.state().selected_month, 2);
    }

    #[test]
    fn test_filters_combine() {
        let storage = storage();
        record(&storage, TransactionType::Expense, 100, "Cash", date(2024, 3, 2));
        record(&storage, TransactionType::Expense, 200, "Card", date(2024, 3, 3));
        record(&storage, TransactionType::Income, 300, "Card", date(2024, 3, 4));

        let mut vm = HistoryViewModel::new(storage, DEFAULT_PAGE_SIZE);
        vm.dispatch(HistoryEvent::PaymentTypeFilterChanged(Some("Card".into())));
        assert_eq!(vm.state().total_count, 2);

        vm.dispatch(HistoryEvent::TransactionTypeFilterChanged(Some(
            TransactionType::Income,
        )));
        let state = vm.state();
        assert_eq!(state.total_count, 1);
        assert_eq!(state.transactions[0].amount.cents(), 300);

        vm.dispatch(HistoryEvent::PaymentTypeFilterChanged(None));
        vm.dispatch(HistoryEvent::TransactionTypeFilterChanged(None));
        assert_eq!(vm.state().total_count, 3);
    }

    #[test]
    fn test_paging() {
        let storage = storage();
        for i in 0..5 {
            record(&storage, TransactionType::Expense, 100 + i, "Cash", date(2024, 3, 10));
        }

        let mut vm = HistoryViewModel::new(storage, 2);
        let state = vm.state();
        assert_eq!(state.transactions.len(), 2);
        assert!(state.has_more);
        assert_eq!(state.total_count, 5);
        assert_eq!(state.total_expense.cents(), 510);

        vm.dispatch(HistoryEvent::LoadMore);
        vm.dispatch(HistoryEvent::LoadMore);
        let state = vm.state();
        assert_eq!(state.transactions.len(), 5);
        assert!(!state.has_more);

        vm.dispatch(HistoryEvent::LoadMore);
        assert_eq!(vm.state().visible_limit, 6);
    }

    #[test]
    fn test_update_and_delete_flow_back() {
        let storage = storage();
        record(&storage, TransactionType::Expense, 900, "Cash", date(2024, 3, 5));

        let mut vm = HistoryViewModel::new(Arc::clone(&storage), DEFAULT_PAGE_SIZE);
        let mut txn = vm.state().transactions[0].clone();
        txn.amount = Money::from_cents(1_500);
        vm.dispatch(HistoryEvent::UpdateTransaction(txn.clone()));
        assert_eq!(vm.state().total_expense.cents(), 1_500);
        assert_eq!(
            vm.drain_effects(),
            vec![HistoryEffect::ShowSuccess("Transaction updated".into())]
        );

        vm.dispatch(HistoryEvent::DeleteTransaction(txn.id));
        assert!(vm.state().transactions.is_empty());
        vm.drain_effects();

        vm.dispatch(HistoryEvent::DeleteTransaction(txn.id));
        let effects = vm.drain_effects();
        assert!(matches!(&effects[0], HistoryEffect::ShowError(m) if m.contains("not found")));
    }

    #[test]
    fn test_currency_follows_settings() {
        let storage = storage();
        let mut vm = HistoryViewModel::new(Arc::clone(&storage), DEFAULT_PAGE_SIZE);
        storage.settings.update_currency(CurrencyType::EUR).unwrap();
        vm.sync();
        assert_eq!(vm.state().currency, CurrencyType::EUR);
    }
}

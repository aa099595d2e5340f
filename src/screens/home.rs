//! Home screen
//!
//! Entry form for a new transaction plus a summary of income and expense
//! over the home duration chosen in settings. The summary follows both the
//! settings and the transaction list: a settings change reopens the filtered
//! stream, and every transaction write re-emits it.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::clock::Clock;
use crate::models::{
    Category, CurrencyType, Money, PaymentType, Transaction, TransactionDraft, TransactionType,
    UserSettings,
};
use crate::services::{item_summaries, ItemSummary, Summary};
use crate::state::{
    FlowUseCase, StateFullResult, Store, UiEffect, UiEvent, UiState, UseCase, ViewModel,
};
use crate::storage::{Storage, Stream, TransactionQuery};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeState {
    pub transaction_type: TransactionType,
    pub amount: String,
    pub note: String,
    pub selected_category: Option<Category>,
    pub selected_payment_type: Option<PaymentType>,
    pub selected_date: NaiveDate,
    pub categories: Vec<Category>,
    pub payment_types: Vec<PaymentType>,
    pub total_income: Money,
    pub total_expense: Money,
    pub duration_label: String,
    pub currency: CurrencyType,
    pub custom_summaries: Vec<ItemSummary>,
    pub is_loading: bool,
    pub is_submitting: bool,
    pub show_date_picker: bool,
    pub error: Option<String>,
}

impl HomeState {
    fn new(today: NaiveDate) -> Self {
        Self {
            transaction_type: TransactionType::Expense,
            amount: String::new(),
            note: String::new(),
            selected_category: None,
            selected_payment_type: None,
            selected_date: today,
            categories: Vec::new(),
            payment_types: Vec::new(),
            total_income: Money::zero(),
            total_expense: Money::zero(),
            duration_label: "This Month".to_string(),
            currency: CurrencyType::default(),
            custom_summaries: Vec::new(),
            is_loading: false,
            is_submitting: false,
            show_date_picker: false,
            error: None,
        }
    }

    /// Income minus expense over the summary window
    pub fn balance(&self) -> Money {
        self.total_income - self.total_expense
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeEvent {
    TypeSelected(TransactionType),
    AmountChanged(String),
    NoteChanged(String),
    CategorySelected(Category),
    PaymentTypeSelected(PaymentType),
    DateSelected(NaiveDate),
    ShowDatePicker,
    DismissDatePicker,
    SubmitTransaction,
    LoadSummary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeEffect {
    TransactionAdded(Transaction),
    ShowError(String),
    ShowDatePickerDialog,
    ShowSuccess(String),
}

impl UiState for HomeState {}
impl UiEvent for HomeEvent {}
impl UiEffect for HomeEffect {}

pub struct HomeViewModel {
    store: Store<HomeState, HomeEffect>,
    clock: Arc<dyn Clock>,
    categories: Stream<Vec<Category>>,
    payment_types: Stream<Vec<PaymentType>>,
    settings: Stream<UserSettings>,
    summary: Stream<Vec<Transaction>>,
    current_settings: UserSettings,
    filtered: FlowUseCase<TransactionQuery, Vec<Transaction>>,
    add_transaction: UseCase<TransactionDraft, Transaction>,
}

impl HomeViewModel {
    pub fn new(storage: Arc<Storage>) -> Self {
        let clock = Arc::clone(storage.clock());
        let current_settings = storage.settings.current();

        let repo = Arc::clone(&storage.transactions);
        let filtered = FlowUseCase::new("home_transactions", move |query| repo.by_filter(query));
        let repo = Arc::clone(&storage.transactions);
        let add_transaction = UseCase::new("add_transaction", move |draft| repo.add(draft));

        let mut vm = Self {
            store: Store::new(HomeState::new(clock.today())),
            categories: storage.categories.stream(),
            payment_types: storage.payment_types.stream(),
            settings: storage.settings.stream(),
            summary: filtered.invoke(summary_query(&current_settings)),
            current_settings,
            clock,
            filtered,
            add_transaction,
        };
        vm.store.set_state(|s| HomeState {
            is_loading: true,
            ..s.clone()
        });
        vm.sync();
        vm
    }

    fn apply_categories(&mut self, categories: Vec<Category>) {
        self.store.set_state(|s| HomeState {
            selected_category: reselect(&s.selected_category, &categories, |c| c.id),
            categories,
            ..s.clone()
        });
    }

    fn apply_payment_types(&mut self, payment_types: Vec<PaymentType>) {
        self.store.set_state(|s| HomeState {
            selected_payment_type: reselect(&s.selected_payment_type, &payment_types, |p| p.id),
            payment_types,
            ..s.clone()
        });
    }

    fn apply_settings(&mut self, settings: UserSettings) {
        self.summary = self.filtered.invoke(summary_query(&settings));
        self.store.set_state(|s| HomeState {
            currency: settings.currency,
            duration_label: settings.home_duration.home_label(settings.custom_days),
            ..s.clone()
        });
        self.current_settings = settings;
    }

    fn apply_summary(&mut self, transactions: Vec<Transaction>) {
        let totals = Summary::of(&transactions);
        let items = item_summaries(&transactions, &self.current_settings.custom_summary_items);
        self.store.set_state(|s| HomeState {
            is_loading: false,
            total_income: totals.income,
            total_expense: totals.expense,
            custom_summaries: items,
            ..s.clone()
        });
    }

    fn load_summary(&mut self) {
        self.store.set_state(|s| HomeState {
            is_loading: true,
            ..s.clone()
        });
        self.summary = self.filtered.invoke(summary_query(&self.current_settings));
    }

    fn submit(&mut self) {
        let state = self.store.current();

        let Ok(amount) = Money::parse(&state.amount) else {
            self.show_error("Please enter a valid amount");
            return;
        };
        let Some(category) = state.selected_category else {
            self.show_error("Please select a category");
            return;
        };
        let Some(payment_type) = state.selected_payment_type else {
            self.show_error("Please select a payment type");
            return;
        };

        let draft = TransactionDraft {
            kind: state.transaction_type,
            amount,
            category: category.name,
            payment_type: payment_type.name,
            note: state.note.trim().to_string(),
            date: state.selected_date,
        };
        if let Err(err) = draft.validate() {
            self.show_error(err.to_string());
            return;
        }

        self.store.set_state(|s| HomeState {
            is_submitting: true,
            ..s.clone()
        });

        match self.add_transaction.invoke(draft) {
            StateFullResult::Success(txn) => {
                let today = self.clock.today();
                self.store.set_state(|s| HomeState {
                    is_submitting: false,
                    amount: String::new(),
                    note: String::new(),
                    selected_date: today,
                    error: None,
                    ..s.clone()
                });
                self.store.set_effect(HomeEffect::TransactionAdded(txn));
                self.store.set_effect(HomeEffect::ShowSuccess(
                    "Transaction added successfully".to_string(),
                ));
            }
            StateFullResult::Error { message } => {
                self.store.set_state(|s| HomeState {
                    is_submitting: false,
                    ..s.clone()
                });
                self.show_error(message);
            }
            StateFullResult::Loading => {}
        }
    }

    fn show_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.store.set_state(|s| HomeState {
            error: Some(message.clone()),
            ..s.clone()
        });
        self.store.set_effect(HomeEffect::ShowError(message));
    }
}

/// Keep the selection if it still exists (picking up renames), otherwise
/// fall back to the first entry
fn reselect<T: Clone, I: PartialEq>(
    selected: &Option<T>,
    entries: &[T],
    id: impl Fn(&T) -> I,
) -> Option<T> {
    selected
        .as_ref()
        .and_then(|current| entries.iter().find(|e| id(e) == id(current)))
        .or_else(|| entries.first())
        .cloned()
}

fn summary_query(settings: &UserSettings) -> TransactionQuery {
    TransactionQuery {
        custom_days: Some(settings.custom_days),
        ..TransactionQuery::for_duration(settings.home_duration)
    }
}

impl ViewModel for HomeViewModel {
    type State = HomeState;
    type Event = HomeEvent;
    type Effect = HomeEffect;

    fn state(&self) -> HomeState {
        self.store.current()
    }

    fn on_event(&mut self, event: HomeEvent) {
        if self.store.is_closed() {
            return;
        }
        match event {
            HomeEvent::TypeSelected(kind) => self.store.set_state(|s| HomeState {
                transaction_type: kind,
                ..s.clone()
            }),
            HomeEvent::AmountChanged(amount) => self.store.set_state(|s| HomeState {
                amount,
                ..s.clone()
            }),
            HomeEvent::NoteChanged(note) => self.store.set_state(|s| HomeState {
                note,
                ..s.clone()
            }),
            HomeEvent::CategorySelected(category) => self.store.set_state(|s| HomeState {
                selected_category: Some(category),
                ..s.clone()
            }),
            HomeEvent::PaymentTypeSelected(payment_type) => self.store.set_state(|s| HomeState {
                selected_payment_type: Some(payment_type),
                ..s.clone()
            }),
            HomeEvent::DateSelected(date) => self.store.set_state(|s| HomeState {
                selected_date: date,
                show_date_picker: false,
                ..s.clone()
            }),
            HomeEvent::ShowDatePicker => {
                self.store.set_state(|s| HomeState {
                    show_date_picker: true,
                    ..s.clone()
                });
                self.store.set_effect(HomeEffect::ShowDatePickerDialog);
            }
            HomeEvent::DismissDatePicker => self.store.set_state(|s| HomeState {
                show_date_picker: false,
                ..s.clone()
            }),
            HomeEvent::SubmitTransaction => self.submit(),
            HomeEvent::LoadSummary => self.load_summary(),
        }
    }

    fn sync(&mut self) {
        if self.store.is_closed() {
            return;
        }
        if let Some(categories) = self.categories.poll_next() {
            self.apply_categories(categories);
        }
        if let Some(payment_types) = self.payment_types.poll_next() {
            self.apply_payment_types(payment_types);
        }
        if let Some(settings) = self.settings.poll_next() {
            self.apply_settings(settings);
        }
        if let Some(transactions) = self.summary.poll_next() {
            self.apply_summary(transactions);
        }
    }

    fn drain_effects(&mut self) -> Vec<HomeEffect> {
        self.store.drain_effects()
    }

    fn close(&mut self) {
        self.store.close();
    }
}

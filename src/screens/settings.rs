//! Settings screen
//!
//! Profile, currency, catalog management, home duration and custom summary
//! items. Catalog entries referenced by any transaction cannot be deleted.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::models::{
    Category, CategoryId, CurrencyType, DurationFilter, PaymentType, PaymentTypeId,
    Transaction, UserProfile, UserSettings,
};
use crate::state::{StateFullResult, Store, UiEffect, UiEvent, UiState, UseCase, ViewModel};
use crate::storage::{Storage, Stream};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsState {
    pub user_name: String,
    pub user_email: String,
    pub selected_currency: CurrencyType,
    pub categories: Vec<Category>,
    pub payment_types: Vec<PaymentType>,
    pub categories_in_use: BTreeSet<String>,
    pub payment_types_in_use: BTreeSet<String>,
    pub home_duration: DurationFilter,
    pub custom_days: u32,
    pub custom_summary_items: Vec<String>,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsEvent {
    LoadProfile,
    CurrencyChanged(CurrencyType),
    LoadCategories,
    AddCategory(String),
    UpdateCategory(CategoryId, String),
    DeleteCategory(CategoryId),
    LoadPaymentTypes,
    AddPaymentType(String),
    UpdatePaymentType(PaymentTypeId, String),
    DeletePaymentType(PaymentTypeId),
    HomeDurationChanged(DurationFilter),
    CustomDaysChanged(u32),
    AddSummaryItem(String),
    RemoveSummaryItem(String),
    SignOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsEffect {
    NavigateToLogin,
    ShowError(String),
    /// Names the entry that is still referenced by transactions
    ShowDeleteBlockedMessage(String),
    ShowSuccess(String),
}

impl UiState for SettingsState {}
impl UiEvent for SettingsEvent {}
impl UiEffect for SettingsEffect {}

struct Streams {
    settings: Stream<UserSettings>,
    profile: Stream<Option<UserProfile>>,
    categories: Stream<Vec<Category>>,
    payment_types: Stream<Vec<PaymentType>>,
    used_categories: Stream<Vec<Transaction>, BTreeSet<String>>,
    used_payment_types: Stream<Vec<Transaction>, BTreeSet<String>>,
}

pub struct SettingsViewModel {
    store: Store<SettingsState, SettingsEffect>,
    storage: Arc<Storage>,
    streams: Streams,
    update_currency: UseCase<CurrencyType, ()>,
    add_category: UseCase<String, Category>,
    update_category: UseCase<(CategoryId, String), Category>,
    delete_category: UseCase<CategoryId, Category>,
    add_payment_type: UseCase<String, PaymentType>,
    update_payment_type: UseCase<(PaymentTypeId, String), PaymentType>,
    delete_payment_type: UseCase<PaymentTypeId, PaymentType>,
    update_home_duration: UseCase<DurationFilter, ()>,
    update_custom_days: UseCase<u32, ()>,
    add_summary_item: UseCase<String, ()>,
    remove_summary_item: UseCase<String, ()>,
    sign_out: UseCase<(), ()>,
}

impl SettingsViewModel {
    pub fn new(storage: Arc<Storage>) -> Self {
        let streams = Self::open_streams(&storage);

        let s = Arc::clone(&storage);
        let update_currency =
            UseCase::new("update_currency", move |c| s.settings.update_currency(c));
        let s = Arc::clone(&storage);
        let add_category =
            UseCase::new("add_category", move |name: String| s.categories.add(&name));
        let s = Arc::clone(&storage);
        let update_category =
            UseCase::new("update_category", move |(id, name): (CategoryId, String)| {
                s.categories.update(id, &name)
            });
        let s = Arc::clone(&storage);
        let delete_category = UseCase::new("delete_category", move |id| s.categories.delete(id));
        let s = Arc::clone(&storage);
        let add_payment_type =
            UseCase::new("add_payment_type", move |name: String| s.payment_types.add(&name));
        let s = Arc::clone(&storage);
        let update_payment_type =
            UseCase::new("update_payment_type", move |(id, name): (PaymentTypeId, String)| {
                s.payment_types.update(id, &name)
            });
        let s = Arc::clone(&storage);
        let delete_payment_type =
            UseCase::new("delete_payment_type", move |id| s.payment_types.delete(id));
        let s = Arc::clone(&storage);
        let update_home_duration =
            UseCase::new("update_home_duration", move |d| s.settings.update_home_duration(d));
        let s = Arc::clone(&storage);
        let update_custom_days =
            UseCase::new("update_custom_days", move |days| s.settings.update_custom_days(days));
        let s = Arc::clone(&storage);
        let add_summary_item = UseCase::new("add_summary_item", move |item: String| {
            s.settings.add_custom_summary_item(&item)
        });
        let s = Arc::clone(&storage);
        let remove_summary_item = UseCase::new("remove_summary_item", move |item: String| {
            s.settings.remove_custom_summary_item(&item)
        });
        let s = Arc::clone(&storage);
        let sign_out = UseCase::new("sign_out", move |_: ()| s.auth.sign_out());

        let mut vm = Self {
            store: Store::new(SettingsState {
                is_loading: true,
                ..SettingsState::default()
            }),
            storage,
            streams,
            update_currency,
            add_category,
            update_category,
            delete_category,
            add_payment_type,
            update_payment_type,
            delete_payment_type,
            update_home_duration,
            update_custom_days,
            add_summary_item,
            remove_summary_item,
            sign_out,
        };
        vm.sync();
        vm
    }

    fn open_streams(storage: &Storage) -> Streams {
        Streams {
            settings: storage.settings.stream(),
            profile: storage.auth.current_user(),
            categories: storage.categories.stream(),
            payment_types: storage.payment_types.stream(),
            used_categories: storage.transactions.used_categories(),
            used_payment_types: storage.transactions.used_payment_types(),
        }
    }

    /// Surface `result` as `success` or `"{failure}: {message}"`
    fn report<T>(&mut self, result: StateFullResult<T>, success: &str, failure: &str) {
        match result {
            StateFullResult::Success(_) => {
                self.store.set_state(|s| SettingsState {
                    error: None,
                    ..s.clone()
                });
                self.store
                    .set_effect(SettingsEffect::ShowSuccess(success.to_string()));
            }
            StateFullResult::Error { message } => {
                let message = format!("{}: {}", failure, message);
                self.store.set_state(|s| SettingsState {
                    error: Some(message.clone()),
                    ..s.clone()
                });
                self.store.set_effect(SettingsEffect::ShowError(message));
            }
            StateFullResult::Loading => {}
        }
    }

    fn delete_category(&mut self, id: CategoryId) {
        let categories = &self.storage.categories;
        if let Some(category) = categories.list().into_iter().find(|c| c.id == id) {
            if categories.is_in_use(&category.name) {
                self.store
                    .set_effect(SettingsEffect::ShowDeleteBlockedMessage(category.name));
                return;
            }
        }
        let result = self.delete_category.invoke(id);
        self.report(result, "Category deleted", "Failed to delete category");
    }

    fn delete_payment_type(&mut self, id: PaymentTypeId) {
        let payment_types = &self.storage.payment_types;
        if let Some(payment_type) = payment_types.list().into_iter().find(|p| p.id == id) {
            if payment_types.is_in_use(&payment_type.name) {
                self.store
                    .set_effect(SettingsEffect::ShowDeleteBlockedMessage(payment_type.name));
                return;
            }
        }
        let result = self.delete_payment_type.invoke(id);
        self.report(result, "Payment type deleted", "Failed to delete payment type");
    }

    fn sign_out(&mut self) {
        match self.sign_out.invoke(()) {
            StateFullResult::Success(()) => self.store.set_effect(SettingsEffect::NavigateToLogin),
            StateFullResult::Error { message } => {
                let message = format!("Failed to sign out: {}", message);
                self.store.set_effect(SettingsEffect::ShowError(message));
            }
            StateFullResult::Loading => {}
        }
    }
}

impl ViewModel for SettingsViewModel {
    type State = SettingsState;
    type Event = SettingsEvent;
    type Effect = SettingsEffect;

    fn state(&self) -> SettingsState {
        self.store.current()
    }

    fn on_event(&mut self, event: SettingsEvent) {
        if self.store.is_closed() {
            return;
        }
        match event {
            SettingsEvent::LoadProfile => {
                self.streams.profile = self.storage.auth.current_user();
            }
            SettingsEvent::LoadCategories => {
                self.streams.categories = self.storage.categories.stream();
                self.streams.used_categories = self.storage.transactions.used_categories();
            }
            SettingsEvent::LoadPaymentTypes => {
                self.streams.payment_types = self.storage.payment_types.stream();
                self.streams.used_payment_types = self.storage.transactions.used_payment_types();
            }
            SettingsEvent::CurrencyChanged(currency) => {
                let result = self.update_currency.invoke(currency);
                self.report(result, "Currency updated", "Failed to update currency");
            }
            SettingsEvent::AddCategory(name) => {
                let result = self.add_category.invoke(name);
                self.report(result, "Category added", "Failed to add category");
            }
            SettingsEvent::UpdateCategory(id, name) => {
                let result = self.update_category.invoke((id, name));
                self.report(result, "Category updated", "Failed to update category");
            }
            SettingsEvent::DeleteCategory(id) => self.delete_category(id),
            SettingsEvent::AddPaymentType(name) => {
                let result = self.add_payment_type.invoke(name);
                self.report(result, "Payment type added", "Failed to add payment type");
            }
            SettingsEvent::UpdatePaymentType(id, name) => {
                let result = self.update_payment_type.invoke((id, name));
                self.report(result, "Payment type updated", "Failed to update payment type");
            }
            SettingsEvent::DeletePaymentType(id) => self.delete_payment_type(id),
            SettingsEvent::HomeDurationChanged(duration) => {
                let result = self.update_home_duration.invoke(duration);
                self.report(result, "Duration updated", "Failed to update duration");
            }
            SettingsEvent::CustomDaysChanged(days) => {
                let result = self.update_custom_days.invoke(days);
                self.report(result, "Custom days updated", "Failed to update custom days");
            }
            SettingsEvent::AddSummaryItem(item) => {
                let result = self.add_summary_item.invoke(item);
                self.report(result, "Summary item added", "Failed to add summary item");
            }
            SettingsEvent::RemoveSummaryItem(item) => {
                let result = self.remove_summary_item.invoke(item);
                self.report(result, "Summary item removed", "Failed to remove summary item");
            }
            SettingsEvent::SignOut => self.sign_out(),
        }
    }

    fn sync(&mut self) {
        if self.store.is_closed() {
            return;
        }
        let streams = &mut self.streams;
        let settings = streams.settings.poll_next();
        let profile = streams.profile.poll_next();
        let categories = streams.categories.poll_next();
        let payment_types = streams.payment_types.poll_next();
        let used_categories = streams.used_categories.poll_next();
        let used_payment_types = streams.used_payment_types.poll_next();

        self.store.set_state(|s| {
            let mut next = s.clone();
            if let Some(settings) = settings {
                next.selected_currency = settings.currency;
                next.home_duration = settings.home_duration;
                next.custom_days = settings.custom_days;
                next.custom_summary_items = settings.custom_summary_items;
            }
            if let Some(profile) = profile {
                let (name, email) = profile
                    .map(|p| (p.name, p.email))
                    .unwrap_or_default();
                next.user_name = name;
                next.user_email = email;
            }
            if let Some(categories) = categories {
                next.categories = categories;
            }
            if let Some(payment_types) = payment_types {
                next.payment_types = payment_types;
            }
            if let Some(used) = used_categories {
                next.categories_in_use = used;
            }
            if let Some(used) = used_payment_types {
                next.payment_types_in_use = used;
            }
            next.is_loading = false;
            next
        });
    }

    fn drain_effects(&mut self) -> Vec<SettingsEffect> {
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
    use crate::models::{Money, TransactionDraft, TransactionType};
    use chrono::NaiveDate;

    fn setup() -> (Arc<Storage>, SettingsViewModel) {
        let storage = Arc::new(Storage::in_memory(
            Arc::new(FixedClock::new(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())),
            UserSettings::default(),
            true,
        ));
        storage.auth.sign_in_with_google().unwrap();
        let vm = SettingsViewModel::new(Arc::clone(&storage));
        (storage, vm)
    }

    fn spend(storage: &Storage, category: &str, payment_type: &str) {
        storage
            .transactions
            .add(TransactionDraft {
                kind: TransactionType::Expense,
                amount: Money::from_cents(500),
                category: category.into(),
                payment_type: payment_type.into(),
                note: String::new(),
                date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            })
            .unwrap();
    }

    #[test]
    fn test_loads_profile_and_catalogs() {
        let (_, vm) = setup();
        let state = vm.state();
        assert_eq!(state.user_name, "Demo User");
        assert_eq!(state.user_email, "user@example.com");
        assert_eq!(state.categories.len(), 5);
        assert_eq!(state.payment_types.len(), 4);
        assert_eq!(state.custom_days, 30);
        assert!(!state.is_loading);
    }

    #[test]
    fn test_currency_change() {
        let (storage, mut vm) = setup();
        vm.dispatch(SettingsEvent::CurrencyChanged(CurrencyType::JPY));
        assert_eq!(vm.state().selected_currency, CurrencyType::JPY);
        assert_eq!(storage.settings.current().currency, CurrencyType::JPY);
        assert_eq!(
            vm.drain_effects(),
            vec![SettingsEffect::ShowSuccess("Currency updated".into())]
        );
    }

    #[test]
    fn test_category_lifecycle() {
        let (_, mut vm) = setup();
        vm.dispatch(SettingsEvent::AddCategory("  Health ".into()));
        let health = vm.state().categories.last().unwrap().clone();
        assert_eq!(health.name, "Health");

        vm.dispatch(SettingsEvent::UpdateCategory(health.id, "Medical".into()));
        assert!(vm.state().categories.iter().any(|c| c.name == "Medical"));

        vm.dispatch(SettingsEvent::DeleteCategory(health.id));
        assert_eq!(vm.state().categories.len(), 5);
        assert_eq!(
            vm.drain_effects(),
            vec![
                SettingsEffect::ShowSuccess("Category added".into()),
                SettingsEffect::ShowSuccess("Category updated".into()),
                SettingsEffect::ShowSuccess("Category deleted".into()),
            ]
        );
    }

    #[test]
    fn test_invalid_category_name() {
        let (_, mut vm) = setup();
        vm.dispatch(SettingsEvent::AddCategory("   ".into()));
        let effects = vm.drain_effects();
        assert!(matches!(
            &effects[0],
            SettingsEffect::ShowError(m) if m.starts_with("Failed to add category: ")
        ));
        assert_eq!(vm.state().categories.len(), 5);
    }

    #[test]
    fn test_delete_in_use_is_blocked() {
        let (storage, mut vm) = setup();
        spend(&storage, "Travel", "UPI");
        vm.sync();

        let travel = storage.categories.find("Travel").unwrap();
        vm.dispatch(SettingsEvent::DeleteCategory(travel.id));
        assert_eq!(
            vm.drain_effects(),
            vec![SettingsEffect::ShowDeleteBlockedMessage("Travel".into())]
        );
        assert_eq!(vm.state().categories.len(), 5);

        let upi = storage.payment_types.find("UPI").unwrap();
        vm.dispatch(SettingsEvent::DeletePaymentType(upi.id));
        assert_eq!(
            vm.drain_effects(),
            vec![SettingsEffect::ShowDeleteBlockedMessage("UPI".into())]
        );
        assert!(vm.state().payment_types_in_use.contains("UPI"));
    }

    #[test]
    fn test_delete_blocked_when_used_after_screen_opened() {
        let (storage, mut vm) = setup();
        spend(&storage, "Food", "Card");

        let food = storage.categories.find("Food").unwrap();
        vm.dispatch(SettingsEvent::DeleteCategory(food.id));
        assert_eq!(
            vm.drain_effects(),
            vec![SettingsEffect::ShowDeleteBlockedMessage("Food".into())]
        );
        assert!(storage.categories.find("Food").is_ok());

        let card = storage.payment_types.find("Card").unwrap();
        vm.dispatch(SettingsEvent::DeletePaymentType(card.id));
        assert_eq!(
            vm.drain_effects(),
            vec![SettingsEffect::ShowDeleteBlockedMessage("Card".into())]
        );
        assert!(storage.payment_types.find("Card").is_ok());
    }

    #[test]
    fn test_duration_and_custom_days() {
        let (_, mut vm) = setup();
        vm.dispatch(SettingsEvent::HomeDurationChanged(DurationFilter::Weekly));
        vm.dispatch(SettingsEvent::CustomDaysChanged(0));
        let state = vm.state();
        assert_eq!(state.home_duration, DurationFilter::Weekly);
        assert_eq!(state.custom_days, 30);

        let effects = vm.drain_effects();
        assert_eq!(effects[0], SettingsEffect::ShowSuccess("Duration updated".into()));
        assert!(matches!(
            &effects[1],
            SettingsEffect::ShowError(m) if m.starts_with("Failed to update custom days")
        ));
    }

    #[test]
    fn test_summary_items() {
        let (_, mut vm) = setup();
        vm.dispatch(SettingsEvent::AddSummaryItem("Food".into()));
        vm.dispatch(SettingsEvent::AddSummaryItem("food".into()));
        assert_eq!(vm.state().custom_summary_items, vec!["Food".to_string()]);

        vm.dispatch(SettingsEvent::RemoveSummaryItem("FOOD".into()));
        assert!(vm.state().custom_summary_items.is_empty());
    }

    #[test]
    fn test_sign_out() {
        let (storage, mut vm) = setup();
        vm.dispatch(SettingsEvent::SignOut);
        assert_eq!(vm.drain_effects(), vec![SettingsEffect::NavigateToLogin]);
        assert!(!storage.auth.is_authenticated());
        assert_eq!(vm.state().user_name, "");
    }

    #[test]
    fn test_closed_screen_ignores_events() {
        let (storage, mut vm) = setup();
        vm.close();
        vm.dispatch(SettingsEvent::AddCategory("Pets".into()));
        assert!(vm.drain_effects().is_empty());
        assert_eq!(storage.categories.list().len(), 5);
    }
}

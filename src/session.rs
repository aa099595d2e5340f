//! Navigation between screens
//!
//! A [`Session`] owns the active screen's view-model, routes events to it,
//! and turns the effects it emits into navigation or user-facing
//! [`Notification`]s. Switching screens closes the previous view-model.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{ExpenseError, ExpenseResult};
use crate::screens::{
    HistoryEffect, HistoryEvent, HistoryState, HistoryViewModel, HomeEffect, HomeEvent,
    HomeState, HomeViewModel, LoginEffect, LoginEvent, LoginState, LoginViewModel,
    SettingsEffect, SettingsEvent, SettingsState, SettingsViewModel,
};
use crate::state::ViewModel;
use crate::storage::Storage;

/// Navigation destinations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Login,
    Home,
    History,
    Settings,
}

impl Screen {
    /// Whether the screen needs a signed-in user
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Login => "login",
            Self::Home => "home",
            Self::History => "history",
            Self::Settings => "settings",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Screen {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "login" => Ok(Self::Login),
            "home" => Ok(Self::Home),
            "history" => Ok(Self::History),
            "settings" => Ok(Self::Settings),
            other => Err(format!(
                "Unknown screen: '{}'. Use login, home, history or settings",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

/// A message produced by a screen effect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NotificationKind::Error => write!(f, "Error: {}", self.message),
            _ => write!(f, "{}", self.message),
        }
    }
}

enum ActiveScreen {
    Login(LoginViewModel),
    Home(HomeViewModel),
    History(HistoryViewModel),
    Settings(SettingsViewModel),
}

impl ActiveScreen {
    fn screen(&self) -> Screen {
        match self {
            Self::Login(_) => Screen::Login,
            Self::Home(_) => Screen::Home,
            Self::History(_) => Screen::History,
            Self::Settings(_) => Screen::Settings,
        }
    }

    fn close(&mut self) {
        match self {
            Self::Login(vm) => vm.close(),
            Self::Home(vm) => vm.close(),
            Self::History(vm) => vm.close(),
            Self::Settings(vm) => vm.close(),
        }
    }
}

/// The running app: storage plus whichever screen is showing
pub struct Session {
    storage: Arc<Storage>,
    page_size: usize,
    active: ActiveScreen,
    notifications: Vec<Notification>,
}

impl Session {
    /// Start at the login screen, which forwards to home if already signed in
    pub fn new(storage: Arc<Storage>, page_size: usize) -> Self {
        let login = LoginViewModel::new(Arc::clone(&storage));
        let mut session = Self {
            storage,
            page_size,
            active: ActiveScreen::Login(login),
            notifications: Vec::new(),
        };
        session.flush_login();
        session
    }

    pub fn storage(&self) -> &Arc<Storage> {
        &self.storage
    }

    pub fn screen(&self) -> Screen {
        self.active.screen()
    }

    /// Switch to `screen`, closing the current one
    ///
    /// Re-opening the active screen starts it afresh.
    pub fn navigate(&mut self, screen: Screen) -> ExpenseResult<()> {
        if screen.requires_auth() && !self.storage.auth.is_authenticated() {
            return Err(ExpenseError::Auth(format!(
                "Sign in to open the {} screen",
                screen
            )));
        }

        self.active.close();
        let storage = Arc::clone(&self.storage);
        self.active = match screen {
            Screen::Login => ActiveScreen::Login(LoginViewModel::new(storage)),
            Screen::Home => ActiveScreen::Home(HomeViewModel::new(storage)),
            Screen::History => {
                ActiveScreen::History(HistoryViewModel::new(storage, self.page_size))
            }
            Screen::Settings => ActiveScreen::Settings(SettingsViewModel::new(storage)),
        };
        info!(screen = %screen, "screen changed");

        if screen == Screen::Login {
            self.flush_login();
        }
        Ok(())
    }

    /// Send an event to the login screen
    pub fn login(&mut self, event: LoginEvent) -> ExpenseResult<LoginState> {
        let vm = self.login_vm()?;
        vm.dispatch(event);
        let state = vm.state();
        self.flush_login();
        Ok(state)
    }

    /// Send an event to the home screen, opening it if needed
    pub fn home(&mut self, event: HomeEvent) -> ExpenseResult<HomeState> {
        let vm = self.home_vm()?;
        vm.dispatch(event);
        let state = vm.state();
        let effects = vm.drain_effects();
        effects.into_iter().for_each(|e| self.on_home_effect(e));
        Ok(state)
    }

    /// Send an event to the history screen, opening it if needed
    pub fn history(&mut self, event: HistoryEvent) -> ExpenseResult<HistoryState> {
        let vm = self.history_vm()?;
        vm.dispatch(event);
        let state = vm.state();
        let effects = vm.drain_effects();
        effects.into_iter().for_each(|e| self.on_history_effect(e));
        Ok(state)
    }

    /// Send an event to the settings screen, opening it if needed
    pub fn settings(&mut self, event: SettingsEvent) -> ExpenseResult<SettingsState> {
        let vm = self.settings_vm()?;
        vm.dispatch(event);
        let state = vm.state();
        let effects = vm.drain_effects();
        for effect in effects {
            self.on_settings_effect(effect)?;
        }
        Ok(state)
    }

    /// Current home state, brought up to date
    pub fn home_state(&mut self) -> ExpenseResult<HomeState> {
        let vm = self.home_vm()?;
        vm.sync();
        Ok(vm.state())
    }

    /// Current history state, brought up to date
    pub fn history_state(&mut self) -> ExpenseResult<HistoryState> {
        let vm = self.history_vm()?;
        vm.sync();
        Ok(vm.state())
    }

    /// Current settings state, brought up to date
    pub fn settings_state(&mut self) -> ExpenseResult<SettingsState> {
        let vm = self.settings_vm()?;
        vm.sync();
        Ok(vm.state())
    }

    /// Notifications produced since the last call, oldest first
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    fn login_vm(&mut self) -> ExpenseResult<&mut LoginViewModel> {
        if self.screen() != Screen::Login {
            self.navigate(Screen::Login)?;
        }
        match &mut self.active {
            ActiveScreen::Login(vm) => Ok(vm),
            // Already signed in: the login screen forwarded to home
            _ => Err(ExpenseError::Auth("Already signed in".into())),
        }
    }

    fn home_vm(&mut self) -> ExpenseResult<&mut HomeViewModel> {
        if self.screen() != Screen::Home {
            self.navigate(Screen::Home)?;
        }
        match &mut self.active {
            ActiveScreen::Home(vm) => Ok(vm),
            _ => Err(unreachable_screen(Screen::Home)),
        }
    }

    fn history_vm(&mut self) -> ExpenseResult<&mut HistoryViewModel> {
        if self.screen() != Screen::History {
            self.navigate(Screen::History)?;
        }
        match &mut self.active {
            ActiveScreen::History(vm) => Ok(vm),
            _ => Err(unreachable_screen(Screen::History)),
        }
    }

    fn settings_vm(&mut self) -> ExpenseResult<&mut SettingsViewModel> {
        if self.screen() != Screen::Settings {
            self.navigate(Screen::Settings)?;
        }
        match &mut self.active {
            ActiveScreen::Settings(vm) => Ok(vm),
            _ => Err(unreachable_screen(Screen::Settings)),
        }
    }

    fn flush_login(&mut self) {
        let effects = match &mut self.active {
            ActiveScreen::Login(vm) => vm.drain_effects(),
            _ => return,
        };
        for effect in effects {
            match effect {
                LoginEffect::NavigateToHome => {
                    if let Err(err) = self.navigate(Screen::Home) {
                        self.notifications.push(Notification::error(err.to_string()));
                    }
                }
                LoginEffect::ShowError(message) => {
                    self.notifications.push(Notification::error(message))
                }
            }
        }
    }

    fn on_home_effect(&mut self, effect: HomeEffect) {
        match effect {
            HomeEffect::TransactionAdded(txn) => self
                .notifications
                .push(Notification::info(format!("Added {}: {}", txn.id, txn))),
            HomeEffect::ShowError(message) => self.notifications.push(Notification::error(message)),
            HomeEffect::ShowSuccess(message) => {
                self.notifications.push(Notification::success(message))
            }
            HomeEffect::ShowDatePickerDialog => debug!("date picker requested"),
        }
    }

    fn on_history_effect(&mut self, effect: HistoryEffect) {
        let notification = match effect {
            HistoryEffect::ShowError(message) => Notification::error(message),
            HistoryEffect::ShowSuccess(message) => Notification::success(message),
        };
        self.notifications.push(notification);
    }

    fn on_settings_effect(&mut self, effect: SettingsEffect) -> ExpenseResult<()> {
        match effect {
            SettingsEffect::NavigateToLogin => self.navigate(Screen::Login)?,
            SettingsEffect::ShowError(message) => {
                self.notifications.push(Notification::error(message))
            }
            SettingsEffect::ShowDeleteBlockedMessage(name) => {
                self.notifications.push(Notification::error(format!(
                    "Cannot delete '{}': it is used by existing transactions",
                    name
                )))
            }
            SettingsEffect::ShowSuccess(message) => {
                self.notifications.push(Notification::success(message))
            }
        }
        Ok(())
    }
}

fn unreachable_screen(screen: Screen) -> ExpenseError {
    ExpenseError::Storage(format!("Could not open the {} screen", screen))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::models::{TransactionType, UserSettings};
    use chrono::NaiveDate;

    fn session() -> Session {
        let storage = Arc::new(Storage::in_memory(
            Arc::new(FixedClock::new(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())),
            UserSettings::default(),
            true,
        ));
        Session::new(storage, 20)
    }

    #[test]
    fn test_starts_at_login() {
        let session = session();
        assert_eq!(session.screen(), Screen::Login);
    }

    #[test]
    fn test_protected_screens_require_sign_in() {
        let mut session = session();
        let err = session.navigate(Screen::History).unwrap_err();
        assert!(matches!(err, ExpenseError::Auth(_)));
        assert!(session.home_state().is_err());
        assert_eq!(session.screen(), Screen::Login);
    }

    #[test]
    fn test_sign_in_then_out() {
        let mut session = session();
        session.login(LoginEvent::SignInWithGoogleClicked).unwrap();
        assert_eq!(session.screen(), Screen::Home);

        session.settings(SettingsEvent::SignOut).unwrap();
        assert_eq!(session.screen(), Screen::Login);
        assert!(!session.storage().auth.is_authenticated());
    }

    #[test]
    fn test_already_signed_in_lands_home() {
        let storage = Arc::new(Storage::in_memory(
            Arc::new(FixedClock::new(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())),
            UserSettings::default(),
            true,
        ));
        storage.auth.sign_in_with_google().unwrap();
        let session = Session::new(storage, 20);
        assert_eq!(session.screen(), Screen::Home);
    }

    #[test]
    fn test_effects_become_notifications() {
        let mut session = session();
        session.login(LoginEvent::SignInWithGoogleClicked).unwrap();

        session.home(HomeEvent::TypeSelected(TransactionType::Income)).unwrap();
        session.home(HomeEvent::AmountChanged("250".into())).unwrap();
        let state = session.home(HomeEvent::SubmitTransaction).unwrap();
        assert_eq!(state.total_income.cents(), 25_000);

        let notes = session.take_notifications();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].kind, NotificationKind::Info);
        assert_eq!(notes[1], Notification::success("Transaction added successfully"));
        assert!(session.take_notifications().is_empty());

        session.home(HomeEvent::AmountChanged("-3".into())).unwrap();
        session.home(HomeEvent::SubmitTransaction).unwrap();
        let notes = session.take_notifications();
        assert!(notes[0].is_error());
        assert_eq!(notes[0].to_string(), "Error: Please enter a valid amount");
    }

    #[test]
    fn test_history_sees_home_entries() {
        let mut session = session();
        session.login(LoginEvent::SignInWithGoogleClicked).unwrap();
        session.home(HomeEvent::AmountChanged("12.5".into())).unwrap();
        session.home(HomeEvent::SubmitTransaction).unwrap();

        let state = session.history_state().unwrap();
        assert_eq!(session.screen(), Screen::History);
        assert_eq!(state.total_count, 1);
        assert_eq!(state.total_expense.cents(), 1_250);
    }

    #[test]
    fn test_screen_parse() {
        assert_eq!("Settings".parse::<Screen>().unwrap(), Screen::Settings);
        assert!("reports".parse::<Screen>().is_err());
    }
}

//! Login screen
//!
//! A single mocked Google sign-in. An already signed-in user is sent
//! straight to home.

use std::sync::Arc;

use crate::models::UserProfile;
use crate::state::{StateFullResult, Store, UiEffect, UiEvent, UiState, UseCase, ViewModel};
use crate::storage::Storage;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginState {
    pub is_loading: bool,
    pub is_authenticated: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginEvent {
    SignInWithGoogleClicked,
    RetryClicked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginEffect {
    NavigateToHome,
    ShowError(String),
}

impl UiState for LoginState {}
impl UiEvent for LoginEvent {}
impl UiEffect for LoginEffect {}

pub struct LoginViewModel {
    store: Store<LoginState, LoginEffect>,
    sign_in: UseCase<(), UserProfile>,
}

impl LoginViewModel {
    pub fn new(storage: Arc<Storage>) -> Self {
        let mut store = Store::new(LoginState::default());
        if storage.auth.is_authenticated() {
            store.set_state(|s| LoginState {
                is_authenticated: true,
                ..s.clone()
            });
            store.set_effect(LoginEffect::NavigateToHome);
        }

        let sign_in = UseCase::new("sign_in_with_google", move |_: ()| {
            storage.auth.sign_in_with_google()
        });

        Self { store, sign_in }
    }

    fn sign_in(&mut self) {
        self.store.set_state(|s| LoginState {
            is_loading: true,
            error: None,
            ..s.clone()
        });

        match self.sign_in.invoke(()) {
            StateFullResult::Success(_) => {
                self.store.set_state(|s| LoginState {
                    is_loading: false,
                    is_authenticated: true,
                    ..s.clone()
                });
                self.store.set_effect(LoginEffect::NavigateToHome);
            }
            StateFullResult::Error { message } => {
                self.store.set_state(|s| LoginState {
                    is_loading: false,
                    error: Some(message.clone()),
                    ..s.clone()
                });
                self.store.set_effect(LoginEffect::ShowError(message));
            }
            StateFullResult::Loading => {}
        }
    }
}

impl ViewModel for LoginViewModel {
    type State = LoginState;
    type Event = LoginEvent;
    type Effect = LoginEffect;

    fn state(&self) -> LoginState {
        self.store.current()
    }

    fn on_event(&mut self, event: LoginEvent) {
        if self.store.is_closed() {
            return;
        }
        match event {
            LoginEvent::SignInWithGoogleClicked | LoginEvent::RetryClicked => self.sign_in(),
        }
    }

    fn sync(&mut self) {}

    fn drain_effects(&mut self) -> Vec<LoginEffect> {
        self.store.drain_effects()
    }

    fn close(&mut self) {
        self.store.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;
    use crate::models::UserSettings;

    fn storage() -> Arc<Storage> {
        Arc::new(Storage::in_memory(
            Arc::new(SystemClock),
            UserSettings::default(),
            true,
        ))
    }

    #[test]
    fn test_sign_in_navigates_home() {
        let storage = storage();
        let mut vm = LoginViewModel::new(Arc::clone(&storage));
        assert!(vm.drain_effects().is_empty());

        vm.dispatch(LoginEvent::SignInWithGoogleClicked);
        let state = vm.state();
        assert!(state.is_authenticated);
        assert!(!state.is_loading);
        assert_eq!(vm.drain_effects(), vec![LoginEffect::NavigateToHome]);
        assert!(storage.auth.is_authenticated());
    }

    #[test]
    fn test_already_signed_in_skips_login() {
        let storage = storage();
        storage.auth.sign_in_with_google().unwrap();
        let mut vm = LoginViewModel::new(storage);
        assert_eq!(vm.drain_effects(), vec![LoginEffect::NavigateToHome]);
    }

    #[test]
    fn test_closed_screen_ignores_events() {
        let mut vm = LoginViewModel::new(storage());
        vm.close();
        vm.dispatch(LoginEvent::RetryClicked);
        assert!(!vm.state().is_authenticated);
        assert!(vm.drain_effects().is_empty());
    }
}

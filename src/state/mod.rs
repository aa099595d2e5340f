//! MVI plumbing shared by every screen
//!
//! A screen is a [`ViewModel`]: it owns a [`Store`] holding its state and a
//! queue of one-shot effects, reacts to events, and pulls repository
//! snapshots at the stream boundary in [`ViewModel::sync`].

pub mod result;
pub mod store;
pub mod usecase;

pub use result::StateFullResult;
pub use store::Store;
pub use usecase::{FlowUseCase, UseCase};

/// Marker for screen state values
pub trait UiState: Clone + Send + Sync + 'static {}

/// Marker for user intents and system triggers sent to a screen
pub trait UiEvent: Send + 'static {}

/// Marker for one-shot outputs such as navigation or toasts
pub trait UiEffect: Send + 'static {}

/// A screen's presentation logic
pub trait ViewModel {
    type State: UiState;
    type Event: UiEvent;
    type Effect: UiEffect;

    /// Snapshot of the current state
    fn state(&self) -> Self::State;

    /// Handle one event
    fn on_event(&mut self, event: Self::Event);

    /// Apply any repository snapshots emitted since the last call
    fn sync(&mut self);

    /// Take the effects queued since the last call, oldest first
    fn drain_effects(&mut self) -> Vec<Self::Effect>;

    /// Tear the screen down; later updates are ignored
    fn close(&mut self);

    /// Dispatch an event and bring derived state up to date
    fn dispatch(&mut self, event: Self::Event) {
        self.on_event(event);
        self.sync();
    }
}

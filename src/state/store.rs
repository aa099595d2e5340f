//! Per-screen state container
//!
//! State lives in a `tokio::sync::watch` channel so observers can follow it;
//! effects go through an unbounded `std::sync::mpsc` queue with a single
//! consumer.

use std::sync::mpsc;
use tokio::sync::watch;

/// Holds one screen's state and its pending effects
pub struct Store<S, E> {
    state: watch::Sender<S>,
    effect_tx: mpsc::Sender<E>,
    effect_rx: mpsc::Receiver<E>,
    closed: bool,
}

impl<S, E> Store<S, E> {
    pub fn new(initial: S) -> Self {
        let (state, _) = watch::channel(initial);
        let (effect_tx, effect_rx) = mpsc::channel();
        Self {
            state,
            effect_tx,
            effect_rx,
            closed: false,
        }
    }

    /// Replace the state with `reducer(current)`
    ///
    /// Last write wins. Ignored once the store is closed.
    pub fn set_state(&mut self, reducer: impl FnOnce(&S) -> S) {
        if self.closed {
            return;
        }
        let next = {
            let current = self.state.borrow();
            reducer(&current)
        };
        self.state.send_replace(next);
    }

    /// Queue a one-shot effect. Ignored once the store is closed.
    pub fn set_effect(&mut self, effect: E) {
        if self.closed {
            return;
        }
        // The store owns the receiver, so the queue is never disconnected
        let _ = self.effect_tx.send(effect);
    }

    /// Read the current state
    pub fn with_state<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.state.borrow())
    }

    /// Clone of the current state
    pub fn current(&self) -> S
    where
        S: Clone,
    {
        self.state.borrow().clone()
    }

    /// Watch state changes
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.state.subscribe()
    }

    /// Take the queued effects, oldest first
    pub fn drain_effects(&mut self) -> Vec<E> {
        self.effect_rx.try_iter().collect()
    }

    /// Stop accepting state and effect updates
    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Counter {
        value: i32,
    }

    #[test]
    fn test_set_state_applies_reducer() {
        let mut store: Store<Counter, &str> = Store::new(Counter::default());
        store.set_state(|s| Counter { value: s.value + 1 });
        store.set_state(|s| Counter { value: s.value * 10 });
        assert_eq!(store.current().value, 10);
    }

    #[test]
    fn test_effects_queue_until_drained() {
        let mut store: Store<Counter, &str> = Store::new(Counter::default());
        store.set_effect("first");
        store.set_effect("second");
        assert_eq!(store.drain_effects(), vec!["first", "second"]);
        assert!(store.drain_effects().is_empty());
    }

    #[test]
    fn test_closed_store_ignores_updates() {
        let mut store: Store<Counter, &str> = Store::new(Counter { value: 1 });
        store.close();
        store.set_state(|_| Counter { value: 99 });
        store.set_effect("ignored");
        assert_eq!(store.current().value, 1);
        assert!(store.drain_effects().is_empty());
        assert!(store.is_closed());
    }

    #[test]
    fn test_subscriber_sees_latest_state() {
        let mut store: Store<Counter, ()> = Store::new(Counter::default());
        let mut rx = store.subscribe();
        store.set_state(|_| Counter { value: 5 });
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().value, 5);
    }
}

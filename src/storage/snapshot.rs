//! Current-value snapshots and the streams that observe them
//!
//! An [`Observable`] owns one value; every write replaces it wholesale and
//! notifies observers. A [`Stream`] follows an observable through a
//! projection, so filtered views are recomputed on each emission.

use std::sync::Arc;

use tokio::sync::watch;

use crate::error::ExpenseResult;

/// A value that is replaced wholesale on every write
pub struct Observable<T> {
    tx: watch::Sender<T>,
}

impl<T> Observable<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx }
    }

    /// Read the current value in place
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.tx.borrow())
    }

    /// Clone of the current value
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.tx.borrow().clone()
    }

    /// Replace the value with `f(current)` and notify observers
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        let next = {
            let current = self.tx.borrow();
            f(&current)
        };
        self.tx.send_replace(next);
    }

    /// Like [`Observable::update`], but the transform may refuse
    ///
    /// On error the value is left untouched and nobody is notified.
    pub fn try_update<R>(&self, f: impl FnOnce(&T) -> ExpenseResult<(T, R)>) -> ExpenseResult<R> {
        let (next, output) = {
            let current = self.tx.borrow();
            f(&current)?
        };
        self.tx.send_replace(next);
        Ok(output)
    }
}

impl<T: Clone + Send + Sync + 'static> Observable<T> {
    /// Stream of the whole value
    pub fn stream(&self) -> Stream<T> {
        Stream::new(self.tx.subscribe(), |value: &T| value.clone())
    }

    /// Stream of a projection of the value
    pub fn stream_map<V: 'static>(
        &self,
        project: impl Fn(&T) -> V + Send + Sync + 'static,
    ) -> Stream<T, V> {
        Stream::new(self.tx.subscribe(), project)
    }
}

/// Observes an [`Observable`] through a projection
///
/// The first poll yields the current value; later polls yield only when the
/// source changed since the previous poll.
pub struct Stream<S, V = S> {
    rx: watch::Receiver<S>,
    project: Arc<dyn Fn(&S) -> V + Send + Sync>,
    primed: bool,
}

impl<S: 'static, V: 'static> Stream<S, V> {
    fn new(rx: watch::Receiver<S>, project: impl Fn(&S) -> V + Send + Sync + 'static) -> Self {
        Self {
            rx,
            project: Arc::new(project),
            primed: false,
        }
    }

    /// Projection of the current source value
    pub fn current(&self) -> V {
        (self.project)(&self.rx.borrow())
    }

    /// Next value if one is pending, without waiting
    pub fn poll_next(&mut self) -> Option<V> {
        let changed = self.rx.has_changed().unwrap_or(false);
        if self.primed && !changed {
            return None;
        }
        self.primed = true;
        let value = (self.project)(&self.rx.borrow_and_update());
        Some(value)
    }

    /// Wait for the next value
    ///
    /// Returns None once the source is gone.
    pub async fn next(&mut self) -> Option<V> {
        if self.primed {
            self.rx.changed().await.ok()?;
        }
        self.primed = true;
        let value = (self.project)(&self.rx.borrow_and_update());
        Some(value)
    }

    /// Chain another projection
    pub fn map<W: 'static>(self, f: impl Fn(V) -> W + Send + Sync + 'static) -> Stream<S, W> {
        let project = self.project;
        Stream {
            rx: self.rx,
            project: Arc::new(move |source: &S| f(project(source))),
            primed: self.primed,
        }
    }
}

impl<S, V> Clone for Stream<S, V> {
    fn clone(&self) -> Self {
        Self {
            rx: self.rx.clone(),
            project: Arc::clone(&self.project),
            primed: self.primed,
        }
    }
}

//! Use-case wrappers
//!
//! Screens never call repositories directly. They go through a [`UseCase`]
//! for one-shot operations and a [`FlowUseCase`] for streams, which turns
//! repository errors into [`StateFullResult::Error`] and logs them.

use tracing::{debug, warn};

use super::result::StateFullResult;
use crate::error::ExpenseResult;
use crate::storage::Stream;

type Operation<P, R> = Box<dyn Fn(P) -> ExpenseResult<R> + Send + Sync>;

/// A named single-call operation
pub struct UseCase<P, R> {
    name: &'static str,
    operation: Operation<P, R>,
}

impl<P, R> UseCase<P, R> {
    pub fn new(
        name: &'static str,
        operation: impl Fn(P) -> ExpenseResult<R> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            operation: Box::new(operation),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Run the operation, converting failure into an error message
    pub fn invoke(&self, params: P) -> StateFullResult<R> {
        debug!(use_case = self.name, "invoking");
        match (self.operation)(params) {
            Ok(value) => StateFullResult::Success(value),
            Err(err) => {
                warn!(use_case = self.name, error = %err, "use case failed");
                StateFullResult::error(err.to_string())
            }
        }
    }
}

/// A named operation that opens a stream
pub struct FlowUseCase<P, S, V = S> {
    name: &'static str,
    open: Box<dyn Fn(P) -> Stream<S, V> + Send + Sync>,
}

impl<P, S, V> FlowUseCase<P, S, V> {
    pub fn new(name: &'static str, open: impl Fn(P) -> Stream<S, V> + Send + Sync + 'static) -> Self {
        Self {
            name,
            open: Box::new(open),
        }
    }

    /// Open a fresh stream for `params`
    pub fn invoke(&self, params: P) -> Stream<S, V> {
        debug!(use_case = self.name, "opening stream");
        (self.open)(params)
    }
}

//! Outcome of a use-case call as seen by a screen

use crate::error::ExpenseResult;

/// Loading, a value, or a displayable failure message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateFullResult<T> {
    Loading,
    Success(T),
    Error { message: String },
}

impl<T> StateFullResult<T> {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    pub fn data(self) -> Option<T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { message } => Some(message),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> StateFullResult<U> {
        match self {
            Self::Loading => StateFullResult::Loading,
            Self::Success(data) => StateFullResult::Success(f(data)),
            Self::Error { message } => StateFullResult::Error { message },
        }
    }
}

impl<T> From<ExpenseResult<T>> for StateFullResult<T> {
    fn from(result: ExpenseResult<T>) -> Self {
        match result {
            Ok(data) => Self::Success(data),
            Err(err) => Self::error(err.to_string()),
        }
    }
}

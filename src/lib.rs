//! Expense Tracker - personal income and expense tracking
//!
//! Transactions, categories, payment types and preferences live in
//! in-memory repositories that publish their contents as streams. Each
//! screen is a view-model in the MVI style: it receives events, folds
//! them into an immutable state and emits one-shot effects such as
//! navigation or toasts.
//!
//! # Architecture
//!
//! - `models`: Money, currencies, duration filters and the tracked entities
//! - `storage`: In-memory repositories and the mock Google sign-in
//! - `state`: Store, use-case wrappers and the view-model contract
//! - `services`: Date windows, period labels and totals
//! - `screens`: Login, home, history and settings view-models
//! - `session`: Navigation between screens
//! - `cli`, `display`, `export`: The terminal shell on top
//! - `config`, `platform`: Startup settings and device facts
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use expense_tracker::clock::SystemClock;
//! use expense_tracker::models::UserSettings;
//! use expense_tracker::screens::LoginEvent;
//! use expense_tracker::session::Session;
//! use expense_tracker::storage::Storage;
//!
//! let storage = Storage::in_memory(Arc::new(SystemClock), UserSettings::default(), true);
//! let mut session = Session::new(Arc::new(storage), 20);
//! session.login(LoginEvent::SignInWithGoogleClicked)?;
//! ```

pub mod cli;
pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod platform;
pub mod screens;
pub mod services;
pub mod session;
pub mod state;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};

//! Configuration module for the expense tracker
//!
//! This module provides:
//! - Config directory resolution
//! - The read-only application config that seeds each session

pub mod paths;
pub mod settings;

pub use paths::{ExpensePaths, CONFIG_DIR_ENV};
pub use settings::AppConfig;

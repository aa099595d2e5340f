//! Core data models for the expense tracker
//!
//! Plain value records for the tracking domain: transactions, categories,
//! payment types, user settings and the signed-in profile, plus the money,
//! currency and duration types they are built from.

pub mod category;
pub mod currency;
pub mod duration;
pub mod ids;
pub mod money;
pub mod payment_type;
pub mod profile;
pub mod transaction;
pub mod user_settings;

pub use category::{Category, NameValidationError};
pub use currency::CurrencyType;
pub use duration::{DateWindow, DurationFilter, DEFAULT_CUSTOM_DAYS};
pub use ids::{CategoryId, PaymentTypeId, TransactionId};
pub use money::{Money, MoneyParseError};
pub use payment_type::PaymentType;
pub use profile::UserProfile;
pub use transaction::{Transaction, TransactionDraft, TransactionType, TransactionValidationError};
pub use user_settings::UserSettings;

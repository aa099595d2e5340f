//! Service layer for the expense tracker
//!
//! Date-window resolution and aggregation shared by the screens.

pub mod period;
pub mod summary;

pub use period::PeriodService;
pub use summary::{item_summaries, ItemSummary, Summary};

//! Signed-in user profile

use serde::{Deserialize, Serialize};

/// Profile returned by sign-in
///
/// `spreadsheet_id` is carried for compatibility with a sheet-backed
/// deployment and is not read anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub spreadsheet_id: String,
}

impl UserProfile {
    /// The profile produced by the mock Google sign-in
    pub fn demo() -> Self {
        Self {
            name: "Demo User".to_string(),
            email: "user@example.com".to_string(),
            spreadsheet_id: "mock-spreadsheet-id".to_string(),
        }
    }
}

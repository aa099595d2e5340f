//! Mock Google sign-in
//!
//! Sign-in always succeeds with the demo profile; nothing leaves the process.

use tracing::info;

use crate::error::ExpenseResult;
use crate::models::UserProfile;

use super::snapshot::{Observable, Stream};

/// Tracks the signed-in user
pub struct AuthRepository {
    current_user: Observable<Option<UserProfile>>,
}

impl AuthRepository {
    pub fn new() -> Self {
        Self {
            current_user: Observable::new(None),
        }
    }

    pub fn sign_in_with_google(&self) -> ExpenseResult<UserProfile> {
        let profile = UserProfile::demo();
        let signed_in = profile.clone();
        self.current_user.update(move |_| Some(signed_in));
        info!(email = %profile.email, "signed in");
        Ok(profile)
    }

    pub fn sign_out(&self) -> ExpenseResult<()> {
        self.current_user.update(|_| None);
        info!("signed out");
        Ok(())
    }

    pub fn current_user(&self) -> Stream<Option<UserProfile>> {
        self.current_user.stream()
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.current_user.get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.read(Option::is_some)
    }
}

impl Default for AuthRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_and_out() {
        let repo = AuthRepository::new();
        assert!(!repo.is_authenticated());

        let profile = repo.sign_in_with_google().unwrap();
        assert_eq!(profile.name, "Demo User");
        assert_eq!(profile.email, "user@example.com");
        assert!(repo.is_authenticated());
        assert_eq!(repo.user(), Some(profile));

        repo.sign_out().unwrap();
        assert!(!repo.is_authenticated());
        assert_eq!(repo.current_user().current(), None);
    }
}

//! Identity
//!
//! Who the current user is. Services that act on behalf of a user take an [`Identity`] rather
//! than reading a global session.

use std::sync::{PoisonError, RwLock};

use mockall::automock;
use storefront::ids::UserId;
use tracing::info;

#[automock]
pub trait Identity: Send + Sync {
    /// The signed-in user, if any.
    fn current_user(&self) -> Option<UserId>;
}

/// In-process session holding at most one signed-in user.
#[derive(Debug, Default)]
pub struct SessionIdentity {
    user: RwLock<Option<UserId>>,
}

impl SessionIdentity {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sign_in(&self, user: UserId) {
        info!(user_id = %user, "signed in");

        *self.user.write().unwrap_or_else(PoisonError::into_inner) = Some(user);
    }

    pub fn sign_out(&self) {
        self.user
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }
}

impl Identity for SessionIdentity {
    fn current_user(&self) -> Option<UserId> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_has_no_user() {
        assert_eq!(SessionIdentity::new().current_user(), None);
    }

    #[test]
    fn sign_in_then_sign_out() {
        let session = SessionIdentity::new();

        session.sign_in(UserId::from("u1"));

        assert_eq!(session.current_user(), Some(UserId::from("u1")));

        session.sign_out();

        assert_eq!(session.current_user(), None);
    }
}

//! Driving port for user identity lookups.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for reading a user's public identity.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileQuery: Send + Sync {
    /// Return the identity for `user_id` or a not-found error.
    async fn fetch_user(&self, user_id: UserId) -> Result<User, Error>;
}

//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{Error, Registration, User};

/// Domain use-case port for creating accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Create an account and return its identity.
    ///
    /// Fails with a conflict when the username or email is taken.
    async fn register(&self, registration: &Registration) -> Result<User, Error>;
}

//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{EmailAddress, NewUser, User, UserId, UserRecord, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A unique username or email constraint rejected the write.
        Duplicate { message: String } => "user already exists: {message}",
    }
}

/// Port for storing and looking up registered users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Whether any user has this exact username or this normalised email.
    async fn exists_with_username_or_email(
        &self,
        username: &Username,
        email: &EmailAddress,
    ) -> Result<bool, UserPersistenceError>;

    /// Insert a user and return its identity.
    ///
    /// Adapters report unique constraint violations as
    /// [`UserPersistenceError::Duplicate`].
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Find the user whose username equals `username` exactly or whose
    /// stored email equals `email_key`. The lowest id wins when both match
    /// different users.
    async fn find_for_login(
        &self,
        username: &str,
        email_key: &str,
    ) -> Result<Option<UserRecord>, UserPersistenceError>;

    /// Fetch a user identity by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;
}

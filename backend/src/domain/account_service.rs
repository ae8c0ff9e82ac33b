//! Account domain service: registration, login and identity lookups.
//!
//! Registration checks for an existing username or email before hashing, and
//! also treats a unique-constraint rejection on insert as the same conflict.
//! The pre-check only improves the common case; the database constraint is
//! what actually prevents duplicates when two registrations race.
//!
//! Login matches the username exactly but the email case-insensitively. An
//! unknown identifier and a wrong password produce the same error.
//!
//! Argon2 work runs on the blocking pool so a hash never stalls the worker.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::spawn_blocking;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::domain::ports::{
    LoginService, RegistrationService, UserPersistenceError, UserProfileQuery, UserRepository,
};
use crate::domain::{
    Error, LoginCredentials, NewUser, PasswordHash, Registration, User, UserId, hash_password,
    verify_password,
};

/// Message returned when a username or email is already registered.
pub const DUPLICATE_ACCOUNT_MESSAGE: &str = "Username or email already exists.";
/// Message returned for every failed login.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials.";

fn map_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::Duplicate { .. } => Error::conflict(DUPLICATE_ACCOUNT_MESSAGE),
    }
}

async fn hash_on_blocking_pool(password: &str) -> Result<PasswordHash, Error> {
    let password = Zeroizing::new(password.to_owned());
    spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
        .map_err(|err| Error::internal(format!("password hashing failed: {err}")))
}

async fn verify_on_blocking_pool(password: &str, stored: PasswordHash) -> Result<bool, Error> {
    let password = Zeroizing::new(password.to_owned());
    spawn_blocking(move || verify_password(&password, &stored))
        .await
        .map_err(|err| Error::internal(format!("password check task failed: {err}")))?
        .map_err(|err| Error::internal(format!("stored hash is unusable: {err}")))
}

/// Account service implementing the login, registration and profile ports.
#[derive(Clone)]
pub struct AccountService<R> {
    user_repo: Arc<R>,
}

impl<R> AccountService<R> {
    /// Create a new service backed by the user repository.
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl<R> RegistrationService for AccountService<R>
where
    R: UserRepository,
{
    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        let taken = self
            .user_repo
            .exists_with_username_or_email(registration.username(), registration.email())
            .await
            .map_err(map_repository_error)?;
        if taken {
            info!(username = %registration.username(), "registration rejected: identity taken");
            return Err(Error::conflict(DUPLICATE_ACCOUNT_MESSAGE));
        }

        let password_hash = hash_on_blocking_pool(registration.password()).await?;
        let new_user = NewUser::new(
            registration.username().clone(),
            registration.email().clone(),
            password_hash,
        );

        let user = self
            .user_repo
            .insert(&new_user)
            .await
            .map_err(|err| {
                if matches!(err, UserPersistenceError::Duplicate { .. }) {
                    info!(
                        username = %registration.username(),
                        "registration lost a uniqueness race"
                    );
                }
                map_repository_error(err)
            })?;

        info!(user_id = %user.id(), "user registered");
        Ok(user)
    }
}

#[async_trait]
impl<R> LoginService for AccountService<R>
where
    R: UserRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let email_key = credentials.email_key();
        let Some(record) = self
            .user_repo
            .find_for_login(credentials.identifier(), &email_key)
            .await
            .map_err(map_repository_error)?
        else {
            debug!("login rejected: no matching user");
            return Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        };

        let verified =
            verify_on_blocking_pool(credentials.password(), record.password_hash().clone())
                .await
                .inspect_err(|_| debug!(user_id = %record.user().id(), "password check failed"))?;
        if !verified {
            debug!(user_id = %record.user().id(), "login rejected: password mismatch");
            return Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        }

        Ok(record.into_user())
    }
}

#[async_trait]
impl<R> UserProfileQuery for AccountService<R>
where
    R: UserRepository,
{
    async fn fetch_user(&self, user_id: UserId) -> Result<User, Error> {
        self.user_repo
            .find_by_id(user_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("user {user_id} not found")))
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;

//! Domain primitives, services and ports.
//!
//! Purpose: Define strongly typed entities and the use-case services the
//! HTTP adapter drives. Nothing in here imports actix or Diesel; adapters
//! depend on the domain, never the other way round.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, UserRecord, NewUser: identities and stored accounts.
//! - LoginCredentials, Registration: validated auth inputs.
//! - Todo, TodoTitle, TodoSearchTerm: todo item and its inputs.
//! - AccountService, TodoService: implementations of the driving ports.

pub mod ports;

mod account_service;
mod auth;
mod error;
mod password;
mod todo;
mod todo_service;
mod trace_id;
mod user;

pub use self::account_service::{
    AccountService, DUPLICATE_ACCOUNT_MESSAGE, INVALID_CREDENTIALS_MESSAGE,
};
pub use self::auth::{
    LoginCredentials, LoginValidationError, PASSWORD_MAX, PASSWORD_MIN, Registration,
    RegistrationValidationError,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::password::{PasswordHash, PasswordHashError, hash_password, verify_password};
pub use self::todo::{TITLE_MAX, Todo, TodoId, TodoSearchTerm, TodoTitle, TodoValidationError};
pub use self::todo_service::TodoService;
pub use self::trace_id::TraceId;
pub use self::user::{
    EMAIL_MAX, EmailAddress, NewUser, USERNAME_MAX, User, UserId, UserRecord, UserValidationError,
    Username,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use todo_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("missing"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;

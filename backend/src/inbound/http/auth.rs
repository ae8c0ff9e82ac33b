//! Account API handlers under `/auth`.
//!
//! ```text
//! POST /auth/register {"username":"alice","email":"alice@ex.com","password":"secret1"}
//! POST /auth/login {"usernameOrEmail":"alice","password":"secret1"}
//! ```
//!
//! No session or token is issued: a successful call returns the public
//! identity and the client keeps it.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{LoginService, RegistrationService};
use crate::domain::{
    Error, LoginCredentials, LoginValidationError, Registration, RegistrationValidationError, User,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    map_login_validation_error, map_registration_validation_error,
};

/// Registration request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "alice@ex.com")]
    pub email: String,
    #[schema(example = "secret1")]
    pub password: String,
}

impl TryFrom<RegisterRequest> for Registration {
    type Error = RegistrationValidationError;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.email, &value.password)
    }
}

/// Login request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "alice@ex.com")]
    pub username_or_email: String,
    #[schema(example = "secret1")]
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username_or_email, &value.password)
    }
}

/// Validate and register; shared by `/auth` and `/users`.
pub(crate) async fn register_account(
    state: &HttpState,
    payload: RegisterRequest,
) -> ApiResult<User> {
    let registration =
        Registration::try_from(payload).map_err(map_registration_validation_error)?;
    state.registration.register(&registration).await
}

/// Validate and authenticate; shared by `/auth` and `/users`.
pub(crate) async fn login_account(state: &HttpState, payload: LoginRequest) -> ApiResult<User> {
    let credentials = LoginCredentials::try_from(payload).map_err(map_login_validation_error)?;
    state.login.authenticate(&credentials).await
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created", body = User),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Username or email already exists", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "authRegister"
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<web::Json<User>> {
    register_account(&state, payload.into_inner())
        .await
        .map(web::Json)
}

/// Check credentials and return the caller's identity.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = User),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "authLogin"
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<User>> {
    login_account(&state, payload.into_inner())
        .await
        .map(web::Json)
}

/// Register the account routes on an `/auth` scope.
pub fn scope() -> actix_web::Scope {
    web::scope("/auth").service(register).service(login)
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;

//! Shared validation helpers for inbound HTTP adapters.
//!
//! Domain validation errors become `invalid_request` envelopes whose
//! `details` name the offending `field` and a stable machine `code`.

use serde_json::json;

use crate::domain::{
    Error, LoginValidationError, RegistrationValidationError, TodoValidationError,
    UserValidationError,
};

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const USERNAME: Self = Self("username");
    pub(crate) const USERNAME_OR_EMAIL: Self = Self("usernameOrEmail");
    pub(crate) const EMAIL: Self = Self("email");
    pub(crate) const PASSWORD: Self = Self("password");
    pub(crate) const TITLE: Self = Self("title");

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, code: &'static str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code,
    }))
}

fn user_field_error(err: &UserValidationError) -> Error {
    let (field, code) = match err {
        UserValidationError::EmptyUsername => (FieldName::USERNAME, "empty_username"),
        UserValidationError::UsernameTooLong { .. } => (FieldName::USERNAME, "username_too_long"),
        UserValidationError::UsernameContainsNul => (FieldName::USERNAME, "username_contains_nul"),
        UserValidationError::EmptyEmail => (FieldName::EMAIL, "empty_email"),
        UserValidationError::EmailTooLong { .. } => (FieldName::EMAIL, "email_too_long"),
        UserValidationError::InvalidEmail => (FieldName::EMAIL, "invalid_email"),
    };
    field_error(field, code, err.to_string())
}

pub(crate) fn map_login_validation_error(err: LoginValidationError) -> Error {
    let (field, code) = match err {
        LoginValidationError::EmptyIdentifier => {
            (FieldName::USERNAME_OR_EMAIL, "empty_username_or_email")
        }
        LoginValidationError::IdentifierContainsNul => {
            (FieldName::USERNAME_OR_EMAIL, "username_or_email_contains_nul")
        }
        LoginValidationError::EmptyPassword => (FieldName::PASSWORD, "empty_password"),
    };
    field_error(field, code, err.to_string())
}

pub(crate) fn map_registration_validation_error(err: RegistrationValidationError) -> Error {
    match &err {
        RegistrationValidationError::User(user) => user_field_error(user),
        RegistrationValidationError::PasswordTooShort { .. } => {
            field_error(FieldName::PASSWORD, "password_too_short", err.to_string())
        }
        RegistrationValidationError::PasswordTooLong { .. } => {
            field_error(FieldName::PASSWORD, "password_too_long", err.to_string())
        }
    }
}

pub(crate) fn map_todo_validation_error(err: TodoValidationError) -> Error {
    let code = match err {
        TodoValidationError::EmptyTitle | TodoValidationError::EmptySearchTerm => "empty_title",
        TodoValidationError::TitleTooLong { .. } => "title_too_long",
        TodoValidationError::TitleContainsNul | TodoValidationError::SearchTermContainsNul => {
            "title_contains_nul"
        }
    };
    field_error(FieldName::TITLE, code, err.to_string())
}

//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod error;
pub mod health;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod todos;
pub mod users;
pub(crate) mod validation;

pub use error::ApiResult;

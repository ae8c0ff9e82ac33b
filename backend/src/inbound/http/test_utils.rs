//! Helpers shared by the HTTP handler tests.

use std::sync::Arc;

use actix_web::web;

use crate::domain::{AccountService, TodoService};
use crate::inbound::http::error::{json_error_handler, path_error_handler, query_error_handler};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::test_support::{InMemoryTodoRepository, InMemoryUserRepository};

/// Handler state wired to fresh in-memory repositories.
pub(crate) fn in_memory_state(users: InMemoryUserRepository) -> web::Data<HttpState> {
    let accounts = Arc::new(AccountService::new(Arc::new(users)));
    let todos = Arc::new(TodoService::new(Arc::new(InMemoryTodoRepository::default())));
    web::Data::new(HttpState::new(HttpStatePorts {
        login: accounts.clone(),
        registration: accounts.clone(),
        profile: accounts,
        todos: todos.clone(),
        todos_query: todos,
    }))
}

/// Extractor configs matching the production server.
pub(crate) fn extractor_configs() -> (web::JsonConfig, web::QueryConfig, web::PathConfig) {
    (
        web::JsonConfig::default().error_handler(json_error_handler),
        web::QueryConfig::default().error_handler(query_error_handler),
        web::PathConfig::default().error_handler(path_error_handler),
    )
}

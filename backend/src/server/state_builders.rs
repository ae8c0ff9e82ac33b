//! Wire the Diesel repositories into the driving ports held by `HttpState`.

use std::sync::Arc;

use actix_web::web;

use todo_backend::domain::{AccountService, TodoService};
use todo_backend::inbound::http::state::{HttpState, HttpStatePorts};
use todo_backend::outbound::persistence::{DbPool, DieselTodoRepository, DieselUserRepository};

/// Build the handler state over one shared pool.
///
/// A single service instance backs each pair of ports so both sides see the
/// same repository.
pub(crate) fn build_http_state(pool: &DbPool) -> web::Data<HttpState> {
    let accounts = Arc::new(AccountService::new(Arc::new(DieselUserRepository::new(
        pool.clone(),
    ))));
    let todos = Arc::new(TodoService::new(Arc::new(DieselTodoRepository::new(
        pool.clone(),
    ))));

    web::Data::new(HttpState::new(HttpStatePorts {
        login: accounts.clone(),
        registration: accounts.clone(),
        profile: accounts,
        todos: todos.clone(),
        todos_query: todos,
    }))
}

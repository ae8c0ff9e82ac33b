//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    LoginService, RegistrationService, TodosCommand, TodosQuery, UserProfileQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub todos: Arc<dyn TodosCommand>,
    pub todos_query: Arc<dyn TodosQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub todos: Arc<dyn TodosCommand>,
    pub todos_query: Arc<dyn TodosQuery>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use todo_backend::domain::{AccountService, TodoService};
    /// use todo_backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use todo_backend::test_support::{InMemoryTodoRepository, InMemoryUserRepository};
    ///
    /// let accounts = Arc::new(AccountService::new(Arc::new(InMemoryUserRepository::default())));
    /// let todos = Arc::new(TodoService::new(Arc::new(InMemoryTodoRepository::default())));
    /// let state = HttpState::new(HttpStatePorts {
    ///     login: accounts.clone(),
    ///     registration: accounts.clone(),
    ///     profile: accounts,
    ///     todos: todos.clone(),
    ///     todos_query: todos,
    /// });
    /// let _login = state.login.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            registration,
            profile,
            todos,
            todos_query,
        } = ports;
        Self {
            login,
            registration,
            profile,
            todos,
            todos_query,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

//! Driving port for todo reads.
//!
//! Inbound adapters use this port to list, fetch and search todos without
//! depending on repository details.

use async_trait::async_trait;

use crate::domain::{Error, Todo, TodoId, TodoSearchTerm};

/// Domain use-case port for todo reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodosQuery: Send + Sync {
    /// Every todo, ordered by id.
    async fn list(&self) -> Result<Vec<Todo>, Error>;

    /// One todo or a not-found error.
    async fn get(&self, id: TodoId) -> Result<Todo, Error>;

    /// Todos whose title contains the term, ignoring case.
    async fn search(&self, term: &TodoSearchTerm) -> Result<Vec<Todo>, Error>;
}

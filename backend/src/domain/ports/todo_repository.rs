//! Port for todo persistence.

use async_trait::async_trait;

use crate::domain::{Todo, TodoId, TodoSearchTerm, TodoTitle};

use super::define_port_error;

define_port_error! {
    /// Errors raised by todo repository adapters.
    pub enum TodoPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "todo repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "todo repository query failed: {message}",
    }
}

/// Port for reading and writing todo items.
///
/// Adapters own the timestamps: `insert` sets both, `toggle` refreshes
/// `last_updated`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// All todos ordered by id.
    async fn list_all(&self) -> Result<Vec<Todo>, TodoPersistenceError>;

    /// Find a todo by id.
    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, TodoPersistenceError>;

    /// Todos whose title contains the term, ignoring case, ordered by id.
    async fn search_by_title(
        &self,
        term: &TodoSearchTerm,
    ) -> Result<Vec<Todo>, TodoPersistenceError>;

    /// Insert a new, not-done todo.
    async fn insert(&self, title: &TodoTitle) -> Result<Todo, TodoPersistenceError>;

    /// Flip the done flag; `None` when the todo does not exist.
    async fn toggle(&self, id: TodoId) -> Result<Option<Todo>, TodoPersistenceError>;

    /// Delete a todo; `false` when nothing was removed.
    async fn delete(&self, id: TodoId) -> Result<bool, TodoPersistenceError>;
}

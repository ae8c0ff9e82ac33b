//! Driving port for todo mutations.

use async_trait::async_trait;

use crate::domain::{Error, Todo, TodoId, TodoTitle};

/// Domain use-case port for creating, toggling and deleting todos.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodosCommand: Send + Sync {
    /// Create a todo.
    async fn add(&self, title: &TodoTitle) -> Result<Todo, Error>;

    /// Flip a todo's done flag.
    async fn toggle(&self, id: TodoId) -> Result<Todo, Error>;

    /// Remove a todo.
    async fn delete(&self, id: TodoId) -> Result<(), Error>;
}

//! Todo domain service implementing the todo command and query ports.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{TodoPersistenceError, TodoRepository, TodosCommand, TodosQuery};
use crate::domain::{Error, Todo, TodoId, TodoSearchTerm, TodoTitle};

fn map_repository_error(error: TodoPersistenceError) -> Error {
    match error {
        TodoPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("todo repository unavailable: {message}"))
        }
        TodoPersistenceError::Query { message } => {
            Error::internal(format!("todo repository error: {message}"))
        }
    }
}

fn todo_not_found(id: TodoId) -> Error {
    Error::not_found(format!("todo {id} not found"))
}

/// Todo service backed by a [`TodoRepository`].
#[derive(Clone)]
pub struct TodoService<R> {
    todo_repo: Arc<R>,
}

impl<R> TodoService<R> {
    /// Create a new service with the todo repository.
    pub fn new(todo_repo: Arc<R>) -> Self {
        Self { todo_repo }
    }
}

#[async_trait]
impl<R> TodosQuery for TodoService<R>
where
    R: TodoRepository,
{
    async fn list(&self) -> Result<Vec<Todo>, Error> {
        self.todo_repo.list_all().await.map_err(map_repository_error)
    }

    async fn get(&self, id: TodoId) -> Result<Todo, Error> {
        self.todo_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| todo_not_found(id))
    }

    async fn search(&self, term: &TodoSearchTerm) -> Result<Vec<Todo>, Error> {
        self.todo_repo
            .search_by_title(term)
            .await
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl<R> TodosCommand for TodoService<R>
where
    R: TodoRepository,
{
    async fn add(&self, title: &TodoTitle) -> Result<Todo, Error> {
        let todo = self
            .todo_repo
            .insert(title)
            .await
            .map_err(map_repository_error)?;
        debug!(todo_id = %todo.id(), "todo created");
        Ok(todo)
    }

    async fn toggle(&self, id: TodoId) -> Result<Todo, Error> {
        self.todo_repo
            .toggle(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| todo_not_found(id))
    }

    async fn delete(&self, id: TodoId) -> Result<(), Error> {
        let removed = self
            .todo_repo
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if removed {
            debug!(todo_id = %id, "todo deleted");
            Ok(())
        } else {
            Err(todo_not_found(id))
        }
    }
}

#[cfg(test)]
#[path = "todo_service_tests.rs"]
mod tests;

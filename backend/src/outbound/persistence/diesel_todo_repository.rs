//! PostgreSQL-backed `TodoRepository` implementation using Diesel ORM.
//!
//! Timestamps are assigned from the injected clock immediately before each
//! write. Toggle is a single `UPDATE ... RETURNING`, so concurrent toggles
//! never lose a flip.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use mockable::{Clock, DefaultClock};

use crate::domain::ports::{TodoPersistenceError, TodoRepository};
use crate::domain::{Todo, TodoId, TodoSearchTerm, TodoTitle};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewTodoRow, TodoRow};
use super::pool::{DbPool, PoolError};
use super::schema::todos;

/// Diesel-backed implementation of the todo repository port.
#[derive(Clone)]
pub struct DieselTodoRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselTodoRepository {
    /// Create a repository stamping rows with the system clock.
    pub fn new(pool: DbPool) -> Self {
        Self::with_clock(pool, Arc::new(DefaultClock))
    }

    /// Create a repository stamping rows with `clock`.
    pub fn with_clock(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

fn map_pool_error(error: PoolError) -> TodoPersistenceError {
    map_basic_pool_error(error, TodoPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> TodoPersistenceError {
    map_basic_diesel_error(
        &error,
        TodoPersistenceError::query,
        TodoPersistenceError::connection,
    )
}

/// `ILIKE` pattern matching `term` literally anywhere in the title.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl TodoRepository for DieselTodoRepository {
    async fn list_all(&self) -> Result<Vec<Todo>, TodoPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TodoRow> = todos::table
            .order_by(todos::id.asc())
            .select(TodoRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Todo::from).collect())
    }

    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, TodoPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<TodoRow> = todos::table
            .find(id.get())
            .select(TodoRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Todo::from))
    }

    async fn search_by_title(
        &self,
        term: &TodoSearchTerm,
    ) -> Result<Vec<Todo>, TodoPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TodoRow> = todos::table
            .filter(todos::title.ilike(contains_pattern(term.as_ref())))
            .order_by(todos::id.asc())
            .select(TodoRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Todo::from).collect())
    }

    async fn insert(&self, title: &TodoTitle) -> Result<Todo, TodoPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let now = self.clock.utc();

        let new_row = NewTodoRow {
            title: title.as_ref(),
            is_done: false,
            created_at: now,
            last_updated: now,
        };

        diesel::insert_into(todos::table)
            .values(&new_row)
            .returning(TodoRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(Todo::from)
            .map_err(map_diesel_error)
    }

    async fn toggle(&self, id: TodoId) -> Result<Option<Todo>, TodoPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let now = self.clock.utc();

        let row: Option<TodoRow> = diesel::update(todos::table.find(id.get()))
            .set((
                todos::is_done.eq(diesel::dsl::not(todos::is_done)),
                todos::last_updated.eq(now),
            ))
            .returning(TodoRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Todo::from))
    }

    async fn delete(&self, id: TodoId) -> Result<bool, TodoPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(todos::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}

//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories are thin translators between Diesel rows (`models`,
//! `schema`; both private) and domain types. Connections come from a bb8
//! pool via `diesel-async`; every database failure is mapped to the port's
//! own error type.
//!
//! # Example
//!
//! ```no_run
//! use todo_backend::outbound::persistence::{
//!     DbPool, DieselTodoRepository, DieselUserRepository, PoolConfig,
//! };
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/todo")).await?;
//! let users = DieselUserRepository::new(pool.clone());
//! let todos = DieselTodoRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_todo_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_todo_repository::DieselTodoRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{
    MIGRATIONS, MigrationError, run_pending_migrations, run_pending_migrations_blocking,
};
pub use pool::{DbPool, PoolConfig, PoolError};

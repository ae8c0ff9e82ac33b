//! In-memory adapters and clocks for tests that should not need PostgreSQL.
//!
//! Compiled for unit tests and, via the `test-support` feature, for the
//! integration tests under `tests/`.

mod clock;
mod in_memory;

pub use clock::MutableClock;
pub use in_memory::{InMemoryTodoRepository, InMemoryUserRepository};

//! In-memory implementations of the driven ports.
//!
//! These mirror the database semantics the HTTP layer depends on: unique
//! usernames and emails, id ordering, store-assigned timestamps.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};

use crate::domain::ports::{
    TodoPersistenceError, TodoRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{
    EmailAddress, NewUser, PasswordHash, Todo, TodoId, TodoSearchTerm, TodoTitle, User, UserId,
    UserRecord, Username,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

#[derive(Clone)]
struct StoredUser {
    id: i32,
    username: String,
    email: String,
    password_hash: PasswordHash,
}

impl StoredUser {
    fn identity(&self) -> User {
        User::from_stored(
            UserId::new(self.id),
            self.username.clone(),
            self.email.clone(),
        )
    }
}

/// User store with the same uniqueness rules as the `users` table.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<StoredUser>>,
    skip_existence_check: bool,
}

impl InMemoryUserRepository {
    /// Repository whose existence check always answers "no", so every
    /// duplicate reaches the insert. Simulates two registrations racing past
    /// the check.
    pub fn racing() -> Self {
        Self {
            users: Mutex::default(),
            skip_existence_check: true,
        }
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        lock(&self.users).len()
    }

    /// Whether no users are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn exists_with_username_or_email(
        &self,
        username: &Username,
        email: &EmailAddress,
    ) -> Result<bool, UserPersistenceError> {
        if self.skip_existence_check {
            return Ok(false);
        }
        Ok(lock(&self.users)
            .iter()
            .any(|user| user.username == username.as_ref() || user.email == email.as_ref()))
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut users = lock(&self.users);
        if users.iter().any(|u| u.username == user.username().as_ref()) {
            return Err(UserPersistenceError::duplicate("users_username_key"));
        }
        if users.iter().any(|u| u.email == user.email().as_ref()) {
            return Err(UserPersistenceError::duplicate("users_email_key"));
        }
        let id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        let stored = StoredUser {
            id,
            username: user.username().as_ref().to_owned(),
            email: user.email().as_ref().to_owned(),
            password_hash: user.password_hash().clone(),
        };
        let identity = stored.identity();
        users.push(stored);
        Ok(identity)
    }

    async fn find_for_login(
        &self,
        username: &str,
        email_key: &str,
    ) -> Result<Option<UserRecord>, UserPersistenceError> {
        Ok(lock(&self.users)
            .iter()
            .filter(|user| user.username == username || user.email == email_key)
            .min_by_key(|user| user.id)
            .map(|user| UserRecord::new(user.identity(), user.password_hash.clone())))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(lock(&self.users)
            .iter()
            .find(|user| user.id == id.get())
            .map(StoredUser::identity))
    }
}

/// Todo store stamping writes from an injectable clock.
pub struct InMemoryTodoRepository {
    todos: Mutex<Vec<Todo>>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryTodoRepository {
    fn default() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl InMemoryTodoRepository {
    /// Repository using the supplied clock for timestamps.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            todos: Mutex::default(),
            clock,
        }
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn list_all(&self) -> Result<Vec<Todo>, TodoPersistenceError> {
        Ok(lock(&self.todos).clone())
    }

    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, TodoPersistenceError> {
        Ok(lock(&self.todos).iter().find(|todo| todo.id() == id).cloned())
    }

    async fn search_by_title(
        &self,
        term: &TodoSearchTerm,
    ) -> Result<Vec<Todo>, TodoPersistenceError> {
        Ok(lock(&self.todos)
            .iter()
            .filter(|todo| term.matches(todo.title()))
            .cloned()
            .collect())
    }

    async fn insert(&self, title: &TodoTitle) -> Result<Todo, TodoPersistenceError> {
        let now = self.clock.utc();
        let mut todos = lock(&self.todos);
        let id = todos.iter().map(|todo| todo.id().get()).max().unwrap_or(0) + 1;
        let todo = Todo::new(TodoId::new(id), title.as_ref(), false, now, now);
        todos.push(todo.clone());
        Ok(todo)
    }

    async fn toggle(&self, id: TodoId) -> Result<Option<Todo>, TodoPersistenceError> {
        let now = self.clock.utc();
        let mut todos = lock(&self.todos);
        let Some(slot) = todos.iter_mut().find(|todo| todo.id() == id) else {
            return Ok(None);
        };
        let toggled = Todo::new(
            slot.id(),
            slot.title(),
            !slot.is_done(),
            slot.created_at(),
            now,
        );
        *slot = toggled.clone();
        Ok(Some(toggled))
    }

    async fn delete(&self, id: TodoId) -> Result<bool, TodoPersistenceError> {
        let mut todos = lock(&self.todos);
        let before = todos.len();
        todos.retain(|todo| todo.id() != id);
        Ok(todos.len() != before)
    }
}

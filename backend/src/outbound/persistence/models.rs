//! Internal Diesel row structs.
//!
//! These never leave the persistence layer; repositories convert them into
//! domain types before returning.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{PasswordHash, Todo, TodoId, User, UserId, UserRecord};

use super::schema::{todos, users};

/// Public columns of a user row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub username: String,
    pub email: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self::from_stored(UserId::new(row.id), row.username, row.email)
    }
}

/// User row including the credential, read only by the login lookup.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserCredentialRow {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl From<UserCredentialRow> for UserRecord {
    fn from(row: UserCredentialRow) -> Self {
        let user = User::from_stored(UserId::new(row.id), row.username, row.email);
        Self::new(user, PasswordHash::from_encoded(row.password_hash))
    }
}

/// Insertable user.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

/// Todo row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = todos)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TodoRow {
    pub id: i32,
    pub title: String,
    pub is_done: bool,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Self::new(
            TodoId::new(row.id),
            row.title,
            row.is_done,
            row.created_at,
            row.last_updated,
        )
    }
}

/// Insertable todo; both timestamps come from the repository clock.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = todos)]
pub(crate) struct NewTodoRow<'a> {
    pub title: &'a str,
    pub is_done: bool,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

//! Diesel table definitions.
//!
//! Must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Int4,
        /// Stored as given after trimming; unique.
        username -> Varchar,
        /// Trimmed and lower-cased; unique.
        email -> Varchar,
        /// Argon2id PHC string.
        password_hash -> Text,
    }
}

diesel::table! {
    /// Shared todo list.
    todos (id) {
        id -> Int4,
        title -> Varchar,
        is_done -> Bool,
        created_at -> Timestamptz,
        last_updated -> Timestamptz,
    }
}

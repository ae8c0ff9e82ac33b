//! Todo item model and its validated inputs.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Maximum allowed length for a todo title.
pub const TITLE_MAX: usize = 255;

/// Validation errors for todo inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoValidationError {
    EmptyTitle,
    TitleTooLong { max: usize },
    TitleContainsNul,
    EmptySearchTerm,
    SearchTermContainsNul,
}

impl fmt::Display for TodoValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Title is required."),
            Self::TitleTooLong { max } => write!(f, "Title must be at most {max} characters"),
            Self::TitleContainsNul => write!(f, "Title must not contain NUL characters"),
            Self::EmptySearchTerm => write!(f, "Title is required"),
            Self::SearchTermContainsNul => write!(f, "Title must not contain NUL characters"),
        }
    }
}

impl std::error::Error for TodoValidationError {}

/// Database-generated todo identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(i32);

impl TodoId {
    /// Wrap a raw identifier.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw integer value.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for TodoId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-blank todo title of at most [`TITLE_MAX`] characters.
///
/// The text is kept exactly as submitted; only the blank check looks at
/// the trimmed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoTitle(String);

impl TodoTitle {
    /// Validate a title.
    pub fn new(raw: impl Into<String>) -> Result<Self, TodoValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(TodoValidationError::EmptyTitle);
        }
        if raw.chars().count() > TITLE_MAX {
            return Err(TodoValidationError::TitleTooLong { max: TITLE_MAX });
        }
        if raw.contains('\0') {
            return Err(TodoValidationError::TitleContainsNul);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for TodoTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Trimmed, non-empty substring used by title search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoSearchTerm(String);

impl TodoSearchTerm {
    /// Validate an optional raw query value.
    ///
    /// # Examples
    /// ```
    /// use todo_backend::domain::TodoSearchTerm;
    ///
    /// assert!(TodoSearchTerm::new(Some("  ")).is_err());
    /// let term = TodoSearchTerm::new(Some(" milk ")).unwrap();
    /// assert!(term.matches("Buy MILK"));
    /// ```
    pub fn new(raw: Option<&str>) -> Result<Self, TodoValidationError> {
        let trimmed = raw.map(str::trim).unwrap_or_default();
        if trimmed.is_empty() {
            return Err(TodoValidationError::EmptySearchTerm);
        }
        if trimmed.contains('\0') {
            return Err(TodoValidationError::SearchTermContainsNul);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Case-insensitive substring test against a title.
    pub fn matches(&self, title: &str) -> bool {
        title.to_lowercase().contains(&self.0.to_lowercase())
    }
}

impl AsRef<str> for TodoSearchTerm {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Todo item.
///
/// ## Invariants
/// - `created_at` never changes after insert.
/// - `last_updated` is at or after `created_at` and moves on every write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    #[schema(value_type = i32, example = 1)]
    id: TodoId,
    #[schema(example = "Buy milk")]
    title: String,
    is_done: bool,
    created_at: DateTime<Utc>,
    last_updated: DateTime<Utc>,
}

impl Todo {
    /// Assemble a todo from stored values.
    pub fn new(
        id: TodoId,
        title: impl Into<String>,
        is_done: bool,
        created_at: DateTime<Utc>,
        last_updated: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            is_done,
            created_at,
            last_updated,
        }
    }

    /// Identifier.
    pub fn id(&self) -> TodoId {
        self.id
    }

    /// Title text.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Completion flag.
    pub fn is_done(&self) -> bool {
        self.is_done
    }

    /// Insert timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last write timestamp.
    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }
}

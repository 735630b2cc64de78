//! Todo item data model
//!
//! Defines the `Todo` record served by the store and mirrored into the cache,
//! plus the validated input types used on the write path (`TodoDraft` for
//! create, `TodoPatch` for partial update).
//!
//! A `Todo` is treated as an immutable value once read: mutations always go
//! through the coordinator's update path and produce a fresh record, never an
//! in-place edit of a cached copy.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum length of a todo title or description, in characters.
///
/// Inputs are trimmed before the bound is applied.
pub const MAX_TEXT_LEN: usize = 100;

/// Store-assigned todo identifier.
///
/// Identifiers are assigned by the record store on create and are never
/// reused within a store's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(pub u64);

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TodoId {
    fn from(raw: u64) -> Self {
        TodoId(raw)
    }
}

/// A todo item as persisted by the record store.
///
/// Timestamps are owned by the record store: `created_at` is set once on
/// create, `updated_at` is refreshed on every successful update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Store-assigned identifier.
    pub id: TodoId,
    /// Short title, bounded to [`MAX_TEXT_LEN`] characters.
    pub title: String,
    /// Free-form description, bounded to [`MAX_TEXT_LEN`] characters.
    pub description: String,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Validation failures for todo input fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Title exceeds [`MAX_TEXT_LEN`] characters after trimming.
    #[error("title too long: {len} characters (max: {MAX_TEXT_LEN})")]
    TitleTooLong { len: usize },

    /// Description exceeds [`MAX_TEXT_LEN`] characters after trimming.
    #[error("description too long: {len} characters (max: {MAX_TEXT_LEN})")]
    DescriptionTooLong { len: usize },
}

/// Validated input for creating a todo.
///
/// Construction trims both fields and enforces the length bounds, so a
/// `TodoDraft` that exists is always storable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDraft {
    title: String,
    description: String,
}

impl TodoDraft {
    /// Build a draft from raw input.
    ///
    /// Both fields are trimmed of surrounding whitespace before the
    /// [`MAX_TEXT_LEN`] bound is checked.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Result<Self, ValidationError> {
        let title = bounded_text(title.into()).map_err(|len| ValidationError::TitleTooLong { len })?;
        let description =
            bounded_text(description.into()).map_err(|len| ValidationError::DescriptionTooLong { len })?;
        Ok(Self { title, description })
    }

    /// The validated title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The validated description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Consume the draft, yielding `(title, description)`.
    pub fn into_fields(self) -> (String, String) {
        (self.title, self.description)
    }
}

/// Validated partial update for a todo.
///
/// Absent fields keep their previous value when the patch is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    title: Option<String>,
    description: Option<String>,
}

impl TodoPatch {
    /// An empty patch; applying it refreshes `updated_at` but changes no field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title, trimming and bounds-checking it.
    pub fn with_title(mut self, title: impl Into<String>) -> Result<Self, ValidationError> {
        let title = bounded_text(title.into()).map_err(|len| ValidationError::TitleTooLong { len })?;
        self.title = Some(title);
        Ok(self)
    }

    /// Set the description, trimming and bounds-checking it.
    pub fn with_description(mut self, description: impl Into<String>) -> Result<Self, ValidationError> {
        let description =
            bounded_text(description.into()).map_err(|len| ValidationError::DescriptionTooLong { len })?;
        self.description = Some(description);
        Ok(self)
    }

    /// The new title, if one was supplied.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The new description, if one was supplied.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether the patch supplies no fields at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }

    /// Merge this patch over an existing record, yielding the full field set
    /// to persist. Absent fields retain the record's current value.
    pub fn apply_to(&self, current: &Todo) -> TodoFields {
        TodoFields {
            title: self.title.clone().unwrap_or_else(|| current.title.clone()),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| current.description.clone()),
        }
    }
}

/// The full, already-merged field set handed to the record store's update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoFields {
    /// New title value.
    pub title: String,
    /// New description value.
    pub description: String,
}

fn bounded_text(raw: String) -> Result<String, usize> {
    let trimmed = raw.trim();
    let len = trimmed.chars().count();
    if len > MAX_TEXT_LEN {
        return Err(len);
    }
    Ok(trimmed.to_string())
}

//! Todo item domain model.
//!
//! # Responsibility
//! - Define the canonical task record shown by plan, focus and archive views.
//! - Provide validation applied before every persistence write.
//!
//! # Invariants
//! - `id` is stable and never reused for another item.
//! - `date` is a local wall-clock timestamp; `None` means "unscheduled".
//! - Blocking relations are not stored on the item; see `plan::blocking`.

use crate::model::project::ProjectId;
use crate::model::repeat_state::RepeatState;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a todo item.
pub type TodoItemId = Uuid;

/// Maximum accepted item name length in characters.
pub const MAX_NAME_CHARS: usize = 1024;
/// Maximum accepted notes length in characters.
pub const MAX_NOTES_CHARS: usize = 64 * 1024;

/// Validation failures for `TodoItem`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoItemValidationError {
    /// Nil UUID cannot identify a persisted item.
    NilId,
    NameTooLong { chars: usize, max: usize },
    NotesTooLong { chars: usize, max: usize },
}

impl Display for TodoItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "todo item id must not be nil"),
            Self::NameTooLong { chars, max } => {
                write!(f, "todo item name has {chars} chars, max is {max}")
            }
            Self::NotesTooLong { chars, max } => {
                write!(f, "todo item notes have {chars} chars, max is {max}")
            }
        }
    }
}

impl Error for TodoItemValidationError {}

/// Canonical task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: TodoItemId,
    pub name: Option<String>,
    pub notes: Option<String>,
    /// Scheduled local time. Drives missed/today/later bucketing.
    pub date: Option<NaiveDateTime>,
    pub repeat_state: RepeatState,
    /// Archived when `true`.
    pub done: bool,
    /// Owning project, if any.
    pub project: Option<ProjectId>,
}

impl TodoItem {
    /// Creates an unscheduled, non-repeating item with a generated ID.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), Some(name.into()))
    }

    /// Creates an item with a caller-provided ID and optional name.
    pub fn with_id(id: TodoItemId, name: Option<String>) -> Self {
        Self {
            id,
            name,
            notes: None,
            date: None,
            repeat_state: RepeatState::None,
            done: false,
            project: None,
        }
    }

    /// Builder-style date setter used by tests and import paths.
    pub fn scheduled(mut self, date: NaiveDateTime) -> Self {
        self.date = Some(date);
        self
    }

    /// Builder-style repeat rule setter.
    pub fn repeating(mut self, repeat_state: RepeatState) -> Self {
        self.repeat_state = repeat_state;
        self
    }

    /// Builder-style project setter.
    pub fn in_project(mut self, project: ProjectId) -> Self {
        self.project = Some(project);
        self
    }

    /// Returns a one-off copy with a fresh ID.
    ///
    /// Used by split: the copy keeps name/notes/date/project, drops the
    /// repeat rule and starts open.
    pub fn one_off_copy(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            repeat_state: RepeatState::None,
            done: false,
            ..self.clone()
        }
    }

    /// Returns the trimmed name when it is non-empty.
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Validates invariants required before persistence.
    pub fn validate(&self) -> Result<(), TodoItemValidationError> {
        if self.id.is_nil() {
            return Err(TodoItemValidationError::NilId);
        }
        if let Some(name) = &self.name {
            let chars = name.chars().count();
            if chars > MAX_NAME_CHARS {
                return Err(TodoItemValidationError::NameTooLong {
                    chars,
                    max: MAX_NAME_CHARS,
                });
            }
        }
        if let Some(notes) = &self.notes {
            let chars = notes.chars().count();
            if chars > MAX_NOTES_CHARS {
                return Err(TodoItemValidationError::NotesTooLong {
                    chars,
                    max: MAX_NOTES_CHARS,
                });
            }
        }
        Ok(())
    }
}

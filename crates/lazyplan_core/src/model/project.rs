//! Project domain model.
//!
//! # Invariants
//! - `priority == Project::DEFAULT_PRIORITY` means unprioritized.
//! - Prioritized projects hold unique ranks in `0..MAX_PRIORITY_ITEMS`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a project.
pub type ProjectId = Uuid;

/// Number of rank slots available to prioritized projects.
pub const MAX_PRIORITY_ITEMS: i64 = 5;

/// Named group of todo items with an optional display rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: Option<String>,
    /// Display rank; lower sorts first. See `DEFAULT_PRIORITY`.
    pub priority: i64,
}

impl Project {
    /// Sentinel rank for projects outside the prioritized list.
    pub const DEFAULT_PRIORITY: i64 = -1;

    /// Creates an unprioritized project with a generated ID.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: Some(name.into()),
            priority: Self::DEFAULT_PRIORITY,
        }
    }

    pub fn is_prioritized(&self) -> bool {
        self.priority != Self::DEFAULT_PRIORITY
    }
}

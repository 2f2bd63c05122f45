//! Project rank planning.
//!
//! # Responsibility
//! - Compute priority changes for prioritize, deprioritize and placement
//!   relative to another project.
//!
//! # Invariants
//! - Prioritized ranks stay unique and within `0..max`.
//! - Placement only shifts ranks between the old and new slot, so it never
//!   produces duplicates.
//!
//! Functions here return the rank changes to apply; persistence is the
//! caller's job.

use crate::model::project::{Project, ProjectId};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One rank assignment to persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityChange {
    pub project: ProjectId,
    pub priority: i64,
}

/// Rank planning failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriorityError {
    /// Every slot in `0..max` is taken.
    LimitReached { max: i64 },
    /// Reordering requires both projects to be prioritized.
    NotPrioritized(ProjectId),
}

impl Display for PriorityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LimitReached { max } => {
                write!(f, "all {max} priority slots are already taken")
            }
            Self::NotPrioritized(id) => write!(f, "project is not prioritized: {id}"),
        }
    }
}

impl Error for PriorityError {}

/// Lowest free rank for `project` among `projects`.
///
/// Already prioritized projects keep their rank (no change returned).
pub fn prioritize(
    project: &Project,
    projects: &[Project],
    max: i64,
) -> Result<Vec<PriorityChange>, PriorityError> {
    if project.is_prioritized() {
        return Ok(Vec::new());
    }
    let used = projects
        .iter()
        .filter(|other| other.is_prioritized())
        .map(|other| other.priority)
        .collect::<BTreeSet<_>>();
    let slot = (0..max)
        .find(|slot| !used.contains(slot))
        .ok_or(PriorityError::LimitReached { max })?;
    Ok(vec![PriorityChange {
        project: project.id,
        priority: slot,
    }])
}

/// Moves `project` to the unprioritized list. Other ranks are untouched.
pub fn deprioritize(project: &Project) -> Vec<PriorityChange> {
    if !project.is_prioritized() {
        return Vec::new();
    }
    vec![PriorityChange {
        project: project.id,
        priority: Project::DEFAULT_PRIORITY,
    }]
}

/// Places `moving` directly above `anchor` in the prioritized list.
pub fn place_above(
    moving: &Project,
    anchor: &Project,
    projects: &[Project],
) -> Result<Vec<PriorityChange>, PriorityError> {
    ensure_prioritized(&[moving, anchor])?;
    let target = if moving.priority < anchor.priority {
        anchor.priority - 1
    } else {
        anchor.priority
    };
    Ok(move_to_rank(moving, target, projects))
}

/// Places `moving` directly below `anchor` in the prioritized list.
pub fn place_below(
    moving: &Project,
    anchor: &Project,
    projects: &[Project],
) -> Result<Vec<PriorityChange>, PriorityError> {
    ensure_prioritized(&[moving, anchor])?;
    let target = if moving.priority > anchor.priority {
        anchor.priority + 1
    } else {
        anchor.priority
    };
    Ok(move_to_rank(moving, target, projects))
}

fn ensure_prioritized(projects: &[&Project]) -> Result<(), PriorityError> {
    match projects.iter().find(|project| !project.is_prioritized()) {
        Some(project) => Err(PriorityError::NotPrioritized(project.id)),
        None => Ok(()),
    }
}

/// Moves `moving` to rank `to`, shifting the ranks in between one step
/// toward its old rank.
///
/// Moving up shifts `[to, from)` by +1; moving down shifts `(from, to]`
/// by -1.
fn move_to_rank(moving: &Project, to: i64, projects: &[Project]) -> Vec<PriorityChange> {
    let from = moving.priority;
    if from == to {
        return Vec::new();
    }

    let mut changes = projects
        .iter()
        .filter(|project| project.id != moving.id && project.is_prioritized())
        .filter_map(|project| {
            let priority = project.priority;
            let shifted = if to < from && (to..from).contains(&priority) {
                priority + 1
            } else if from < to && (from + 1..=to).contains(&priority) {
                priority - 1
            } else {
                return None;
            };
            Some(PriorityChange {
                project: project.id,
                priority: shifted,
            })
        })
        .collect::<Vec<_>>();
    changes.push(PriorityChange {
        project: moving.id,
        priority: to,
    });
    changes
}

/// Applies changes to an in-memory project list.
pub fn apply_changes(projects: &mut [Project], changes: &[PriorityChange]) {
    for change in changes {
        if let Some(project) = projects.iter_mut().find(|p| p.id == change.project) {
            project.priority = change.priority;
        }
    }
}

//! Display ordering for plan sections.
//!
//! # Responsibility
//! - Compare items by project priority, then blocking role, then name.
//! - Order the later section by calendar day before priority.
//!
//! # Invariants
//! - Every comparator here is a total order, safe for `sort_by`.
//! - Unprioritized projects (and items without a project) always sort
//!   after prioritized ones.

use crate::model::project::{Project, ProjectId};
use crate::model::todo_item::TodoItem;
use crate::plan::blocking::BlockingGraph;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Project rank lookup used when ordering items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPriorities {
    by_project: HashMap<ProjectId, i64>,
}

impl ProjectPriorities {
    pub fn from_projects<'a>(projects: impl IntoIterator<Item = &'a Project>) -> Self {
        Self {
            by_project: projects
                .into_iter()
                .map(|project| (project.id, project.priority))
                .collect(),
        }
    }

    /// Effective rank of `item`; `DEFAULT_PRIORITY` when it has no
    /// (known) project.
    pub fn priority_of(&self, item: &TodoItem) -> i64 {
        item.project
            .and_then(|project| self.by_project.get(&project).copied())
            .unwrap_or(Project::DEFAULT_PRIORITY)
    }
}

/// Compares two raw project ranks.
///
/// Prioritized ranks compare ascending; the default sentinel sorts last.
pub fn compare_priority(a: i64, b: i64) -> Ordering {
    let default = Project::DEFAULT_PRIORITY;
    match (a == default, b == default) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.cmp(&b),
    }
}

/// Comparator bundle for one snapshot of projects and dependencies.
#[derive(Debug, Clone, Copy)]
pub struct PlanOrder<'a> {
    priorities: &'a ProjectPriorities,
    graph: &'a BlockingGraph,
}

impl<'a> PlanOrder<'a> {
    pub fn new(priorities: &'a ProjectPriorities, graph: &'a BlockingGraph) -> Self {
        Self { priorities, graph }
    }

    /// Order used by the missed and today sections.
    pub fn compare(&self, a: &TodoItem, b: &TodoItem) -> Ordering {
        compare_priority(self.priorities.priority_of(a), self.priorities.priority_of(b))
            .then_with(|| {
                self.graph
                    .blocking_state(a.id)
                    .cmp(&self.graph.blocking_state(b.id))
            })
            .then_with(|| compare_names(a.name.as_deref(), b.name.as_deref()))
    }

    /// Order used by the later section.
    ///
    /// Undated items come first. Dated items compare by calendar day and
    /// fall back to `compare` within the same day.
    pub fn compare_later(&self, a: &TodoItem, b: &TodoItem) -> Ordering {
        match (a.date, b.date) {
            (None, None) => self.compare(a, b),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(date_a), Some(date_b)) => date_a
                .date()
                .cmp(&date_b.date())
                .then_with(|| self.compare(a, b)),
        }
    }
}

fn compare_names(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

//! Item detail use-case service.
//!
//! # Responsibility
//! - Create and edit single items, including their project and schedule.
//! - Edit blockers and offer blocker candidates.
//!
//! # Invariants
//! - An item never blocks itself.
//! - Blocker edits never close a dependency cycle.
//! - A referenced project must exist.

use crate::model::project::ProjectId;
use crate::model::repeat_state::RepeatState;
use crate::model::todo_item::{TodoItem, TodoItemId};
use crate::plan::blocking::BlockingEdge;
use crate::repo::project_repo::ProjectRepository;
use crate::repo::todo_repo::{TodoListQuery, TodoRepository};
use crate::service::error::{item_error, ServiceError, ServiceResult};
use chrono::NaiveDateTime;
use std::collections::HashSet;

/// Field values for a new item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoDraft {
    pub name: Option<String>,
    pub notes: Option<String>,
    pub date: Option<NaiveDateTime>,
    pub repeat_state: RepeatState,
    pub project: Option<ProjectId>,
}

pub struct ItemDetailService<T: TodoRepository, P: ProjectRepository> {
    todos: T,
    projects: P,
}

impl<T: TodoRepository, P: ProjectRepository> ItemDetailService<T, P> {
    pub fn new(todos: T, projects: P) -> Self {
        Self { todos, projects }
    }

    /// Creates an open item from draft fields.
    pub fn create_item(&self, draft: TodoDraft) -> ServiceResult<TodoItem> {
        self.ensure_project(draft.project)?;
        let mut item = TodoItem::with_id(uuid::Uuid::new_v4(), draft.name);
        item.notes = draft.notes;
        item.date = draft.date;
        item.repeat_state = draft.repeat_state;
        item.project = draft.project;
        self.todos.create_item(&item)?;
        Ok(item)
    }

    /// Persists edited fields of an existing item.
    pub fn update_item(&self, item: &TodoItem) -> ServiceResult<()> {
        self.ensure_project(item.project)?;
        self.todos.update_item(item).map_err(item_error)
    }

    pub fn get_item(&self, id: TodoItemId) -> ServiceResult<TodoItem> {
        self.todos
            .get_item(id)?
            .ok_or(ServiceError::ItemNotFound(id))
    }

    pub fn delete_item(&self, id: TodoItemId) -> ServiceResult<()> {
        self.todos.delete_item(id).map_err(item_error)
    }

    /// Current blockers of `id`.
    pub fn blockers(&self, id: TodoItemId) -> ServiceResult<Vec<TodoItem>> {
        let graph = self.todos.load_blocking_graph()?;
        graph.blocked_by(id).map(|blocker| self.get_item(blocker)).collect()
    }

    /// Open, named items that `item` could be blocked by, sorted by name.
    ///
    /// Excludes the item itself and items it already blocks. `None` lists
    /// candidates for an item that is not stored yet.
    pub fn blockable_candidates(&self, item: Option<TodoItemId>) -> ServiceResult<Vec<TodoItem>> {
        let graph = self.todos.load_blocking_graph()?;
        let dependents = item
            .map(|id| graph.blocking(id).collect::<HashSet<_>>())
            .unwrap_or_default();

        let mut candidates = self
            .todos
            .list_items(&TodoListQuery::open())?
            .into_iter()
            .filter(|candidate| candidate.display_name().is_some())
            .filter(|candidate| Some(candidate.id) != item)
            .filter(|candidate| !dependents.contains(&candidate.id))
            .collect::<Vec<_>>();
        candidates.sort_by_cached_key(|candidate| {
            candidate
                .display_name()
                .map(str::to_lowercase)
                .unwrap_or_default()
        });
        Ok(candidates)
    }

    /// Replaces every blocker of `id`.
    pub fn set_blocked_by(&self, id: TodoItemId, blockers: &[TodoItemId]) -> ServiceResult<()> {
        self.get_item(id)?;
        if blockers.contains(&id) {
            return Err(ServiceError::SelfBlocking(id));
        }

        let mut graph = self.todos.load_blocking_graph()?;
        graph.clear_blocked_by(id);
        for blocker in blockers {
            if self.get_item(*blocker)?.done {
                return Err(ServiceError::BlockerDone(*blocker));
            }
            if graph.would_create_cycle(id, *blocker) {
                return Err(ServiceError::CycleDetected {
                    item: id,
                    blocker: *blocker,
                });
            }
            graph.insert(BlockingEdge {
                blocked: id,
                blocker: *blocker,
            });
        }

        self.todos
            .set_blocked_by(id, blockers)
            .map_err(item_error)
    }

    fn ensure_project(&self, project: Option<ProjectId>) -> ServiceResult<()> {
        match project {
            Some(id) if self.projects.get_project(id)?.is_none() => {
                Err(ServiceError::ProjectNotFound(id))
            }
            _ => Ok(()),
        }
    }
}

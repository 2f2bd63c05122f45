//! Archive screen use-case service.
//!
//! # Invariants
//! - Only done items are listed.
//! - Undo returns an item to the plan as an undated one-off.

use crate::model::repeat_state::RepeatState;
use crate::model::todo_item::{TodoItem, TodoItemId};
use crate::plan::archive::ArchiveSections;
use crate::repo::todo_repo::{TodoListQuery, TodoRepository};
use crate::service::error::{item_error, ServiceError, ServiceResult};
use log::info;

pub struct ArchiveService<T: TodoRepository> {
    todos: T,
}

impl<T: TodoRepository> ArchiveService<T> {
    pub fn new(todos: T) -> Self {
        Self { todos }
    }

    /// Done items grouped by first letter.
    pub fn fetch_sections(&self) -> ServiceResult<ArchiveSections> {
        let items = self.todos.list_items(&TodoListQuery::archived())?;
        Ok(ArchiveSections::group(items))
    }

    /// Archive sections filtered by a case-insensitive name match.
    pub fn search(&self, term: &str) -> ServiceResult<ArchiveSections> {
        Ok(self.fetch_sections()?.search(term))
    }

    /// Restores an archived item to the plan's later section.
    pub fn undo(&self, id: TodoItemId) -> ServiceResult<TodoItem> {
        let mut item = self
            .todos
            .get_item(id)?
            .ok_or(ServiceError::ItemNotFound(id))?;
        item.done = false;
        item.date = None;
        item.repeat_state = RepeatState::None;
        self.todos.update_item(&item).map_err(item_error)?;
        Ok(item)
    }

    /// Hard-deletes every archived item. Returns the number removed.
    pub fn clear_all(&self) -> ServiceResult<usize> {
        let ids = self
            .todos
            .list_items(&TodoListQuery::archived())?
            .into_iter()
            .map(|item| item.id)
            .collect::<Vec<_>>();
        let removed = self.todos.delete_items(&ids)?;
        info!("event=archive_clear module=service status=ok removed={removed}");
        Ok(removed)
    }
}

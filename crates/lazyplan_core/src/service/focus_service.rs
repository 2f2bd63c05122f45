//! Focus mode use-case service.
//!
//! Focus mode walks today's items one at a time. Blockers that are not
//! scheduled for today are reported as "missing" so they can be pulled in.

use crate::model::todo_item::{TodoItem, TodoItemId};
use crate::plan::blocking::{is_doable, missing_focus_items};
use crate::plan::clock::Clock;
use crate::repo::project_repo::ProjectRepository;
use crate::repo::settings_repo::SettingsRepository;
use crate::repo::todo_repo::TodoRepository;
use crate::service::error::ServiceResult;
use crate::service::plan_service::PlanService;

/// Focus screen service layered over the plan service.
pub struct FocusService<T, P, S, C>
where
    T: TodoRepository,
    P: ProjectRepository,
    S: SettingsRepository,
    C: Clock,
{
    plan: PlanService<T, P, S, C>,
}

impl<T, P, S, C> FocusService<T, P, S, C>
where
    T: TodoRepository,
    P: ProjectRepository,
    S: SettingsRepository,
    C: Clock,
{
    pub fn new(plan: PlanService<T, P, S, C>) -> Self {
        Self { plan }
    }

    /// Today's items in plan order.
    pub fn fetch_items(&self) -> ServiceResult<Vec<TodoItem>> {
        Ok(self.plan.sections()?.today)
    }

    /// Blockers of today's items that are not scheduled today.
    pub fn fetch_missing_items(&self) -> ServiceResult<Vec<TodoItem>> {
        let today = self.fetch_items()?;
        let graph = self.plan.blocking_graph()?;
        missing_focus_items(&today, &graph)
            .into_iter()
            .map(|id| self.plan.require_item(id))
            .collect()
    }

    /// Whether the first item of today can be worked on right now.
    pub fn is_doable(&self) -> ServiceResult<bool> {
        let today = self.fetch_items()?;
        let graph = self.plan.blocking_graph()?;
        Ok(is_doable(&today, &graph))
    }

    /// Pulls an item into today.
    pub fn today(&self, id: TodoItemId) -> ServiceResult<TodoItem> {
        self.plan.make_today(id)
    }

    pub fn done(&self, id: TodoItemId) -> ServiceResult<TodoItem> {
        self.plan.done(id)
    }
}

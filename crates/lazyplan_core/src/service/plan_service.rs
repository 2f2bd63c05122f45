//! Plan screen use-case service.
//!
//! # Responsibility
//! - Load open items into ordered missed / today / later sections.
//! - Apply row actions (done, later, split, delete, reschedule).
//!
//! # Invariants
//! - "Done" is refused while the item still has blockers.
//! - Completing an item and unblocking its dependents commit together.
//! - Split only applies to repeating items.

use crate::model::todo_item::{TodoItem, TodoItemId};
use crate::plan::actions::{available_actions, PlanItemAction};
use crate::plan::blocking::BlockingGraph;
use crate::plan::bucket::{bucketize, section_for, PlanSection, PlanSections, PlanSummary};
use crate::plan::clock::Clock;
use crate::plan::ordering::{PlanOrder, ProjectPriorities};
use crate::plan::recurrence::{complete, increment_date, postpone};
use crate::repo::project_repo::ProjectRepository;
use crate::repo::settings_repo::{SettingsRepository, HOLIDAY_KEY};
use crate::repo::todo_repo::{TodoListQuery, TodoRepository};
use crate::service::error::{item_error, ServiceError, ServiceResult};
use chrono::{Duration, NaiveDateTime};
use log::info;

/// Result of loading the plan screen.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    /// Holiday mode is on; nothing is due.
    Holiday,
    Sections(PlanSections),
}

/// Plan screen service.
pub struct PlanService<T, P, S, C>
where
    T: TodoRepository,
    P: ProjectRepository,
    S: SettingsRepository,
    C: Clock,
{
    todos: T,
    projects: P,
    settings: S,
    clock: C,
}

impl<T, P, S, C> PlanService<T, P, S, C>
where
    T: TodoRepository,
    P: ProjectRepository,
    S: SettingsRepository,
    C: Clock,
{
    pub fn new(todos: T, projects: P, settings: S, clock: C) -> Self {
        Self {
            todos,
            projects,
            settings,
            clock,
        }
    }

    /// Loads the plan, honoring holiday mode.
    pub fn load(&self) -> ServiceResult<PlanOutcome> {
        if self.holiday_enabled()? {
            return Ok(PlanOutcome::Holiday);
        }
        Ok(PlanOutcome::Sections(self.sections()?))
    }

    /// Loads ordered sections regardless of holiday mode.
    pub fn sections(&self) -> ServiceResult<PlanSections> {
        let items = self.todos.list_items(&TodoListQuery::open())?;
        let projects = self.projects.list_projects()?;
        let graph = self.todos.load_blocking_graph()?;
        let priorities = ProjectPriorities::from_projects(&projects);
        let order = PlanOrder::new(&priorities, &graph);
        Ok(bucketize(items, self.clock.now(), &order))
    }

    /// Section counts for the plan header and the app badge.
    ///
    /// Holiday mode reports an empty plan.
    pub fn summary(&self) -> ServiceResult<PlanSummary> {
        match self.load()? {
            PlanOutcome::Holiday => Ok(PlanSummary::default()),
            PlanOutcome::Sections(sections) => Ok(sections.summary()),
        }
    }

    /// Row actions for one open item. Archived items offer none.
    pub fn available_actions(&self, id: TodoItemId) -> ServiceResult<Vec<PlanItemAction>> {
        let item = self.require_item(id)?;
        if item.done {
            return Ok(Vec::new());
        }
        let graph = self.todos.load_blocking_graph()?;
        let section = section_for(item.date, self.clock.now());
        Ok(available_actions(&item, section, &graph))
    }

    /// Marks an item done and unblocks everything it was blocking.
    ///
    /// One-off items are archived; repeating items advance to their next
    /// occurrence. Returns the stored item.
    pub fn done(&self, id: TodoItemId) -> ServiceResult<TodoItem> {
        let mut item = self.require_item(id)?;
        let graph = self.todos.load_blocking_graph()?;
        if !graph.is_actionable(id) {
            return Err(ServiceError::ItemBlocked(id));
        }

        let unblocked = graph.blocking(id).count();
        complete(&mut item, self.clock.now());
        self.todos.complete_item(&item).map_err(item_error)?;
        info!(
            "event=plan_done module=service status=ok item={} archived={} unblocked={}",
            item.id, item.done, unblocked
        );
        Ok(item)
    }

    /// Moves an item out of today. Returns the stored item.
    pub fn later(&self, id: TodoItemId) -> ServiceResult<TodoItem> {
        let mut item = self.require_item(id)?;
        postpone(&mut item, self.clock.now());
        self.todos.update_item(&item).map_err(item_error)?;
        Ok(item)
    }

    /// Splits a repeating item into a one-off copy and the advanced original.
    ///
    /// The copy takes over the original's blockers. Returns the copy.
    pub fn split(&self, id: TodoItemId) -> ServiceResult<TodoItem> {
        let mut original = self.require_item(id)?;
        if !original.repeat_state.is_repeating() {
            return Err(ServiceError::NotRepeating(id));
        }

        let copy = original.one_off_copy();
        let steps = increment_date(&mut original, self.clock.now());
        self.todos
            .split_item(&original, &copy)
            .map_err(item_error)?;
        info!(
            "event=plan_split module=service status=ok item={} copy={} steps={}",
            original.id, copy.id, steps
        );
        Ok(copy)
    }

    /// Hard-deletes an item together with its blocking edges.
    pub fn delete(&self, id: TodoItemId) -> ServiceResult<()> {
        self.todos.delete_item(id).map_err(item_error)
    }

    /// Schedules an item for now.
    pub fn make_today(&self, id: TodoItemId) -> ServiceResult<TodoItem> {
        self.reschedule(id, self.clock.now())
    }

    /// Schedules an item for 24 hours from now.
    pub fn make_tomorrow(&self, id: TodoItemId) -> ServiceResult<TodoItem> {
        self.reschedule(id, tomorrow(self.clock.now()))
    }

    /// Moves every missed item to now. Returns how many moved.
    pub fn make_all_today(&self) -> ServiceResult<usize> {
        self.reschedule_missed(self.clock.now())
    }

    /// Moves every missed item to 24 hours from now. Returns how many moved.
    pub fn make_all_tomorrow(&self) -> ServiceResult<usize> {
        self.reschedule_missed(tomorrow(self.clock.now()))
    }

    fn reschedule(&self, id: TodoItemId, date: NaiveDateTime) -> ServiceResult<TodoItem> {
        let mut item = self.require_item(id)?;
        item.date = Some(date);
        self.todos.update_item(&item).map_err(item_error)?;
        Ok(item)
    }

    fn reschedule_missed(&self, date: NaiveDateTime) -> ServiceResult<usize> {
        let now = self.clock.now();
        let missed = self
            .todos
            .list_items(&TodoListQuery::open())?
            .into_iter()
            .filter(|item| section_for(item.date, now) == PlanSection::Missed)
            .map(|mut item| {
                item.date = Some(date);
                item
            })
            .collect::<Vec<_>>();
        if missed.is_empty() {
            return Ok(0);
        }
        self.todos.update_items(&missed).map_err(item_error)?;
        Ok(missed.len())
    }

    pub(crate) fn blocking_graph(&self) -> ServiceResult<BlockingGraph> {
        Ok(self.todos.load_blocking_graph()?)
    }

    pub(crate) fn require_item(&self, id: TodoItemId) -> ServiceResult<TodoItem> {
        self.todos
            .get_item(id)?
            .ok_or(ServiceError::ItemNotFound(id))
    }

    fn holiday_enabled(&self) -> ServiceResult<bool> {
        Ok(self.settings.get_bool(HOLIDAY_KEY)?.unwrap_or(false))
    }
}

fn tomorrow(now: NaiveDateTime) -> NaiveDateTime {
    now.checked_add_signed(Duration::hours(24)).unwrap_or(now)
}

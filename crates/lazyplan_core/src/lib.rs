//! Planning core for LazyPlan.
//! This crate is the single source of truth for bucketing, recurrence,
//! blocking and priority rules.

pub mod db;
pub mod logging;
pub mod model;
pub mod plan;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::project::{Project, ProjectId, MAX_PRIORITY_ITEMS};
pub use model::repeat_state::RepeatState;
pub use model::todo_item::{TodoItem, TodoItemId, TodoItemValidationError};
pub use plan::actions::PlanItemAction;
pub use plan::archive::ArchiveSections;
pub use plan::blocking::{BlockingEdge, BlockingGraph, BlockingState};
pub use plan::bucket::{PlanSection, PlanSections, PlanSummary};
pub use plan::clock::{Clock, FixedClock, SystemClock};
pub use repo::project_repo::{ProjectRepository, SqliteProjectRepository};
pub use repo::settings_repo::{SettingsRepository, SqliteSettingsRepository};
pub use repo::todo_repo::{
    RepoError, RepoResult, SqliteTodoRepository, TodoListQuery, TodoRepository,
};
pub use service::archive_service::ArchiveService;
pub use service::error::{ServiceError, ServiceResult};
pub use service::focus_service::FocusService;
pub use service::holiday_service::HolidayService;
pub use service::item_detail_service::{ItemDetailService, TodoDraft};
pub use service::plan_service::{PlanOutcome, PlanService};
pub use service::project_service::ProjectService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

//! Errors surfaced by planning use-case services.

use crate::model::project::ProjectId;
use crate::model::todo_item::TodoItemId;
use crate::plan::priority::PriorityError;
use crate::repo::todo_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    /// Target todo item does not exist.
    ItemNotFound(TodoItemId),
    /// Target project does not exist.
    ProjectNotFound(ProjectId),
    /// Done was requested while the item still waits on blockers.
    ItemBlocked(TodoItemId),
    /// Split was requested for a one-off item.
    NotRepeating(TodoItemId),
    /// An item cannot block itself.
    SelfBlocking(TodoItemId),
    /// Archived items cannot block; their edges would never be released.
    BlockerDone(TodoItemId),
    /// The new edge would make `item` wait on itself transitively.
    CycleDetected {
        item: TodoItemId,
        blocker: TodoItemId,
    },
    /// Project rank change rejected.
    Priority(PriorityError),
    /// Repository-level failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ItemNotFound(id) => write!(f, "todo item not found: {id}"),
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
            Self::ItemBlocked(id) => write!(f, "todo item is still blocked: {id}"),
            Self::NotRepeating(id) => write!(f, "todo item does not repeat: {id}"),
            Self::SelfBlocking(id) => write!(f, "todo item cannot block itself: {id}"),
            Self::BlockerDone(id) => write!(f, "archived todo item cannot block: {id}"),
            Self::CycleDetected { item, blocker } => write!(
                f,
                "blocking {item} by {blocker} would create a dependency cycle"
            ),
            Self::Priority(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Priority(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<PriorityError> for ServiceError {
    fn from(value: PriorityError) -> Self {
        Self::Priority(value)
    }
}

/// Maps repository not-found on a todo write to `ItemNotFound`.
pub(crate) fn item_error(err: RepoError) -> ServiceError {
    match err {
        RepoError::NotFound(id) => ServiceError::ItemNotFound(id),
        other => ServiceError::Repo(other),
    }
}

/// Maps repository not-found on a project write to `ProjectNotFound`.
pub(crate) fn project_error(err: RepoError) -> ServiceError {
    match err {
        RepoError::NotFound(id) => ServiceError::ProjectNotFound(id),
        other => ServiceError::Repo(other),
    }
}

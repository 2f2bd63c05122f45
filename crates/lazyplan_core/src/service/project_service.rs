//! Project use-case service.
//!
//! # Responsibility
//! - Create, rename and delete projects.
//! - Re-rank prioritized projects through `plan::priority`.
//!
//! # Invariants
//! - At most `MAX_PRIORITY_ITEMS` projects are prioritized.
//! - Each re-rank is persisted in one transaction.

use crate::model::project::{Project, ProjectId, MAX_PRIORITY_ITEMS};
use crate::plan::priority::{deprioritize, place_above, place_below, prioritize, PriorityChange};
use crate::repo::project_repo::ProjectRepository;
use crate::service::error::{project_error, ServiceError, ServiceResult};
use log::info;

pub struct ProjectService<P: ProjectRepository> {
    repo: P,
}

impl<P: ProjectRepository> ProjectService<P> {
    pub fn new(repo: P) -> Self {
        Self { repo }
    }

    /// Creates an unprioritized project.
    pub fn add_project(&self, name: impl Into<String>) -> ServiceResult<Project> {
        let project = Project::new(name);
        self.repo.create_project(&project)?;
        Ok(project)
    }

    /// Renames a project. Blank names are stored as absent.
    pub fn rename(&self, id: ProjectId, name: &str) -> ServiceResult<()> {
        let name = Some(name.trim()).filter(|name| !name.is_empty());
        self.repo.rename_project(id, name).map_err(project_error)
    }

    /// Deletes a project; its items stay and lose the reference.
    pub fn delete(&self, id: ProjectId) -> ServiceResult<()> {
        self.repo.delete_project(id).map_err(project_error)
    }

    pub fn get(&self, id: ProjectId) -> ServiceResult<Project> {
        self.require(id)
    }

    /// Prioritized projects by ascending rank.
    pub fn fetch_prioritized(&self) -> ServiceResult<Vec<Project>> {
        Ok(self
            .repo
            .list_projects()?
            .into_iter()
            .filter(Project::is_prioritized)
            .collect())
    }

    /// Unprioritized projects by name.
    pub fn fetch_other(&self) -> ServiceResult<Vec<Project>> {
        Ok(self
            .repo
            .list_projects()?
            .into_iter()
            .filter(|project| !project.is_prioritized())
            .collect())
    }

    /// Gives a project the lowest free rank.
    pub fn prioritize(&self, id: ProjectId) -> ServiceResult<Project> {
        let project = self.require(id)?;
        let projects = self.repo.list_projects()?;
        let changes = prioritize(&project, &projects, MAX_PRIORITY_ITEMS)?;
        self.persist("prioritize", &changes)?;
        self.require(id)
    }

    /// Moves a project to the unprioritized list.
    pub fn deprioritize(&self, id: ProjectId) -> ServiceResult<Project> {
        let project = self.require(id)?;
        let changes = deprioritize(&project);
        self.persist("deprioritize", &changes)?;
        self.require(id)
    }

    /// Re-ranks `moving` directly above `anchor`.
    pub fn prioritise_above(&self, moving: ProjectId, anchor: ProjectId) -> ServiceResult<()> {
        let (moving, anchor, projects) = self.reorder_inputs(moving, anchor)?;
        let changes = place_above(&moving, &anchor, &projects)?;
        self.persist("above", &changes)
    }

    /// Re-ranks `moving` directly below `anchor`.
    pub fn prioritise_below(&self, moving: ProjectId, anchor: ProjectId) -> ServiceResult<()> {
        let (moving, anchor, projects) = self.reorder_inputs(moving, anchor)?;
        let changes = place_below(&moving, &anchor, &projects)?;
        self.persist("below", &changes)
    }

    fn reorder_inputs(
        &self,
        moving: ProjectId,
        anchor: ProjectId,
    ) -> ServiceResult<(Project, Project, Vec<Project>)> {
        let moving = self.require(moving)?;
        let anchor = self.require(anchor)?;
        let projects = self.repo.list_projects()?;
        Ok((moving, anchor, projects))
    }

    fn persist(&self, op: &str, changes: &[PriorityChange]) -> ServiceResult<()> {
        if changes.is_empty() {
            return Ok(());
        }
        self.repo
            .apply_priority_changes(changes)
            .map_err(project_error)?;
        info!(
            "event=project_reprioritize module=service status=ok op={op} changes={}",
            changes.len()
        );
        Ok(())
    }

    fn require(&self, id: ProjectId) -> ServiceResult<Project> {
        self.repo
            .get_project(id)?
            .ok_or(ServiceError::ProjectNotFound(id))
    }
}

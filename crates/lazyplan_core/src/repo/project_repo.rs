//! Project repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Rank changes from `plan::priority` are applied in one transaction so
//!   prioritized ranks never collide on disk.
//! - Deleting a project detaches its items (`project_uuid` set to NULL).

use crate::db::ensure_schema_ready;
use crate::model::project::{Project, ProjectId};
use crate::plan::priority::PriorityChange;
use crate::repo::todo_repo::{parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};

const PROJECT_SELECT_SQL: &str = "SELECT uuid, name, priority FROM projects";

/// Repository interface for project records.
pub trait ProjectRepository {
    fn create_project(&self, project: &Project) -> RepoResult<ProjectId>;
    fn rename_project(&self, id: ProjectId, name: Option<&str>) -> RepoResult<()>;
    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>>;
    /// All projects, prioritized first by rank, then the rest by name.
    fn list_projects(&self) -> RepoResult<Vec<Project>>;
    fn delete_project(&self, id: ProjectId) -> RepoResult<()>;
    fn apply_priority_changes(&self, changes: &[PriorityChange]) -> RepoResult<()>;
}

/// SQLite-backed project repository.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn create_project(&self, project: &Project) -> RepoResult<ProjectId> {
        self.conn.execute(
            "INSERT INTO projects (uuid, name, priority) VALUES (?1, ?2, ?3);",
            params![
                project.id.to_string(),
                project.name.as_deref(),
                project.priority
            ],
        )?;
        Ok(project.id)
    }

    fn rename_project(&self, id: ProjectId, name: Option<&str>) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE projects
             SET name = ?1, updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?2;",
            params![name, id.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_project_row(row)?));
        }
        Ok(None)
    }

    fn list_projects(&self) -> RepoResult<Vec<Project>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PROJECT_SELECT_SQL}
             ORDER BY
                CASE WHEN priority = ?1 THEN 1 ELSE 0 END ASC,
                priority ASC,
                name COLLATE NOCASE ASC,
                uuid ASC;"
        ))?;
        let mut rows = stmt.query([Project::DEFAULT_PRIORITY])?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }
        Ok(projects)
    }

    fn delete_project(&self, id: ProjectId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM projects WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn apply_priority_changes(&self, changes: &[PriorityChange]) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        for change in changes {
            let changed = tx.execute(
                "UPDATE projects
                 SET priority = ?1, updated_at = (strftime('%s', 'now') * 1000)
                 WHERE uuid = ?2;",
                params![change.priority, change.project.to_string()],
            )?;
            if changed == 0 {
                return Err(RepoError::NotFound(change.project));
            }
        }
        tx.commit()?;
        Ok(())
    }
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    let id = parse_uuid(row, "uuid")?;
    let priority: i64 = row.get("priority")?;
    if priority < Project::DEFAULT_PRIORITY {
        return Err(RepoError::InvalidData(format!(
            "invalid priority `{priority}` in projects.priority"
        )));
    }
    Ok(Project {
        id,
        name: row.get("name")?,
        priority,
    })
}

//! Todo item repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over `todo_items` and the `todo_blocks` edge table.
//! - Run multi-row planning mutations (complete, split) atomically.
//!
//! # Invariants
//! - Write paths must call `TodoItem::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Blocking edges are stored once as `(blocked_uuid, blocker_uuid)`.

use crate::db::{ensure_schema_ready, DbError};
use crate::model::project::ProjectId;
use crate::model::repeat_state::RepeatState;
use crate::model::todo_item::{TodoItem, TodoItemId, TodoItemValidationError};
use crate::plan::blocking::{BlockingEdge, BlockingGraph};
use chrono::NaiveDateTime;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const TODO_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    notes,
    date,
    repeat_state,
    done,
    project_uuid
FROM todo_items";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by todo, project and settings storage.
#[derive(Debug)]
pub enum RepoError {
    Validation(TodoItemValidationError),
    Db(DbError),
    NotFound(Uuid),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<TodoItemValidationError> for RepoError {
    fn from(value: TodoItemValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Filter options for listing todo items.
#[derive(Debug, Clone, Default)]
pub struct TodoListQuery {
    /// `Some(false)` for open items, `Some(true)` for the archive.
    pub done: Option<bool>,
    pub project: Option<ProjectId>,
}

impl TodoListQuery {
    pub fn open() -> Self {
        Self {
            done: Some(false),
            ..Self::default()
        }
    }

    pub fn archived() -> Self {
        Self {
            done: Some(true),
            ..Self::default()
        }
    }
}

/// Repository interface for todo items and their blocking edges.
pub trait TodoRepository {
    fn create_item(&self, item: &TodoItem) -> RepoResult<TodoItemId>;
    fn update_item(&self, item: &TodoItem) -> RepoResult<()>;
    /// Updates several items in one transaction.
    fn update_items(&self, items: &[TodoItem]) -> RepoResult<()>;
    fn get_item(&self, id: TodoItemId) -> RepoResult<Option<TodoItem>>;
    fn list_items(&self, query: &TodoListQuery) -> RepoResult<Vec<TodoItem>>;
    /// Hard-deletes one item; its edges go with it.
    fn delete_item(&self, id: TodoItemId) -> RepoResult<()>;
    /// Hard-deletes several items, returning how many rows went away.
    fn delete_items(&self, ids: &[TodoItemId]) -> RepoResult<usize>;
    fn load_blocking_graph(&self) -> RepoResult<BlockingGraph>;
    /// Replaces every blocker of `blocked`.
    fn set_blocked_by(&self, blocked: TodoItemId, blockers: &[TodoItemId]) -> RepoResult<()>;
    /// Persists a completed item and drops every edge where it blocks others.
    fn complete_item(&self, item: &TodoItem) -> RepoResult<()>;
    /// Inserts `copy` with the blockers of `original`, then persists
    /// `original` with no blockers.
    fn split_item(&self, original: &TodoItem, copy: &TodoItem) -> RepoResult<()>;
}

/// SQLite-backed todo repository.
pub struct SqliteTodoRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTodoRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }
}

impl TodoRepository for SqliteTodoRepository<'_> {
    fn create_item(&self, item: &TodoItem) -> RepoResult<TodoItemId> {
        insert_item(self.conn, item)?;
        Ok(item.id)
    }

    fn update_item(&self, item: &TodoItem) -> RepoResult<()> {
        update_item_row(self.conn, item)
    }

    fn update_items(&self, items: &[TodoItem]) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        for item in items {
            update_item_row(&tx, item)?;
        }
        tx.commit()?;
        Ok(())
    }

    fn get_item(&self, id: TodoItemId) -> RepoResult<Option<TodoItem>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TODO_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_item_row(row)?));
        }
        Ok(None)
    }

    fn list_items(&self, query: &TodoListQuery) -> RepoResult<Vec<TodoItem>> {
        let mut sql = format!("{TODO_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(done) = query.done {
            sql.push_str(" AND done = ?");
            bind_values.push(Value::Integer(bool_to_int(done)));
        }
        if let Some(project) = query.project {
            sql.push_str(" AND project_uuid = ?");
            bind_values.push(Value::Text(project.to_string()));
        }
        sql.push_str(" ORDER BY created_at ASC, uuid ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row)?);
        }
        Ok(items)
    }

    fn delete_item(&self, id: TodoItemId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM todo_items WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn delete_items(&self, ids: &[TodoItemId]) -> RepoResult<usize> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let mut deleted = 0;
        for id in ids {
            deleted += tx.execute("DELETE FROM todo_items WHERE uuid = ?1;", [id.to_string()])?;
        }
        tx.commit()?;
        Ok(deleted)
    }

    fn load_blocking_graph(&self) -> RepoResult<BlockingGraph> {
        let mut stmt = self.conn.prepare(
            "SELECT blocked_uuid, blocker_uuid
             FROM todo_blocks
             ORDER BY blocked_uuid ASC, blocker_uuid ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut edges = Vec::new();
        while let Some(row) = rows.next()? {
            edges.push(BlockingEdge {
                blocked: parse_uuid(row, "blocked_uuid")?,
                blocker: parse_uuid(row, "blocker_uuid")?,
            });
        }
        Ok(BlockingGraph::from_edges(edges))
    }

    fn set_blocked_by(&self, blocked: TodoItemId, blockers: &[TodoItemId]) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        ensure_item_exists(&tx, blocked)?;
        tx.execute(
            "DELETE FROM todo_blocks WHERE blocked_uuid = ?1;",
            [blocked.to_string()],
        )?;
        for blocker in blockers {
            ensure_item_exists(&tx, *blocker)?;
            tx.execute(
                "INSERT OR IGNORE INTO todo_blocks (blocked_uuid, blocker_uuid)
                 VALUES (?1, ?2);",
                params![blocked.to_string(), blocker.to_string()],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    fn complete_item(&self, item: &TodoItem) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        update_item_row(&tx, item)?;
        tx.execute(
            "DELETE FROM todo_blocks WHERE blocker_uuid = ?1;",
            [item.id.to_string()],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn split_item(&self, original: &TodoItem, copy: &TodoItem) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        insert_item(&tx, copy)?;
        tx.execute(
            "INSERT INTO todo_blocks (blocked_uuid, blocker_uuid)
             SELECT ?1, blocker_uuid
             FROM todo_blocks
             WHERE blocked_uuid = ?2;",
            params![copy.id.to_string(), original.id.to_string()],
        )?;
        tx.execute(
            "DELETE FROM todo_blocks WHERE blocked_uuid = ?1;",
            [original.id.to_string()],
        )?;
        update_item_row(&tx, original)?;
        tx.commit()?;
        Ok(())
    }
}

fn insert_item(conn: &Connection, item: &TodoItem) -> RepoResult<()> {
    item.validate()?;
    conn.execute(
        "INSERT INTO todo_items (
            uuid,
            name,
            notes,
            date,
            repeat_state,
            done,
            project_uuid
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
        params![
            item.id.to_string(),
            item.name.as_deref(),
            item.notes.as_deref(),
            item.date,
            item.repeat_state.as_code(),
            bool_to_int(item.done),
            item.project.map(|project| project.to_string()),
        ],
    )?;
    Ok(())
}

fn update_item_row(conn: &Connection, item: &TodoItem) -> RepoResult<()> {
    item.validate()?;
    let changed = conn.execute(
        "UPDATE todo_items
         SET
            name = ?1,
            notes = ?2,
            date = ?3,
            repeat_state = ?4,
            done = ?5,
            project_uuid = ?6,
            updated_at = (strftime('%s', 'now') * 1000)
         WHERE uuid = ?7;",
        params![
            item.name.as_deref(),
            item.notes.as_deref(),
            item.date,
            item.repeat_state.as_code(),
            bool_to_int(item.done),
            item.project.map(|project| project.to_string()),
            item.id.to_string(),
        ],
    )?;
    if changed == 0 {
        return Err(RepoError::NotFound(item.id));
    }
    Ok(())
}

fn ensure_item_exists(conn: &Connection, id: TodoItemId) -> RepoResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM todo_items WHERE uuid = ?1);",
        [id.to_string()],
        |row| row.get(0),
    )?;
    if exists == 0 {
        return Err(RepoError::NotFound(id));
    }
    Ok(())
}

fn parse_item_row(row: &Row<'_>) -> RepoResult<TodoItem> {
    let id = parse_uuid(row, "uuid")?;

    let repeat_text: String = row.get("repeat_state")?;
    let repeat_state = RepeatState::from_code(&repeat_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid repeat state `{repeat_text}` in todo_items.repeat_state"
        ))
    })?;

    let done = match row.get::<_, i64>("done")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid done value `{other}` in todo_items.done"
            )));
        }
    };

    let project = match row.get::<_, Option<String>>("project_uuid")? {
        Some(text) => Some(Uuid::parse_str(&text).map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid uuid value `{text}` in todo_items.project_uuid"
            ))
        })?),
        None => None,
    };

    let item = TodoItem {
        id,
        name: row.get("name")?,
        notes: row.get("notes")?,
        date: row.get::<_, Option<NaiveDateTime>>("date")?,
        repeat_state,
        done,
        project,
    };
    item.validate()?;
    Ok(item)
}

pub(crate) fn parse_uuid(row: &Row<'_>, column: &str) -> RepoResult<Uuid> {
    let text: String = row.get(column)?;
    Uuid::parse_str(&text)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{text}` in {column}")))
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

//! Key/value settings storage.
//!
//! Holds device-local planning switches such as holiday mode.

use crate::db::ensure_schema_ready;
use crate::repo::todo_repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension};

/// Settings key for the holiday mode flag.
pub const HOLIDAY_KEY: &str = "holiday_mode";

pub trait SettingsRepository {
    fn get_bool(&self, key: &str) -> RepoResult<Option<bool>>;
    fn set_bool(&self, key: &str, value: bool) -> RepoResult<()>;
}

pub struct SqliteSettingsRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSettingsRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }
}

impl SettingsRepository for SqliteSettingsRepository<'_> {
    fn get_bool(&self, key: &str) -> RepoResult<Option<bool>> {
        let value: Option<String> = self
            .conn
            .query_row("SELECT value FROM settings WHERE key = ?1;", [key], |row| {
                row.get(0)
            })
            .optional()?;
        match value.as_deref() {
            None => Ok(None),
            Some("true") => Ok(Some(true)),
            Some("false") => Ok(Some(false)),
            Some(other) => Err(RepoError::InvalidData(format!(
                "invalid boolean `{other}` for settings key `{key}`"
            ))),
        }
    }

    fn set_bool(&self, key: &str, value: bool) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, if value { "true" } else { "false" }],
        )?;
        Ok(())
    }
}

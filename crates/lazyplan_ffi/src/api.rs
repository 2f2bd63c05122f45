//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose one sync function per screen action to Dart via FRB.
//! - Translate core types into flat envelopes with string IDs and dates.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every envelope carries `ok` and a human-readable `message`.
//! - Dates cross the boundary as local `YYYY-MM-DDTHH:MM:SS` strings.

use chrono::NaiveDateTime;
use lazyplan_core::db::open_db;
use lazyplan_core::plan::archive::ArchiveSections;
use lazyplan_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    ArchiveService, FocusService, HolidayService, ItemDetailService, PlanItemAction, PlanOutcome,
    PlanService, Project, ProjectService, RepeatState, SqliteProjectRepository,
    SqliteSettingsRepository, SqliteTodoRepository, SystemClock, TodoDraft, TodoItem,
};
use log::warn;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::OnceLock;
use uuid::Uuid;

const DB_FILE_NAME: &str = "lazyplan.sqlite3";
const DB_PATH_ENV: &str = "LAZYPLAN_DB_PATH";
const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

type SqlitePlanService<'conn> = PlanService<
    SqliteTodoRepository<'conn>,
    SqliteProjectRepository<'conn>,
    SqliteSettingsRepository<'conn>,
    SystemClock,
>;

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Flat todo item projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItemView {
    pub id: String,
    pub name: Option<String>,
    pub notes: Option<String>,
    /// Local wall-clock date, `YYYY-MM-DDTHH:MM:SS`.
    pub date: Option<String>,
    /// Persisted repeat code (`none|daily|...|yearly`).
    pub repeat_state: String,
    /// Picker label; absent for `none`.
    pub repeat_label: Option<String>,
    pub done: bool,
    pub project_id: Option<String>,
}

/// Flat project projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectView {
    pub id: String,
    pub name: Option<String>,
    /// `-1` when unprioritized.
    pub priority: i64,
}

/// Plan screen envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanResponse {
    pub ok: bool,
    pub message: String,
    /// Holiday mode is on; sections are empty.
    pub holiday: bool,
    pub missed: Vec<TodoItemView>,
    pub today: Vec<TodoItemView>,
    pub later: Vec<TodoItemView>,
    /// Missed + today, for the app icon badge.
    pub badge_count: u32,
}

/// Focus screen envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusResponse {
    pub ok: bool,
    pub message: String,
    /// Today's items in plan order.
    pub items: Vec<TodoItemView>,
    /// Blockers of today's items not scheduled today.
    pub missing: Vec<TodoItemView>,
    /// First today item has no blockers.
    pub doable: bool,
}

/// One archive section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSectionView {
    /// Uppercase first letter, or `-`.
    pub key: String,
    pub items: Vec<TodoItemView>,
}

/// Archive screen envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveResponse {
    pub ok: bool,
    pub message: String,
    pub sections: Vec<ArchiveSectionView>,
}

/// Project list envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectListResponse {
    pub ok: bool,
    pub message: String,
    /// By ascending rank.
    pub prioritized: Vec<ProjectView>,
    /// By name.
    pub other: Vec<ProjectView>,
}

/// Single item envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemResponse {
    pub ok: bool,
    pub message: String,
    pub item: Option<TodoItemView>,
}

/// Item list envelope (blocker candidates, current blockers).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemListResponse {
    pub ok: bool,
    pub message: String,
    pub items: Vec<TodoItemView>,
}

/// Generic action envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    pub message: String,
    /// Created or affected ID, when there is exactly one.
    pub id: Option<String>,
    /// Row count for bulk actions, or a flag value (0/1) for toggles.
    pub affected: u32,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: Option<String>, affected: u32) -> Self {
        Self {
            ok: true,
            message: message.into(),
            id,
            affected,
        }
    }

    fn failure(op: &str, err: String) -> Self {
        Self {
            ok: false,
            message: failure_message(op, err),
            ..Self::default()
        }
    }
}

/// Row actions available for one item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemActionsResponse {
    pub ok: bool,
    pub message: String,
    /// Subset of `done|delete|later|split`, in display order.
    pub actions: Vec<String>,
}

/// Loads the plan screen.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn plan_load() -> PlanResponse {
    let result = with_conn(|conn| {
        let outcome = plan_service(conn)?.load().map_err(|err| err.to_string())?;
        Ok(match outcome {
            PlanOutcome::Holiday => PlanResponse {
                ok: true,
                message: "Holiday mode.".to_string(),
                holiday: true,
                ..PlanResponse::default()
            },
            PlanOutcome::Sections(sections) => {
                let badge_count = sections.summary().badge_count() as u32;
                PlanResponse {
                    ok: true,
                    message: format!("{} open item(s).", sections.summary().total()),
                    holiday: false,
                    missed: to_views(&sections.missed),
                    today: to_views(&sections.today),
                    later: to_views(&sections.later),
                    badge_count,
                }
            }
        })
    });
    result.unwrap_or_else(|err| PlanResponse {
        message: failure_message("plan_load", err),
        ..PlanResponse::default()
    })
}

/// Row actions for one plan item.
#[flutter_rust_bridge::frb(sync)]
pub fn plan_item_actions(item_id: String) -> ItemActionsResponse {
    let result = with_conn(|conn| {
        let id = parse_id(&item_id)?;
        plan_service(conn)?
            .available_actions(id)
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(actions) => ItemActionsResponse {
            ok: true,
            message: String::new(),
            actions: actions.into_iter().map(action_label).map(String::from).collect(),
        },
        Err(err) => ItemActionsResponse {
            message: failure_message("plan_item_actions", err),
            ..ItemActionsResponse::default()
        },
    }
}

/// Marks an item done; repeating items move to their next date.
#[flutter_rust_bridge::frb(sync)]
pub fn plan_done(item_id: String) -> ItemResponse {
    item_call("plan_done", &item_id, |conn, id| {
        plan_service(conn)?.done(id).map_err(|err| err.to_string())
    })
}

/// Moves an item out of today.
#[flutter_rust_bridge::frb(sync)]
pub fn plan_later(item_id: String) -> ItemResponse {
    item_call("plan_later", &item_id, |conn, id| {
        plan_service(conn)?.later(id).map_err(|err| err.to_string())
    })
}

/// Splits a repeating item; returns the one-off copy.
#[flutter_rust_bridge::frb(sync)]
pub fn plan_split(item_id: String) -> ItemResponse {
    item_call("plan_split", &item_id, |conn, id| {
        plan_service(conn)?.split(id).map_err(|err| err.to_string())
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn plan_make_today(item_id: String) -> ItemResponse {
    item_call("plan_make_today", &item_id, |conn, id| {
        plan_service(conn)?.make_today(id).map_err(|err| err.to_string())
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn plan_make_tomorrow(item_id: String) -> ItemResponse {
    item_call("plan_make_tomorrow", &item_id, |conn, id| {
        plan_service(conn)?
            .make_tomorrow(id)
            .map_err(|err| err.to_string())
    })
}

/// Moves every missed item to now.
#[flutter_rust_bridge::frb(sync)]
pub fn plan_make_all_today() -> ActionResponse {
    count_call("plan_make_all_today", |conn| {
        plan_service(conn)?
            .make_all_today()
            .map_err(|err| err.to_string())
    })
}

/// Moves every missed item to tomorrow.
#[flutter_rust_bridge::frb(sync)]
pub fn plan_make_all_tomorrow() -> ActionResponse {
    count_call("plan_make_all_tomorrow", |conn| {
        plan_service(conn)?
            .make_all_tomorrow()
            .map_err(|err| err.to_string())
    })
}

/// Hard-deletes an item.
#[flutter_rust_bridge::frb(sync)]
pub fn plan_delete(item_id: String) -> ActionResponse {
    let result = with_conn(|conn| {
        let id = parse_id(&item_id)?;
        plan_service(conn)?.delete(id).map_err(|err| err.to_string())
    });
    match result {
        Ok(()) => ActionResponse::success("Item deleted.", Some(item_id), 1),
        Err(err) => ActionResponse::failure("plan_delete", err),
    }
}

/// Loads focus mode state.
#[flutter_rust_bridge::frb(sync)]
pub fn focus_load() -> FocusResponse {
    let result = with_conn(|conn| {
        let focus = FocusService::new(plan_service(conn)?);
        let items = focus.fetch_items().map_err(|err| err.to_string())?;
        let missing = focus.fetch_missing_items().map_err(|err| err.to_string())?;
        let doable = focus.is_doable().map_err(|err| err.to_string())?;
        Ok(FocusResponse {
            ok: true,
            message: format!("{} item(s) today.", items.len()),
            items: to_views(&items),
            missing: to_views(&missing),
            doable,
        })
    });
    result.unwrap_or_else(|err| FocusResponse {
        message: failure_message("focus_load", err),
        ..FocusResponse::default()
    })
}

/// Pulls a missing blocker into today.
#[flutter_rust_bridge::frb(sync)]
pub fn focus_today(item_id: String) -> ItemResponse {
    item_call("focus_today", &item_id, |conn, id| {
        FocusService::new(plan_service(conn)?)
            .today(id)
            .map_err(|err| err.to_string())
    })
}

/// Loads archive sections, optionally filtered by name.
#[flutter_rust_bridge::frb(sync)]
pub fn archive_load(search: Option<String>) -> ArchiveResponse {
    let result = with_conn(|conn| {
        let service = ArchiveService::new(todo_repo(conn)?);
        let sections = match search.as_deref() {
            Some(term) => service.search(term),
            None => service.fetch_sections(),
        };
        sections.map_err(|err| err.to_string())
    });
    match result {
        Ok(sections) => ArchiveResponse {
            ok: true,
            message: format!("{} archived item(s).", sections.total_items()),
            sections: to_section_views(&sections),
        },
        Err(err) => ArchiveResponse {
            message: failure_message("archive_load", err),
            ..ArchiveResponse::default()
        },
    }
}

/// Restores an archived item to the plan.
#[flutter_rust_bridge::frb(sync)]
pub fn archive_undo(item_id: String) -> ItemResponse {
    item_call("archive_undo", &item_id, |conn, id| {
        ArchiveService::new(todo_repo(conn)?)
            .undo(id)
            .map_err(|err| err.to_string())
    })
}

/// Hard-deletes every archived item.
#[flutter_rust_bridge::frb(sync)]
pub fn archive_clear() -> ActionResponse {
    count_call("archive_clear", |conn| {
        ArchiveService::new(todo_repo(conn)?)
            .clear_all()
            .map_err(|err| err.to_string())
    })
}

/// Lists prioritized and other projects.
#[flutter_rust_bridge::frb(sync)]
pub fn project_list() -> ProjectListResponse {
    let result = with_conn(|conn| {
        let service = project_service(conn)?;
        let prioritized = service.fetch_prioritized().map_err(|err| err.to_string())?;
        let other = service.fetch_other().map_err(|err| err.to_string())?;
        Ok((prioritized, other))
    });
    match result {
        Ok((prioritized, other)) => ProjectListResponse {
            ok: true,
            message: String::new(),
            prioritized: prioritized.iter().map(to_project_view).collect(),
            other: other.iter().map(to_project_view).collect(),
        },
        Err(err) => ProjectListResponse {
            message: failure_message("project_list", err),
            ..ProjectListResponse::default()
        },
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn project_add(name: String) -> ActionResponse {
    let result = with_conn(|conn| {
        project_service(conn)?
            .add_project(name.trim())
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(project) => ActionResponse::success("Project created.", Some(project.id.to_string()), 1),
        Err(err) => ActionResponse::failure("project_add", err),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn project_rename(project_id: String, name: String) -> ActionResponse {
    project_call("project_rename", &project_id, |service, id| {
        service.rename(id, &name).map_err(|err| err.to_string())
    })
}

/// Deletes a project; its items lose the reference.
#[flutter_rust_bridge::frb(sync)]
pub fn project_delete(project_id: String) -> ActionResponse {
    project_call("project_delete", &project_id, |service, id| {
        service.delete(id).map_err(|err| err.to_string())
    })
}

/// Gives a project the lowest free rank.
#[flutter_rust_bridge::frb(sync)]
pub fn project_prioritize(project_id: String) -> ActionResponse {
    project_call("project_prioritize", &project_id, |service, id| {
        service
            .prioritize(id)
            .map(|_| ())
            .map_err(|err| err.to_string())
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn project_deprioritize(project_id: String) -> ActionResponse {
    project_call("project_deprioritize", &project_id, |service, id| {
        service
            .deprioritize(id)
            .map(|_| ())
            .map_err(|err| err.to_string())
    })
}

/// Re-ranks `project_id` directly above `anchor_id`.
#[flutter_rust_bridge::frb(sync)]
pub fn project_prioritise_above(project_id: String, anchor_id: String) -> ActionResponse {
    project_call("project_prioritise_above", &project_id, |service, id| {
        service
            .prioritise_above(id, parse_id(&anchor_id)?)
            .map_err(|err| err.to_string())
    })
}

/// Re-ranks `project_id` directly below `anchor_id`.
#[flutter_rust_bridge::frb(sync)]
pub fn project_prioritise_below(project_id: String, anchor_id: String) -> ActionResponse {
    project_call("project_prioritise_below", &project_id, |service, id| {
        service
            .prioritise_below(id, parse_id(&anchor_id)?)
            .map_err(|err| err.to_string())
    })
}

/// Creates an item.
///
/// `date` uses `YYYY-MM-DDTHH:MM:SS`; `repeat_state` is a repeat code and
/// defaults to `none`.
#[flutter_rust_bridge::frb(sync)]
pub fn item_create(
    name: Option<String>,
    notes: Option<String>,
    date: Option<String>,
    repeat_state: Option<String>,
    project_id: Option<String>,
) -> ItemResponse {
    let result = with_conn(|conn| {
        let draft = TodoDraft {
            name: normalize_text(name),
            notes: normalize_text(notes),
            date: parse_optional_date(date.as_deref())?,
            repeat_state: parse_repeat_state(repeat_state.as_deref())?,
            project: parse_optional_id(project_id.as_deref())?,
        };
        item_service(conn)?
            .create_item(draft)
            .map_err(|err| err.to_string())
    });
    item_response("item_create", result)
}

/// Replaces the editable fields of an item.
#[flutter_rust_bridge::frb(sync)]
pub fn item_update(
    item_id: String,
    name: Option<String>,
    notes: Option<String>,
    date: Option<String>,
    repeat_state: Option<String>,
    project_id: Option<String>,
) -> ItemResponse {
    item_call("item_update", &item_id, |conn, id| {
        let service = item_service(conn)?;
        let mut item = service.get_item(id).map_err(|err| err.to_string())?;
        item.name = normalize_text(name);
        item.notes = normalize_text(notes);
        item.date = parse_optional_date(date.as_deref())?;
        item.repeat_state = parse_repeat_state(repeat_state.as_deref())?;
        item.project = parse_optional_id(project_id.as_deref())?;
        service.update_item(&item).map_err(|err| err.to_string())?;
        Ok(item)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn item_get(item_id: String) -> ItemResponse {
    item_call("item_get", &item_id, |conn, id| {
        item_service(conn)?.get_item(id).map_err(|err| err.to_string())
    })
}

/// Current blockers of an item.
#[flutter_rust_bridge::frb(sync)]
pub fn item_blockers(item_id: String) -> ItemListResponse {
    let result = with_conn(|conn| {
        let id = parse_id(&item_id)?;
        item_service(conn)?.blockers(id).map_err(|err| err.to_string())
    });
    item_list_response("item_blockers", result)
}

/// Items that could block `item_id` (or a new item when absent).
#[flutter_rust_bridge::frb(sync)]
pub fn item_blockable_candidates(item_id: Option<String>) -> ItemListResponse {
    let result = with_conn(|conn| {
        let id = parse_optional_id(item_id.as_deref())?;
        item_service(conn)?
            .blockable_candidates(id)
            .map_err(|err| err.to_string())
    });
    item_list_response("item_blockable_candidates", result)
}

/// Replaces the blockers of an item.
#[flutter_rust_bridge::frb(sync)]
pub fn item_set_blocked_by(item_id: String, blocker_ids: Vec<String>) -> ActionResponse {
    let result = with_conn(|conn| {
        let id = parse_id(&item_id)?;
        let blockers = blocker_ids
            .iter()
            .map(|raw| parse_id(raw))
            .collect::<Result<Vec<_>, _>>()?;
        item_service(conn)?
            .set_blocked_by(id, &blockers)
            .map_err(|err| err.to_string())?;
        Ok(blockers.len())
    });
    match result {
        Ok(count) => ActionResponse::success("Blockers updated.", Some(item_id), count as u32),
        Err(err) => ActionResponse::failure("item_set_blocked_by", err),
    }
}

/// Reads the holiday switch; `affected` is 1 when enabled.
#[flutter_rust_bridge::frb(sync)]
pub fn holiday_get() -> ActionResponse {
    let result = with_conn(|conn| {
        holiday_service(conn)?
            .is_enabled()
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(enabled) => ActionResponse::success(String::new(), None, u32::from(enabled)),
        Err(err) => ActionResponse::failure("holiday_get", err),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn holiday_set(enabled: bool) -> ActionResponse {
    let result = with_conn(|conn| {
        holiday_service(conn)?
            .set_enabled(enabled)
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(()) => ActionResponse::success("Holiday mode updated.", None, u32::from(enabled)),
        Err(err) => ActionResponse::failure("holiday_set", err),
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn with_conn<T>(f: impl FnOnce(&Connection) -> Result<T, String>) -> Result<T, String> {
    let conn = open_db(resolve_db_path()).map_err(|err| format!("DB open failed: {err}"))?;
    f(&conn)
}

fn todo_repo(conn: &Connection) -> Result<SqliteTodoRepository<'_>, String> {
    SqliteTodoRepository::try_new(conn).map_err(|err| format!("todo repo init failed: {err}"))
}

fn project_repo(conn: &Connection) -> Result<SqliteProjectRepository<'_>, String> {
    SqliteProjectRepository::try_new(conn)
        .map_err(|err| format!("project repo init failed: {err}"))
}

fn settings_repo(conn: &Connection) -> Result<SqliteSettingsRepository<'_>, String> {
    SqliteSettingsRepository::try_new(conn)
        .map_err(|err| format!("settings repo init failed: {err}"))
}

fn plan_service(conn: &Connection) -> Result<SqlitePlanService<'_>, String> {
    Ok(PlanService::new(
        todo_repo(conn)?,
        project_repo(conn)?,
        settings_repo(conn)?,
        SystemClock,
    ))
}

fn project_service(
    conn: &Connection,
) -> Result<ProjectService<SqliteProjectRepository<'_>>, String> {
    Ok(ProjectService::new(project_repo(conn)?))
}

fn item_service(
    conn: &Connection,
) -> Result<ItemDetailService<SqliteTodoRepository<'_>, SqliteProjectRepository<'_>>, String> {
    Ok(ItemDetailService::new(todo_repo(conn)?, project_repo(conn)?))
}

fn holiday_service(
    conn: &Connection,
) -> Result<HolidayService<SqliteSettingsRepository<'_>>, String> {
    Ok(HolidayService::new(settings_repo(conn)?))
}

fn item_call(
    op: &str,
    raw_id: &str,
    f: impl FnOnce(&Connection, Uuid) -> Result<TodoItem, String>,
) -> ItemResponse {
    let result = with_conn(|conn| f(conn, parse_id(raw_id)?));
    item_response(op, result)
}

fn item_response(op: &str, result: Result<TodoItem, String>) -> ItemResponse {
    match result {
        Ok(item) => ItemResponse {
            ok: true,
            message: String::new(),
            item: Some(to_view(&item)),
        },
        Err(err) => ItemResponse {
            message: failure_message(op, err),
            ..ItemResponse::default()
        },
    }
}

fn item_list_response(op: &str, result: Result<Vec<TodoItem>, String>) -> ItemListResponse {
    match result {
        Ok(items) => ItemListResponse {
            ok: true,
            message: String::new(),
            items: to_views(&items),
        },
        Err(err) => ItemListResponse {
            message: failure_message(op, err),
            ..ItemListResponse::default()
        },
    }
}

fn count_call(op: &str, f: impl FnOnce(&Connection) -> Result<usize, String>) -> ActionResponse {
    match with_conn(f) {
        Ok(count) => {
            ActionResponse::success(format!("{count} item(s) updated."), None, count as u32)
        }
        Err(err) => ActionResponse::failure(op, err),
    }
}

fn project_call(
    op: &str,
    raw_id: &str,
    f: impl FnOnce(
        &ProjectService<SqliteProjectRepository<'_>>,
        Uuid,
    ) -> Result<(), String>,
) -> ActionResponse {
    let result = with_conn(|conn| {
        let id = parse_id(raw_id)?;
        f(&project_service(conn)?, id)
    });
    match result {
        Ok(()) => ActionResponse::success("Project updated.", Some(raw_id.to_string()), 1),
        Err(err) => ActionResponse::failure(op, err),
    }
}

fn failure_message(op: &str, err: String) -> String {
    warn!("event=ffi_call module=ffi status=error op={op}");
    format!("{op} failed: {err}")
}

fn parse_id(raw: &str) -> Result<Uuid, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid id `{}`", raw.trim()))
}

fn parse_optional_id(raw: Option<&str>) -> Result<Option<Uuid>, String> {
    match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => parse_id(raw).map(Some),
        None => Ok(None),
    }
}

fn parse_optional_date(raw: Option<&str>) -> Result<Option<NaiveDateTime>, String> {
    match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => NaiveDateTime::parse_from_str(raw, DATE_FORMAT)
            .map(Some)
            .map_err(|_| format!("invalid date `{raw}`, expected YYYY-MM-DDTHH:MM:SS")),
        None => Ok(None),
    }
}

fn parse_repeat_state(raw: Option<&str>) -> Result<RepeatState, String> {
    match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(code) => {
            RepeatState::from_code(code).ok_or_else(|| format!("invalid repeat state `{code}`"))
        }
        None => Ok(RepeatState::None),
    }
}

fn normalize_text(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

fn action_label(action: PlanItemAction) -> &'static str {
    match action {
        PlanItemAction::Done => "done",
        PlanItemAction::Delete => "delete",
        PlanItemAction::Later => "later",
        PlanItemAction::Split => "split",
    }
}

fn to_view(item: &TodoItem) -> TodoItemView {
    TodoItemView {
        id: item.id.to_string(),
        name: item.name.clone(),
        notes: item.notes.clone(),
        date: item.date.map(|date| date.format(DATE_FORMAT).to_string()),
        repeat_state: item.repeat_state.as_code().to_string(),
        repeat_label: item.repeat_state.label().map(str::to_string),
        done: item.done,
        project_id: item.project.map(|project| project.to_string()),
    }
}

fn to_views(items: &[TodoItem]) -> Vec<TodoItemView> {
    items.iter().map(to_view).collect()
}

fn to_section_views(sections: &ArchiveSections) -> Vec<ArchiveSectionView> {
    sections
        .iter()
        .map(|(key, items)| ArchiveSectionView {
            key: key.to_string(),
            items: to_views(items),
        })
        .collect()
}

fn to_project_view(project: &Project) -> ProjectView {
    ProjectView {
        id: project.id.to_string(),
        name: project.name.clone(),
        priority: project.priority,
    }
}

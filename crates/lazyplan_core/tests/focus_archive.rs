use chrono::{NaiveDate, NaiveDateTime};
use lazyplan_core::plan::archive::UNKNOWN_SECTION;
use lazyplan_core::{
    open_db_in_memory, ArchiveService, FixedClock, FocusService, HolidayService, PlanService,
    RepeatState, SqliteProjectRepository, SqliteSettingsRepository, SqliteTodoRepository,
    TodoItem, TodoRepository,
};
use rusqlite::Connection;

type SqliteFocus<'conn> = FocusService<
    SqliteTodoRepository<'conn>,
    SqliteProjectRepository<'conn>,
    SqliteSettingsRepository<'conn>,
    FixedClock,
>;

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 15)
        .and_then(|date| date.and_hms_opt(10, 0, 0))
        .unwrap()
}

fn todos(conn: &Connection) -> SqliteTodoRepository<'_> {
    SqliteTodoRepository::try_new(conn).unwrap()
}

fn focus(conn: &Connection) -> SqliteFocus<'_> {
    FocusService::new(PlanService::new(
        todos(conn),
        SqliteProjectRepository::try_new(conn).unwrap(),
        SqliteSettingsRepository::try_new(conn).unwrap(),
        FixedClock(now()),
    ))
}

fn archive(conn: &Connection) -> ArchiveService<SqliteTodoRepository<'_>> {
    ArchiveService::new(todos(conn))
}

fn archived(name: Option<&str>) -> TodoItem {
    let mut item = TodoItem::with_id(uuid::Uuid::new_v4(), name.map(str::to_string));
    item.done = true;
    item
}

#[test]
fn focus_reports_blockers_missing_from_today() {
    let conn = open_db_in_memory().unwrap();
    let repo = todos(&conn);
    let write = TodoItem::new("write talk").scheduled(now());
    let research = TodoItem::new("research");
    repo.create_item(&write).unwrap();
    repo.create_item(&research).unwrap();
    repo.set_blocked_by(write.id, &[research.id]).unwrap();

    let service = focus(&conn);
    assert_eq!(service.fetch_items().unwrap(), vec![write.clone()]);
    assert!(!service.is_doable().unwrap());
    let missing = service.fetch_missing_items().unwrap();
    assert_eq!(missing.iter().map(|item| item.id).collect::<Vec<_>>(), vec![research.id]);

    service.today(research.id).unwrap();
    assert!(service.fetch_missing_items().unwrap().is_empty());
    let today = service.fetch_items().unwrap();
    assert_eq!(today[0].id, research.id);
    assert!(service.is_doable().unwrap());

    service.done(research.id).unwrap();
    assert!(service.is_doable().unwrap());
    assert_eq!(service.fetch_items().unwrap()[0].id, write.id);
}

#[test]
fn empty_focus_is_doable() {
    let conn = open_db_in_memory().unwrap();
    let service = focus(&conn);
    assert!(service.fetch_items().unwrap().is_empty());
    assert!(service.is_doable().unwrap());
}

#[test]
fn archive_groups_by_first_letter_with_unknown_section() {
    let conn = open_db_in_memory().unwrap();
    let repo = todos(&conn);
    for item in [
        archived(Some("banana")),
        archived(Some("apple")),
        archived(Some("Avocado")),
        archived(Some("   ")),
        archived(None),
    ] {
        repo.create_item(&item).unwrap();
    }
    repo.create_item(&TodoItem::new("open item")).unwrap();

    let sections = archive(&conn).fetch_sections().unwrap();
    assert_eq!(sections.keys().collect::<Vec<_>>(), vec!['-', 'A', 'B']);
    assert_eq!(sections.total_items(), 5);
    assert_eq!(sections.section(UNKNOWN_SECTION).map(<[TodoItem]>::len), Some(2));
    let a_names = sections
        .section('A')
        .unwrap()
        .iter()
        .map(|item| item.name.as_deref().unwrap_or_default())
        .collect::<Vec<_>>();
    assert_eq!(a_names, vec!["Avocado", "apple"]);
}

#[test]
fn archive_search_is_case_insensitive_and_drops_empty_sections() {
    let conn = open_db_in_memory().unwrap();
    let repo = todos(&conn);
    for name in ["Grocery run", "gym", "Tax return"] {
        repo.create_item(&archived(Some(name))).unwrap();
    }

    let service = archive(&conn);
    let found = service.search("RUN").unwrap();
    assert_eq!(found.keys().collect::<Vec<_>>(), vec!['G']);
    assert_eq!(found.total_items(), 1);

    assert_eq!(service.search("").unwrap().total_items(), 3);
    assert!(service.search("nothing").unwrap().is_empty());
}

#[test]
fn undo_returns_item_to_plan_as_undated_one_off() {
    let conn = open_db_in_memory().unwrap();
    let mut item = archived(Some("laundry"));
    item.repeat_state = RepeatState::Weekly;
    item.date = Some(now());
    todos(&conn).create_item(&item).unwrap();

    let restored = archive(&conn).undo(item.id).unwrap();
    assert!(!restored.done);
    assert_eq!(restored.date, None);
    assert_eq!(restored.repeat_state, RepeatState::None);
    assert!(archive(&conn).fetch_sections().unwrap().is_empty());
}

#[test]
fn clear_all_deletes_only_archived_items() {
    let conn = open_db_in_memory().unwrap();
    let repo = todos(&conn);
    let open = TodoItem::new("keep me");
    repo.create_item(&open).unwrap();
    repo.create_item(&archived(Some("old"))).unwrap();
    repo.create_item(&archived(Some("older"))).unwrap();

    assert_eq!(archive(&conn).clear_all().unwrap(), 2);
    assert!(archive(&conn).fetch_sections().unwrap().is_empty());
    assert!(repo.get_item(open.id).unwrap().is_some());
}

#[test]
fn holiday_flag_persists_and_defaults_off() {
    let conn = open_db_in_memory().unwrap();
    let service = HolidayService::new(SqliteSettingsRepository::try_new(&conn).unwrap());

    assert!(!service.is_enabled().unwrap());
    service.set_enabled(true).unwrap();
    assert!(service.is_enabled().unwrap());
    service.set_enabled(false).unwrap();
    assert!(!service.is_enabled().unwrap());
}

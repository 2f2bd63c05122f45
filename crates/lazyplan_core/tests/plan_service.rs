use chrono::{Duration, NaiveDate, NaiveDateTime};
use lazyplan_core::{
    open_db_in_memory, ArchiveService, FixedClock, HolidayService, PlanItemAction, PlanOutcome,
    PlanSections, PlanService, PlanSummary, Project, ProjectRepository, ProjectService,
    RepeatState, ServiceError, SqliteProjectRepository, SqliteSettingsRepository,
    SqliteTodoRepository, TodoItem, TodoRepository,
};
use rusqlite::Connection;

type SqlitePlan<'conn> = PlanService<
    SqliteTodoRepository<'conn>,
    SqliteProjectRepository<'conn>,
    SqliteSettingsRepository<'conn>,
    FixedClock,
>;

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .unwrap()
}

fn now() -> NaiveDateTime {
    at(2024, 6, 15, 14, 30)
}

fn plan(conn: &Connection) -> SqlitePlan<'_> {
    PlanService::new(
        SqliteTodoRepository::try_new(conn).unwrap(),
        SqliteProjectRepository::try_new(conn).unwrap(),
        SqliteSettingsRepository::try_new(conn).unwrap(),
        FixedClock(now()),
    )
}

fn todos(conn: &Connection) -> SqliteTodoRepository<'_> {
    SqliteTodoRepository::try_new(conn).unwrap()
}

fn sections(service: &SqlitePlan<'_>) -> PlanSections {
    match service.load().unwrap() {
        PlanOutcome::Sections(sections) => sections,
        PlanOutcome::Holiday => panic!("holiday mode should be off"),
    }
}

fn names(items: &[TodoItem]) -> Vec<&str> {
    items
        .iter()
        .map(|item| item.name.as_deref().unwrap_or_default())
        .collect()
}

#[test]
fn missed_one_off_item_is_archived_when_done() {
    let conn = open_db_in_memory().unwrap();
    let service = plan(&conn);
    let item = TodoItem::new("pay rent").scheduled(now() - Duration::days(2));
    todos(&conn).create_item(&item).unwrap();

    assert_eq!(names(&sections(&service).missed), vec!["pay rent"]);

    let done = service.done(item.id).unwrap();
    assert!(done.done);
    assert!(sections(&service).summary().is_done_totally());

    let archive = ArchiveService::new(todos(&conn)).fetch_sections().unwrap();
    let section = archive.section('P').expect("archived under P");
    assert_eq!(section[0].id, item.id);
}

#[test]
fn sections_partition_by_day_boundaries() {
    let conn = open_db_in_memory().unwrap();
    let repo = todos(&conn);
    for item in [
        TodoItem::new("yesterday").scheduled(at(2024, 6, 14, 23, 59)),
        TodoItem::new("midnight").scheduled(at(2024, 6, 15, 0, 0)),
        TodoItem::new("tonight").scheduled(at(2024, 6, 15, 23, 59)),
        TodoItem::new("tomorrow").scheduled(at(2024, 6, 16, 0, 0)),
        TodoItem::new("someday"),
    ] {
        repo.create_item(&item).unwrap();
    }

    let sections = sections(&plan(&conn));
    assert_eq!(names(&sections.missed), vec!["yesterday"]);
    assert_eq!(names(&sections.today), vec!["midnight", "tonight"]);
    assert_eq!(names(&sections.later), vec!["someday", "tomorrow"]);
    assert_eq!(
        sections.summary(),
        PlanSummary {
            total_missed: 1,
            total_today: 2,
            total_later: 2
        }
    );
    assert_eq!(sections.summary().badge_count(), 3);
}

#[test]
fn done_is_refused_until_blocker_is_done() {
    let conn = open_db_in_memory().unwrap();
    let repo = todos(&conn);
    let a = TodoItem::new("a").scheduled(now());
    let b = TodoItem::new("b").scheduled(now());
    repo.create_item(&a).unwrap();
    repo.create_item(&b).unwrap();
    repo.set_blocked_by(a.id, &[b.id]).unwrap();

    let service = plan(&conn);
    assert!(matches!(service.done(a.id), Err(ServiceError::ItemBlocked(id)) if id == a.id));
    assert!(!service
        .available_actions(a.id)
        .unwrap()
        .contains(&PlanItemAction::Done));

    service.done(b.id).unwrap();

    assert!(service
        .available_actions(a.id)
        .unwrap()
        .contains(&PlanItemAction::Done));
    assert!(service.done(a.id).unwrap().done);
}

#[test]
fn done_on_repeating_blocker_releases_dependents() {
    let conn = open_db_in_memory().unwrap();
    let repo = todos(&conn);
    let report = TodoItem::new("report").scheduled(now());
    let standup = TodoItem::new("standup")
        .scheduled(at(2024, 6, 15, 9, 0))
        .repeating(RepeatState::Daily);
    repo.create_item(&report).unwrap();
    repo.create_item(&standup).unwrap();
    repo.set_blocked_by(report.id, &[standup.id]).unwrap();

    let service = plan(&conn);
    let advanced = service.done(standup.id).unwrap();
    assert!(!advanced.done);
    assert_eq!(advanced.date, Some(at(2024, 6, 16, 9, 0)));

    assert!(repo.load_blocking_graph().unwrap().is_actionable(report.id));
    assert!(service
        .available_actions(report.id)
        .unwrap()
        .contains(&PlanItemAction::Done));
}

#[test]
fn done_advances_stale_repeating_item_past_now() {
    let conn = open_db_in_memory().unwrap();
    let item = TodoItem::new("rent")
        .scheduled(at(2016, 1, 7, 10, 0))
        .repeating(RepeatState::Monthly);
    todos(&conn).create_item(&item).unwrap();

    let done = plan(&conn).done(item.id).unwrap();

    assert!(!done.done);
    assert_eq!(done.date, Some(at(2024, 7, 7, 10, 0)));
    let stored = todos(&conn).get_item(item.id).unwrap().unwrap();
    assert_eq!(stored.date, Some(at(2024, 7, 7, 10, 0)));
}

#[test]
fn later_clears_one_off_date_and_advances_repeating() {
    let conn = open_db_in_memory().unwrap();
    let repo = todos(&conn);
    let one_off = TodoItem::new("call mom").scheduled(at(2024, 6, 15, 9, 0));
    let daily = TodoItem::new("stretch")
        .scheduled(at(2024, 6, 15, 7, 0))
        .repeating(RepeatState::Daily);
    repo.create_item(&one_off).unwrap();
    repo.create_item(&daily).unwrap();

    let service = plan(&conn);
    assert_eq!(service.later(one_off.id).unwrap().date, None);
    assert_eq!(
        service.later(daily.id).unwrap().date,
        Some(at(2024, 6, 16, 7, 0))
    );

    let sections = sections(&service);
    assert!(sections.today.is_empty());
    assert_eq!(names(&sections.later), vec!["call mom", "stretch"]);
}

#[test]
fn split_leaves_one_off_copy_and_advances_original() {
    let conn = open_db_in_memory().unwrap();
    let repo = todos(&conn);
    let blocker = TodoItem::new("buy paint");
    let original = TodoItem::new("paint fence")
        .scheduled(at(2024, 6, 10, 9, 0))
        .repeating(RepeatState::Weekly);
    repo.create_item(&blocker).unwrap();
    repo.create_item(&original).unwrap();
    repo.set_blocked_by(original.id, &[blocker.id]).unwrap();

    let service = plan(&conn);
    let copy = service.split(original.id).unwrap();

    assert_ne!(copy.id, original.id);
    assert_eq!(copy.repeat_state, RepeatState::None);
    assert_eq!(copy.date, Some(at(2024, 6, 10, 9, 0)));

    let advanced = repo.get_item(original.id).unwrap().unwrap();
    assert_eq!(advanced.date, Some(at(2024, 6, 17, 9, 0)));
    assert_eq!(advanced.repeat_state, RepeatState::Weekly);

    let graph = repo.load_blocking_graph().unwrap();
    assert!(graph.is_actionable(original.id));
    assert_eq!(graph.blocked_by(copy.id).collect::<Vec<_>>(), vec![blocker.id]);
}

#[test]
fn split_requires_repeating_item() {
    let conn = open_db_in_memory().unwrap();
    let item = TodoItem::new("once").scheduled(now());
    todos(&conn).create_item(&item).unwrap();

    let err = plan(&conn).split(item.id).unwrap_err();
    assert!(matches!(err, ServiceError::NotRepeating(id) if id == item.id));
}

#[test]
fn make_all_today_and_tomorrow_move_only_missed_items() {
    let conn = open_db_in_memory().unwrap();
    let repo = todos(&conn);
    for item in [
        TodoItem::new("old one").scheduled(at(2024, 6, 1, 9, 0)),
        TodoItem::new("old two").scheduled(at(2024, 6, 14, 9, 0)),
        TodoItem::new("current").scheduled(at(2024, 6, 15, 9, 0)),
        TodoItem::new("unscheduled"),
    ] {
        repo.create_item(&item).unwrap();
    }

    let service = plan(&conn);
    assert_eq!(service.make_all_tomorrow().unwrap(), 2);
    let moved = sections(&service);
    assert!(moved.missed.is_empty());
    assert_eq!(moved.later.len(), 3);

    assert_eq!(service.make_all_today().unwrap(), 0);
}

#[test]
fn make_today_and_tomorrow_reschedule_single_item() {
    let conn = open_db_in_memory().unwrap();
    let item = TodoItem::new("dentist");
    todos(&conn).create_item(&item).unwrap();

    let service = plan(&conn);
    assert_eq!(service.make_today(item.id).unwrap().date, Some(now()));
    assert_eq!(
        service.make_tomorrow(item.id).unwrap().date,
        Some(now() + Duration::hours(24))
    );
}

#[test]
fn today_orders_by_project_priority_then_blocking_then_name() {
    let conn = open_db_in_memory().unwrap();
    let projects = ProjectService::new(SqliteProjectRepository::try_new(&conn).unwrap());
    let work = projects.add_project("work").unwrap();
    let home = projects.add_project("home").unwrap();
    projects.prioritize(home.id).unwrap();
    projects.prioritize(work.id).unwrap();

    let repo = todos(&conn);
    let plain = TodoItem::new("aaa plain").scheduled(now());
    let home_item = TodoItem::new("zzz home").scheduled(now()).in_project(home.id);
    let work_blocked = TodoItem::new("bbb work").scheduled(now()).in_project(work.id);
    let work_free = TodoItem::new("ccc work").scheduled(now()).in_project(work.id);
    for item in [&plain, &home_item, &work_blocked, &work_free] {
        repo.create_item(item).unwrap();
    }
    repo.set_blocked_by(work_blocked.id, &[plain.id]).unwrap();

    let today = sections(&plan(&conn)).today;
    assert_eq!(
        names(&today),
        vec!["zzz home", "ccc work", "bbb work", "aaa plain"]
    );
}

#[test]
fn holiday_mode_hides_the_plan() {
    let conn = open_db_in_memory().unwrap();
    todos(&conn)
        .create_item(&TodoItem::new("late").scheduled(at(2024, 6, 1, 9, 0)))
        .unwrap();
    HolidayService::new(SqliteSettingsRepository::try_new(&conn).unwrap())
        .set_enabled(true)
        .unwrap();

    let service = plan(&conn);
    assert_eq!(service.load().unwrap(), PlanOutcome::Holiday);
    assert_eq!(service.summary().unwrap(), PlanSummary::default());
    assert_eq!(service.sections().unwrap().missed.len(), 1);
}

#[test]
fn delete_removes_item_and_reports_missing() {
    let conn = open_db_in_memory().unwrap();
    let item = TodoItem::new("spam");
    todos(&conn).create_item(&item).unwrap();

    let service = plan(&conn);
    service.delete(item.id).unwrap();
    assert!(matches!(
        service.delete(item.id),
        Err(ServiceError::ItemNotFound(id)) if id == item.id
    ));
    assert!(matches!(
        service.available_actions(item.id),
        Err(ServiceError::ItemNotFound(_))
    ));
}

#[test]
fn archived_items_offer_no_actions() {
    let conn = open_db_in_memory().unwrap();
    let mut item = TodoItem::new("filed");
    item.done = true;
    todos(&conn).create_item(&item).unwrap();

    assert!(plan(&conn).available_actions(item.id).unwrap().is_empty());
}

#[test]
fn deleting_a_project_keeps_plan_loadable() {
    let conn = open_db_in_memory().unwrap();
    let project = Project::new("temp");
    SqliteProjectRepository::try_new(&conn)
        .unwrap()
        .create_project(&project)
        .unwrap();
    todos(&conn)
        .create_item(&TodoItem::new("orphan").scheduled(now()).in_project(project.id))
        .unwrap();
    SqliteProjectRepository::try_new(&conn)
        .unwrap()
        .delete_project(project.id)
        .unwrap();

    let today = sections(&plan(&conn)).today;
    assert_eq!(today[0].project, None);
}

use lazyplan_core::plan::priority::PriorityError;
use lazyplan_core::{
    open_db_in_memory, Project, ProjectService, ServiceError, SqliteProjectRepository,
    MAX_PRIORITY_ITEMS,
};
use rusqlite::Connection;

fn service(conn: &Connection) -> ProjectService<SqliteProjectRepository<'_>> {
    ProjectService::new(SqliteProjectRepository::try_new(conn).unwrap())
}

fn ranked(service: &ProjectService<SqliteProjectRepository<'_>>, names: &[&str]) -> Vec<Project> {
    names
        .iter()
        .map(|name| {
            let project = service.add_project(*name).unwrap();
            service.prioritize(project.id).unwrap()
        })
        .collect()
}

fn prioritized_names(service: &ProjectService<SqliteProjectRepository<'_>>) -> Vec<String> {
    service
        .fetch_prioritized()
        .unwrap()
        .into_iter()
        .map(|project| project.name.unwrap_or_default())
        .collect()
}

#[test]
fn new_projects_start_unprioritized_and_list_by_name() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    service.add_project("Zoo").unwrap();
    service.add_project("attic").unwrap();

    assert!(service.fetch_prioritized().unwrap().is_empty());
    let other = service
        .fetch_other()
        .unwrap()
        .into_iter()
        .map(|project| project.name.unwrap_or_default())
        .collect::<Vec<_>>();
    assert_eq!(other, vec!["attic", "Zoo"]);
}

#[test]
fn prioritize_assigns_ascending_slots_up_to_the_limit() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let projects = ranked(&service, &["a", "b", "c", "d", "e"]);
    assert_eq!(
        projects.iter().map(|p| p.priority).collect::<Vec<_>>(),
        vec![0, 1, 2, 3, 4]
    );

    let extra = service.add_project("f").unwrap();
    let err = service.prioritize(extra.id).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Priority(PriorityError::LimitReached { max }) if max == MAX_PRIORITY_ITEMS
    ));
}

#[test]
fn deprioritize_middle_leaves_other_ranks_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let projects = ranked(&service, &["zero", "one", "two"]);

    let demoted = service.deprioritize(projects[1].id).unwrap();
    assert_eq!(demoted.priority, Project::DEFAULT_PRIORITY);

    let ranks = service
        .fetch_prioritized()
        .unwrap()
        .into_iter()
        .map(|project| (project.name.unwrap_or_default(), project.priority))
        .collect::<Vec<_>>();
    assert_eq!(ranks, vec![("zero".to_string(), 0), ("two".to_string(), 2)]);

    // The freed slot is reused first.
    let again = service.prioritize(projects[1].id).unwrap();
    assert_eq!(again.priority, 1);
}

#[test]
fn prioritise_above_and_below_reorder_list() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let projects = ranked(&service, &["a", "b", "c", "d"]);

    service
        .prioritise_above(projects[3].id, projects[1].id)
        .unwrap();
    assert_eq!(prioritized_names(&service), vec!["a", "d", "b", "c"]);

    service
        .prioritise_below(projects[0].id, projects[2].id)
        .unwrap();
    assert_eq!(prioritized_names(&service), vec!["d", "b", "c", "a"]);

    let ranks = service
        .fetch_prioritized()
        .unwrap()
        .into_iter()
        .map(|project| project.priority)
        .collect::<Vec<_>>();
    assert_eq!(ranks, vec![0, 1, 2, 3]);
}

#[test]
fn reordering_requires_prioritized_projects() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let ranked = ranked(&service, &["a"]);
    let loose = service.add_project("loose").unwrap();

    let err = service.prioritise_above(loose.id, ranked[0].id).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Priority(PriorityError::NotPrioritized(id)) if id == loose.id
    ));
}

#[test]
fn rename_and_delete_report_missing_projects() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let project = service.add_project("draft").unwrap();

    service.rename(project.id, "  final  ").unwrap();
    assert_eq!(service.get(project.id).unwrap().name.as_deref(), Some("final"));
    service.rename(project.id, "   ").unwrap();
    assert_eq!(service.get(project.id).unwrap().name, None);

    service.delete(project.id).unwrap();
    assert!(matches!(
        service.delete(project.id),
        Err(ServiceError::ProjectNotFound(id)) if id == project.id
    ));
    assert!(matches!(
        service.rename(project.id, "x"),
        Err(ServiceError::ProjectNotFound(_))
    ));
}

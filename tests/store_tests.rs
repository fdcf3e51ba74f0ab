/// Store tests over an in-memory SQLite connection: uniqueness constraints,
/// idempotent saves and the existence pre-check the orchestrator relies on.
use rust_job_scraper::db;
use rust_job_scraper::models::Job;
use rusqlite::Connection;

fn test_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::create_tables(&conn).unwrap();
    conn
}

fn job(url: &str, org_id: i64) -> Job {
    Job {
        id: 0,
        position_name: "Software Engineer".to_string(),
        job_page_url: url.to_string(),
        logo_url: "https://cdn.example.com/logo.png".to_string(),
        labor_function: "Software Engineering".to_string(),
        posted_date: 1_705_000_000,
        description: "Build things.".to_string(),
        location: "Denver, CO, USA".to_string(),
        organization_id: org_id,
        tags: Vec::new(),
    }
}

#[test]
fn test_save_organization_is_idempotent() {
    let conn = test_conn();

    let first = db::save_organization(&conn, "Acme", "https://jobs.techstars.com/companies/acme")
        .unwrap();
    let second =
        db::save_organization(&conn, "Acme Renamed", "https://jobs.techstars.com/companies/acme")
            .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.title, "Acme");
    assert_eq!(db::get_organization_count(&conn).unwrap(), 1);
}

#[test]
fn test_save_tag_is_idempotent_and_case_sensitive() {
    let conn = test_conn();

    let first = db::save_tag(&conn, "Remote").unwrap();
    let again = db::save_tag(&conn, "Remote").unwrap();
    let lower = db::save_tag(&conn, "remote").unwrap();

    assert_eq!(first.id, again.id);
    assert_ne!(first.id, lower.id);
    assert_eq!(db::get_tag_count(&conn).unwrap(), 2);
}

#[test]
fn test_find_returns_none_for_unknown_keys() {
    let conn = test_conn();

    assert!(db::find_organization_by_url(&conn, "https://nowhere.example")
        .unwrap()
        .is_none());
    assert!(db::find_tag_by_name(&conn, "Nope").unwrap().is_none());
    assert!(!db::exists_by_job_page_url(&conn, "https://nowhere.example/jobs/1").unwrap());
}

#[test]
fn test_save_job_links_tags_and_sets_existence() {
    let mut conn = test_conn();

    let org = db::save_organization(&conn, "Acme", "https://jobs.techstars.com/companies/acme")
        .unwrap();
    let remote = db::save_tag(&conn, "Remote").unwrap();
    let full_time = db::save_tag(&conn, "Full time").unwrap();

    let mut new_job = job("https://jobs.techstars.com/companies/acme/jobs/42", org.id);
    new_job.tags = vec![remote.clone(), full_time.clone()];

    let saved = db::save_job(&mut conn, &new_job).unwrap();
    assert!(saved.id > 0);
    assert!(db::exists_by_job_page_url(
        &conn,
        "https://jobs.techstars.com/companies/acme/jobs/42"
    )
    .unwrap());

    let linked: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM job_tags WHERE job_id = ?1",
            [saved.id],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(linked, 2);
}

#[test]
fn test_save_job_never_overwrites_existing_row() {
    let mut conn = test_conn();

    let org = db::save_organization(&conn, "Acme", "https://jobs.techstars.com/companies/acme")
        .unwrap();
    let url = "https://jobs.techstars.com/companies/acme/jobs/42";

    let first = db::save_job(&mut conn, &job(url, org.id)).unwrap();

    let mut changed = job(url, org.id);
    changed.position_name = "Renamed Position".to_string();
    let second = db::save_job(&mut conn, &changed).unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(db::get_job_count(&conn).unwrap(), 1);

    let stored_name: String = conn
        .query_row(
            "SELECT position_name FROM jobs WHERE id = ?1",
            [first.id],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(stored_name, "Software Engineer");
}

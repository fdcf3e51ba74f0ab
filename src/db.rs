use crate::models::{Job, Organization, Tag};
use log::error;
use rusqlite::{params, Connection, OptionalExtension, Result};

pub fn init_db(path: &str) -> Result<Connection> {
    let conn = Connection::open(path)?;
    Ok(conn)
}

/// Uniqueness of job page URLs, organization URLs and tag names is enforced
/// here rather than in the resolver: UNIQUE constraints plus idempotent
/// INSERT OR IGNORE keep concurrent runs from creating duplicate rows.
pub fn create_tables(conn: &Connection) -> Result<()> {
    log::info!("Creating tables if not exists...");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS organizations (\n            id INTEGER PRIMARY KEY AUTOINCREMENT,\n            title TEXT NOT NULL,\n            url TEXT NOT NULL UNIQUE\n        );",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS tags (\n            id INTEGER PRIMARY KEY AUTOINCREMENT,\n            name TEXT NOT NULL UNIQUE\n        );",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS jobs (\n            id INTEGER PRIMARY KEY AUTOINCREMENT,\n            position_name TEXT NOT NULL,\n            job_page_url TEXT NOT NULL UNIQUE,\n            logo_url TEXT NOT NULL,\n            labor_function TEXT NOT NULL,\n            posted_date INTEGER NOT NULL DEFAULT 0,\n            description TEXT NOT NULL DEFAULT '',\n            location TEXT NOT NULL DEFAULT '',\n            organization_id INTEGER NOT NULL,\n            FOREIGN KEY (organization_id) REFERENCES organizations (id)\n        );",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS job_tags (\n            job_id INTEGER NOT NULL,\n            tag_id INTEGER NOT NULL,\n            UNIQUE(job_id, tag_id),\n            FOREIGN KEY (job_id) REFERENCES jobs (id),\n            FOREIGN KEY (tag_id) REFERENCES tags (id)\n        );",
        [],
    )?;

    // Helpful indexes
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_jobs_org ON jobs(organization_id);",
        [],
    )?;

    log::info!("Tables ensured.");
    Ok(())
}

pub fn exists_by_job_page_url(conn: &Connection, url: &str) -> Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM jobs WHERE job_page_url = ?1)",
        [url],
        |row| row.get(0),
    )
}

pub fn find_organization_by_url(conn: &Connection, url: &str) -> Result<Option<Organization>> {
    conn.query_row(
        "SELECT id, title, url FROM organizations WHERE url = ?1",
        [url],
        |row| {
            Ok(Organization {
                id: row.get(0)?,
                title: row.get(1)?,
                url: row.get(2)?,
            })
        },
    )
    .optional()
}

/// Idempotent insert: on a URL collision the existing row wins and is
/// returned unchanged.
pub fn save_organization(conn: &Connection, title: &str, url: &str) -> Result<Organization> {
    conn.execute(
        "INSERT OR IGNORE INTO organizations (title, url) VALUES (?1, ?2)",
        params![title, url],
    )?;
    conn.query_row(
        "SELECT id, title, url FROM organizations WHERE url = ?1",
        [url],
        |row| {
            Ok(Organization {
                id: row.get(0)?,
                title: row.get(1)?,
                url: row.get(2)?,
            })
        },
    )
}

pub fn find_tag_by_name(conn: &Connection, name: &str) -> Result<Option<Tag>> {
    conn.query_row("SELECT id, name FROM tags WHERE name = ?1", [name], |row| {
        Ok(Tag {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    })
    .optional()
}

pub fn save_tag(conn: &Connection, name: &str) -> Result<Tag> {
    conn.execute("INSERT OR IGNORE INTO tags (name) VALUES (?1)", [name])?;
    conn.query_row("SELECT id, name FROM tags WHERE name = ?1", [name], |row| {
        Ok(Tag {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    })
}

/// Save a job and its tag links in one transaction. The job row is never
/// overwritten: a URL collision leaves the stored row as it was.
pub fn save_job(conn: &mut Connection, job: &Job) -> Result<Job> {
    let tx = conn.transaction()?;

    if let Err(e) = tx.execute(
        "INSERT OR IGNORE INTO jobs (position_name, job_page_url, logo_url, labor_function, posted_date, description, location, organization_id)\n         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            job.position_name,
            job.job_page_url,
            job.logo_url,
            job.labor_function,
            job.posted_date,
            job.description,
            job.location,
            job.organization_id
        ],
    ) {
        error!("Failed to insert job: {}", e);
        return Err(e);
    }

    let id: i64 = tx.query_row(
        "SELECT id FROM jobs WHERE job_page_url = ?1",
        [&job.job_page_url],
        |row| row.get(0),
    )?;

    {
        let mut stmt =
            tx.prepare("INSERT OR IGNORE INTO job_tags (job_id, tag_id) VALUES (?1, ?2)")?;
        for tag in &job.tags {
            stmt.execute(params![id, tag.id])?;
        }
    }

    tx.commit()?;

    Ok(Job {
        id,
        position_name: job.position_name.clone(),
        job_page_url: job.job_page_url.clone(),
        logo_url: job.logo_url.clone(),
        labor_function: job.labor_function.clone(),
        posted_date: job.posted_date,
        description: job.description.clone(),
        location: job.location.clone(),
        organization_id: job.organization_id,
        tags: job.tags.clone(),
    })
}

pub fn get_job_count(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM jobs", [], |row| row.get(0))
}

pub fn get_organization_count(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM organizations", [], |row| row.get(0))
}

pub fn get_tag_count(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM tags", [], |row| row.get(0))
}

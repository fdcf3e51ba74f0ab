//! Get-or-create resolution of organizations and tags.
//!
//! The lookup is only a fast path: creation goes through the store's
//! idempotent inserts, so a lookup that races another run still converges on
//! the single stored row.

use crate::db;
use crate::models::{Organization, Tag};
use rusqlite::{Connection, Result};

/// Resolve an organization by URL, creating it with the given title on first
/// encounter. The stored title is never updated afterwards.
pub fn resolve_organization(conn: &Connection, url: &str, title: &str) -> Result<Organization> {
    if let Some(existing) = db::find_organization_by_url(conn, url)? {
        return Ok(existing);
    }
    db::save_organization(conn, title, url)
}

/// Resolve tag names to stored tags, creating missing ones. Names are
/// expected trimmed and non-empty; matching is exact and case-sensitive.
pub fn resolve_tags(conn: &Connection, names: &[String]) -> Result<Vec<Tag>> {
    let mut tags = Vec::with_capacity(names.len());
    for name in names {
        let tag = match db::find_tag_by_name(conn, name)? {
            Some(existing) => existing,
            None => db::save_tag(conn, name)?,
        };
        tags.push(tag);
    }
    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        db::create_tables(&conn).unwrap();
        conn
    }

    #[test]
    fn test_resolve_organization_creates_then_reuses() {
        let conn = test_conn();

        let first = resolve_organization(&conn, "https://jobs.techstars.com/companies/acme", "Acme")
            .unwrap();
        let second =
            resolve_organization(&conn, "https://jobs.techstars.com/companies/acme", "Acme Inc")
                .unwrap();

        assert_eq!(first.id, second.id);
        // First writer wins; the title is not rewritten on later encounters.
        assert_eq!(second.title, "Acme");
        assert_eq!(db::get_organization_count(&conn).unwrap(), 1);
    }

    #[test]
    fn test_resolve_tags_is_case_sensitive() {
        let conn = test_conn();

        let lower = resolve_tags(&conn, &["remote".to_string()]).unwrap();
        let upper = resolve_tags(&conn, &["Remote".to_string()]).unwrap();

        assert_ne!(lower[0].id, upper[0].id);
        assert_eq!(db::get_tag_count(&conn).unwrap(), 2);
    }

    #[test]
    fn test_resolve_tags_reuses_existing() {
        let conn = test_conn();

        let names = vec!["Remote".to_string(), "Full time".to_string()];
        let first = resolve_tags(&conn, &names).unwrap();
        let second = resolve_tags(&conn, &names).unwrap();

        assert_eq!(first, second);
        assert_eq!(db::get_tag_count(&conn).unwrap(), 2);
    }
}

//! Database schema definitions
//!
//! Two tables: `job_links` keyed by `(site, id)` so the same site-local
//! identifier may appear under different sites, and `job_details` keyed
//! by `id` alone. The details table's reference to `job_links.id` is a
//! logical foreign key only; the store does not enforce it.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Lightweight pointers collected from listing pages
CREATE TABLE IF NOT EXISTS job_links (
    id TEXT NOT NULL,
    title TEXT NOT NULL,
    link TEXT NOT NULL,
    site TEXT NOT NULL,
    PRIMARY KEY (site, id)
);

CREATE INDEX IF NOT EXISTS idx_job_links_site ON job_links(site);

-- Full extracted postings, id referencing job_links.id
CREATE TABLE IF NOT EXISTS job_details (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    company TEXT NOT NULL,
    location TEXT,
    salary_information TEXT,
    description TEXT NOT NULL,
    access_date TEXT NOT NULL
);
"#;

/// Initializes the database schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_schema_initializes() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(initialize_schema(&conn).is_ok());
    }

    #[test]
    fn test_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        assert!(initialize_schema(&conn).is_ok());
    }

    #[test]
    fn test_tables_exist_after_init() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();

        for table in ["job_links", "job_details"] {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                    [table],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(count, 1, "Table {} should exist", table);
        }
    }
}

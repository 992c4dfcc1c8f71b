//! SQLite implementation of the link and detail stores

use crate::models::{JobDetails, JobLink, Site};
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{DetailStore, LinkStore, StorageError, StorageResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// SQLite storage backend for both record types
///
/// One connection serves links and details; writes are serialized by the
/// connection itself, so callers only manage acquire-and-release.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }
}

impl LinkStore for SqliteStore {
    fn save_links(&mut self, batch: &[JobLink]) -> StorageResult<usize> {
        tracing::info!("Saving {} job links", batch.len());

        let tx = self.conn.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT OR IGNORE INTO job_links (id, title, link, site) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for link in batch {
                inserted += stmt.execute(params![
                    link.id,
                    link.title,
                    link.link,
                    link.site.as_str()
                ])?;
            }
        }
        tx.commit()?;

        tracing::info!(
            "Saved {} new job links ({} duplicates absorbed)",
            inserted,
            batch.len() - inserted
        );
        Ok(inserted)
    }

    fn get_batch(&self, site: Site, limit: usize, offset: usize) -> StorageResult<Vec<JobLink>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, title, link, site FROM job_links
             WHERE site = ?1 ORDER BY rowid LIMIT ?2 OFFSET ?3",
        )?;

        let rows = stmt.query_map(
            params![site.as_str(), limit as i64, offset as i64],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            },
        )?;

        let mut links = Vec::new();
        for row in rows {
            let (id, title, link, site_key) = row?;
            let site = Site::from_str_key(&site_key).ok_or_else(|| {
                StorageError::CorruptRow(format!("unknown site {:?} for link {}", site_key, id))
            })?;
            links.push(JobLink {
                id,
                title,
                link,
                site,
            });
        }
        Ok(links)
    }

    fn count(&self, site: Site) -> StorageResult<usize> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM job_links WHERE site = ?1",
            params![site.as_str()],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}

impl DetailStore for SqliteStore {
    fn save_details(&mut self, batch: &[JobDetails]) -> StorageResult<usize> {
        tracing::info!("Saving {} job details", batch.len());

        let tx = self.conn.transaction()?;
        let mut saved = 0;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO job_details
                 (id, title, company, location, salary_information, description, access_date)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 ON CONFLICT(id) DO UPDATE SET
                 title = excluded.title,
                 company = excluded.company,
                 location = excluded.location,
                 salary_information = excluded.salary_information,
                 description = excluded.description,
                 access_date = excluded.access_date",
            )?;
            for details in batch {
                saved += stmt.execute(params![
                    details.id,
                    details.title,
                    details.company,
                    details.location,
                    details.salary_information,
                    details.description,
                    details.access_date,
                ])?;
            }
        }
        tx.commit()?;

        tracing::info!("Saved {} job details", saved);
        Ok(saved)
    }

    fn get_details(&self, id: &str) -> StorageResult<Option<JobDetails>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, title, company, location, salary_information, description, access_date
             FROM job_details WHERE id = ?1",
        )?;

        let details = stmt
            .query_row(params![id], |row| {
                Ok(JobDetails {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    company: row.get(2)?,
                    location: row.get(3)?,
                    salary_information: row.get(4)?,
                    description: row.get(5)?,
                    access_date: row.get(6)?,
                })
            })
            .optional()?;

        Ok(details)
    }

    fn count_details(&self, site: Site) -> StorageResult<usize> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM job_details d
             JOIN job_links l ON l.id = d.id
             WHERE l.site = ?1",
            params![site.as_str()],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}

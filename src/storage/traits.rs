//! Storage traits and error types

use crate::models::{JobDetails, JobLink, Site};
use thiserror::Error;

/// Errors that can occur during storage operations
///
/// Expected duplicate keys on link insertion are absorbed by the store
/// and never surface here; anything that does surface is fatal to the
/// current command.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt row: {0}")]
    CorruptRow(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Durable keyed collection of job links, partitioned by site
pub trait LinkStore {
    /// Insert-if-absent for a whole batch, keyed by `(site, id)`
    ///
    /// Duplicates are expected (re-crawling overlapping pages) and are
    /// silently absorbed. Returns the number of genuinely new rows.
    fn save_links(&mut self, batch: &[JobLink]) -> StorageResult<usize>;

    /// Stable-ordered page of links for a site
    ///
    /// Repeated calls with increasing offsets over an unchanged table
    /// partition the site's rows with no repeats and no omissions.
    fn get_batch(&self, site: Site, limit: usize, offset: usize) -> StorageResult<Vec<JobLink>>;

    /// Total links stored for a site; bounds the offset walk
    fn count(&self, site: Site) -> StorageResult<usize>;
}

/// Durable keyed collection of job details, keyed by link id
pub trait DetailStore {
    /// Upserts a whole batch: insert if absent, else overwrite every
    /// non-key field. Idempotent; last write wins.
    fn save_details(&mut self, batch: &[JobDetails]) -> StorageResult<usize>;

    /// Reads back one record, if present
    fn get_details(&self, id: &str) -> StorageResult<Option<JobDetails>>;

    /// Details stored for links of a site (join through job_links)
    fn count_details(&self, site: Site) -> StorageResult<usize>;
}

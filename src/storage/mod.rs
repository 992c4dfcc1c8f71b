//! Storage module for persisting harvested records
//!
//! Links are write-once per `(site, id)`; details are write-many per id
//! with last-write-wins. Each saved batch commits independently, so a
//! later failure leaves earlier batches intact.

mod schema;
mod sqlite;
mod traits;

pub use schema::initialize_schema;
pub use sqlite::SqliteStore;
pub use traits::{DetailStore, LinkStore, StorageError, StorageResult};

use std::path::Path;

/// Initializes or opens the storage database
pub fn open_storage(path: &Path) -> StorageResult<SqliteStore> {
    SqliteStore::new(path)
}

use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure for jobharvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub persistence: PersistenceConfig,

    /// Default log filter when no verbosity flag is given
    #[serde(rename = "log-level", default)]
    pub log_level: Option<String>,
}

/// Persistence backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PersistenceConfig {
    pub sqlite: SqliteConfig,
}

/// SQLite-specific configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SqliteConfig {
    /// Path to the SQLite database file
    #[serde(rename = "db-file-location")]
    pub db_file_location: PathBuf,
}

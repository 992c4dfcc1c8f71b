//! Jobharvest: a two-phase job posting collector
//!
//! This crate crawls the listing pages of known job sites for lightweight
//! job links, and later revisits each stored link to extract the full
//! posting details. Both phases run against a shared page-access handle
//! and persist into a SQLite store.

pub mod config;
pub mod crawler;
pub mod models;
pub mod page;
pub mod registry;
pub mod scraper;
pub mod storage;

use thiserror::Error;

/// Main error type for jobharvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Page access error: {0}")]
    Page(#[from] page::PageError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Invalid crawl bounds: batch_size={batch_size}, max_items={max_items} (both must be positive)")]
    InvalidCrawlBounds { batch_size: usize, max_items: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HarvestError {
    /// True for failures the detail engine may skip-and-log instead of
    /// aborting the batch (timeouts, temporary navigation failures).
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Page(e) if e.is_transient())
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for jobharvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use models::{JobDetails, JobLink, Site};
pub use page::{Locator, PageElement, PageSession};

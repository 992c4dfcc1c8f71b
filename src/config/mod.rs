//! Configuration module for jobharvest
//!
//! Loads and validates the TOML configuration file: where the SQLite
//! database lives and, optionally, the default log level.

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{Config, PersistenceConfig, SqliteConfig};

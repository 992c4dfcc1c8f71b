use crate::config::types::Config;
use crate::ConfigError;

const KNOWN_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.persistence.sqlite.db_file_location.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "db-file-location must not be empty".to_string(),
        ));
    }

    if let Some(level) = &config.log_level {
        if !KNOWN_LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "log-level must be one of {:?}, got {:?}",
                KNOWN_LOG_LEVELS, level
            )));
        }
    }

    Ok(())
}

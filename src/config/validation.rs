//! Semantic validation of parsed configuration
//!
//! TOML parsing catches shape errors; this module catches values that parse
//! fine but make no sense (empty ranges, templates with no placeholder).

use crate::config::types::Config;
use crate::crawler::seeds::COUNT_PLACEHOLDER;
use crate::ConfigError;

/// Validates a parsed configuration
///
/// # Arguments
///
/// * `config` - The configuration to validate
///
/// # Returns
///
/// * `Ok(())` - Configuration is valid
/// * `Err(ConfigError::Validation)` - A value is out of range or inconsistent
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.application.start >= config.application.stop {
        return Err(ConfigError::Validation(format!(
            "application.start ({}) must be less than application.stop ({})",
            config.application.start, config.application.stop
        )));
    }

    if !config.application.template.contains(COUNT_PLACEHOLDER) {
        return Err(ConfigError::Validation(format!(
            "application.template must contain the {} placeholder",
            COUNT_PLACEHOLDER
        )));
    }

    if config.application.endpoint.is_empty() {
        return Err(ConfigError::Validation(
            "application.endpoint must not be empty".to_string(),
        ));
    }

    if config.store.path.is_empty() {
        return Err(ConfigError::Validation(
            "store.path must not be empty".to_string(),
        ));
    }

    if config.fetch.max_retries == 0 {
        return Err(ConfigError::Validation(
            "fetch.max-retries must be at least 1".to_string(),
        ));
    }

    Ok(())
}

use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use wikiharvest::config::load_config;
///
/// let config = load_config(Path::new("config.toml")).unwrap();
/// println!("Seed range: {}..{}", config.application.start, config.application.stop);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    // Read the configuration file
    let content = std::fs::read_to_string(path)?;

    // Parse TOML
    let config: Config = toml::from_str(&content)?;

    // Validate the configuration
    validate(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[application]
template = "List of lists {count}"
start = 0
stop = 5

[store]
path = "./test.db"

[fetch]
max-retries = 3
retry-delay-ms = 100
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.application.template, "List of lists {count}");
        assert_eq!(config.application.start, 0);
        assert_eq!(config.application.stop, 5);
        assert_eq!(config.store.path, "./test.db");
        assert_eq!(config.fetch.max_retries, 3);
        assert_eq!(config.fetch.retry_delay_ms, 100);
    }

    #[test]
    fn test_fetch_section_defaults() {
        let config_content = r#"
[application]
template = "Page {count}"
start = 1
stop = 2

[store]
path = "./test.db"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.fetch.max_retries, 5);
        assert_eq!(config.fetch.retry_delay_ms, 500);
        assert_eq!(
            config.application.endpoint,
            "https://en.wikipedia.org/w/api.php"
        );
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let config_content = "this is not valid TOML {{{";
        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[application]
template = "Page {count}"
start = 5
stop = 5

[store]
path = "./test.db"
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}

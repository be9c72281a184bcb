//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::InertiaConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parse and validate configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<InertiaConfig, ConfigError> {
    let config: InertiaConfig = toml::from_str(content).map_err(ConfigError::Parse)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<InertiaConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = parse_config(
            r#"
            [inertia]
            version = "2024-06-01"

            [ssr]
            enabled = true
            "#,
        )
        .unwrap();

        assert_eq!(config.inertia.version.as_deref(), Some("2024-06-01"));
        assert_eq!(config.inertia.container_id, "app");
        assert!(config.ssr.enabled);
        assert_eq!(config.ssr.url, "http://127.0.0.1:13714");
    }

    #[test]
    fn test_syntax_error() {
        assert!(matches!(parse_config("[inertia"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validation_error_display() {
        let err = parse_config(
            r#"
            [server]
            request_timeout_secs = 0
            "#,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: server.request_timeout_secs: must be > 0"
        );
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_config(Path::new("/no/such/inertia.toml")),
            Err(ConfigError::Io(_))
        ));
    }
}

//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Detect conflicting version sources
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: InertiaConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::InertiaConfig;

/// A single semantic problem in the config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Check a parsed config for semantic errors.
pub fn validate_config(config: &InertiaConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "server.bind_address",
            format!("{:?} is not a socket address", config.server.bind_address),
        ));
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::new("server.request_timeout_secs", "must be > 0"));
    }

    let inertia = &config.inertia;
    if inertia.root_template.trim().is_empty() {
        errors.push(ValidationError::new("inertia.root_template", "must not be empty"));
    }
    if !is_valid_element_id(&inertia.container_id) {
        errors.push(ValidationError::new(
            "inertia.container_id",
            format!("{:?} is not a valid element id", inertia.container_id),
        ));
    }
    if inertia.version.is_some() && inertia.version_file.is_some() {
        errors.push(ValidationError::new(
            "inertia.version",
            "set either version or version_file, not both",
        ));
    }

    if config.ssr.enabled {
        if url::Url::parse(&config.ssr.url).is_err() {
            errors.push(ValidationError::new(
                "ssr.url",
                format!("{:?} is not a valid URL", config.ssr.url),
            ));
        }
        if config.ssr.timeout_secs == 0 {
            errors.push(ValidationError::new("ssr.timeout_secs", "must be > 0"));
        }
    }

    if config.flash.enabled && config.flash.cookie_name.trim().is_empty() {
        errors.push(ValidationError::new("flash.cookie_name", "must not be empty"));
    }

    let obs = &config.observability;
    if !LOG_LEVELS.contains(&obs.log_level.as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("unknown level {:?}", obs.log_level),
        ));
    }
    if obs.metrics_enabled && obs.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("{:?} is not a socket address", obs.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_valid_element_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the adapter
//! and the demo server. All types derive Serde traits for deserialization
//! from config files.

use serde::{Deserialize, Serialize};

use crate::flash::DEFAULT_SESSION_COOKIE;
use crate::render::DEFAULT_SSR_URL;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct InertiaConfig {
    /// HTTP server settings (demo binary only).
    pub server: ServerConfig,

    /// Core adapter settings.
    pub inertia: AdapterConfig,

    /// Server-side rendering.
    pub ssr: SsrConfig,

    /// Flash storage for validation errors.
    pub flash: FlashConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Adapter configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Path to the root handlebars template.
    pub root_template: String,

    /// Id of the element the client app mounts on.
    pub container_id: String,

    /// Version string; hashed with md5 before use.
    pub version: Option<String>,

    /// File whose md5 becomes the version (e.g. the bundler manifest).
    pub version_file: Option<String>,

    /// Optional mix-manifest.json for the `mix` template helper.
    pub mix_manifest: Option<String>,

    /// Encrypt browser history state for every page.
    pub encrypt_history: bool,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            root_template: "templates/app.hbs".to_string(),
            container_id: "app".to_string(),
            version: None,
            version_file: None,
            mix_manifest: None,
            encrypt_history: false,
        }
    }
}

/// SSR configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SsrConfig {
    /// Enable server-side rendering on first loads.
    pub enabled: bool,

    /// Base URL of the SSR server; `/render` is appended.
    pub url: String,

    /// SSR request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SsrConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: DEFAULT_SSR_URL.to_string(),
            timeout_secs: 5,
        }
    }
}

/// Flash configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FlashConfig {
    /// Use the in-memory flash provider.
    pub enabled: bool,

    /// Session cookie the provider keys on.
    pub cookie_name: String,
}

impl Default for FlashConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            cookie_name: DEFAULT_SESSION_COOKIE.to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

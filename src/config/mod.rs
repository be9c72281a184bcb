//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → InertiaConfig (validated, immutable)
//!     → Inertia::from_config builds the adapter once at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; shared data never changes after startup
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    AdapterConfig, FlashConfig, InertiaConfig, ObservabilityConfig, ServerConfig, SsrConfig,
};
pub use validation::{validate_config, ValidationError};

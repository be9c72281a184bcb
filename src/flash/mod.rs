//! Flash storage for validation errors and history clearing.
//!
//! # Data Flow
//! ```text
//! POST /users (validation fails)
//!     → context validation errors set by the handler
//!     → redirect()/back() flashes them via FlashProvider
//!     → 302/303 to the form page
//! GET /users/create
//!     → render() takes the flashed errors
//!     → merged into `errors` prop
//! ```
//!
//! # Design Decisions
//! - Providers are keyed on request headers (usually a session cookie)
//! - Taking flashed data removes it; flashes survive exactly one render
//! - A version-conflict reload re-flashes errors so they are not lost

pub mod memory;

use axum::http::HeaderMap;

use crate::error::InertiaResult;

pub use memory::{MemoryFlashProvider, DEFAULT_SESSION_COOKIE};

/// Validation errors keyed by field.
pub type ValidationErrors = serde_json::Map<String, serde_json::Value>;

/// Persists flash data between a redirect and the next render.
pub trait FlashProvider: Send + Sync {
    fn flash_errors(&self, headers: &HeaderMap, errors: &ValidationErrors) -> InertiaResult<()>;

    fn take_errors(&self, headers: &HeaderMap) -> InertiaResult<ValidationErrors>;

    fn flash_clear_history(&self, headers: &HeaderMap) -> InertiaResult<()>;

    fn take_clear_history(&self, headers: &HeaderMap) -> InertiaResult<bool>;
}

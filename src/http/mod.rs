//! Axum integration.
//!
//! # Data Flow
//! ```text
//! request
//!     → middleware.rs (version check, Vary, redirect fixups)
//!     → [application middleware fills context.rs data]
//!     → extract.rs (InertiaRequest: adapter + request snapshot)
//!     → handler calls render / location / redirect / back
//!     → response.rs (redirect and conflict responses)
//! ```

pub mod context;
pub mod extract;
pub mod middleware;
pub mod request;
pub mod response;

pub use context::{
    clear_history, set_encrypt_history, set_props, set_template_data, set_template_value,
    set_validation_errors, InertiaContext,
};
pub use extract::InertiaRequest;
pub use middleware::inertia_middleware;
pub use request::RequestInfo;

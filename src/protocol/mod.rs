//! Inertia wire protocol.
//!
//! # Data Flow
//! ```text
//! incoming request
//!     → headers.rs (is this an Inertia visit? partial reload? which version?)
//!     → [props selected and resolved]
//!     → page.rs (Page assembled)
//!     → JSON body (Inertia visit) or HTML shell (first load)
//! ```

pub mod headers;
pub mod page;

pub use headers::{
    header_list, header_str,
    absolute_url, is_inertia_request, request_url, PartialReload, X_INERTIA,
    X_INERTIA_ERROR_BAG, X_INERTIA_LOCATION, X_INERTIA_PARTIAL_COMPONENT,
    X_INERTIA_PARTIAL_DATA, X_INERTIA_PARTIAL_EXCEPT, X_INERTIA_RESET, X_INERTIA_VERSION,
};
pub use page::Page;

//! Response rendering.
//!
//! # Data Flow
//! ```text
//! Page
//!     → json.rs (JsonMarshaller → bytes)
//!     → Inertia visit: bytes are the response body
//!     → first load:
//!         ssr.rs (optional: head + body from the SSR server)
//!         → template.rs (container div, template data, root template)
//!         → HTML response
//! ```

pub mod json;
pub mod ssr;
pub mod template;

pub use json::{JsonMarshaller, SerdeJsonMarshaller};
pub use ssr::{HttpSsrClient, SsrClient, SsrResponse, DEFAULT_SSR_URL};
pub use template::{build_template_data, container_html, RootTemplate, TemplateData, TemplateFunc};

//! Server-side adapter for the Inertia.js protocol.
//!
//! Lets an axum application answer Inertia visits with JSON page objects and
//! first loads with an HTML shell, handling asset-version conflicts, partial
//! reloads and redirect downgrades along the way.

pub mod assets;
pub mod config;
pub mod error;
pub mod flash;
pub mod http;
pub mod inertia;
pub mod observability;
pub mod props;
pub mod protocol;
pub mod render;

pub use config::InertiaConfig;
pub use error::{InertiaError, InertiaResult};
pub use http::{inertia_middleware, InertiaRequest};
pub use inertia::{Inertia, InertiaBuilder};
pub use props::{Prop, Props};
pub use protocol::Page;

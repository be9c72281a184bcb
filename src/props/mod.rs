//! Page props.
//!
//! # Data Flow
//! ```text
//! shared props (builder)
//!     → context props (request extensions)
//!     → render props (handler)
//!     → resolve.rs::select (full load vs partial reload)
//!     → resolve.rs::resolve (lazy resolvers run here)
//!     → Page.props
//! ```

pub mod prop;
pub mod resolve;

pub use prop::{Prop, Props, Visibility, DEFAULT_DEFER_GROUP};
pub use resolve::{resolve, select, Selection};

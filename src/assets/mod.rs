//! Asset versioning helpers.
//!
//! The asset version is computed once at startup and compared with the
//! client's `X-Inertia-Version` on every Inertia GET.

pub mod mix;
pub mod version;

pub use mix::MixManifest;
pub use version::{md5_file, md5_hex};

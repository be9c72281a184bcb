//! Asset version hashing.

use std::fs;
use std::path::Path;

use crate::error::{InertiaError, InertiaResult};

/// Lowercase hex md5 of `data`.
pub fn md5_hex(data: impl AsRef<[u8]>) -> String {
    format!("{:x}", md5::compute(data))
}

/// md5 of a file's contents, typically a bundler manifest.
pub fn md5_file(path: impl AsRef<Path>) -> InertiaResult<String> {
    let path = path.as_ref();
    let content = fs::read(path).map_err(|e| InertiaError::io(path, e))?;
    Ok(md5_hex(content))
}

//! Laravel Mix manifest lookup for the `mix` template helper.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{InertiaError, InertiaResult};

/// Asset path → versioned path, as written by `mix-manifest.json`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct MixManifest(HashMap<String, String>);

impl MixManifest {
    /// Load a manifest from disk.
    pub fn from_file(path: impl AsRef<Path>) -> InertiaResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| InertiaError::io(path, e))?;
        let manifest: Self = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), entries = manifest.0.len(), "Loaded mix manifest");
        Ok(manifest)
    }

    /// Versioned path for `path`, if the manifest knows it.
    pub fn resolve(&self, path: &str) -> Option<&str> {
        self.0.get(path).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MixManifest {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_loads_and_resolves() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"/js/app.js": "/js/app.js?id=abc123"}}"#).unwrap();

        let manifest = MixManifest::from_file(file.path()).unwrap();
        assert_eq!(manifest.resolve("/js/app.js"), Some("/js/app.js?id=abc123"));
        assert_eq!(manifest.resolve("/css/app.css"), None);
    }

    #[test]
    fn test_invalid_json_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            MixManifest::from_file(file.path()),
            Err(InertiaError::Json(_))
        ));
    }
}

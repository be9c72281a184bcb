//! In-memory flash provider keyed by a session cookie.

use std::sync::Arc;

use axum::http::{header::COOKIE, HeaderMap};
use dashmap::DashMap;

use crate::error::InertiaResult;
use crate::flash::{FlashProvider, ValidationErrors};

/// Cookie read by [`MemoryFlashProvider`] unless configured otherwise.
pub const DEFAULT_SESSION_COOKIE: &str = "inertia_session";

#[derive(Debug, Clone, Default)]
struct FlashEntry {
    errors: ValidationErrors,
    clear_history: bool,
}

impl FlashEntry {
    fn is_empty(&self) -> bool {
        self.errors.is_empty() && !self.clear_history
    }
}

/// A thread-safe, process-local flash store.
///
/// Requests without the session cookie are ignored: nothing is stored and
/// nothing is returned. Not suitable for multi-instance deployments.
///
/// Entries are only removed when taken. A session that never renders again
/// keeps its entry for the life of the process, so long-running servers with
/// many abandoned sessions should plug in a store with expiry instead.
#[derive(Debug, Clone)]
pub struct MemoryFlashProvider {
    inner: Arc<DashMap<String, FlashEntry>>,
    cookie_name: String,
}

impl MemoryFlashProvider {
    pub fn new(cookie_name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            cookie_name: cookie_name.into(),
        }
    }

    /// Number of sessions with pending flash data.
    pub fn pending(&self) -> usize {
        self.inner.len()
    }

    fn session_id(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|raw| raw.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == self.cookie_name)
            .map(|(_, value)| value.to_string())
            .filter(|value| !value.is_empty())
    }

    fn update(&self, headers: &HeaderMap, f: impl FnOnce(&mut FlashEntry)) {
        if let Some(id) = self.session_id(headers) {
            let mut entry = self.inner.entry(id).or_default();
            f(&mut *entry);
        }
    }

    fn take<T>(&self, headers: &HeaderMap, f: impl FnOnce(&mut FlashEntry) -> T) -> Option<T> {
        let id = self.session_id(headers)?;
        let value = {
            let mut entry = self.inner.get_mut(&id)?;
            f(&mut *entry)
        };
        self.inner.remove_if(&id, |_, entry| entry.is_empty());
        Some(value)
    }
}

impl Default for MemoryFlashProvider {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_COOKIE)
    }
}

impl FlashProvider for MemoryFlashProvider {
    fn flash_errors(&self, headers: &HeaderMap, errors: &ValidationErrors) -> InertiaResult<()> {
        if errors.is_empty() {
            return Ok(());
        }
        self.update(headers, |entry| {
            for (key, val) in errors {
                entry.errors.insert(key.clone(), val.clone());
            }
        });
        Ok(())
    }

    fn take_errors(&self, headers: &HeaderMap) -> InertiaResult<ValidationErrors> {
        Ok(self
            .take(headers, |entry| std::mem::take(&mut entry.errors))
            .unwrap_or_default())
    }

    fn flash_clear_history(&self, headers: &HeaderMap) -> InertiaResult<()> {
        self.update(headers, |entry| entry.clear_history = true);
        Ok(())
    }

    fn take_clear_history(&self, headers: &HeaderMap) -> InertiaResult<bool> {
        Ok(self
            .take(headers, |entry| std::mem::take(&mut entry.clear_history))
            .unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use serde_json::json;

    fn session(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static(value));
        headers
    }

    fn errors() -> ValidationErrors {
        json!({ "email": "The email field is required." })
            .as_object()
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_errors_survive_one_take() {
        let flash = MemoryFlashProvider::default();
        let headers = session("theme=dark; inertia_session=abc");

        flash.flash_errors(&headers, &errors()).unwrap();
        assert_eq!(flash.pending(), 1);

        assert_eq!(flash.take_errors(&headers).unwrap(), errors());
        assert!(flash.take_errors(&headers).unwrap().is_empty());
        assert_eq!(flash.pending(), 0);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let flash = MemoryFlashProvider::default();
        flash.flash_errors(&session("inertia_session=a"), &errors()).unwrap();
        assert!(flash.take_errors(&session("inertia_session=b")).unwrap().is_empty());
    }

    #[test]
    fn test_no_cookie_is_ignored() {
        let flash = MemoryFlashProvider::default();
        flash.flash_errors(&HeaderMap::new(), &errors()).unwrap();
        flash.flash_clear_history(&HeaderMap::new()).unwrap();
        assert_eq!(flash.pending(), 0);
        assert!(!flash.take_clear_history(&HeaderMap::new()).unwrap());
    }

    #[test]
    fn test_clear_history_kept_apart_from_errors() {
        let flash = MemoryFlashProvider::new("sid");
        let headers = session("sid=xyz");

        flash.flash_errors(&headers, &errors()).unwrap();
        flash.flash_clear_history(&headers).unwrap();

        assert!(flash.take_clear_history(&headers).unwrap());
        assert_eq!(flash.pending(), 1);
        assert_eq!(flash.take_errors(&headers).unwrap(), errors());
        assert_eq!(flash.pending(), 0);
    }
}

//! Inertia header names and request inspection.
//!
//! # Responsibilities
//! - Name every header the client router sends or expects
//! - Detect Inertia requests
//! - Parse partial-reload headers into a [`PartialReload`]
//! - Rebuild the absolute request URL for version-conflict responses

use axum::http::{HeaderMap, HeaderName, Uri};

pub const X_INERTIA: HeaderName = HeaderName::from_static("x-inertia");
pub const X_INERTIA_VERSION: HeaderName = HeaderName::from_static("x-inertia-version");
pub const X_INERTIA_LOCATION: HeaderName = HeaderName::from_static("x-inertia-location");
pub const X_INERTIA_PARTIAL_COMPONENT: HeaderName =
    HeaderName::from_static("x-inertia-partial-component");
pub const X_INERTIA_PARTIAL_DATA: HeaderName = HeaderName::from_static("x-inertia-partial-data");
pub const X_INERTIA_PARTIAL_EXCEPT: HeaderName =
    HeaderName::from_static("x-inertia-partial-except");
pub const X_INERTIA_RESET: HeaderName = HeaderName::from_static("x-inertia-reset");
pub const X_INERTIA_ERROR_BAG: HeaderName = HeaderName::from_static("x-inertia-error-bag");
const X_FORWARDED_PROTO: HeaderName = HeaderName::from_static("x-forwarded-proto");

/// Returns true if the request was sent by the Inertia client router.
pub fn is_inertia_request(headers: &HeaderMap) -> bool {
    headers.contains_key(X_INERTIA)
}

/// Read a header as a string, treating non-ASCII values as absent.
pub fn header_str<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Split a comma-separated header into trimmed, non-empty entries.
pub fn header_list(headers: &HeaderMap, name: &HeaderName) -> Vec<String> {
    header_str(headers, name)
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Partial reload parameters for a single render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialReload {
    /// Keys requested via `X-Inertia-Partial-Data`.
    pub only: Vec<String>,
    /// Keys excluded via `X-Inertia-Partial-Except`.
    pub except: Vec<String>,
    /// Merge props the client wants replaced instead of merged.
    pub reset: Vec<String>,
}

impl PartialReload {
    /// Parse partial reload headers.
    ///
    /// Returns `None` unless this is an Inertia request whose partial component
    /// matches the component being rendered.
    pub fn from_headers(headers: &HeaderMap, component: &str) -> Option<Self> {
        if !is_inertia_request(headers) {
            return None;
        }
        if header_str(headers, &X_INERTIA_PARTIAL_COMPONENT) != Some(component) {
            return None;
        }

        Some(Self {
            only: header_list(headers, &X_INERTIA_PARTIAL_DATA),
            except: header_list(headers, &X_INERTIA_PARTIAL_EXCEPT),
            reset: header_list(headers, &X_INERTIA_RESET),
        })
    }
}

/// Path and query of the request, as sent to the client in `page.url`.
pub fn request_url(uri: &Uri) -> String {
    uri.path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| "/".to_string())
}

/// Absolute URL of the request, used as the `X-Inertia-Location` on version conflicts.
pub fn absolute_url(headers: &HeaderMap, uri: &Uri) -> String {
    if uri.scheme().is_some() && uri.authority().is_some() {
        return uri.to_string();
    }

    match header_str(headers, &axum::http::header::HOST) {
        Some(host) => {
            let scheme = header_str(headers, &X_FORWARDED_PROTO).unwrap_or("http");
            format!("{}://{}{}", scheme, host, request_url(uri))
        }
        None => uri.to_string(),
    }
}

//! Request snapshot used for rendering decisions.

use axum::http::{request::Parts, HeaderMap, Method, Uri};

use crate::http::context::InertiaContext;
use crate::protocol::{header_str, is_inertia_request};

/// Everything the adapter needs to know about the current request.
#[derive(Debug, Clone)]
pub struct RequestInfo {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub context: InertiaContext,
}

impl RequestInfo {
    pub fn from_parts(parts: &Parts) -> Self {
        Self {
            method: parts.method.clone(),
            uri: parts.uri.clone(),
            headers: parts.headers.clone(),
            context: InertiaContext::from_extensions(&parts.extensions),
        }
    }

    pub fn is_inertia(&self) -> bool {
        is_inertia_request(&self.headers)
    }

    /// The `Referer` header, if any.
    pub fn referer(&self) -> Option<&str> {
        header_str(&self.headers, &axum::http::header::REFERER)
    }
}

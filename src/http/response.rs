//! Response builders for the protocol's non-page responses.
//!
//! # Design Decisions
//! - Redirects after PUT/PATCH/DELETE use 303 so the browser follows with GET
//! - External and version-conflict locations use 409 + `X-Inertia-Location`

use axum::http::header::{LOCATION, VARY};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::protocol::X_INERTIA_LOCATION;

/// Status to redirect with after a request made with `method`.
pub fn redirect_status(method: &Method) -> StatusCode {
    if is_mutating(method) {
        StatusCode::SEE_OTHER
    } else {
        StatusCode::FOUND
    }
}

pub(crate) fn is_mutating(method: &Method) -> bool {
    *method == Method::PUT || *method == Method::PATCH || *method == Method::DELETE
}

pub fn redirect_response(url: &str, status: StatusCode) -> Response {
    (status, [(LOCATION, url.to_string())]).into_response()
}

/// 409 telling the client router to perform a full page visit to `url`.
pub fn conflict_response(url: &str) -> Response {
    (StatusCode::CONFLICT, [(X_INERTIA_LOCATION, url.to_string())]).into_response()
}

/// Add `Vary: X-Inertia` unless already present.
pub fn ensure_vary(headers: &mut HeaderMap) {
    let present = headers.get_all(VARY).iter().any(|v| {
        v.to_str()
            .map(|s| s.split(',').any(|p| p.trim().eq_ignore_ascii_case("x-inertia")))
            .unwrap_or(false)
    });
    if !present {
        headers.append(VARY, HeaderValue::from_static("X-Inertia"));
    }
}

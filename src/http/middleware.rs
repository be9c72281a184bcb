//! Protocol middleware.
//!
//! # Responsibilities
//! - Leave non-Inertia requests untouched
//! - Force a full reload (409) when the client's asset version is stale
//! - Turn empty 200 responses into a redirect back
//! - Downgrade 302 to 303 after PUT/PATCH/DELETE
//! - Mark responses with `Vary: X-Inertia`

use axum::body::HttpBody;
use axum::extract::{Request, State};
use axum::http::header::REFERER;
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::Response;

use crate::http::response::{conflict_response, ensure_vary, is_mutating, redirect_response};
use crate::inertia::Inertia;
use crate::observability::metrics;
use crate::protocol::{absolute_url, header_str, is_inertia_request, X_INERTIA_VERSION};

/// Install with `axum::middleware::from_fn_with_state(inertia, inertia_middleware)`.
pub async fn inertia_middleware(
    State(inertia): State<Inertia>,
    request: Request,
    next: Next,
) -> Response {
    if !is_inertia_request(request.headers()) {
        return next.run(request).await;
    }

    let method = request.method().clone();
    let headers = request.headers().clone();

    let client_version = header_str(&headers, &X_INERTIA_VERSION).unwrap_or_default();
    if method == Method::GET && client_version != inertia.version() {
        tracing::info!(
            client_version = %client_version,
            server_version = %inertia.version(),
            path = %request.uri().path(),
            "Asset version mismatch, forcing full reload"
        );
        if let Err(e) = inertia.reflash(&headers) {
            tracing::warn!(error = %e, "Failed to keep flashed errors across reload");
        }

        metrics::record_response("conflict");
        let mut response = conflict_response(&absolute_url(&headers, request.uri()));
        ensure_vary(response.headers_mut());
        return response;
    }

    let mut response = next.run(request).await;

    if response.status() == StatusCode::OK && response.body().size_hint().exact() == Some(0) {
        if let Some(referer) = header_str(&headers, &REFERER) {
            tracing::debug!(referer = %referer, "Empty Inertia response, redirecting back");
            response = redirect_response(referer, StatusCode::FOUND);
        }
    }

    if response.status() == StatusCode::FOUND && is_mutating(&method) {
        *response.status_mut() = StatusCode::SEE_OTHER;
    }

    ensure_vary(response.headers_mut());
    response
}

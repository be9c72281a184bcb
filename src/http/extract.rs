//! Axum extractor giving handlers access to the adapter.

use std::convert::Infallible;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::response::Response;

use crate::error::InertiaResult;
use crate::flash::ValidationErrors;
use crate::http::context::InertiaContext;
use crate::http::request::RequestInfo;
use crate::inertia::Inertia;
use crate::props::Props;

/// The adapter bound to the current request.
///
/// ```ignore
/// async fn index(inertia: InertiaRequest) -> InertiaResult<Response> {
///     inertia.render("Users/Index", Props::new().with("users", users)).await
/// }
/// ```
#[derive(Debug, Clone)]
pub struct InertiaRequest {
    inertia: Inertia,
    info: RequestInfo,
}

impl<S> FromRequestParts<S> for InertiaRequest
where
    Inertia: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self {
            inertia: Inertia::from_ref(state),
            info: RequestInfo::from_parts(parts),
        })
    }
}

impl InertiaRequest {
    pub fn new(inertia: Inertia, info: RequestInfo) -> Self {
        Self { inertia, info }
    }

    pub fn is_inertia(&self) -> bool {
        self.info.is_inertia()
    }

    pub fn info(&self) -> &RequestInfo {
        &self.info
    }

    /// Context for this request; changes apply to the next render or redirect.
    pub fn context_mut(&mut self) -> &mut InertiaContext {
        &mut self.info.context
    }

    /// Attach validation errors, typically right before [`InertiaRequest::back`].
    pub fn with_errors(mut self, errors: ValidationErrors) -> Self {
        self.info.context.validation_errors.extend(errors);
        self
    }

    pub async fn render(&self, component: &str, props: Props) -> InertiaResult<Response> {
        self.inertia.render(&self.info, component, props).await
    }

    pub fn location(&self, url: &str) -> Response {
        self.inertia.location(&self.info, url)
    }

    pub fn redirect(&self, url: &str) -> InertiaResult<Response> {
        self.inertia.redirect(&self.info, url)
    }

    pub fn back(&self) -> InertiaResult<Response> {
        self.inertia.back(&self.info)
    }
}

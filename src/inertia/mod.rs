//! The adapter itself.
//!
//! # Responsibilities
//! - Hold the process-wide configuration built at startup
//! - Build the [`Page`] for a request (props layering, errors, partial reloads)
//! - Answer with JSON for Inertia visits and the HTML shell otherwise
//! - Produce protocol-aware redirects and external locations
//!
//! # Design Decisions
//! - Immutable after `build()`; cloned cheaply via `Arc`
//! - SSR failures degrade to client-side rendering instead of failing the request
//! - `errors` is always sent and always overrides a prop of the same name

pub mod builder;

use std::sync::Arc;

use axum::http::header::{CONTENT_TYPE, VARY};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde_json::Value;

use crate::error::InertiaResult;
use crate::flash::{FlashProvider, ValidationErrors};
use crate::http::request::RequestInfo;
use crate::http::response::{conflict_response, ensure_vary, redirect_response, redirect_status};
use crate::observability::metrics;
use crate::props::{self, Prop, Props};
use crate::protocol::{header_str, request_url, Page, PartialReload, X_INERTIA, X_INERTIA_ERROR_BAG};
use crate::render::{build_template_data, container_html, JsonMarshaller, RootTemplate, SsrClient, TemplateData};

pub use builder::InertiaBuilder;

/// Key the validation errors are sent under.
pub const ERRORS_PROP: &str = "errors";

/// Inertia protocol adapter, shared by every request.
#[derive(Clone)]
pub struct Inertia {
    inner: Arc<InertiaInner>,
}

struct InertiaInner {
    template: RootTemplate,
    version: String,
    container_id: String,
    json: Arc<dyn JsonMarshaller>,
    ssr: Option<Arc<dyn SsrClient>>,
    flash: Option<Arc<dyn FlashProvider>>,
    encrypt_history: bool,
    shared_props: Props,
    shared_template_data: TemplateData,
}

impl Inertia {
    pub fn builder(root_template_html: impl Into<String>) -> InertiaBuilder {
        InertiaBuilder::new(root_template_html)
    }

    /// Current asset version.
    pub fn version(&self) -> &str {
        &self.inner.version
    }

    pub fn shared_props(&self) -> &Props {
        &self.inner.shared_props
    }

    pub fn shared_prop(&self, key: &str) -> Option<&Prop> {
        self.inner.shared_props.get(key)
    }

    pub fn shared_template_data(&self) -> &TemplateData {
        &self.inner.shared_template_data
    }

    pub fn is_ssr_enabled(&self) -> bool {
        self.inner.ssr.is_some()
    }

    pub fn container_id(&self) -> &str {
        &self.inner.container_id
    }

    /// Render `component`: JSON for Inertia visits, the root template otherwise.
    pub async fn render(
        &self,
        req: &RequestInfo,
        component: &str,
        props: Props,
    ) -> InertiaResult<Response> {
        let page = self.build_page(req, component, props).await?;
        let page_json = self.inner.json.marshal(&page)?;

        if req.is_inertia() {
            tracing::debug!(component, url = %page.url, "Rendering Inertia page as JSON");
            metrics::record_response("json");
            return Ok((
                StatusCode::OK,
                [
                    (CONTENT_TYPE, "application/json"),
                    (X_INERTIA, "true"),
                    (VARY, "X-Inertia"),
                ],
                page_json,
            )
                .into_response());
        }

        tracing::debug!(component, url = %page.url, "Rendering Inertia page as HTML");
        let html = self.render_html(req, &page_json).await?;
        metrics::record_response("html");

        let mut response = Html(html).into_response();
        ensure_vary(response.headers_mut());
        Ok(response)
    }

    /// Assemble the page object for a request.
    pub async fn build_page(
        &self,
        req: &RequestInfo,
        component: &str,
        props: Props,
    ) -> InertiaResult<Page> {
        let mut all = self.inner.shared_props.clone();
        all.extend(req.context.props.clone());
        all.extend(props);
        all.insert(ERRORS_PROP, Prop::always(self.collect_errors(req)?));

        let partial = PartialReload::from_headers(&req.headers, component);
        let selection = props::select(all, partial.as_ref());
        let resolved = props::resolve(selection.props).await?;

        // Taken even when the context already clears history.
        let flashed_clear_history = self.take_flashed_clear_history(req)?;
        let clear_history = req.context.clear_history || flashed_clear_history;

        Ok(Page {
            component: component.to_string(),
            props: resolved,
            url: request_url(&req.uri),
            version: self.inner.version.clone(),
            encrypt_history: req.context.encrypt_history.unwrap_or(self.inner.encrypt_history),
            clear_history,
            merge_props: selection.merge,
            deferred_props: selection.deferred,
        })
    }

    /// Redirect to an external URL, or force a full visit from an Inertia request.
    pub fn location(&self, req: &RequestInfo, url: &str) -> Response {
        if req.is_inertia() {
            tracing::debug!(location = %url, "External Inertia location");
            metrics::record_response("conflict");
            return conflict_response(url);
        }
        metrics::record_response("redirect");
        redirect_response(url, redirect_status(&req.method))
    }

    /// Redirect within the app, flashing validation errors first.
    pub fn redirect(&self, req: &RequestInfo, url: &str) -> InertiaResult<Response> {
        if let Some(flash) = &self.inner.flash {
            if !req.context.validation_errors.is_empty() {
                flash.flash_errors(&req.headers, &req.context.validation_errors)?;
            }
            if req.context.clear_history {
                flash.flash_clear_history(&req.headers)?;
            }
        }

        metrics::record_response("redirect");
        Ok(redirect_response(url, redirect_status(&req.method)))
    }

    /// Redirect to the `Referer`, or `/` without one.
    pub fn back(&self, req: &RequestInfo) -> InertiaResult<Response> {
        let url = req.referer().unwrap_or("/").to_string();
        self.redirect(req, &url)
    }

    /// Put flashed errors back so they survive the forced reload after a version conflict.
    pub(crate) fn reflash(&self, headers: &axum::http::HeaderMap) -> InertiaResult<()> {
        if let Some(flash) = &self.inner.flash {
            let errors = flash.take_errors(headers)?;
            flash.flash_errors(headers, &errors)?;
        }
        Ok(())
    }

    fn collect_errors(&self, req: &RequestInfo) -> InertiaResult<Value> {
        let mut errors = match &self.inner.flash {
            Some(flash) => flash.take_errors(&req.headers)?,
            None => ValidationErrors::new(),
        };
        for (key, val) in &req.context.validation_errors {
            errors.insert(key.clone(), val.clone());
        }

        let bag = header_str(&req.headers, &X_INERTIA_ERROR_BAG).filter(|b| !b.is_empty());
        match bag {
            Some(bag) if !errors.is_empty() => {
                let mut wrapped = ValidationErrors::new();
                wrapped.insert(bag.to_string(), Value::Object(errors));
                Ok(Value::Object(wrapped))
            }
            _ => Ok(Value::Object(errors)),
        }
    }

    fn take_flashed_clear_history(&self, req: &RequestInfo) -> InertiaResult<bool> {
        match &self.inner.flash {
            Some(flash) => flash.take_clear_history(&req.headers),
            None => Ok(false),
        }
    }

    async fn render_html(&self, req: &RequestInfo, page_json: &[u8]) -> InertiaResult<String> {
        let container = container_html(&self.inner.container_id, &String::from_utf8_lossy(page_json));

        let (head, body) = match &self.inner.ssr {
            Some(ssr) => match ssr.render(page_json).await {
                Ok(rendered) => (rendered.head_html(), rendered.body),
                Err(e) => {
                    tracing::warn!(error = %e, "SSR failed, falling back to client-side rendering");
                    metrics::record_ssr_failure();
                    (String::new(), container)
                }
            },
            None => (String::new(), container),
        };

        let data = build_template_data(
            head,
            body,
            &self.inner.shared_template_data,
            &req.context.template_data,
        );
        self.inner.template.render(&data)
    }
}

impl std::fmt::Debug for Inertia {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Inertia")
            .field("version", &self.inner.version)
            .field("container_id", &self.inner.container_id)
            .field("ssr_enabled", &self.inner.ssr.is_some())
            .finish()
    }
}

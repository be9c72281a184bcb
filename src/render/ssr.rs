//! Server-side rendering client.
//!
//! # Responsibilities
//! - POST the page JSON to the SSR server's `/render` endpoint
//! - Decode `{ head: [...], body: "..." }`
//!
//! # Design Decisions
//! - Transport is behind [`SsrClient`] so tests and other runtimes can swap it
//! - Failures surface as [`InertiaError::Ssr`]; the caller decides whether to fall back

use std::time::Duration;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use url::Url;

use crate::error::{InertiaError, InertiaResult};

/// Address the Inertia SSR server listens on by default.
pub const DEFAULT_SSR_URL: &str = "http://127.0.0.1:13714";

/// What the SSR server sends back.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct SsrResponse {
    #[serde(default)]
    pub head: Vec<String>,
    #[serde(default)]
    pub body: String,
}

impl SsrResponse {
    /// Head fragments as a single HTML string.
    pub fn head_html(&self) -> String {
        self.head.join("\n")
    }
}

/// Renders a page on an external SSR server.
pub trait SsrClient: Send + Sync {
    fn render<'a>(&'a self, page_json: &'a [u8]) -> BoxFuture<'a, InertiaResult<SsrResponse>>;
}

/// [`SsrClient`] talking HTTP to the Node SSR server.
#[derive(Debug, Clone)]
pub struct HttpSsrClient {
    client: reqwest::Client,
    render_url: Url,
}

impl HttpSsrClient {
    pub fn new(base_url: &str, timeout: Duration) -> InertiaResult<Self> {
        let render_url = render_url(base_url)?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| InertiaError::Ssr(e.to_string()))?;

        Ok(Self { client, render_url })
    }

    pub fn render_url(&self) -> &Url {
        &self.render_url
    }

    async fn post(&self, page_json: &[u8]) -> InertiaResult<SsrResponse> {
        let response = self
            .client
            .post(self.render_url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(page_json.to_vec())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| InertiaError::Ssr(e.to_string()))?;

        response
            .json::<SsrResponse>()
            .await
            .map_err(|e| InertiaError::Ssr(format!("invalid SSR response: {}", e)))
    }
}

impl SsrClient for HttpSsrClient {
    fn render<'a>(&'a self, page_json: &'a [u8]) -> BoxFuture<'a, InertiaResult<SsrResponse>> {
        self.post(page_json).boxed()
    }
}

fn render_url(base_url: &str) -> InertiaResult<Url> {
    let joined = format!("{}/render", base_url.trim_end_matches('/'));
    Url::parse(&joined).map_err(|e| InertiaError::Config(format!("invalid SSR url {:?}: {}", base_url, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_url_appends_path() {
        assert_eq!(
            render_url("http://127.0.0.1:13714").unwrap().as_str(),
            "http://127.0.0.1:13714/render"
        );
        assert_eq!(
            render_url("http://ssr.local/").unwrap().as_str(),
            "http://ssr.local/render"
        );
    }

    #[test]
    fn test_render_url_rejects_garbage() {
        assert!(matches!(render_url("not a url"), Err(InertiaError::Config(_))));
    }

    #[test]
    fn test_response_decoding_defaults() {
        let res: SsrResponse = serde_json::from_str(r#"{"body":"<div>hi</div>"}"#).unwrap();
        assert!(res.head.is_empty());
        assert_eq!(res.body, "<div>hi</div>");

        let res: SsrResponse =
            serde_json::from_str(r#"{"head":["<title>a</title>","<meta>"],"body":""}"#).unwrap();
        assert_eq!(res.head_html(), "<title>a</title>\n<meta>");
    }
}

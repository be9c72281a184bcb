//! Adapter-wide error type.

use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors that can occur while building an [`Inertia`](crate::Inertia) or rendering a page.
#[derive(Debug, Error)]
pub enum InertiaError {
    /// The root template could not be parsed.
    #[error("Template error: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    /// The root template failed to render.
    #[error("Render error: {0}")]
    Render(#[from] handlebars::RenderError),

    /// Page or prop serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading a template, manifest or version file failed.
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The SSR server could not be reached or returned garbage.
    #[error("SSR error: {0}")]
    Ssr(String),

    /// A lazy prop resolver failed.
    #[error("Prop {key:?} failed to resolve: {message}")]
    Prop { key: String, message: String },

    /// The flash provider rejected an operation.
    #[error("Flash error: {0}")]
    Flash(String),

    /// Invalid adapter configuration.
    #[error("Config error: {0}")]
    Config(String),
}

impl InertiaError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Convenience for prop resolvers that want to fail with a plain message.
    pub fn prop(key: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Prop {
            key: key.into(),
            message: message.to_string(),
        }
    }
}

impl From<handlebars::TemplateError> for InertiaError {
    fn from(err: handlebars::TemplateError) -> Self {
        Self::Template(Box::new(err))
    }
}

/// Result type for adapter operations.
pub type InertiaResult<T> = Result<T, InertiaError>;

impl IntoResponse for InertiaError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Inertia response failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

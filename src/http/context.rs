//! Per-request Inertia context carried in request extensions.
//!
//! Middleware and handlers call these helpers on `request.extensions_mut()`
//! before the page is rendered. Every call merges with what is already there.

use axum::http::Extensions;
use serde_json::Value;

use crate::flash::ValidationErrors;
use crate::props::Props;
use crate::render::TemplateData;

/// Data attached to a single request.
#[derive(Debug, Clone, Default)]
pub struct InertiaContext {
    /// Props layered between the shared props and the render props.
    pub props: Props,
    /// Template data layered on top of the shared template data.
    pub template_data: TemplateData,
    pub validation_errors: ValidationErrors,
    /// Overrides the global history encryption flag.
    pub encrypt_history: Option<bool>,
    pub clear_history: bool,
}

impl InertiaContext {
    /// Snapshot of the context stored in `extensions`, or an empty one.
    pub fn from_extensions(extensions: &Extensions) -> Self {
        extensions.get::<Self>().cloned().unwrap_or_default()
    }
}

fn with_context(extensions: &mut Extensions, f: impl FnOnce(&mut InertiaContext)) {
    let mut ctx = extensions.remove::<InertiaContext>().unwrap_or_default();
    f(&mut ctx);
    extensions.insert(ctx);
}

pub fn set_props(extensions: &mut Extensions, props: Props) {
    with_context(extensions, |ctx| ctx.props.extend(props));
}

pub fn set_template_data(extensions: &mut Extensions, data: TemplateData) {
    with_context(extensions, |ctx| ctx.template_data.extend(data));
}

/// Insert a single template data entry.
pub fn set_template_value(extensions: &mut Extensions, key: impl Into<String>, value: impl Into<Value>) {
    let (key, value) = (key.into(), value.into());
    with_context(extensions, |ctx| {
        ctx.template_data.insert(key, value);
    });
}

pub fn set_validation_errors(extensions: &mut Extensions, errors: ValidationErrors) {
    with_context(extensions, |ctx| ctx.validation_errors.extend(errors));
}

pub fn set_encrypt_history(extensions: &mut Extensions, encrypt: bool) {
    with_context(extensions, |ctx| ctx.encrypt_history = Some(encrypt));
}

pub fn clear_history(extensions: &mut Extensions) {
    with_context(extensions, |ctx| ctx.clear_history = true);
}

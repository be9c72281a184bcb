//! Root template rendering.
//!
//! # Responsibilities
//! - Compile the root HTML template once at startup
//! - Register the `mix` helper and any shared template functions
//! - Assemble template data: defaults, then shared data, then request data
//! - Produce the container element that carries the page JSON
//!
//! # Design Decisions
//! - `inertia` and `inertiaHead` are HTML; templates print them with `{{{ }}}`
//! - Shared helpers are registered after `mix` so they can replace it

use handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext, RenderError,
};
use serde_json::{Map, Value};

use crate::assets::MixManifest;
use crate::error::InertiaResult;

/// Name the root template is registered under.
pub const ROOT_TEMPLATE: &str = "root";

/// Data handed to the root template.
pub type TemplateData = Map<String, Value>;

/// A boxed handlebars helper exposed to the root template.
pub type TemplateFunc = Box<dyn HelperDef + Send + Sync + 'static>;

/// The element the client router mounts on.
pub fn container_html(id: &str, page_json: &str) -> String {
    format!(
        r#"<div id="{}" data-page="{}"></div>"#,
        handlebars::html_escape(id),
        handlebars::html_escape(page_json)
    )
}

/// Layer template data: defaults, shared data, then per-request data.
pub fn build_template_data(
    head: String,
    container: String,
    shared: &TemplateData,
    context: &TemplateData,
) -> TemplateData {
    let mut data = TemplateData::new();
    data.insert("inertiaHead".to_string(), Value::String(head));
    data.insert("inertia".to_string(), Value::String(container));

    for (key, val) in shared {
        data.insert(key.clone(), val.clone());
    }
    for (key, val) in context {
        data.insert(key.clone(), val.clone());
    }

    data
}

/// Compiled root template plus its helpers.
pub struct RootTemplate {
    registry: Handlebars<'static>,
}

impl RootTemplate {
    pub fn new(
        source: &str,
        manifest: MixManifest,
        funcs: Vec<(String, TemplateFunc)>,
    ) -> InertiaResult<Self> {
        let mut registry = Handlebars::new();
        registry.register_helper("mix", Box::new(MixHelper { manifest }));
        for (name, func) in funcs {
            registry.register_helper(&name, func);
        }
        registry.register_template_string(ROOT_TEMPLATE, source)?;

        Ok(Self { registry })
    }

    pub fn render(&self, data: &TemplateData) -> InertiaResult<String> {
        Ok(self.registry.render(ROOT_TEMPLATE, data)?)
    }
}

struct MixHelper {
    manifest: MixManifest,
}

impl HelperDef for MixHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let path = h
            .param(0)
            .and_then(|p| p.value().as_str())
            .ok_or_else(|| RenderError::new("mix: expected an asset path"))?;

        match self.manifest.resolve(path) {
            Some(versioned) => {
                out.write(versioned)?;
                Ok(())
            }
            None => Err(RenderError::new(format!(
                "file {:?} not found in mix manifest file",
                path
            ))),
        }
    }
}

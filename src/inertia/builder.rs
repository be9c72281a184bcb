//! Startup-time construction of [`Inertia`].

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use handlebars::HelperDef;
use serde_json::Value;

use crate::assets::{md5_file, md5_hex, MixManifest};
use crate::config::InertiaConfig;
use crate::error::{InertiaError, InertiaResult};
use crate::flash::{FlashProvider, MemoryFlashProvider};
use crate::inertia::{Inertia, InertiaInner};
use crate::props::{Prop, Props};
use crate::render::{
    HttpSsrClient, JsonMarshaller, RootTemplate, SerdeJsonMarshaller, SsrClient, TemplateData,
    TemplateFunc,
};

const DEFAULT_CONTAINER_ID: &str = "app";
const DEFAULT_SSR_TIMEOUT: Duration = Duration::from_secs(5);

enum TemplateSource {
    Html(String),
    File(PathBuf),
}

enum VersionSource {
    Unset,
    Value(String),
    File(PathBuf),
}

enum SsrSetup {
    Url(String),
    Client(Arc<dyn SsrClient>),
}

/// Collects options; all I/O happens in [`InertiaBuilder::build`].
pub struct InertiaBuilder {
    template: TemplateSource,
    version: VersionSource,
    container_id: String,
    json: Arc<dyn JsonMarshaller>,
    ssr: Option<SsrSetup>,
    ssr_timeout: Duration,
    flash: Option<Arc<dyn FlashProvider>>,
    encrypt_history: bool,
    mix_manifest: Option<PathBuf>,
    shared_props: Props,
    shared_template_data: TemplateData,
    template_funcs: Vec<(String, TemplateFunc)>,
}

impl InertiaBuilder {
    /// Start from an in-memory root template.
    pub fn new(root_template_html: impl Into<String>) -> Self {
        Self::with_template(TemplateSource::Html(root_template_html.into()))
    }

    /// Start from a root template on disk, read during `build`.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self::with_template(TemplateSource::File(path.into()))
    }

    fn with_template(template: TemplateSource) -> Self {
        Self {
            template,
            version: VersionSource::Unset,
            container_id: DEFAULT_CONTAINER_ID.to_string(),
            json: Arc::new(SerdeJsonMarshaller),
            ssr: None,
            ssr_timeout: DEFAULT_SSR_TIMEOUT,
            flash: None,
            encrypt_history: false,
            mix_manifest: None,
            shared_props: Props::new(),
            shared_template_data: TemplateData::new(),
            template_funcs: Vec::new(),
        }
    }

    /// Version becomes the md5 of `version`.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = VersionSource::Value(version.into());
        self
    }

    /// Version becomes the md5 of the file's contents.
    pub fn version_from_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.version = VersionSource::File(path.into());
        self
    }

    pub fn json_marshaller(mut self, marshaller: impl JsonMarshaller + 'static) -> Self {
        self.json = Arc::new(marshaller);
        self
    }

    pub fn container_id(mut self, id: impl Into<String>) -> Self {
        self.container_id = id.into();
        self
    }

    /// Enable SSR against the server at `url` (see [`crate::render::DEFAULT_SSR_URL`]).
    pub fn ssr(mut self, url: impl Into<String>) -> Self {
        self.ssr = Some(SsrSetup::Url(url.into()));
        self
    }

    pub fn ssr_timeout(mut self, timeout: Duration) -> Self {
        self.ssr_timeout = timeout;
        self
    }

    /// Enable SSR with a custom transport.
    pub fn ssr_client(mut self, client: impl SsrClient + 'static) -> Self {
        self.ssr = Some(SsrSetup::Client(Arc::new(client)));
        self
    }

    pub fn flash_provider(mut self, provider: impl FlashProvider + 'static) -> Self {
        self.flash = Some(Arc::new(provider));
        self
    }

    pub fn encrypt_history(mut self, encrypt: bool) -> Self {
        self.encrypt_history = encrypt;
        self
    }

    pub fn mix_manifest_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.mix_manifest = Some(path.into());
        self
    }

    /// Prop sent with every page.
    pub fn share_prop(mut self, key: impl Into<String>, prop: impl Into<Prop>) -> Self {
        self.shared_props.insert(key, prop);
        self
    }

    /// Data available to the root template on every first load.
    pub fn share_template_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.shared_template_data.insert(key.into(), value.into());
        self
    }

    /// Helper available to the root template.
    pub fn share_template_func(
        mut self,
        name: impl Into<String>,
        func: impl HelperDef + Send + Sync + 'static,
    ) -> Self {
        self.template_funcs.push((name.into(), Box::new(func)));
        self
    }

    pub fn build(self) -> InertiaResult<Inertia> {
        let source = match self.template {
            TemplateSource::Html(html) => html,
            TemplateSource::File(path) => {
                fs::read_to_string(&path).map_err(|e| InertiaError::io(&path, e))?
            }
        };

        let version = match self.version {
            VersionSource::Unset => String::new(),
            VersionSource::Value(v) => md5_hex(v),
            VersionSource::File(path) => md5_file(path)?,
        };

        let manifest = match self.mix_manifest {
            Some(path) => MixManifest::from_file(path)?,
            None => MixManifest::default(),
        };

        let ssr: Option<Arc<dyn SsrClient>> = match self.ssr {
            Some(SsrSetup::Url(url)) => {
                Some(Arc::new(HttpSsrClient::new(&url, self.ssr_timeout)?) as Arc<dyn SsrClient>)
            }
            Some(SsrSetup::Client(client)) => Some(client),
            None => None,
        };

        let template = RootTemplate::new(&source, manifest, self.template_funcs)?;

        tracing::info!(
            version = %version,
            container_id = %self.container_id,
            ssr_enabled = ssr.is_some(),
            flash_enabled = self.flash.is_some(),
            shared_props = self.shared_props.len(),
            "Inertia adapter initialized"
        );

        Ok(Inertia {
            inner: Arc::new(InertiaInner {
                template,
                version,
                container_id: self.container_id,
                json: self.json,
                ssr,
                flash: self.flash,
                encrypt_history: self.encrypt_history,
                shared_props: self.shared_props,
                shared_template_data: self.shared_template_data,
            }),
        })
    }
}

impl Inertia {
    /// Build an adapter from a validated config file.
    pub fn from_config(config: &InertiaConfig) -> InertiaResult<Self> {
        let adapter = &config.inertia;

        let mut builder = InertiaBuilder::from_file(&adapter.root_template)
            .container_id(&adapter.container_id)
            .encrypt_history(adapter.encrypt_history);

        match (&adapter.version, &adapter.version_file) {
            (Some(_), Some(_)) => {
                return Err(InertiaError::Config(
                    "set either version or version_file, not both".to_string(),
                ))
            }
            (Some(v), None) => builder = builder.version(v),
            (None, Some(path)) => builder = builder.version_from_file(path),
            (None, None) => {}
        }

        if let Some(path) = &adapter.mix_manifest {
            builder = builder.mix_manifest_file(path);
        }

        if config.ssr.enabled {
            builder = builder
                .ssr(&config.ssr.url)
                .ssr_timeout(Duration::from_secs(config.ssr.timeout_secs));
        }

        if config.flash.enabled {
            builder = builder.flash_provider(MemoryFlashProvider::new(&config.flash.cookie_name));
        }

        builder.build()
    }
}

//! Prop values and their visibility rules.

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use serde::Serialize;
use serde_json::Value;

use crate::error::InertiaResult;

/// Group used for deferred props that don't name one.
pub const DEFAULT_DEFER_GROUP: &str = "default";

type ResolverFn = dyn Fn() -> BoxFuture<'static, InertiaResult<Value>> + Send + Sync;

/// When a prop is sent to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visibility {
    /// Full loads and partial reloads, unless filtered out.
    Default,
    /// Only when a partial reload asks for it by name.
    Optional,
    /// Every response; ignores `only` and `except`.
    Always,
    /// Skipped on the first load and fetched afterwards by group.
    Deferred(String),
}

#[derive(Clone)]
enum Source {
    Value(Value),
    Resolver(Arc<ResolverFn>),
}

/// A single page prop.
#[derive(Clone)]
pub struct Prop {
    source: Source,
    visibility: Visibility,
    merge: bool,
}

impl Prop {
    /// A plain, already computed value.
    pub fn value(value: impl Into<Value>) -> Self {
        Self::with_source(Source::Value(value.into()), Visibility::Default)
    }

    /// Serialize any value into a prop.
    pub fn serialize<T: Serialize>(value: &T) -> InertiaResult<Self> {
        Ok(Self::value(serde_json::to_value(value)?))
    }

    /// Computed at render time, only if the prop is selected.
    pub fn lazy<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = InertiaResult<Value>> + Send + 'static,
    {
        Self::with_source(Self::resolver(f), Visibility::Default)
    }

    /// Only included when a partial reload requests it.
    pub fn optional<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = InertiaResult<Value>> + Send + 'static,
    {
        Self::with_source(Self::resolver(f), Visibility::Optional)
    }

    /// Included in every response, partial or not.
    pub fn always(value: impl Into<Value>) -> Self {
        Self::with_source(Source::Value(value.into()), Visibility::Always)
    }

    /// Left out of the first load; the client fetches it with a follow-up partial reload.
    pub fn defer<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = InertiaResult<Value>> + Send + 'static,
    {
        Self::with_source(
            Self::resolver(f),
            Visibility::Deferred(DEFAULT_DEFER_GROUP.to_string()),
        )
    }

    /// Put a deferred prop into a named fetch group. No-op for other kinds.
    pub fn group(mut self, group: impl Into<String>) -> Self {
        if let Visibility::Deferred(ref mut g) = self.visibility {
            *g = group.into();
        }
        self
    }

    /// Ask the client to merge this prop with its current value.
    pub fn merge(mut self) -> Self {
        self.merge = true;
        self
    }

    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    pub fn is_merge(&self) -> bool {
        self.merge
    }

    pub(crate) async fn resolve(&self) -> InertiaResult<Value> {
        match &self.source {
            Source::Value(v) => Ok(v.clone()),
            Source::Resolver(f) => f().await,
        }
    }

    fn with_source(source: Source, visibility: Visibility) -> Self {
        Self {
            source,
            visibility,
            merge: false,
        }
    }

    fn resolver<F, Fut>(f: F) -> Source
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = InertiaResult<Value>> + Send + 'static,
    {
        Source::Resolver(Arc::new(move || f().boxed()))
    }
}

impl fmt::Debug for Prop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("Prop");
        match &self.source {
            Source::Value(v) => d.field("value", v),
            Source::Resolver(_) => d.field("value", &"<resolver>"),
        };
        d.field("visibility", &self.visibility)
            .field("merge", &self.merge)
            .finish()
    }
}

impl From<Value> for Prop {
    fn from(value: Value) -> Self {
        Self::value(value)
    }
}

impl From<&str> for Prop {
    fn from(value: &str) -> Self {
        Self::value(value)
    }
}

impl From<String> for Prop {
    fn from(value: String) -> Self {
        Self::value(value)
    }
}

impl From<bool> for Prop {
    fn from(value: bool) -> Self {
        Self::value(value)
    }
}

impl From<i64> for Prop {
    fn from(value: i64) -> Self {
        Self::value(value)
    }
}

/// Ordered map of page props.
#[derive(Debug, Clone, Default)]
pub struct Props(BTreeMap<String, Prop>);

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, prop: impl Into<Prop>) -> Self {
        self.insert(key, prop);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, prop: impl Into<Prop>) -> Option<Prop> {
        self.0.insert(key.into(), prop.into())
    }

    pub fn get(&self, key: &str) -> Option<&Prop> {
        self.0.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Prop> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Overlay `other` on top of these props; keys in `other` win.
    pub fn extend(&mut self, other: Props) {
        self.0.extend(other.0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Prop)> {
        self.0.iter()
    }
}

impl IntoIterator for Props {
    type Item = (String, Prop);
    type IntoIter = std::collections::btree_map::IntoIter<String, Prop>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<K: Into<String>, P: Into<Prop>> FromIterator<(K, P)> for Props {
    fn from_iter<I: IntoIterator<Item = (K, P)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, p)| (k.into(), p.into())).collect())
    }
}

impl From<serde_json::Map<String, Value>> for Props {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

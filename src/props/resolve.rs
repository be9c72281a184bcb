//! Prop selection for full loads and partial reloads.
//!
//! # Responsibilities
//! - Decide which props go out on this response
//! - Collect deferred prop groups on full loads
//! - Collect merge props, honouring `X-Inertia-Reset`
//! - Resolve selected props, never touching the rest
//!
//! # Design Decisions
//! - Always props survive every filter
//! - `except` is applied after `only`
//! - Deferred props are only announced on full loads

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::{InertiaError, InertiaResult};
use crate::props::prop::{Prop, Props, Visibility};
use crate::protocol::PartialReload;

/// Props picked for one response, still unresolved.
#[derive(Debug, Default)]
pub struct Selection {
    pub props: Vec<(String, Prop)>,
    pub deferred: BTreeMap<String, Vec<String>>,
    pub merge: Vec<String>,
}

/// Pick the props to send for this request.
pub fn select(props: Props, partial: Option<&PartialReload>) -> Selection {
    let mut selection = Selection::default();

    for (key, prop) in props {
        let included = match partial {
            None => match prop.visibility() {
                Visibility::Default | Visibility::Always => true,
                Visibility::Optional => false,
                Visibility::Deferred(group) => {
                    selection
                        .deferred
                        .entry(group.clone())
                        .or_default()
                        .push(key.clone());
                    false
                }
            },
            Some(partial) => is_selected_on_partial(&key, &prop, partial),
        };

        if !included {
            continue;
        }

        if prop.is_merge() && !partial.is_some_and(|p| p.reset.contains(&key)) {
            selection.merge.push(key.clone());
        }
        selection.props.push((key, prop));
    }

    selection
}

fn is_selected_on_partial(key: &str, prop: &Prop, partial: &PartialReload) -> bool {
    let always = *prop.visibility() == Visibility::Always;
    if always {
        return true;
    }

    let requested = if partial.only.is_empty() {
        matches!(prop.visibility(), Visibility::Default)
    } else {
        partial.only.iter().any(|k| k == key)
    };

    requested && !partial.except.iter().any(|k| k == key)
}

/// Resolve every selected prop into its final JSON value.
pub async fn resolve(props: Vec<(String, Prop)>) -> InertiaResult<Map<String, Value>> {
    let mut resolved = Map::new();
    for (key, prop) in props {
        let value = prop.resolve().await.map_err(|e| match e {
            InertiaError::Prop { .. } => e,
            other => InertiaError::prop(&key, other),
        })?;
        resolved.insert(key, value);
    }
    Ok(resolved)
}

//! The page object exchanged with the client router.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

/// One request's response payload.
///
/// Built per request, serialized once, then dropped.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Client-side component name.
    pub component: String,

    /// Resolved props.
    pub props: Map<String, Value>,

    /// Path and query of the current request.
    pub url: String,

    /// Asset version the page was rendered with.
    pub version: String,

    pub encrypt_history: bool,

    pub clear_history: bool,

    /// Props the client should merge into existing state.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub merge_props: Vec<String>,

    /// Deferred prop keys grouped by fetch group.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub deferred_props: BTreeMap<String, Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_serializes_camel_case_and_skips_empty_lists() {
        let page = Page {
            component: "Home".into(),
            props: json!({ "errors": {} }).as_object().cloned().unwrap(),
            url: "/".into(),
            version: "abc".into(),
            encrypt_history: false,
            clear_history: true,
            merge_props: Vec::new(),
            deferred_props: BTreeMap::new(),
        };

        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(
            value,
            json!({
                "component": "Home",
                "props": { "errors": {} },
                "url": "/",
                "version": "abc",
                "encryptHistory": false,
                "clearHistory": true,
            })
        );
    }

    #[test]
    fn test_page_includes_deferred_groups() {
        let mut deferred = BTreeMap::new();
        deferred.insert("default".to_string(), vec!["stats".to_string()]);
        let page = Page {
            component: "Dashboard".into(),
            props: Map::new(),
            url: "/dashboard".into(),
            version: String::new(),
            encrypt_history: false,
            clear_history: false,
            merge_props: vec!["feed".into()],
            deferred_props: deferred,
        };

        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["deferredProps"], json!({ "default": ["stats"] }));
        assert_eq!(value["mergeProps"], json!(["feed"]));
    }
}

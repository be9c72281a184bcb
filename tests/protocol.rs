//! End-to-end protocol tests driving the router in-process.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use inertia_adapter::render::JsonMarshaller;
use inertia_adapter::Page;

mod common;

#[tokio::test]
async fn test_first_load_renders_html_shell() {
    let app = common::app(common::builder().build().unwrap());

    let res = app
        .oneshot(Request::get("/?tab=1").body(common::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    assert_eq!(res.headers()[header::VARY], "X-Inertia");

    let html = common::body_string(res).await;
    assert!(html.contains("<title>Acme</title>"));
    assert!(html.contains(r#"<div id="app" data-page="{&quot;component&quot;:&quot;Home&quot;"#));
    assert!(html.contains("&quot;url&quot;:&quot;/?tab"));
}

#[tokio::test]
async fn test_inertia_visit_returns_page_json() {
    let app = common::app(common::builder().build().unwrap());

    let res = app
        .oneshot(common::inertia_get("/").body(common::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(res.headers()["x-inertia"], "true");
    assert_eq!(res.headers()[header::CONTENT_TYPE], "application/json");
    assert_eq!(res.headers().get_all(header::VARY).iter().count(), 1);

    let page = common::body_json(res).await;
    assert_eq!(
        page,
        json!({
            "component": "Home",
            "props": { "appName": "Acme", "greeting": "hello", "errors": {} },
            "url": "/",
            "version": common::version(),
            "encryptHistory": false,
            "clearHistory": false,
        })
    );
}

#[tokio::test]
async fn test_stale_version_forces_full_reload() {
    let app = common::app(common::builder().build().unwrap());

    let req = Request::get("/users?page=2")
        .header(header::HOST, "example.com")
        .header("x-inertia", "true")
        .header("x-inertia-version", "stale")
        .body(common::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(res.headers()["x-inertia-location"], "http://example.com/users?page=2");
    assert_eq!(res.headers()[header::VARY], "X-Inertia");
}

#[tokio::test]
async fn test_missing_version_header_forces_full_reload() {
    let app = common::app(common::builder().build().unwrap());

    let req = Request::get("/")
        .header(header::HOST, "example.com")
        .header("x-inertia", "true")
        .body(common::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(res.headers()["x-inertia-location"], "http://example.com/");
}

#[tokio::test]
async fn test_stale_version_ignored_for_non_get() {
    let app = common::app(common::builder().build().unwrap());

    let req = Request::put("/users/7")
        .header("x-inertia", "true")
        .header("x-inertia-version", "stale")
        .body(common::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_full_load_announces_deferred_and_merge_props() {
    let app = common::app(common::builder().build().unwrap());

    let res = app
        .oneshot(common::inertia_get("/users").body(common::empty()).unwrap())
        .await
        .unwrap();
    let page = common::body_json(res).await;

    assert_eq!(page["component"], "Users/Index");
    assert!(page["props"].get("users").is_none());
    assert!(page["props"].get("stats").is_none());
    assert_eq!(page["props"]["feed"], json!([1, 2]));
    assert_eq!(page["deferredProps"], json!({ "default": ["stats"] }));
    assert_eq!(page["mergeProps"], json!(["feed"]));
}

#[tokio::test]
async fn test_partial_reload_returns_requested_props_only() {
    let app = common::app(common::builder().build().unwrap());

    let req = common::inertia_get("/users")
        .header("x-inertia-partial-component", "Users/Index")
        .header("x-inertia-partial-data", "users,stats")
        .body(common::empty())
        .unwrap();
    let page = common::body_json(app.oneshot(req).await.unwrap()).await;

    assert_eq!(
        page["props"],
        json!({ "users": ["ada", "grace"], "stats": { "total": 2 }, "errors": {} })
    );
    assert!(page.get("deferredProps").is_none());
}

#[tokio::test]
async fn test_partial_reload_except_and_reset() {
    let app = common::app(common::builder().build().unwrap());

    let req = common::inertia_get("/users")
        .header("x-inertia-partial-component", "Users/Index")
        .header("x-inertia-partial-except", "filters,appName")
        .header("x-inertia-reset", "feed")
        .body(common::empty())
        .unwrap();
    let page = common::body_json(app.oneshot(req).await.unwrap()).await;

    assert_eq!(page["props"], json!({ "feed": [1, 2], "errors": {} }));
    assert!(page.get("mergeProps").is_none());
}

#[tokio::test]
async fn test_partial_reload_for_other_component_is_ignored() {
    let app = common::app(common::builder().build().unwrap());

    let req = common::inertia_get("/")
        .header("x-inertia-partial-component", "Users/Index")
        .header("x-inertia-partial-data", "users")
        .body(common::empty())
        .unwrap();
    let page = common::body_json(app.oneshot(req).await.unwrap()).await;

    assert_eq!(page["props"]["greeting"], "hello");
}

#[tokio::test]
async fn test_put_redirect_is_downgraded_to_see_other() {
    let app = common::app(common::builder().build().unwrap());

    let req = Request::put("/users/7")
        .header("x-inertia", "true")
        .body(common::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()[header::LOCATION], "/users");
}

#[tokio::test]
async fn test_handler_302_after_delete_becomes_see_other() {
    let app = common::app(common::builder().build().unwrap());

    let req = Request::delete("/sessions/1")
        .header("x-inertia", "true")
        .body(common::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()[header::LOCATION], "/login");
    assert_eq!(res.headers()[header::VARY], "X-Inertia");
}

#[tokio::test]
async fn test_handler_302_left_alone_for_plain_requests() {
    let app = common::app(common::builder().build().unwrap());

    let req = Request::delete("/sessions/1").body(common::empty()).unwrap();
    let res = app.oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::FOUND);
}

#[tokio::test]
async fn test_empty_response_after_put_redirects_back_with_see_other() {
    let app = common::app(common::builder().build().unwrap());

    let req = Request::put("/ping")
        .header("x-inertia", "true")
        .header(header::REFERER, "/settings")
        .body(common::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()[header::LOCATION], "/settings");
}

#[tokio::test]
async fn test_empty_response_redirects_back() {
    let app = common::app(common::builder().build().unwrap());

    let req = Request::post("/ping")
        .header("x-inertia", "true")
        .header(header::REFERER, "/dashboard")
        .body(common::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers()[header::LOCATION], "/dashboard");
}

#[tokio::test]
async fn test_empty_response_left_alone_for_plain_requests() {
    let app = common::app(common::builder().build().unwrap());

    let req = Request::post("/ping")
        .header(header::REFERER, "/dashboard")
        .body(common::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_external_location_from_inertia_visit() {
    let app = common::app(common::builder().build().unwrap());

    let res = app
        .oneshot(common::inertia_get("/billing").body(common::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(
        res.headers()["x-inertia-location"],
        "https://billing.example.com/portal"
    );
}

#[tokio::test]
async fn test_external_location_from_plain_request() {
    let app = common::app(common::builder().build().unwrap());

    let res = app
        .oneshot(Request::get("/billing").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(
        res.headers()[header::LOCATION],
        "https://billing.example.com/portal"
    );
}

struct PrettyMarshaller;

impl JsonMarshaller for PrettyMarshaller {
    fn marshal(&self, page: &Page) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec_pretty(page)
    }
}

#[tokio::test]
async fn test_custom_json_marshaller_encodes_page() {
    let app = common::app(
        common::builder()
            .json_marshaller(PrettyMarshaller)
            .build()
            .unwrap(),
    );

    let res = app
        .oneshot(common::inertia_get("/").body(common::empty()).unwrap())
        .await
        .unwrap();
    let body = common::body_string(res).await;

    assert!(body.starts_with("{\n  \"component\": \"Home\""));
    let page: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(page["props"]["greeting"], "hello");
}

//! Shared utilities for integration testing.

#![allow(dead_code)]

use axum::body::Body;
use axum::extract::Path;
use axum::http::header::LOCATION;
use axum::http::{Request, StatusCode};
use axum::middleware::from_fn_with_state;
use axum::response::Response;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use inertia_adapter::assets::md5_hex;
use inertia_adapter::{inertia_middleware, Inertia, InertiaBuilder, InertiaRequest, InertiaResult, Prop, Props};

pub const ROOT_TEMPLATE: &str =
    "<html><head>{{{inertiaHead}}}<title>{{title}}</title></head><body>{{{inertia}}}</body></html>";

pub const VERSION_SEED: &str = "1";

/// Builder preloaded with the test template, version and one shared prop.
pub fn builder() -> InertiaBuilder {
    Inertia::builder(ROOT_TEMPLATE)
        .version(VERSION_SEED)
        .share_prop("appName", "Acme")
        .share_template_data("title", "Acme")
}

pub fn version() -> String {
    md5_hex(VERSION_SEED)
}

/// Application router exercising every protocol path.
pub fn app(inertia: Inertia) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/users", get(users_index).post(users_store))
        .route("/users/{id}", put(users_update))
        .route("/billing", get(billing))
        .route("/ping", post(ping).put(ping))
        .route("/sessions/{id}", delete(sessions_destroy))
        .layer(from_fn_with_state(inertia.clone(), inertia_middleware))
        .with_state(inertia)
}

async fn home(inertia: InertiaRequest) -> InertiaResult<Response> {
    inertia
        .render("Home", Props::new().with("greeting", "hello"))
        .await
}

async fn users_index(inertia: InertiaRequest) -> InertiaResult<Response> {
    let props = Props::new()
        .with("filters", json!({ "search": null }))
        .with("users", Prop::optional(|| async { Ok(json!(["ada", "grace"])) }))
        .with("stats", Prop::defer(|| async { Ok(json!({ "total": 2 })) }))
        .with("feed", Prop::value(json!([1, 2])).merge());
    inertia.render("Users/Index", props).await
}

#[derive(Deserialize)]
struct CreateUser {
    #[serde(default)]
    name: String,
}

async fn users_store(inertia: InertiaRequest, Json(form): Json<CreateUser>) -> InertiaResult<Response> {
    if form.name.is_empty() {
        let errors = json!({ "name": "required" }).as_object().cloned().unwrap();
        return inertia.with_errors(errors).back();
    }
    inertia.redirect("/users")
}

async fn users_update(inertia: InertiaRequest, Path(_id): Path<u64>) -> InertiaResult<Response> {
    inertia.redirect("/users")
}

async fn billing(inertia: InertiaRequest) -> Response {
    inertia.location("https://billing.example.com/portal")
}

async fn ping() {}

/// Plain 302 that bypasses `Inertia::redirect`.
async fn sessions_destroy() -> (StatusCode, [(axum::http::HeaderName, &'static str); 1]) {
    (StatusCode::FOUND, [(LOCATION, "/login")])
}

/// GET request as sent by the Inertia client router.
pub fn inertia_get(uri: &str) -> axum::http::request::Builder {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("x-inertia", "true")
        .header("x-inertia-version", version())
}

pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> Value {
    assert_eq!(response.status(), StatusCode::OK);
    serde_json::from_str(&body_string(response).await).unwrap()
}

pub fn empty() -> Body {
    Body::empty()
}

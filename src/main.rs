//! Inertia adapter demo server.
//!
//! # Architecture Overview
//!
//! ```text
//!   Browser ──▶ TraceLayer ─▶ request id ─▶ timeout ─▶ inertia_middleware ─▶ handler
//!                                                      │                     │
//!                                                      │ 409 on stale        │ InertiaRequest
//!                                                      │ asset version       │  .render / .back
//!                                                      ▼                     ▼
//!                                                 303 fixups,          JSON page (XHR)
//!                                                 Vary: X-Inertia      HTML shell (first load)
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Request, State};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::{from_fn_with_state, Next};
use axum::response::Response;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use clap::Parser;
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use inertia_adapter::config::{load_config, InertiaConfig};
use inertia_adapter::observability::{logging, metrics};
use inertia_adapter::{inertia_middleware, Inertia, InertiaRequest, InertiaResult, Prop, Props};

#[derive(Parser)]
#[command(name = "inertia-demo")]
#[command(about = "Demo application served through the Inertia adapter", long_about = None)]
struct Cli {
    /// Path to a TOML config file; defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => InertiaConfig::default(),
    };

    logging::init_logging(&config.observability.log_level);
    tracing::info!("inertia-demo v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.server.bind_address,
        root_template = %config.inertia.root_template,
        ssr_enabled = config.ssr.enabled,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let inertia = Inertia::from_config(&config)?;
    let app = build_router(&config, inertia);

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn build_router(config: &InertiaConfig, inertia: Inertia) -> Router {
    let mut router = Router::new()
        .route("/", get(home))
        .route("/users", get(users_index).post(users_store))
        .route("/users/{id}", put(users_update))
        .route("/billing", get(billing))
        .route("/ping", post(ping))
        .layer(from_fn_with_state(inertia.clone(), inertia_middleware))
        .with_state(inertia);

    if config.flash.enabled {
        let cookie_name: Arc<str> = Arc::from(config.flash.cookie_name.as_str());
        router = router.layer(from_fn_with_state(cookie_name, issue_session));
    }

    router
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.server.request_timeout_secs),
        ))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

async fn home(inertia: InertiaRequest) -> InertiaResult<Response> {
    inertia
        .render("Home", Props::new().with("greeting", "Hello from Rust"))
        .await
}

async fn users_index(inertia: InertiaRequest) -> InertiaResult<Response> {
    let props = Props::new()
        .with("filters", json!({ "search": null }))
        .with(
            "users",
            Prop::lazy(|| async { Ok(json!([{ "id": 1, "name": "Ada" }, { "id": 2, "name": "Grace" }])) }),
        )
        .with(
            "stats",
            Prop::defer(|| async { Ok(json!({ "total": 2 })) }).group("sidebar"),
        )
        .with("feed", Prop::value(json!([{ "id": 10, "event": "signup" }])).merge());

    inertia.render("Users/Index", props).await
}

#[derive(Debug, Deserialize)]
struct CreateUser {
    #[serde(default)]
    name: String,
}

async fn users_store(inertia: InertiaRequest, Json(form): Json<CreateUser>) -> InertiaResult<Response> {
    if form.name.trim().is_empty() {
        let errors = json!({ "name": "The name field is required." });
        let errors = errors.as_object().cloned().unwrap_or_default();
        return inertia.with_errors(errors).back();
    }

    tracing::info!(name = %form.name, "User created");
    inertia.redirect("/users")
}

async fn users_update(inertia: InertiaRequest, Path(id): Path<u64>) -> InertiaResult<Response> {
    tracing::info!(user_id = id, "User updated");
    inertia.redirect("/users")
}

async fn billing(inertia: InertiaRequest) -> Response {
    inertia.location("https://billing.example.com/portal")
}

async fn ping() {}

/// Give cookieless visitors a flash session, reusing the request id as its value.
async fn issue_session(
    State(cookie_name): State<Arc<str>>,
    mut request: Request,
    next: Next,
) -> Response {
    let has_session = request
        .headers()
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .any(|(name, _)| name == &*cookie_name);
    if has_session {
        return next.run(request).await;
    }

    let session_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let Some(session_id) = session_id else {
        return next.run(request).await;
    };

    let cookie = format!("{}={}", cookie_name, session_id);
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        request.headers_mut().append(COOKIE, value);
    }

    let mut response = next.run(request).await;
    match HeaderValue::from_str(&format!("{}; Path=/; HttpOnly; SameSite=Lax", cookie)) {
        Ok(value) => {
            response.headers_mut().append(SET_COOKIE, value);
        }
        Err(e) => tracing::warn!(error = %e, "Failed to issue session cookie"),
    }
    response
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

use std::net::SocketAddr;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::{routing::get, Router};
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultOnRequest, TraceLayer};

use crate::state::{AuthState, ResourceState};
use crate::{auth, resource};

type MakeHttpSpan = fn(&Request<Body>) -> tracing::Span;
type OnHttpResponse = fn(&Response<Body>, Duration, &tracing::Span);

fn make_http_span(req: &Request<Body>) -> tracing::Span {
    let method = req.method().clone();
    let uri = req.uri().clone();
    tracing::info_span!("http_request", %method, uri = %uri)
}

fn on_http_response(res: &Response<Body>, _latency: Duration, span: &tracing::Span) {
    let status = res.status();
    span.record("status", tracing::field::display(status));
    if status.is_server_error() {
        tracing::error!(%status, "response");
    } else {
        tracing::info!(%status, "response");
    }
}

fn trace_layer(
) -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, MakeHttpSpan, DefaultOnRequest, OnHttpResponse>
{
    TraceLayer::new_for_http()
        .make_span_with(make_http_span as MakeHttpSpan)
        .on_response(on_http_response as OnHttpResponse)
}

pub fn build_auth_app(state: AuthState) -> Router {
    Router::new()
        .nest(
            "/api/v1",
            Router::new()
                .merge(auth::router())
                .route("/status", get(|| async { "ok" })),
        )
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(trace_layer())
}

pub fn build_resource_app(state: ResourceState) -> Router {
    Router::new()
        .nest(
            "/api/v1",
            Router::new()
                .merge(resource::router())
                .route("/status", get(|| async { "ok" })),
        )
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(trace_layer())
}

pub fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "authgate=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}

pub async fn serve(app: Router, default_port: &str) -> anyhow::Result<()> {
    let addr: SocketAddr = format!(
        "{}:{}",
        std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
        std::env::var("APP_PORT").unwrap_or_else(|_| default_port.into())
    )
    .parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::orbit::ElementConverter;
use crate::stream::StreamBridge;
use crate::trajectory::LogFile;

use super::api::error::not_found;
use super::api::poll as poll_handlers;
use super::api::stream as stream_handlers;
use super::api_doc::ApiDoc;
use super::config::Config;
use super::state::{PollState, StreamState};

/// Radius and speed of the circular orbit logged as a start-up check.
const REFERENCE_STATE: [f64; 6] = [7000.0, 0.0, 0.0, 0.0, 7.5, 0.0];

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn poll_router(state: PollState) -> Router {
    Router::new()
        .route("/gmat-data", get(poll_handlers::gmat_data))
        .route("/control", get(poll_handlers::control))
        .route("/status", get(poll_handlers::status))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .fallback(not_found)
        // Middleware
        .layer(cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub fn stream_router(state: StreamState) -> Router {
    Router::new()
        .route("/", get(stream_handlers::subscribe))
        .route("/status", get(stream_handlers::status))
        .fallback(not_found)
        .layer(cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_poll_server(config: Config) -> std::io::Result<()> {
    let bind_addr = config.poll.bind.clone();
    let app = poll_router(PollState::new(&config));

    log::info!("Starting poll bridge on http://{}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await
}

pub async fn run_stream_server(config: Config) -> std::io::Result<()> {
    let bind_addr = config.stream.bind.clone();
    let converter = config.converter();
    log_reference_orbit(&converter);

    let source = LogFile::new(&config.stream.trajectory_file);
    log::info!("Streaming trajectory log {}", source.path().display());
    let bridge = StreamBridge::new(Arc::new(source), converter, config.stream_settings());
    let initial = bridge.trajectory();
    log::info!("{} samples available from {}", initial.len(), initial.origin());
    let app = stream_router(StreamState { bridge });

    log::info!("Starting stream bridge on ws://{}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await
}

fn log_reference_orbit(converter: &ElementConverter) {
    match converter.convert(&REFERENCE_STATE) {
        Some(el) => log::info!(
            "Reference orbit: a={:.2} km e={:.6} i={:.2} raan={:.2} argp={:.2} M0={:.2}",
            el.a,
            el.e,
            el.i,
            el.raan,
            el.argp,
            el.m0
        ),
        None => log::warn!("Reference orbit could not be converted"),
    }
}

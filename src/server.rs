//! HTTP front-end.
//!
//! Exposes the prediction service over `POST /predict` plus a `GET /health`
//! liveness check. The router is built separately from the listener so tests can
//! drive it in-process.

pub mod error;
pub mod handlers;
pub mod models;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use log::info;
use tower_http::cors::{Any, CorsLayer};

use crate::config::ServerConfig;
use crate::error::Result;
use crate::service::PredictionService;

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub service: PredictionService,
}

impl AppState {
    pub fn new(service: PredictionService) -> Self {
        Self { service }
    }
}

/// Build the application router.
pub fn router(service: PredictionService) -> Router {
    let state = Arc::new(AppState::new(service));

    // the front-end may be served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/predict", post(handlers::predict))
        .layer(cors)
        .with_state(state)
}

/// Bind `config` and serve until the process is stopped.
pub async fn serve(config: &ServerConfig, service: PredictionService) -> Result<()> {
    let app = router(service);
    let address = config.bind_address();

    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

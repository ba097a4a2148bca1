//! HTTP API boundary.
//!
//! Thin axum layer over the analysis adapter and publish orchestrator;
//! all responses allow cross-origin access (the CORS layer also answers
//! OPTIONS preflights).

pub mod error;
pub mod handlers;

pub use error::{ApiError, ApiResult};

use crate::analysis::AnalysisAdapter;
use crate::config::{ConfigError, PageliftConfig};
use crate::publish::PublishOrchestrator;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across all API handlers
#[derive(Clone)]
pub struct AppState {
    pub adapter: Arc<AnalysisAdapter>,
    pub orchestrator: Arc<PublishOrchestrator>,
    pub environment: String,
}

impl AppState {
    pub fn new(
        adapter: AnalysisAdapter,
        orchestrator: PublishOrchestrator,
        environment: impl Into<String>,
    ) -> Self {
        Self {
            adapter: Arc::new(adapter),
            orchestrator: Arc::new(orchestrator),
            environment: environment.into(),
        }
    }

    pub fn from_config(config: &PageliftConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            config.create_adapter()?,
            config.create_orchestrator()?,
            config.environment.clone(),
        ))
    }
}

/// API routes
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/analyze-image", post(handlers::analyze_image))
        .route("/api/publish", post(handlers::publish))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds and serves the API until the process is stopped.
pub async fn serve(state: AppState, bind: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!(addr = %listener.local_addr()?, "API server listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

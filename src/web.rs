use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;

use crate::api::{self, AppState};
use crate::config::SkyRouteConfig;

/// Full application: API routes under `/api` with CORS and a request timeout
pub fn app(state: AppState, request_timeout: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api::router(state))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(cors)
}

pub async fn run(config: &SkyRouteConfig) -> Result<()> {
    let state = AppState::from_config(config).context("Failed to set up providers")?;

    // One parallel geocoding round plus one parallel batch of weather calls
    let request_timeout = Duration::from_secs(u64::from(config.providers.timeout_seconds) * 3);
    let app = app(state, request_timeout);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://{}", addr);
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

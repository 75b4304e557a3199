//! Server startup.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{handler, signal::shutdown_signal, state::AppState};
use crate::{config::AppConfig, infrastructure::weather::AmapWeatherClient};

/// Errors that stop the server
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Startup options
#[derive(Debug, Clone)]
pub struct ServerOptions {
    pub host: String,
    pub port: u16,
    pub config: AppConfig,
}

/// Build the application router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let proxy = Router::new()
        .route("/proxy", get(handler::proxy_stream))
        .route("/proxy/health", get(handler::proxy_health))
        .layer(CorsLayer::permissive());

    Router::new()
        .route("/ws", get(handler::websocket_handler))
        .route("/check_username", post(handler::check_username))
        .route("/api/health", get(handler::health_check))
        .route("/api/users", get(handler::list_users))
        .merge(proxy)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the server until a shutdown signal arrives.
pub async fn run(options: ServerOptions) -> Result<(), ServerError> {
    let weather = Arc::new(AmapWeatherClient::new(&options.config.weather)?);
    if options.config.weather.api_key.is_empty() {
        tracing::warn!("No weather API key configured; weather queries will fail");
    }
    let state = Arc::new(AppState::new(&options.config, weather)?);

    let listener = TcpListener::bind((options.host.as_str(), options.port)).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

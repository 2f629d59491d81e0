//! HTTP server wiring: router, CORS, request tracing.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::conversation::ConversationManager;
use crate::handlers;
use clipchat_transcript::TranscriptFetcher;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Shared application state.
///
/// One instance of each external dependency for the whole process; handlers
/// never construct their own.
pub struct AppState {
    pub fetcher: Arc<TranscriptFetcher>,
    pub conversations: Arc<ConversationManager>,
}

/// Run the HTTP server until shutdown
pub async fn run_server(config: ServerConfig, state: AppState) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid bind address: {}", e))?;

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("clipchat server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the router. The extension calls from arbitrary page origins, so the
/// CORS policy stays fully permissive.
pub fn create_router(state: AppState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/transcript", post(handlers::transcript::transcript_handler))
        .route("/api/chat", post(handlers::chat::chat_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

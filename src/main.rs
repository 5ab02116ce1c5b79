//! arena-gateway server entry point.
//!
//! Starts the Axum HTTP server with the tournament REST endpoints.

use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use arena_gateway::api;
use arena_gateway::app_state::AppState;
use arena_gateway::commentary::CommentaryClient;
use arena_gateway::config::GatewayConfig;
use arena_gateway::domain::TournamentRegistry;
use arena_gateway::service::{StatsService, TournamentService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = GatewayConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting arena-gateway");

    // Build domain layer
    let registry = Arc::new(TournamentRegistry::new());

    // Build service layer
    let tournament_service = Arc::new(TournamentService::new(Arc::clone(&registry)));
    let stats_service = Arc::new(StatsService::new(Arc::clone(&registry)));
    let commentary = Arc::new(CommentaryClient::new(config.commentary.clone()));

    // Build application state
    let app_state = AppState {
        tournament_service,
        stats_service,
        commentary,
    };

    // Build router
    let app = api::build_router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

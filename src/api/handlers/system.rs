//! System endpoints: health check and bracket size catalog.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::domain::BracketSize;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// Supported bracket size info.
#[derive(Debug, Serialize, ToSchema)]
struct BracketSizeInfo {
    prelim_match_count: u32,
    fighter_cap: u32,
    total_matches: u32,
    rounds: u32,
}

/// `GET /config/bracket-sizes` — List supported bracket sizes.
#[utoipa::path(
    get,
    path = "/config/bracket-sizes",
    tag = "System",
    summary = "List supported bracket sizes",
    description = "Returns the bracket geometry for every preliminary match count the gateway accepts.",
    responses(
        (status = 200, description = "Bracket size catalog", body = Vec<BracketSizeInfo>),
    )
)]
pub async fn bracket_sizes_handler() -> impl IntoResponse {
    let sizes: Vec<BracketSizeInfo> = [BracketSize::Four, BracketSize::Eight, BracketSize::Sixteen]
        .iter()
        .map(|size| BracketSizeInfo {
            prelim_match_count: size.prelim_matches(),
            fighter_cap: size.fighter_cap(),
            total_matches: size.total_matches(),
            rounds: size.round_count(),
        })
        .collect();
    (StatusCode::OK, Json(sizes))
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/bracket-sizes", get(bracket_sizes_handler))
}

//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::commentary::CommentaryClient;
use crate::service::{StatsService, TournamentService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Tournament service for bracket lifecycle operations.
    pub tournament_service: Arc<TournamentService>,
    /// Statistics engine reading the decision history.
    pub stats_service: Arc<StatsService>,
    /// Narrative-generation collaborator client.
    pub commentary: Arc<CommentaryClient>,
}

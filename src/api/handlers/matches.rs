//! Match handlers: record a result, undo it, stats, and commentary.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{CommentaryResponse, RecordResultRequest, RecordResultResponse};
use crate::app_state::AppState;
use crate::domain::{MatchId, TournamentStatus};
use crate::error::{ArenaError, ErrorResponse};
use crate::service::MatchStatsBundle;

/// `POST /matches/:id/result` — Record the match outcome.
///
/// # Errors
///
/// Returns [`ArenaError::Conflict`] if the match already has a winner,
/// [`ArenaError::Unresolvable`] if an upstream match is incomplete, and
/// [`ArenaError::Validation`] if the winner is not a participant.
#[utoipa::path(
    post,
    path = "/api/v1/matches/{id}/result",
    tag = "Matches",
    summary = "Record a match result",
    description = "Sets the winner, appends the decision to the history, and completes the tournament if this was the last open match. Exactly-once: a second submission is rejected with a conflict.",
    params(
        ("id" = uuid::Uuid, Path, description = "Match UUID"),
    ),
    request_body = RecordResultRequest,
    responses(
        (status = 200, description = "Result recorded", body = RecordResultResponse),
        (status = 400, description = "Winner is not a participant", body = ErrorResponse),
        (status = 404, description = "Match not found", body = ErrorResponse),
        (status = 409, description = "Match already has a winner", body = ErrorResponse),
        (status = 422, description = "Participants not resolvable yet", body = ErrorResponse),
    )
)]
pub async fn record_result(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<RecordResultRequest>,
) -> Result<impl IntoResponse, ArenaError> {
    let decision = state
        .tournament_service
        .record_result(MatchId::from_uuid(id), req.winner_fighter_id)
        .await?;
    let snapshot = state
        .tournament_service
        .get_tournament(decision.tournament_id)
        .await?;

    Ok(Json(RecordResultResponse {
        winner_fighter_id: decision.winner.fighter_id,
        loser_fighter_id: decision.loser.fighter_id,
        tournament_completed: snapshot.tournament.status == TournamentStatus::Completed,
    }))
}

/// `POST /matches/:id/undo` — Revert a recorded result.
///
/// # Errors
///
/// Returns [`ArenaError::DecisionNotFound`] if no decision exists and
/// [`ArenaError::Conflict`] when a dependent match already resolved using
/// this result, or when the tournament is completed.
#[utoipa::path(
    post,
    path = "/api/v1/matches/{id}/undo",
    tag = "Matches",
    summary = "Undo a match result",
    description = "Deletes the decision and clears the winner, returning the match to unresolved. Blocked when a downstream match already resolved using this result, and blocked entirely once the tournament is completed.",
    params(
        ("id" = uuid::Uuid, Path, description = "Match UUID"),
    ),
    responses(
        (status = 204, description = "Result undone"),
        (status = 404, description = "Match or decision not found", body = ErrorResponse),
        (status = 409, description = "Undo blocked by a dependent result", body = ErrorResponse),
    )
)]
pub async fn undo_result(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, ArenaError> {
    state
        .tournament_service
        .undo_result(MatchId::from_uuid(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /matches/:id/stats` — Win-rate bundle for a match.
///
/// # Errors
///
/// Returns [`ArenaError::Unresolvable`] when either participant cannot be
/// resolved yet.
#[utoipa::path(
    get,
    path = "/api/v1/matches/{id}/stats",
    tag = "Matches",
    summary = "Match statistics",
    description = "Six overall win rates (user, fighter instance, character for each side) and three head-to-head pairs, plus both fighters' display identities. Identities with no history read 50.",
    params(
        ("id" = uuid::Uuid, Path, description = "Match UUID"),
    ),
    responses(
        (status = 200, description = "Stat bundle", body = MatchStatsBundle),
        (status = 404, description = "Match not found", body = ErrorResponse),
        (status = 422, description = "Participants not resolvable yet", body = ErrorResponse),
    )
)]
pub async fn match_stats(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, ArenaError> {
    let bundle = state.stats_service.compute_stats(MatchId::from_uuid(id)).await?;
    Ok(Json(bundle))
}

/// `POST /matches/:id/commentary` — Hype line for an upcoming match.
///
/// The narrative collaborator's failure never fails this request: the
/// response degrades to a fixed fallback line.
///
/// # Errors
///
/// Returns [`ArenaError::Unresolvable`] when either participant cannot be
/// resolved yet.
#[utoipa::path(
    post,
    path = "/api/v1/matches/{id}/commentary",
    tag = "Matches",
    summary = "Generate match commentary",
    description = "Computes the stat bundle and asks the narrative collaborator for a short hype line. Collaborator failures degrade to a fallback line instead of failing the request.",
    params(
        ("id" = uuid::Uuid, Path, description = "Match UUID"),
    ),
    responses(
        (status = 200, description = "Commentary text", body = CommentaryResponse),
        (status = 404, description = "Match not found", body = ErrorResponse),
        (status = 422, description = "Participants not resolvable yet", body = ErrorResponse),
    )
)]
pub async fn match_commentary(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, ArenaError> {
    let bundle = state.stats_service.compute_stats(MatchId::from_uuid(id)).await?;
    let commentary = state.commentary.hype(&bundle).await;
    Ok(Json(CommentaryResponse { commentary }))
}

/// Match routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/matches/{id}/result", post(record_result))
        .route("/matches/{id}/undo", post(undo_result))
        .route("/matches/{id}/stats", get(match_stats))
        .route("/matches/{id}/commentary", post(match_commentary))
}

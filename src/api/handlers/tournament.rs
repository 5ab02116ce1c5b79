//! Tournament handlers: create, list, get, join, next playable match.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    CreateTournamentRequest, CreateTournamentResponse, JoinResponse, ListTournamentsParams,
    NextMatchResponse, PlayableMatchDto, TournamentDetailResponse, TournamentListResponse,
};
use crate::app_state::AppState;
use crate::domain::{TournamentId, TournamentStatus};
use crate::error::{ArenaError, ErrorResponse};
use crate::service::JoinSpec;

/// `POST /tournaments` — Create a single-elimination tournament.
///
/// # Errors
///
/// Returns [`ArenaError`] for a prelim count outside {4, 8, 16} or any
/// elimination mode other than `single`.
#[utoipa::path(
    post,
    path = "/api/v1/tournaments",
    tag = "Tournaments",
    summary = "Create a tournament",
    description = "Creates a pending tournament. The roster capacity is twice the preliminary match count; the bracket is built automatically by the join that fills the last slot.",
    request_body = CreateTournamentRequest,
    responses(
        (status = 201, description = "Tournament created", body = CreateTournamentResponse),
        (status = 400, description = "Invalid bracket size or elimination mode", body = ErrorResponse),
    )
)]
pub async fn create_tournament(
    State(state): State<AppState>,
    Json(req): Json<CreateTournamentRequest>,
) -> Result<impl IntoResponse, ArenaError> {
    let mode = req.elimination_mode.parse()?;
    let tournament = state
        .tournament_service
        .create_tournament(req.game_id, req.owner_id, req.prelim_match_count, mode)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateTournamentResponse { tournament }),
    ))
}

/// `GET /tournaments` — List tournaments, optionally filtered by status.
///
/// # Errors
///
/// Returns [`ArenaError::Validation`] for an unknown status value.
#[utoipa::path(
    get,
    path = "/api/v1/tournaments",
    tag = "Tournaments",
    summary = "List tournaments",
    description = "Returns all tournaments, newest first, optionally filtered by lifecycle status.",
    params(ListTournamentsParams),
    responses(
        (status = 200, description = "Tournament list", body = TournamentListResponse),
        (status = 400, description = "Invalid status filter", body = ErrorResponse),
    )
)]
pub async fn list_tournaments(
    State(state): State<AppState>,
    Query(params): Query<ListTournamentsParams>,
) -> Result<impl IntoResponse, ArenaError> {
    let status = params
        .status
        .as_deref()
        .map(str::parse::<TournamentStatus>)
        .transpose()?;
    let data = state.tournament_service.list_tournaments(status).await;
    Ok(Json(TournamentListResponse { data }))
}

/// `GET /tournaments/:id` — Tournament detail with roster and bracket.
///
/// # Errors
///
/// Returns [`ArenaError::TournamentNotFound`] for an unknown id.
#[utoipa::path(
    get,
    path = "/api/v1/tournaments/{id}",
    tag = "Tournaments",
    summary = "Get tournament detail",
    description = "Returns the tournament record, its fighters in seed order, and its matches in (round, index) order.",
    params(
        ("id" = uuid::Uuid, Path, description = "Tournament UUID"),
    ),
    responses(
        (status = 200, description = "Tournament detail", body = TournamentDetailResponse),
        (status = 404, description = "Tournament not found", body = ErrorResponse),
    )
)]
pub async fn get_tournament(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, ArenaError> {
    let snapshot = state
        .tournament_service
        .get_tournament(TournamentId::from_uuid(id))
        .await?;

    Ok(Json(TournamentDetailResponse {
        tournament: snapshot.tournament,
        fighters: snapshot.fighters,
        matches: snapshot.matches,
    }))
}

/// `POST /tournaments/:id/join` — Join a pending tournament.
///
/// # Errors
///
/// Returns [`ArenaError::Conflict`] when the tournament already started or
/// the roster is full.
#[utoipa::path(
    post,
    path = "/api/v1/tournaments/{id}/join",
    tag = "Tournaments",
    summary = "Join a tournament",
    description = "Assigns the next seed by join order. The join that fills the last slot atomically builds the bracket and moves the tournament to in_progress.",
    params(
        ("id" = uuid::Uuid, Path, description = "Tournament UUID"),
    ),
    request_body = JoinSpec,
    responses(
        (status = 201, description = "Fighter seeded", body = JoinResponse),
        (status = 404, description = "Tournament not found", body = ErrorResponse),
        (status = 409, description = "Tournament full or already started", body = ErrorResponse),
    )
)]
pub async fn join_tournament(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    Json(spec): Json<JoinSpec>,
) -> Result<impl IntoResponse, ArenaError> {
    let tournament_id = TournamentId::from_uuid(id);
    let fighter = state.tournament_service.join(tournament_id, spec).await?;
    let snapshot = state.tournament_service.get_tournament(tournament_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(JoinResponse {
            fighter_id: fighter.id,
            seed_index: fighter.seed_index,
            tournament_started: snapshot.tournament.status != TournamentStatus::Pending,
        }),
    ))
}

/// `GET /tournaments/:id/next-match` — Next playable match.
///
/// # Errors
///
/// Returns [`ArenaError::TournamentNotFound`] for an unknown id.
#[utoipa::path(
    get,
    path = "/api/v1/tournaments/{id}/next-match",
    tag = "Tournaments",
    summary = "Next playable match",
    description = "Returns the open match with the smallest (round, index), with whatever participants resolve so far. An absent fighter means an upstream match is still open. `next` is null once every match is decided.",
    params(
        ("id" = uuid::Uuid, Path, description = "Tournament UUID"),
    ),
    responses(
        (status = 200, description = "Next match, or null if none remain", body = NextMatchResponse),
        (status = 404, description = "Tournament not found", body = ErrorResponse),
    )
)]
pub async fn next_match(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, ArenaError> {
    let playable = state
        .tournament_service
        .next_playable_match(TournamentId::from_uuid(id))
        .await?;

    Ok(Json(NextMatchResponse {
        next: playable.map(|p| PlayableMatchDto {
            node: p.node,
            fighter_a: p.fighter_a,
            fighter_b: p.fighter_b,
        }),
    }))
}

/// Tournament routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tournaments", post(create_tournament).get(list_tournaments))
        .route("/tournaments/{id}", get(get_tournament))
        .route("/tournaments/{id}/join", post(join_tournament))
        .route("/tournaments/{id}/next-match", get(next_match))
}

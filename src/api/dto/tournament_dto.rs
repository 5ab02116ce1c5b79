//! Tournament-related DTOs for create, get, list, and join operations.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Fighter, FighterId, GameId, MatchNode, Tournament, UserId};

/// Request body for `POST /tournaments`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTournamentRequest {
    /// Game the tournament is played in (external catalog reference).
    pub game_id: GameId,
    /// Creating user (supplied by the external auth layer).
    pub owner_id: UserId,
    /// Number of preliminary matches. Must be 4, 8 or 16; roster capacity
    /// is twice this value.
    pub prelim_match_count: u32,
    /// Elimination mode. Only `"single"` is accepted.
    pub elimination_mode: String,
}

/// Response body for `POST /tournaments` (201 Created).
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateTournamentResponse {
    /// The created tournament.
    pub tournament: Tournament,
}

/// Query parameters for `GET /tournaments`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListTournamentsParams {
    /// Optional status filter: `pending`, `in_progress`, or `completed`.
    #[serde(default)]
    pub status: Option<String>,
}

/// Response body for `GET /tournaments`.
#[derive(Debug, Serialize, ToSchema)]
pub struct TournamentListResponse {
    /// Tournaments, newest first.
    pub data: Vec<Tournament>,
}

/// Full tournament detail for `GET /tournaments/:id`.
#[derive(Debug, Serialize, ToSchema)]
pub struct TournamentDetailResponse {
    /// The tournament record.
    pub tournament: Tournament,
    /// Fighters in seed order.
    pub fighters: Vec<Fighter>,
    /// Matches in `(round_number, match_index)` order; empty while the
    /// roster is still filling.
    pub matches: Vec<MatchNode>,
}

/// Response body for `POST /tournaments/:id/join`.
#[derive(Debug, Serialize, ToSchema)]
pub struct JoinResponse {
    /// The created fighter.
    pub fighter_id: FighterId,
    /// Seed assigned by join order.
    pub seed_index: u32,
    /// Whether this join filled the roster and started the tournament.
    pub tournament_started: bool,
}

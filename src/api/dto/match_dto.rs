//! Match-related DTOs: next playable match, results, undo, commentary.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Fighter, FighterId, MatchNode};

/// A playable match with whatever participants resolve so far.
///
/// An absent fighter means the corresponding ancestor chain is incomplete
/// ("not ready"), never an error.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlayableMatchDto {
    /// The match node.
    #[serde(rename = "match")]
    pub node: MatchNode,
    /// Slot A participant, if resolvable.
    pub fighter_a: Option<Fighter>,
    /// Slot B participant, if resolvable.
    pub fighter_b: Option<Fighter>,
}

/// Response body for `GET /tournaments/:id/next-match`.
///
/// `next` is `null` once every match in the tournament is decided.
#[derive(Debug, Serialize, ToSchema)]
pub struct NextMatchResponse {
    /// The next playable match, if any remains.
    pub next: Option<PlayableMatchDto>,
}

/// Request body for `POST /matches/:id/result`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RecordResultRequest {
    /// The fighter that won the match. Must be one of the match's two
    /// resolved participants.
    pub winner_fighter_id: FighterId,
}

/// Response body for `POST /matches/:id/result`.
#[derive(Debug, Serialize, ToSchema)]
pub struct RecordResultResponse {
    /// Winning fighter.
    pub winner_fighter_id: FighterId,
    /// Losing fighter.
    pub loser_fighter_id: FighterId,
    /// Whether this result completed the tournament.
    pub tournament_completed: bool,
}

/// Response body for `POST /matches/:id/commentary`.
#[derive(Debug, Serialize, ToSchema)]
pub struct CommentaryResponse {
    /// Hype line from the narrative collaborator, or the fallback line if
    /// the collaborator is unavailable.
    pub commentary: String,
}

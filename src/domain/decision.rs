//! Decision: the immutable record of one match's outcome.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::fighter::Fighter;
use super::ids::{CharacterId, DecisionId, FighterId, MatchId, TournamentId, UserId};

/// Identity triple of one side of a decision.
///
/// Captures the fighter at all three statistics granularities: the fighter
/// instance, the owning user, and the selected character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Combatant {
    /// Fighter instance.
    pub fighter_id: FighterId,
    /// Owning user.
    pub user_id: UserId,
    /// Selected character.
    pub character_id: CharacterId,
}

impl From<&Fighter> for Combatant {
    fn from(fighter: &Fighter) -> Self {
        Self {
            fighter_id: fighter.id,
            user_id: fighter.user_id,
            character_id: fighter.character_id,
        }
    }
}

/// Recorded outcome of one match.
///
/// Append-only history: a decision is written exactly once when a result is
/// recorded and removed only by an explicit undo. At most one decision
/// exists per match at any time. The statistics engine reads decisions
/// across all tournaments.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Decision {
    /// Unique decision identifier.
    pub id: DecisionId,
    /// Match this decision belongs to.
    pub match_id: MatchId,
    /// Tournament the match belongs to.
    pub tournament_id: TournamentId,
    /// Winning side identities.
    pub winner: Combatant,
    /// Losing side identities.
    pub loser: Combatant,
    /// When the result was recorded.
    pub recorded_at: DateTime<Utc>,
}

impl Decision {
    /// Creates a decision for the given match and resolved winner/loser.
    #[must_use]
    pub fn new(match_id: MatchId, tournament_id: TournamentId, winner: &Fighter, loser: &Fighter) -> Self {
        Self {
            id: DecisionId::new(),
            match_id,
            tournament_id,
            winner: Combatant::from(winner),
            loser: Combatant::from(loser),
            recorded_at: Utc::now(),
        }
    }
}

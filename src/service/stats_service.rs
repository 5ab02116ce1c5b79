//! Statistics engine: win-rate aggregation over the decision history.
//!
//! Rates are computed at three identity granularities — owning user,
//! fighter instance, and character — at two scopes: overall and
//! head-to-head against the specific opponent. All figures are numeric
//! percentages; the narrative-generation collaborator receives them as
//! numbers, never as pre-rendered strings.

use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Combatant, Decision, Fighter, MatchId, TournamentRegistry};
use crate::error::ArenaError;

/// Rate reported for an identity with no recorded history. A default, not
/// an error: a debut fighter is an even bet.
const NO_HISTORY_RATE: f64 = 50.0;

/// Display identity of one side of a match.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FighterCard {
    /// User's display name.
    pub display_name: String,
    /// Selected character's name.
    pub character_name: String,
}

impl From<&Fighter> for FighterCard {
    fn from(fighter: &Fighter) -> Self {
        Self {
            display_name: fighter.display_name.clone(),
            character_name: fighter.character_name.clone(),
        }
    }
}

/// Win-rate figures for one upcoming match.
///
/// Six overall rates (both sides at each granularity) and three
/// head-to-head pairs. Every head-to-head pair sums to 100 when the pair
/// has history, and reads 50/50 otherwise.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MatchStats {
    /// Side A user's overall win rate.
    pub user_overall_a: f64,
    /// Side B user's overall win rate.
    pub user_overall_b: f64,
    /// Side A fighter instance's overall win rate.
    pub fighter_overall_a: f64,
    /// Side B fighter instance's overall win rate.
    pub fighter_overall_b: f64,
    /// Side A character's overall win rate.
    pub character_overall_a: f64,
    /// Side B character's overall win rate.
    pub character_overall_b: f64,
    /// User vs user head-to-head, side A's share.
    pub user_head_to_head_a: f64,
    /// User vs user head-to-head, side B's share.
    pub user_head_to_head_b: f64,
    /// Fighter vs fighter head-to-head, side A's share.
    pub fighter_head_to_head_a: f64,
    /// Fighter vs fighter head-to-head, side B's share.
    pub fighter_head_to_head_b: f64,
    /// Character vs character head-to-head, side A's share.
    pub character_head_to_head_a: f64,
    /// Character vs character head-to-head, side B's share.
    pub character_head_to_head_b: f64,
}

/// The full payload handed to the narrative-generation collaborator.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MatchStatsBundle {
    /// Side A display identity.
    pub fighter_a: FighterCard,
    /// Side B display identity.
    pub fighter_b: FighterCard,
    /// Win-rate figures.
    pub stats: MatchStats,
}

/// Identity granularity a rate is computed at.
#[derive(Debug, Clone, Copy)]
enum Granularity {
    User,
    FighterInstance,
    Character,
}

impl Granularity {
    fn key(self, side: &Combatant) -> uuid::Uuid {
        match self {
            Self::User => *side.user_id.as_uuid(),
            Self::FighterInstance => *side.fighter_id.as_uuid(),
            Self::Character => *side.character_id.as_uuid(),
        }
    }
}

/// Read-side aggregation over the registry's decision history.
///
/// Independent of the bracket builder and resolver: it only consumes the
/// immutable decisions the result recorder appends.
#[derive(Debug, Clone)]
pub struct StatsService {
    registry: Arc<TournamentRegistry>,
}

impl StatsService {
    /// Creates a new `StatsService`.
    #[must_use]
    pub fn new(registry: Arc<TournamentRegistry>) -> Self {
        Self { registry }
    }

    /// Computes the stat bundle for a match's two participants.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::MatchNotFound`] for an unknown match id and
    /// [`ArenaError::Unresolvable`] when either participant cannot be
    /// resolved yet.
    pub async fn compute_stats(&self, match_id: MatchId) -> Result<MatchStatsBundle, ArenaError> {
        let entry_lock = self.registry.get_by_match(match_id).await?;
        let (side_a, side_b, card_a, card_b) = {
            let entry = entry_lock.read().await;
            let node = entry
                .match_node(match_id)
                .ok_or(ArenaError::MatchNotFound(*match_id.as_uuid()))?;
            let (fighter_a, fighter_b) = entry.resolve(node);
            let (Some(fighter_a), Some(fighter_b)) = (fighter_a, fighter_b) else {
                return Err(ArenaError::Unresolvable(*match_id.as_uuid()));
            };
            (
                Combatant::from(fighter_a),
                Combatant::from(fighter_b),
                FighterCard::from(fighter_a),
                FighterCard::from(fighter_b),
            )
        };

        let decisions = self.registry.all_decisions().await;

        let (user_h2h_a, user_h2h_b) =
            head_to_head_rate(&decisions, Granularity::User, &side_a, &side_b);
        let (fighter_h2h_a, fighter_h2h_b) =
            head_to_head_rate(&decisions, Granularity::FighterInstance, &side_a, &side_b);
        let (character_h2h_a, character_h2h_b) =
            head_to_head_rate(&decisions, Granularity::Character, &side_a, &side_b);

        let stats = MatchStats {
            user_overall_a: overall_rate(&decisions, Granularity::User, &side_a),
            user_overall_b: overall_rate(&decisions, Granularity::User, &side_b),
            fighter_overall_a: overall_rate(&decisions, Granularity::FighterInstance, &side_a),
            fighter_overall_b: overall_rate(&decisions, Granularity::FighterInstance, &side_b),
            character_overall_a: overall_rate(&decisions, Granularity::Character, &side_a),
            character_overall_b: overall_rate(&decisions, Granularity::Character, &side_b),
            user_head_to_head_a: user_h2h_a,
            user_head_to_head_b: user_h2h_b,
            fighter_head_to_head_a: fighter_h2h_a,
            fighter_head_to_head_b: fighter_h2h_b,
            character_head_to_head_a: character_h2h_a,
            character_head_to_head_b: character_h2h_b,
        };

        Ok(MatchStatsBundle {
            fighter_a: card_a,
            fighter_b: card_b,
            stats,
        })
    }
}

/// `100 · wins / total` over every decision the identity appears in, or
/// [`NO_HISTORY_RATE`] when it appears in none.
fn overall_rate(decisions: &[Decision], granularity: Granularity, side: &Combatant) -> f64 {
    let key = granularity.key(side);
    let mut wins = 0u32;
    let mut total = 0u32;
    for decision in decisions {
        if granularity.key(&decision.winner) == key {
            wins += 1;
            total += 1;
        } else if granularity.key(&decision.loser) == key {
            total += 1;
        }
    }
    if total == 0 {
        NO_HISTORY_RATE
    } else {
        100.0 * f64::from(wins) / f64::from(total)
    }
}

/// Split of decided meetings between the pair, in either winner/loser
/// order. Sums to 100 when the pair has history, 50/50 otherwise.
fn head_to_head_rate(
    decisions: &[Decision],
    granularity: Granularity,
    side_a: &Combatant,
    side_b: &Combatant,
) -> (f64, f64) {
    let key_a = granularity.key(side_a);
    let key_b = granularity.key(side_b);
    let mut wins_a = 0u32;
    let mut wins_b = 0u32;
    for decision in decisions {
        let winner = granularity.key(&decision.winner);
        let loser = granularity.key(&decision.loser);
        if winner == key_a && loser == key_b {
            wins_a += 1;
        } else if winner == key_b && loser == key_a {
            wins_b += 1;
        }
    }
    let total = wins_a + wins_b;
    if total == 0 {
        (NO_HISTORY_RATE, NO_HISTORY_RATE)
    } else {
        (
            100.0 * f64::from(wins_a) / f64::from(total),
            100.0 * f64::from(wins_b) / f64::from(total),
        )
    }
}

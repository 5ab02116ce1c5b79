//! Match node: one fight slot in the bracket tree.
//!
//! A match never stores its participants directly. Each of its two slots
//! holds a [`SlotSource`] — a typed reference resolved lazily against the
//! owning tournament's state, so winners are never copied forward and a
//! downstream match only ever needs a stable id plus a required outcome.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::ids::{FighterId, MatchId, TournamentId};

/// Which outcome of a referenced match feeds a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SlotOutcome {
    /// The referenced match's winner advances into the slot.
    Winner,
    /// The referenced match's loser drops into the slot. Reserved for a
    /// losers bracket; the resolution primitive supports it but no builder
    /// produces it.
    Loser,
}

/// Typed reference a match slot resolves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlotSource {
    /// Direct fighter reference (round 1 only). Always resolvable, since
    /// fighters are immutable once created.
    Fighter {
        /// Referenced fighter.
        id: FighterId,
    },
    /// Reference to another match in the same tournament, resolvable once
    /// that match has the required outcome recorded.
    Match {
        /// Referenced match.
        id: MatchId,
        /// Required outcome of the referenced match.
        outcome: SlotOutcome,
    },
}

/// Bracket side a match sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BracketSide {
    /// Winners bracket. The only side this service builds.
    Winners,
    /// Losers bracket. Reserved for double elimination.
    Losers,
}

/// One node in the bracket tree.
///
/// The two slot sources are fixed at creation; only `winner` and
/// `completed_at` mutate afterward, and only through the result recorder.
/// `(round_number, match_index)` is the explicit total order used both to
/// lay out the tree and to pick the next playable match.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MatchNode {
    /// Unique match identifier.
    pub id: MatchId,
    /// Owning tournament.
    pub tournament_id: TournamentId,
    /// 1-based round number; the final is the highest round.
    pub round_number: u32,
    /// 0-based position within the round.
    pub match_index: u32,
    /// Bracket side (always `Winners` here).
    pub side: BracketSide,
    /// Source for participant slot A.
    pub slot_a: SlotSource,
    /// Source for participant slot B.
    pub slot_b: SlotSource,
    /// Winning fighter, set exactly once by the result recorder (and
    /// cleared by an undo).
    pub winner: Option<FighterId>,
    /// When the result was recorded.
    pub completed_at: Option<DateTime<Utc>>,
}

impl MatchNode {
    /// Creates an unresolved match node with the given slots.
    #[must_use]
    pub fn new(
        tournament_id: TournamentId,
        round_number: u32,
        match_index: u32,
        slot_a: SlotSource,
        slot_b: SlotSource,
    ) -> Self {
        Self {
            id: MatchId::new(),
            tournament_id,
            round_number,
            match_index,
            side: BracketSide::Winners,
            slot_a,
            slot_b,
            winner: None,
            completed_at: None,
        }
    }

    /// Returns `true` if either slot references `other` as a source match.
    #[must_use]
    pub fn depends_on(&self, other: MatchId) -> bool {
        [self.slot_a, self.slot_b].iter().any(|slot| {
            matches!(slot, SlotSource::Match { id, .. } if *id == other)
        })
    }
}

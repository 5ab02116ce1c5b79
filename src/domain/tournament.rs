//! Tournament record and its lifecycle enums.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ids::{GameId, TournamentId, UserId};
use crate::error::ArenaError;

/// Number of preliminary (round 1) matches in a bracket.
///
/// Constrained to 4, 8 or 16; the roster capacity is twice this value and
/// the full bracket holds `2P − 1` matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "u32", into = "u32")]
pub enum BracketSize {
    /// 4 prelim matches, 8 fighters, 7 matches over 3 rounds.
    Four,
    /// 8 prelim matches, 16 fighters, 15 matches over 4 rounds.
    Eight,
    /// 16 prelim matches, 32 fighters, 31 matches over 5 rounds.
    Sixteen,
}

impl BracketSize {
    /// Number of round-1 matches.
    #[must_use]
    pub const fn prelim_matches(self) -> u32 {
        match self {
            Self::Four => 4,
            Self::Eight => 8,
            Self::Sixteen => 16,
        }
    }

    /// Number of fighters the roster holds when full (`2P`).
    #[must_use]
    pub const fn fighter_cap(self) -> u32 {
        self.prelim_matches() * 2
    }

    /// Total matches in the complete bracket (`2P − 1`).
    #[must_use]
    pub const fn total_matches(self) -> u32 {
        self.fighter_cap() - 1
    }

    /// Number of rounds, final included (`log2(P) + 1`).
    #[must_use]
    pub const fn round_count(self) -> u32 {
        self.fighter_cap().trailing_zeros()
    }
}

impl TryFrom<u32> for BracketSize {
    type Error = ArenaError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(Self::Four),
            8 => Ok(Self::Eight),
            16 => Ok(Self::Sixteen),
            other => Err(ArenaError::InvalidBracketSize(other)),
        }
    }
}

impl From<BracketSize> for u32 {
    fn from(size: BracketSize) -> Self {
        size.prelim_matches()
    }
}

/// Bracket elimination mode.
///
/// `Double` is accepted on the wire but rejected at validation time: no
/// losers-bracket builder exists, and silently accepting the mode would
/// strand the tournament after round 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EliminationMode {
    /// Single elimination: one loss eliminates.
    Single,
    /// Double elimination. Reserved; not implemented.
    Double,
}

impl fmt::Display for EliminationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => write!(f, "single"),
            Self::Double => write!(f, "double"),
        }
    }
}

impl FromStr for EliminationMode {
    type Err = ArenaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(Self::Single),
            "double" => Ok(Self::Double),
            other => Err(ArenaError::InvalidEliminationMode(other.to_string())),
        }
    }
}

/// Tournament lifecycle status.
///
/// Transitions are monotonic: `Pending → InProgress → Completed`. The flip
/// to `InProgress` happens atomically with the join that fills the roster;
/// the flip to `Completed` happens atomically with the result that resolves
/// the last open match. No transition is ever reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Roster is open; bracket not yet built.
    Pending,
    /// Roster full, bracket built, matches being played.
    InProgress,
    /// Every match has a winner. Terminal.
    Completed,
}

impl fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

impl FromStr for TournamentStatus {
    type Err = ArenaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            other => Err(ArenaError::Validation(format!(
                "invalid tournament status: {other}"
            ))),
        }
    }
}

/// A single-elimination tournament.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Tournament {
    /// Unique tournament identifier (immutable after creation).
    pub id: TournamentId,
    /// Game this tournament is played in (external catalog reference).
    pub game_id: GameId,
    /// User who created the tournament.
    pub owner_id: UserId,
    /// Display name.
    pub name: String,
    /// Number of preliminary matches (roster capacity is twice this).
    pub bracket_size: BracketSize,
    /// Elimination mode. Only `Single` passes validation.
    pub mode: EliminationMode,
    /// Current lifecycle status.
    pub status: TournamentStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    /// Creates a new `Pending` tournament.
    #[must_use]
    pub fn new(game_id: GameId, owner_id: UserId, name: String, bracket_size: BracketSize) -> Self {
        Self {
            id: TournamentId::new(),
            game_id,
            owner_id,
            name,
            bracket_size,
            mode: EliminationMode::Single,
            status: TournamentStatus::Pending,
            created_at: Utc::now(),
        }
    }
}

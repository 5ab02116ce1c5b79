//! Domain layer: core types, bracket construction, lazy match resolution,
//! and the tournament registry.
//!
//! This module contains the server-side domain model: typed identifiers,
//! the tournament/fighter/match/decision records, the pure bracket builder,
//! and the registry that stores tournament aggregates behind per-tournament
//! locks.

pub mod bracket;
pub mod decision;
pub mod fighter;
pub mod ids;
pub mod match_node;
pub mod registry;
pub mod tournament;

pub use decision::{Combatant, Decision};
pub use fighter::Fighter;
pub use ids::{CharacterId, DecisionId, FighterId, GameId, MatchId, TournamentId, UserId};
pub use match_node::{BracketSide, MatchNode, SlotOutcome, SlotSource};
pub use registry::{TournamentEntry, TournamentRegistry};
pub use tournament::{BracketSize, EliminationMode, Tournament, TournamentStatus};

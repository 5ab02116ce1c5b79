//! Service layer: tournament lifecycle orchestration and statistics.

pub mod stats_service;
pub mod tournament_service;

pub use stats_service::{FighterCard, MatchStats, MatchStatsBundle, StatsService};
pub use tournament_service::{JoinSpec, PlayableMatch, TournamentService, TournamentSnapshot};

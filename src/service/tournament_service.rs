//! Tournament service: orchestrates the bracket lifecycle.
//!
//! Every multi-step mutation (join + bracket build, record + decide +
//! completion check, undo) runs entirely under one tournament entry write
//! lock, so partial application is impossible and racing callers serialize:
//! two joins cannot both claim the final roster slot, and two results
//! cannot both land on the same match.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::bracket::build_single_elim;
use crate::domain::{
    CharacterId, Decision, EliminationMode, Fighter, FighterId, GameId, MatchId, MatchNode,
    Tournament, TournamentEntry, TournamentId, TournamentRegistry, TournamentStatus, UserId,
};
use crate::error::ArenaError;

/// Identity a user joins a tournament with.
///
/// Display and character names are carried in the request because the user
/// and character catalogs are external systems.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct JoinSpec {
    /// Joining user.
    pub user_id: UserId,
    /// Selected character.
    pub character_id: CharacterId,
    /// User's display name.
    pub display_name: String,
    /// Selected character's name.
    pub character_name: String,
}

/// Full read snapshot of a tournament: record, roster, and bracket.
#[derive(Debug, Clone)]
pub struct TournamentSnapshot {
    /// The tournament record.
    pub tournament: Tournament,
    /// Fighters in seed order.
    pub fighters: Vec<Fighter>,
    /// Matches in `(round_number, match_index)` order; empty while pending.
    pub matches: Vec<MatchNode>,
}

/// A match picked for play, with whatever participants resolve so far.
///
/// An absent participant means "not ready" (an upstream match is still
/// open), never an error.
#[derive(Debug, Clone)]
pub struct PlayableMatch {
    /// The match node.
    pub node: MatchNode,
    /// Slot A participant, if resolvable.
    pub fighter_a: Option<Fighter>,
    /// Slot B participant, if resolvable.
    pub fighter_b: Option<Fighter>,
}

/// Orchestration layer for tournament operations.
///
/// Stateless coordinator over the [`TournamentRegistry`]. Every mutation
/// method follows the pattern: acquire entry write lock → validate →
/// mutate → log → return.
#[derive(Debug, Clone)]
pub struct TournamentService {
    registry: Arc<TournamentRegistry>,
}

impl TournamentService {
    /// Creates a new `TournamentService`.
    #[must_use]
    pub fn new(registry: Arc<TournamentRegistry>) -> Self {
        Self { registry }
    }

    /// Returns a reference to the inner [`TournamentRegistry`].
    #[must_use]
    pub fn registry(&self) -> &Arc<TournamentRegistry> {
        &self.registry
    }

    /// Creates a pending tournament.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::InvalidBracketSize`] for a prelim count
    /// outside {4, 8, 16} and [`ArenaError::InvalidEliminationMode`] for
    /// any mode other than `single` — double elimination is rejected here
    /// because no losers-bracket builder exists.
    pub async fn create_tournament(
        &self,
        game_id: GameId,
        owner_id: UserId,
        prelim_match_count: u32,
        mode: EliminationMode,
    ) -> Result<Tournament, ArenaError> {
        let bracket_size = prelim_match_count.try_into()?;
        if mode != EliminationMode::Single {
            return Err(ArenaError::InvalidEliminationMode(mode.to_string()));
        }

        let name = format!("Tournament {}", Utc::now().to_rfc3339());
        let tournament = Tournament::new(game_id, owner_id, name, bracket_size);
        let snapshot = tournament.clone();
        let id = self.registry.insert(TournamentEntry::new(tournament)).await?;

        tracing::info!(%id, prelim_match_count, "tournament created");
        Ok(snapshot)
    }

    /// Lists tournaments, optionally filtered by status, newest first.
    pub async fn list_tournaments(
        &self,
        status: Option<TournamentStatus>,
    ) -> Vec<Tournament> {
        self.registry.list(status).await
    }

    /// Returns the full snapshot of one tournament.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::TournamentNotFound`] for an unknown id.
    pub async fn get_tournament(
        &self,
        id: TournamentId,
    ) -> Result<TournamentSnapshot, ArenaError> {
        let entry_lock = self.registry.get(id).await?;
        let entry = entry_lock.read().await;
        Ok(TournamentSnapshot {
            tournament: entry.tournament.clone(),
            fighters: entry.fighters.clone(),
            matches: entry.matches.clone(),
        })
    }

    /// Joins a user into a pending tournament, assigning the next dense
    /// seed index.
    ///
    /// The join that fills the last roster slot also builds the bracket and
    /// flips the tournament to `in_progress`, inside the same entry write
    /// lock — the slot assignment and the "was this the last slot" check
    /// are one atomic read-modify-write.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::TournamentNotFound`] for an unknown id and
    /// [`ArenaError::Conflict`] when the tournament is no longer pending,
    /// the roster is already full, or the user already holds a seat.
    pub async fn join(
        &self,
        tournament_id: TournamentId,
        spec: JoinSpec,
    ) -> Result<Fighter, ArenaError> {
        let entry_lock = self.registry.get(tournament_id).await?;
        let mut entry = entry_lock.write().await;

        if entry.tournament.status != TournamentStatus::Pending {
            return Err(ArenaError::Conflict(format!(
                "tournament {tournament_id} already started"
            )));
        }

        let cap = entry.tournament.bracket_size.fighter_cap();
        let seed_index = entry.fighters.len() as u32;
        if seed_index >= cap {
            return Err(ArenaError::Conflict(format!(
                "tournament {tournament_id} is full"
            )));
        }
        if entry.fighters.iter().any(|f| f.user_id == spec.user_id) {
            return Err(ArenaError::Conflict(format!(
                "user {} already joined tournament {tournament_id}",
                spec.user_id
            )));
        }

        let fighter = Fighter {
            id: FighterId::new(),
            tournament_id,
            user_id: spec.user_id,
            character_id: spec.character_id,
            display_name: spec.display_name,
            character_name: spec.character_name,
            seed_index,
        };
        let snapshot = fighter.clone();
        entry.fighters.push(fighter);

        // Last slot filled: build the bracket and start the tournament as
        // one atomic step with this join.
        if seed_index + 1 == cap {
            let matches = build_single_elim(
                tournament_id,
                entry.tournament.bracket_size,
                &entry.fighters,
            );
            self.registry.index_matches(tournament_id, &matches).await;
            entry.matches = matches;
            entry.tournament.status = TournamentStatus::InProgress;
            tracing::info!(%tournament_id, "roster full, bracket built, tournament in progress");
        }

        tracing::info!(%tournament_id, seed_index, "fighter joined");
        Ok(snapshot)
    }

    /// Returns the next playable match of a tournament, with whatever
    /// participants resolve so far, or `None` when every match is decided.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::TournamentNotFound`] for an unknown id.
    pub async fn next_playable_match(
        &self,
        tournament_id: TournamentId,
    ) -> Result<Option<PlayableMatch>, ArenaError> {
        let entry_lock = self.registry.get(tournament_id).await?;
        let entry = entry_lock.read().await;

        Ok(entry.next_playable().map(|node| {
            let (a, b) = entry.resolve(node);
            PlayableMatch {
                node: node.clone(),
                fighter_a: a.cloned(),
                fighter_b: b.cloned(),
            }
        }))
    }

    /// Records the outcome of a match.
    ///
    /// Under one entry write lock, atomically: validates that the match is
    /// still open, that both participants resolve, and that the submitted
    /// winner is one of them; then sets the winner and completion
    /// timestamp, appends the decision, and — if no match in the
    /// tournament still lacks a winner — transitions the tournament to
    /// `completed`.
    ///
    /// # Errors
    ///
    /// - [`ArenaError::MatchNotFound`] for an unknown match id.
    /// - [`ArenaError::Conflict`] when the match already has a winner
    ///   (exactly-once: the check runs under the write lock, so a racing
    ///   second call always observes the first).
    /// - [`ArenaError::Unresolvable`] when an upstream match is incomplete.
    /// - [`ArenaError::Validation`] when the winner id matches neither
    ///   resolved participant.
    pub async fn record_result(
        &self,
        match_id: MatchId,
        winner_fighter_id: FighterId,
    ) -> Result<Decision, ArenaError> {
        let entry_lock = self.registry.get_by_match(match_id).await?;
        let mut entry = entry_lock.write().await;

        let node = entry
            .match_node(match_id)
            .ok_or(ArenaError::MatchNotFound(*match_id.as_uuid()))?;
        if node.winner.is_some() {
            return Err(ArenaError::Conflict(format!(
                "match {match_id} already has a winner"
            )));
        }

        let (fighter_a, fighter_b) = entry.resolve(node);
        let (Some(fighter_a), Some(fighter_b)) = (fighter_a, fighter_b) else {
            return Err(ArenaError::Unresolvable(*match_id.as_uuid()));
        };
        if winner_fighter_id != fighter_a.id && winner_fighter_id != fighter_b.id {
            return Err(ArenaError::Validation(format!(
                "fighter {winner_fighter_id} is not a participant of match {match_id}"
            )));
        }

        let (winner, loser) = if winner_fighter_id == fighter_a.id {
            (fighter_a, fighter_b)
        } else {
            (fighter_b, fighter_a)
        };
        let tournament_id = entry.tournament.id;
        let decision = Decision::new(match_id, tournament_id, winner, loser);
        let snapshot = decision.clone();

        if let Some(node) = entry.matches.iter_mut().find(|m| m.id == match_id) {
            node.winner = Some(winner_fighter_id);
            node.completed_at = Some(decision.recorded_at);
        }
        entry.decisions.push(decision);

        // Completion check reads the state just written, under the same
        // lock.
        if entry.all_matches_decided() {
            entry.tournament.status = TournamentStatus::Completed;
            tracing::info!(%tournament_id, "all matches decided, tournament completed");
        }

        tracing::info!(%match_id, winner = %winner_fighter_id, "result recorded");
        Ok(snapshot)
    }

    /// Reverts a recorded result, returning the match to unresolved.
    ///
    /// Undo never cascades. It is blocked instead:
    /// - with [`ArenaError::Conflict`] when any match whose slot references
    ///   this match already has a winner — reverting would leave the
    ///   dependent referencing a participant this match no longer produces;
    /// - with [`ArenaError::Conflict`] once the tournament is completed —
    ///   status transitions are monotonic, and the final has no dependents
    ///   to trip the first guard.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::MatchNotFound`] for an unknown match id,
    /// [`ArenaError::DecisionNotFound`] when no decision exists for the
    /// match, and [`ArenaError::Conflict`] for the guards above.
    pub async fn undo_result(&self, match_id: MatchId) -> Result<(), ArenaError> {
        let entry_lock = self.registry.get_by_match(match_id).await?;
        let mut entry = entry_lock.write().await;

        entry
            .match_node(match_id)
            .ok_or(ArenaError::MatchNotFound(*match_id.as_uuid()))?;
        if entry.decision_for(match_id).is_none() {
            return Err(ArenaError::DecisionNotFound(*match_id.as_uuid()));
        }
        if entry.tournament.status == TournamentStatus::Completed {
            return Err(ArenaError::Conflict(format!(
                "tournament {} is completed; results are final",
                entry.tournament.id
            )));
        }
        let dependents = entry.resolved_dependents(match_id);
        if let Some(dependent) = dependents.first() {
            return Err(ArenaError::Conflict(format!(
                "match {dependent} already resolved using this result; undo it first"
            )));
        }

        entry.decisions.retain(|d| d.match_id != match_id);
        if let Some(node) = entry.matches.iter_mut().find(|m| m.id == match_id) {
            node.winner = None;
            node.completed_at = None;
        }

        tracing::info!(%match_id, "result undone");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn make_service() -> TournamentService {
        TournamentService::new(Arc::new(TournamentRegistry::new()))
    }

    fn spec(seed: u32) -> JoinSpec {
        JoinSpec {
            user_id: UserId::new(),
            character_id: CharacterId::new(),
            display_name: format!("player-{seed}"),
            character_name: format!("char-{seed}"),
        }
    }

    async fn filled_tournament(service: &TournamentService) -> (TournamentId, Vec<Fighter>) {
        let Ok(tournament) = service
            .create_tournament(GameId::new(), UserId::new(), 4, EliminationMode::Single)
            .await
        else {
            panic!("create failed");
        };
        let mut fighters = Vec::new();
        for seed in 0..8 {
            let Ok(fighter) = service.join(tournament.id, spec(seed)).await else {
                panic!("join {seed} failed");
            };
            fighters.push(fighter);
        }
        (tournament.id, fighters)
    }

    #[tokio::test]
    async fn create_rejects_bad_bracket_size() {
        let service = make_service();
        let result = service
            .create_tournament(GameId::new(), UserId::new(), 6, EliminationMode::Single)
            .await;
        assert!(matches!(result, Err(ArenaError::InvalidBracketSize(6))));
    }

    #[tokio::test]
    async fn create_rejects_double_elimination() {
        let service = make_service();
        let result = service
            .create_tournament(GameId::new(), UserId::new(), 4, EliminationMode::Double)
            .await;
        assert!(matches!(result, Err(ArenaError::InvalidEliminationMode(_))));
    }

    #[tokio::test]
    async fn joins_assign_dense_seed_indexes() {
        let service = make_service();
        let (_, fighters) = filled_tournament(&service).await;
        let seeds: Vec<_> = fighters.iter().map(|f| f.seed_index).collect();
        assert_eq!(seeds, (0..8).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn final_join_builds_bracket_and_starts_tournament() {
        let service = make_service();
        let (id, _) = filled_tournament(&service).await;

        let Ok(snapshot) = service.get_tournament(id).await else {
            panic!("get failed");
        };
        assert_eq!(snapshot.tournament.status, TournamentStatus::InProgress);
        assert_eq!(snapshot.matches.len(), 7);
    }

    #[tokio::test]
    async fn join_after_full_conflicts() {
        let service = make_service();
        let (id, _) = filled_tournament(&service).await;

        let result = service.join(id, spec(99)).await;
        assert!(matches!(result, Err(ArenaError::Conflict(_))));
    }

    #[tokio::test]
    async fn duplicate_join_by_same_user_conflicts() {
        let service = make_service();
        let Ok(tournament) = service
            .create_tournament(GameId::new(), UserId::new(), 4, EliminationMode::Single)
            .await
        else {
            panic!("create failed");
        };

        let user_id = UserId::new();
        let first = JoinSpec {
            user_id,
            character_id: CharacterId::new(),
            display_name: "alice".to_string(),
            character_name: "Blaze".to_string(),
        };
        let Ok(fighter) = service.join(tournament.id, first).await else {
            panic!("first join failed");
        };
        assert_eq!(fighter.seed_index, 0);

        // Same user, different character: still one seat per user.
        let second = JoinSpec {
            user_id,
            character_id: CharacterId::new(),
            display_name: "alice".to_string(),
            character_name: "Frost".to_string(),
        };
        let result = service.join(tournament.id, second).await;
        assert!(matches!(result, Err(ArenaError::Conflict(_))));

        let Ok(snapshot) = service.get_tournament(tournament.id).await else {
            panic!("get failed");
        };
        assert_eq!(snapshot.fighters.len(), 1);
    }

    #[tokio::test]
    async fn racing_joins_cannot_both_claim_last_slot() {
        let service = make_service();
        let Ok(tournament) = service
            .create_tournament(GameId::new(), UserId::new(), 4, EliminationMode::Single)
            .await
        else {
            panic!("create failed");
        };
        for seed in 0..7 {
            let Ok(_) = service.join(tournament.id, spec(seed)).await else {
                panic!("join {seed} failed");
            };
        }

        // Two joins race for the single remaining seat; the entry write
        // lock serializes them, so exactly one wins.
        let (first, second) = tokio::join!(
            service.join(tournament.id, spec(7)),
            service.join(tournament.id, spec(8)),
        );
        assert_eq!(
            u32::from(first.is_ok()) + u32::from(second.is_ok()),
            1,
            "exactly one racing join may claim the last slot"
        );
        let conflict = if first.is_err() { first } else { second };
        assert!(matches!(conflict, Err(ArenaError::Conflict(_))));

        // The bracket was built exactly once.
        let Ok(snapshot) = service.get_tournament(tournament.id).await else {
            panic!("get failed");
        };
        assert_eq!(snapshot.tournament.status, TournamentStatus::InProgress);
        assert_eq!(snapshot.fighters.len(), 8);
        assert_eq!(snapshot.matches.len(), 7);
    }

    #[tokio::test]
    async fn racing_results_cannot_both_land() {
        let service = make_service();
        let (id, _) = filled_tournament(&service).await;

        let Ok(Some(playable)) = service.next_playable_match(id).await else {
            panic!("no playable match");
        };
        let Some(winner_a) = playable.fighter_a else {
            panic!("round 1 must resolve");
        };
        let Some(winner_b) = playable.fighter_b else {
            panic!("round 1 must resolve");
        };

        // Two results race on one match, each backing a different side;
        // the winner-unset check runs under the write lock, so the loser
        // of the race observes the committed result and conflicts.
        let (first, second) = tokio::join!(
            service.record_result(playable.node.id, winner_a.id),
            service.record_result(playable.node.id, winner_b.id),
        );
        assert_eq!(
            u32::from(first.is_ok()) + u32::from(second.is_ok()),
            1,
            "exactly one racing result may land"
        );
        let conflict = if first.is_err() { first } else { second };
        assert!(matches!(conflict, Err(ArenaError::Conflict(_))));

        // Exactly one decision in the history.
        assert_eq!(service.registry().all_decisions().await.len(), 1);
    }

    #[tokio::test]
    async fn record_result_happy_path() {
        let service = make_service();
        let (id, fighters) = filled_tournament(&service).await;

        let Ok(Some(playable)) = service.next_playable_match(id).await else {
            panic!("no playable match");
        };
        let Some(winner) = playable.fighter_a else {
            panic!("round 1 must resolve");
        };
        let Ok(decision) = service.record_result(playable.node.id, winner.id).await else {
            panic!("record failed");
        };
        assert_eq!(decision.winner.fighter_id, winner.id);
        assert_eq!(decision.loser.fighter_id, fighters.get(1).map(|f| f.id).unwrap_or_default());
    }

    #[tokio::test]
    async fn record_result_is_exactly_once() {
        let service = make_service();
        let (id, _) = filled_tournament(&service).await;

        let Ok(Some(playable)) = service.next_playable_match(id).await else {
            panic!("no playable match");
        };
        let Some(winner) = playable.fighter_a else {
            panic!("round 1 must resolve");
        };
        assert!(service.record_result(playable.node.id, winner.id).await.is_ok());

        let second = service.record_result(playable.node.id, winner.id).await;
        assert!(matches!(second, Err(ArenaError::Conflict(_))));

        // Decision history untouched by the rejected call.
        let decisions = service.registry().all_decisions().await;
        assert_eq!(decisions.len(), 1);
    }

    #[tokio::test]
    async fn record_result_on_unresolvable_match_fails() {
        let service = make_service();
        let (id, fighters) = filled_tournament(&service).await;

        let Ok(snapshot) = service.get_tournament(id).await else {
            panic!("get failed");
        };
        let Some(semi) = snapshot.matches.iter().find(|m| m.round_number == 2) else {
            panic!("no round 2 match");
        };
        let Some(any_fighter) = fighters.first() else {
            panic!("empty roster");
        };
        let result = service.record_result(semi.id, any_fighter.id).await;
        assert!(matches!(result, Err(ArenaError::Unresolvable(_))));
    }

    #[tokio::test]
    async fn record_result_rejects_non_participant() {
        let service = make_service();
        let (id, fighters) = filled_tournament(&service).await;

        let Ok(Some(playable)) = service.next_playable_match(id).await else {
            panic!("no playable match");
        };
        // Seeds 0 and 1 play match 0; seed 7 is not in it.
        let Some(outsider) = fighters.last() else {
            panic!("empty roster");
        };
        let result = service.record_result(playable.node.id, outsider.id).await;
        assert!(matches!(result, Err(ArenaError::Validation(_))));
    }

    /// Plays a filled 8-fighter tournament to completion by always taking
    /// the next playable match and picking slot A's fighter.
    async fn play_out(service: &TournamentService, id: TournamentId) -> u32 {
        let mut played = 0;
        while let Ok(Some(playable)) = service.next_playable_match(id).await {
            let Some(winner) = playable.fighter_a else {
                panic!("next playable should resolve in strict order play");
            };
            let Ok(_) = service.record_result(playable.node.id, winner.id).await else {
                panic!("record failed");
            };
            played += 1;
        }
        played
    }

    #[tokio::test]
    async fn tournament_completes_exactly_on_last_result() {
        let service = make_service();
        let (id, _) = filled_tournament(&service).await;

        // Decide 6 of 7 matches: still in progress.
        for _ in 0..6 {
            let Ok(Some(playable)) = service.next_playable_match(id).await else {
                panic!("expected a playable match");
            };
            let Some(winner) = playable.fighter_a else {
                panic!("slot A should resolve");
            };
            let Ok(_) = service.record_result(playable.node.id, winner.id).await else {
                panic!("record failed");
            };
            let Ok(snapshot) = service.get_tournament(id).await else {
                panic!("get failed");
            };
            assert_eq!(snapshot.tournament.status, TournamentStatus::InProgress);
        }

        // The seventh (final) result completes the tournament.
        let Ok(Some(finals)) = service.next_playable_match(id).await else {
            panic!("final should be playable");
        };
        let Some(winner) = finals.fighter_a else {
            panic!("final should resolve");
        };
        let Ok(_) = service.record_result(finals.node.id, winner.id).await else {
            panic!("record failed");
        };
        let Ok(snapshot) = service.get_tournament(id).await else {
            panic!("get failed");
        };
        assert_eq!(snapshot.tournament.status, TournamentStatus::Completed);

        let Ok(none) = service.next_playable_match(id).await else {
            panic!("get failed");
        };
        assert!(none.is_none());
    }

    #[tokio::test]
    async fn play_out_decides_all_seven_matches() {
        let service = make_service();
        let (id, _) = filled_tournament(&service).await;
        assert_eq!(play_out(&service, id).await, 7);
    }

    #[tokio::test]
    async fn undo_without_decision_is_not_found() {
        let service = make_service();
        let (id, _) = filled_tournament(&service).await;

        let Ok(Some(playable)) = service.next_playable_match(id).await else {
            panic!("no playable match");
        };
        let result = service.undo_result(playable.node.id).await;
        assert!(matches!(result, Err(ArenaError::DecisionNotFound(_))));
    }

    #[tokio::test]
    async fn undo_restores_match_to_unresolved() {
        let service = make_service();
        let (id, _) = filled_tournament(&service).await;

        let Ok(Some(playable)) = service.next_playable_match(id).await else {
            panic!("no playable match");
        };
        let Some(winner) = playable.fighter_a else {
            panic!("round 1 must resolve");
        };
        let match_id = playable.node.id;
        assert!(service.record_result(match_id, winner.id).await.is_ok());
        assert!(service.undo_result(match_id).await.is_ok());

        // Same match is playable again; history is empty.
        let Ok(Some(again)) = service.next_playable_match(id).await else {
            panic!("no playable match");
        };
        assert_eq!(again.node.id, match_id);
        assert!(service.registry().all_decisions().await.is_empty());
    }

    #[tokio::test]
    async fn undo_blocked_when_dependent_match_resolved() {
        let service = make_service();
        let (id, _) = filled_tournament(&service).await;

        // Decide all four round-1 matches, then the first semifinal.
        let mut decided = Vec::new();
        for _ in 0..5 {
            let Ok(Some(playable)) = service.next_playable_match(id).await else {
                panic!("expected a playable match");
            };
            let Some(winner) = playable.fighter_a else {
                panic!("slot A should resolve");
            };
            let Ok(_) = service.record_result(playable.node.id, winner.id).await else {
                panic!("record failed");
            };
            decided.push((playable.node.round_number, playable.node.match_index, playable.node.id));
        }
        assert_eq!(decided.last().map(|&(r, i, _)| (r, i)), Some((2, 0)));

        // Round-1 match 0 feeds the decided semifinal: undo blocked.
        let Some(&(_, _, fed_semifinal)) = decided.first() else {
            panic!("nothing decided");
        };
        let blocked = service.undo_result(fed_semifinal).await;
        assert!(matches!(blocked, Err(ArenaError::Conflict(_))));

        // Round-1 match 2 feeds the still-open semifinal: undo allowed.
        let Some(&(_, _, free_match)) = decided.get(2) else {
            panic!("nothing decided");
        };
        assert!(service.undo_result(free_match).await.is_ok());

        // The decided semifinal itself has no dependent result: undo
        // allowed, which unblocks its feeders again.
        let Some(&(_, _, semifinal)) = decided.last() else {
            panic!("nothing decided");
        };
        assert!(service.undo_result(semifinal).await.is_ok());
        assert!(service.undo_result(fed_semifinal).await.is_ok());
    }

    #[tokio::test]
    async fn undo_blocked_after_completion() {
        let service = make_service();
        let (id, _) = filled_tournament(&service).await;
        let _ = play_out(&service, id).await;

        let Ok(snapshot) = service.get_tournament(id).await else {
            panic!("get failed");
        };
        let Some(finals) = snapshot
            .matches
            .iter()
            .find(|m| m.round_number == snapshot.tournament.bracket_size.round_count())
        else {
            panic!("no final");
        };
        let result = service.undo_result(finals.id).await;
        assert!(matches!(result, Err(ArenaError::Conflict(_))));
    }
}

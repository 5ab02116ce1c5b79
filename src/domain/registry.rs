//! Concurrent tournament storage with per-tournament fine-grained locking.
//!
//! [`TournamentRegistry`] stores every tournament in a `HashMap` where each
//! entry is individually protected by a [`tokio::sync::RwLock`]. A
//! [`TournamentEntry`] aggregates everything one tournament owns — the
//! tournament record, its fighters, its matches, and its decisions — so a
//! single entry write lock is the serializable transaction every multi-step
//! operation (join + bracket build, record + decide + complete, undo) runs
//! under.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::decision::Decision;
use super::fighter::Fighter;
use super::ids::{FighterId, MatchId, TournamentId};
use super::match_node::{MatchNode, SlotOutcome, SlotSource};
use super::tournament::{Tournament, TournamentStatus};
use crate::error::ArenaError;

/// Aggregate holding one tournament and everything it owns.
///
/// Fighters are kept in seed order and matches in `(round_number,
/// match_index)` order — the explicit total order the bracket is built in
/// and the next-playable selection reads. Slot sources are weak ids into
/// the same entry, never ownership.
#[derive(Debug)]
pub struct TournamentEntry {
    /// The tournament record.
    pub tournament: Tournament,
    /// Seeded fighters, ordered by `seed_index`.
    pub fighters: Vec<Fighter>,
    /// Bracket matches in `(round_number, match_index)` order. Empty until
    /// the roster fills.
    pub matches: Vec<MatchNode>,
    /// Recorded decisions for this tournament's matches. At most one per
    /// match; removed only by undo.
    pub decisions: Vec<Decision>,
}

/// Resolved participants of a match: each side is a concrete fighter or
/// absent when the corresponding ancestor chain has an unresolved match.
pub type ResolvedSlots<'a> = (Option<&'a Fighter>, Option<&'a Fighter>);

impl TournamentEntry {
    /// Creates an entry for a freshly created tournament with an empty
    /// roster.
    #[must_use]
    pub fn new(tournament: Tournament) -> Self {
        Self {
            tournament,
            fighters: Vec::new(),
            matches: Vec::new(),
            decisions: Vec::new(),
        }
    }

    /// Looks up a fighter by id.
    #[must_use]
    pub fn fighter(&self, id: FighterId) -> Option<&Fighter> {
        self.fighters.iter().find(|f| f.id == id)
    }

    /// Looks up a match by id.
    #[must_use]
    pub fn match_node(&self, id: MatchId) -> Option<&MatchNode> {
        self.matches.iter().find(|m| m.id == id)
    }

    /// Looks up the decision recorded for a match, if any.
    #[must_use]
    pub fn decision_for(&self, match_id: MatchId) -> Option<&Decision> {
        self.decisions.iter().find(|d| d.match_id == match_id)
    }

    /// Resolves one slot source to a concrete fighter.
    ///
    /// Pure read over persisted state:
    /// - a fighter slot resolves directly (fighters are immutable once
    ///   created);
    /// - a winner-outcome match slot resolves through the referenced
    ///   match's `winner`, absent while unset;
    /// - a loser-outcome match slot resolves through the referenced
    ///   match's decision, absent while no decision exists.
    #[must_use]
    pub fn resolve_slot(&self, slot: SlotSource) -> Option<&Fighter> {
        match slot {
            SlotSource::Fighter { id } => self.fighter(id),
            SlotSource::Match { id, outcome } => match outcome {
                SlotOutcome::Winner => self
                    .match_node(id)
                    .and_then(|m| m.winner)
                    .and_then(|winner| self.fighter(winner)),
                SlotOutcome::Loser => self
                    .decision_for(id)
                    .and_then(|d| self.fighter(d.loser.fighter_id)),
            },
        }
    }

    /// Resolves both participants of a match. An absent side means "not
    /// ready", never an error.
    #[must_use]
    pub fn resolve(&self, node: &MatchNode) -> ResolvedSlots<'_> {
        (self.resolve_slot(node.slot_a), self.resolve_slot(node.slot_b))
    }

    /// Next playable match: the match with no winner and the smallest
    /// `(round_number, match_index)`.
    ///
    /// Makes no resolvability guarantee — the returned match's slots may
    /// still be unresolvable when an ancestor is incomplete; callers treat
    /// an absent participant as not-ready.
    #[must_use]
    pub fn next_playable(&self) -> Option<&MatchNode> {
        self.matches
            .iter()
            .filter(|m| m.winner.is_none())
            .min_by_key(|m| (m.round_number, m.match_index))
    }

    /// Returns `true` when every match has a winner (and the bracket has
    /// been built at all).
    #[must_use]
    pub fn all_matches_decided(&self) -> bool {
        !self.matches.is_empty() && self.matches.iter().all(|m| m.winner.is_some())
    }

    /// Matches whose slots reference `match_id` and already have a winner.
    /// A non-empty result blocks undo of `match_id`.
    #[must_use]
    pub fn resolved_dependents(&self, match_id: MatchId) -> Vec<MatchId> {
        self.matches
            .iter()
            .filter(|m| m.depends_on(match_id) && m.winner.is_some())
            .map(|m| m.id)
            .collect()
    }
}

/// Central store for all tournaments.
///
/// Uses a `RwLock<HashMap<...>>` for the outer map and per-entry
/// `Arc<RwLock<TournamentEntry>>` for fine-grained per-tournament locking,
/// plus a match-id index so match-scoped requests (result, undo, stats)
/// route to their tournament without carrying a tournament id.
///
/// # Concurrency
///
/// - Multiple tasks may read the same tournament concurrently.
/// - Writes to different tournaments are concurrent.
/// - Writes to the same tournament are serialized — this is what makes
///   the roster-fill race and the double-record race impossible.
#[derive(Debug)]
pub struct TournamentRegistry {
    tournaments: RwLock<HashMap<TournamentId, Arc<RwLock<TournamentEntry>>>>,
    match_index: RwLock<HashMap<MatchId, TournamentId>>,
}

impl TournamentRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tournaments: RwLock::new(HashMap::new()),
            match_index: RwLock::new(HashMap::new()),
        }
    }

    /// Inserts a new tournament entry.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::Conflict`] if a tournament with the same ID
    /// already exists (should never happen with UUID v4).
    pub async fn insert(&self, entry: TournamentEntry) -> Result<TournamentId, ArenaError> {
        let id = entry.tournament.id;
        let mut map = self.tournaments.write().await;
        if map.contains_key(&id) {
            return Err(ArenaError::Conflict(format!("tournament {id} already exists")));
        }
        map.insert(id, Arc::new(RwLock::new(entry)));
        Ok(id)
    }

    /// Returns a shared reference to the entry behind its per-tournament
    /// lock.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::TournamentNotFound`] if no tournament with the
    /// given ID exists.
    pub async fn get(&self, id: TournamentId) -> Result<Arc<RwLock<TournamentEntry>>, ArenaError> {
        let map = self.tournaments.read().await;
        map.get(&id)
            .cloned()
            .ok_or(ArenaError::TournamentNotFound(*id.as_uuid()))
    }

    /// Returns the entry owning the given match.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::MatchNotFound`] if the match is not indexed.
    pub async fn get_by_match(
        &self,
        match_id: MatchId,
    ) -> Result<Arc<RwLock<TournamentEntry>>, ArenaError> {
        let tournament_id = {
            let index = self.match_index.read().await;
            index
                .get(&match_id)
                .copied()
                .ok_or(ArenaError::MatchNotFound(*match_id.as_uuid()))?
        };
        self.get(tournament_id).await
    }

    /// Registers bracket matches in the match-id index. Called once per
    /// tournament, right after the bracket is built.
    pub async fn index_matches(&self, tournament_id: TournamentId, matches: &[MatchNode]) {
        let mut index = self.match_index.write().await;
        for node in matches {
            index.insert(node.id, tournament_id);
        }
    }

    /// Returns tournament snapshots, optionally filtered by status, newest
    /// first.
    pub async fn list(&self, status_filter: Option<TournamentStatus>) -> Vec<Tournament> {
        let map = self.tournaments.read().await;
        let mut tournaments = Vec::with_capacity(map.len());
        for entry_lock in map.values() {
            let entry = entry_lock.read().await;
            if let Some(filter) = status_filter
                && entry.tournament.status != filter
            {
                continue;
            }
            tournaments.push(entry.tournament.clone());
        }
        tournaments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        tournaments
    }

    /// Snapshot of every decision across all tournaments, for the
    /// statistics engine.
    pub async fn all_decisions(&self) -> Vec<Decision> {
        let map = self.tournaments.read().await;
        let mut decisions = Vec::new();
        for entry_lock in map.values() {
            let entry = entry_lock.read().await;
            decisions.extend(entry.decisions.iter().cloned());
        }
        decisions
    }

    /// Returns the number of tournaments in the registry.
    pub async fn len(&self) -> usize {
        self.tournaments.read().await.len()
    }

    /// Returns `true` if the registry contains no tournaments.
    pub async fn is_empty(&self) -> bool {
        self.tournaments.read().await.is_empty()
    }
}

impl Default for TournamentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::bracket::build_single_elim;
    use crate::domain::ids::{CharacterId, GameId, UserId};
    use crate::domain::tournament::BracketSize;

    fn make_entry() -> TournamentEntry {
        let tournament = Tournament::new(
            GameId::new(),
            UserId::new(),
            "test cup".to_string(),
            BracketSize::Four,
        );
        TournamentEntry::new(tournament)
    }

    fn fill_roster(entry: &mut TournamentEntry) {
        let tid = entry.tournament.id;
        let cap = entry.tournament.bracket_size.fighter_cap();
        for seed in 0..cap {
            entry.fighters.push(Fighter {
                id: FighterId::new(),
                tournament_id: tid,
                user_id: UserId::new(),
                character_id: CharacterId::new(),
                display_name: format!("player-{seed}"),
                character_name: format!("char-{seed}"),
                seed_index: seed,
            });
        }
        entry.matches = build_single_elim(tid, entry.tournament.bracket_size, &entry.fighters);
    }

    #[tokio::test]
    async fn insert_and_get() {
        let registry = TournamentRegistry::new();
        let entry = make_entry();
        let id = entry.tournament.id;

        let result = registry.insert(entry).await;
        assert!(result.is_ok());

        let fetched = registry.get(id).await;
        assert!(fetched.is_ok());
    }

    #[tokio::test]
    async fn get_nonexistent_returns_error() {
        let registry = TournamentRegistry::new();
        let result = registry.get(TournamentId::new()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn match_index_routes_to_owner() {
        let registry = TournamentRegistry::new();
        let mut entry = make_entry();
        fill_roster(&mut entry);
        let id = entry.tournament.id;
        let Some(first_match) = entry.matches.first().map(|m| m.id) else {
            panic!("bracket not built");
        };
        let matches = entry.matches.clone();

        let _ = registry.insert(entry).await;
        registry.index_matches(id, &matches).await;

        let owner = registry.get_by_match(first_match).await;
        assert!(owner.is_ok());

        let unknown = registry.get_by_match(MatchId::new()).await;
        assert!(unknown.is_err());
    }

    #[tokio::test]
    async fn list_filters_by_status() {
        let registry = TournamentRegistry::new();
        let _ = registry.insert(make_entry()).await;
        let _ = registry.insert(make_entry()).await;

        let pending = registry.list(Some(TournamentStatus::Pending)).await;
        assert_eq!(pending.len(), 2);

        let completed = registry.list(Some(TournamentStatus::Completed)).await;
        assert!(completed.is_empty());

        let all = registry.list(None).await;
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn resolve_round_one_is_immediate() {
        let mut entry = make_entry();
        fill_roster(&mut entry);

        let Some(first) = entry.matches.first().cloned() else {
            panic!("bracket not built");
        };
        let (a, b) = entry.resolve(&first);
        assert_eq!(a.map(|f| f.seed_index), Some(0));
        assert_eq!(b.map(|f| f.seed_index), Some(1));
    }

    #[test]
    fn resolve_later_round_absent_until_upstream_decided() {
        let mut entry = make_entry();
        fill_roster(&mut entry);

        let Some(semi) = entry.matches.iter().find(|m| m.round_number == 2).cloned() else {
            panic!("no round 2 match");
        };
        let (a, b) = entry.resolve(&semi);
        assert!(a.is_none());
        assert!(b.is_none());

        // Decide round-1 match 0; slot A of round-2 match 0 resolves,
        // slot B stays absent.
        let winner = entry.fighters.first().map(|f| f.id);
        if let Some(node) = entry.matches.iter_mut().find(|m| m.round_number == 1 && m.match_index == 0)
        {
            node.winner = winner;
        }
        let (a, b) = entry.resolve(&semi);
        assert_eq!(a.map(|f| f.seed_index), Some(0));
        assert!(b.is_none());
    }

    #[test]
    fn loser_slot_resolves_through_decision() {
        let mut entry = make_entry();
        fill_roster(&mut entry);

        let Some(first) = entry.matches.first().cloned() else {
            panic!("bracket not built");
        };
        let (Some(a), Some(b)) = entry.resolve(&first) else {
            panic!("round 1 must resolve");
        };
        let loser_slot = SlotSource::Match {
            id: first.id,
            outcome: SlotOutcome::Loser,
        };
        assert!(entry.resolve_slot(loser_slot).is_none());

        let decision = Decision::new(first.id, entry.tournament.id, a, b);
        let loser_id = b.id;
        entry.decisions.push(decision);
        assert_eq!(entry.resolve_slot(loser_slot).map(|f| f.id), Some(loser_id));
    }

    #[test]
    fn next_playable_follows_round_then_index_order() {
        let mut entry = make_entry();
        fill_roster(&mut entry);

        let first = entry.next_playable().map(|m| (m.round_number, m.match_index));
        assert_eq!(first, Some((1, 0)));

        let winner = entry.fighters.first().map(|f| f.id);
        if let Some(node) = entry.matches.first_mut() {
            node.winner = winner;
        }
        let next = entry.next_playable().map(|m| (m.round_number, m.match_index));
        assert_eq!(next, Some((1, 1)));
    }

    #[test]
    fn next_playable_ignores_storage_order() {
        let mut entry = make_entry();
        fill_roster(&mut entry);

        // Selection keys on (round, index), not on where the node sits
        // in the match list.
        entry.matches.reverse();
        let first = entry.next_playable().map(|m| (m.round_number, m.match_index));
        assert_eq!(first, Some((1, 0)));

        if let Some(node) = entry
            .matches
            .iter_mut()
            .find(|m| m.round_number == 1 && m.match_index == 0)
        {
            node.winner = entry.fighters.first().map(|f| f.id);
        }
        let next = entry.next_playable().map(|m| (m.round_number, m.match_index));
        assert_eq!(next, Some((1, 1)));
    }

    #[test]
    fn resolved_dependents_detects_downstream_results() {
        let mut entry = make_entry();
        fill_roster(&mut entry);

        let Some(first_id) = entry.matches.first().map(|m| m.id) else {
            panic!("bracket not built");
        };
        assert!(entry.resolved_dependents(first_id).is_empty());

        let winner = entry.fighters.first().map(|f| f.id);
        if let Some(semi) = entry
            .matches
            .iter_mut()
            .find(|m| m.round_number == 2 && m.match_index == 0)
        {
            semi.winner = winner;
        }
        assert_eq!(entry.resolved_dependents(first_id).len(), 1);
    }
}

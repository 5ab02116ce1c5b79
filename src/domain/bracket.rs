//! Single-elimination bracket construction.
//!
//! Pure function of the seeded roster: no randomness, no byes, fully
//! determined by seed order. The caller (the join path in the tournament
//! service) is responsible for invoking it exactly once, with a filled and
//! validated roster, atomically with the tournament's transition to
//! `in_progress`.

use super::fighter::Fighter;
use super::ids::TournamentId;
use super::match_node::{MatchNode, SlotOutcome, SlotSource};
use super::tournament::BracketSize;

/// Builds the complete single-elimination match tree for a filled roster.
///
/// `fighters` must hold exactly `2P` entries ordered by `seed_index`
/// (a caller precondition, not validated here). Returns `2P − 1` nodes in
/// `(round_number, match_index)` order:
///
/// - round 1 has `P` matches; match `k` pairs seeds `2k` and `2k + 1` as
///   direct fighter slots;
/// - every later round pairs consecutive matches of the previous round as
///   winner-outcome match slots;
/// - the last round holds the single final.
#[must_use]
pub fn build_single_elim(
    tournament_id: TournamentId,
    size: BracketSize,
    fighters: &[Fighter],
) -> Vec<MatchNode> {
    let prelims = size.prelim_matches() as usize;
    let mut nodes: Vec<MatchNode> = Vec::with_capacity(size.total_matches() as usize);

    // Round 1: pair fighters off the roster in seed order.
    for (k, pair) in fighters.chunks_exact(2).take(prelims).enumerate() {
        let (Some(a), Some(b)) = (pair.first(), pair.get(1)) else {
            continue;
        };
        nodes.push(MatchNode::new(
            tournament_id,
            1,
            k as u32,
            SlotSource::Fighter { id: a.id },
            SlotSource::Fighter { id: b.id },
        ));
    }

    // Later rounds: pair consecutive matches of the previous round.
    let mut prev_round: Vec<_> = nodes.iter().map(|m| m.id).collect();
    let mut round_number = 2;
    while prev_round.len() > 1 {
        let mut next_round = Vec::with_capacity(prev_round.len() / 2);
        for (k, feeders) in prev_round.chunks_exact(2).enumerate() {
            let (Some(a), Some(b)) = (feeders.first(), feeders.get(1)) else {
                continue;
            };
            let node = MatchNode::new(
                tournament_id,
                round_number,
                k as u32,
                SlotSource::Match {
                    id: *a,
                    outcome: SlotOutcome::Winner,
                },
                SlotSource::Match {
                    id: *b,
                    outcome: SlotOutcome::Winner,
                },
            );
            next_round.push(node.id);
            nodes.push(node);
        }
        prev_round = next_round;
        round_number += 1;
    }

    nodes
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::ids::{CharacterId, FighterId, UserId};

    fn make_roster(tournament_id: TournamentId, count: u32) -> Vec<Fighter> {
        (0..count)
            .map(|seed| Fighter {
                id: FighterId::new(),
                tournament_id,
                user_id: UserId::new(),
                character_id: CharacterId::new(),
                display_name: format!("player-{seed}"),
                character_name: format!("char-{seed}"),
                seed_index: seed,
            })
            .collect()
    }

    #[test]
    fn builds_complete_tree_for_every_size() {
        for size in [BracketSize::Four, BracketSize::Eight, BracketSize::Sixteen] {
            let tid = TournamentId::new();
            let roster = make_roster(tid, size.fighter_cap());
            let nodes = build_single_elim(tid, size, &roster);

            assert_eq!(nodes.len() as u32, size.total_matches());

            // Round sizes halve down to the single final.
            let mut expected = size.prelim_matches();
            for round in 1..=size.round_count() {
                let count = nodes.iter().filter(|m| m.round_number == round).count() as u32;
                assert_eq!(count, expected, "round {round} of {size:?}");
                expected /= 2;
            }
            let final_count = nodes
                .iter()
                .filter(|m| m.round_number == size.round_count())
                .count();
            assert_eq!(final_count, 1);
        }
    }

    #[test]
    fn round_one_pairs_consecutive_seeds() {
        let tid = TournamentId::new();
        let size = BracketSize::Four;
        let roster = make_roster(tid, size.fighter_cap());
        let nodes = build_single_elim(tid, size, &roster);

        for node in nodes.iter().filter(|m| m.round_number == 1) {
            let k = node.match_index as usize;
            let seed_a = roster.get(2 * k).map(|f| f.id);
            let seed_b = roster.get(2 * k + 1).map(|f| f.id);
            assert_eq!(node.slot_a, SlotSource::Fighter { id: seed_a.unwrap_or_default() });
            assert_eq!(node.slot_b, SlotSource::Fighter { id: seed_b.unwrap_or_default() });
        }
    }

    #[test]
    fn later_rounds_reference_previous_round_winners() {
        let tid = TournamentId::new();
        let size = BracketSize::Eight;
        let roster = make_roster(tid, size.fighter_cap());
        let nodes = build_single_elim(tid, size, &roster);

        for node in nodes.iter().filter(|m| m.round_number > 1) {
            let k = node.match_index as usize;
            let prev: Vec<_> = nodes
                .iter()
                .filter(|m| m.round_number == node.round_number - 1)
                .collect();
            let Some(feeder_a) = prev.get(2 * k) else {
                panic!("missing feeder match");
            };
            let Some(feeder_b) = prev.get(2 * k + 1) else {
                panic!("missing feeder match");
            };
            assert_eq!(
                node.slot_a,
                SlotSource::Match {
                    id: feeder_a.id,
                    outcome: SlotOutcome::Winner
                }
            );
            assert_eq!(
                node.slot_b,
                SlotSource::Match {
                    id: feeder_b.id,
                    outcome: SlotOutcome::Winner
                }
            );
        }
    }

    #[test]
    fn nodes_emitted_in_round_then_index_order() {
        let tid = TournamentId::new();
        let size = BracketSize::Sixteen;
        let roster = make_roster(tid, size.fighter_cap());
        let nodes = build_single_elim(tid, size, &roster);

        let keys: Vec<_> = nodes.iter().map(|m| (m.round_number, m.match_index)).collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn all_nodes_start_unresolved_on_winners_side() {
        let tid = TournamentId::new();
        let size = BracketSize::Four;
        let roster = make_roster(tid, size.fighter_cap());
        for node in build_single_elim(tid, size, &roster) {
            assert!(node.winner.is_none());
            assert!(node.completed_at.is_none());
            assert_eq!(node.side, crate::domain::match_node::BracketSide::Winners);
        }
    }
}

//! Position evaluation for the evader.
//!
//! The score rewards mobility and distance from pursuers. Distances come
//! from a breadth-first search bounded at [`DISTANCE_CAP`] hops; anything
//! farther counts as one past the cap.

use rustc_hash::FxHashSet;

use crate::board::{Graph, Location};
use crate::core::Colour;
use crate::game::GameState;

/// Terminal score for an evader win.
pub const EVADER_WIN_SCORE: i32 = 10_000;

/// Terminal score for a pursuer win.
pub const PURSUER_WIN_SCORE: i32 = -10_000;

/// Score for a pursuer move combination that captures the evader.
/// Distinct from [`PURSUER_WIN_SCORE`]: a capture spotted while expanding
/// combinations is scored less severely than a fully evaluated loss.
pub const CAPTURE_SCORE: i32 = -1_000;

/// Penalty for standing adjacent to a pursuer.
pub const ADJACENT_PENALTY: i32 = 150;

/// BFS hop budget for pursuer distances.
pub const DISTANCE_CAP: u32 = 3;

/// Bounded hop distance from `from` to `to`.
///
/// Returns 0 for the same location, the exact hop count up to
/// [`DISTANCE_CAP`], and `DISTANCE_CAP + 1` for anything farther or
/// unreachable.
#[must_use]
pub fn bounded_distance(graph: &Graph, from: Location, to: Location) -> u32 {
    if from == to {
        return 0;
    }
    let mut visited: FxHashSet<Location> = FxHashSet::default();
    visited.insert(from);
    let mut frontier = vec![from];
    for hops in 1..=DISTANCE_CAP {
        let mut next = Vec::new();
        for location in frontier {
            for &(_, neighbor) in graph.neighbors(location) {
                if neighbor == to {
                    return hops;
                }
                if visited.insert(neighbor) {
                    next.push(neighbor);
                }
            }
        }
        if next.is_empty() {
            break;
        }
        frontier = next;
    }
    DISTANCE_CAP + 1
}

/// Score a position from the evader's point of view.
///
/// Terminal states collapse to the win sentinels. Otherwise the score is
/// twice the evader's legal-move count, plus a per-pursuer distance term
/// `40 * (d - 3) / d` in truncating integer arithmetic, with an extra
/// [`ADJACENT_PENALTY`] at distance 1. The distance term is negative at
/// d = 1 and d = 2 and zero at d = 3, so near pursuers drain the score on
/// top of the adjacency penalty.
#[must_use]
pub fn score_position(state: &GameState) -> i32 {
    let legal = state.legal_moves(Colour::EVADER);
    if state.is_game_over() {
        return if state.winners().contains(&Colour::EVADER) {
            EVADER_WIN_SCORE
        } else {
            PURSUER_WIN_SCORE
        };
    }

    let mut score = legal.len() as i32 * 2;
    let Some(evader_location) = state.true_location(Colour::EVADER) else {
        return score;
    };
    for pursuer in state.pursuers() {
        let d = bounded_distance(state.graph(), evader_location, pursuer.location()) as i32;
        if d == 1 {
            score -= ADJACENT_PENALTY;
        }
        score += 40 * (d - 3) / d;
    }
    score
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::board::{RoundSchedule, TransportKind};
    use crate::core::{PlayerConfig, TicketKind};

    fn path_graph(len: u32) -> Graph {
        let mut builder = Graph::builder();
        for i in 1..len {
            builder = builder.edge(Location(i), TransportKind::Taxi, Location(i + 1));
        }
        builder.build()
    }

    #[test]
    fn test_bounded_distance_exact_within_cap() {
        let graph = path_graph(6);
        assert_eq!(bounded_distance(&graph, Location(1), Location(1)), 0);
        assert_eq!(bounded_distance(&graph, Location(1), Location(2)), 1);
        assert_eq!(bounded_distance(&graph, Location(1), Location(3)), 2);
        assert_eq!(bounded_distance(&graph, Location(1), Location(4)), 3);
    }

    #[test]
    fn test_bounded_distance_caps_long_paths() {
        let graph = path_graph(8);
        assert_eq!(bounded_distance(&graph, Location(1), Location(5)), 4);
        assert_eq!(bounded_distance(&graph, Location(1), Location(8)), 4);
    }

    #[test]
    fn test_bounded_distance_unreachable() {
        let graph = Graph::builder()
            .edge(Location(1), TransportKind::Taxi, Location(2))
            .edge(Location(10), TransportKind::Taxi, Location(11))
            .build();
        assert_eq!(bounded_distance(&graph, Location(1), Location(10)), 4);
    }

    #[test]
    fn test_distance_term_arithmetic() {
        // truncating integer arithmetic per distance
        let term = |d: i32| 40 * (d - 3) / d;
        assert_eq!(term(1), -80);
        assert_eq!(term(2), -20);
        assert_eq!(term(3), 0);
        assert_eq!(term(4), 10);
    }

    fn full_config(colour: Colour, location: Location) -> PlayerConfig {
        PlayerConfig::new(colour, location)
            .with_ticket(TicketKind::Taxi, 5)
            .with_ticket(TicketKind::Bus, 0)
            .with_ticket(TicketKind::Underground, 0)
            .with_ticket(TicketKind::Secret, 0)
            .with_ticket(TicketKind::Double, 0)
    }

    #[test]
    fn test_adjacent_pursuer_is_heavily_penalized() {
        let graph = Arc::new(path_graph(8));
        let schedule = Arc::new(RoundSchedule::new(vec![false; 10]));

        let near = GameState::new_game(
            Arc::clone(&schedule),
            Arc::clone(&graph),
            full_config(Colour::Black, Location(4)),
            vec![full_config(Colour::Blue, Location(5))],
        )
        .unwrap();
        let far = GameState::new_game(
            schedule,
            graph,
            full_config(Colour::Black, Location(1)),
            vec![full_config(Colour::Blue, Location(8))],
        )
        .unwrap();

        assert!(score_position(&near) < score_position(&far));
        assert!(score_position(&near) < -ADJACENT_PENALTY / 2);
    }

    #[test]
    fn test_terminal_scores() {
        let graph = Arc::new(path_graph(4));
        let schedule = Arc::new(RoundSchedule::new(vec![false]));

        // evader with no tickets at all is stuck
        let stuck = GameState::new_game(
            Arc::clone(&schedule),
            Arc::clone(&graph),
            PlayerConfig::new(Colour::Black, Location(1))
                .with_tickets(TicketKind::ALL.map(|k| (k, 0))),
            vec![full_config(Colour::Blue, Location(3))],
        )
        .unwrap();
        assert_eq!(score_position(&stuck), PURSUER_WIN_SCORE);

        // pursuer with no tickets cannot chase
        let pursuers_stuck = GameState::new_game(
            schedule,
            graph,
            full_config(Colour::Black, Location(1)),
            vec![PlayerConfig::new(Colour::Blue, Location(3))
                .with_tickets(TicketKind::ALL.map(|k| (k, 0)))],
        )
        .unwrap();
        assert_eq!(score_position(&pursuers_stuck), EVADER_WIN_SCORE);
    }
}

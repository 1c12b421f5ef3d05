//! Depth-limited minimax with forward pruning for the evader.
//!
//! The searcher clones the game into private, fully visible states and
//! alternates evader (`max`) and combined-pursuer (`min`) plies down to a
//! fixed depth. Branching is bounded by destination deduplication and a
//! percentile score threshold rather than exact alpha-beta bounds, so move
//! selection matches the tuned behavior this search descends from.

use rustc_hash::FxHashSet;

use crate::board::{Location, RoundSchedule};
use crate::core::{Colour, Move, TicketKind};
use crate::game::{GameState, GameView};
use crate::strategy::Strategy;

use super::config::SearchConfig;
use super::heuristic::{score_position, CAPTURE_SCORE};

/// Minimax evader strategy.
///
/// Speculative states restart their round counter at 0, so the searcher
/// threads the authoritative round number through the recursion for
/// reveal-schedule checks; one consequence kept as-is is that the
/// round-limit win never fires inside the search.
pub struct MinimaxStrategy {
    config: SearchConfig,
}

impl Default for MinimaxStrategy {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl Strategy for MinimaxStrategy {
    fn choose_move(
        &mut self,
        view: &GameView<'_>,
        location: Location,
        legal: &FxHashSet<Move>,
    ) -> Move {
        let state = view.speculative_state(location);
        self.search(&state, view.current_round(), legal)
    }
}

impl MinimaxStrategy {
    /// Create a searcher with the given configuration.
    #[must_use]
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Pick the evader's move for the current round.
    fn search(&self, state: &GameState, round: usize, legal: &FxHashSet<Move>) -> Move {
        let schedule = state.schedule();
        let candidates = top_level_candidates(state, round, legal);
        let Some(first) = candidates.first() else {
            // nothing to search over; any legal move will do
            return legal
                .iter()
                .next()
                .copied()
                .unwrap_or(Move::pass(Colour::EVADER));
        };

        // One-ply scores over every candidate set the pruning threshold at
        // the 80th percentile before destinations are deduplicated.
        let scores: Vec<i32> = candidates
            .iter()
            .map(|mv| score_position(&apply(state, mv)))
            .collect();
        let threshold = upper_fifth(scores);

        let mut best_destination = first.destination().unwrap_or(Location::UNKNOWN);
        let mut high_score = None;
        for mv in dedup_by_destination(candidates) {
            let Some(destination) = mv.destination() else {
                continue;
            };
            let legs = if mv.is_double() { 2 } else { 1 };
            let next = apply(state, &mv);
            let score = self.min(
                &next,
                self.config.depth.saturating_sub(1),
                round + legs,
                threshold,
            );
            if high_score.map_or(true, |high| score > high) {
                high_score = Some(score);
                best_destination = destination;
            }
        }

        tracing::debug!(threshold, destination = %best_destination, "search complete");
        select_ticket(legal, best_destination, round, schedule)
    }

    /// Combined pursuer ply: minimize over the cartesian product of the
    /// pursuers' deduplicated move sets.
    fn min(&self, state: &GameState, depth: u32, round: usize, threshold: i32) -> i32 {
        if state.is_game_over() {
            return score_position(state);
        }
        let Some(evader_location) = state.true_location(Colour::EVADER) else {
            return score_position(state);
        };

        let pursuer_sets: Vec<Vec<Move>> = state
            .colours()
            .filter(|colour| !colour.is_evader())
            .map(|colour| dedup_by_destination(state.legal_moves(colour).into_iter().collect()))
            .collect();

        let mut minimum = i32::MAX;
        for combo in combinations(&pursuer_sets) {
            if has_duplicate_destination(&combo) {
                continue;
            }
            if combo
                .iter()
                .any(|mv| mv.destination() == Some(evader_location))
            {
                // captured: stop expanding this node entirely
                return CAPTURE_SCORE;
            }
            let next = apply_all(state, &combo);
            let score = score_position(&next);
            if depth == 0 || score < threshold {
                return score;
            }
            let score = self.max(&next, depth - 1, round, threshold);
            minimum = minimum.min(score);
        }
        minimum
    }

    /// Evader ply: maximize over destination-deduplicated candidates.
    fn max(&self, state: &GameState, depth: u32, round: usize, threshold: i32) -> i32 {
        if state.is_game_over() {
            return score_position(state);
        }
        let legal = state.legal_moves(Colour::EVADER);
        let candidates: Vec<Move> = if state.schedule().is_reveal(round) {
            legal.into_iter().collect()
        } else {
            legal.into_iter().filter(|mv| !mv.is_double()).collect()
        };

        let mut maximum = i32::MIN;
        for mv in dedup_by_destination(candidates) {
            let legs = if mv.is_double() { 2 } else { 1 };
            let next = apply(state, &mv);
            let score = score_position(&next);
            if depth == 0 || score < threshold {
                return score;
            }
            let score = self.min(&next, depth - 1, round + legs, threshold);
            maximum = maximum.max(score);
        }
        maximum
    }
}

/// Candidates for the authoritative round: singles only on non-reveal
/// rounds; doubles only on reveal rounds where a double is affordable,
/// falling back to singles when none is.
fn top_level_candidates(state: &GameState, round: usize, legal: &FxHashSet<Move>) -> Vec<Move> {
    let singles: Vec<Move> = legal
        .iter()
        .filter(|mv| !mv.is_double() && !mv.is_pass())
        .copied()
        .collect();
    if !state.schedule().is_reveal(round) {
        return singles;
    }
    let doubles: Vec<Move> = legal.iter().filter(|mv| mv.is_double()).copied().collect();
    if doubles.is_empty() {
        singles
    } else {
        doubles
    }
}

/// Keep one representative move per destination; passes carry none and
/// are kept as-is.
fn dedup_by_destination(moves: Vec<Move>) -> Vec<Move> {
    let mut seen = FxHashSet::default();
    let mut kept = Vec::with_capacity(moves.len());
    for mv in moves {
        match mv.destination() {
            Some(destination) => {
                if seen.insert(destination) {
                    kept.push(mv);
                }
            }
            None => kept.push(mv),
        }
    }
    kept
}

/// Cartesian product of per-pursuer move sets.
fn combinations(sets: &[Vec<Move>]) -> Vec<Vec<Move>> {
    let mut combos = vec![Vec::new()];
    for set in sets {
        let mut extended = Vec::with_capacity(combos.len() * set.len());
        for prefix in &combos {
            for mv in set {
                let mut combo = prefix.clone();
                combo.push(*mv);
                extended.push(combo);
            }
        }
        combos = extended;
    }
    combos
}

/// Two pursuers may not move to the same destination.
fn has_duplicate_destination(combo: &[Move]) -> bool {
    let mut seen = FxHashSet::default();
    combo
        .iter()
        .filter_map(Move::destination)
        .any(|destination| !seen.insert(destination))
}

/// Rebuild a speculative state with one move applied, using the engine's
/// ticket semantics: pursuer tickets recycle to the evader; a double move
/// consumes both leg tickets and the double ticket.
fn apply(state: &GameState, mv: &Move) -> GameState {
    let mut players = state.players_snapshot();
    match mv {
        Move::Pass(_) => {}
        Move::Single(tm) if tm.colour.is_evader() => {
            players[0].remove_ticket(tm.ticket);
            players[0].set_location(tm.destination);
        }
        Move::Single(tm) => {
            if let Some(index) = players.iter().position(|p| p.colour() == tm.colour) {
                players[index].remove_ticket(tm.ticket);
                players[index].set_location(tm.destination);
                players[0].add_ticket(tm.ticket);
            }
        }
        Move::Double(dm) => {
            players[0].remove_ticket(dm.first.ticket);
            players[0].remove_ticket(dm.second.ticket);
            players[0].remove_ticket(TicketKind::Double);
            players[0].set_location(dm.final_destination());
        }
    }
    GameState::speculative(state.graph_handle(), state.schedule_handle(), players)
}

fn apply_all(state: &GameState, moves: &[Move]) -> GameState {
    let mut current = apply(state, &moves[0]);
    for mv in &moves[1..] {
        current = apply(&current, mv);
    }
    current
}

/// Choose the cheapest ticket move reaching `destination`.
///
/// Singles beat doubles to the same destination; ticket kinds are spent in
/// taxi > bus > underground order; the secret ticket is promoted right
/// after a reveal round (first leg) or into one (second leg).
fn select_ticket(
    legal: &FxHashSet<Move>,
    destination: Location,
    round: usize,
    schedule: &RoundSchedule,
) -> Move {
    let to_destination: Vec<&Move> = legal
        .iter()
        .filter(|mv| mv.destination() == Some(destination))
        .collect();
    let pool: Vec<&Move> = if to_destination.is_empty() {
        legal.iter().collect()
    } else {
        to_destination
    };

    let mut best: Option<(i32, &Move)> = None;
    for mv in pool {
        let mut score = 0;
        if !mv.is_double() && !mv.is_pass() {
            score += 1000;
        }
        if let Some(first) = mv.first_leg() {
            if round != 0 && schedule.is_reveal(round - 1) && first.ticket == TicketKind::Secret {
                score += 20;
            }
            score += kind_bonus(first.ticket);
        }
        if let Some(second) = mv.second_leg() {
            if schedule.is_reveal(round) && second.ticket == TicketKind::Secret {
                score += 20;
            }
            score += kind_bonus(second.ticket);
        }
        if best.map_or(true, |(high, _)| score > high) {
            best = Some((score, mv));
        }
    }
    best.map_or(Move::pass(Colour::EVADER), |(_, mv)| *mv)
}

/// Expendable kinds first; secret and double tickets score nothing and
/// are conserved.
fn kind_bonus(ticket: TicketKind) -> i32 {
    match ticket {
        TicketKind::Taxi => 15,
        TicketKind::Bus => 10,
        TicketKind::Underground => 5,
        TicketKind::Secret | TicketKind::Double => 0,
    }
}

/// The 80th-percentile element of the score list.
fn upper_fifth(mut scores: Vec<i32>) -> i32 {
    scores.sort_unstable();
    scores[scores.len() * 4 / 5]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TicketMove;

    fn single(destination: u32, ticket: TicketKind) -> Move {
        Move::single(Colour::Black, ticket, Location(destination))
    }

    #[test]
    fn test_upper_fifth() {
        assert_eq!(upper_fifth(vec![5]), 5);
        assert_eq!(upper_fifth(vec![1, 2, 3, 4, 5]), 5);
        assert_eq!(upper_fifth(vec![10, -3, 7, 2, 0, 4, 9, 1, 6, 8]), 9);
    }

    #[test]
    fn test_dedup_keeps_first_per_destination() {
        let moves = vec![
            single(2, TicketKind::Taxi),
            single(2, TicketKind::Bus),
            single(3, TicketKind::Taxi),
        ];
        let kept = dedup_by_destination(moves);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0], single(2, TicketKind::Taxi));
        assert_eq!(kept[1], single(3, TicketKind::Taxi));
    }

    #[test]
    fn test_combinations_cover_product() {
        let sets = vec![
            vec![single(1, TicketKind::Taxi), single(2, TicketKind::Taxi)],
            vec![single(3, TicketKind::Taxi)],
        ];
        let combos = combinations(&sets);
        assert_eq!(combos.len(), 2);
        assert!(combos.iter().all(|combo| combo.len() == 2));
    }

    #[test]
    fn test_duplicate_destination_detection() {
        let clash = vec![
            Move::single(Colour::Blue, TicketKind::Taxi, Location(4)),
            Move::single(Colour::Green, TicketKind::Bus, Location(4)),
        ];
        assert!(has_duplicate_destination(&clash));

        let passes = vec![Move::pass(Colour::Blue), Move::pass(Colour::Green)];
        assert!(!has_duplicate_destination(&passes));
    }

    #[test]
    fn test_select_ticket_prefers_single_and_cheap_kinds() {
        let mut legal = FxHashSet::default();
        legal.insert(single(2, TicketKind::Taxi));
        legal.insert(single(2, TicketKind::Secret));
        legal.insert(Move::double(
            Colour::Black,
            TicketMove::new(Colour::Black, TicketKind::Taxi, Location(3)),
            TicketMove::new(Colour::Black, TicketKind::Taxi, Location(2)),
        ));

        let schedule = RoundSchedule::new(vec![false, false]);
        let chosen = select_ticket(&legal, Location(2), 0, &schedule);
        assert_eq!(chosen, single(2, TicketKind::Taxi));
    }

    #[test]
    fn test_select_ticket_promotes_secret_after_reveal() {
        let mut legal = FxHashSet::default();
        legal.insert(single(2, TicketKind::Underground));
        legal.insert(single(2, TicketKind::Secret));

        // round 0 revealed, choosing for round 1
        let schedule = RoundSchedule::new(vec![true, false]);
        let chosen = select_ticket(&legal, Location(2), 1, &schedule);
        assert_eq!(chosen, single(2, TicketKind::Secret));

        // without a preceding reveal the cheap kind wins
        let schedule = RoundSchedule::new(vec![false, false]);
        let chosen = select_ticket(&legal, Location(2), 1, &schedule);
        assert_eq!(chosen, single(2, TicketKind::Underground));
    }
}

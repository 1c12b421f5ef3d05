//! Read-only game views.
//!
//! `GameView` is what strategies and observers see: everything public,
//! with the evader's location filtered through the reveal policy. The
//! search reconstructs a fully visible state from a view by substituting
//! the evader's true location explicitly via [`GameView::speculative_state`].

use rustc_hash::FxHashSet;

use crate::board::{Graph, Location, RoundSchedule};
use crate::core::{Colour, TicketKind};

use super::state::GameState;

/// A read-only window onto a [`GameState`].
#[derive(Clone, Copy)]
pub struct GameView<'a> {
    state: &'a GameState,
}

impl<'a> GameView<'a> {
    pub(crate) fn new(state: &'a GameState) -> Self {
        Self { state }
    }

    /// Number of completed rounds (evader moves).
    #[must_use]
    pub fn current_round(&self) -> usize {
        self.state.current_round()
    }

    /// The colour whose move is awaited.
    #[must_use]
    pub fn current_colour(&self) -> Colour {
        self.state.current_colour()
    }

    /// Will the round about to be played reveal the evader?
    #[must_use]
    pub fn is_reveal_round(&self) -> bool {
        self.state.schedule().is_reveal(self.state.current_round())
    }

    /// Did the most recently completed round reveal the evader?
    #[must_use]
    pub fn last_round_revealed(&self) -> bool {
        let round = self.state.current_round();
        round > 0 && self.state.schedule().is_reveal(round - 1)
    }

    /// All colours in turn order, evader first.
    pub fn colours(&self) -> impl Iterator<Item = Colour> + 'a {
        self.state.colours()
    }

    /// Remaining tickets of one kind, `None` for a colour not in the game.
    #[must_use]
    pub fn tickets(&self, colour: Colour, kind: TicketKind) -> Option<u32> {
        self.state.player(colour).map(|p| p.ticket_count(kind))
    }

    /// A colour's publicly visible location.
    ///
    /// Pursuers are always visible. For the evader this is the last
    /// revealed location — `None` until the first reveal round — while the
    /// true location keeps moving underneath.
    #[must_use]
    pub fn location(&self, colour: Colour) -> Option<Location> {
        let player = self.state.player(colour)?;
        if colour.is_evader() {
            player.last_revealed()
        } else {
            Some(player.location())
        }
    }

    /// The reveal schedule.
    #[must_use]
    pub fn schedule(&self) -> &'a RoundSchedule {
        self.state.schedule()
    }

    /// The board graph.
    #[must_use]
    pub fn graph(&self) -> &'a Graph {
        self.state.graph()
    }

    /// Does a win condition hold?
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// The winning colour set; empty while the game is live.
    #[must_use]
    pub fn winners(&self) -> FxHashSet<Colour> {
        self.state.winners()
    }

    /// Build a private, fully visible state for search.
    ///
    /// The caller substitutes the evader's true location explicitly (its
    /// own strategies receive it with each move request). The returned
    /// state shares the immutable graph and schedule, deep-copies all
    /// player state, has no observers, and restarts its round counter at 0.
    #[must_use]
    pub fn speculative_state(&self, evader_location: Location) -> GameState {
        let mut players = self.state.players_snapshot();
        players[0].set_location(evader_location);
        GameState::speculative(
            self.state.graph_handle(),
            self.state.schedule_handle(),
            players,
        )
    }
}

//! Spectator notifications.
//!
//! Observers see the game through [`GameView`], so they are subject to the
//! same visibility policy as strategies: evader moves are reported with
//! masked destinations on non-reveal rounds.

use rustc_hash::FxHashSet;

use crate::core::{Colour, Move};

use super::view::GameView;

/// Receives game events as they happen.
///
/// All methods default to no-ops so observers implement only what they
/// need. Notification is a synchronous fan-out over a snapshot of the
/// registry; observers may register or unregister between turns.
pub trait Observer {
    /// A new round has started (rounds are numbered from 1 here, matching
    /// the count of completed evader moves).
    fn on_round_started(&self, view: &GameView<'_>, round: usize) {
        let _ = (view, round);
    }

    /// A move was applied. Evader moves carry publicly visible
    /// destinations, not true ones; each leg of a double move is reported
    /// individually after the compound announcement.
    fn on_move_made(&self, view: &GameView<'_>, mv: &Move) {
        let _ = (view, mv);
    }

    /// Every colour has moved this rotation and the game continues.
    fn on_rotation_complete(&self, view: &GameView<'_>) {
        let _ = view;
    }

    /// A win condition holds; `winners` is the winning colour set.
    fn on_game_over(&self, view: &GameView<'_>, winners: &FxHashSet<Colour>) {
        let _ = (view, winners);
    }
}

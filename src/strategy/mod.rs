//! Strategies and the turn driver.
//!
//! A [`Strategy`] supplies one move per request; [`Session`] owns the
//! authoritative state plus one strategy per colour and runs rotations.
//! The engine validates every returned move, so a misbehaving strategy
//! surfaces as [`MoveError::Illegal`] rather than corrupting state.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::board::Location;
use crate::core::{Colour, GameRng, Move};
use crate::game::{ConfigError, GameState, GameView, MoveError};

/// Supplies moves for one colour.
///
/// `choose_move` is invoked synchronously with the public view, the
/// mover's true location, and the legal-move set; returning the move is
/// the single completion callback. The returned move must be a member of
/// `legal` — anything else is rejected by the engine.
pub trait Strategy {
    fn choose_move(
        &mut self,
        view: &GameView<'_>,
        location: Location,
        legal: &FxHashSet<Move>,
    ) -> Move;
}

/// Uniform-random strategy, deterministic under a fixed seed.
pub struct RandomStrategy {
    rng: GameRng,
}

impl RandomStrategy {
    /// Create a random strategy with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl Strategy for RandomStrategy {
    fn choose_move(
        &mut self,
        _view: &GameView<'_>,
        _location: Location,
        legal: &FxHashSet<Move>,
    ) -> Move {
        let moves: Vec<&Move> = legal.iter().collect();
        // the engine never requests a move from an empty legal set
        self.rng
            .choose(&moves)
            .map(|mv| **mv)
            .expect("legal move set is never empty")
    }
}

/// Owns one game and drives it to completion.
///
/// Each turn: ask the awaited colour's strategy for a move against the
/// current view and legal set, then apply it. Strategies are invoked one
/// at a time; a rejected move aborts the rotation with the error.
pub struct Session {
    state: GameState,
    strategies: FxHashMap<Colour, Box<dyn Strategy>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("strategies", &self.strategies.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Session {
    /// Pair a game with one strategy per colour.
    pub fn new(
        state: GameState,
        strategies: FxHashMap<Colour, Box<dyn Strategy>>,
    ) -> Result<Self, ConfigError> {
        for colour in state.colours() {
            if !strategies.contains_key(&colour) {
                return Err(ConfigError::MissingStrategy(colour));
            }
        }
        Ok(Self { state, strategies })
    }

    /// The underlying game state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Play a single turn of the awaited colour.
    pub fn play_turn(&mut self) -> Result<(), MoveError> {
        if self.state.concluded() {
            return Err(MoveError::GameOver);
        }
        let colour = self.state.current_colour();
        let legal = self.state.legal_moves(colour);
        let mv = {
            let view = self.state.view();
            let location = self
                .state
                .true_location(colour)
                .unwrap_or(Location::UNKNOWN);
            let Some(strategy) = self.strategies.get_mut(&colour) else {
                // Session::new guarantees a strategy per colour
                return Err(MoveError::Illegal(colour));
            };
            strategy.choose_move(&view, location, &legal)
        };
        self.state.advance_turn(&mv)
    }

    /// Play until the rotation completes or the game ends.
    pub fn play_rotation(&mut self) -> Result<(), MoveError> {
        loop {
            self.play_turn()?;
            if self.state.concluded() || self.state.at_rotation_start() {
                return Ok(());
            }
        }
    }

    /// Play rotations until a win condition holds; returns the winners.
    pub fn play(&mut self) -> Result<FxHashSet<Colour>, MoveError> {
        while !self.state.concluded() {
            self.play_rotation()?;
        }
        Ok(self.state.winners())
    }
}

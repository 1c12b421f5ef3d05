//! # pursuit-engine
//!
//! The authoritative rules engine for a hidden-movement pursuit board
//! game — one evader with a partially concealed position against several
//! fully visible pursuers — plus a minimax computer opponent that plays
//! the evader.
//!
//! ## Design Principles
//!
//! 1. **Explicit ownership**: the state machine exclusively owns the
//!    player roster and ticket wallets. Search clones deep-copy mutable
//!    state and share only the immutable graph and schedule by `Arc`.
//!
//! 2. **One visibility policy, two surfaces**: [`GameView`] applies the
//!    reveal schedule for strategies and observers, while the search uses
//!    an explicit oracle reconstruction
//!    ([`GameView::speculative_state`]) — a documented simplification,
//!    not a belief-state search.
//!
//! 3. **Moves as values**: a `Move` is a tagged union inspected through
//!    exhaustive pattern matching, never a visitor hierarchy.
//!
//! ## Modules
//!
//! - `board`: the location graph and reveal schedule
//! - `core`: colours, tickets, moves, players, deterministic RNG
//! - `game`: the turn-based state machine, views, observers, errors
//! - `strategy`: the move-supplier contract, session driver, random player
//! - `search`: depth-limited minimax with forward pruning

pub mod board;
pub mod core;
pub mod game;
pub mod search;
pub mod strategy;

// Re-export commonly used types
pub use crate::board::{Graph, GraphBuilder, Location, RoundSchedule, TransportKind};

pub use crate::core::{Colour, DoubleMove, GameRng, Move, PlayerConfig, PlayerState, TicketKind, TicketMove};

pub use crate::game::{ConfigError, GameState, GameView, MoveError, Observer, ObserverError};

pub use crate::strategy::{RandomStrategy, Session, Strategy};

pub use crate::search::{MinimaxStrategy, SearchConfig};

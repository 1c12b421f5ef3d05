//! Core value types: colours, tickets, moves, players, RNG.

mod colour;
mod moves;
mod player;
mod rng;
mod ticket;

pub use colour::Colour;
pub use moves::{DoubleMove, Move, TicketMove};
pub use player::{PlayerConfig, PlayerState};
pub use rng::GameRng;
pub use ticket::TicketKind;

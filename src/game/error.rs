//! Error types for game construction and play.

use thiserror::Error;

use crate::board::Location;
use crate::core::{Colour, TicketKind};

/// A fatal configuration error: the game cannot be created.
///
/// Each variant names the violated construction invariant.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("round schedule is empty")]
    EmptySchedule,

    #[error("board graph is empty")]
    EmptyGraph,

    #[error("at least one pursuer is required")]
    NoPursuers,

    #[error("the evader must play Black, got {0}")]
    EvaderColour(Colour),

    #[error("duplicate colour {0}")]
    DuplicateColour(Colour),

    #[error("duplicate starting location {0}")]
    DuplicateLocation(Location),

    #[error("{colour} has no ticket entry for {kind}")]
    MissingTicket { colour: Colour, kind: TicketKind },

    #[error("pursuer {colour} may not hold {kind} tickets")]
    ForbiddenTicket { colour: Colour, kind: TicketKind },

    #[error("no strategy supplied for {0}")]
    MissingStrategy(Colour),
}

/// A rejected move. The game state is left unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("the game is already over")]
    GameOver,

    #[error("it is not {0}'s turn")]
    OutOfTurn(Colour),

    #[error("move is not in the legal set for {0}")]
    Illegal(Colour),
}

/// Observer registry misuse.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ObserverError {
    #[error("observer is already registered")]
    AlreadyRegistered,

    #[error("observer is not registered")]
    NotRegistered,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_messages() {
        assert_eq!(ConfigError::EmptySchedule.to_string(), "round schedule is empty");
        assert_eq!(
            ConfigError::DuplicateLocation(Location(13)).to_string(),
            "duplicate starting location 13"
        );
        assert_eq!(
            ConfigError::ForbiddenTicket {
                colour: Colour::Blue,
                kind: TicketKind::Double,
            }
            .to_string(),
            "pursuer Blue may not hold Double tickets"
        );
    }

    #[test]
    fn test_move_error_messages() {
        assert_eq!(
            MoveError::OutOfTurn(Colour::Red).to_string(),
            "it is not Red's turn"
        );
        assert_eq!(MoveError::GameOver.to_string(), "the game is already over");
    }
}

//! Player colours.
//!
//! Colours identify players for the lifetime of a game. `Black` is the
//! distinguished evader colour; every other colour is a pursuer.

use serde::{Deserialize, Serialize};

/// A player colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Colour {
    Black,
    Blue,
    Green,
    Red,
    White,
    Yellow,
}

impl Colour {
    /// The distinguished evader colour.
    pub const EVADER: Colour = Colour::Black;

    /// All colours, evader first.
    pub const ALL: [Colour; 6] = [
        Colour::Black,
        Colour::Blue,
        Colour::Green,
        Colour::Red,
        Colour::White,
        Colour::Yellow,
    ];

    /// Is this the evader colour?
    #[must_use]
    pub const fn is_evader(self) -> bool {
        matches!(self, Colour::Black)
    }
}

impl std::fmt::Display for Colour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Colour::Black => "Black",
            Colour::Blue => "Blue",
            Colour::Green => "Green",
            Colour::Red => "Red",
            Colour::White => "White",
            Colour::Yellow => "Yellow",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evader_colour() {
        assert!(Colour::Black.is_evader());
        assert!(!Colour::Blue.is_evader());
        assert_eq!(Colour::EVADER, Colour::Black);
    }

    #[test]
    fn test_all_lists_evader_first() {
        assert_eq!(Colour::ALL[0], Colour::EVADER);
        assert_eq!(Colour::ALL.len(), 6);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Colour::White), "White");
    }
}

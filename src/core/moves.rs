//! Move representation: pass, single-ticket, and double-ticket moves.
//!
//! Moves are immutable value objects compared by structural equality.
//! All inspection goes through the inherent dispatch methods (`colour`,
//! `destination`, `tickets`, ...) so other components never branch on the
//! variant themselves.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::Location;

use super::colour::Colour;
use super::ticket::TicketKind;

/// A single-ticket move: spend `ticket`, travel to `destination`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketMove {
    pub colour: Colour,
    pub ticket: TicketKind,
    pub destination: Location,
}

impl TicketMove {
    /// Create a single-ticket move.
    #[must_use]
    pub const fn new(colour: Colour, ticket: TicketKind, destination: Location) -> Self {
        Self {
            colour,
            ticket,
            destination,
        }
    }
}

/// A compound evader turn: two sequential legs plus a double ticket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DoubleMove {
    pub colour: Colour,
    pub first: TicketMove,
    pub second: TicketMove,
}

impl DoubleMove {
    /// Create a double move from its two legs.
    #[must_use]
    pub const fn new(colour: Colour, first: TicketMove, second: TicketMove) -> Self {
        Self {
            colour,
            first,
            second,
        }
    }

    /// The final destination after both legs.
    #[must_use]
    pub const fn final_destination(&self) -> Location {
        self.second.destination
    }
}

/// A complete move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Forfeit the turn. Only legal for a pursuer with no single moves.
    Pass(Colour),
    /// A single-ticket move.
    Single(TicketMove),
    /// A double-ticket evader move.
    Double(DoubleMove),
}

impl Move {
    /// Create a pass move.
    #[must_use]
    pub const fn pass(colour: Colour) -> Self {
        Move::Pass(colour)
    }

    /// Create a single-ticket move.
    #[must_use]
    pub const fn single(colour: Colour, ticket: TicketKind, destination: Location) -> Self {
        Move::Single(TicketMove::new(colour, ticket, destination))
    }

    /// Create a double move from its two legs.
    #[must_use]
    pub const fn double(colour: Colour, first: TicketMove, second: TicketMove) -> Self {
        Move::Double(DoubleMove::new(colour, first, second))
    }

    /// The colour making this move.
    #[must_use]
    pub const fn colour(&self) -> Colour {
        match self {
            Move::Pass(colour) => *colour,
            Move::Single(tm) => tm.colour,
            Move::Double(dm) => dm.colour,
        }
    }

    /// The final destination, if the move travels anywhere.
    #[must_use]
    pub const fn destination(&self) -> Option<Location> {
        match self {
            Move::Pass(_) => None,
            Move::Single(tm) => Some(tm.destination),
            Move::Double(dm) => Some(dm.final_destination()),
        }
    }

    /// Is this a pass?
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self, Move::Pass(_))
    }

    /// Is this a double move?
    #[must_use]
    pub const fn is_double(&self) -> bool {
        matches!(self, Move::Double(_))
    }

    /// The first travelling leg, if any.
    #[must_use]
    pub const fn first_leg(&self) -> Option<&TicketMove> {
        match self {
            Move::Pass(_) => None,
            Move::Single(tm) => Some(tm),
            Move::Double(dm) => Some(&dm.first),
        }
    }

    /// The second leg of a double move.
    #[must_use]
    pub const fn second_leg(&self) -> Option<&TicketMove> {
        match self {
            Move::Double(dm) => Some(&dm.second),
            _ => None,
        }
    }

    /// Every ticket this move consumes, in spend order.
    ///
    /// A double move consumes its two leg tickets plus the double ticket.
    #[must_use]
    pub fn tickets(&self) -> SmallVec<[TicketKind; 3]> {
        match self {
            Move::Pass(_) => SmallVec::new(),
            Move::Single(tm) => SmallVec::from_slice(&[tm.ticket]),
            Move::Double(dm) => {
                SmallVec::from_slice(&[dm.first.ticket, dm.second.ticket, TicketKind::Double])
            }
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Pass(colour) => write!(f, "{colour} passes"),
            Move::Single(tm) => write!(f, "{} -{}-> {}", tm.colour, tm.ticket, tm.destination),
            Move::Double(dm) => write!(
                f,
                "{} -{}-> {} -{}-> {}",
                dm.colour, dm.first.ticket, dm.first.destination, dm.second.ticket, dm.second.destination
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leg(ticket: TicketKind, destination: u32) -> TicketMove {
        TicketMove::new(Colour::Black, ticket, Location(destination))
    }

    #[test]
    fn test_pass_dispatch() {
        let mv = Move::pass(Colour::Blue);
        assert_eq!(mv.colour(), Colour::Blue);
        assert!(mv.is_pass());
        assert!(!mv.is_double());
        assert_eq!(mv.destination(), None);
        assert!(mv.tickets().is_empty());
        assert!(mv.first_leg().is_none());
    }

    #[test]
    fn test_single_dispatch() {
        let mv = Move::single(Colour::Red, TicketKind::Bus, Location(7));
        assert_eq!(mv.colour(), Colour::Red);
        assert!(!mv.is_pass());
        assert!(!mv.is_double());
        assert_eq!(mv.destination(), Some(Location(7)));
        assert_eq!(mv.tickets().as_slice(), &[TicketKind::Bus]);
        assert_eq!(mv.first_leg().map(|l| l.destination), Some(Location(7)));
        assert!(mv.second_leg().is_none());
    }

    #[test]
    fn test_double_dispatch() {
        let mv = Move::double(Colour::Black, leg(TicketKind::Taxi, 4), leg(TicketKind::Secret, 9));
        assert_eq!(mv.colour(), Colour::Black);
        assert!(mv.is_double());
        assert_eq!(mv.destination(), Some(Location(9)));
        assert_eq!(
            mv.tickets().as_slice(),
            &[TicketKind::Taxi, TicketKind::Secret, TicketKind::Double]
        );
        assert_eq!(mv.first_leg().map(|l| l.destination), Some(Location(4)));
        assert_eq!(mv.second_leg().map(|l| l.destination), Some(Location(9)));
    }

    #[test]
    fn test_structural_equality() {
        let a = Move::single(Colour::Black, TicketKind::Taxi, Location(3));
        let b = Move::single(Colour::Black, TicketKind::Taxi, Location(3));
        let c = Move::single(Colour::Black, TicketKind::Bus, Location(3));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_move_hash_matches_equality() {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let hash = |mv: &Move| {
            let mut h = DefaultHasher::new();
            mv.hash(&mut h);
            h.finish()
        };

        let a = Move::double(Colour::Black, leg(TicketKind::Taxi, 4), leg(TicketKind::Taxi, 5));
        let b = Move::double(Colour::Black, leg(TicketKind::Taxi, 4), leg(TicketKind::Taxi, 5));
        assert_eq!(hash(&a), hash(&b));
    }

    #[test]
    fn test_move_serialization() {
        let mv = Move::double(Colour::Black, leg(TicketKind::Bus, 2), leg(TicketKind::Taxi, 6));
        let json = serde_json::to_string(&mv).unwrap();
        let deserialized: Move = serde_json::from_str(&json).unwrap();
        assert_eq!(mv, deserialized);
    }
}

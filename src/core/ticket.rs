//! Ticket kinds and the transport-to-ticket mapping.

use serde::{Deserialize, Serialize};

use crate::board::TransportKind;

/// A ticket kind.
///
/// The first four authorize crossing an edge of the matching transport;
/// `Double` has no transport of its own and instead authorizes a compound
/// two-leg evader turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TicketKind {
    Taxi,
    Bus,
    Underground,
    Secret,
    Double,
}

impl TicketKind {
    /// All ticket kinds.
    pub const ALL: [TicketKind; 5] = [
        TicketKind::Taxi,
        TicketKind::Bus,
        TicketKind::Underground,
        TicketKind::Secret,
        TicketKind::Double,
    ];

    /// The ticket required to cross an edge of the given transport.
    ///
    /// Ferry crossings consume secret tickets.
    #[must_use]
    pub const fn for_transport(transport: TransportKind) -> TicketKind {
        match transport {
            TransportKind::Taxi => TicketKind::Taxi,
            TransportKind::Bus => TicketKind::Bus,
            TransportKind::Underground => TicketKind::Underground,
            TransportKind::Ferry => TicketKind::Secret,
        }
    }
}

impl std::fmt::Display for TicketKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TicketKind::Taxi => "Taxi",
            TicketKind::Bus => "Bus",
            TicketKind::Underground => "Underground",
            TicketKind::Secret => "Secret",
            TicketKind::Double => "Double",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_mapping() {
        assert_eq!(TicketKind::for_transport(TransportKind::Taxi), TicketKind::Taxi);
        assert_eq!(TicketKind::for_transport(TransportKind::Bus), TicketKind::Bus);
        assert_eq!(
            TicketKind::for_transport(TransportKind::Underground),
            TicketKind::Underground
        );
        assert_eq!(TicketKind::for_transport(TransportKind::Ferry), TicketKind::Secret);
    }

    #[test]
    fn test_all_has_five_kinds() {
        assert_eq!(TicketKind::ALL.len(), 5);
        assert!(TicketKind::ALL.contains(&TicketKind::Double));
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&TicketKind::Secret).unwrap();
        let deserialized: TicketKind = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, TicketKind::Secret);
    }
}

//! Per-player configuration and mutable in-game state.
//!
//! `PlayerConfig` is the construction-time description of a player;
//! `PlayerState` is the state machine's mutable record. Ticket wallets are
//! only ever mutated by the state machine (and by the search, on private
//! clones).

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::board::Location;

use super::colour::Colour;
use super::ticket::TicketKind;

/// Construction-time description of one player.
///
/// Built with the builder-style `with_*` methods:
///
/// ```
/// use pursuit_engine::board::Location;
/// use pursuit_engine::core::{Colour, PlayerConfig, TicketKind};
///
/// let config = PlayerConfig::new(Colour::Blue, Location(13))
///     .with_ticket(TicketKind::Taxi, 10)
///     .with_ticket(TicketKind::Bus, 8)
///     .with_ticket(TicketKind::Underground, 4)
///     .with_ticket(TicketKind::Secret, 0)
///     .with_ticket(TicketKind::Double, 0);
/// assert_eq!(config.tickets.get(&TicketKind::Taxi), Some(&10));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub colour: Colour,
    pub location: Location,
    /// Ticket endowment. Validation requires an entry for every kind.
    pub tickets: FxHashMap<TicketKind, u32>,
}

impl PlayerConfig {
    /// Create a config with an empty wallet.
    #[must_use]
    pub fn new(colour: Colour, location: Location) -> Self {
        Self {
            colour,
            location,
            tickets: FxHashMap::default(),
        }
    }

    /// Set the count for one ticket kind.
    #[must_use]
    pub fn with_ticket(mut self, kind: TicketKind, count: u32) -> Self {
        self.tickets.insert(kind, count);
        self
    }

    /// Set counts for several ticket kinds at once.
    #[must_use]
    pub fn with_tickets(mut self, tickets: impl IntoIterator<Item = (TicketKind, u32)>) -> Self {
        self.tickets.extend(tickets);
        self
    }
}

/// Mutable per-player state owned by the state machine.
///
/// Cloning deep-copies the wallet, so clones used for search never alias
/// the authoritative state.
#[derive(Clone, Debug)]
pub struct PlayerState {
    colour: Colour,
    location: Location,
    tickets: FxHashMap<TicketKind, u32>,
    /// Evader only: the location last shown to the public. `None` until the
    /// first reveal round.
    last_revealed: Option<Location>,
}

impl PlayerState {
    /// Build in-game state from a validated config.
    #[must_use]
    pub(crate) fn from_config(config: &PlayerConfig) -> Self {
        Self {
            colour: config.colour,
            location: config.location,
            tickets: config.tickets.clone(),
            last_revealed: None,
        }
    }

    /// This player's colour.
    #[must_use]
    pub fn colour(&self) -> Colour {
        self.colour
    }

    /// True current location.
    #[must_use]
    pub fn location(&self) -> Location {
        self.location
    }

    pub(crate) fn set_location(&mut self, location: Location) {
        self.location = location;
    }

    /// Remaining count for one ticket kind.
    #[must_use]
    pub fn ticket_count(&self, kind: TicketKind) -> u32 {
        self.tickets.get(&kind).copied().unwrap_or(0)
    }

    /// Does the player hold at least one ticket of this kind?
    #[must_use]
    pub fn has_ticket(&self, kind: TicketKind) -> bool {
        self.has_tickets(kind, 1)
    }

    /// Does the player hold at least `count` tickets of this kind?
    #[must_use]
    pub fn has_tickets(&self, kind: TicketKind, count: u32) -> bool {
        self.ticket_count(kind) >= count
    }

    /// The full wallet.
    #[must_use]
    pub fn tickets(&self) -> &FxHashMap<TicketKind, u32> {
        &self.tickets
    }

    pub(crate) fn add_ticket(&mut self, kind: TicketKind) {
        *self.tickets.entry(kind).or_insert(0) += 1;
    }

    /// Spend one ticket. Callers establish legality first, so the count is
    /// never zero here.
    pub(crate) fn remove_ticket(&mut self, kind: TicketKind) {
        let count = self.tickets.entry(kind).or_insert(0);
        *count = count.saturating_sub(1);
    }

    /// Evader only: the publicly known location, if any reveal has happened.
    #[must_use]
    pub fn last_revealed(&self) -> Option<Location> {
        self.last_revealed
    }

    /// Evader only: publish the true location.
    pub(crate) fn reveal(&mut self) {
        self.last_revealed = Some(self.location);
    }
}

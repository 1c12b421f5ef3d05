//! The board graph: numbered locations connected by typed transport edges.
//!
//! The graph is immutable after construction. It answers exactly one
//! question — which `(transport, destination)` pairs leave a location —
//! and leaves pathfinding to callers.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A numbered board location.
///
/// Board data conventionally numbers locations from 1; the engine treats
/// ids as opaque and reserves `Location::UNKNOWN` (id 0) as the placeholder
/// reported for the evader before its first reveal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location(pub u32);

impl Location {
    /// Placeholder reported where no location has been revealed yet.
    pub const UNKNOWN: Location = Location(0);

    /// Create a new location id.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw id value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Transport kind carried by a board edge.
///
/// Each transport maps to exactly one ticket kind
/// (see [`TicketKind::for_transport`](crate::core::TicketKind::for_transport));
/// `Ferry` edges are crossed with secret tickets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransportKind {
    Taxi,
    Bus,
    Underground,
    Ferry,
}

impl TransportKind {
    /// All transport kinds.
    pub const ALL: [TransportKind; 4] = [
        TransportKind::Taxi,
        TransportKind::Bus,
        TransportKind::Underground,
        TransportKind::Ferry,
    ];
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TransportKind::Taxi => "Taxi",
            TransportKind::Bus => "Bus",
            TransportKind::Underground => "Underground",
            TransportKind::Ferry => "Ferry",
        };
        write!(f, "{name}")
    }
}

/// Immutable board graph.
///
/// Built once via [`GraphBuilder`] and then only queried. Most locations
/// carry a handful of edges, so adjacency rows are inline small vectors.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    adjacency: FxHashMap<Location, SmallVec<[(TransportKind, Location); 8]>>,
}

impl Graph {
    /// Start building a graph.
    #[must_use]
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    /// All `(transport, destination)` pairs leaving a location.
    ///
    /// Unknown locations have no edges.
    #[must_use]
    pub fn neighbors(&self, location: Location) -> &[(TransportKind, Location)] {
        match self.adjacency.get(&location) {
            Some(edges) => edges.as_slice(),
            None => &[],
        }
    }

    /// Does the graph know this location?
    #[must_use]
    pub fn contains(&self, location: Location) -> bool {
        self.adjacency.contains_key(&location)
    }

    /// Number of locations.
    #[must_use]
    pub fn location_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Is the graph empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Iterate over all locations, in no particular order.
    pub fn locations(&self) -> impl Iterator<Item = Location> + '_ {
        self.adjacency.keys().copied()
    }
}

/// Builder for [`Graph`].
///
/// Board edges are two-way: `edge(a, t, b)` records the connection in both
/// directions.
#[derive(Clone, Debug, Default)]
pub struct GraphBuilder {
    adjacency: FxHashMap<Location, SmallVec<[(TransportKind, Location); 8]>>,
}

impl GraphBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a two-way edge between `a` and `b`.
    #[must_use]
    pub fn edge(mut self, a: Location, transport: TransportKind, b: Location) -> Self {
        self.adjacency.entry(a).or_default().push((transport, b));
        self.adjacency.entry(b).or_default().push((transport, a));
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> Graph {
        Graph {
            adjacency: self.adjacency,
        }
    }
}

//! Board data: the location graph and the reveal schedule.
//!
//! Both structures are immutable once built and are shared by reference
//! (via `Arc`) between the authoritative game state and every speculative
//! clone the search produces.

mod graph;
mod schedule;

pub use graph::{Graph, GraphBuilder, Location, TransportKind};
pub use schedule::RoundSchedule;

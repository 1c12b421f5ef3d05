//! The round schedule: which rounds reveal the evader's true location.

use serde::{Deserialize, Serialize};

/// Fixed-length reveal schedule, one flag per round.
///
/// Rounds are indexed from 0. Completing `len()` rounds without a capture
/// is an evader win.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSchedule {
    reveals: Vec<bool>,
}

impl RoundSchedule {
    /// Create a schedule from per-round reveal flags.
    #[must_use]
    pub fn new(reveals: Vec<bool>) -> Self {
        Self { reveals }
    }

    /// Number of rounds in a full game.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reveals.len()
    }

    /// Is the schedule empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reveals.is_empty()
    }

    /// Does the round at `index` reveal the evader?
    ///
    /// Out-of-range rounds never reveal.
    #[must_use]
    pub fn is_reveal(&self, index: usize) -> bool {
        self.reveals.get(index).copied().unwrap_or(false)
    }

    /// The raw reveal flags.
    #[must_use]
    pub fn reveals(&self) -> &[bool] {
        &self.reveals
    }
}

impl From<Vec<bool>> for RoundSchedule {
    fn from(reveals: Vec<bool>) -> Self {
        Self::new(reveals)
    }
}

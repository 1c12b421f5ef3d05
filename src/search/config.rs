//! Search configuration parameters.

use serde::{Deserialize, Serialize};

/// Minimax search configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Full evader-then-pursuers plies to search.
    pub depth: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { depth: 2 }
    }
}

impl SearchConfig {
    /// Create a config with a custom depth.
    #[must_use]
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }
}

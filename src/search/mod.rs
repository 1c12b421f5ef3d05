//! Adversarial search: the minimax evader AI.

mod config;
mod heuristic;
mod minimax;

pub use config::SearchConfig;
pub use heuristic::{
    bounded_distance, score_position, ADJACENT_PENALTY, CAPTURE_SCORE, DISTANCE_CAP,
    EVADER_WIN_SCORE, PURSUER_WIN_SCORE,
};
pub use minimax::MinimaxStrategy;

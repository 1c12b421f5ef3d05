//! The game state machine, its read-only views, observers, and errors.

mod error;
mod observer;
mod state;
mod view;

pub use error::{ConfigError, MoveError, ObserverError};
pub use observer::Observer;
pub use state::GameState;
pub use view::GameView;

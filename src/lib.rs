// Library interface for guess-my-number
// This allows integration tests to access internal modules

pub mod cli;
pub mod game;
pub mod game_state;
pub mod logging;
pub mod tui;

// Re-export commonly used items for easier testing
pub use game::{GameController, GameView, GuessOutcome, Hint, RoundStatus};
pub use game_state::{GameInterface, UserAction, game_loop};

// Library interface for wordle-tui
// This allows integration tests to access internal modules

pub mod cli;
pub mod config;
pub mod feedback;
pub mod game_state;
pub mod input;
pub mod loader;
pub mod logging;
pub mod provider;
pub mod session;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use feedback::{Mark, evaluate_letter_feedback};
pub use game_state::{
    EngineError, GameState, GameStatus, GuessRow, MAX_GUESSES, RowView, SecretWord, Slot,
    WORD_LENGTH,
};
pub use input::{Input, UserAction};
pub use loader::{Fetched, WordLoader};
pub use provider::{DatamuseProvider, WordFetchError, WordListProvider, WordProvider};
pub use session::{GameInterface, Session, run_session};

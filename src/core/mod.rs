//! Core domain types for the guessing game
//!
//! Pure game logic: difficulty table, feedback classification and the session
//! state machine. Nothing here touches the terminal or the filesystem.

mod difficulty;
mod feedback;
mod session;

pub use difficulty::{Difficulty, UnknownDifficulty};
pub use feedback::{Category, Direction, Feedback, Temperature};
pub use session::{GameError, GameSession, GuessOutcome, SessionState};

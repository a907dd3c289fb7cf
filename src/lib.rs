//! Guess the Number
//!
//! A terminal number-guessing game with hot/cold proximity feedback and a
//! persistent best-score record per difficulty.
//!
//! # Quick Start
//!
//! ```rust
//! use guess_the_number::core::{Difficulty, GameSession, GuessOutcome};
//!
//! let mut session = GameSession::with_target(Difficulty::Easy, 25).unwrap();
//! assert!(matches!(session.submit_guess("10"), Ok(GuessOutcome::Hint(_))));
//! assert_eq!(session.submit_guess("25"), Ok(GuessOutcome::Won { attempts: 2 }));
//! ```

// Core domain types
pub mod core;

// Best-score persistence
pub mod storage;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;

// Logger setup
pub mod logging;

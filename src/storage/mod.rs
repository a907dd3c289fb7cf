//! Local persistence

pub mod best_scores;

pub use best_scores::{BestScoreStore, StoreError};

//! Command implementations

pub mod simple;
pub mod simulate;

pub use simple::{run_simple, run_simple_with};
pub use simulate::{GameRun, SimulationResult, play_bisection, run_simulation};

//! Simulation command
//!
//! Auto-plays many sessions with a bisection player that only uses the
//! higher/lower hint, and reports how many attempts wins took.

use crate::core::{Difficulty, Direction, GameError, GameSession, GuessOutcome};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::time::{Duration, Instant};

/// Outcome of one automated game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRun {
    pub target: i32,
    pub attempts: u32,
    pub first_guess_rejected: bool,
}

/// Aggregate statistics over a simulation
#[derive(Debug)]
pub struct SimulationResult {
    pub difficulty: Difficulty,
    pub total_games: usize,
    pub total_attempts: u64,
    pub average_attempts: f64,
    pub min_attempts: u32,
    pub max_attempts: u32,
    pub first_guess_rejections: usize,
    pub distribution: FxHashMap<u32, usize>,
    pub duration: Duration,
    pub games_per_second: f64,
}

/// Play `session` to the end by halving the remaining interval
///
/// A refused first guess is simply submitted again, which then wins.
///
/// # Errors
///
/// Returns `GameError::SessionFinished` if the session was already won.
pub fn play_bisection(session: &mut GameSession) -> Result<GameRun, GameError> {
    let difficulty = session.difficulty();
    let (mut low, mut high) = (difficulty.min_value(), difficulty.max_value());
    let mut first_guess_rejected = false;

    loop {
        let guess = low + (high - low) / 2;
        match session.submit_guess(&guess.to_string())? {
            GuessOutcome::Won { attempts } => {
                return Ok(GameRun {
                    target: session.target(),
                    attempts,
                    first_guess_rejected,
                });
            }
            GuessOutcome::FirstGuessRejected => first_guess_rejected = true,
            GuessOutcome::Hint(feedback) => match feedback.direction() {
                Some(Direction::Higher) => low = guess + 1,
                Some(Direction::Lower) => high = guess - 1,
                None => {}
            },
        }
    }
}

/// Run `count` independent games at `difficulty` in parallel
///
/// # Errors
///
/// Propagates any session error raised while playing.
pub fn run_simulation(
    difficulty: Difficulty,
    count: usize,
    show_progress: bool,
) -> Result<SimulationResult, GameError> {
    let pb = if show_progress {
        let pb = ProgressBar::new(count as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓▒░"),
        );
        pb.set_message(format!("{} {}", difficulty.icon(), difficulty.name()));
        pb
    } else {
        ProgressBar::hidden()
    };

    let start = Instant::now();
    let runs: Vec<GameRun> = (0..count)
        .into_par_iter()
        .map(|_| {
            let mut session = GameSession::start(difficulty);
            let run = play_bisection(&mut session);
            pb.inc(1);
            run
        })
        .collect::<Result<_, _>>()?;
    let duration = start.elapsed();
    pb.finish_with_message("Complete!");

    let result = summarize(difficulty, &runs, duration);
    info!(
        "Simulated {} {} games: avg {:.2} attempts",
        result.total_games, difficulty, result.average_attempts
    );
    Ok(result)
}

fn summarize(difficulty: Difficulty, runs: &[GameRun], duration: Duration) -> SimulationResult {
    let mut distribution: FxHashMap<u32, usize> = FxHashMap::default();
    let mut total_attempts = 0u64;
    let mut min_attempts = u32::MAX;
    let mut max_attempts = 0;
    let mut first_guess_rejections = 0;

    for run in runs {
        total_attempts += u64::from(run.attempts);
        min_attempts = min_attempts.min(run.attempts);
        max_attempts = max_attempts.max(run.attempts);
        if run.first_guess_rejected {
            first_guess_rejections += 1;
        }
        *distribution.entry(run.attempts).or_insert(0) += 1;
    }

    let total_games = runs.len();
    let (average_attempts, games_per_second) = if total_games == 0 {
        min_attempts = 0;
        (0.0, 0.0)
    } else {
        (
            total_attempts as f64 / total_games as f64,
            total_games as f64 / duration.as_secs_f64().max(f64::EPSILON),
        )
    };

    SimulationResult {
        difficulty,
        total_games,
        total_attempts,
        average_attempts,
        min_attempts,
        max_attempts,
        first_guess_rejections,
        distribution,
        duration,
        games_per_second,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bisection_wins_every_target() {
        for level in Difficulty::ALL {
            for target in level.min_value()..=level.max_value() {
                let mut session = GameSession::with_target(level, target).unwrap();
                let run = play_bisection(&mut session).unwrap();
                assert!(session.is_won());
                assert_eq!(run.target, target);
                assert_eq!(run.attempts as usize, session.history().len());
            }
        }
    }

    #[test]
    fn bisection_is_logarithmic() {
        // ceil(log2(n + 1)) guesses are enough for n values
        let worst = [
            (Difficulty::Easy, 6),
            (Difficulty::Medium, 7),
            (Difficulty::Hard, 8),
            (Difficulty::Expert, 9),
        ];
        for (level, limit) in worst {
            for target in level.min_value()..=level.max_value() {
                let mut session = GameSession::with_target(level, target).unwrap();
                let run = play_bisection(&mut session).unwrap();
                assert!(run.attempts <= limit, "{level} target {target}: {}", run.attempts);
            }
        }
    }

    #[test]
    fn midpoint_target_triggers_rejection() {
        let mid = Difficulty::Easy.midpoint();
        let mut session = GameSession::with_target(Difficulty::Easy, mid).unwrap();
        let run = play_bisection(&mut session).unwrap();
        assert!(run.first_guess_rejected);
        assert_eq!(run.attempts, 1);
    }

    #[test]
    fn finished_session_is_an_error() {
        let mut session = GameSession::with_target(Difficulty::Easy, 10).unwrap();
        play_bisection(&mut session).unwrap();
        assert_eq!(play_bisection(&mut session), Err(GameError::SessionFinished));
    }

    #[test]
    fn simulation_distribution_sums_to_game_count() {
        let result = run_simulation(Difficulty::Medium, 200, false).unwrap();

        assert_eq!(result.total_games, 200);
        assert_eq!(result.distribution.values().sum::<usize>(), 200);
        assert!(result.average_attempts >= f64::from(result.min_attempts));
        assert!(result.average_attempts <= f64::from(result.max_attempts));
        assert!(result.max_attempts <= 7);
        // Random targets avoid the midpoint band, so the first bisection guess never hits
        assert_eq!(result.first_guess_rejections, 0);
    }

    #[test]
    fn empty_simulation() {
        let result = run_simulation(Difficulty::Easy, 0, false).unwrap();
        assert_eq!(result.total_games, 0);
        assert_eq!(result.min_attempts, 0);
        assert!(result.distribution.is_empty());
    }
}

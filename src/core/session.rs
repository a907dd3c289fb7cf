//! Game session state machine
//!
//! A session owns the target number, the attempt counter and the guess history.
//! It moves from `Playing` to `Won`. Resetting means starting a fresh session.
//!
//! Invariants:
//! - `target` lies in `[min, max]` of the session's difficulty
//! - `history.len() == attempts`
//! - only counted guesses touch `attempts` and `history`

use super::difficulty::Difficulty;
use super::feedback::Feedback;
use log::{debug, trace};
use rand::Rng;

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Playing,
    Won,
}

/// Result of a submission that was accepted by the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The target was found after `attempts` counted guesses
    Won { attempts: u32 },
    /// Counted wrong guess
    Hint(Feedback),
    /// First guess equal to the target; refused and not counted
    FirstGuessRejected,
}

/// Errors raised by session operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("'{input}' is not a number between {min} and {max}")]
    InvalidInput { input: String, min: i32, max: i32 },

    #[error("the session is already won; start a new game")]
    SessionFinished,

    #[error("target {target} is outside {min}..={max}")]
    TargetOutOfRange { target: i32, min: i32, max: i32 },
}

/// A single game at one difficulty level
#[derive(Debug, Clone)]
pub struct GameSession {
    difficulty: Difficulty,
    target: i32,
    attempts: u32,
    history: Vec<i32>,
    first_guess: bool,
    feedback: Option<Feedback>,
    state: SessionState,
}

impl GameSession {
    /// Start a session with a target drawn from the thread-local RNG
    #[must_use]
    pub fn start(difficulty: Difficulty) -> Self {
        Self::start_with_rng(difficulty, &mut rand::rng())
    }

    /// Start a session drawing the target from `rng`
    ///
    /// The target is uniform over `[min, max]` minus the band around the
    /// midpoint (see [`Difficulty::exclusion_band`]).
    pub fn start_with_rng<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Self {
        let target = draw_target(difficulty, rng);
        debug!(
            "Starting {} session ({}..={})",
            difficulty,
            difficulty.min_value(),
            difficulty.max_value()
        );
        trace!("Target for {difficulty} session is {target}");
        Self::fresh(difficulty, target)
    }

    /// Start a session with a fixed target
    ///
    /// # Errors
    ///
    /// Returns `GameError::TargetOutOfRange` if `target` is outside the level's range.
    pub fn with_target(difficulty: Difficulty, target: i32) -> Result<Self, GameError> {
        if !difficulty.contains(target) {
            return Err(GameError::TargetOutOfRange {
                target,
                min: difficulty.min_value(),
                max: difficulty.max_value(),
            });
        }
        Ok(Self::fresh(difficulty, target))
    }

    const fn fresh(difficulty: Difficulty, target: i32) -> Self {
        Self {
            difficulty,
            target,
            attempts: 0,
            history: Vec::new(),
            first_guess: true,
            feedback: None,
            state: SessionState::Playing,
        }
    }

    /// Replace this session with a fresh one on the same level
    pub fn restart(&mut self) {
        *self = Self::start(self.difficulty);
    }

    /// Submit raw text input as a guess
    ///
    /// # Errors
    ///
    /// - `GameError::InvalidInput` if the input is not an integer within range.
    ///   The session's feedback is updated but no attempt is consumed.
    /// - `GameError::SessionFinished` if the session is already won.
    pub fn submit_guess(&mut self, raw_input: &str) -> Result<GuessOutcome, GameError> {
        if self.state == SessionState::Won {
            return Err(GameError::SessionFinished);
        }

        let (min, max) = (self.difficulty.min_value(), self.difficulty.max_value());
        let guess = match raw_input.trim().parse::<i32>() {
            Ok(value) if self.difficulty.contains(value) => value,
            _ => {
                debug!("Rejected input {raw_input:?} for {}", self.difficulty);
                self.feedback = Some(Feedback::InvalidInput { min, max });
                return Err(GameError::InvalidInput {
                    input: raw_input.trim().to_string(),
                    min,
                    max,
                });
            }
        };

        if self.first_guess && guess == self.target {
            debug!("First guess {guess} hit the target; refusing it");
            self.first_guess = false;
            self.feedback = Some(Feedback::FirstGuessRejected);
            return Ok(GuessOutcome::FirstGuessRejected);
        }

        self.first_guess = false;
        self.attempts += 1;
        self.history.push(guess);

        match Feedback::hint(guess, self.target, self.difficulty.range()) {
            None => {
                self.state = SessionState::Won;
                self.feedback = None;
                debug!("Won {} in {} attempts", self.difficulty, self.attempts);
                Ok(GuessOutcome::Won {
                    attempts: self.attempts,
                })
            }
            Some(feedback) => {
                debug!("Guess #{} = {guess}: {}", self.attempts, feedback.message());
                self.feedback = Some(feedback);
                Ok(GuessOutcome::Hint(feedback))
            }
        }
    }

    #[inline]
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[inline]
    #[must_use]
    pub const fn target(&self) -> i32 {
        self.target
    }

    #[inline]
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Counted guesses in submission order
    #[inline]
    #[must_use]
    pub fn history(&self) -> &[i32] {
        &self.history
    }

    #[inline]
    #[must_use]
    pub const fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    #[inline]
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.state == SessionState::Won
    }

    #[inline]
    #[must_use]
    pub const fn is_first_guess(&self) -> bool {
        self.first_guess
    }
}

/// Draw a target uniformly in range, re-drawing inside the midpoint band
fn draw_target<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> i32 {
    let mid = difficulty.midpoint();
    let band = difficulty.exclusion_band();

    loop {
        let candidate = rng.random_range(difficulty.min_value()..=difficulty.max_value());
        if (candidate - mid).abs() >= band {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Direction, Temperature};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn session(target: i32) -> GameSession {
        GameSession::with_target(Difficulty::Easy, target).unwrap()
    }

    #[test]
    fn start_draws_targets_in_range_outside_band() {
        let mut rng = StdRng::seed_from_u64(7);
        for level in Difficulty::ALL {
            for _ in 0..2_000 {
                let s = GameSession::start_with_rng(level, &mut rng);
                assert!(level.contains(s.target()), "{level}: {}", s.target());
                assert!(
                    (s.target() - level.midpoint()).abs() >= level.exclusion_band(),
                    "{level}: target {} inside midpoint band",
                    s.target()
                );
            }
        }
    }

    #[test]
    fn start_resets_everything() {
        let s = GameSession::start(Difficulty::Hard);
        assert_eq!(s.difficulty(), Difficulty::Hard);
        assert_eq!(s.attempts(), 0);
        assert!(s.history().is_empty());
        assert!(s.feedback().is_none());
        assert!(s.is_first_guess());
        assert_eq!(s.state(), SessionState::Playing);
    }

    #[test]
    fn with_target_rejects_out_of_range() {
        assert_eq!(
            GameSession::with_target(Difficulty::Easy, 51).unwrap_err(),
            GameError::TargetOutOfRange {
                target: 51,
                min: 1,
                max: 50
            }
        );
    }

    #[test]
    fn invalid_input_does_not_consume_attempt() {
        let mut s = session(30);
        for raw in ["abc", "", "0", "51", "-3", "12.5", "1e3"] {
            let err = s.submit_guess(raw).unwrap_err();
            assert!(matches!(err, GameError::InvalidInput { .. }), "{raw}");
            assert_eq!(s.attempts(), 0);
            assert!(s.history().is_empty());
            assert!(s.is_first_guess());
            assert_eq!(s.feedback(), Some(&Feedback::InvalidInput { min: 1, max: 50 }));
        }
    }

    #[test]
    fn input_is_trimmed() {
        let mut s = session(30);
        assert!(s.submit_guess("  12 \n").is_ok());
        assert_eq!(s.history(), &[12]);
    }

    #[test]
    fn first_guess_on_target_is_rejected_once() {
        let mut s = session(30);

        assert_eq!(s.submit_guess("30"), Ok(GuessOutcome::FirstGuessRejected));
        assert_eq!(s.attempts(), 0);
        assert!(s.history().is_empty());
        assert!(!s.is_first_guess());
        assert_eq!(s.feedback(), Some(&Feedback::FirstGuessRejected));

        assert_eq!(s.submit_guess("30"), Ok(GuessOutcome::Won { attempts: 1 }));
        assert!(s.is_won());
    }

    #[test]
    fn later_guess_on_target_wins_normally() {
        let mut s = session(30);
        s.submit_guess("10").unwrap();
        assert_eq!(s.submit_guess("30"), Ok(GuessOutcome::Won { attempts: 2 }));
        assert!(s.feedback().is_none());
    }

    #[test]
    fn direction_matches_sign_of_difference() {
        let mut s = session(30);
        for guess in 1..30 {
            let outcome = s.submit_guess(&guess.to_string()).unwrap();
            let GuessOutcome::Hint(feedback) = outcome else {
                panic!("expected hint for {guess}");
            };
            assert_eq!(feedback.direction(), Some(Direction::Higher));
        }
        for guess in 31..=50 {
            let GuessOutcome::Hint(feedback) = s.submit_guess(&guess.to_string()).unwrap() else {
                panic!("expected hint for {guess}");
            };
            assert_eq!(feedback.direction(), Some(Direction::Lower));
        }
        assert_eq!(s.attempts(), 49);
        assert_eq!(s.history().len(), 49);
    }

    #[test]
    fn submissions_after_win_are_refused() {
        let mut s = session(30);
        s.submit_guess("20").unwrap();
        s.submit_guess("30").unwrap();

        assert_eq!(s.submit_guess("12"), Err(GameError::SessionFinished));
        assert_eq!(s.submit_guess("zzz"), Err(GameError::SessionFinished));
        assert_eq!(s.attempts(), 2);
        assert_eq!(s.history(), &[20, 30]);
    }

    #[test]
    fn restart_keeps_level_and_clears_state() {
        let mut s = GameSession::with_target(Difficulty::Medium, 70).unwrap();
        s.submit_guess("10").unwrap();
        s.restart();

        assert_eq!(s.difficulty(), Difficulty::Medium);
        assert_eq!(s.attempts(), 0);
        assert!(s.history().is_empty());
        assert!(s.is_first_guess());
        assert!(s.feedback().is_none());
    }

    #[test]
    fn easy_game_end_to_end() {
        let mut s = session(25);

        let first = s.submit_guess("10").unwrap();
        assert_eq!(
            first,
            GuessOutcome::Hint(Feedback::Hint {
                temperature: Temperature::Cold,
                direction: Direction::Higher,
            })
        );

        let second = s.submit_guess("40").unwrap();
        assert_eq!(
            second,
            GuessOutcome::Hint(Feedback::Hint {
                temperature: Temperature::Cold,
                direction: Direction::Lower,
            })
        );

        assert_eq!(s.submit_guess("25"), Ok(GuessOutcome::Won { attempts: 3 }));
        assert_eq!(s.history(), &[10, 40, 25]);
        assert_eq!(s.attempts(), 3);
    }
}

//! Proximity feedback for a guess
//!
//! A wrong guess is classified by its distance to the target, relative to the
//! width of the level's range:
//! - ≤ 2% → Hot
//! - ≤ 5% → Warm
//! - ≤ 15% → Tepid
//! - otherwise Cold
//!
//! Thresholds are checked in that order, so the classification is monotonic in
//! distance.

use std::cmp::Ordering;
use std::fmt;

/// How close a wrong guess landed, ordered from coldest to hottest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Temperature {
    Cold,
    Tepid,
    Warm,
    Hot,
}

/// Coarse grouping of feedback used for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Hot,
    Warm,
    Cold,
}

/// Which way the player needs to move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Higher,
    Lower,
}

/// Feedback shown after a submission that did not win
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    /// Input was not an integer or fell outside `[min, max]`
    InvalidInput { min: i32, max: i32 },
    /// The very first guess hit the target and was refused
    FirstGuessRejected,
    /// A counted, wrong guess
    Hint {
        temperature: Temperature,
        direction: Direction,
    },
}

impl Temperature {
    /// Classify a wrong guess by its absolute distance `diff` within a range of width `range`
    #[must_use]
    pub fn classify(diff: u32, range: u32) -> Self {
        let diff = f64::from(diff);
        let range = f64::from(range);

        if diff <= range * 0.02 {
            Self::Hot
        } else if diff <= range * 0.05 {
            Self::Warm
        } else if diff <= range * 0.15 {
            Self::Tepid
        } else {
            Self::Cold
        }
    }

    #[must_use]
    pub const fn category(self) -> Category {
        match self {
            Self::Hot => Category::Hot,
            Self::Warm | Self::Tepid => Category::Warm,
            Self::Cold => Category::Cold,
        }
    }

    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Hot => "🔥",
            Self::Warm => "♨️",
            Self::Tepid => "😊",
            Self::Cold => "❄️",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hot => "hot",
            Self::Warm => "warm",
            Self::Tepid => "tepid",
            Self::Cold => "cold",
        }
    }
}

impl Direction {
    /// Direction from `guess` towards `target`, or `None` when they are equal
    #[must_use]
    pub fn towards(guess: i32, target: i32) -> Option<Self> {
        match guess.cmp(&target) {
            Ordering::Less => Some(Self::Higher),
            Ordering::Greater => Some(Self::Lower),
            Ordering::Equal => None,
        }
    }

    #[must_use]
    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Higher => "↑",
            Self::Lower => "↓",
        }
    }
}

impl Feedback {
    /// Build the hint for a wrong guess
    ///
    /// Returns `None` when `guess == target`.
    #[must_use]
    pub fn hint(guess: i32, target: i32, range: i32) -> Option<Self> {
        let direction = Direction::towards(guess, target)?;
        let temperature = Temperature::classify(guess.abs_diff(target), range.unsigned_abs());
        Some(Self::Hint {
            temperature,
            direction,
        })
    }

    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            Self::InvalidInput { .. } | Self::FirstGuessRejected => Category::Cold,
            Self::Hint { temperature, .. } => temperature.category(),
        }
    }

    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "🤔",
            Self::FirstGuessRejected => "🎲",
            Self::Hint { temperature, .. } => temperature.icon(),
        }
    }

    #[must_use]
    pub fn message(&self) -> String {
        match *self {
            Self::InvalidInput { min, max } => format!("Enter a number between {min} and {max}"),
            Self::FirstGuessRejected => "No luck on the first try!".to_string(),
            Self::Hint {
                temperature,
                direction,
            } => hint_message(temperature, direction).to_string(),
        }
    }

    #[must_use]
    pub const fn direction(&self) -> Option<Direction> {
        match self {
            Self::Hint { direction, .. } => Some(*direction),
            _ => None,
        }
    }

    #[must_use]
    pub const fn temperature(&self) -> Option<Temperature> {
        match self {
            Self::Hint { temperature, .. } => Some(*temperature),
            _ => None,
        }
    }
}

const fn hint_message(temperature: Temperature, direction: Direction) -> &'static str {
    match (temperature, direction) {
        (Temperature::Hot, Direction::Higher) => "Burning! A little higher!",
        (Temperature::Hot, Direction::Lower) => "Burning! A little lower!",
        (Temperature::Warm, Direction::Higher) => "Hot! Keep going up!",
        (Temperature::Warm, Direction::Lower) => "Hot! Keep going down!",
        (Temperature::Tepid, Direction::Higher) => "Warm... higher",
        (Temperature::Tepid, Direction::Lower) => "Warm... lower",
        (Temperature::Cold, Direction::Higher) => "Cold! Much higher",
        (Temperature::Cold, Direction::Lower) => "Cold! Much lower",
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.icon(), self.message())
    }
}

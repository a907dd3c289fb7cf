//! Difficulty levels
//!
//! Each level is a fixed inclusive numeric range with a display name and icon.

use std::fmt;
use std::str::FromStr;

/// One of the four predefined difficulty levels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    Expert,
}

/// Error returned when parsing an unknown level identifier
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty '{0}' (expected easy, medium, hard or expert)")]
pub struct UnknownDifficulty(pub String);

impl Difficulty {
    /// All levels in table order
    pub const ALL: [Self; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Expert];

    /// Stable identifier, also used as the key in the best-score file
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Expert => "expert",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Expert => "Expert",
        }
    }

    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Easy => "🌱",
            Self::Medium => "⚡",
            Self::Hard => "🔥",
            Self::Expert => "💎",
        }
    }

    /// Smallest valid guess (inclusive)
    #[must_use]
    pub const fn min_value(self) -> i32 {
        1
    }

    /// Largest valid guess (inclusive)
    #[must_use]
    pub const fn max_value(self) -> i32 {
        match self {
            Self::Easy => 50,
            Self::Medium => 100,
            Self::Hard => 200,
            Self::Expert => 500,
        }
    }

    /// Width of the range, `max - min`
    #[must_use]
    pub const fn range(self) -> i32 {
        self.max_value() - self.min_value()
    }

    /// Floor of the range midpoint
    #[must_use]
    pub const fn midpoint(self) -> i32 {
        (self.min_value() + self.max_value()).div_euclid(2)
    }

    /// Half-width of the band around the midpoint that targets avoid
    ///
    /// `min(5, floor(range * 5%))`, or 0 when the range is 20 or narrower.
    #[must_use]
    pub const fn exclusion_band(self) -> i32 {
        let range = self.range();
        if range <= 20 {
            return 0;
        }
        let band = range / 20;
        if band < 5 { band } else { 5 }
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, value: i32) -> bool {
        value >= self.min_value() && value <= self.max_value()
    }

    /// Next level in table order, wrapping around
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Easy => Self::Medium,
            Self::Medium => Self::Hard,
            Self::Hard => Self::Expert,
            Self::Expert => Self::Easy,
        }
    }

    /// Previous level in table order, wrapping around
    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::Easy => Self::Expert,
            Self::Medium => Self::Easy,
            Self::Hard => Self::Medium,
            Self::Expert => Self::Hard,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|level| level.id() == needle)
            .ok_or_else(|| UnknownDifficulty(s.to_string()))
    }
}

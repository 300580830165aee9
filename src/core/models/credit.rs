//! Credit points model

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// Credit points of a course, always a non-negative multiple of 0.5.
///
/// Stored as a count of half units so that sums and comparisons are exact.
/// The count is capped at [`Credit::MAX_HALF_UNITS`], the range in which
/// every value converts to `f64` without loss.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Credit {
    half_units: u64,
}

impl Credit {
    /// Zero credit points
    pub const ZERO: Self = Self { half_units: 0 };

    /// Largest number of half units, 2^53
    pub const MAX_HALF_UNITS: u64 = 1 << 53;

    /// Largest credit value
    pub const MAX: Self = Self {
        half_units: Self::MAX_HALF_UNITS,
    };

    /// Create a credit value from a count of half units (`7` is 3.5 points).
    ///
    /// Counts above [`Credit::MAX_HALF_UNITS`] are clamped.
    #[must_use]
    pub const fn from_half_units(half_units: u64) -> Self {
        if half_units > Self::MAX_HALF_UNITS {
            Self::MAX
        } else {
            Self { half_units }
        }
    }

    /// Number of half units in this credit value
    #[must_use]
    pub const fn half_units(self) -> u64 {
        self.half_units
    }

    /// Convert a floating-point amount of points.
    ///
    /// Returns `None` for non-finite, negative or quarter-unit values, and for
    /// values above [`Credit::MAX`].
    #[must_use]
    #[allow(
        clippy::float_cmp,
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    pub fn from_points(points: f64) -> Option<Self> {
        if !points.is_finite() {
            return None;
        }
        // Covers -0.0 as well
        if points == 0.0 {
            return Some(Self::ZERO);
        }
        if points < 0.0 {
            return None;
        }
        let doubled = points * 2.0;
        if doubled.fract() != 0.0 || doubled > Self::MAX_HALF_UNITS as f64 {
            return None;
        }
        Some(Self {
            half_units: doubled as u64,
        })
    }

    /// Parse a user-entered credit value such as `"3"`, `"3.5"` or `" 0 "`
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        trimmed.parse::<f64>().ok().and_then(Self::from_points)
    }

    /// Credit points as a float, exact for every value
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn points(self) -> f64 {
        self.half_units as f64 / 2.0
    }

    /// Whether this is zero credit
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.half_units == 0
    }
}

impl Add for Credit {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::from_half_units(self.half_units.saturating_add(rhs.half_units))
    }
}

impl Sum for Credit {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Credit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.half_units / 2;
        if self.half_units % 2 == 0 {
            write!(f, "{whole}")
        } else {
            write!(f, "{whole}.5")
        }
    }
}

impl Serialize for Credit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.points())
    }
}

impl<'de> Deserialize<'de> for Credit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let points = f64::deserialize(deserializer)?;
        Self::from_points(points).ok_or_else(|| {
            D::Error::custom(format!(
                "credit must be a non-negative multiple of 0.5, got {points}"
            ))
        })
    }
}

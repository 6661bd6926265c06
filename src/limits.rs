use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::Float;

/// A single axis of the search domain, described by its two boundary values.
///
/// The values are stored exactly as they were supplied, which may be in either order; every
/// accessor re-derives the lower and upper bound from the stored pair, so a backwards-entered
/// limit behaves identically to an ordered one.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Limit(pub Float, pub Float);

impl Limit {
    /// Returns the smaller of the two boundary values.
    pub fn lower(&self) -> Float {
        self.0.min(self.1)
    }
    /// Returns the larger of the two boundary values.
    pub fn upper(&self) -> Float {
        self.0.max(self.1)
    }
    /// Truncates `value` into `[lower, upper]`.
    pub fn clamp(&self, value: Float) -> Float {
        value.clamp(self.lower(), self.upper())
    }
    /// Checks whether `value` lies in `[lower, upper]` (inclusive on both ends).
    pub fn contains(&self, value: Float) -> bool {
        value >= self.lower() && value <= self.upper()
    }
    /// Checks if the given value is equal to one of the bounds.
    pub fn at_limit(&self, value: Float) -> bool {
        value == self.0 || value == self.1
    }
}

impl From<(Float, Float)> for Limit {
    fn from(value: (Float, Float)) -> Self {
        Self(value.0, value.1)
    }
}

impl From<[Float; 2]> for Limit {
    fn from(value: [Float; 2]) -> Self {
        Self(value[0], value[1])
    }
}

impl Display for Limit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lower(), self.upper())
    }
}

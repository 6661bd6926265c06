use std::cmp::Ordering;
use std::fmt::Display;

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::Float;

/// A position in the search domain together with its cost evaluation.
///
/// Freshly initialized points carry the swarm's sentinel value in [`Point::fx`], which is
/// guaranteed to compare worse than any real cost, so the first genuine evaluation always
/// replaces it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// The point's position.
    pub x: DVector<Float>,
    /// The cost function value at [`Point::x`].
    pub fx: Float,
}

impl Point {
    /// Compare two points by their `fx` value.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.fx.total_cmp(&other.fx)
    }
}

impl From<(DVector<Float>, Float)> for Point {
    fn from(value: (DVector<Float>, Float)) -> Self {
        Self {
            x: value.0,
            fx: value.1,
        }
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x: {:?}, f(x): {}", self.x.as_slice(), self.fx)
    }
}

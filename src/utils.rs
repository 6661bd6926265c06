use fastrand::Rng;
use fastrand_contrib::RngExt;

use crate::{limits::Limit, Float};

/// A helper trait to get feature-gated floating-point random values
pub trait SampleFloat {
    /// Get a random value in a range
    fn range(&mut self, lower: Float, upper: Float) -> Float;
    /// Get a random value in the range `[0, 1)`
    fn float(&mut self) -> Float;
    /// Get a random value inside the given [`Limit`], regardless of the order its bounds were
    /// supplied in
    fn in_limit(&mut self, limit: &Limit) -> Float {
        self.range(limit.lower(), limit.upper())
    }
}
impl SampleFloat for Rng {
    #[cfg(not(feature = "f32"))]
    fn range(&mut self, lower: Float, upper: Float) -> Float {
        self.f64_range(lower..upper)
    }
    #[cfg(feature = "f32")]
    fn range(&mut self, lower: Float, upper: Float) -> Float {
        self.f32_range(lower..upper)
    }
    #[cfg(not(feature = "f32"))]
    fn float(&mut self) -> Float {
        self.f64()
    }
    #[cfg(feature = "f32")]
    fn float(&mut self) -> Float {
        self.f32()
    }
}

#![allow(clippy::suboptimal_flops)]
use std::convert::Infallible;

use crate::{CostFunction, Float, PI};

/// A two-dimensional second-order polynomial with a single minimum.
///
/// ```math
/// f(x, y) = 5x^2 - 52x + 200 + 5y^2 - 30y + 100
/// ```
/// The global minimum is $`f(5.2, 3) = 119.8`$.
pub struct Paraboloid;
impl CostFunction<(), Infallible> for Paraboloid {
    fn evaluate(&self, x: &[Float], _user_data: &mut ()) -> Result<Float, Infallible> {
        Ok(5.0 * x[0] * x[0] - 52.0 * x[0] + 200.0 + 5.0 * x[1] * x[1] - 30.0 * x[1] + 100.0)
    }
}

/// A generalized spherical function with a single minimum.
///
/// ```math
/// f(\vec{x}) = \sum_{i=1}^{n} x_i^2
/// ```
/// The global minimum is at $`f(\vec{0}) = 0`$.
pub struct Sphere {
    /// Number of dimensions
    pub n: usize,
}
impl CostFunction<(), Infallible> for Sphere {
    fn evaluate(&self, x: &[Float], _user_data: &mut ()) -> Result<Float, Infallible> {
        Ok((0..self.n).map(|i| x[i].powi(2)).sum())
    }
}

/// The Rastrigin function, a non-convex function with multiple modes.
///
/// ```math
/// f(\vec{x}) = 10n + \sum_{i=1}^{n} [x_i^2 - 10\cos(2\pi x_i)]
/// ```
/// where $`x_i \in [-5.12, 5.12]`$. The global minimum is $`f(\vec{0}) = 0`$.
pub struct Rastrigin {
    /// Number of dimensions
    pub n: usize,
}
impl CostFunction<(), Infallible> for Rastrigin {
    fn evaluate(&self, x: &[Float], _user_data: &mut ()) -> Result<Float, Infallible> {
        Ok(10.0 * (self.n as Float)
            + (0..self.n)
                .map(|i| x[i].powi(2) - 10.0 * Float::cos(2.0 * PI * x[i]))
                .sum::<Float>())
    }
}

/// The Rosenbrock function, a non-convex function with a single minimum.
///
/// ```math
/// f(\vec{x}) = \sum_{i=1}^{n-1} \left[100(x_{i+1} - x_i^2)^2 + (1 - x_i)^2 \right]
/// ```
/// where $`n \geq 2`$. This function has a minimum at $`f(\vec{1}) = 0`$.
pub struct Rosenbrock {
    /// Number of dimensions (must be at least 2)
    pub n: usize,
}
impl CostFunction<(), Infallible> for Rosenbrock {
    fn evaluate(&self, x: &[Float], _user_data: &mut ()) -> Result<Float, Infallible> {
        Ok((0..(self.n - 1))
            .map(|i| 100.0 * (x[i + 1] - x[i].powi(2)).powi(2) + (1.0 - x[i]).powi(2))
            .sum())
    }
}

/// The mean squared error of a three-term odd polynomial $`a_1 x + a_3 x^3 + a_5 x^5`$ against
/// $`\sin(x)`$, sampled uniformly over $`[-\pi, \pi]`$.
///
/// Minimizing this recovers the leading Taylor coefficients of $`\sin`$
/// ($`a_1 = 1`$, $`a_3 = -1/6`$, $`a_5 = 1/120`$, up to the truncation error of the series).
pub struct SinTaylor {
    /// The number of sample points used for the error estimate
    pub n_points: usize,
}
impl Default for SinTaylor {
    fn default() -> Self {
        Self { n_points: 1000 }
    }
}
impl CostFunction<(), Infallible> for SinTaylor {
    fn evaluate(&self, x: &[Float], _user_data: &mut ()) -> Result<Float, Infallible> {
        let (a1, a3, a5) = (x[0], x[1], x[2]);
        let dx = 2.0 * PI / self.n_points as Float;
        let mut t = -PI;
        let mut mean_sq_error = 0.0;
        for _ in 0..self.n_points {
            let estimate = a1 * t + a3 * t.powi(3) + a5 * t.powi(5);
            let error = Float::sin(t) - estimate;
            mean_sq_error += error * error;
            t += dx;
        }
        Ok(mean_sq_error / self.n_points as Float)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_paraboloid_vertex() {
        let value = Paraboloid.evaluate(&[5.2, 3.0], &mut ()).unwrap();
        assert_abs_diff_eq!(value, 119.8, epsilon = 1e-9);
        assert!(Paraboloid.evaluate(&[5.0, 3.0], &mut ()).unwrap() > value);
    }

    #[test]
    fn test_sphere_minimum() {
        assert_eq!(Sphere { n: 3 }.evaluate(&[0.0, 0.0, 0.0], &mut ()).unwrap(), 0.0);
        assert_eq!(Sphere { n: 2 }.evaluate(&[1.0, 2.0], &mut ()).unwrap(), 5.0);
    }

    #[test]
    fn test_rastrigin_minimum() {
        let value = Rastrigin { n: 2 }.evaluate(&[0.0, 0.0], &mut ()).unwrap();
        assert_abs_diff_eq!(value, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rosenbrock_minimum() {
        let value = Rosenbrock { n: 3 }.evaluate(&[1.0, 1.0, 1.0], &mut ()).unwrap();
        assert_abs_diff_eq!(value, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_sin_taylor_prefers_taylor_coefficients() {
        let f = SinTaylor::default();
        let at_taylor = f
            .evaluate(&[1.0, -1.0 / 6.0, 1.0 / 120.0], &mut ())
            .unwrap();
        let at_zero = f.evaluate(&[0.0, 0.0, 0.0], &mut ()).unwrap();
        assert!(at_taylor < 0.05);
        assert!(at_taylor < at_zero);
    }
}

//! `pswarm` provides a particle swarm optimization (PSO) engine: a population-based,
//! derivative-free minimizer for problems where the objective can be evaluated pointwise but
//! gradients are unavailable or unreliable (non-differentiable, noisy, or black-box cost
//! functions). The user implements the [`CostFunction`] trait on some struct which takes a
//! position vector and returns a single-valued [`Result`] ($`f(\mathbb{R}^n) \to \mathbb{R}`$),
//! defines the search domain through per-axis [`Limit`](`limits::Limit`)s, and runs a
//! [`SwarmMinimizer`](`pso::SwarmMinimizer`) until it converges below a target error or exhausts
//! its iteration budget.
//!
//! # Key Features
//! * A single, straightforward synchronous PSO implementation with builder-style configuration.
//! * Per-axis limits which may be supplied in either order; positions are clamped into the
//!   normalized range on every update.
//! * An explicit, caller-supplied random number generator, so every run can be reproduced from a
//!   seed.
//! * Observer callbacks for per-iteration progress reporting and history tracking.
//! * Runs report *how* they terminated ([`Converged`](`pso::Termination::Converged`) or
//!   [`Exhausted`](`pso::Termination::Exhausted`)) alongside the best position and value found.
//!
//! # Quick Start
//!
//! Minimizing a two-dimensional paraboloid with a vertex at $`(5.2, 3)`$:
//!
//! ```rust
//! use std::convert::Infallible;
//! use fastrand::Rng;
//! use pswarm::prelude::*;
//!
//! struct Paraboloid;
//! impl CostFunction<(), Infallible> for Paraboloid {
//!     fn evaluate(&self, x: &[Float], _user_data: &mut ()) -> Result<Float, Infallible> {
//!         Ok(5.0 * x[0] * x[0] - 52.0 * x[0] + 200.0 + 5.0 * x[1] * x[1] - 30.0 * x[1] + 100.0)
//!     }
//! }
//!
//! fn main() -> Result<(), RunError<Infallible>> {
//!     let mut rng = Rng::new();
//!     rng.seed(0);
//!     let pso = PSO::new(rng).with_w(0.1).with_c1(0.5).with_c2(0.8);
//!     let swarm = Swarm::new(50, [(-10.0, 10.0), (-20.0, 20.0)])?;
//!     let result = SwarmMinimizer::new(pso, swarm, 20, 0.3)?.minimize(&Paraboloid, &mut ())?;
//!     println!("{}", result);
//!     assert!(result.best.fx < 125.0);
//!     Ok(())
//! }
//! ```
//!
//! # Limits
//! All positions are kept inside the configured domain by clamping after every position update.
//! The two values of a [`Limit`](`limits::Limit`) are stored exactly as given and normalized to
//! lower/upper at each use, so `(10.0, -10.0)` and `(-10.0, 10.0)` describe the same axis. The
//! clamp only truncates the position; the velocity component that pushed the particle out of the
//! domain is carried into the next iteration unchanged.
#![warn(
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::doc_markdown,
    clippy::doc_link_with_quotes,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::perf,
    clippy::style,
    missing_docs
)]

/// Module containing the error types reported by swarm construction and runs
pub mod error;
/// Module containing per-axis search domain limits
pub mod limits;
/// Module containing [`SwarmObserver`](`observers::SwarmObserver`)s
pub mod observers;
/// Module containing the [`Point`](`point::Point`) position/value pair
pub mod point;
/// Module containing the particle swarm optimizer and its run driver
pub mod pso;
/// Module containing the contiguous backing storage for swarm state
pub mod storage;
/// Module containing the [`Swarm`](`swarm::Swarm`) aggregate and its initializer
pub mod swarm;
/// Module containing standard functions for testing the optimizer
pub mod test_functions;
/// Module containing random sampling helpers
pub mod utils;

/// Prelude module containing everything someone should need to use this crate for
/// non-development purposes
pub mod prelude {
    pub use crate::{
        error::{RunError, SwarmError},
        limits::Limit,
        observers::SwarmObserver,
        point::Point,
        pso::{RunResult, SwarmMinimizer, Termination, PSO},
        swarm::{Particle, Swarm},
        CostFunction, Float,
    };
}

/// A floating point number, defaults to [`f64`], but can be set to [`f32`] via the `f32` feature
#[cfg(not(feature = "f32"))]
pub type Float = f64;

/// A floating point number, defaults to [`f64`], but can be set to [`f32`] via the `f32` feature
#[cfg(feature = "f32")]
pub type Float = f32;

/// The mathematical constant $`\pi`$
#[cfg(not(feature = "f32"))]
pub const PI: Float = std::f64::consts::PI;

/// The mathematical constant $`\pi`$
#[cfg(feature = "f32")]
pub const PI: Float = std::f32::consts::PI;

/// A trait which describes a cost function $`f(\mathbb{R}^n) \to \mathbb{R}`$
///
/// Such a function may also take a `user_data: &mut U` field which can be used to pass external
/// arguments to the function during minimization, or can be modified by the function itself.
///
/// The optimizer treats implementations as pure and total over the configured search domain and
/// calls [`CostFunction::evaluate`] exactly once per particle per iteration.
pub trait CostFunction<U, E> {
    /// The evaluation of the function at a point `x` with the given arguments/user data.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the evaluation fails. Users should implement this trait to return a
    /// `std::convert::Infallible` if the function evaluation never fails. An error here is fatal
    /// to the run: the optimizer has no way to substitute a missing cost value, so it aborts
    /// immediately with [`RunError::Cost`](`error::RunError::Cost`).
    fn evaluate(&self, x: &[Float], user_data: &mut U) -> Result<Float, E>;
}

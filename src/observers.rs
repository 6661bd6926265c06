use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;

use crate::{
    point::Point,
    swarm::{Particle, Swarm},
};

/// A trait which holds a [`callback`](`SwarmObserver::callback`) function that is invoked once
/// per completed iteration of a [`SwarmMinimizer`](`crate::pso::SwarmMinimizer`) run.
///
/// Observers are diagnostic only: they see the swarm after each iteration's update but cannot
/// alter the run's state or its outcome.
pub trait SwarmObserver<U> {
    /// A function that is called at the end of every iteration with the iteration index, the
    /// current state of the swarm, and the run's user data.
    fn callback(&mut self, iteration: usize, swarm: &Swarm, user_data: &mut U);
}

/// A debugging observer which prints the iteration index and the current global best value, in
/// the style of the classic per-iteration PSO progress line.
///
/// # Usage:
///
/// ```rust
/// use std::convert::Infallible;
/// use fastrand::Rng;
/// use pswarm::observers::DebugObserver;
/// use pswarm::prelude::*;
/// use pswarm::test_functions::Sphere;
///
/// # fn main() -> Result<(), RunError<Infallible>> {
/// let pso = PSO::new(Rng::with_seed(0));
/// let swarm = Swarm::new(10, [(-1.0, 1.0), (-1.0, 1.0)])?;
/// let result = SwarmMinimizer::new(pso, swarm, 5, 1e-8)?
///     .with_observer(DebugObserver::build())
///     .minimize(&Sphere { n: 2 }, &mut ())?;
/// // ^ This will print a progress line for each iteration
/// # Ok(())
/// # }
/// ```
pub struct DebugObserver;
impl DebugObserver {
    /// Finalize the observer by wrapping it in an [`Arc`] and [`RwLock`]
    pub fn build() -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(Self))
    }
}
impl<U> SwarmObserver<U> for DebugObserver {
    fn callback(&mut self, iteration: usize, swarm: &Swarm, _user_data: &mut U) {
        println!("Iteration {} - \tcost: {:.10}", iteration, swarm.gbest.fx);
    }
}

/// A [`SwarmObserver`] which stores the swarm particles' history as well as the history of
/// global best positions.
#[derive(Default, Clone, Serialize)]
pub struct TrackingSwarmObserver {
    /// The history of the swarm particles, one snapshot per iteration
    pub history: Vec<Vec<Particle>>,
    /// The history of the best position in the swarm, one entry per iteration
    pub best_history: Vec<Point>,
}

impl TrackingSwarmObserver {
    /// Finalize the observer by wrapping it in an [`Arc`] and [`RwLock`]
    pub fn build() -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(Self::default()))
    }
}

impl<U> SwarmObserver<U> for TrackingSwarmObserver {
    fn callback(&mut self, _iteration: usize, swarm: &Swarm, _user_data: &mut U) {
        self.history.push(swarm.particles());
        self.best_history.push(swarm.gbest.clone());
    }
}

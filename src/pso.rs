use std::fmt::Display;
use std::marker::PhantomData;
use std::sync::Arc;

use fastrand::Rng;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::{
    error::{RunError, SwarmError},
    observers::SwarmObserver,
    point::Point,
    swarm::Swarm,
    utils::SampleFloat,
    CostFunction, Float,
};

/// Particle Swarm Optimizer
///
/// The PSO algorithm involves an ensemble of particles which are aware of the best position
/// found by any member of the swarm. Each iteration, every particle's velocity is updated as
///
/// ```math
/// v_i^{t+1} = w v_i^t + c_1 r_{1,i}^{t+1}(p^t_i - x^t_i) + c_2 r_{2,i}^{t+1}(g^t - x^t_i)
/// ```
/// where $`r_1`$ and $`r_2`$ are uniformly distributed random scalars in $`[0,1)`$ drawn once
/// per particle per iteration (shared across that particle's axes, so the whole correction is
/// coupled by the same stochastic weight), $`w`$ is an inertial weight parameter, $`c_1`$ and
/// $`c_2`$ are cognitive and social weights respectively, $`p_i^t`$ is the particle's personal
/// best position, and $`g^t`$ is the swarm's best position. See [^1] for more information.
///
/// Positions are clamped into the per-axis limits after every update; velocities are never
/// clamped or reflected, so momentum gained against a wall carries into later iterations.
///
/// [^1]: [Houssein, E. H., Gad, A. G., Hussain, K., & Suganthan, P. N. (2021). Major Advances in Particle Swarm Optimization: Theory, Analysis, and Application. In Swarm and Evolutionary Computation (Vol. 63, p. 100868). Elsevier BV.](https://doi.org/10.1016/j.swevo.2021.100868)
#[derive(Clone)]
pub struct PSO {
    w: Float,
    c1: Float,
    c2: Float,
    sentinel: Float,
    rng: Rng,
}

impl PSO {
    /// The default initial best value, guaranteed worse than any realistic cost in a
    /// minimization. Override it with [`PSO::with_sentinel`] if the cost function can exceed it.
    pub const DEFAULT_SENTINEL: Float = 1e10;

    /// Construct a new particle swarm optimizer using the given random number generator.
    ///
    /// The generator is the run's only source of randomness; seed it beforehand to make the run
    /// reproducible.
    pub fn new(rng: Rng) -> Self {
        Self {
            w: 0.8,
            c1: 0.1,
            c2: 0.1,
            sentinel: Self::DEFAULT_SENTINEL,
            rng,
        }
    }
    /// Sets the inertial weight $`w`$ (default = `0.8`).
    ///
    /// # Panics
    ///
    /// This method will panic if $`w < 0`$.
    pub fn with_w(mut self, value: Float) -> Self {
        assert!(value >= 0.0);
        self.w = value;
        self
    }
    /// Sets the cognitive weight $`c_1`$ which controls the particle's tendency to move towards
    /// its personal best (default = `0.1`).
    ///
    /// # Panics
    ///
    /// This method will panic if $`c_1 < 0`$.
    pub fn with_c1(mut self, value: Float) -> Self {
        assert!(value >= 0.0);
        self.c1 = value;
        self
    }
    /// Sets the social weight $`c_2`$ which controls the particle's tendency to move towards the
    /// swarm's best known position (default = `0.1`).
    ///
    /// # Panics
    ///
    /// This method will panic if $`c_2 < 0`$.
    pub fn with_c2(mut self, value: Float) -> Self {
        assert!(value >= 0.0);
        self.c2 = value;
        self
    }
    /// Sets the sentinel used to seed every best value before the first evaluation
    /// (default = [`PSO::DEFAULT_SENTINEL`]).
    pub const fn with_sentinel(mut self, value: Float) -> Self {
        self.sentinel = value;
        self
    }
}

/// The terminal state a run reached.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// The global best value dropped below the run's target error.
    Converged,
    /// The iteration budget ran out first.
    Exhausted,
}

/// The output artifact of a completed run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// The best position found by any particle, along with its cost value.
    pub best: Point,
    /// Which terminal state the run reached.
    pub termination: Termination,
    /// The number of full passes over the swarm that were performed.
    pub iterations: usize,
    /// The total number of cost function evaluations.
    pub n_f_evals: usize,
    /// The swarm in its final state, for callers that want to inspect every particle.
    pub swarm: Swarm,
}

impl Display for RunResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.swarm)
    }
}

/// The main struct used for running the [`PSO`] algorithm on [`CostFunction`]s.
///
/// A minimizer owns a [`Swarm`] and the run's stopping parameters. It moves through
/// `Ready -> Iterating -> Converged | Exhausted`; [`SwarmMinimizer::minimize`] consumes the
/// minimizer, so a run object cannot be restarted after it reaches a terminal state.
pub struct SwarmMinimizer<U, E> {
    /// The [`Swarm`] the run will drive, usually inspected through the returned [`RunResult`].
    pub swarm: Swarm,
    pso: PSO,
    max_iterations: usize,
    target_error: Float,
    observers: Vec<Arc<RwLock<dyn SwarmObserver<U>>>>,
    _phantom: PhantomData<E>,
}

impl<U, E> SwarmMinimizer<U, E> {
    /// Creates a new [`SwarmMinimizer`] with the given algorithm, swarm, iteration budget, and
    /// target error.
    ///
    /// The loop body always runs at least once, and a budget of `max_iterations` permits
    /// `max_iterations + 1` passes over the swarm before the run is declared
    /// [`Exhausted`](`Termination::Exhausted`), matching the classic do/while formulation.
    ///
    /// # Errors
    ///
    /// Returns [`SwarmError::InvalidArgument`] if `max_iterations` is zero.
    pub fn new(
        pso: PSO,
        swarm: Swarm,
        max_iterations: usize,
        target_error: Float,
    ) -> Result<Self, SwarmError> {
        if max_iterations == 0 {
            return Err(SwarmError::InvalidArgument(
                "max_iterations must be nonzero",
            ));
        }
        Ok(Self {
            swarm,
            pso,
            max_iterations,
            target_error,
            observers: Vec::default(),
            _phantom: PhantomData,
        })
    }
    /// Adds a single [`SwarmObserver`] to the [`SwarmMinimizer`].
    pub fn with_observer(mut self, observer: Arc<RwLock<dyn SwarmObserver<U>>>) -> Self {
        self.observers.push(observer);
        self
    }
    /// Minimize the given [`CostFunction`], consuming the minimizer and returning the final
    /// global best along with the terminal state that ended the run.
    ///
    /// The swarm is initialized (random positions inside the limits, zero velocities, sentinel
    /// bests) and then iterated. Each iteration evaluates the cost of every particle exactly
    /// once and updates personal and global bests under strict `<` comparison, then integrates
    /// velocities and positions with per-axis clamping, then notifies observers. The run ends
    /// [`Converged`](`Termination::Converged`) as soon as the global best value is below the
    /// target error, or [`Exhausted`](`Termination::Exhausted`) when the iteration budget runs
    /// out.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Cost`] if the cost function fails; the run aborts immediately with
    /// no partial result.
    pub fn minimize(
        mut self,
        func: &dyn CostFunction<U, E>,
        user_data: &mut U,
    ) -> Result<RunResult, RunError<E>> {
        self.swarm.initialize(&mut self.pso.rng, self.pso.sentinel);
        let mut iterations = 0;
        let termination = loop {
            self.evaluate_and_track(func, user_data)?;
            self.update_particles();
            for observer in &self.observers {
                observer.write().callback(iterations, &self.swarm, user_data);
            }
            iterations += 1;
            if self.swarm.gbest.fx < self.target_error {
                self.swarm.converged = true;
                self.swarm.update_message("CONVERGED");
                break Termination::Converged;
            }
            if iterations > self.max_iterations {
                self.swarm.update_message("MAX ITERATIONS");
                break Termination::Exhausted;
            }
        };
        Ok(RunResult {
            best: self.swarm.gbest.clone(),
            termination,
            iterations,
            n_f_evals: self.swarm.n_f_evals,
            swarm: self.swarm,
        })
    }
    /// Evaluate the cost of every particle at its current position, updating personal and
    /// global bests. Both comparisons are strict, so on an exact tie the earlier-evaluated
    /// holder keeps the best.
    fn evaluate_and_track(
        &mut self,
        func: &dyn CostFunction<U, E>,
        user_data: &mut U,
    ) -> Result<(), RunError<E>> {
        let swarm = &mut self.swarm;
        for i in 0..swarm.storage.n_particles() {
            let cost = func
                .evaluate(swarm.storage.position(i), user_data)
                .map_err(RunError::Cost)?;
            swarm.n_f_evals += 1;
            if cost < swarm.best_values[i] {
                swarm.best_values[i] = cost;
                let (position, _velocity, best_position) = swarm.storage.particle_mut(i);
                best_position.copy_from_slice(position);
            }
            if cost < swarm.gbest.fx {
                swarm.gbest.fx = cost;
                swarm.gbest.x.copy_from_slice(swarm.storage.position(i));
            }
        }
        Ok(())
    }
    /// Integrate every particle's velocity and position, clamping positions into the
    /// order-normalized limits. The global best read here is the one settled by this
    /// iteration's evaluation pass; it is not mutated mid-update.
    fn update_particles(&mut self) {
        let Self { pso, swarm, .. } = &mut *self;
        let (w, c1, c2) = (pso.w, pso.c1, pso.c2);
        for i in 0..swarm.storage.n_particles() {
            // one draw per particle, shared across its axes
            let r1 = pso.rng.float();
            let r2 = pso.rng.float();
            let (position, velocity, best_position) = swarm.storage.particle_mut(i);
            for (j, limit) in swarm.limits.iter().enumerate() {
                let cognitive = c1 * r1 * (best_position[j] - position[j]);
                let social = c2 * r2 * (swarm.gbest.x[j] - position[j]);
                velocity[j] = w * velocity[j] + cognitive + social;
                position[j] += velocity[j];
                position[j] = limit.clamp(position[j]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{
        observers::TrackingSwarmObserver,
        test_functions::{Paraboloid, Rastrigin, Sphere},
    };

    fn seeded_pso(seed: u64) -> PSO {
        PSO::new(Rng::with_seed(seed))
    }

    #[test]
    fn test_rejects_zero_iteration_budget() {
        let swarm = Swarm::new(10, [(-1.0, 1.0)]).unwrap();
        let result = SwarmMinimizer::<(), Infallible>::new(seeded_pso(0), swarm, 0, 0.1);
        assert_eq!(
            result.err(),
            Some(SwarmError::InvalidArgument("max_iterations must be nonzero"))
        );
    }

    #[test]
    fn test_paraboloid_reaches_the_vertex() {
        // the original two-dimensional second-order test problem: minimum 119.8 at (5.2, 3),
        // which never drops below the 0.3 target, so the budget is exhausted
        let pso = seeded_pso(0).with_w(0.1).with_c1(0.5).with_c2(0.8);
        let swarm = Swarm::new(50, [(-10.0, 10.0), (-20.0, 20.0)]).unwrap();
        let result = SwarmMinimizer::<(), Infallible>::new(pso, swarm, 20, 0.3)
            .unwrap()
            .minimize(&Paraboloid, &mut ())
            .unwrap();
        assert_eq!(result.termination, Termination::Exhausted);
        assert_eq!(result.iterations, 21);
        assert_eq!(result.n_f_evals, 21 * 50);
        assert!(result.best.fx >= 119.8 - 1e-9);
        assert!(result.best.fx - 119.8 < 1.0);
        assert_abs_diff_eq!(result.best.x[0], 5.2, epsilon = 0.5);
        assert_abs_diff_eq!(result.best.x[1], 3.0, epsilon = 0.5);
    }

    #[test]
    fn test_sphere_converges_below_target() {
        let pso = seeded_pso(1).with_w(0.5).with_c1(1.0).with_c2(1.0);
        let swarm = Swarm::new(50, [(-5.0, 5.0), (-5.0, 5.0)]).unwrap();
        let result = SwarmMinimizer::<(), Infallible>::new(pso, swarm, 500, 1e-3)
            .unwrap()
            .minimize(&Sphere { n: 2 }, &mut ())
            .unwrap();
        assert_eq!(result.termination, Termination::Converged);
        assert!(result.best.fx < 1e-3);
        assert!(result.swarm.converged);
        assert_eq!(result.swarm.message, "CONVERGED");
        assert!(result.iterations <= 500);
        assert_eq!(result.n_f_evals, result.iterations * 50);
    }

    #[test]
    fn test_global_best_is_monotonic() {
        let tracker = TrackingSwarmObserver::build();
        let pso = seeded_pso(2).with_w(0.7).with_c1(1.2).with_c2(1.2);
        let swarm = Swarm::new(30, [(-5.12, 5.12), (-5.12, 5.12)]).unwrap();
        SwarmMinimizer::<(), Infallible>::new(pso, swarm, 100, -1.0)
            .unwrap()
            .with_observer(tracker.clone())
            .minimize(&Rastrigin { n: 2 }, &mut ())
            .unwrap();
        let tracker = tracker.read();
        for pair in tracker.best_history.windows(2) {
            assert!(pair[1].fx <= pair[0].fx);
        }
    }

    #[test]
    fn test_positions_stay_inside_reversed_limits() {
        let tracker = TrackingSwarmObserver::build();
        let pso = seeded_pso(3).with_w(0.9).with_c1(2.0).with_c2(2.0);
        // both limits supplied backwards on purpose
        let swarm = Swarm::new(25, [(10.0, -10.0), (20.0, -20.0)]).unwrap();
        SwarmMinimizer::<(), Infallible>::new(pso, swarm, 50, -1.0)
            .unwrap()
            .with_observer(tracker.clone())
            .minimize(&Paraboloid, &mut ())
            .unwrap();
        let tracker = tracker.read();
        for snapshot in &tracker.history {
            for particle in snapshot {
                assert!((-10.0..=10.0).contains(&particle.position[0]));
                assert!((-20.0..=20.0).contains(&particle.position[1]));
            }
        }
    }

    #[test]
    fn test_equal_costs_keep_the_earlier_particle() {
        struct Flat;
        impl CostFunction<(), Infallible> for Flat {
            fn evaluate(&self, _x: &[Float], _user_data: &mut ()) -> Result<Float, Infallible> {
                Ok(1.0)
            }
        }
        let swarm = Swarm::new(10, [(-1.0, 1.0), (-1.0, 1.0)]).unwrap();
        let result = SwarmMinimizer::<(), Infallible>::new(seeded_pso(4), swarm, 1, 0.0)
            .unwrap()
            .minimize(&Flat, &mut ())
            .unwrap();
        // every particle scored exactly 1.0, so the global best belongs to particle 0, the
        // first one evaluated
        assert_eq!(result.best.x, result.swarm.particle(0).best.x);
        assert_eq!(result.best.fx, 1.0);
        for particle in result.swarm.particles() {
            assert_eq!(particle.best.fx, 1.0);
        }
    }

    #[test]
    fn test_zero_iteration_budget_still_runs_once() {
        let swarm = Swarm::new(10, [(-1.0, 1.0)]).unwrap();
        let mut minimizer =
            SwarmMinimizer::<(), Infallible>::new(seeded_pso(5), swarm, 1, -1.0).unwrap();
        minimizer.max_iterations = 0;
        let result = minimizer.minimize(&Sphere { n: 1 }, &mut ()).unwrap();
        assert_eq!(result.termination, Termination::Exhausted);
        assert_eq!(result.iterations, 1);
        assert_eq!(result.n_f_evals, 10);
    }

    #[test]
    fn test_identical_seeds_give_identical_runs() {
        let run = || {
            let swarm = Swarm::new(20, [(-3.0, 3.0), (-3.0, 3.0)]).unwrap();
            SwarmMinimizer::<(), Infallible>::new(
                seeded_pso(6).with_w(0.6).with_c1(1.5).with_c2(1.5),
                swarm,
                40,
                -1.0,
            )
            .unwrap()
            .minimize(&Rastrigin { n: 2 }, &mut ())
            .unwrap()
        };
        let first = run();
        let second = run();
        assert_eq!(first, second);
    }

    #[test]
    fn test_cost_error_aborts_the_run() {
        #[derive(Debug, Clone, PartialEq, Eq)]
        struct Exploded;
        struct Fused;
        impl CostFunction<(), Exploded> for Fused {
            fn evaluate(&self, _x: &[Float], _user_data: &mut ()) -> Result<Float, Exploded> {
                Err(Exploded)
            }
        }
        let swarm = Swarm::new(10, [(-1.0, 1.0)]).unwrap();
        let result = SwarmMinimizer::<(), Exploded>::new(seeded_pso(7), swarm, 10, 0.1)
            .unwrap()
            .minimize(&Fused, &mut ());
        assert!(matches!(result.unwrap_err(), RunError::Cost(Exploded)));
    }

    #[test]
    fn test_bests_match_the_visited_history() {
        struct Recorded;
        impl CostFunction<Vec<Vec<Float>>, Infallible> for Recorded {
            fn evaluate(
                &self,
                x: &[Float],
                user_data: &mut Vec<Vec<Float>>,
            ) -> Result<Float, Infallible> {
                user_data.push(x.to_vec());
                Ok(x.iter().map(|xi| xi * xi).sum())
            }
        }
        let n_particles = 4;
        let swarm = Swarm::new(n_particles, [(-3.0, 3.0), (-3.0, 3.0)]).unwrap();
        let mut visited: Vec<Vec<Float>> = Vec::new();
        let result = SwarmMinimizer::<Vec<Vec<Float>>, Infallible>::new(
            seeded_pso(8).with_w(0.7).with_c1(1.0).with_c2(1.0),
            swarm,
            10,
            -1.0,
        )
        .unwrap()
        .minimize(&Recorded, &mut visited)
        .unwrap();
        assert_eq!(visited.len(), result.n_f_evals);
        let cost = |x: &[Float]| -> Float { x.iter().map(|xi| xi * xi).sum() };
        // evaluations run iteration-major, particle-minor
        for (i, particle) in result.swarm.particles().iter().enumerate() {
            let mut best_value = Float::INFINITY;
            let mut best_position: &[Float] = &[];
            for x in visited.iter().skip(i).step_by(n_particles) {
                if cost(x) < best_value {
                    best_value = cost(x);
                    best_position = x;
                }
            }
            assert_eq!(particle.best.fx, best_value);
            assert_eq!(particle.best.x.as_slice(), best_position);
        }
        let global = result
            .swarm
            .particles()
            .iter()
            .map(|p| p.best.fx)
            .fold(Float::INFINITY, Float::min);
        assert_eq!(result.best.fx, global);
    }
}

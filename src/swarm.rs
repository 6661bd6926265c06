use std::fmt::Display;

use fastrand::Rng;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::{
    error::SwarmError, limits::Limit, point::Point, storage::SwarmStorage, utils::SampleFloat,
    Float,
};

/// An owned snapshot of one particle's state, produced from the swarm's backing storage.
///
/// Snapshots are what observers and reports work with; the authoritative state lives in the
/// swarm's contiguous [`SwarmStorage`] block.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// The position of the particle.
    pub position: DVector<Float>,
    /// The velocity of the particle.
    pub velocity: DVector<Float>,
    /// The best position the particle has ever visited (as measured by the minimum observed
    /// cost), along with that cost.
    pub best: Point,
}

impl Display for Particle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "x: {:?}, v: {:?}, best {}",
            self.position.as_slice(),
            self.velocity.as_slice(),
            self.best
        )
    }
}

/// The full population of particles plus the swarm-wide global best.
///
/// A [`Swarm`] is created once per optimization run, initialized by the run driver, and owns all
/// particle state for exactly the duration of that run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Swarm {
    pub(crate) storage: SwarmStorage,
    pub(crate) best_values: Vec<Float>,
    pub(crate) limits: Vec<Limit>,
    /// The best (lowest-cost) position found by any particle at any point in the run so far.
    pub gbest: Point,
    /// An indicator of whether the swarm has converged below the run's target error.
    pub converged: bool,
    /// A message containing information about the condition of the swarm or convergence.
    pub message: String,
    /// The number of cost function evaluations performed so far.
    pub n_f_evals: usize,
}

impl Swarm {
    /// Construct a new [`Swarm`] with `n_particles` particles over the given per-axis limits.
    ///
    /// The limits may each be supplied with their two bound values in either order. All particle
    /// state is allocated here as a single backing block; positions and bests are filled in by
    /// the run driver before the first iteration.
    ///
    /// # Errors
    ///
    /// Returns [`SwarmError::InvalidArgument`] if `n_particles` is zero or no limits are given,
    /// and [`SwarmError::OutOfMemory`] if the backing block cannot be allocated. On error,
    /// nothing partially constructed is reachable.
    pub fn new<I, L>(n_particles: usize, limits: I) -> Result<Self, SwarmError>
    where
        I: IntoIterator<Item = L>,
        L: Into<Limit>,
    {
        let limits: Vec<Limit> = limits.into_iter().map(Into::into).collect();
        if n_particles == 0 {
            return Err(SwarmError::InvalidArgument("n_particles must be nonzero"));
        }
        if limits.is_empty() {
            return Err(SwarmError::InvalidArgument("limits must be nonempty"));
        }
        let storage = SwarmStorage::allocate(n_particles, limits.len())?;
        let mut best_values = Vec::new();
        best_values
            .try_reserve_exact(n_particles)
            .map_err(|_| SwarmError::OutOfMemory {
                n_particles,
                n_axes: limits.len(),
            })?;
        best_values.resize(n_particles, 0.0);
        Ok(Self {
            storage,
            best_values,
            limits,
            gbest: Point::default(),
            converged: false,
            message: "Uninitialized".to_string(),
            n_f_evals: 0,
        })
    }
    /// The number of particles in the swarm.
    pub const fn n_particles(&self) -> usize {
        self.storage.n_particles()
    }
    /// The dimension of the search domain.
    pub const fn dimension(&self) -> usize {
        self.storage.n_axes()
    }
    /// The per-axis limits of the search domain.
    pub fn limits(&self) -> &[Limit] {
        &self.limits
    }
    /// An owned snapshot of the particle at the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.n_particles()`.
    pub fn particle(&self, index: usize) -> Particle {
        Particle {
            position: DVector::from_column_slice(self.storage.position(index)),
            velocity: DVector::from_column_slice(self.storage.velocity(index)),
            best: Point {
                x: DVector::from_column_slice(self.storage.best_position(index)),
                fx: self.best_values[index],
            },
        }
    }
    /// Owned snapshots of every particle in the swarm, in iteration order.
    pub fn particles(&self) -> Vec<Particle> {
        (0..self.n_particles()).map(|i| self.particle(i)).collect()
    }
    /// Updates the [`Swarm::message`] field.
    pub fn update_message(&mut self, message: &str) {
        self.message = message.to_string();
    }
    /// Bring the swarm into its starting state: uniform random positions inside the normalized
    /// limits (copied into each particle's best position), zero velocities, and every best value
    /// set to the sentinel.
    pub(crate) fn initialize(&mut self, rng: &mut Rng, sentinel: Float) {
        self.gbest = Point {
            x: DVector::zeros(self.dimension()),
            fx: sentinel,
        };
        self.converged = false;
        self.n_f_evals = 0;
        for value in &mut self.best_values {
            *value = sentinel;
        }
        for i in 0..self.storage.n_particles() {
            let (position, velocity, best_position) = self.storage.particle_mut(i);
            for (j, limit) in self.limits.iter().enumerate() {
                let x0 = rng.in_limit(limit);
                position[j] = x0;
                best_position[j] = x0;
                velocity[j] = 0.0;
            }
        }
        self.update_message("Initialized");
    }
}

impl Display for Swarm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let title = format!(
            "╒══════════════════════════════════════════════════════════════════════════════════════════════╕
│{:^94}│",
            "SWARM STATUS",
        );
        let status = format!(
            "╞════════════════════════════════════════════════════════════════╤═════════════════════════════╡
│ Status: {}                                        │ fval: {:+12.3E}          │",
            if self.converged {
                "Converged      "
            } else {
                "Invalid Minimum"
            },
            self.gbest.fx,
        );
        let message = format!(
            "├────────────────────────────────────────────────────────────────┴─────────────────────────────┤
│ Message: {:<83} │",
            self.message,
        );
        let header =
            "├───────╥────────────────────────────────────────────╥──────────────┬──────────────┬───────────┤
│ Par # ║ Value                                      ║       -Bound │       +Bound │ At Limit? │
├───────╫────────────────────────────────────────────╫──────────────┼──────────────┼───────────┤"
                .to_string();
        let mut res_list: Vec<String> = vec![];
        for (i, xi) in self.gbest.x.iter().enumerate() {
            let row = format!(
                "│ {:>5} ║ {:>+12.8E}                             ║ {:>+12.3E} │ {:>+12.3E} │ {:^9} │",
                i,
                xi,
                self.limits[i].lower(),
                self.limits[i].upper(),
                if self.limits[i].at_limit(*xi) { "yes" } else { "" }
            );
            res_list.push(row);
        }
        let bottom = "└───────╨────────────────────────────────────────────╨──────────────┴──────────────┴───────────┘".to_string();
        let out = [title, status, message, header, res_list.join("\n"), bottom].join("\n");
        write!(f, "{}", out)
    }
}

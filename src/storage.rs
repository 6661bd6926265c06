use serde::{Deserialize, Serialize};

use crate::{error::SwarmError, Float};

/// The number of per-particle vector roles held in the backing block (position, velocity, best
/// position).
const N_ROLES: usize = 3;

/// Contiguous backing storage for every particle's position, velocity, and best position.
///
/// All three vectors of all particles live in a single allocation indexed as
/// `[particle][role][axis]`, with the three roles of one particle adjacent. This keeps the
/// allocation count independent of the population size and means the whole swarm's state is
/// released at once when the storage is dropped; no per-particle vector can outlive the block.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SwarmStorage {
    data: Vec<Float>,
    n_particles: usize,
    n_axes: usize,
}

impl SwarmStorage {
    /// Allocates a zeroed block sized for `n_particles * 3 * n_axes` scalars.
    ///
    /// # Errors
    ///
    /// Returns [`SwarmError::OutOfMemory`] if the required length overflows or the allocator
    /// refuses the request. No partial allocation is reachable after a failure.
    pub fn allocate(n_particles: usize, n_axes: usize) -> Result<Self, SwarmError> {
        let len = n_particles
            .checked_mul(N_ROLES)
            .and_then(|n| n.checked_mul(n_axes))
            .ok_or(SwarmError::OutOfMemory {
                n_particles,
                n_axes,
            })?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| SwarmError::OutOfMemory {
                n_particles,
                n_axes,
            })?;
        data.resize(len, 0.0);
        Ok(Self {
            data,
            n_particles,
            n_axes,
        })
    }
    /// The number of particles the block was sized for.
    pub const fn n_particles(&self) -> usize {
        self.n_particles
    }
    /// The number of axes per particle vector.
    pub const fn n_axes(&self) -> usize {
        self.n_axes
    }
    const fn base(&self, particle: usize) -> usize {
        particle * N_ROLES * self.n_axes
    }
    /// The current position of particle `particle`.
    pub fn position(&self, particle: usize) -> &[Float] {
        let base = self.base(particle);
        &self.data[base..base + self.n_axes]
    }
    /// The current velocity of particle `particle`.
    pub fn velocity(&self, particle: usize) -> &[Float] {
        let base = self.base(particle) + self.n_axes;
        &self.data[base..base + self.n_axes]
    }
    /// The best position ever visited by particle `particle`.
    pub fn best_position(&self, particle: usize) -> &[Float] {
        let base = self.base(particle) + 2 * self.n_axes;
        &self.data[base..base + self.n_axes]
    }
    /// Disjoint mutable views of one particle's position, velocity, and best position.
    pub fn particle_mut(
        &mut self,
        particle: usize,
    ) -> (&mut [Float], &mut [Float], &mut [Float]) {
        let base = self.base(particle);
        let chunk = &mut self.data[base..base + N_ROLES * self.n_axes];
        let (position, rest) = chunk.split_at_mut(self.n_axes);
        let (velocity, best_position) = rest.split_at_mut(self.n_axes);
        (position, velocity, best_position)
    }
}

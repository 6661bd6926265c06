use thiserror::Error;

/// Errors detected while configuring or allocating a swarm.
///
/// Both variants are reported eagerly, before the optimization loop starts; once a run is
/// iterating, the only remaining failure mode is the cost function itself (see
/// [`RunError::Cost`]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SwarmError {
    /// A construction input violated its contract (zero-sized population, empty limits, or a
    /// zero iteration budget).
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// The backing storage for the swarm could not be allocated. Nothing partially initialized
    /// survives this error.
    #[error("failed to allocate swarm storage for {n_particles} particles over {n_axes} axes")]
    OutOfMemory {
        /// The requested population size.
        n_particles: usize,
        /// The requested number of axes.
        n_axes: usize,
    },
}

/// Errors reported by [`SwarmMinimizer::minimize`](`crate::pso::SwarmMinimizer::minimize`).
#[derive(Debug, Error)]
pub enum RunError<E> {
    /// A configuration or allocation error surfaced while setting the run up.
    #[error(transparent)]
    Swarm(#[from] SwarmError),
    /// The cost function failed. This is a caller contract violation and aborts the run with no
    /// retry and no partial result.
    #[error("cost function evaluation failed")]
    Cost(#[source] E),
}

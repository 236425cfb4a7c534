//! Error taxonomy
//!
//! Every fallible operation of the crate returns `Result<T, SolverError>`.
//! The variants separate problems detected *before* a run (bad
//! configuration) from problems detected *during* a run (a non-finite state
//! or an unsafe time step), so callers can react differently.
//!
//! The zero-wave-speed degeneracy is not an error: the
//! [`StabilityController`](crate::solver::StabilityController) falls back to
//! the configured step size and logs a warning. Only an infinite or NaN wave
//! speed is reported, as `NonFiniteWaveSpeed`.

use thiserror::Error;

use crate::solver::Scheme;

/// Errors reported by the solver
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// Invalid problem parameters, rejected before a run starts
    ///
    /// Examples: fewer than two cells, empty domain, CFL outside (0, 1],
    /// non-positive time horizon.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A scheme produced a non-finite value
    ///
    /// Terminal for the run: retrying with the same parameters cannot fix a
    /// genuine instability.
    #[error(
        "Numerical instability in {scheme} at t = {time}: cell {cell} became {value}. \
         Try a smaller CFL number or a more diffusive scheme."
    )]
    Instability {
        scheme: Scheme,
        time: f64,
        cell: usize,
        value: f64,
    },

    /// A time step exceeds the CFL bound of the current state
    #[error("Unsafe time step: dt = {dt} exceeds the CFL limit {limit}")]
    UnsafeTimeStep { dt: f64, limit: f64 },

    /// The time step is too small to change the simulation time
    #[error("Time step {dt} cannot advance past t = {time}")]
    Stalled { time: f64, dt: f64 },

    /// The flux derivative is not finite at some cell
    ///
    /// No CFL bound can be derived from such a state.
    #[error("Wave speed |f'(u)| is {value} at cell {cell}")]
    NonFiniteWaveSpeed { cell: usize, value: f64 },

    /// A grid index outside `[0, len - 1]`
    ///
    /// Only a defect in a scheme implementation can trigger this.
    #[error("Index {index} out of bounds for a grid of {len} cells")]
    OutOfBounds { index: usize, len: usize },
}

impl SolverError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// True for failures detected while stepping
    pub fn is_numerical(&self) -> bool {
        matches!(
            self,
            Self::Instability { .. }
                | Self::UnsafeTimeStep { .. }
                | Self::Stalled { .. }
                | Self::NonFiniteWaveSpeed { .. }
        )
    }
}

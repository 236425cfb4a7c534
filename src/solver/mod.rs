//! Numerical solvers
//!
//! This module holds everything that decides HOW a conservation law is
//! solved: the discretized domain, the ghost-cell policy, the CFL
//! controller, the four schemes and the loop that drives them.
//!
//! # Core Concepts
//!
//! ## The Architecture (WHAT vs HOW)
//!
//! 1. **Scenario** (`Scenario`) - WHAT to solve
//!    - Conservation law (flux, derivative, initial condition)
//!    - Spatial domain (interval and cell count)
//!
//! 2. **Configuration** (`TimeStepConfig`) - HOW to step
//!    - CFL number and time horizon
//!    - Boundary policy
//!    - Recording stride, adaptive or fixed steps
//!
//! 3. **Scheme** (`Scheme`, implements `Solver`) - The numerical method
//!    - Lax-Friedrichs or Lax-Wendroff
//!    - Finite differences or finite volumes
//!
//! The same scenario can be handed to every scheme, and the same
//! configuration reused across scenarios of a convergence study.
//!
//! # Module Organization
//!
//! - **`domain`**: `Domain`, the uniform cell partition of an interval
//! - **`boundary`**: `BoundaryCondition`, one ghost cell per side
//! - **`grid`**: `Grid`, the cell values and their diagnostics
//! - **`stability`**: `StabilityController`, CFL time steps
//! - **`methods`**: `Scheme` and the Lax-Friedrichs / Lax-Wendroff kernels
//! - **`scenario`**: `Scenario`
//! - **`traits`**: `Solver`, `TimeStepConfig`, `SimulationRecord`
//! - **`stepper`**: `TimeStepper`, the run state machine
//!
//! # Quick Start Example
//!
//! ```rust
//! use conslaw_rs::physics::{FluxModel, Interval, Profile};
//! use conslaw_rs::solver::{Domain, Scenario, Scheme, Solver, TimeStepConfig};
//!
//! // 1. WHAT to solve
//! let pulse = Profile::Indicator(Interval::new(0.4, 0.6)?);
//! let law = FluxModel::linear(1.0, pulse.into_fn());
//! let scenario = Scenario::new(&law, Domain::new(0.0, 1.0, 100)?);
//!
//! // 2. HOW to step
//! let config = TimeStepConfig::new(0.8, 0.5, 1e-3);
//!
//! // 3. Solve
//! let record = Scheme::LaxWendroffFv.solve(&scenario, &config)?;
//!
//! let last = record.last().unwrap();
//! assert_eq!(last.time, 0.5);
//! assert_eq!(last.grid.len(), 100);
//! # Ok::<(), conslaw_rs::SolverError>(())
//! ```
//!
//! # Workflow Diagram
//!
//! ```text
//! ┌─────────────────┐
//! │ ConservationLaw │  (f, f′, u0)
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐   ┌────────────────┐
//! │ Scenario        │   │ TimeStepConfig │
//! │ (law + domain)  │   │ (CFL, T, ...)  │
//! └────────┬────────┘   └───────┬────────┘
//!          └──────────┬─────────┘
//!            ┌────────▼────────┐
//!            │ TimeStepper     │ ◄──┐
//!            └────────┬────────┘    │
//!                     │ dt          │
//!            ┌────────▼────────┐    │
//!            │ Stability       │    │ repeat until T
//!            │ Controller      │    │
//!            └────────┬────────┘    │
//!            ┌────────▼────────┐    │
//!            │ Scheme          │ ───┘
//!            └────────┬────────┘
//!            ┌────────▼─────────┐
//!            │ SimulationRecord │
//!            └──────────────────┘
//! ```
//!
//! # Error Handling
//!
//! Every fallible call returns `Result<T, SolverError>`:
//!
//! ```rust
//! use conslaw_rs::SolverError;
//! use conslaw_rs::solver::TimeStepConfig;
//!
//! match TimeStepConfig::new(1.5, 1.0, 0.01).validate() {
//!     Err(SolverError::Configuration(message)) => assert!(message.contains("CFL")),
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```
//!
//! Common errors:
//! - Invalid configuration (CFL outside (0, 1], fewer than two cells)
//! - Numerical instability (NaN or Inf in the updated state)
//! - Unsafe fixed time step (exceeds the CFL bound)

// =================================================================================================
// Module Declarations
// =================================================================================================
mod boundary;
mod domain;
mod grid;
mod scenario;
mod stability;
mod stepper;
mod traits;
pub mod methods;

// =================================================================================================
// Parallel Execution Threshold
// =================================================================================================
//
// Cell maps switch to rayon above this many elements, only when the crate is
// built with the `parallel` feature. The value is an AtomicUsize so that
// benchmarks can tune it at runtime. Relaxed ordering is sufficient: the
// value is a performance hint, not a synchronisation point.
// =================================================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

/// Default number of cells above which cell maps run in parallel.
///
/// Below that point the overhead of rayon's dispatch outweighs the
/// per-cell work of a flux evaluation.
const DEFAULT_PARALLEL_THRESHOLD: usize = 999;

static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Return the current parallel-execution threshold.
///
/// # Example
///
/// ```rust
/// use conslaw_rs::solver::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the parallel-execution threshold to a new value.
///
/// # Panics
///
/// Panics when `threshold == 0`.
///
/// # Example
///
/// ```rust
/// use conslaw_rs::solver::{parallel_threshold, set_parallel_threshold};
///
/// let previous = parallel_threshold();
/// set_parallel_threshold(2048);
/// assert_eq!(parallel_threshold(), 2048);
///
/// set_parallel_threshold(previous);
/// ```
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

#[cfg(test)]
static THRESHOLD_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// RAII guard that sets the threshold and restores the previous value on
/// drop.
///
/// Guards are serialized so concurrent tests never observe each other's
/// threshold.
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[cfg(test)]
impl ThresholdGuard {
    pub(crate) fn save(new_value: usize) -> Self {
        let lock = THRESHOLD_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self { previous, _lock: lock }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use boundary::BoundaryCondition;
pub use domain::Domain;
pub use grid::Grid;
pub use methods::{Discretization, Method, Scheme, SchemeUpdate};
pub use scenario::Scenario;
pub use stability::{StabilityController, StepLimit, TimeStep};
pub use stepper::{RunState, StepReport, TimeStepper};
pub use traits::{SimulationRecord, Snapshot, Solver, TimeStepConfig, TimeStepMode};

// =================================================================================================
// Tests
// =================================================================================================

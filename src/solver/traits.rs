//! Solver trait, run configuration and simulation record
//!
//! # Design Philosophy
//!
//! - `TimeStepConfig` is HOW to step: CFL number, horizon, fallback step,
//!   boundary policy, recording stride. It is immutable for a run and passed
//!   explicitly, never held as global state, so independent runs (for
//!   instance a convergence study) cannot contaminate each other.
//! - `SimulationRecord` is what a completed run hands back: timestamped
//!   grid snapshots plus metadata for reproducibility.
//! - `Solver` is the stable entry point implemented by every scheme.

use std::collections::HashMap;

use crate::error::SolverError;
use crate::solver::{BoundaryCondition, Grid, Scenario};

// =================================================================================================
// Solver Trait
// =================================================================================================

/// Numerical solver interface
pub trait Solver {
    /// Run a scenario up to the configured horizon
    fn solve(
        &self,
        scenario: &Scenario,
        config: &TimeStepConfig,
    ) -> Result<SimulationRecord, SolverError>;

    /// Display name
    fn name(&self) -> &str;
}

// =================================================================================================
// Time Step Mode
// =================================================================================================

/// How the step size is chosen
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TimeStepMode {
    /// `dt = CFL·dx/a_max` recomputed every step
    #[default]
    Adaptive,

    /// Constant `dt = T/steps`, each step checked against the CFL bound
    Fixed { steps: usize },
}

// =================================================================================================
// Time Step Configuration
// =================================================================================================

/// Immutable run parameters
///
/// # Examples
///
/// ```rust
/// use conslaw_rs::solver::{BoundaryCondition, TimeStepConfig};
///
/// let config = TimeStepConfig::new(0.8, 0.5, 1e-3)
///     .with_boundary(BoundaryCondition::Transmissive)
///     .with_record_stride(10);
///
/// assert!(config.validate().is_ok());
/// assert!(TimeStepConfig::new(1.5, 0.5, 1e-3).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeStepConfig {
    /// Courant number, in (0, 1]
    pub cfl: f64,

    /// Time horizon T > 0
    pub final_time: f64,

    /// Step used when the maximum wave speed is zero
    pub fallback_dt: f64,

    /// Ghost-cell policy
    pub boundary: BoundaryCondition,

    /// Record a snapshot every `record_stride` steps (the initial and final
    /// states are always recorded)
    pub record_stride: usize,

    /// Step size selection
    pub mode: TimeStepMode,
}

impl TimeStepConfig {
    /// Adaptive stepping with periodic boundaries, recording every step
    pub fn new(cfl: f64, final_time: f64, fallback_dt: f64) -> Self {
        Self {
            cfl,
            final_time,
            fallback_dt,
            boundary: BoundaryCondition::default(),
            record_stride: 1,
            mode: TimeStepMode::default(),
        }
    }

    pub fn with_boundary(mut self, boundary: BoundaryCondition) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn with_record_stride(mut self, record_stride: usize) -> Self {
        self.record_stride = record_stride;
        self
    }

    /// Switch to a constant step `final_time / steps`
    pub fn with_fixed_steps(mut self, steps: usize) -> Self {
        self.mode = TimeStepMode::Fixed { steps };
        self
    }

    /// Validate parameters
    pub fn validate(&self) -> Result<(), SolverError> {
        if !(self.cfl > 0.0 && self.cfl <= 1.0) {
            return Err(SolverError::configuration(format!(
                "CFL number must be in (0, 1], got {}",
                self.cfl
            )));
        }
        if !(self.final_time > 0.0 && self.final_time.is_finite()) {
            return Err(SolverError::configuration(format!(
                "Final time must be positive and finite, got {}",
                self.final_time
            )));
        }
        if !(self.fallback_dt > 0.0 && self.fallback_dt.is_finite()) {
            return Err(SolverError::configuration(format!(
                "Fallback time step must be positive and finite, got {}",
                self.fallback_dt
            )));
        }
        if self.record_stride == 0 {
            return Err(SolverError::configuration("Record stride must be at least 1"));
        }
        if let TimeStepMode::Fixed { steps: 0 } = self.mode {
            return Err(SolverError::configuration("Fixed stepping needs at least 1 step"));
        }

        self.boundary.validate()
    }
}

// =================================================================================================
// Simulation Record
// =================================================================================================

/// Grid state at a recorded step
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Number of steps taken
    pub step: usize,

    /// Simulation time
    pub time: f64,

    /// Copy of the grid
    pub grid: Grid,
}

/// Ordered, append-only sequence of snapshots
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationRecord {
    /// Snapshots in increasing time
    pub snapshots: Vec<Snapshot>,

    /// Run description (scheme, law, parameters)
    pub metadata: HashMap<String, String>,
}

impl SimulationRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a snapshot
    pub fn push(&mut self, step: usize, time: f64, grid: &Grid) {
        self.snapshots.push(Snapshot {
            step,
            time,
            grid: grid.clone(),
        });
    }

    /// Add metadata
    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn first(&self) -> Option<&Snapshot> {
        self.snapshots.first()
    }

    /// Last recorded snapshot (the final state of a completed run)
    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    /// Recorded times
    pub fn times(&self) -> Vec<f64> {
        self.snapshots.iter().map(|snapshot| snapshot.time).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter()
    }
}

// =================================================================================================
// Tests
// =================================================================================================

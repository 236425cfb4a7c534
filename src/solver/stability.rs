//! CFL time-step control
//!
//! # Mathematical Background
//!
//! Explicit schemes for `∂t u + ∂x f(u) = 0` are stable only while
//! information travels less than one cell per step:
//!
//! ```text
//! a_max = max_i |f′(u_i)|
//! dt    = CFL · dx / a_max,     0 < CFL ≤ 1
//! ```
//!
//! The maximum runs over the ghost values as well, since every stencil
//! reads them. For periodic and transmissive boundaries they repeat
//! interior cells; Dirichlet inflow states can be faster than the interior.
//!
//! # Edge Cases
//!
//! - `a_max = 0` (flat flux, e.g. Burgers on u ≡ 0): there is no CFL bound,
//!   the configured fallback step is used instead and a warning is logged.
//! - The last step is shortened so the run lands exactly on the horizon T.
//! - A non-finite `f′(u_i)` is reported as an error rather than producing
//!   a zero or NaN step.

use std::fmt;

use crate::error::SolverError;
use crate::physics::ConservationLaw;
use crate::solver::{BoundaryCondition, Grid};

/// What determined the size of a time step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepLimit {
    /// CFL bound `CFL·dx/a_max`
    Cfl,
    /// Configured fallback for zero wave speed
    Fallback,
    /// Shortened to land on the time horizon
    Horizon,
    /// Prescribed constant step (fixed-step mode)
    Fixed,
}

impl fmt::Display for StepLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepLimit::Cfl => write!(f, "CFL"),
            StepLimit::Fallback => write!(f, "fallback"),
            StepLimit::Horizon => write!(f, "horizon"),
            StepLimit::Fixed => write!(f, "fixed"),
        }
    }
}

/// A time step and its limiting factor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeStep {
    pub dt: f64,
    pub limit: StepLimit,
}

/// Computes stable time steps from the CFL condition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilityController {
    cfl: f64,
    fallback_dt: f64,
}

impl StabilityController {
    /// Create a controller
    ///
    /// # Errors
    ///
    /// `SolverError::Configuration` when `cfl` is outside (0, 1] or when
    /// `fallback_dt` is not a positive finite number.
    pub fn new(cfl: f64, fallback_dt: f64) -> Result<Self, SolverError> {
        if !(cfl > 0.0 && cfl <= 1.0) {
            return Err(SolverError::configuration(format!(
                "CFL number must be in (0, 1], got {cfl}"
            )));
        }
        if !(fallback_dt > 0.0 && fallback_dt.is_finite()) {
            return Err(SolverError::configuration(format!(
                "Fallback time step must be positive and finite, got {fallback_dt}"
            )));
        }

        Ok(Self { cfl, fallback_dt })
    }

    pub fn cfl(&self) -> f64 {
        self.cfl
    }

    pub fn fallback_dt(&self) -> f64 {
        self.fallback_dt
    }

    /// `a_max = max |f′(u)|` over the cells and both ghost values
    ///
    /// # Errors
    ///
    /// `SolverError::NonFiniteWaveSpeed` for the first cell where f′ is not
    /// finite. A non-finite ghost speed is reported at the edge cell that
    /// reads it.
    pub fn max_wave_speed(
        &self,
        grid: &Grid,
        law: &dyn ConservationLaw,
        boundary: &BoundaryCondition,
    ) -> Result<f64, SolverError> {
        let (left, right) = boundary.ghosts(grid.states())?;
        let last = grid.len() - 1;

        let mut a_max = 0.0_f64;
        let values = std::iter::once((0, left))
            .chain(grid.as_slice().iter().copied().enumerate())
            .chain(std::iter::once((last, right)));

        for (cell, u) in values {
            let speed = law.flux_derivative(u).abs();
            if !speed.is_finite() {
                return Err(SolverError::NonFiniteWaveSpeed { cell, value: speed });
            }
            a_max = a_max.max(speed);
        }

        Ok(a_max)
    }

    /// Largest stable step `CFL·dx/a_max`, or `None` when `a_max = 0`
    pub fn cfl_limit(
        &self,
        grid: &Grid,
        law: &dyn ConservationLaw,
        boundary: &BoundaryCondition,
    ) -> Result<Option<f64>, SolverError> {
        let a_max = self.max_wave_speed(grid, law, boundary)?;

        if a_max == 0.0 {
            Ok(None)
        } else {
            Ok(Some(self.cfl * grid.dx() / a_max))
        }
    }

    /// Stable step for the current state, never beyond `remaining`
    ///
    /// # Example
    ///
    /// ```rust
    /// use conslaw_rs::physics::FluxModel;
    /// use conslaw_rs::solver::{BoundaryCondition, Domain, Grid, StabilityController, StepLimit};
    ///
    /// let law = FluxModel::linear(2.0, |_| 1.0);
    /// let grid = Grid::from_law(Domain::new(0.0, 1.0, 10).unwrap(), &law).unwrap();
    /// let controller = StabilityController::new(0.5, 1.0).unwrap();
    ///
    /// // dt = 0.5 * 0.1 / 2
    /// let step = controller
    ///     .time_step(&grid, &law, &BoundaryCondition::Periodic, 10.0)
    ///     .unwrap();
    /// assert!((step.dt - 0.025).abs() < 1e-15);
    /// assert_eq!(step.limit, StepLimit::Cfl);
    /// ```
    pub fn time_step(
        &self,
        grid: &Grid,
        law: &dyn ConservationLaw,
        boundary: &BoundaryCondition,
        remaining: f64,
    ) -> Result<TimeStep, SolverError> {
        let step = match self.cfl_limit(grid, law, boundary)? {
            Some(dt) => TimeStep { dt, limit: StepLimit::Cfl },
            None => {
                log::warn!(
                    "Zero wave speed for '{}': using fallback step {}",
                    law.name(),
                    self.fallback_dt
                );
                TimeStep { dt: self.fallback_dt, limit: StepLimit::Fallback }
            }
        };

        if step.dt >= remaining {
            Ok(TimeStep { dt: remaining, limit: StepLimit::Horizon })
        } else {
            Ok(step)
        }
    }

    /// Reject a step that violates `dt <= CFL·dx/a_max`
    ///
    /// # Errors
    ///
    /// `SolverError::UnsafeTimeStep` when `dt` exceeds the bound or is not a
    /// positive finite number.
    pub fn check(
        &self,
        dt: f64,
        grid: &Grid,
        law: &dyn ConservationLaw,
        boundary: &BoundaryCondition,
    ) -> Result<(), SolverError> {
        let limit = self.cfl_limit(grid, law, boundary)?;

        if !(dt > 0.0 && dt.is_finite()) {
            return Err(SolverError::UnsafeTimeStep {
                dt,
                limit: limit.unwrap_or(f64::INFINITY),
            });
        }

        match limit {
            Some(limit) if dt > limit => Err(SolverError::UnsafeTimeStep { dt, limit }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::FluxModel;
    use crate::solver::Domain;
    use approx::assert_relative_eq;

    const PERIODIC: BoundaryCondition = BoundaryCondition::Periodic;

    fn grid_for(law: &dyn ConservationLaw, cells: usize) -> Grid {
        Grid::from_law(Domain::new(0.0, 1.0, cells).unwrap(), law).unwrap()
    }

    #[test]
    fn test_controller_rejects_invalid_cfl() {
        assert!(StabilityController::new(0.0, 0.1).is_err());
        assert!(StabilityController::new(1.2, 0.1).is_err());
        assert!(StabilityController::new(f64::NAN, 0.1).is_err());
        assert!(StabilityController::new(1.0, 0.1).is_ok());
    }

    #[test]
    fn test_controller_rejects_invalid_fallback() {
        assert!(StabilityController::new(0.5, 0.0).is_err());
        assert!(StabilityController::new(0.5, f64::INFINITY).is_err());
    }

    #[test]
    fn test_max_wave_speed_uses_absolute_value() {
        let law = FluxModel::burgers(|x| if x < 0.5 { -3.0 } else { 1.0 });
        let grid = grid_for(&law, 10);
        let controller = StabilityController::new(0.9, 0.1).unwrap();

        assert_relative_eq!(controller.max_wave_speed(&grid, &law, &PERIODIC).unwrap(), 3.0);
    }

    #[test]
    fn test_time_step_from_cfl() {
        let law = FluxModel::burgers(|x| 1.0 + x);
        let grid = grid_for(&law, 100);
        let controller = StabilityController::new(0.8, 0.1).unwrap();

        let a_max = controller.max_wave_speed(&grid, &law, &PERIODIC).unwrap();
        let step = controller.time_step(&grid, &law, &PERIODIC, 1.0).unwrap();

        assert_eq!(step.limit, StepLimit::Cfl);
        assert_eq!(step.dt, 0.8 * grid.dx() / a_max);
        assert!(controller.check(step.dt, &grid, &law, &PERIODIC).is_ok());
    }

    #[test]
    fn test_zero_wave_speed_uses_fallback() {
        let law = FluxModel::burgers(|_| 0.0);
        let grid = grid_for(&law, 10);
        let controller = StabilityController::new(0.8, 0.05).unwrap();

        let step = controller.time_step(&grid, &law, &PERIODIC, 1.0).unwrap();
        assert_eq!(step, TimeStep { dt: 0.05, limit: StepLimit::Fallback });
        assert_eq!(controller.cfl_limit(&grid, &law, &PERIODIC).unwrap(), None);
    }

    #[test]
    fn test_step_clamped_to_horizon() {
        let law = FluxModel::linear(1.0, |_| 0.0);
        let grid = grid_for(&law, 10);
        let controller = StabilityController::new(1.0, 1.0).unwrap();

        let step = controller.time_step(&grid, &law, &PERIODIC, 0.03).unwrap();
        assert_eq!(step, TimeStep { dt: 0.03, limit: StepLimit::Horizon });
    }

    #[test]
    fn test_check_detects_unsafe_step() {
        let law = FluxModel::linear(1.0, |_| 0.0);
        let grid = grid_for(&law, 10);
        let controller = StabilityController::new(0.5, 1.0).unwrap();

        // limit = 0.5 * 0.1 / 1
        let result = controller.check(0.06, &grid, &law, &PERIODIC);
        assert!(matches!(result, Err(SolverError::UnsafeTimeStep { .. })));

        assert!(controller.check(0.05, &grid, &law, &PERIODIC).is_ok());
        assert!(controller.check(-0.01, &grid, &law, &PERIODIC).is_err());
        assert!(controller.check(f64::NAN, &grid, &law, &PERIODIC).is_err());
    }

    #[test]
    fn test_non_finite_wave_speed_is_reported() {
        let law = FluxModel::new("broken", |u| u, |u| 1.0 / u, |_| 0.0);
        let grid = grid_for(&law, 4);
        let controller = StabilityController::new(0.5, 1.0).unwrap();

        let result = controller.time_step(&grid, &law, &PERIODIC, 1.0);
        assert!(matches!(
            result,
            Err(SolverError::NonFiniteWaveSpeed { cell: 0, .. })
        ));
    }

    #[test]
    fn test_dirichlet_ghosts_bound_the_step() {
        // Interior at rest, inflow state u = 2 on the left
        let law = FluxModel::burgers(|_| 0.0);
        let grid = grid_for(&law, 10);
        let controller = StabilityController::new(0.5, 1.0).unwrap();
        let inflow = BoundaryCondition::Dirichlet { left: 2.0, right: 0.0 };

        assert_relative_eq!(controller.max_wave_speed(&grid, &law, &inflow).unwrap(), 2.0);

        // dt = 0.5 * 0.1 / 2
        let step = controller.time_step(&grid, &law, &inflow, 1.0).unwrap();
        assert_eq!(step.limit, StepLimit::Cfl);
        assert_relative_eq!(step.dt, 0.025);

        assert!(controller.check(0.05, &grid, &law, &PERIODIC).is_ok());
        assert!(matches!(
            controller.check(0.05, &grid, &law, &inflow),
            Err(SolverError::UnsafeTimeStep { .. })
        ));
    }

    #[test]
    fn test_non_finite_ghost_speed_is_reported_at_edge() {
        let law = FluxModel::new("broken", |u| u, |u| 1.0 / u, |_| 1.0);
        let grid = grid_for(&law, 4);
        let controller = StabilityController::new(0.5, 1.0).unwrap();
        let boundary = BoundaryCondition::Dirichlet { left: 1.0, right: 0.0 };

        let result = controller.max_wave_speed(&grid, &law, &boundary);
        assert!(matches!(
            result,
            Err(SolverError::NonFiniteWaveSpeed { cell: 3, .. })
        ));
    }
}

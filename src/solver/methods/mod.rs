//! Numerical schemes
//!
//! This module contains the four update rules of the crate, selected by
//! the closed [`Scheme`] enumeration.
//!
//! # Available Schemes
//!
//! | Scheme            | Order | Conservative form | Behavior at fronts     |
//! |-------------------|-------|-------------------|------------------------|
//! | `LaxFriedrichsFd` | 1     | no                | smeared, monotone      |
//! | `LaxFriedrichsFv` | 1     | yes               | smeared, monotone      |
//! | `LaxWendroffFd`   | 2     | no                | sharp, oscillatory     |
//! | `LaxWendroffFv`   | 2     | yes               | sharp, oscillatory     |
//!
//! # Design
//!
//! The set of schemes is fixed and small, so dispatch is a `match` over an
//! enum rather than a trait object. Each variant is a pure function of
//! (previous layer, law, dt):
//!
//! 1. The boundary policy extends the state with one ghost cell per side
//! 2. The kernel maps every cell of the previous layer to a fresh vector
//! 3. The new vector is scanned for non-finite values
//!
//! # Example
//!
//! ```rust
//! use conslaw_rs::physics::FluxModel;
//! use conslaw_rs::solver::{BoundaryCondition, Domain, Grid, Scheme};
//!
//! let law = FluxModel::linear(1.0, |x| if x < 0.5 { 1.0 } else { 0.0 });
//! let grid = Grid::from_law(Domain::new(0.0, 1.0, 50).unwrap(), &law).unwrap();
//!
//! for scheme in Scheme::ALL {
//!     let update = scheme
//!         .advance(&grid, &law, &BoundaryCondition::Periodic, 0.01, 0.0)
//!         .unwrap();
//!     assert_eq!(update.state().len(), 50);
//! }
//! ```
//!
//! # Performance Considerations
//!
//! Cell maps go through [`map_cells`]: above
//! [`parallel_threshold()`](crate::solver::parallel_threshold) cells, and
//! with the `parallel` feature, they run on rayon's pool. Every cell is
//! computed by the same expression on the same operands in both paths and
//! the results are collected in index order, so parallel runs are
//! bit-identical to sequential ones.

pub mod lax_friedrichs;
pub mod lax_wendroff;

use std::fmt;
use std::str::FromStr;

use nalgebra::DVector;

use crate::error::SolverError;
use crate::physics::ConservationLaw;
use crate::solver::grid::first_non_finite;
use crate::solver::{
    BoundaryCondition, Grid, Scenario, SimulationRecord, Solver, TimeStepConfig, TimeStepper,
};

// =================================================================================================
// Method and Discretization
// =================================================================================================

/// Family of the update formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    LaxFriedrichs,
    LaxWendroff,
}

/// Discrete form of the update formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Discretization {
    FiniteDifferences,
    FiniteVolumes,
}

// =================================================================================================
// Scheme
// =================================================================================================

/// One of the four supported schemes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// Lax-Friedrichs, finite differences
    LaxFriedrichsFd,
    /// Lax-Friedrichs, finite volumes
    LaxFriedrichsFv,
    /// Lax-Wendroff, finite differences
    LaxWendroffFd,
    /// Lax-Wendroff, two-stage finite volumes
    LaxWendroffFv,
}

impl Scheme {
    /// All schemes, first order first
    pub const ALL: [Scheme; 4] = [
        Scheme::LaxFriedrichsFd,
        Scheme::LaxFriedrichsFv,
        Scheme::LaxWendroffFd,
        Scheme::LaxWendroffFv,
    ];

    /// Select a scheme from its method and discretization
    pub fn from_parts(method: Method, discretization: Discretization) -> Self {
        match (method, discretization) {
            (Method::LaxFriedrichs, Discretization::FiniteDifferences) => Scheme::LaxFriedrichsFd,
            (Method::LaxFriedrichs, Discretization::FiniteVolumes) => Scheme::LaxFriedrichsFv,
            (Method::LaxWendroff, Discretization::FiniteDifferences) => Scheme::LaxWendroffFd,
            (Method::LaxWendroff, Discretization::FiniteVolumes) => Scheme::LaxWendroffFv,
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Scheme::LaxFriedrichsFd | Scheme::LaxFriedrichsFv => Method::LaxFriedrichs,
            Scheme::LaxWendroffFd | Scheme::LaxWendroffFv => Method::LaxWendroff,
        }
    }

    pub fn discretization(&self) -> Discretization {
        match self {
            Scheme::LaxFriedrichsFd | Scheme::LaxWendroffFd => Discretization::FiniteDifferences,
            Scheme::LaxFriedrichsFv | Scheme::LaxWendroffFv => Discretization::FiniteVolumes,
        }
    }

    /// Formal order of accuracy
    pub fn order(&self) -> usize {
        match self.method() {
            Method::LaxFriedrichs => 1,
            Method::LaxWendroff => 2,
        }
    }

    /// True for the finite-volume variants, which conserve Σu up to
    /// boundary fluxes
    pub fn is_conservative(&self) -> bool {
        self.discretization() == Discretization::FiniteVolumes
    }

    /// Short identifier (`lf-fd`, `lf-fv`, `lw-fd`, `lw-fv`)
    pub fn short_name(&self) -> &'static str {
        match self {
            Scheme::LaxFriedrichsFd => "lf-fd",
            Scheme::LaxFriedrichsFv => "lf-fv",
            Scheme::LaxWendroffFd => "lw-fd",
            Scheme::LaxWendroffFv => "lw-fv",
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Scheme::LaxFriedrichsFd => "Lax-Friedrichs (finite differences)",
            Scheme::LaxFriedrichsFv => "Lax-Friedrichs (finite volumes)",
            Scheme::LaxWendroffFd => "Lax-Wendroff (finite differences)",
            Scheme::LaxWendroffFv => "Lax-Wendroff (finite volumes)",
        }
    }

    /// Compute the next layer of `grid`
    ///
    /// `time` is the time of `grid`; it is only used to date an instability.
    ///
    /// # Errors
    ///
    /// - `SolverError::Configuration` when `dt` is not positive and finite
    /// - `SolverError::Instability` when any updated cell is not finite; the
    ///   error carries `time + dt`, the first failing cell and its value
    pub fn advance(
        &self,
        grid: &Grid,
        law: &dyn ConservationLaw,
        boundary: &BoundaryCondition,
        dt: f64,
        time: f64,
    ) -> Result<SchemeUpdate, SolverError> {
        if !(dt > 0.0 && dt.is_finite()) {
            return Err(SolverError::configuration(format!(
                "Time step must be positive and finite, got {dt}"
            )));
        }

        let extended = boundary.extend(grid.states())?;
        let dt_dx = dt / grid.dx();

        let (state, interface_fluxes) = match self {
            Scheme::LaxFriedrichsFd => (lax_friedrichs::finite_difference(&extended, law, dt_dx), None),
            Scheme::LaxFriedrichsFv => {
                let (state, fluxes) = lax_friedrichs::finite_volume(&extended, law, dt_dx);
                (state, Some(fluxes))
            }
            Scheme::LaxWendroffFd => (lax_wendroff::finite_difference(&extended, law, dt_dx), None),
            Scheme::LaxWendroffFv => {
                let (state, fluxes) = lax_wendroff::finite_volume(&extended, law, dt_dx);
                (state, Some(fluxes))
            }
        };

        if let Some((cell, value)) = first_non_finite(&state) {
            return Err(SolverError::Instability {
                scheme: *self,
                time: time + dt,
                cell,
                value,
            });
        }

        Ok(SchemeUpdate { state, interface_fluxes })
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Scheme {
    type Err = SolverError;

    /// Parse `lf-fd`, `lax-friedrichs-fv`, `LaxFriedrich-FiniteDifferences`,
    /// `LaxWendroff_FiniteVolumes`, ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();

        let (method, rest) = if let Some(rest) = normalized.strip_prefix("laxfriedrichs") {
            (Method::LaxFriedrichs, rest)
        } else if let Some(rest) = normalized.strip_prefix("laxfriedrich") {
            (Method::LaxFriedrichs, rest)
        } else if let Some(rest) = normalized.strip_prefix("laxwendroff") {
            (Method::LaxWendroff, rest)
        } else if let Some(rest) = normalized.strip_prefix("lf") {
            (Method::LaxFriedrichs, rest)
        } else if let Some(rest) = normalized.strip_prefix("lw") {
            (Method::LaxWendroff, rest)
        } else {
            return Err(SolverError::configuration(format!("Unknown scheme '{s}'")));
        };

        let discretization = match rest {
            "fd" | "finitedifference" | "finitedifferences" => Discretization::FiniteDifferences,
            "fv" | "finitevolume" | "finitevolumes" => Discretization::FiniteVolumes,
            _ => return Err(SolverError::configuration(format!("Unknown scheme '{s}'"))),
        };

        Ok(Scheme::from_parts(method, discretization))
    }
}

impl Solver for Scheme {
    fn solve(
        &self,
        scenario: &Scenario,
        config: &TimeStepConfig,
    ) -> Result<SimulationRecord, SolverError> {
        TimeStepper::new(scenario, *self, config)?.run()
    }

    fn name(&self) -> &str {
        Scheme::name(self)
    }
}

// =================================================================================================
// Scheme Update
// =================================================================================================

/// Result of one scheme application
#[derive(Debug, Clone, PartialEq)]
pub struct SchemeUpdate {
    state: DVector<f64>,
    interface_fluxes: Option<DVector<f64>>,
}

impl SchemeUpdate {
    /// Updated cells
    pub fn state(&self) -> &DVector<f64> {
        &self.state
    }

    pub fn into_state(self) -> DVector<f64> {
        self.state
    }

    /// The N + 1 numerical fluxes `F_{-½} ... F_{N-½}` (finite volumes only)
    pub fn interface_fluxes(&self) -> Option<&DVector<f64>> {
        self.interface_fluxes.as_ref()
    }

    /// `F_{-½} − F_{N-½}`: inflow minus outflow through the domain ends
    ///
    /// For a conservative scheme, `Σu^{n+1} − Σu^n = (dt/dx)·net_boundary_flux`.
    pub fn net_boundary_flux(&self) -> Option<f64> {
        self.interface_fluxes.as_ref().and_then(|fluxes| {
            let first = fluxes.iter().next()?;
            let last = fluxes.iter().last()?;
            Some(first - last)
        })
    }
}

// =================================================================================================
// Cell Map
// =================================================================================================

/// Evaluate `kernel(i)` for `i` in `0..count`, in index order
///
/// Runs on rayon when the `parallel` feature is enabled and `count`
/// exceeds the parallel threshold.
pub(crate) fn map_cells<F>(count: usize, kernel: F) -> DVector<f64>
where
    F: Fn(usize) -> f64 + Send + Sync,
{
    #[cfg(feature = "parallel")]
    {
        if count > crate::solver::parallel_threshold() {
            use rayon::prelude::*;

            let values: Vec<f64> = (0..count).into_par_iter().map(&kernel).collect();
            return DVector::from_vec(values);
        }
    }

    DVector::from_iterator(count, (0..count).map(kernel))
}

// =================================================================================================
// Tests
// =================================================================================================

//! Discretized state
//!
//! A [`Grid`] owns the cell values `u[0..N]` over a [`Domain`]. Updates are
//! whole-vector replacements: schemes read the previous layer and write a
//! fresh vector, so no stencil ever reads a value written in the same sweep.

use nalgebra::DVector;

use crate::error::SolverError;
use crate::physics::ConservationLaw;
use crate::solver::{BoundaryCondition, Domain};

/// Cell values over a uniform domain
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    domain: Domain,
    states: DVector<f64>,
}

impl Grid {
    /// Sample `initial` at every cell center
    ///
    /// # Errors
    ///
    /// `SolverError::Configuration` when the domain is invalid or when the
    /// initial condition is not finite somewhere.
    pub fn sample<F>(domain: Domain, initial: F) -> Result<Self, SolverError>
    where
        F: Fn(f64) -> f64,
    {
        domain.validate()?;

        let states = DVector::from_iterator(
            domain.cells(),
            (0..domain.cells()).map(|i| initial(domain.cell_center(i))),
        );

        Self::from_states(domain, states)
    }

    /// Sample the initial condition of a conservation law
    ///
    /// # Example
    ///
    /// ```rust
    /// use conslaw_rs::physics::FluxModel;
    /// use conslaw_rs::solver::{Domain, Grid};
    ///
    /// let law = FluxModel::linear(1.0, |x| 2.0 * x);
    /// let grid = Grid::from_law(Domain::new(0.0, 1.0, 4).unwrap(), &law).unwrap();
    ///
    /// assert_eq!(grid.len(), 4);
    /// assert_eq!(grid.get(0).unwrap(), 0.25);
    /// ```
    pub fn from_law(domain: Domain, law: &dyn ConservationLaw) -> Result<Self, SolverError> {
        Self::sample(domain, |x| law.initial_condition(x))
    }

    /// Wrap existing values
    ///
    /// # Errors
    ///
    /// `SolverError::Configuration` on a length mismatch or a non-finite
    /// value.
    pub fn from_states(domain: Domain, states: DVector<f64>) -> Result<Self, SolverError> {
        if states.len() != domain.cells() {
            return Err(SolverError::configuration(format!(
                "State has {} values but the domain has {} cells",
                states.len(),
                domain.cells()
            )));
        }
        if let Some(i) = states.iter().position(|u| !u.is_finite()) {
            return Err(SolverError::configuration(format!(
                "Initial condition is not finite at cell {} (x = {}): {}",
                i,
                domain.cell_center(i),
                states[i]
            )));
        }

        Ok(Self { domain, states })
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Number of cells N
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always false for a valid grid (N >= 2)
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn dx(&self) -> f64 {
        self.domain.dx()
    }

    /// Value of cell `index`
    ///
    /// # Errors
    ///
    /// `SolverError::OutOfBounds` outside `[0, N - 1]`.
    pub fn get(&self, index: usize) -> Result<f64, SolverError> {
        self.states.get(index).copied().ok_or(SolverError::OutOfBounds {
            index,
            len: self.len(),
        })
    }

    /// Read-only view of all values
    pub fn states(&self) -> &DVector<f64> {
        &self.states
    }

    pub fn as_slice(&self) -> &[f64] {
        self.states.as_slice()
    }

    pub fn cell_centers(&self) -> Vec<f64> {
        self.domain.cell_centers()
    }

    /// Replace the whole state vector
    ///
    /// # Errors
    ///
    /// `SolverError::OutOfBounds` when the new vector has a different length;
    /// the grid is left untouched.
    pub fn replace(&mut self, states: DVector<f64>) -> Result<(), SolverError> {
        if states.len() != self.len() {
            return Err(SolverError::OutOfBounds {
                index: states.len().saturating_sub(1),
                len: self.len(),
            });
        }
        self.states = states;
        Ok(())
    }

    /// Σ u_i
    pub fn state_sum(&self) -> f64 {
        self.states.sum()
    }

    /// Σ u_i·dx, the discrete integral of u
    pub fn total_mass(&self) -> f64 {
        self.state_sum() * self.dx()
    }

    /// Index and value of the first non-finite cell
    pub fn first_non_finite(&self) -> Option<(usize, f64)> {
        first_non_finite(&self.states)
    }

    /// Discrete L2 norm of the difference, `sqrt(dx·Σ (u_i - r_i)²)`
    ///
    /// # Errors
    ///
    /// `SolverError::OutOfBounds` on a length mismatch.
    pub fn l2_distance(&self, reference: &DVector<f64>) -> Result<f64, SolverError> {
        if reference.len() != self.len() {
            return Err(SolverError::OutOfBounds {
                index: reference.len().saturating_sub(1),
                len: self.len(),
            });
        }
        Ok(((&self.states - reference).norm_squared() * self.dx()).sqrt())
    }

    /// Exact solution of a linear law at `time`, sampled on this grid
    ///
    /// For periodic boundaries the characteristic foot `x - a·t` is wrapped
    /// back into the domain. Returns `None` when the law has no exact
    /// solution.
    pub fn exact_solution(
        &self,
        law: &dyn ConservationLaw,
        time: f64,
        boundary: &BoundaryCondition,
    ) -> Option<DVector<f64>> {
        let interval = self.domain.interval();
        let speed = law.linear_speed();

        let values: Option<Vec<f64>> = self
            .cell_centers()
            .into_iter()
            .map(|x| match (boundary, speed) {
                (BoundaryCondition::Periodic, Some(a)) => {
                    // Solve at t = 0 on the periodic image of the foot point
                    let foot = interval.wrap(x - a * time);
                    law.exact_solution(0.0, foot)
                }
                _ => law.exact_solution(time, x),
            })
            .collect();

        values.map(DVector::from_vec)
    }
}

/// Index and value of the first non-finite entry
pub(crate) fn first_non_finite(values: &DVector<f64>) -> Option<(usize, f64)> {
    values
        .iter()
        .enumerate()
        .find(|(_, u)| !u.is_finite())
        .map(|(i, u)| (i, *u))
}

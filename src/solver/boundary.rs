//! Boundary conditions
//!
//! Every scheme reads one neighbor on each side of a cell. Before each
//! update the state vector `u[0..N]` is extended with one ghost value per
//! side, derived from the boundary policy:
//!
//! ```text
//!  ghost │ u_0  u_1  ...  u_{N-1} │ ghost
//!  g_L   │                        │ g_R
//! ```
//!
//! | Policy         | g_L        | g_R        |
//! |----------------|------------|------------|
//! | `Periodic`     | u_{N-1}    | u_0        |
//! | `Dirichlet`    | `left`     | `right`    |
//! | `Transmissive` | u_0        | u_{N-1}    |
//!
//! The interior update is then identical for every policy, so the four
//! schemes treat boundaries consistently.

use std::fmt;

use nalgebra::DVector;

use crate::error::SolverError;

// =================================================================================================
// Boundary Condition
// =================================================================================================

/// Ghost-cell policy at both ends of the domain
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BoundaryCondition {
    /// Wrap around: the domain is a circle (default)
    #[default]
    Periodic,

    /// Fixed ghost values (inflow states)
    Dirichlet { left: f64, right: f64 },

    /// Zero-gradient outflow: ghosts copy the adjacent cell
    Transmissive,
}

impl BoundaryCondition {
    /// Validate ghost values
    pub fn validate(&self) -> Result<(), SolverError> {
        if let BoundaryCondition::Dirichlet { left, right } = self
            && (!left.is_finite() || !right.is_finite())
        {
            return Err(SolverError::configuration(format!(
                "Dirichlet boundary values must be finite, got left = {left}, right = {right}"
            )));
        }
        Ok(())
    }

    /// Ghost values `(g_L, g_R)` for a state vector
    ///
    /// # Errors
    ///
    /// `SolverError::OutOfBounds` for an empty state.
    pub fn ghosts(&self, states: &DVector<f64>) -> Result<(f64, f64), SolverError> {
        let n = states.len();
        if n == 0 {
            return Err(SolverError::OutOfBounds { index: 0, len: 0 });
        }

        let ghosts = match *self {
            BoundaryCondition::Periodic => (states[n - 1], states[0]),
            BoundaryCondition::Dirichlet { left, right } => (left, right),
            BoundaryCondition::Transmissive => (states[0], states[n - 1]),
        };
        Ok(ghosts)
    }

    /// State vector with one ghost cell on each side (length N + 2)
    ///
    /// Index `i + 1` of the result is cell `i` of the input.
    ///
    /// # Example
    ///
    /// ```rust
    /// use conslaw_rs::solver::BoundaryCondition;
    /// use nalgebra::DVector;
    ///
    /// let u = DVector::from_vec(vec![1.0, 2.0, 3.0]);
    /// let extended = BoundaryCondition::Periodic.extend(&u).unwrap();
    /// assert_eq!(extended.as_slice(), &[3.0, 1.0, 2.0, 3.0, 1.0]);
    /// ```
    pub fn extend(&self, states: &DVector<f64>) -> Result<DVector<f64>, SolverError> {
        let (left, right) = self.ghosts(states)?;
        let n = states.len();

        let mut extended = Vec::with_capacity(n + 2);
        extended.push(left);
        extended.extend_from_slice(states.as_slice());
        extended.push(right);

        Ok(DVector::from_vec(extended))
    }

    pub fn is_periodic(&self) -> bool {
        matches!(self, BoundaryCondition::Periodic)
    }
}

impl fmt::Display for BoundaryCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryCondition::Periodic => write!(f, "Periodic"),
            BoundaryCondition::Dirichlet { left, right } => {
                write!(f, "Dirichlet ({left}, {right})")
            }
            BoundaryCondition::Transmissive => write!(f, "Transmissive"),
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================

//! Uniform one-dimensional spatial domain
//!
//! The domain `[x_min, x_max]` is split into N cells of width
//! `dx = (x_max - x_min) / N`. States live at the cell centers
//! `x_i = x_min + (i + ½)·dx`, which serve both as finite-difference nodes
//! and as finite-volume cell averages.

use crate::error::SolverError;
use crate::physics::Interval;

/// Spatial discretization parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    interval: Interval,
    cells: usize,
}

impl Domain {
    /// Create a validated domain
    ///
    /// # Errors
    ///
    /// `SolverError::Configuration` when `x_max <= x_min` or `cells < 2`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use conslaw_rs::solver::Domain;
    ///
    /// let domain = Domain::new(0.0, 1.0, 100).unwrap();
    /// assert_eq!(domain.cells(), 100);
    /// assert!((domain.dx() - 0.01).abs() < 1e-15);
    /// ```
    pub fn new(x_min: f64, x_max: f64, cells: usize) -> Result<Self, SolverError> {
        Self::from_interval(Interval::new(x_min, x_max)?, cells)
    }

    /// Create a validated domain over an existing interval
    pub fn from_interval(interval: Interval, cells: usize) -> Result<Self, SolverError> {
        let domain = Self { interval, cells };
        domain.validate()?;
        Ok(domain)
    }

    /// Check `N >= 2` and `dx > 0`
    pub fn validate(&self) -> Result<(), SolverError> {
        if self.cells < 2 {
            return Err(SolverError::configuration(format!(
                "A grid needs at least 2 cells, got {}",
                self.cells
            )));
        }
        if self.dx() <= 0.0 || !self.dx().is_finite() {
            return Err(SolverError::configuration(format!(
                "Cell width must be positive, domain {} with {} cells gives dx = {}",
                self.interval,
                self.cells,
                self.dx()
            )));
        }
        Ok(())
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn cells(&self) -> usize {
        self.cells
    }

    /// Cell width
    pub fn dx(&self) -> f64 {
        self.interval.length() / self.cells as f64
    }

    /// Center of cell `i` (no bounds check)
    pub fn cell_center(&self, i: usize) -> f64 {
        // Computed from the index rather than by accumulation
        self.interval.min() + (i as f64 + 0.5) * self.dx()
    }

    /// All cell centers
    pub fn cell_centers(&self) -> Vec<f64> {
        (0..self.cells).map(|i| self.cell_center(i)).collect()
    }

    /// Same interval with `factor` times more cells
    ///
    /// Used by convergence studies, where each run halves `dx`.
    pub fn refined(&self, factor: usize) -> Result<Self, SolverError> {
        if factor == 0 {
            return Err(SolverError::configuration("Refinement factor must be at least 1"));
        }
        let cells = self.cells.checked_mul(factor).ok_or_else(|| {
            SolverError::configuration(format!(
                "Refining {} cells by {factor} overflows the cell count",
                self.cells
            ))
        })?;
        Self::from_interval(self.interval, cells)
    }
}

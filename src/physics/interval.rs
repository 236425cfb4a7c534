//! Closed real intervals
//!
//! Used for the spatial domain `[x_min, x_max]`, for the time window
//! `[0, T]` and for the support of indicator profiles.

use std::fmt;

use crate::error::SolverError;

/// Closed interval `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    min: f64,
    max: f64,
}

impl Interval {
    /// Create an interval
    ///
    /// # Errors
    ///
    /// `SolverError::Configuration` when an end is not finite or when
    /// `max < min`. A degenerate interval (`min == max`) is accepted here;
    /// a [`Domain`](crate::solver::Domain) rejects it separately.
    ///
    /// # Example
    ///
    /// ```rust
    /// use conslaw_rs::physics::Interval;
    ///
    /// let unit = Interval::new(0.0, 1.0).unwrap();
    /// assert_eq!(unit.length(), 1.0);
    /// assert!(Interval::new(1.0, 0.0).is_err());
    /// ```
    pub fn new(min: f64, max: f64) -> Result<Self, SolverError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(SolverError::configuration(format!(
                "Interval bounds must be finite, got [{min},{max}]"
            )));
        }
        if max < min {
            return Err(SolverError::configuration(format!(
                "Interval maximum {max} is less than its minimum {min}"
            )));
        }

        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// `max - min`
    pub fn length(&self) -> f64 {
        self.max - self.min
    }

    /// Inclusive membership test
    pub fn contains(&self, x: f64) -> bool {
        self.min <= x && x <= self.max
    }

    /// Periodic image of `x` in `[min, max)`
    ///
    /// A degenerate interval maps everything onto `min`.
    pub fn wrap(&self, x: f64) -> f64 {
        let length = self.length();
        if length == 0.0 {
            return self.min;
        }
        self.min + (x - self.min).rem_euclid(length)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.min, self.max)
    }
}

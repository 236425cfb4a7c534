//! Simulation scenario definition
//!
//! A scenario combines a conservation law with a spatial domain.
use crate::error::SolverError;
use crate::physics::ConservationLaw;
use crate::solver::{Domain, Grid};

/// Simulation scenario
///
/// Defines a specific case to simulate:
/// - Conservation law (flux, derivative, initial condition)
/// - Spatial domain (interval and cell count)
///
/// # Design
///
/// The law is borrowed, not owned: the caller keeps it and the same
/// scenario can be solved by every scheme. This is the "WHAT to solve"
/// (not "HOW to solve").
///
/// # Examples
///
/// ```rust
/// use conslaw_rs::physics::FluxModel;
/// use conslaw_rs::solver::{Domain, Scenario};
///
/// let law = FluxModel::burgers(|x| x.sin());
/// let scenario = Scenario::new(&law, Domain::new(0.0, 6.0, 60).unwrap());
///
/// assert_eq!(scenario.law_name(), "burgers");
/// assert_eq!(scenario.initial_grid().unwrap().len(), 60);
/// ```
#[derive(Clone, Copy)]
pub struct Scenario<'a> {
    /// Conservation law (equation)
    pub law: &'a dyn ConservationLaw,

    /// Spatial discretization
    pub domain: Domain,
}

impl<'a> Scenario<'a> {
    /// Create a scenario
    pub fn new(law: &'a dyn ConservationLaw, domain: Domain) -> Self {
        Self { law, domain }
    }

    /// Verify the domain
    pub fn validate(&self) -> Result<(), SolverError> {
        self.domain.validate()
    }

    /// Get law name
    pub fn law_name(&self) -> &str {
        self.law.name()
    }

    /// Initial condition sampled on the domain
    pub fn initial_grid(&self) -> Result<Grid, SolverError> {
        Grid::from_law(self.domain, self.law)
    }

    /// Same law on a domain with `factor` times more cells
    pub fn refined(&self, factor: usize) -> Result<Self, SolverError> {
        Ok(Self::new(self.law, self.domain.refined(factor)?))
    }
}

impl std::fmt::Debug for Scenario<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("law", &self.law_name())
            .field("interval", &self.domain.interval())
            .field("cells", &self.domain.cells())
            .finish()
    }
}

// ================================================================================================
// Tests
// ================================================================================================

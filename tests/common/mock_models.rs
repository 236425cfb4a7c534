//! Mock conservation laws for testing
//!
//! These laws are implemented directly against the trait rather than
//! through `FluxModel`, to check that user-defined laws plug into the
//! solver.

use conslaw_rs::physics::{ConservationLaw, Profile};

// =================================================================================================
// Linear Transport: ∂t u + a ∂x u = 0
// =================================================================================================

/// Linear transport of a profile at constant speed
///
/// Analytical solution: u(t, x) = u0(x − a·t)
pub struct LinearTransport {
    pub speed: f64,
    pub profile: Profile,
}

impl LinearTransport {
    pub fn new(speed: f64, profile: Profile) -> Self {
        Self { speed, profile }
    }
}

impl ConservationLaw for LinearTransport {
    fn flux(&self, u: f64) -> f64 {
        self.speed * u
    }

    fn flux_derivative(&self, _u: f64) -> f64 {
        self.speed
    }

    fn initial_condition(&self, x: f64) -> f64 {
        self.profile.evaluate(x)
    }

    fn name(&self) -> &str {
        "Linear Transport"
    }

    fn exact_solution(&self, time: f64, x: f64) -> Option<f64> {
        Some(self.profile.evaluate(x - self.speed * time))
    }

    fn linear_speed(&self) -> Option<f64> {
        Some(self.speed)
    }
}

// =================================================================================================
// Broken Flux: f(u) = NaN
// =================================================================================================

/// Flux that evaluates to NaN everywhere
///
/// The wave speed is finite, so time steps are computed normally and the
/// failure only shows in the updated state.
pub struct BrokenFlux;

impl ConservationLaw for BrokenFlux {
    fn flux(&self, _u: f64) -> f64 {
        f64::NAN
    }

    fn flux_derivative(&self, _u: f64) -> f64 {
        1.0
    }

    fn initial_condition(&self, _x: f64) -> f64 {
        1.0
    }

    fn name(&self) -> &str {
        "Broken Flux"
    }
}

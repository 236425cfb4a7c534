//! Closure-backed flux model
//!
//! [`FluxModel`] bundles caller-supplied functions f, f′ and u0 into a
//! [`ConservationLaw`]. Two presets cover the classic test problems:
//!
//! - [`FluxModel::linear`]: advection `f(u) = a·u`, with an exact traveling
//!   wave solution `u(t, x) = u0(x − a·t)`
//! - [`FluxModel::burgers`]: inviscid Burgers `f(u) = u²/2`

use std::fmt;

use crate::physics::ConservationLaw;

/// Boxed real function, shareable across threads
pub type BoxedFunction = Box<dyn Fn(f64) -> f64 + Send + Sync + 'static>;

/// Immutable triple (f, f′, u0)
pub struct FluxModel {
    name: String,
    flux: BoxedFunction,
    derivative: BoxedFunction,
    initial: BoxedFunction,
    speed: Option<f64>,
}

impl FluxModel {
    /// Create a model from arbitrary functions
    ///
    /// # Example
    ///
    /// ```rust
    /// use conslaw_rs::physics::{ConservationLaw, FluxModel};
    ///
    /// let model = FluxModel::new(
    ///     "cubic",
    ///     |u| u * u * u,
    ///     |u| 3.0 * u * u,
    ///     |x| x.sin(),
    /// );
    /// assert_eq!(model.flux(2.0), 8.0);
    /// assert_eq!(model.flux_derivative(2.0), 12.0);
    /// ```
    pub fn new<F, D, I>(name: impl Into<String>, flux: F, derivative: D, initial: I) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
        D: Fn(f64) -> f64 + Send + Sync + 'static,
        I: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            flux: Box::new(flux),
            derivative: Box::new(derivative),
            initial: Box::new(initial),
            speed: None,
        }
    }

    /// Linear advection `f(u) = speed·u`
    pub fn linear<I>(speed: f64, initial: I) -> Self
    where
        I: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self {
            name: format!("linear advection (a = {speed})"),
            flux: Box::new(move |u| speed * u),
            derivative: Box::new(move |_| speed),
            initial: Box::new(initial),
            speed: Some(speed),
        }
    }

    /// Inviscid Burgers `f(u) = u²/2`
    pub fn burgers<I>(initial: I) -> Self
    where
        I: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self::new("burgers", |u| 0.5 * u * u, |u| u, initial)
    }

    /// Rename the model
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl ConservationLaw for FluxModel {
    fn flux(&self, u: f64) -> f64 {
        (self.flux)(u)
    }

    fn flux_derivative(&self, u: f64) -> f64 {
        (self.derivative)(u)
    }

    fn initial_condition(&self, x: f64) -> f64 {
        (self.initial)(x)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn exact_solution(&self, time: f64, x: f64) -> Option<f64> {
        // Characteristics of a linear flux are straight lines x - a·t = const.
        self.speed.map(|speed| (self.initial)(x - speed * time))
    }

    fn linear_speed(&self) -> Option<f64> {
        self.speed
    }
}

impl fmt::Debug for FluxModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FluxModel")
            .field("name", &self.name)
            .field("linear speed", &self.speed)
            .finish()
    }
}

//! Conservation law trait
//!
//! This module defines the core API on the physics side: a scalar
//! conservation law `∂t u + ∂x f(u) = 0` together with its initial
//! condition.

// =================================================================================================
// Conservation Law
// =================================================================================================

/// Scalar hyperbolic conservation law with its initial condition
///
/// # Contract
///
/// All methods are pure: no side effects, no internal state. The schemes
/// call them many times per step, possibly from several threads when the
/// `parallel` feature is enabled, hence the `Send + Sync` bound.
///
/// `flux_derivative` must be the derivative of `flux`. The Lax-Wendroff
/// variants rely on this for second-order accuracy; an inconsistent pair
/// silently degrades accuracy and cannot be detected in general.
///
/// # Example
///
/// ```rust
/// use conslaw_rs::physics::ConservationLaw;
///
/// struct Advection;
///
/// impl ConservationLaw for Advection {
///     fn flux(&self, u: f64) -> f64 { 2.0 * u }
///     fn flux_derivative(&self, _u: f64) -> f64 { 2.0 }
///     fn initial_condition(&self, x: f64) -> f64 { (-x * x).exp() }
///     fn name(&self) -> &str { "advection" }
/// }
///
/// let law = Advection;
/// assert_eq!(law.flux(1.5), 3.0);
/// assert_eq!(law.exact_solution(1.0, 2.0), None);
/// ```
pub trait ConservationLaw: Send + Sync {
    /// Flux function f(u)
    fn flux(&self, u: f64) -> f64;

    /// Derivative f′(u), the local wave speed
    fn flux_derivative(&self, u: f64) -> f64;

    /// Initial condition u0(x)
    fn initial_condition(&self, x: f64) -> f64;

    /// Display name
    fn name(&self) -> &str;

    /// Exact solution u(t, x), when one is known
    ///
    /// The default implementation knows none.
    fn exact_solution(&self, _time: f64, _x: f64) -> Option<f64> {
        None
    }

    /// Constant wave speed for linear fluxes, `None` otherwise
    fn linear_speed(&self) -> Option<f64> {
        None
    }
}

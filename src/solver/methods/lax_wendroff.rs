//! Lax-Wendroff schemes
//!
//! # Mathematical Background
//!
//! A second-order Taylor expansion in time, `u^{n+1} = u + dt·∂t u +
//! ½dt²·∂tt u`, with `∂t u = −∂x f(u)` and `∂tt u = ∂x(f′(u)·∂x f(u))`.
//!
//! ## Finite differences
//!
//! With `k = dt/dx` and `a_{i±½} = f′(½(u_i + u_{i±1}))`:
//!
//! ```text
//! u_i^{n+1} = u_i − ½k (f_{i+1} − f_{i-1})
//!                 + ½k² [a_{i+½}(f_{i+1} − f_i) − a_{i−½}(f_i − f_{i-1})]
//! ```
//!
//! ## Finite volumes (two-stage Richtmyer form)
//!
//! ```text
//! u_{i+½}^{n+½} = ½(u_i + u_{i+1}) − ½k (f_{i+1} − f_i)     (predictor)
//! F_{i+½}       = f(u_{i+½}^{n+½})
//! u_i^{n+1}     = u_i − k (F_{i+½} − F_{i−½})               (corrector)
//! ```
//!
//! Both variants reduce to the classic Lax-Wendroff scheme for linear
//! advection.
//!
//! # Limitations
//!
//! ⚠️ Dispersive: spurious oscillations appear next to discontinuities.
//! No flux limiter or entropy fix is applied, so shocks of nonlinear
//! problems show over- and undershoots.
//!
//! ⚠️ Second-order accuracy relies on `flux_derivative` being the true
//! derivative of `flux`.

use nalgebra::DVector;

use crate::physics::ConservationLaw;
use crate::solver::methods::map_cells;

/// Finite-difference update
///
/// `extended` is the ghost-extended state (length N + 2).
pub(crate) fn finite_difference(
    extended: &DVector<f64>,
    law: &dyn ConservationLaw,
    dt_dx: f64,
) -> DVector<f64> {
    let cells = extended.len() - 2;
    let flux = map_cells(extended.len(), |j| law.flux(extended[j]));

    // Wave speed at interface j, between e[j] and e[j + 1]
    let speed = map_cells(cells + 1, |j| {
        law.flux_derivative(0.5 * (extended[j] + extended[j + 1]))
    });

    let half_k = 0.5 * dt_dx;
    let half_k2 = 0.5 * dt_dx * dt_dx;

    map_cells(cells, |i| {
        let (left, center, right) = (i, i + 1, i + 2);

        let advection = half_k * (flux[right] - flux[left]);
        let correction = half_k2
            * (speed[i + 1] * (flux[right] - flux[center])
                - speed[i] * (flux[center] - flux[left]));

        extended[center] - advection + correction
    })
}

/// Two-stage finite-volume update, returning the new cells and the
/// N + 1 interface fluxes
pub(crate) fn finite_volume(
    extended: &DVector<f64>,
    law: &dyn ConservationLaw,
    dt_dx: f64,
) -> (DVector<f64>, DVector<f64>) {
    let cells = extended.len() - 2;
    let flux = map_cells(extended.len(), |j| law.flux(extended[j]));

    let interface_flux = map_cells(cells + 1, |j| {
        let half_step = 0.5 * (extended[j] + extended[j + 1]) - 0.5 * dt_dx * (flux[j + 1] - flux[j]);
        law.flux(half_step)
    });

    let state = map_cells(cells, |i| {
        extended[i + 1] - dt_dx * (interface_flux[i + 1] - interface_flux[i])
    });

    (state, interface_flux)
}

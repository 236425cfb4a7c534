//! Lax-Friedrichs schemes
//!
//! # Mathematical Background
//!
//! With `k = dt/dx`, `f_i = f(u_i^n)`:
//!
//! ```text
//! finite differences:  u_i^{n+1} = ½(u_{i-1} + u_{i+1}) − ½k (f_{i+1} − f_{i-1})
//!
//! finite volumes:      F_{i+½}   = ½(f_i + f_{i+1}) − (1/2k)(u_{i+1} − u_i)
//!                      u_i^{n+1} = u_i − k (F_{i+½} − F_{i−½})
//! ```
//!
//! Both forms are algebraically identical; the finite-volume one makes the
//! conservative structure explicit and exposes the interface fluxes.
//!
//! # Characteristics
//!
//! - **Order**: first order in space and time
//! - **Stability**: stable for CFL ≤ 1
//! - **Numerical viscosity**: `dx²/(2dt)·(1 − ν²)`, strongly diffusive;
//!   fronts smear but never oscillate
//!
//! # Array Layout
//!
//! Both kernels take the ghost-extended state `e` of length N + 2
//! (`e[i + 1] = u_i`) and return the N updated cells. Interface `j` lies
//! between `e[j]` and `e[j + 1]`, so `F[0] = F_{-½}` and `F[N] = F_{N-½}`.

use nalgebra::DVector;

use crate::physics::ConservationLaw;
use crate::solver::methods::map_cells;

/// Finite-difference update
pub(crate) fn finite_difference(
    extended: &DVector<f64>,
    law: &dyn ConservationLaw,
    dt_dx: f64,
) -> DVector<f64> {
    let cells = extended.len() - 2;
    let flux = map_cells(extended.len(), |j| law.flux(extended[j]));

    map_cells(cells, |i| {
        let (left, right) = (i, i + 2);
        0.5 * (extended[left] + extended[right]) - 0.5 * dt_dx * (flux[right] - flux[left])
    })
}

/// Finite-volume update, returning the new cells and the N + 1 interface fluxes
pub(crate) fn finite_volume(
    extended: &DVector<f64>,
    law: &dyn ConservationLaw,
    dt_dx: f64,
) -> (DVector<f64>, DVector<f64>) {
    let cells = extended.len() - 2;
    let flux = map_cells(extended.len(), |j| law.flux(extended[j]));

    // dx / (2 dt)
    let viscosity = 0.5 / dt_dx;
    let interface_flux = map_cells(cells + 1, |j| {
        0.5 * (flux[j] + flux[j + 1]) - viscosity * (extended[j + 1] - extended[j])
    });

    let state = map_cells(cells, |i| {
        extended[i + 1] - dt_dx * (interface_flux[i + 1] - interface_flux[i])
    });

    (state, interface_flux)
}

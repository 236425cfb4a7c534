//! conslaw-rs: Scalar Conservation Law Solvers
//!
//! Numerical solution of one-dimensional scalar hyperbolic conservation
//! laws
//!
//! ```text
//! ∂u/∂t + ∂f(u)/∂x = 0,    u(x, 0) = u0(x),    x ∈ [x_min, x_max]
//! ```
//!
//! with the Lax-Friedrichs and Lax-Wendroff schemes, each in a
//! finite-difference and a finite-volume form.
//!
//! # Architecture
//!
//! conslaw-rs is built on two core principles:
//!
//! 1. **Separation of Physics and Numerics**
//!    - Conservation laws define the equation (what to solve)
//!    - Schemes and the time stepper provide the method (how to solve)
//!
//! 2. **Explicit Configuration**
//!    - Every run parameter travels in an immutable `TimeStepConfig`
//!    - No global problem state: independent runs never interfere
//!
//! # Quick Start
//!
//! ```rust
//! use conslaw_rs::prelude::*;
//!
//! # fn main() -> Result<(), SolverError> {
//! // 1. Equation: linear advection of a square pulse
//! let pulse = Profile::Indicator(Interval::new(0.4, 0.6)?);
//! let law = FluxModel::linear(1.0, pulse.into_fn());
//!
//! // 2. Scenario and configuration
//! let scenario = Scenario::new(&law, Domain::new(0.0, 1.0, 100)?);
//! let config = TimeStepConfig::new(0.8, 0.5, 1e-3);
//!
//! // 3. Run every scheme on the same scenario
//! for scheme in Scheme::ALL {
//!     let record = scheme.solve(&scenario, &config)?;
//!     let last = record.last().unwrap();
//!     println!("{}: {} snapshots, t = {}", scheme, record.len(), last.time);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`physics`]: Conservation laws and initial conditions (equations)
//! - [`solver`]: Grid, CFL control, schemes and time stepping (methods)
//! - [`error`]: Error taxonomy
//!
//! # Features
//!
//! - `parallel`: evaluate per-cell updates on rayon's thread pool above
//!   [`solver::parallel_threshold()`] cells. Results are bit-identical to the
//!   sequential path.

// Core modules
pub mod error;
pub mod physics;
pub mod solver;

pub use error::SolverError;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use conslaw_rs::prelude::*;
    //! ```
    pub use crate::error::SolverError;
    pub use crate::physics::{ConservationLaw, FluxModel, Interval, Profile};
    pub use crate::solver::{
        BoundaryCondition,
        Domain,
        Grid,
        Scenario,
        Scheme,
        SimulationRecord,
        Solver,
        TimeStepConfig,
        TimeStepper,
    };
}

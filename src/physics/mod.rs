//! Physical models
//!
//! This module describes WHAT is solved: a scalar conservation law
//!
//! ```text
//! ∂t u + ∂x f(u) = 0,    u(0, x) = u0(x)
//! ```
//!
//! # Core Concepts
//!
//! - **Conservation law** ([`ConservationLaw`]): the flux f, its derivative
//!   f′ and the initial condition u0
//! - **Flux model** ([`FluxModel`]): a conservation law assembled from
//!   caller-supplied closures, with linear advection and Burgers presets
//! - **Profiles** ([`Profile`]): a catalogue of initial conditions
//! - **Intervals** ([`Interval`]): closed real intervals for domains and
//!   profile supports
//!
//! # Architecture
//!
//! Physics is **separate from numerics**: the law provides the equation,
//! a [`Scheme`](crate::solver::Scheme) provides the method. The same law
//! can be run through all four schemes for comparison.
//!
//! # Example
//!
//! ```rust
//! use conslaw_rs::physics::{ConservationLaw, FluxModel, Interval, Profile};
//!
//! let bump = Profile::Indicator(Interval::new(0.4, 0.6).unwrap());
//! let law = FluxModel::linear(1.0, bump.into_fn());
//!
//! assert_eq!(law.initial_condition(0.5), 1.0);
//! assert_eq!(law.exact_solution(0.5, 1.0), Some(1.0));
//! ```

pub mod flux;
pub mod interval;
pub mod profiles;
pub mod traits;

pub use flux::{BoxedFunction, FluxModel};
pub use interval::Interval;
pub use profiles::Profile;
pub use traits::ConservationLaw;

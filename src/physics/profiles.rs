//! Initial-condition profiles
//!
//! A small catalogue of the shapes commonly used to exercise transport
//! schemes: discontinuous ones (indicator, step) that reveal numerical
//! viscosity and spurious oscillations, piecewise-linear ones (saw tooth,
//! triangle) with kinks, and smooth ones (Gaussian, wavelet) for
//! order-of-accuracy studies.

use std::f64::consts::PI;

use crate::physics::Interval;

/// Initial condition u0(x)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Profile {
    /// 1 on the interval (inclusive), 0 elsewhere
    Indicator(Interval),

    /// `left` for x < `at`, `right` otherwise
    Step { left: f64, right: f64, at: f64 },

    /// Rises linearly from 0 at `start` to 1 at `end`, 0 outside
    SawTooth { start: f64, end: f64 },

    /// 0 at `start`, 1 at `peak`, back to 0 at `end`
    Triangle { start: f64, peak: f64, end: f64 },

    /// `exp(-((x - center) / width)²)`
    Gaussian { center: f64, width: f64 },

    /// `exp(-x²)·sin(πx)`
    Wavelet,

    /// Uniform value
    Constant(f64),
}

impl Profile {
    /// Evaluate the profile at `x`
    pub fn evaluate(&self, x: f64) -> f64 {
        match *self {
            Profile::Indicator(support) => {
                if support.contains(x) { 1.0 } else { 0.0 }
            }
            Profile::Step { left, right, at } => {
                if x < at { left } else { right }
            }
            Profile::SawTooth { start, end } => {
                if start <= x && x <= end && end > start {
                    (x - start) / (end - start)
                } else {
                    0.0
                }
            }
            Profile::Triangle { start, peak, end } => {
                if start <= x && x <= peak && peak > start {
                    (x - start) / (peak - start)
                } else if peak < x && x <= end {
                    (end - x) / (end - peak)
                } else {
                    0.0
                }
            }
            Profile::Gaussian { center, width } => {
                let z = (x - center) / width;
                (-z * z).exp()
            }
            Profile::Wavelet => (-x * x).exp() * (PI * x).sin(),
            Profile::Constant(value) => value,
        }
    }

    /// Short identifier
    pub fn name(&self) -> &'static str {
        match self {
            Profile::Indicator(_) => "indicator",
            Profile::Step { .. } => "step",
            Profile::SawTooth { .. } => "saw tooth",
            Profile::Triangle { .. } => "triangle",
            Profile::Gaussian { .. } => "gaussian",
            Profile::Wavelet => "wavelet",
            Profile::Constant(_) => "constant",
        }
    }

    /// Turn the profile into a closure usable as u0
    pub fn into_fn(self) -> impl Fn(f64) -> f64 + Send + Sync + 'static {
        move |x| self.evaluate(x)
    }
}

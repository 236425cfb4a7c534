//! Helper functions for integration tests

use std::f64::consts::TAU;

use conslaw_rs::solver::Grid;

/// Assert that two state vectors are close (within tolerance)
pub fn assert_states_close(actual: &[f64], expected: &[f64], tolerance: f64, message: &str) {
    assert_eq!(actual.len(), expected.len(), "{}: Dimension mismatch", message);

    for (i, (&v1, &v2)) in actual.iter().zip(expected.iter()).enumerate() {
        let diff = (v1 - v2).abs();
        assert!(
            diff < tolerance,
            "{}: Element {} differs by {} (tolerance {})",
            message, i, diff, tolerance
        );
    }
}

/// Discrete L2 error √(dx·Σ(u − v)²)
pub fn compute_l2_error(grid: &Grid, reference: &[f64]) -> f64 {
    let squared: f64 = grid
        .as_slice()
        .iter()
        .zip(reference.iter())
        .map(|(u, v)| (u - v).powi(2))
        .sum();

    (squared * grid.dx()).sqrt()
}

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}

/// Mass-weighted circular mean position of the grid, in [x_min, x_max)
///
/// On a periodic domain a pulse leaving on the right re-enters on the left,
/// so an arithmetic centroid is meaningless; positions are mapped to angles
/// on the unit circle instead.
pub fn circular_centroid(grid: &Grid) -> f64 {
    let interval = grid.domain().interval();
    let length = interval.length();

    let (sin, cos) = grid
        .as_slice()
        .iter()
        .zip(grid.cell_centers())
        .fold((0.0, 0.0), |(sin, cos), (&u, x)| {
            let angle = TAU * (x - interval.min()) / length;
            (sin + u * angle.sin(), cos + u * angle.cos())
        });

    let fraction = sin.atan2(cos).rem_euclid(TAU) / TAU;
    interval.wrap(interval.min() + fraction * length)
}

/// Distance between two positions on a periodic domain of given length
pub fn periodic_distance(a: f64, b: f64, length: f64) -> f64 {
    let d = (a - b).rem_euclid(length);
    d.min(length - d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_error() {
        assert!((relative_error(1.0, 1.0) - 0.0).abs() < 1e-10);
        assert!((relative_error(1.1, 1.0) - 0.1).abs() < 1e-10);
        assert!((relative_error(0.9, 1.0) - 0.1).abs() < 1e-10);
    }

    #[test]
    fn test_periodic_distance() {
        assert!((periodic_distance(0.95, 0.05, 1.0) - 0.1).abs() < 1e-12);
        assert!((periodic_distance(0.3, 0.5, 1.0) - 0.2).abs() < 1e-12);
    }
}

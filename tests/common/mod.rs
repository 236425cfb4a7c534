//! Common utilities for integration tests
#![allow(dead_code)]

pub mod mock_models;
pub mod test_helpers;

// Re-export commonly used items
pub use mock_models::{BrokenFlux, LinearTransport};
pub use test_helpers::{
    assert_states_close,
    circular_centroid,
    compute_l2_error,
    periodic_distance,
    relative_error,
};

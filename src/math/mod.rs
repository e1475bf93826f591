//! Linear algebra for the viewer.
//!
//! This module provides the vector and matrix types used to build camera and
//! projection transforms, as well as helper functions for angle conversions.
//! Matrices are stored column-major so their buffers can be handed to the GPU
//! as-is.
//!
//! # Module Organization
//!
//! - [`vec`] module contains the dynamically sized [`Vector`]
//! - [`mat`] module contains [`Matrix`], its products and the transform builders
//! - [`error`] module contains [`MathError`], returned by every shape-checked routine

pub mod error;
pub mod mat;
pub mod vec;

pub use error::{Axis, MathError};
pub use mat::Matrix;
pub use vec::Vector;

/// Converts degrees to radians.
///
/// # Example
/// ```
/// use cubegrid::math::deg_to_rad;
///
/// assert_eq!(deg_to_rad(180.0), std::f32::consts::PI);
/// ```
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}

/// Converts radians to degrees.
///
/// # Example
/// ```
/// use cubegrid::math::rad_to_deg;
///
/// assert_eq!(rad_to_deg(std::f32::consts::PI), 180.0);
/// ```
pub fn rad_to_deg(radians: f32) -> f32 {
    radians * 180.0 / std::f32::consts::PI
}

#[cfg(test)]
pub(crate) fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() <= 1e-5,
        "expected {expected}, got {actual}"
    );
}

//! Failure kinds shared by the vector and matrix routines.

use thiserror::Error;

/// Why a vector or matrix operation could not produce a result.
///
/// Every shape-checked routine in [`crate::math`] returns one of these instead
/// of a value. None of them are transient: retrying with the same inputs fails
/// the same way.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    /// Two vectors of different lengths were combined.
    #[error("vector size mismatch: {left} vs {right}")]
    SizeMismatch { left: usize, right: usize },

    /// A 3-vector was required (cross product, look-at basis).
    #[error("expected a 3-component vector, got {size}")]
    NotThreeDimensional { size: usize },

    /// Matrix product with incompatible inner dimensions.
    #[error("cannot multiply: left has {left_cols} columns, right has {right_rows} rows")]
    DimensionMismatch { left_cols: usize, right_rows: usize },

    /// Orthographic volume with zero extent along an axis.
    #[error("projection volume has zero extent along {axis}")]
    DegenerateVolume { axis: Axis },

    /// The view has NaN or infinite entries, e.g. `up` parallel to the view
    /// direction.
    #[error("view matrix is not finite; up is parallel to the view direction")]
    NonFiniteView,

    /// A 4x4 matrix was required for GPU upload.
    #[error("expected a 4x4 matrix, got {rows}x{cols}")]
    NotFourByFour { rows: usize, cols: usize },
}

/// Axis named in [`MathError::DegenerateVolume`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Axis::X => "x (left == right)",
            Axis::Y => "y (bottom == top)",
            Axis::Z => "z (near == far)",
        };
        f.write_str(name)
    }
}

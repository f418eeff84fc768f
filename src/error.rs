//! Error types for grid construction and input validation.
//!
//! The time-stepping kernel itself never returns an error; these are
//! produced by the fallible constructors and by
//! [`Step3dInputs::validate`](crate::step3d::Step3dInputs::validate),
//! which callers run once when a grid is loaded.

use thiserror::Error;

/// Errors raised while building fields or checking kernel inputs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Step3dError {
    /// A field does not have the shape the grid extents require.
    #[error("Shape mismatch for {field}: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        field: &'static str,
        expected: (usize, usize, usize),
        actual: (usize, usize, usize),
    },

    /// A layer has zero or negative thickness.
    #[error("Degenerate layer at ({i}, {j}, {k}): thickness {thickness}")]
    DegenerateLayer {
        i: usize,
        j: usize,
        k: usize,
        thickness: f64,
    },

    /// Vertical diffusivity is negative.
    #[error("Negative diffusivity at ({i}, {j}, {k}): {value}")]
    NegativeDiffusivity {
        i: usize,
        j: usize,
        k: usize,
        value: f64,
    },

    /// The uniform background diffusivity is negative.
    #[error("Negative background diffusivity: {0}")]
    NegativeBackgroundDiffusivity(f64),

    /// A map factor (pm or pn) is zero or negative.
    #[error("Non-positive metric {field} at ({i}, {j}): {value}")]
    NonPositiveMetric {
        field: &'static str,
        i: usize,
        j: usize,
        value: f64,
    },

    /// The land-sea mask holds a value other than 0 or 1.
    #[error("Mask value at ({i}, {j}) must be 0 or 1, got {value}")]
    InvalidMask { i: usize, j: usize, value: f64 },

    /// Grid extents cannot hold any interior cell.
    #[error("Invalid extents: {0}")]
    InvalidExtents(String),

    /// The timestep is zero, negative or not finite.
    #[error("Timestep must be positive and finite, got {0}")]
    NonPositiveTimestep(f64),
}

impl Step3dError {
    /// Create a shape mismatch error.
    pub fn shape_mismatch(
        field: &'static str,
        expected: (usize, usize, usize),
        actual: (usize, usize, usize),
    ) -> Self {
        Self::ShapeMismatch {
            field,
            expected,
            actual,
        }
    }
}

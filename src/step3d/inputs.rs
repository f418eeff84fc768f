//! Kernel inputs and their (optional) validation.

use crate::error::Step3dError;
use crate::grid::{Field2D, Field3D};
use crate::types::GridExtents;

/// Background vertical diffusivity (m²/s) used when no `Akt` field is
/// available for a record.
pub const DEFAULT_AKT_BACKGROUND: f64 = 1.0e-5;

/// Vertical eddy diffusivity at w-points.
#[derive(Clone, Copy, Debug)]
pub enum Diffusivity<'a> {
    /// Full `(L+1, M+1, N+1)` field, typically from a turbulence closure.
    Field(&'a Field3D),
    /// Spatially uniform background value.
    Background(f64),
}

impl Default for Diffusivity<'_> {
    fn default() -> Self {
        Diffusivity::Background(DEFAULT_AKT_BACKGROUND)
    }
}

impl<'a> Diffusivity<'a> {
    /// Diffusivity column at `(i, j)`.
    ///
    /// For [`Diffusivity::Background`] the caller supplies a column already
    /// filled with the background value (see [`Diffusivity::uniform_column`]).
    #[inline]
    pub fn column<'s>(&'s self, i: usize, j: usize, uniform: &'s [f64]) -> &'s [f64] {
        match *self {
            Diffusivity::Field(f) => f.column(i, j),
            Diffusivity::Background(_) => uniform,
        }
    }

    /// Column buffer for the background case; empty for a full field.
    pub fn uniform_column(&self, n_interfaces: usize) -> Vec<f64> {
        match *self {
            Diffusivity::Field(_) => Vec::new(),
            Diffusivity::Background(value) => vec![value; n_interfaces],
        }
    }
}

/// Everything the kernel reads for one tracer step.
///
/// All horizontal fields are `(L+1) × (M+1)`. Staggered velocities use the
/// same shape: `u[(i, j, k)]` is the face between rho cells `(i-1, j)` and
/// `(i, j)`, `v[(i, j, k)]` the face between `(i, j-1)` and `(i, j)`.
/// None of the inputs is modified.
#[derive(Clone, Copy, Debug)]
pub struct Step3dInputs<'a> {
    /// Grid extents (L, M, N).
    pub extents: GridExtents,
    /// Land-sea mask at rho-points, 0 = land.
    pub rmask: &'a Field2D,
    /// Inverse grid spacing in ξ.
    pub pm: &'a Field2D,
    /// Inverse grid spacing in η.
    pub pn: &'a Field2D,
    /// Interface depths, N + 1 per column, increasing upward.
    pub z_w: &'a Field3D,
    /// Vertical eddy diffusivity.
    pub akt: Diffusivity<'a>,
    /// ξ-velocity at U-points, N per column.
    pub u: &'a Field3D,
    /// η-velocity at V-points, N per column.
    pub v: &'a Field3D,
    /// Tracer at the old time level, N per column.
    pub told: &'a Field3D,
}

impl<'a> Step3dInputs<'a> {
    /// Check every precondition the kernel relies on.
    ///
    /// The kernel never calls this. Run it once when a grid or a forcing
    /// record is loaded; the time-stepping loop then stays check-free.
    pub fn validate(&self) -> Result<(), Step3dError> {
        let ext = &self.extents;
        let shape_2d = (ext.nx(), ext.ny(), 1);

        check_shape("rmask", shape_2d, self.rmask.shape())?;
        check_shape("pm", shape_2d, self.pm.shape())?;
        check_shape("pn", shape_2d, self.pn.shape())?;
        check_shape("z_w", ext.w_shape(), self.z_w.shape())?;
        check_shape("u", ext.rho_shape(), self.u.shape())?;
        check_shape("v", ext.rho_shape(), self.v.shape())?;
        check_shape("told", ext.rho_shape(), self.told.shape())?;
        if let Diffusivity::Field(akt) = self.akt {
            check_shape("akt", ext.w_shape(), akt.shape())?;
        }

        for j in 0..ext.ny() {
            for i in 0..ext.nx() {
                let mask = self.rmask[(i, j)];
                if mask != 0.0 && mask != 1.0 {
                    return Err(Step3dError::InvalidMask { i, j, value: mask });
                }
                check_metric("pm", i, j, self.pm[(i, j)])?;
                check_metric("pn", i, j, self.pn[(i, j)])?;

                let z_w = self.z_w.column(i, j);
                for (k, pair) in z_w.windows(2).enumerate() {
                    let thickness = pair[1] - pair[0];
                    if !(thickness > 0.0) {
                        return Err(Step3dError::DegenerateLayer { i, j, k, thickness });
                    }
                }
            }
        }

        match self.akt {
            Diffusivity::Field(akt) => {
                for j in 0..ext.ny() {
                    for i in 0..ext.nx() {
                        for (k, &value) in akt.column(i, j).iter().enumerate() {
                            if !(value >= 0.0) {
                                return Err(Step3dError::NegativeDiffusivity { i, j, k, value });
                            }
                        }
                    }
                }
            }
            Diffusivity::Background(value) => {
                if !(value >= 0.0) {
                    return Err(Step3dError::NegativeBackgroundDiffusivity(value));
                }
            }
        }

        Ok(())
    }
}

fn check_shape(
    field: &'static str,
    expected: (usize, usize, usize),
    actual: (usize, usize, usize),
) -> Result<(), Step3dError> {
    if expected == actual {
        Ok(())
    } else {
        Err(Step3dError::shape_mismatch(field, expected, actual))
    }
}

fn check_metric(field: &'static str, i: usize, j: usize, value: f64) -> Result<(), Step3dError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(Step3dError::NonPositiveMetric { field, i, j, value })
    }
}

//! Dense field storage for structured ocean grids.
//!
//! Both field types use a single contiguous `Vec<f64>`:
//!
//! - [`Field2D`]: ξ fastest, `data[j * nx + i]`
//! - [`Field3D`]: vertical fastest, `data[(j * nx + i) * nz + k]`
//!
//! Keeping each water column contiguous lets the column stages (vertical
//! advection, implicit diffusion) work on plain slices and lets the
//! parallel path split a field into disjoint `&mut [f64]` columns.

use std::ops::{Index, IndexMut};

use crate::error::Step3dError;
use crate::types::GridExtents;

// =============================================================================
// Field2D
// =============================================================================

/// A horizontal field on the rho-point grid (mask, pm, pn, bathymetry).
#[derive(Clone, Debug, PartialEq)]
pub struct Field2D {
    nx: usize,
    ny: usize,
    data: Vec<f64>,
}

impl Field2D {
    /// Create a field filled with zeros.
    pub fn zeros(nx: usize, ny: usize) -> Self {
        Self::filled(nx, ny, 0.0)
    }

    /// Create a field filled with a constant.
    pub fn filled(nx: usize, ny: usize, value: f64) -> Self {
        Self {
            nx,
            ny,
            data: vec![value; nx * ny],
        }
    }

    /// Create a rho-shaped field for the given extents.
    pub fn for_extents(ext: &GridExtents, value: f64) -> Self {
        Self::filled(ext.nx(), ext.ny(), value)
    }

    /// Create a field by evaluating `f(i, j)` at every point.
    pub fn from_fn(nx: usize, ny: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(nx * ny);
        for j in 0..ny {
            for i in 0..nx {
                data.push(f(i, j));
            }
        }
        Self { nx, ny, data }
    }

    /// Wrap existing data (ξ fastest).
    pub fn from_vec(nx: usize, ny: usize, data: Vec<f64>) -> Result<Self, Step3dError> {
        if data.len() != nx * ny {
            return Err(Step3dError::shape_mismatch(
                "Field2D",
                (nx, ny, 1),
                (data.len(), 1, 1),
            ));
        }
        Ok(Self { nx, ny, data })
    }

    /// Width in ξ.
    #[inline]
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Height in η.
    #[inline]
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Shape as `(nx, ny, 1)`, comparable with [`Field3D::shape`].
    #[inline]
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.nx, self.ny, 1)
    }

    /// Raw data slice.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Mutable raw data slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Set every point to `value`.
    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }
}

impl Index<(usize, usize)> for Field2D {
    type Output = f64;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        debug_assert!(i < self.nx && j < self.ny, "Field2D index ({}, {}) out of range", i, j);
        &self.data[j * self.nx + i]
    }
}

impl IndexMut<(usize, usize)> for Field2D {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        debug_assert!(i < self.nx && j < self.ny, "Field2D index ({}, {}) out of range", i, j);
        &mut self.data[j * self.nx + i]
    }
}

// =============================================================================
// Field3D
// =============================================================================

/// A 3D field with contiguous water columns.
///
/// `nz` is `N` for layer quantities (tracer, u, v, Hz) and `N + 1` for
/// interface quantities (z_w, Akt, W).
#[derive(Clone, Debug, PartialEq)]
pub struct Field3D {
    nx: usize,
    ny: usize,
    nz: usize,
    data: Vec<f64>,
}

impl Field3D {
    /// Create a field filled with zeros.
    pub fn zeros(nx: usize, ny: usize, nz: usize) -> Self {
        Self::filled(nx, ny, nz, 0.0)
    }

    /// Create a field filled with a constant.
    pub fn filled(nx: usize, ny: usize, nz: usize, value: f64) -> Self {
        Self {
            nx,
            ny,
            nz,
            data: vec![value; nx * ny * nz],
        }
    }

    /// Layer-centred field `(L+1, M+1, N)` for the given extents.
    pub fn rho(ext: &GridExtents, value: f64) -> Self {
        let (nx, ny, nz) = ext.rho_shape();
        Self::filled(nx, ny, nz, value)
    }

    /// Interface field `(L+1, M+1, N+1)` for the given extents.
    pub fn w(ext: &GridExtents, value: f64) -> Self {
        let (nx, ny, nz) = ext.w_shape();
        Self::filled(nx, ny, nz, value)
    }

    /// Create a field by evaluating `f(i, j, k)` at every point.
    pub fn from_fn(
        nx: usize,
        ny: usize,
        nz: usize,
        mut f: impl FnMut(usize, usize, usize) -> f64,
    ) -> Self {
        let mut data = Vec::with_capacity(nx * ny * nz);
        for j in 0..ny {
            for i in 0..nx {
                for k in 0..nz {
                    data.push(f(i, j, k));
                }
            }
        }
        Self { nx, ny, nz, data }
    }

    /// Wrap existing column-contiguous data.
    pub fn from_vec(nx: usize, ny: usize, nz: usize, data: Vec<f64>) -> Result<Self, Step3dError> {
        if data.len() != nx * ny * nz {
            return Err(Step3dError::shape_mismatch(
                "Field3D",
                (nx, ny, nz),
                (data.len(), 1, 1),
            ));
        }
        Ok(Self { nx, ny, nz, data })
    }

    /// Width in ξ.
    #[inline]
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Height in η.
    #[inline]
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Number of vertical entries per column.
    #[inline]
    pub fn nz(&self) -> usize {
        self.nz
    }

    /// Shape as `(nx, ny, nz)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.nx, self.ny, self.nz)
    }

    /// Raw data slice.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Mutable raw data slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Water column at `(i, j)`.
    #[inline]
    pub fn column(&self, i: usize, j: usize) -> &[f64] {
        let start = (j * self.nx + i) * self.nz;
        &self.data[start..start + self.nz]
    }

    /// Mutable water column at `(i, j)`.
    #[inline]
    pub fn column_mut(&mut self, i: usize, j: usize) -> &mut [f64] {
        let start = (j * self.nx + i) * self.nz;
        &mut self.data[start..start + self.nz]
    }

    /// Set every point to `value`.
    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// Maximum absolute difference to another field of the same shape.
    pub fn max_abs_diff(&self, other: &Field3D) -> f64 {
        debug_assert_eq!(self.shape(), other.shape());
        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }
}

impl Index<(usize, usize, usize)> for Field3D {
    type Output = f64;

    #[inline]
    fn index(&self, (i, j, k): (usize, usize, usize)) -> &f64 {
        debug_assert!(
            i < self.nx && j < self.ny && k < self.nz,
            "Field3D index ({}, {}, {}) out of range",
            i,
            j,
            k
        );
        &self.data[(j * self.nx + i) * self.nz + k]
    }
}

impl IndexMut<(usize, usize, usize)> for Field3D {
    #[inline]
    fn index_mut(&mut self, (i, j, k): (usize, usize, usize)) -> &mut f64 {
        debug_assert!(
            i < self.nx && j < self.ny && k < self.nz,
            "Field3D index ({}, {}, {}) out of range",
            i,
            j,
            k
        );
        &mut self.data[(j * self.nx + i) * self.nz + k]
    }
}

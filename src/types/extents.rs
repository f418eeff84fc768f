//! Structured grid extents.

use std::fmt;
use std::ops::Range;

use crate::error::Step3dError;

/// Extents of a staggered (Arakawa-C) ocean grid.
///
/// Follows the ROMS naming: the rho-point arrays span `0..=L` in the
/// ξ-direction and `0..=M` in the η-direction, with `N` vertical layers.
/// Only the interior cells `1..L` × `1..M` are updated by the kernel; the
/// outer ring holds boundary values owned by the caller.
///
/// # Example
///
/// ```
/// use step3d_rs::types::GridExtents;
///
/// let ext = GridExtents::new(4, 4, 2);
/// assert_eq!(ext.nx(), 5);
/// assert_eq!(ext.ny(), 5);
/// assert_eq!(ext.xi_interior(), 1..4);
/// assert_eq!(ext.n_interior_columns(), 9);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridExtents {
    /// Last rho index in the ξ-direction (L)
    l: usize,
    /// Last rho index in the η-direction (M)
    m: usize,
    /// Number of vertical layers (N)
    n: usize,
}

impl GridExtents {
    /// Create new grid extents.
    ///
    /// # Arguments
    ///
    /// * `l` - Last rho index in ξ (array width is `l + 1`)
    /// * `m` - Last rho index in η (array height is `m + 1`)
    /// * `n` - Number of vertical layers
    ///
    /// # Panics
    ///
    /// Panics if the grid has no interior cell (`l < 2` or `m < 2`) or
    /// no layer (`n == 0`).
    pub fn new(l: usize, m: usize, n: usize) -> Self {
        match Self::try_new(l, m, n) {
            Ok(ext) => ext,
            Err(e) => panic!("{}", e),
        }
    }

    /// Fallible version of [`GridExtents::new`].
    pub fn try_new(l: usize, m: usize, n: usize) -> Result<Self, Step3dError> {
        if l < 2 || m < 2 {
            return Err(Step3dError::InvalidExtents(format!(
                "L and M must be at least 2 to hold an interior cell, got L={}, M={}",
                l, m
            )));
        }
        if n == 0 {
            return Err(Step3dError::InvalidExtents(
                "N must be at least 1".to_string(),
            ));
        }
        Ok(Self { l, m, n })
    }

    /// Extents whose interior is `nx_int × ny_int` cells.
    pub fn with_interior(nx_int: usize, ny_int: usize, n: usize) -> Self {
        Self::new(nx_int + 1, ny_int + 1, n)
    }

    /// Last rho index in ξ.
    #[inline]
    pub fn l(&self) -> usize {
        self.l
    }

    /// Last rho index in η.
    #[inline]
    pub fn m(&self) -> usize {
        self.m
    }

    /// Number of vertical layers.
    #[inline]
    pub fn n_levels(&self) -> usize {
        self.n
    }

    /// Number of vertical interfaces (w-points), `N + 1`.
    #[inline]
    pub fn n_interfaces(&self) -> usize {
        self.n + 1
    }

    /// Array width in ξ, `L + 1`.
    #[inline]
    pub fn nx(&self) -> usize {
        self.l + 1
    }

    /// Array height in η, `M + 1`.
    #[inline]
    pub fn ny(&self) -> usize {
        self.m + 1
    }

    /// Number of horizontal points (columns) including the outer ring.
    #[inline]
    pub fn n_columns(&self) -> usize {
        self.nx() * self.ny()
    }

    /// Number of interior columns, `(L - 1) × (M - 1)`.
    #[inline]
    pub fn n_interior_columns(&self) -> usize {
        (self.l - 1) * (self.m - 1)
    }

    /// Interior ξ indices, `1..L`.
    #[inline]
    pub fn xi_interior(&self) -> Range<usize> {
        1..self.l
    }

    /// Interior η indices, `1..M`.
    #[inline]
    pub fn eta_interior(&self) -> Range<usize> {
        1..self.m
    }

    /// Whether `(i, j)` is an interior column.
    #[inline]
    pub fn is_interior(&self, i: usize, j: usize) -> bool {
        i >= 1 && i < self.l && j >= 1 && j < self.m
    }

    /// Flat index of column `(i, j)` (ξ fastest).
    #[inline]
    pub fn column_index(&self, i: usize, j: usize) -> usize {
        j * self.nx() + i
    }

    /// Inverse of [`GridExtents::column_index`].
    #[inline]
    pub fn column_coords(&self, index: usize) -> (usize, usize) {
        (index % self.nx(), index / self.nx())
    }

    /// Shape of a layer-centred 3D field `(L+1, M+1, N)`.
    #[inline]
    pub fn rho_shape(&self) -> (usize, usize, usize) {
        (self.nx(), self.ny(), self.n)
    }

    /// Shape of an interface 3D field `(L+1, M+1, N+1)`.
    #[inline]
    pub fn w_shape(&self) -> (usize, usize, usize) {
        (self.nx(), self.ny(), self.n + 1)
    }
}

impl fmt::Display for GridExtents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L={}, M={}, N={}", self.l, self.m, self.n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extents_shapes() {
        let ext = GridExtents::new(6, 4, 3);
        assert_eq!(ext.nx(), 7);
        assert_eq!(ext.ny(), 5);
        assert_eq!(ext.rho_shape(), (7, 5, 3));
        assert_eq!(ext.w_shape(), (7, 5, 4));
        assert_eq!(ext.n_columns(), 35);
        assert_eq!(ext.n_interior_columns(), 15);
    }

    #[test]
    fn test_interior_ranges() {
        let ext = GridExtents::with_interior(3, 2, 1);
        assert_eq!(ext.xi_interior(), 1..4);
        assert_eq!(ext.eta_interior(), 1..3);
        assert!(ext.is_interior(1, 1));
        assert!(ext.is_interior(3, 2));
        assert!(!ext.is_interior(0, 1));
        assert!(!ext.is_interior(4, 1));
        assert!(!ext.is_interior(1, 3));
    }

    #[test]
    fn test_column_index_roundtrip() {
        let ext = GridExtents::new(5, 3, 2);
        for j in 0..ext.ny() {
            for i in 0..ext.nx() {
                let idx = ext.column_index(i, j);
                assert_eq!(ext.column_coords(idx), (i, j));
            }
        }
    }

    #[test]
    fn test_try_new_rejects_degenerate() {
        assert!(GridExtents::try_new(1, 4, 2).is_err());
        assert!(GridExtents::try_new(4, 1, 2).is_err());
        assert!(GridExtents::try_new(4, 4, 0).is_err());
        assert!(GridExtents::try_new(2, 2, 1).is_ok());
    }

    #[test]
    #[should_panic]
    fn test_new_panics_without_interior() {
        let _ = GridExtents::new(1, 1, 1);
    }

    #[test]
    fn test_display() {
        let ext = GridExtents::new(10, 20, 30);
        assert_eq!(format!("{}", ext), "L=10, M=20, N=30");
    }
}

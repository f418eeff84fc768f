//! S-coordinate grid: interface and layer-centre depths.
//!
//! ```text
//! s_w(k) = -1 + k/N                   k = 0..=N
//! s_r(k) = ½(s_w(k) + s_w(k+1))       k = 0..N
//! z0     = (s - Cs(s))·hc + Cs(s)·h
//! z      = z0 + ζ·(1 + z0/h)
//! ```
//!
//! `z(-1) = -h` and `z(0) = ζ` for every stretching function, so the
//! interface depths span the full water column. The interface depths are
//! the `z_w` input of the tracer kernel.

use super::stretching::Stretching;
use crate::grid::{Field2D, Field3D};

/// Terrain-following s-coordinate with N levels.
#[derive(Clone, Debug)]
pub struct SCoordinate {
    n_levels: usize,
    hc: f64,
    s_w: Vec<f64>,
    cs_w: Vec<f64>,
    s_rho: Vec<f64>,
    cs_rho: Vec<f64>,
    stretching_description: String,
}

impl SCoordinate {
    /// Create an s-coordinate with `n_levels` layers and critical depth `hc`.
    pub fn new(n_levels: usize, hc: f64, stretching: impl Stretching) -> Self {
        debug_assert!(n_levels > 0);
        let n = n_levels as f64;
        let s_w: Vec<f64> = (0..=n_levels).map(|k| -1.0 + k as f64 / n).collect();
        let s_rho: Vec<f64> = s_w.windows(2).map(|p| 0.5 * (p[0] + p[1])).collect();
        let cs_w = s_w.iter().map(|&s| stretching.cs(s)).collect();
        let cs_rho = s_rho.iter().map(|&s| stretching.cs(s)).collect();

        Self {
            n_levels,
            hc,
            s_w,
            cs_w,
            s_rho,
            cs_rho,
            stretching_description: stretching.description(),
        }
    }

    /// Plain sigma levels.
    #[inline]
    pub fn uniform(n_levels: usize) -> Self {
        Self::new(n_levels, 0.0, super::stretching::UniformStretching)
    }

    #[inline]
    pub fn n_levels(&self) -> usize {
        self.n_levels
    }

    /// Critical depth (m).
    #[inline]
    pub fn hc(&self) -> f64 {
        self.hc
    }

    #[inline]
    pub fn s_w(&self) -> &[f64] {
        &self.s_w
    }

    #[inline]
    pub fn s_rho(&self) -> &[f64] {
        &self.s_rho
    }

    #[inline]
    pub fn cs_w(&self) -> &[f64] {
        &self.cs_w
    }

    #[inline]
    pub fn cs_rho(&self) -> &[f64] {
        &self.cs_rho
    }

    #[inline]
    pub fn stretching_description(&self) -> &str {
        &self.stretching_description
    }

    /// Depth of the level with coordinates `(s, cs)` in a column of depth
    /// `h` (positive) under surface elevation `zeta`.
    #[inline]
    pub fn depth(&self, s: f64, cs: f64, h: f64, zeta: f64) -> f64 {
        let z0 = (s - cs) * self.hc + cs * h;
        z0 + zeta * (1.0 + z0 / h)
    }

    /// Interface depths of one column, bed first.
    ///
    /// `out` must hold N + 1 entries.
    pub fn interface_depths_into(&self, h: f64, zeta: f64, out: &mut [f64]) {
        debug_assert_eq!(out.len(), self.n_levels + 1);
        for ((z, &s), &cs) in out.iter_mut().zip(&self.s_w).zip(&self.cs_w) {
            *z = self.depth(s, cs, h, zeta);
        }
    }

    /// Layer-centre depths of one column, bed first.
    ///
    /// `out` must hold N entries.
    pub fn rho_depths_into(&self, h: f64, zeta: f64, out: &mut [f64]) {
        debug_assert_eq!(out.len(), self.n_levels);
        for ((z, &s), &cs) in out.iter_mut().zip(&self.s_rho).zip(&self.cs_rho) {
            *z = self.depth(s, cs, h, zeta);
        }
    }

    /// Interface depths `z_w` over a grid, N + 1 per column.
    ///
    /// `zeta = None` means a flat free surface.
    pub fn interface_depths(&self, h: &Field2D, zeta: Option<&Field2D>) -> Field3D {
        let mut z_w = Field3D::zeros(h.nx(), h.ny(), self.n_levels + 1);
        for j in 0..h.ny() {
            for i in 0..h.nx() {
                let eta = zeta.map_or(0.0, |z| z[(i, j)]);
                self.interface_depths_into(h[(i, j)], eta, z_w.column_mut(i, j));
            }
        }
        z_w
    }

    /// Layer-centre depths `z_r` over a grid, N per column.
    pub fn rho_depths(&self, h: &Field2D, zeta: Option<&Field2D>) -> Field3D {
        let mut z_r = Field3D::zeros(h.nx(), h.ny(), self.n_levels);
        for j in 0..h.ny() {
            for i in 0..h.nx() {
                let eta = zeta.map_or(0.0, |z| z[(i, j)]);
                self.rho_depths_into(h[(i, j)], eta, z_r.column_mut(i, j));
            }
        }
        z_r
    }
}

// =============================================================================
// Display
// =============================================================================

impl std::fmt::Display for SCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SCoordinate({} levels, hc={} m, {})",
            self.n_levels, self.hc, self.stretching_description
        )
    }
}

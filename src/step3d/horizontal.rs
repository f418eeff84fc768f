//! Horizontal advection with the third-order upstream-biased flux.
//!
//! Each layer is handled independently. In ξ (η is symmetric):
//!
//! ```text
//! grad(i)  = (t(i) - t(i-1)) · umask(i)                 faces 1..=L
//! curv(i)  = grad(i+1) - grad(i)                        cells 1..L
//! curv(0)  = curv(L) = 0
//! FX(i)    = ½(t(i-1) + t(i)) · Huon(i)
//!            - γ · (curv(i-1) · max(Huon(i), 0) + curv(i) · min(Huon(i), 0))
//! ```
//!
//! with γ = [`CURVATURE_WEIGHT`]. The tendency of an interior cell is
//! `dt · pm·pn · (FX(i+1) - FX(i) + FE(j+1) - FE(j))`, subtracted from the
//! working field. Gradients are masked, and `Huon`/`Hvom` are already zero
//! on land faces, so no flux crosses a coastline.

use super::config::CURVATURE_WEIGHT;
use super::mass_flux::MassFluxes;
use crate::grid::{Field3D, GridMetrics};
use crate::types::GridExtents;

/// Per-layer scratch planes, `(L+1) × (M+1)` each.
///
/// One instance per worker; never shared between concurrently running
/// layers.
#[derive(Clone, Debug)]
pub struct HorizontalScratch {
    nx: usize,
    grad: Vec<f64>,
    curv_xi: Vec<f64>,
    curv_eta: Vec<f64>,
    flux_xi: Vec<f64>,
    flux_eta: Vec<f64>,
}

impl HorizontalScratch {
    /// Allocate scratch planes for the given extents.
    pub fn new(ext: &GridExtents) -> Self {
        let plane = ext.n_columns();
        Self {
            nx: ext.nx(),
            grad: vec![0.0; plane],
            curv_xi: vec![0.0; plane],
            curv_eta: vec![0.0; plane],
            flux_xi: vec![0.0; plane],
            flux_eta: vec![0.0; plane],
        }
    }

    /// Tracer flux through the U-face `(i, j)` from the last computed layer.
    #[inline]
    pub fn flux_xi(&self, i: usize, j: usize) -> f64 {
        self.flux_xi[j * self.nx + i]
    }

    /// Tracer flux through the V-face `(i, j)` from the last computed layer.
    #[inline]
    pub fn flux_eta(&self, i: usize, j: usize) -> f64 {
        self.flux_eta[j * self.nx + i]
    }
}

/// Upstream-biased face flux.
///
/// `curv_up` is the curvature of the cell on the negative side of the face,
/// `curv_down` the one on the positive side.
#[inline]
pub fn upstream_face_flux(t_up: f64, t_down: f64, curv_up: f64, curv_down: f64, mass_flux: f64) -> f64 {
    0.5 * (t_up + t_down) * mass_flux
        - CURVATURE_WEIGHT * (curv_up * mass_flux.max(0.0) + curv_down * mass_flux.min(0.0))
}

/// Compute ξ- and η-face tracer fluxes of layer `k` into `scratch`.
pub fn horizontal_fluxes_layer(
    metrics: &GridMetrics,
    fluxes: &MassFluxes,
    told: &Field3D,
    k: usize,
    scratch: &mut HorizontalScratch,
) {
    let ext = &metrics.extents;
    let (l, m, nx) = (ext.l(), ext.m(), ext.nx());
    let HorizontalScratch {
        grad,
        curv_xi,
        curv_eta,
        flux_xi,
        flux_eta,
        ..
    } = scratch;

    // ξ-direction, interior rows
    for j in ext.eta_interior() {
        let row = j * nx;
        for i in 1..=l {
            grad[row + i] = (told[(i, j, k)] - told[(i - 1, j, k)]) * metrics.umask[(i, j)];
        }
        for i in 1..l {
            curv_xi[row + i] = grad[row + i + 1] - grad[row + i];
        }
        curv_xi[row] = 0.0;
        curv_xi[row + l] = 0.0;
        for i in 1..=l {
            flux_xi[row + i] = upstream_face_flux(
                told[(i - 1, j, k)],
                told[(i, j, k)],
                curv_xi[row + i - 1],
                curv_xi[row + i],
                fluxes.huon[(i, j, k)],
            );
        }
    }

    // η-direction, interior columns
    for i in ext.xi_interior() {
        for j in 1..=m {
            grad[j * nx + i] = (told[(i, j, k)] - told[(i, j - 1, k)]) * metrics.vmask[(i, j)];
        }
        for j in 1..m {
            curv_eta[j * nx + i] = grad[(j + 1) * nx + i] - grad[j * nx + i];
        }
        curv_eta[i] = 0.0;
        curv_eta[m * nx + i] = 0.0;
        for j in 1..=m {
            flux_eta[j * nx + i] = upstream_face_flux(
                told[(i, j - 1, k)],
                told[(i, j, k)],
                curv_eta[(j - 1) * nx + i],
                curv_eta[j * nx + i],
                fluxes.hvom[(i, j, k)],
            );
        }
    }
}

/// Horizontal advective tendency of layer `k`.
///
/// Writes `dt · pm·pn · (flux divergence)` for every interior column into
/// `tendency` (one plane, ξ fastest). Non-interior entries are untouched.
pub fn horizontal_tendency_layer(
    dt: f64,
    metrics: &GridMetrics,
    fluxes: &MassFluxes,
    told: &Field3D,
    k: usize,
    scratch: &mut HorizontalScratch,
    tendency: &mut [f64],
) {
    let ext = &metrics.extents;
    let nx = ext.nx();
    debug_assert!(tendency.len() >= ext.n_columns());

    horizontal_fluxes_layer(metrics, fluxes, told, k, scratch);

    for j in ext.eta_interior() {
        for i in ext.xi_interior() {
            let c = j * nx + i;
            let divergence = scratch.flux_xi[c + 1] - scratch.flux_xi[c]
                + scratch.flux_eta[c + nx]
                - scratch.flux_eta[c];
            tendency[c] = dt * metrics.pmn[(i, j)] * divergence;
        }
    }
}

/// Subtract the horizontal advective tendency of every layer from `tnew`.
///
/// `tnew` is expected to hold a copy of `told` (or an already-advanced
/// working state); only interior cells change.
pub fn apply_horizontal_advection(
    dt: f64,
    metrics: &GridMetrics,
    fluxes: &MassFluxes,
    told: &Field3D,
    tnew: &mut Field3D,
) {
    let ext = &metrics.extents;
    let mut scratch = HorizontalScratch::new(ext);
    let mut tendency = vec![0.0; ext.n_columns()];

    for k in 0..ext.n_levels() {
        horizontal_tendency_layer(dt, metrics, fluxes, told, k, &mut scratch, &mut tendency);
        for j in ext.eta_interior() {
            for i in ext.xi_interior() {
                tnew[(i, j, k)] -= tendency[ext.column_index(i, j)];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Field2D;
    use approx::assert_relative_eq;

    const TOL: f64 = 1e-12;

    struct Setup {
        ext: GridExtents,
        metrics: GridMetrics,
    }

    fn setup(l: usize, m: usize, n: usize, rmask: Option<Field2D>) -> Setup {
        let ext = GridExtents::new(l, m, n);
        let (nx, ny, nw) = ext.w_shape();
        let rmask = rmask.unwrap_or_else(|| Field2D::for_extents(&ext, 1.0));
        let pm = Field2D::for_extents(&ext, 1.0);
        let pn = Field2D::for_extents(&ext, 1.0);
        let z_w = Field3D::from_fn(nx, ny, nw, |_, _, k| k as f64);
        let metrics = GridMetrics::compute(&ext, &rmask, &pm, &pn, &z_w);
        Setup { ext, metrics }
    }

    #[test]
    fn test_face_flux_reduces_to_centered_without_curvature() {
        assert_relative_eq!(upstream_face_flux(1.0, 3.0, 0.0, 0.0, 2.0), 4.0, epsilon = TOL);
        assert_relative_eq!(upstream_face_flux(1.0, 3.0, 0.0, 0.0, -2.0), -4.0, epsilon = TOL);
    }

    #[test]
    fn test_face_flux_uses_donor_curvature() {
        // Positive flux: only the upstream (negative side) curvature counts.
        let f = upstream_face_flux(1.0, 1.0, 6.0, 600.0, 1.0);
        assert_relative_eq!(f, 1.0 - 1.0, epsilon = TOL);
        // Negative flux: only the positive-side curvature counts.
        let f = upstream_face_flux(1.0, 1.0, 600.0, 6.0, -1.0);
        assert_relative_eq!(f, -1.0 + 1.0, epsilon = TOL);
    }

    #[test]
    fn test_curvature_zero_at_domain_edges() {
        let s = setup(5, 3, 1, None);
        let (nx, ny, n) = s.ext.rho_shape();
        // Quadratic in ξ: interior curvature is 2 everywhere.
        let told = Field3D::from_fn(nx, ny, n, |i, _, _| (i * i) as f64);
        let zero = Field3D::rho(&s.ext, 0.0);
        let fluxes = MassFluxes::compute(&s.metrics, &zero, &zero);
        let mut scratch = HorizontalScratch::new(&s.ext);

        horizontal_fluxes_layer(&s.metrics, &fluxes, &told, 0, &mut scratch);

        let row = nx;
        assert_eq!(scratch.curv_xi[row], 0.0);
        assert_eq!(scratch.curv_xi[row + 5], 0.0);
        for i in 1..5 {
            assert_relative_eq!(scratch.curv_xi[row + i], 2.0, epsilon = TOL);
        }
    }

    #[test]
    fn test_uniform_flow_translates_linear_profile_exactly() {
        // A linear field has no curvature, so the flux is centered and the
        // interior tendency is dt·pmn·u·Hz·slope in every interior cell.
        let s = setup(6, 3, 1, None);
        let (nx, ny, n) = s.ext.rho_shape();
        let told = Field3D::from_fn(nx, ny, n, |i, _, _| 2.0 * i as f64);
        let u = Field3D::rho(&s.ext, 0.1);
        let v = Field3D::rho(&s.ext, 0.0);
        let fluxes = MassFluxes::compute(&s.metrics, &u, &v);

        let mut tnew = told.clone();
        apply_horizontal_advection(1.0, &s.metrics, &fluxes, &told, &mut tnew);

        // Interior cells away from the edge sentinels.
        for i in 2..5 {
            assert_relative_eq!(tnew[(i, 1, 0)], told[(i, 1, 0)] - 0.2, epsilon = TOL);
        }
    }

    #[test]
    fn test_land_face_flux_is_zero() {
        let mut rmask = Field2D::filled(5, 5, 1.0);
        rmask[(2, 2)] = 0.0;
        let s = setup(4, 4, 1, Some(rmask));
        let (nx, ny, n) = s.ext.rho_shape();
        let told = Field3D::from_fn(nx, ny, n, |i, j, _| (3 * i + 7 * j) as f64);
        let u = Field3D::rho(&s.ext, 0.7);
        let v = Field3D::rho(&s.ext, -0.4);
        let fluxes = MassFluxes::compute(&s.metrics, &u, &v);
        let mut scratch = HorizontalScratch::new(&s.ext);

        horizontal_fluxes_layer(&s.metrics, &fluxes, &told, 0, &mut scratch);

        assert_eq!(scratch.flux_xi(2, 2), 0.0);
        assert_eq!(scratch.flux_xi(3, 2), 0.0);
        assert_eq!(scratch.flux_eta(2, 2), 0.0);
        assert_eq!(scratch.flux_eta(2, 3), 0.0);
        assert!(scratch.flux_xi(2, 1) != 0.0);
    }

    #[test]
    fn test_boundary_ring_untouched() {
        let s = setup(4, 4, 2, None);
        let (nx, ny, n) = s.ext.rho_shape();
        let told = Field3D::from_fn(nx, ny, n, |i, j, k| (i + 2 * j + 3 * k) as f64);
        let u = Field3D::rho(&s.ext, 0.3);
        let v = Field3D::rho(&s.ext, 0.2);
        let fluxes = MassFluxes::compute(&s.metrics, &u, &v);
        let mut tnew = told.clone();

        apply_horizontal_advection(0.5, &s.metrics, &fluxes, &told, &mut tnew);

        for k in 0..n {
            for i in 0..nx {
                assert_eq!(tnew[(i, 0, k)], told[(i, 0, k)]);
                assert_eq!(tnew[(i, 4, k)], told[(i, 4, k)]);
            }
            for j in 0..ny {
                assert_eq!(tnew[(0, j, k)], told[(0, j, k)]);
                assert_eq!(tnew[(4, j, k)], told[(4, j, k)]);
            }
        }
    }
}

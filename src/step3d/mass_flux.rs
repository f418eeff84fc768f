//! Horizontal mass fluxes and the diagnostic vertical velocity.
//!
//! ```text
//! Huon(i,j,k) = ½(Hz(i-1,j,k) + Hz(i,j,k)) · u(i,j,k) · on_u(i,j) · umask(i,j)
//! Hvom(i,j,k) = ½(Hz(i,j-1,k) + Hz(i,j,k)) · v(i,j,k) · om_v(i,j) · vmask(i,j)
//!
//! W(i,j,0)   = 0
//! W(i,j,k+1) = W(i,j,k) - (Huon(i+1,j,k) - Huon(i,j,k) + Hvom(i,j+1,k) - Hvom(i,j,k))
//! ```
//!
//! `W` is the volume flux through interface `k` (Hz·ω scaled by the cell
//! area), integrated up from the bed. It closes discrete continuity exactly
//! for every layer, so a column whose depth-integrated divergence vanishes
//! has `W = 0` at the surface.
//!
//! Only faces bordering interior cells are filled: `Huon` for ξ-faces
//! `1..=L` on interior rows, `Hvom` for η-faces `1..=M` on interior columns,
//! `W` on interior columns. Everything else stays zero.

use crate::grid::{Field3D, GridMetrics};

/// Transient face fluxes for one tracer step.
#[derive(Clone, Debug)]
pub struct MassFluxes {
    /// Thickness-weighted volume flux through U-faces, N per column.
    pub huon: Field3D,
    /// Thickness-weighted volume flux through V-faces, N per column.
    pub hvom: Field3D,
    /// Diagnostic vertical volume flux at w-points, N + 1 per column.
    pub w: Field3D,
}

impl MassFluxes {
    /// Assemble face fluxes from the velocities and integrate continuity.
    pub fn compute(metrics: &GridMetrics, u: &Field3D, v: &Field3D) -> Self {
        let ext = &metrics.extents;
        let (nx, ny, n) = ext.rho_shape();
        debug_assert_eq!(u.shape(), (nx, ny, n));
        debug_assert_eq!(v.shape(), (nx, ny, n));

        let mut huon = Field3D::zeros(nx, ny, n);
        for j in ext.eta_interior() {
            for i in 1..=ext.l() {
                let scale = 0.5 * metrics.on_u[(i, j)] * metrics.umask[(i, j)];
                let hz_w = metrics.hz.column(i - 1, j);
                let hz_e = metrics.hz.column(i, j);
                let u_col = u.column(i, j);
                for (k, flux) in huon.column_mut(i, j).iter_mut().enumerate() {
                    *flux = scale * (hz_w[k] + hz_e[k]) * u_col[k];
                }
            }
        }

        let mut hvom = Field3D::zeros(nx, ny, n);
        for j in 1..=ext.m() {
            for i in ext.xi_interior() {
                let scale = 0.5 * metrics.om_v[(i, j)] * metrics.vmask[(i, j)];
                let hz_s = metrics.hz.column(i, j - 1);
                let hz_n = metrics.hz.column(i, j);
                let v_col = v.column(i, j);
                for (k, flux) in hvom.column_mut(i, j).iter_mut().enumerate() {
                    *flux = scale * (hz_s[k] + hz_n[k]) * v_col[k];
                }
            }
        }

        let mut w = Field3D::zeros(nx, ny, n + 1);
        for j in ext.eta_interior() {
            for i in ext.xi_interior() {
                integrate_continuity(
                    huon.column(i, j),
                    huon.column(i + 1, j),
                    hvom.column(i, j),
                    hvom.column(i, j + 1),
                    w.column_mut(i, j),
                );
            }
        }

        Self { huon, hvom, w }
    }
}

/// Integrate the layer divergence of one column from the bed upward.
///
/// `w` has one more entry than the flux columns; `w[0]` is set to zero.
#[inline]
pub fn integrate_continuity(
    huon_w: &[f64],
    huon_e: &[f64],
    hvom_s: &[f64],
    hvom_n: &[f64],
    w: &mut [f64],
) {
    let n = huon_w.len();
    debug_assert_eq!(w.len(), n + 1);

    w[0] = 0.0;
    for k in 0..n {
        let divergence = huon_e[k] - huon_w[k] + hvom_n[k] - hvom_s[k];
        w[k + 1] = w[k] - divergence;
    }
}

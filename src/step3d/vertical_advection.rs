//! Vertical advection with conservative parabolic splines.
//!
//! Each column is reconstructed as a piecewise parabola that is continuous
//! in value and slope across interfaces and whose layer means equal the
//! tracer values. For interfaces `k = 1..N-1` (0-based layers, layer `k`
//! between interfaces `k` and `k+1`) the interface values φ satisfy
//!
//! ```text
//! Hz(k)·φ(k-1) + 2(Hz(k-1) + Hz(k))·φ(k) + Hz(k-1)·φ(k+1)
//!     = 3(Hz(k-1)·t(k) + Hz(k)·t(k-1))
//! ```
//!
//! closed by zero slope at the bed, `2φ(0) + φ(1) = 3t(0)`, and at the
//! surface, `φ(N-1) + 2φ(N) = 3t(N-1)`. The system is eliminated upward
//! (`φ(k) = CF(k) - FC(k)·φ(k+1)`), closed at the surface and resolved
//! downward. The advective flux is `W(k)·φ(k)`, forced to zero at the bed
//! and the surface.

use super::mass_flux::MassFluxes;
use crate::grid::{Field3D, GridMetrics};

/// Column scratch for the spline fit, N + 1 entries each.
#[derive(Clone, Debug)]
pub struct SplineScratch {
    fc: Vec<f64>,
    cf: Vec<f64>,
}

impl SplineScratch {
    /// Allocate scratch for columns of `n_levels` layers.
    pub fn new(n_levels: usize) -> Self {
        Self {
            fc: vec![0.0; n_levels + 1],
            cf: vec![0.0; n_levels + 1],
        }
    }

    /// Interface values from the last [`spline_interface_values`] call.
    #[inline]
    pub fn interface_values(&self) -> &[f64] {
        &self.cf
    }

    /// Interface fluxes from the last [`vertical_advection_column`] call.
    #[inline]
    pub fn interface_fluxes(&self) -> &[f64] {
        &self.fc
    }
}

/// Fit the conservative parabolic spline of one column.
///
/// On return `scratch.interface_values()` holds φ at the N + 1 interfaces.
pub fn spline_interface_values(hz: &[f64], t: &[f64], scratch: &mut SplineScratch) {
    let n = t.len();
    debug_assert_eq!(hz.len(), n);
    debug_assert!(scratch.fc.len() > n && scratch.cf.len() > n);
    let SplineScratch { fc, cf } = scratch;

    // Bed: zero slope
    fc[0] = 0.5;
    cf[0] = 1.5 * t[0];

    // Forward elimination over interior interfaces
    for k in 1..n {
        let cff = 1.0 / (2.0 * hz[k - 1] + hz[k] * (2.0 - fc[k - 1]));
        fc[k] = cff * hz[k - 1];
        cf[k] = cff * (3.0 * (hz[k - 1] * t[k] + hz[k] * t[k - 1]) - hz[k] * cf[k - 1]);
    }

    // Surface: zero slope closes the system
    cf[n] = (3.0 * t[n - 1] - cf[n - 1]) / (2.0 - fc[n - 1]);

    // Back substitution
    for k in (0..n).rev() {
        cf[k] -= fc[k] * cf[k + 1];
    }
}

/// Apply vertical advection to one column.
///
/// # Arguments
///
/// * `dt` - Timestep
/// * `pmn` - Inverse cell area `pm·pn` of the column
/// * `hz` - Layer thicknesses, N
/// * `told` - Tracer used for the reconstruction, N
/// * `w` - Diagnostic vertical flux, N + 1
/// * `tnew` - Working tracer column, updated in place
pub fn vertical_advection_column(
    dt: f64,
    pmn: f64,
    hz: &[f64],
    told: &[f64],
    w: &[f64],
    tnew: &mut [f64],
    scratch: &mut SplineScratch,
) {
    let n = tnew.len();
    debug_assert_eq!(w.len(), n + 1);

    spline_interface_values(hz, told, scratch);

    let SplineScratch { fc, cf } = scratch;
    for k in 1..n {
        fc[k] = w[k] * cf[k];
    }
    fc[0] = 0.0;
    fc[n] = 0.0;

    let cff = dt * pmn;
    for k in 0..n {
        tnew[k] -= cff * (fc[k + 1] - fc[k]);
    }
}

/// Apply vertical advection to every interior column of `tnew`.
pub fn apply_vertical_advection(
    dt: f64,
    metrics: &GridMetrics,
    fluxes: &MassFluxes,
    told: &Field3D,
    tnew: &mut Field3D,
) {
    let ext = &metrics.extents;
    let mut scratch = SplineScratch::new(ext.n_levels());

    for j in ext.eta_interior() {
        for i in ext.xi_interior() {
            vertical_advection_column(
                dt,
                metrics.pmn[(i, j)],
                metrics.hz.column(i, j),
                told.column(i, j),
                fluxes.w.column(i, j),
                tnew.column_mut(i, j),
                &mut scratch,
            );
        }
    }
}

//! Implicit vertical diffusion.
//!
//! Backward Euler in time, solved for the interface gradients
//! `G(k) = (t(k) - t(k-1)) / Δz(k)` with `Δz(k) = ½(Hz(k-1) + Hz(k))`:
//!
//! ```text
//! a(k) = dt / Hz(k)
//!
//! -a(k-1)·Akt(k-1)·G(k-1)
//!   + [Δz(k) + (a(k-1) + a(k))·Akt(k)]·G(k)
//!   - a(k)·Akt(k+1)·G(k+1)               = t(k) - t(k-1),   k = 1..N-1
//!
//! G(0) = G(N) = 0
//! t(k) += a(k) · (Akt(k+1)·G(k+1) - Akt(k)·G(k))
//! ```
//!
//! The system is diagonally dominant for `Akt ≥ 0`, so the Thomas solve is
//! stable for any timestep. Bed and surface fluxes are zero, which makes
//! the update conserve `Σ Hz·t` exactly in every column.

use super::inputs::Diffusivity;
use crate::grid::{Field3D, GridMetrics};
use crate::solver::solve_tridiagonal_in_place;

/// Tridiagonal coefficients and work space for one column, N + 1 each.
#[derive(Clone, Debug)]
pub struct DiffusionScratch {
    sub: Vec<f64>,
    diag: Vec<f64>,
    sup: Vec<f64>,
    grad: Vec<f64>,
    work: Vec<f64>,
}

impl DiffusionScratch {
    /// Allocate scratch for columns of `n_levels` layers.
    pub fn new(n_levels: usize) -> Self {
        let n = n_levels + 1;
        Self {
            sub: vec![0.0; n],
            diag: vec![0.0; n],
            sup: vec![0.0; n],
            grad: vec![0.0; n],
            work: vec![0.0; n],
        }
    }

    /// Diffusive fluxes `Akt·G` at the N + 1 interfaces from the last solve.
    #[inline]
    pub fn interface_fluxes(&self) -> &[f64] {
        &self.grad
    }
}

/// Diffuse one column in place.
///
/// `hz` and `hz_inv` hold N entries, `akt` N + 1. Only the interior entries
/// of `akt` enter the operator; the bed and surface values are ignored.
pub fn vertical_diffusion_column(
    dt: f64,
    hz: &[f64],
    hz_inv: &[f64],
    akt: &[f64],
    t: &mut [f64],
    scratch: &mut DiffusionScratch,
) {
    let n = t.len();
    debug_assert_eq!(hz.len(), n);
    debug_assert_eq!(hz_inv.len(), n);
    debug_assert_eq!(akt.len(), n + 1);
    debug_assert!(
        akt.iter().all(|&a| a >= 0.0),
        "negative diffusivity in column: {:?}",
        akt
    );
    if n < 2 {
        return;
    }

    let DiffusionScratch {
        sub,
        diag,
        sup,
        grad,
        work,
    } = scratch;

    for k in 1..n {
        let a_below = dt * hz_inv[k - 1];
        let a_above = dt * hz_inv[k];
        sub[k] = -a_below * akt[k - 1];
        sup[k] = -a_above * akt[k + 1];
        diag[k] = 0.5 * (hz[k - 1] + hz[k]) + (a_below + a_above) * akt[k];
        grad[k] = t[k] - t[k - 1];
    }
    // Boundary gradients are zero, so the couplings into them vanish.
    sub[1] = 0.0;
    sup[n - 1] = 0.0;

    solve_tridiagonal_in_place(&sub[1..n], &diag[1..n], &sup[1..n], &mut grad[1..n], &mut work[1..n]);

    grad[0] = 0.0;
    grad[n] = 0.0;
    for k in 1..n {
        grad[k] *= akt[k];
    }

    for k in 0..n {
        t[k] += dt * hz_inv[k] * (grad[k + 1] - grad[k]);
    }
}

/// Diffuse every interior column of `tnew`.
pub fn apply_vertical_diffusion(
    dt: f64,
    metrics: &GridMetrics,
    akt: Diffusivity<'_>,
    tnew: &mut Field3D,
) {
    let ext = &metrics.extents;
    if let Diffusivity::Background(value) = akt {
        debug_assert!(value >= 0.0, "negative background diffusivity {}", value);
    }
    let mut scratch = DiffusionScratch::new(ext.n_levels());
    let uniform = akt.uniform_column(ext.n_interfaces());

    for j in ext.eta_interior() {
        for i in ext.xi_interior() {
            vertical_diffusion_column(
                dt,
                metrics.hz.column(i, j),
                metrics.hz_inv.column(i, j),
                akt.column(i, j, &uniform),
                tnew.column_mut(i, j),
                &mut scratch,
            );
        }
    }
}

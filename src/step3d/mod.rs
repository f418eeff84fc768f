//! One conservative tracer timestep on a terrain-following C-grid.
//!
//! [`step3d_t`] advances a tracer from `told` to `tnew` in five stages:
//!
//! 1. Grid metrics: face masks, face lengths, `pm·pn`, `Hz` ([`GridMetrics`])
//! 2. Mass fluxes `Huon`, `Hvom` and the diagnostic vertical flux `W`
//!    ([`MassFluxes`])
//! 3. Horizontal advection with the third-order upstream-biased flux
//! 4. Vertical advection with conservative parabolic splines
//! 5. Implicit vertical diffusion (backward Euler, Thomas solve)
//!
//! Stages 3 and 4 read `told` only and are explicit; stage 5 acts on the
//! advected field. Boundary-ring cells (`i = 0`, `i = L`, `j = 0`, `j = M`)
//! are copied from `told` unchanged.
//!
//! # Example
//!
//! ```
//! use step3d_rs::grid::{Field2D, Field3D};
//! use step3d_rs::step3d::{Diffusivity, Step3dConfig, Step3dInputs, step3d_t};
//! use step3d_rs::types::GridExtents;
//!
//! let ext = GridExtents::new(6, 5, 4);
//! let (nx, ny, nw) = ext.w_shape();
//! let rmask = Field2D::for_extents(&ext, 1.0);
//! let pm = Field2D::for_extents(&ext, 1.0e-3);
//! let pn = Field2D::for_extents(&ext, 1.0e-3);
//! let z_w = Field3D::from_fn(nx, ny, nw, |_, _, k| -40.0 + 10.0 * k as f64);
//! let u = Field3D::rho(&ext, 0.1);
//! let v = Field3D::rho(&ext, 0.0);
//! let told = Field3D::rho(&ext, 12.0);
//!
//! let inputs = Step3dInputs {
//!     extents: ext,
//!     rmask: &rmask,
//!     pm: &pm,
//!     pn: &pn,
//!     z_w: &z_w,
//!     akt: Diffusivity::Background(1.0e-4),
//!     u: &u,
//!     v: &v,
//!     told: &told,
//! };
//! inputs.validate().unwrap();
//!
//! let tnew = step3d_t(&Step3dConfig::new(60.0), &inputs);
//! assert!((tnew[(3, 2, 1)] - 12.0).abs() < 1e-12);
//! ```

mod config;
mod horizontal;
mod inputs;
mod mass_flux;
mod vertical_advection;
mod vertical_diffusion;

pub use config::{CURVATURE_WEIGHT, Step3dConfig};
pub use horizontal::{
    HorizontalScratch, apply_horizontal_advection, horizontal_fluxes_layer,
    horizontal_tendency_layer, upstream_face_flux,
};
pub use inputs::{DEFAULT_AKT_BACKGROUND, Diffusivity, Step3dInputs};
pub use mass_flux::{MassFluxes, integrate_continuity};
pub use vertical_advection::{
    SplineScratch, apply_vertical_advection, spline_interface_values, vertical_advection_column,
};
pub use vertical_diffusion::{DiffusionScratch, apply_vertical_diffusion, vertical_diffusion_column};

use crate::grid::{Field3D, GridMetrics};

// ============================================================================
// Serial kernel
// ============================================================================

/// Advance a tracer by one timestep.
///
/// Inputs are assumed valid; call [`Step3dInputs::validate`] once when the
/// grid or forcing changes. Violated preconditions trip `debug_assert!`s in
/// debug builds and produce non-finite values in release builds.
///
/// The vertical flux through the free surface is always zero. A uniform
/// tracer therefore stays uniform only where the depth-integrated horizontal
/// divergence vanishes (`W = 0` at the surface). Elsewhere the top layer
/// changes by `dt·pm·pn·t·W(N)`, the flux the surface would have carried.
pub fn step3d_t(config: &Step3dConfig, inputs: &Step3dInputs<'_>) -> Field3D {
    let ext = &inputs.extents;
    log::debug!(
        "step3d_t: {} dt={} vadv={} vdiff={}",
        ext,
        config.dt,
        config.vertical_advection,
        config.vertical_diffusion
    );

    let metrics = GridMetrics::compute(ext, inputs.rmask, inputs.pm, inputs.pn, inputs.z_w);
    log::trace!("step3d_t: metrics ready");

    let fluxes = MassFluxes::compute(&metrics, inputs.u, inputs.v);
    log::trace!("step3d_t: mass fluxes ready");

    let mut tnew = inputs.told.clone();
    apply_horizontal_advection(config.dt, &metrics, &fluxes, inputs.told, &mut tnew);
    log::trace!("step3d_t: horizontal advection applied");

    if config.vertical_advection {
        apply_vertical_advection(config.dt, &metrics, &fluxes, inputs.told, &mut tnew);
        log::trace!("step3d_t: vertical advection applied");
    }

    if config.vertical_diffusion {
        apply_vertical_diffusion(config.dt, &metrics, inputs.akt, &mut tnew);
        log::trace!("step3d_t: vertical diffusion applied");
    }

    tnew
}

// ============================================================================
// Parallel kernel
// ============================================================================

/// Parallel version of [`step3d_t`] using Rayon.
///
/// Horizontal tendencies are computed layer by layer, then each column runs
/// its vertical stages independently. Every floating-point operation happens
/// in the same order as in the serial kernel, so the result is bitwise equal.
#[cfg(feature = "parallel")]
pub fn step3d_t_parallel(config: &Step3dConfig, inputs: &Step3dInputs<'_>) -> Field3D {
    use rayon::prelude::*;

    let ext = &inputs.extents;
    let dt = config.dt;
    log::debug!(
        "step3d_t_parallel: {} dt={} vadv={} vdiff={}",
        ext,
        dt,
        config.vertical_advection,
        config.vertical_diffusion
    );

    let metrics = GridMetrics::compute(ext, inputs.rmask, inputs.pm, inputs.pn, inputs.z_w);
    let fluxes = MassFluxes::compute(&metrics, inputs.u, inputs.v);
    let told = inputs.told;

    // Layer-major horizontal tendencies
    let plane = ext.n_columns();
    let mut tendency = vec![0.0; plane * ext.n_levels()];
    tendency
        .par_chunks_mut(plane)
        .enumerate()
        .for_each_init(
            || HorizontalScratch::new(ext),
            |scratch, (k, layer)| {
                horizontal_tendency_layer(dt, &metrics, &fluxes, told, k, scratch, layer);
            },
        );
    log::trace!("step3d_t_parallel: horizontal tendencies ready");

    let n = ext.n_levels();
    let uniform_akt = inputs.akt.uniform_column(ext.n_interfaces());
    let mut tnew = told.clone();
    tnew.as_mut_slice()
        .par_chunks_mut(n)
        .enumerate()
        .for_each_init(
            || (SplineScratch::new(n), DiffusionScratch::new(n)),
            |(spline, diffusion), (c, column)| {
                let (i, j) = ext.column_coords(c);
                if !ext.is_interior(i, j) {
                    return;
                }

                for (k, t) in column.iter_mut().enumerate() {
                    *t -= tendency[k * plane + c];
                }

                let hz = metrics.hz.column(i, j);
                if config.vertical_advection {
                    vertical_advection_column(
                        dt,
                        metrics.pmn[(i, j)],
                        hz,
                        told.column(i, j),
                        fluxes.w.column(i, j),
                        column,
                        spline,
                    );
                }
                if config.vertical_diffusion {
                    vertical_diffusion_column(
                        dt,
                        hz,
                        metrics.hz_inv.column(i, j),
                        inputs.akt.column(i, j, &uniform_akt),
                        column,
                        diffusion,
                    );
                }
            },
        );
    log::trace!("step3d_t_parallel: column stages applied");

    tnew
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Field2D;
    use crate::types::GridExtents;
    use approx::assert_relative_eq;

    const TOL: f64 = 1e-12;

    struct Case {
        ext: GridExtents,
        rmask: Field2D,
        pm: Field2D,
        pn: Field2D,
        z_w: Field3D,
        akt: Field3D,
        u: Field3D,
        v: Field3D,
        told: Field3D,
    }

    impl Case {
        fn new(l: usize, m: usize, n: usize, dz: f64) -> Self {
            let ext = GridExtents::new(l, m, n);
            let (nx, ny, nw) = ext.w_shape();
            Self {
                ext,
                rmask: Field2D::for_extents(&ext, 1.0),
                pm: Field2D::for_extents(&ext, 1.0),
                pn: Field2D::for_extents(&ext, 1.0),
                z_w: Field3D::from_fn(nx, ny, nw, |_, _, k| -dz * n as f64 + dz * k as f64),
                akt: Field3D::w(&ext, 0.0),
                u: Field3D::rho(&ext, 0.0),
                v: Field3D::rho(&ext, 0.0),
                told: Field3D::rho(&ext, 0.0),
            }
        }

        fn inputs(&self) -> Step3dInputs<'_> {
            Step3dInputs {
                extents: self.ext,
                rmask: &self.rmask,
                pm: &self.pm,
                pn: &self.pn,
                z_w: &self.z_w,
                akt: Diffusivity::Field(&self.akt),
                u: &self.u,
                v: &self.v,
                told: &self.told,
            }
        }
    }

    #[test]
    fn test_two_layer_diffusion_scenario() {
        let mut case = Case::new(3, 3, 2, 10.0);
        case.akt.fill(0.01);
        let (nx, ny, n) = case.ext.rho_shape();
        case.told = Field3D::from_fn(nx, ny, n, |_, _, k| if k == 0 { 15.0 } else { 5.0 });

        let tnew = step3d_t(&Step3dConfig::new(100.0), &case.inputs());

        let expected = 10.0 / 102.0;
        for j in 1..3 {
            for i in 1..3 {
                assert_relative_eq!(tnew[(i, j, 1)], 5.0 + expected, epsilon = 1e-10);
                assert_relative_eq!(tnew[(i, j, 0)], 15.0 - expected, epsilon = 1e-10);
            }
        }
        // Boundary ring is copied through.
        assert_eq!(tnew[(0, 1, 1)], 5.0);
        assert_eq!(tnew[(3, 2, 0)], 15.0);
    }

    #[test]
    fn test_no_flow_no_diffusion_is_identity() {
        let mut case = Case::new(4, 3, 3, 5.0);
        let (nx, ny, n) = case.ext.rho_shape();
        case.told = Field3D::from_fn(nx, ny, n, |i, j, k| (i * 7 + j * 3 + k) as f64 * 0.25);

        let tnew = step3d_t(&Step3dConfig::new(300.0), &case.inputs());

        assert_eq!(tnew, case.told);
    }

    #[test]
    fn test_uniform_tracer_in_uniform_flow() {
        let mut case = Case::new(5, 4, 3, 4.0);
        case.u.fill(0.3);
        case.v.fill(-0.1);
        case.akt.fill(1e-3);
        case.told.fill(17.5);

        let tnew = step3d_t(&Step3dConfig::new(0.5), &case.inputs());

        for &t in tnew.as_slice() {
            assert_relative_eq!(t, 17.5, epsilon = TOL);
        }
    }

    #[test]
    fn test_disabled_stages_skip_work() {
        let mut case = Case::new(3, 3, 2, 10.0);
        case.akt.fill(0.01);
        let (nx, ny, n) = case.ext.rho_shape();
        case.told = Field3D::from_fn(nx, ny, n, |_, _, k| if k == 0 { 15.0 } else { 5.0 });

        let config = Step3dConfig::new(100.0).with_vertical_diffusion(false);
        let tnew = step3d_t(&config, &case.inputs());

        assert_eq!(tnew, case.told);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "negative background diffusivity")]
    fn test_negative_background_diffusivity_panics_in_debug() {
        let mut case = Case::new(3, 3, 4, 1.0);
        let (nx, ny, n) = case.ext.rho_shape();
        case.told = Field3D::from_fn(nx, ny, n, |_, _, k| k as f64);
        let mut inputs = case.inputs();
        inputs.akt = Diffusivity::Background(-0.3);

        step3d_t(&Step3dConfig::new(1.0), &inputs);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_serial() {
        let mut case = Case::new(7, 6, 5, 3.0);
        let (nx, ny, n) = case.ext.rho_shape();
        case.rmask[(3, 3)] = 0.0;
        case.u = Field3D::from_fn(nx, ny, n, |i, j, k| 0.05 * ((i + 2 * j + k) % 5) as f64);
        case.v = Field3D::from_fn(nx, ny, n, |i, j, k| -0.03 * ((3 * i + j + 2 * k) % 4) as f64);
        case.akt = Field3D::from_fn(nx, ny, n + 1, |i, j, k| 1e-3 * (1 + (i + j + k) % 3) as f64);
        case.told = Field3D::from_fn(nx, ny, n, |i, j, k| ((i * i + j + 3 * k) % 11) as f64);

        let config = Step3dConfig::new(2.0);
        let serial = step3d_t(&config, &case.inputs());
        let parallel = step3d_t_parallel(&config, &case.inputs());

        assert_eq!(serial, parallel);
    }
}

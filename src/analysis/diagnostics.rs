//! Per-step tracer diagnostics.
//!
//! Provides:
//! - Summary statistics (mean, min, max) over interior water cells
//! - Volume-integrated tracer content, the quantity the kernel conserves
//! - The horizontal advective Courant number of a step
//!
//! # Example
//!
//! ```
//! use step3d_rs::analysis::{TracerStats, tracer_content};
//! use step3d_rs::grid::{Field2D, Field3D, GridMetrics};
//! use step3d_rs::types::GridExtents;
//!
//! let ext = GridExtents::new(4, 4, 2);
//! let (nx, ny, nw) = ext.w_shape();
//! let rmask = Field2D::for_extents(&ext, 1.0);
//! let pm = Field2D::for_extents(&ext, 0.5);
//! let pn = Field2D::for_extents(&ext, 0.5);
//! let z_w = Field3D::from_fn(nx, ny, nw, |_, _, k| 3.0 * k as f64);
//! let metrics = GridMetrics::compute(&ext, &rmask, &pm, &pn, &z_w);
//!
//! let t = Field3D::rho(&ext, 2.0);
//! let stats = TracerStats::compute(&t, &ext, Some(&rmask));
//! assert_eq!(format!("{}", stats), "mean=2, min=2, max=2");
//!
//! // 9 interior columns, 2 layers of 3 m, cell area 4 m²
//! assert!((tracer_content(&t, &metrics) - 2.0 * 9.0 * 6.0 * 4.0).abs() < 1e-9);
//! ```

use std::fmt;

use crate::grid::{Field2D, Field3D, GridMetrics};
use crate::step3d::MassFluxes;
use crate::types::GridExtents;

/// Mean, minimum and maximum of a tracer over interior water cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TracerStats {
    /// Arithmetic mean over cells (not volume weighted)
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl TracerStats {
    /// Statistics over interior cells, skipping land when `rmask` is given.
    ///
    /// Returns NaN statistics when no cell qualifies.
    pub fn compute(t: &Field3D, ext: &GridExtents, rmask: Option<&Field2D>) -> Self {
        let mut sum = 0.0;
        let mut count = 0usize;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for j in ext.eta_interior() {
            for i in ext.xi_interior() {
                if rmask.is_some_and(|mask| mask[(i, j)] == 0.0) {
                    continue;
                }
                for &value in t.column(i, j) {
                    sum += value;
                    min = min.min(value);
                    max = max.max(value);
                    count += 1;
                }
            }
        }

        if count == 0 {
            return Self {
                mean: f64::NAN,
                min: f64::NAN,
                max: f64::NAN,
            };
        }
        Self {
            mean: sum / count as f64,
            min,
            max,
        }
    }

    /// True if all three statistics are finite.
    pub fn is_finite(&self) -> bool {
        self.mean.is_finite() && self.min.is_finite() && self.max.is_finite()
    }
}

impl fmt::Display for TracerStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mean={}, min={}, max={}", self.mean, self.min, self.max)
    }
}

/// Volume-integrated tracer content `Σ t·Hz / (pm·pn)` over interior cells.
///
/// Land cells are included; with a masked coastline their content never
/// changes, so differences between steps are unaffected.
pub fn tracer_content(t: &Field3D, metrics: &GridMetrics) -> f64 {
    let ext = &metrics.extents;
    let mut total = 0.0;
    for j in ext.eta_interior() {
        for i in ext.xi_interior() {
            let area = 1.0 / metrics.pmn[(i, j)];
            let column: f64 = t
                .column(i, j)
                .iter()
                .zip(metrics.hz.column(i, j))
                .map(|(t, hz)| t * hz)
                .sum();
            total += column * area;
        }
    }
    total
}

/// Largest horizontal advective Courant number of a step.
///
/// For each interior cell and layer:
///
/// ```text
/// C = dt · pm·pn / Hz · (max(|Huon(i)|, |Huon(i+1)|) + max(|Hvom(j)|, |Hvom(j+1)|))
/// ```
///
/// which is `|u|·dt·pm + |v|·dt·pn` on a uniform grid. The explicit
/// advection stages need `C` comfortably below one.
pub fn max_courant_number(dt: f64, metrics: &GridMetrics, fluxes: &MassFluxes) -> f64 {
    let ext = &metrics.extents;
    let mut c_max: f64 = 0.0;
    for j in ext.eta_interior() {
        for i in ext.xi_interior() {
            let scale = dt * metrics.pmn[(i, j)];
            let hz_inv = metrics.hz_inv.column(i, j);
            for (k, &inv) in hz_inv.iter().enumerate() {
                let xi = fluxes.huon[(i, j, k)].abs().max(fluxes.huon[(i + 1, j, k)].abs());
                let eta = fluxes.hvom[(i, j, k)].abs().max(fluxes.hvom[(i, j + 1, k)].abs());
                c_max = c_max.max(scale * inv * (xi + eta));
            }
        }
    }
    c_max
}

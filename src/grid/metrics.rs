//! Grid metrics derived from the mask, map factors and interface depths.
//!
//! This is the first stage of a tracer step. It produces everything the
//! later stages need at U-, V- and rho-points:
//!
//! ```text
//! umask(i,j) = rmask(i-1,j) · rmask(i,j)
//! vmask(i,j) = rmask(i,j-1) · rmask(i,j)
//! on_u(i,j)  = 2 / (pn(i-1,j) + pn(i,j))
//! om_v(i,j)  = 2 / (pm(i,j-1) + pm(i,j))
//! Hz(i,j,k)  = z_w(i,j,k+1) - z_w(i,j,k)
//! ```
//!
//! U-point arrays leave column `i = 0` at zero and V-point arrays leave row
//! `j = 0` at zero; those slots have no face behind them.

use crate::grid::{Field2D, Field3D};
use crate::types::GridExtents;

/// Face masks, face spacings, cell-area factors and layer thicknesses.
#[derive(Clone, Debug)]
pub struct GridMetrics {
    /// Grid extents the metrics were computed for.
    pub extents: GridExtents,
    /// Land-sea mask at U-faces (product of the two adjacent rho masks).
    pub umask: Field2D,
    /// Land-sea mask at V-faces.
    pub vmask: Field2D,
    /// Face length at U-points, harmonic mean of `1/pn`.
    pub on_u: Field2D,
    /// Face length at V-points, harmonic mean of `1/pm`.
    pub om_v: Field2D,
    /// Inverse cell area `pm · pn` at rho-points.
    pub pmn: Field2D,
    /// Layer thickness `Hz` at rho-points, N levels.
    pub hz: Field3D,
    /// Cached `1 / Hz`.
    pub hz_inv: Field3D,
}

impl GridMetrics {
    /// Derive face metrics and layer thicknesses.
    ///
    /// # Arguments
    ///
    /// * `ext` - Grid extents
    /// * `rmask` - Land-sea mask at rho-points (0 = land, 1 = water)
    /// * `pm`, `pn` - Inverse grid spacings in ξ and η
    /// * `z_w` - Interface depths, N + 1 per column, increasing upward
    ///
    /// No validation is performed. Layers must have positive thickness
    /// and map factors must be positive; see
    /// [`Step3dInputs::validate`](crate::step3d::Step3dInputs::validate).
    pub fn compute(
        ext: &GridExtents,
        rmask: &Field2D,
        pm: &Field2D,
        pn: &Field2D,
        z_w: &Field3D,
    ) -> Self {
        let (nx, ny) = (ext.nx(), ext.ny());
        debug_assert_eq!(rmask.shape(), (nx, ny, 1));
        debug_assert_eq!(pm.shape(), (nx, ny, 1));
        debug_assert_eq!(pn.shape(), (nx, ny, 1));
        debug_assert_eq!(z_w.shape(), ext.w_shape());

        let mut umask = Field2D::zeros(nx, ny);
        let mut on_u = Field2D::zeros(nx, ny);
        for j in 0..ny {
            for i in 1..nx {
                umask[(i, j)] = rmask[(i - 1, j)] * rmask[(i, j)];
                on_u[(i, j)] = 2.0 / (pn[(i - 1, j)] + pn[(i, j)]);
            }
        }

        let mut vmask = Field2D::zeros(nx, ny);
        let mut om_v = Field2D::zeros(nx, ny);
        for j in 1..ny {
            for i in 0..nx {
                vmask[(i, j)] = rmask[(i, j - 1)] * rmask[(i, j)];
                om_v[(i, j)] = 2.0 / (pm[(i, j - 1)] + pm[(i, j)]);
            }
        }

        let pmn = Field2D::from_fn(nx, ny, |i, j| pm[(i, j)] * pn[(i, j)]);

        let (_, _, n) = ext.rho_shape();
        let mut hz = Field3D::zeros(nx, ny, n);
        let mut hz_inv = Field3D::zeros(nx, ny, n);
        for j in 0..ny {
            for i in 0..nx {
                layer_thicknesses_into(z_w.column(i, j), hz.column_mut(i, j));
                for (inv, &h) in hz_inv.column_mut(i, j).iter_mut().zip(hz.column(i, j)) {
                    debug_assert!(h > 0.0, "Non-positive layer thickness {} at ({}, {})", h, i, j);
                    *inv = 1.0 / h;
                }
            }
        }

        Self {
            extents: *ext,
            umask,
            vmask,
            on_u,
            om_v,
            pmn,
            hz,
            hz_inv,
        }
    }
}

/// Layer thicknesses of one column from its interface depths.
///
/// `z_w` has one more entry than `hz`.
#[inline]
pub fn layer_thicknesses_into(z_w: &[f64], hz: &mut [f64]) {
    debug_assert_eq!(z_w.len(), hz.len() + 1);
    for (h, pair) in hz.iter_mut().zip(z_w.windows(2)) {
        *h = pair[1] - pair[0];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn flat_inputs(ext: &GridExtents) -> (Field2D, Field2D, Field2D, Field3D) {
        let rmask = Field2D::for_extents(ext, 1.0);
        let pm = Field2D::from_fn(ext.nx(), ext.ny(), |i, _| 1.0 / (100.0 + i as f64));
        let pn = Field2D::from_fn(ext.nx(), ext.ny(), |_, j| 1.0 / (200.0 + j as f64));
        let (nx, ny, nw) = ext.w_shape();
        let z_w = Field3D::from_fn(nx, ny, nw, |_, _, k| -30.0 + 10.0 * k as f64);
        (rmask, pm, pn, z_w)
    }

    #[test]
    fn test_face_masks_are_products() {
        let ext = GridExtents::new(4, 4, 1);
        let (mut rmask, pm, pn, _) = flat_inputs(&ext);
        let z_w = Field3D::from_fn(5, 5, 2, |_, _, k| k as f64);
        rmask[(2, 2)] = 0.0;

        let g = GridMetrics::compute(&ext, &rmask, &pm, &pn, &z_w);

        assert_eq!(g.umask[(2, 2)], 0.0);
        assert_eq!(g.umask[(3, 2)], 0.0);
        assert_eq!(g.umask[(2, 1)], 1.0);
        assert_eq!(g.vmask[(2, 2)], 0.0);
        assert_eq!(g.vmask[(2, 3)], 0.0);
        assert_eq!(g.vmask[(1, 2)], 1.0);
        // No face behind the first column / row.
        assert_eq!(g.umask[(0, 2)], 0.0);
        assert_eq!(g.vmask[(2, 0)], 0.0);
    }

    #[test]
    fn test_face_spacing_harmonic_mean() {
        let ext = GridExtents::new(4, 4, 3);
        let (rmask, pm, pn, z_w) = flat_inputs(&ext);
        let g = GridMetrics::compute(&ext, &rmask, &pm, &pn, &z_w);

        let expected_on_u = 2.0 / (pn[(1, 2)] + pn[(2, 2)]);
        assert_relative_eq!(g.on_u[(2, 2)], expected_on_u, epsilon = 1e-12);

        let expected_om_v = 2.0 / (pm[(3, 1)] + pm[(3, 2)]);
        assert_relative_eq!(g.om_v[(3, 2)], expected_om_v, epsilon = 1e-12);

        // Constant pn along a row: harmonic mean is the spacing itself.
        assert_relative_eq!(g.on_u[(3, 1)], 201.0, epsilon = 1e-10);
    }

    #[test]
    fn test_layer_thickness_and_inverse() {
        let ext = GridExtents::new(3, 3, 3);
        let (rmask, pm, pn, z_w) = flat_inputs(&ext);
        let g = GridMetrics::compute(&ext, &rmask, &pm, &pn, &z_w);

        for k in 0..3 {
            assert_relative_eq!(g.hz[(1, 1, k)], 10.0, epsilon = 1e-12);
            assert_relative_eq!(g.hz_inv[(1, 1, k)], 0.1, epsilon = 1e-12);
        }
        assert_relative_eq!(g.pmn[(2, 1)], pm[(2, 1)] * pn[(2, 1)], epsilon = 1e-18);
    }

    #[test]
    fn test_layer_thicknesses_into_stretched() {
        let z_w = [-100.0, -60.0, -30.0, -10.0, 0.0];
        let mut hz = [0.0; 4];
        layer_thicknesses_into(&z_w, &mut hz);
        assert_eq!(hz, [40.0, 30.0, 20.0, 10.0]);
    }
}

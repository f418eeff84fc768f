//! Tracer step configuration.

use crate::error::Step3dError;

/// Weight of the upstream curvature term in the horizontal face flux.
///
/// With 1/6 the scheme is the third-order upstream-biased (UTS) flux.
pub const CURVATURE_WEIGHT: f64 = 1.0 / 6.0;

/// Configuration for one tracer step.
///
/// Horizontal advection (and the mass-flux assembly it needs) always runs;
/// the vertical stages can be switched off for process studies.
///
/// # Example
///
/// ```
/// use step3d_rs::step3d::Step3dConfig;
///
/// let config = Step3dConfig::new(30.0).with_vertical_diffusion(false);
/// assert!(config.vertical_advection);
/// assert!(!config.vertical_diffusion);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step3dConfig {
    /// Timestep (s)
    pub dt: f64,
    /// Apply the parabolic-spline vertical advection stage
    pub vertical_advection: bool,
    /// Apply the implicit vertical diffusion stage
    pub vertical_diffusion: bool,
}

impl Step3dConfig {
    /// Full advection-diffusion step with timestep `dt`.
    pub fn new(dt: f64) -> Self {
        Self {
            dt,
            vertical_advection: true,
            vertical_diffusion: true,
        }
    }

    /// Enable or disable vertical advection.
    pub fn with_vertical_advection(mut self, enabled: bool) -> Self {
        self.vertical_advection = enabled;
        self
    }

    /// Enable or disable implicit vertical diffusion.
    pub fn with_vertical_diffusion(mut self, enabled: bool) -> Self {
        self.vertical_diffusion = enabled;
        self
    }

    /// Check that the timestep is usable.
    ///
    /// Stability of the explicit advection stages is the caller's concern.
    pub fn validate(&self) -> Result<(), Step3dError> {
        if self.dt > 0.0 && self.dt.is_finite() {
            Ok(())
        } else {
            Err(Step3dError::NonPositiveTimestep(self.dt))
        }
    }
}

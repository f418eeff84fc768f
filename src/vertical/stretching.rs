//! Vertical stretching functions for s-coordinate grids.
//!
//! A stretching function `Cs(s)` maps the uniform coordinate `s ∈ [-1, 0]`
//! to a stretched one with `Cs(-1) = -1` and `Cs(0) = 0`. It controls how
//! levels cluster toward the surface and the bed in deep water; in water
//! shallower than the critical depth the grid stays close to uniform.
//!
//! # Available Stretching Functions
//!
//! - [`UniformStretching`]: `Cs = s`, plain sigma levels
//! - [`SongHaidvogelStretching`]: the classic S-coordinate with surface
//!   (`theta_s`) and bottom (`theta_b`) control
//!
//! # Example
//!
//! ```
//! use step3d_rs::vertical::{SCoordinate, SongHaidvogelStretching, UniformStretching};
//!
//! let uniform = SCoordinate::new(20, 10.0, UniformStretching);
//! let stretched = SCoordinate::new(20, 10.0, SongHaidvogelStretching::new(5.0, 0.4));
//! assert_eq!(uniform.n_levels(), stretched.n_levels());
//! ```

/// Trait for vertical stretching functions.
///
/// Implementations must satisfy `cs(-1) = -1`, `cs(0) = 0` and be strictly
/// increasing on `[-1, 0]`.
pub trait Stretching: Send + Sync {
    /// Stretched coordinate `Cs(s)` for `s ∈ [-1, 0]`.
    fn cs(&self, s: f64) -> f64;

    /// Human-readable name for debugging and logging.
    fn name(&self) -> &'static str;

    /// Description of parameters (for diagnostics).
    fn description(&self) -> String {
        self.name().to_string()
    }
}

// =============================================================================
// Uniform Stretching
// =============================================================================

/// No stretching: `Cs(s) = s`.
///
/// With this function the s-coordinate reduces to plain sigma levels,
/// `z = s·h + ζ·(1 + s)`, independent of the critical depth.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniformStretching;

impl Stretching for UniformStretching {
    #[inline]
    fn cs(&self, s: f64) -> f64 {
        s
    }

    fn name(&self) -> &'static str {
        "uniform"
    }
}

// =============================================================================
// Song-Haidvogel Stretching
// =============================================================================

/// Song-Haidvogel S-coordinate stretching.
///
/// ```text
/// Cs(s) = (1 - θb) · sinh(θs·s) / sinh(θs)
///       + θb · [tanh(θs·(s + ½)) - tanh(½θs)] / (2·tanh(½θs))
/// ```
///
/// # Parameters
///
/// - `theta_s`: Surface stretching parameter (0 to 20)
///   - 0 = no stretching; `Cs` reduces to `s`
///   - 5-7 = strong surface refinement
///
/// - `theta_b`: Bottom weighting (0 to 1)
///   - 0 = surface refinement only
///   - 1 = refinement at both surface and bed
///
/// # References
///
/// - Song, Y. and D.B. Haidvogel (1994): A semi-implicit ocean circulation
///   model using a generalized topography-following coordinate system.
///   J. Comp. Phys., 115, 228-244.
#[derive(Clone, Copy, Debug)]
pub struct SongHaidvogelStretching {
    /// Surface stretching parameter (0-20, typical: 3-7).
    pub theta_s: f64,
    /// Bottom weighting (0-1, typical: 0-0.5).
    pub theta_b: f64,
}

impl Default for SongHaidvogelStretching {
    fn default() -> Self {
        Self {
            theta_s: 5.0,
            theta_b: 0.4,
        }
    }
}

impl SongHaidvogelStretching {
    /// Create stretching with custom parameters.
    pub fn new(theta_s: f64, theta_b: f64) -> Self {
        Self { theta_s, theta_b }
    }
}

impl Stretching for SongHaidvogelStretching {
    fn cs(&self, s: f64) -> f64 {
        if self.theta_s <= 0.0 {
            return s;
        }
        let ts = self.theta_s;
        let half = (0.5 * ts).tanh();
        let surface = (ts * s).sinh() / ts.sinh();
        let bottom = 0.5 * ((ts * (s + 0.5)).tanh() - half) / half;
        (1.0 - self.theta_b) * surface + self.theta_b * bottom
    }

    fn name(&self) -> &'static str {
        "song_haidvogel"
    }

    fn description(&self) -> String {
        format!(
            "Song-Haidvogel (theta_s={:.1}, theta_b={:.2})",
            self.theta_s, self.theta_b
        )
    }
}

// =============================================================================
// Tests
// =============================================================================

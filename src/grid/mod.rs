//! Structured-grid storage and metrics.
//!
//! - [`Field2D`] / [`Field3D`]: contiguous storage for horizontal fields and
//!   water-column fields
//! - [`GridMetrics`]: face masks, face spacings and layer thicknesses derived
//!   once per tracer step

mod field;
mod metrics;

pub use field::{Field2D, Field3D};
pub use metrics::{GridMetrics, layer_thicknesses_into};

//! Diagnostics for tracer steps.
//!
//! The kernel itself reports nothing; drivers call these between steps to
//! log progress and to check conservation and stability.

mod diagnostics;

pub use diagnostics::{TracerStats, max_courant_number, tracer_content};

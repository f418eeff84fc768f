//! Linear solvers shared by the column stages.
//!
//! - [`solve_tridiagonal_in_place`]: allocation-free Thomas algorithm used by
//!   the implicit vertical diffusion solve
//! - [`thomas_solve`]: allocating wrapper for one-off systems

mod tridiagonal;

pub use tridiagonal::{solve_tridiagonal_in_place, thomas_solve};

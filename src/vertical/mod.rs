//! Terrain-following vertical coordinate.
//!
//! Builds the interface depths `z_w` that the tracer kernel consumes from
//! bathymetry, free-surface elevation and a stretching function. The
//! kernel itself never looks at `s` or `Cs`; any other source of `z_w`
//! with layers of positive thickness works equally well.
//!
//! # Example
//!
//! ```
//! use step3d_rs::grid::Field2D;
//! use step3d_rs::vertical::{SCoordinate, SongHaidvogelStretching};
//!
//! let sc = SCoordinate::new(20, 10.0, SongHaidvogelStretching::new(5.0, 0.4));
//! let h = Field2D::filled(8, 6, 120.0);
//!
//! let z_w = sc.interface_depths(&h, None);
//! assert_eq!(z_w.nz(), 21);
//! assert!((z_w[(3, 3, 0)] + 120.0).abs() < 1e-9);
//! assert!(z_w[(3, 3, 20)].abs() < 1e-12);
//! ```

mod s_coordinate;
mod stretching;

pub use s_coordinate::SCoordinate;
pub use stretching::{SongHaidvogelStretching, Stretching, UniformStretching};

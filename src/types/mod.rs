//! Strongly-typed grid descriptors.

mod extents;

pub use extents::GridExtents;

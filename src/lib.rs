//! Composite alignable hierarchy for a segmented detector.
//!
//! Leaves ([`alignable::DetUnit`]) carry measured positions and orientations,
//! composites ([`alignable::Composite`]) own their components and derive an
//! aggregate [`surface::Surface`] from them.

pub mod alignable;
pub mod error;
pub mod geometry;
pub mod prelude;
pub mod report;
pub mod surface;

//! Pure geometry data for anchored popups
//!
//! This crate contains the point, size and rectangle primitives shared by the
//! layout calculators and the popup state machine, plus the anchor geometry
//! reported by the host after each layout pass.

mod anchor;
mod geometry;

pub use anchor::*;
pub use geometry::*;

pub mod prelude {
    pub use crate::anchor::AnchorGeometry;
    pub use crate::geometry::{Point, Rect, Size};
}

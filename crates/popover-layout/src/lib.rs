//! Placement, height resolution and viewport clamping for anchored popups
//!
//! Everything in this crate is a pure transform: callers hand in fresh inputs
//! on every open cycle and get plain values back.

mod alignment;
mod clamp;
mod height;

pub use alignment::*;
pub use clamp::*;
pub use height::*;

pub mod prelude {
    pub use crate::alignment::{resolve_placement, BiasAlignment, PlacementResult};
    pub use crate::clamp::{clamp_to_viewport, ClampResult};
    pub use crate::height::{resolve_height, HeightResolution, HeightSpec, RowHeights};
}

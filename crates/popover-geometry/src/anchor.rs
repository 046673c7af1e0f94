//! Anchor geometry reported by the host display layer.

use crate::geometry::{Point, Rect, Size};

/// Absolute position and size of the element a popup is anchored to.
///
/// The host produces one of these per layout pass. Before the anchor has been
/// laid out at least once there is no geometry at all, which callers model as
/// `Option<AnchorGeometry>`.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct AnchorGeometry {
    /// Top-left corner in viewport coordinates.
    pub position: Point,
    pub size: Size,
}

impl AnchorGeometry {
    pub const fn new(position: Point, size: Size) -> Self {
        Self { position, size }
    }

    pub fn from_rect(rect: Rect) -> Self {
        Self {
            position: rect.origin(),
            size: rect.size(),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }
}

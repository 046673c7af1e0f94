//! Interfaces to the host environment around a popup.
//!
//! The popup never draws anything or listens for input itself. It reads
//! geometry from a [`LayoutHost`], hands the resolved placement to a
//! [`DisplayLayer`], and optionally clears focus through a [`FocusHandle`].

use popover_geometry::{AnchorGeometry, Point, Rect, Size};

/// Layout queries answered by the host after its layout passes.
pub trait LayoutHost<T> {
    /// Geometry of the anchor, or `None` until it has been laid out once.
    fn anchor_geometry(&self) -> Option<AnchorGeometry>;

    /// Size of the visible area the popup must stay within.
    fn viewport_size(&self) -> Option<Size>;

    /// Lays out the row for `value` offstage, at most `max_width` wide, and
    /// reports its size. Nothing measured here is ever shown. `None` means the
    /// row could not be measured during this pass.
    fn measure_row(&self, index: usize, value: &T, max_width: f32) -> Option<Size>;
}

/// One row of an open popup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowDescriptor {
    /// Index into the candidate values.
    pub index: usize,
    pub height: f32,
}

/// Fully resolved and clamped placement of an open popup.
#[derive(Clone, Debug, PartialEq)]
pub struct PopupGeometry {
    /// Top-left corner relative to the anchor's top-left corner.
    pub offset: Point,
    /// Top-left corner in viewport coordinates.
    pub origin: Point,
    pub size: Size,
    pub rows: Vec<RowDescriptor>,
    /// True when the popup was flipped to the other side of the anchor.
    pub is_y_inverted: bool,
    /// Whether taps outside the popup should close it.
    pub barrier_dismissible: bool,
}

impl PopupGeometry {
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }
}

/// The layer that actually inserts and removes the popup from the display tree.
pub trait DisplayLayer {
    fn show(&mut self, geometry: &PopupGeometry);
    fn hide(&mut self);
}

/// Input focus owned by the trigger source.
pub trait FocusHandle {
    fn clear_focus(&mut self);
}

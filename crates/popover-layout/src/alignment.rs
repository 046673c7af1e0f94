//! Bias alignment and anchored placement

use popover_geometry::{AnchorGeometry, Point, Size};

/// Alignment of a popup against its anchor, one bias per axis in `[-1, 1]`.
///
/// A bias of `-1` puts the popup entirely before the anchor on that axis
/// (left of it, or above it), `1` entirely after it (right of it, or below it)
/// and `0` centers both. Values in between interpolate linearly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BiasAlignment {
    pub horizontal_bias: f32,
    pub vertical_bias: f32,
}

impl BiasAlignment {
    pub const fn new(horizontal_bias: f32, vertical_bias: f32) -> Self {
        Self {
            horizontal_bias,
            vertical_bias,
        }
    }

    /// Centered over the anchor on both axes.
    pub const CENTER: Self = Self::new(0.0, 0.0);

    /// Directly below the anchor, horizontally centered. The usual dropdown placement.
    pub const BOTTOM_CENTER: Self = Self::new(0.0, 1.0);

    /// Directly above the anchor, horizontally centered.
    pub const TOP_CENTER: Self = Self::new(0.0, -1.0);

    /// Left of the anchor, vertically centered.
    pub const CENTER_START: Self = Self::new(-1.0, 0.0);

    /// Right of the anchor, vertically centered.
    pub const CENTER_END: Self = Self::new(1.0, 0.0);

    /// Returns true if both biases are finite and within `[-1, 1]`.
    pub fn is_in_range(&self) -> bool {
        let in_range = |bias: f32| bias.is_finite() && (-1.0..=1.0).contains(&bias);
        in_range(self.horizontal_bias) && in_range(self.vertical_bias)
    }

    /// Mirrors the vertical bias, turning "below" into "above" and vice versa.
    pub fn flip_vertical(self) -> Self {
        Self {
            vertical_bias: -self.vertical_bias,
            ..self
        }
    }
}

impl Default for BiasAlignment {
    fn default() -> Self {
        Self::BOTTOM_CENTER
    }
}

impl From<Point> for BiasAlignment {
    fn from(point: Point) -> Self {
        Self::new(point.x, point.y)
    }
}

/// Computes the offset of a popup along one axis, relative to the anchor's start edge.
///
/// Interpolates between the popup's end edge meeting the anchor's start edge
/// (`bias = -1`) and the popup's start edge meeting the anchor's end edge (`bias = 1`).
pub fn align_outside(bias: f32, anchor_extent: f32, popup_extent: f32) -> f32 {
    let flush_start = -popup_extent;
    let flush_end = anchor_extent;
    let fraction = (bias + 1.0) / 2.0;
    flush_start + (flush_end - flush_start) * fraction
}

/// Where a popup lands relative to its anchor, before any viewport clamping.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PlacementResult {
    /// Offset of the popup's top-left corner from the anchor's top-left corner.
    pub offset: Point,
    /// True if the vertical bias was mirrored to avoid overflowing the viewport bottom.
    pub is_y_inverted: bool,
}

impl PlacementResult {
    /// Popup origin in viewport coordinates.
    pub fn absolute_origin(&self, anchor: &AnchorGeometry) -> Point {
        anchor.position + self.offset
    }
}

/// Resolves the popup offset for `alignment`, mirroring the vertical bias when
/// the popup would otherwise extend past `viewport_height` and
/// `invert_on_overflow` is set.
pub fn resolve_placement(
    alignment: BiasAlignment,
    anchor: &AnchorGeometry,
    popup_size: Size,
    viewport_height: f32,
    invert_on_overflow: bool,
) -> PlacementResult {
    resolve_placement_with_margin(
        alignment,
        anchor,
        popup_size,
        viewport_height,
        invert_on_overflow,
        0.0,
    )
}

/// Same as [`resolve_placement`], with an explicit vertical gap between popup and anchor.
///
/// The gap scales with the effective vertical bias: a popup below the anchor is
/// pushed down by `margin`, one above it is pushed up, a centered one is not moved.
pub fn resolve_placement_with_margin(
    alignment: BiasAlignment,
    anchor: &AnchorGeometry,
    popup_size: Size,
    viewport_height: f32,
    invert_on_overflow: bool,
    margin: f32,
) -> PlacementResult {
    let x = align_outside(alignment.horizontal_bias, anchor.width(), popup_size.width);
    let y = vertical_offset(alignment.vertical_bias, anchor, popup_size, margin);

    let bottom = anchor.position.y + y + popup_size.height;
    if invert_on_overflow && bottom > viewport_height {
        let flipped = alignment.flip_vertical();
        let inverted_y = vertical_offset(flipped.vertical_bias, anchor, popup_size, margin);
        log::trace!(
            "popup bottom {bottom:.1} exceeds viewport {viewport_height:.1}; vertical bias {} -> {}",
            alignment.vertical_bias,
            flipped.vertical_bias
        );
        return PlacementResult {
            offset: Point::new(x, inverted_y),
            is_y_inverted: true,
        };
    }

    PlacementResult {
        offset: Point::new(x, y),
        is_y_inverted: false,
    }
}

fn vertical_offset(bias: f32, anchor: &AnchorGeometry, popup_size: Size, margin: f32) -> f32 {
    align_outside(bias, anchor.height(), popup_size.height) + margin * bias
}

#[cfg(test)]
#[path = "tests/alignment_tests.rs"]
mod tests;

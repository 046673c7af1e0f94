//! Keeps a placed popup inside the viewport

/// Vertical correction for a placed popup.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ClampResult {
    /// Added to the pre-clamp vertical offset. Zero when the popup already fits.
    pub top_adjustment: f32,
    /// Never larger than the requested height.
    pub clamped_height: f32,
}

impl ClampResult {
    pub fn is_adjusted(&self, popup_height: f32) -> bool {
        self.top_adjustment != 0.0 || self.clamped_height != popup_height
    }
}

/// Moves, and if it must, shrinks a popup so it lies within `[0, viewport_height]`.
///
/// A popup running past the bottom edge is shifted up first. Only when it is
/// taller than the viewport itself does it get pinned to the top edge and cut
/// to the viewport height. A popup starting above the top edge is shifted down
/// under the same rules.
pub fn clamp_to_viewport(absolute_top: f32, popup_height: f32, viewport_height: f32) -> ClampResult {
    let bottom = absolute_top + popup_height;

    if bottom > viewport_height {
        let top_adjustment = viewport_height - bottom;
        if absolute_top + top_adjustment < 0.0 {
            return ClampResult {
                top_adjustment: -absolute_top,
                clamped_height: viewport_height,
            };
        }
        return ClampResult {
            top_adjustment,
            clamped_height: popup_height,
        };
    }

    if absolute_top < 0.0 {
        return ClampResult {
            top_adjustment: -absolute_top,
            clamped_height: popup_height.min(viewport_height),
        };
    }

    ClampResult {
        top_adjustment: 0.0,
        clamped_height: popup_height,
    }
}

#[cfg(test)]
#[path = "tests/clamp_tests.rs"]
mod tests;

//! Assertion helpers for popup scenario tests.

use popover_core::PopupGeometry;
use popover_geometry::{Rect, Size};

use crate::recording::PopupEvent;

/// Assert that a value is within `tolerance` of the expected one.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that the popup lies entirely within a viewport of `viewport` size.
pub fn assert_within_viewport(geometry: &PopupGeometry, viewport: Size, msg: &str) {
    let bounds = geometry.bounds();
    assert!(
        Rect::from_size(viewport).contains_rect(&bounds),
        "{}: popup {:?} escapes viewport {:?}",
        msg,
        bounds,
        viewport
    );
}

/// Short, order-preserving names for a sequence of events.
pub fn event_kinds(events: &[PopupEvent]) -> Vec<&'static str> {
    events
        .iter()
        .map(|event| match event {
            PopupEvent::Show(_) => "show",
            PopupEvent::Hide => "hide",
            PopupEvent::ClearFocus => "clear_focus",
            PopupEvent::Visibility(true) => "visible",
            PopupEvent::Visibility(false) => "hidden",
        })
        .collect()
}

pub fn assert_event_kinds(events: &[PopupEvent], expected: &[&str], msg: &str) {
    assert_eq!(event_kinds(events), expected, "{}", msg);
}

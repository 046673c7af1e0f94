use super::*;
use popover_geometry::{AnchorGeometry, Point, Size};

fn anchor_at(x: f32, y: f32) -> AnchorGeometry {
    AnchorGeometry::new(Point::new(x, y), Size::new(200.0, 40.0))
}

#[test]
fn center_alignment_centers_on_both_axes() {
    let anchor = anchor_at(100.0, 300.0);
    let popup = Size::new(100.0, 120.0);

    let placement = resolve_placement(BiasAlignment::CENTER, &anchor, popup, 800.0, false);

    assert_eq!(placement.offset, Point::new(50.0, -40.0));
    assert!(!placement.is_y_inverted);
}

#[test]
fn bottom_center_places_popup_under_anchor() {
    let anchor = anchor_at(100.0, 100.0);
    let popup = Size::new(200.0, 120.0);

    let placement = resolve_placement(BiasAlignment::BOTTOM_CENTER, &anchor, popup, 800.0, true);

    assert_eq!(placement.offset, Point::new(0.0, 40.0));
    assert!(!placement.is_y_inverted);
    assert_eq!(placement.absolute_origin(&anchor), Point::new(100.0, 140.0));
}

#[test]
fn horizontal_extremes_sit_outside_the_anchor() {
    let anchor = anchor_at(100.0, 100.0);
    let popup = Size::new(80.0, 120.0);

    let start = resolve_placement(BiasAlignment::CENTER_START, &anchor, popup, 800.0, false);
    let end = resolve_placement(BiasAlignment::CENTER_END, &anchor, popup, 800.0, false);

    // Popup right edge meets anchor left edge, popup left edge meets anchor right edge.
    assert_eq!(start.offset.x, -80.0);
    assert_eq!(end.offset.x, 200.0);
}

#[test]
fn overflowing_bottom_inverts_to_above_anchor() {
    let anchor = anchor_at(100.0, 700.0);
    let popup = Size::new(200.0, 120.0);

    let placement = resolve_placement(BiasAlignment::BOTTOM_CENTER, &anchor, popup, 800.0, true);

    assert!(placement.is_y_inverted);
    let expected =
        resolve_placement(BiasAlignment::TOP_CENTER, &anchor, popup, 800.0, false).offset;
    assert_eq!(placement.offset, expected);
    assert_eq!(placement.offset.y, -120.0);
}

#[test]
fn disabled_inversion_keeps_requested_side() {
    let anchor = anchor_at(100.0, 700.0);
    let popup = Size::new(200.0, 120.0);

    let placement = resolve_placement(BiasAlignment::BOTTOM_CENTER, &anchor, popup, 800.0, false);

    assert!(!placement.is_y_inverted);
    assert_eq!(placement.offset.y, 40.0);
}

#[test]
fn exact_fit_does_not_invert() {
    let anchor = anchor_at(0.0, 640.0);
    let popup = Size::new(200.0, 120.0);

    let placement = resolve_placement(BiasAlignment::BOTTOM_CENTER, &anchor, popup, 800.0, true);

    assert!(!placement.is_y_inverted);
}

#[test]
fn margin_pushes_away_from_anchor_and_counts_toward_overflow() {
    let anchor = anchor_at(0.0, 640.0);
    let popup = Size::new(200.0, 120.0);

    let below = resolve_placement_with_margin(
        BiasAlignment::BOTTOM_CENTER,
        &anchor_at(0.0, 100.0),
        popup,
        800.0,
        true,
        8.0,
    );
    assert_eq!(below.offset.y, 48.0);

    // Fits exactly without the margin, overflows with it.
    let flipped =
        resolve_placement_with_margin(BiasAlignment::BOTTOM_CENTER, &anchor, popup, 800.0, true, 4.0);
    assert!(flipped.is_y_inverted);
    assert_eq!(flipped.offset.y, -124.0);
}

#[test]
fn placement_is_deterministic() {
    let anchor = anchor_at(13.0, 777.0);
    let popup = Size::new(150.0, 333.0);
    let alignment = BiasAlignment::new(0.25, 0.75);

    let first = resolve_placement(alignment, &anchor, popup, 800.0, true);
    let second = resolve_placement(alignment, &anchor, popup, 800.0, true);

    assert_eq!(first, second);
}

#[test]
fn range_check_rejects_out_of_bounds_and_nan() {
    assert!(BiasAlignment::new(-1.0, 1.0).is_in_range());
    assert!(!BiasAlignment::new(1.5, 0.0).is_in_range());
    assert!(!BiasAlignment::new(0.0, f32::NAN).is_in_range());
}

#[test]
fn flip_vertical_mirrors_only_vertical_bias() {
    let flipped = BiasAlignment::new(0.5, 0.75).flip_vertical();
    assert_eq!(flipped, BiasAlignment::new(0.5, -0.75));
}

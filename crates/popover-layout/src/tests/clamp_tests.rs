use super::*;
use proptest::prelude::*;

#[test]
fn fitting_popup_is_untouched() {
    let result = clamp_to_viewport(100.0, 120.0, 800.0);
    assert_eq!(
        result,
        ClampResult {
            top_adjustment: 0.0,
            clamped_height: 120.0,
        }
    );
    assert!(!result.is_adjusted(120.0));
}

#[test]
fn bottom_overflow_moves_popup_up_without_shrinking() {
    let result = clamp_to_viewport(740.0, 120.0, 800.0);
    assert_eq!(result.top_adjustment, -60.0);
    assert_eq!(result.clamped_height, 120.0);
    assert!(result.is_adjusted(120.0));
}

#[test]
fn popup_taller_than_viewport_is_pinned_and_cut() {
    let result = clamp_to_viewport(300.0, 1000.0, 800.0);
    assert_eq!(result.top_adjustment, -300.0);
    assert_eq!(result.clamped_height, 800.0);
}

#[test]
fn top_overflow_moves_popup_down() {
    let result = clamp_to_viewport(-30.0, 120.0, 800.0);
    assert_eq!(result.top_adjustment, 30.0);
    assert_eq!(result.clamped_height, 120.0);
}

#[test]
fn top_overflow_taller_than_viewport_is_cut() {
    let result = clamp_to_viewport(-30.0, 820.0, 800.0);
    assert_eq!(result.top_adjustment, 30.0);
    assert_eq!(result.clamped_height, 800.0);
}

#[test]
fn exact_fit_at_bottom_edge_is_not_overflow() {
    assert_eq!(clamp_to_viewport(680.0, 120.0, 800.0).top_adjustment, 0.0);
}

#[test]
fn half_pixel_positions_clamp_exactly() {
    let first = clamp_to_viewport(700.5, 120.25, 800.0);
    let second = clamp_to_viewport(700.5 + first.top_adjustment, first.clamped_height, 800.0);
    assert_eq!(second.top_adjustment, 0.0);
}

proptest! {
    #[test]
    fn clamping_is_idempotent(
        top in -2000i32..4000,
        height in 0i32..3000,
        viewport in 1i32..2400,
    ) {
        let (top, height, viewport) = (top as f32, height as f32, viewport as f32);
        let first = clamp_to_viewport(top, height, viewport);
        let second = clamp_to_viewport(top + first.top_adjustment, first.clamped_height, viewport);
        prop_assert_eq!(second.top_adjustment, 0.0);
        prop_assert_eq!(second.clamped_height, first.clamped_height);
    }

    #[test]
    fn clamped_popup_lies_within_viewport(
        top in -2000i32..4000,
        height in 0i32..3000,
        viewport in 1i32..2400,
    ) {
        let (top, height, viewport) = (top as f32, height as f32, viewport as f32);
        let result = clamp_to_viewport(top, height, viewport);
        let final_top = top + result.top_adjustment;
        prop_assert!(final_top >= 0.0);
        prop_assert!(final_top + result.clamped_height <= viewport);
        prop_assert!(result.clamped_height <= height);
    }
}

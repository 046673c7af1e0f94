use super::*;
use crate::assertions::{assert_approx_eq, assert_event_kinds, assert_within_viewport};
use crate::recording::PopupEvent;
use popover_core::{
    BuildPhase, CloseOutcome, MeasureError, PopupSpec, ToggleOutcome, TriggerMode,
};
use popover_geometry::{AnchorGeometry, Point, Size};
use proptest::prelude::*;

const VIEWPORT: Size = Size {
    width: 400.0,
    height: 800.0,
};

fn candidates(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("option {i}")).collect()
}

fn anchor_at(x: f32, y: f32) -> AnchorGeometry {
    AnchorGeometry::new(Point::new(x, y), Size::new(200.0, 40.0))
}

fn config(spec: PopupSpec) -> PopupConfig {
    spec.build().expect("valid config")
}

/// Anchor near the bottom of an 800px viewport, four 40px rows, three visible.
fn bottom_dropdown(spec: PopupSpec) -> PopupHarness<String> {
    let host = ScriptedLayoutHost::laid_out(anchor_at(100.0, 700.0), VIEWPORT)
        .with_row_heights([40.0; 4]);
    let mut harness = PopupHarness::new(config(spec), candidates(4), host);
    harness.pump_until_idle(4);
    harness
}

fn expect_opened(outcome: OpenOutcome) -> popover_core::PopupGeometry {
    match outcome {
        OpenOutcome::Opened(geometry) => geometry,
        other => panic!("expected the popup to open, got {other:?}"),
    }
}

#[test]
fn dropdown_near_bottom_flips_above_anchor() {
    let mut harness = bottom_dropdown(PopupSpec::new().max_rows(3.0));

    let geometry = expect_opened(harness.popup_mut().open());

    assert_approx_eq(geometry.size.height, 120.0, 0.001, "height");
    assert_approx_eq(geometry.size.width, 200.0, 0.001, "width follows anchor");
    assert!(geometry.is_y_inverted);
    assert_approx_eq(geometry.origin.x, 100.0, 0.001, "centred horizontally");
    assert_approx_eq(geometry.origin.y, 580.0, 0.001, "flush above anchor");
    assert_approx_eq(geometry.offset.y, -120.0, 0.001, "offset above anchor");
    assert_within_viewport(&geometry, VIEWPORT, "inverted dropdown");
    assert_eq!(geometry.rows.len(), 4);
    assert!(geometry.barrier_dismissible);

    assert_eq!(harness.popup().phase(), BuildPhase::Built);
    assert_eq!(harness.popup().geometry(), Some(&geometry));
    assert_event_kinds(&harness.log().events(), &["show", "visible"], "open");
    assert_eq!(harness.log().last_shown(), Some(geometry));
}

#[test]
fn dropdown_with_room_below_opens_below() {
    let host = ScriptedLayoutHost::laid_out(anchor_at(100.0, 100.0), VIEWPORT)
        .with_row_heights([40.0; 4]);
    let mut harness = PopupHarness::new(config(PopupSpec::new().max_rows(3.0)), candidates(4), host);
    harness.pump_until_idle(4);

    let geometry = expect_opened(harness.popup_mut().open());

    assert!(!geometry.is_y_inverted);
    assert_approx_eq(geometry.origin.y, 140.0, 0.001, "flush below anchor");
}

#[test]
fn empty_candidates_never_open() {
    let host = ScriptedLayoutHost::laid_out(anchor_at(100.0, 100.0), VIEWPORT);
    let mut harness = PopupHarness::new(
        config(PopupSpec::new().max_rows(3.0)),
        Vec::<String>::new(),
        host,
    );
    harness.pump_until_idle(4);

    assert_eq!(harness.popup_mut().open(), OpenOutcome::NoCandidates);
    assert_eq!(harness.popup().phase(), BuildPhase::Dismissed);
    assert!(harness.log().is_empty());
}

#[test]
fn open_while_built_shows_nothing_new() {
    let mut harness = bottom_dropdown(PopupSpec::new().max_rows(3.0));
    assert!(harness.popup_mut().open().is_opened());

    assert_eq!(harness.popup_mut().open(), OpenOutcome::AlreadyOpen);

    assert_eq!(harness.log().show_count(), 1);
    assert_eq!(harness.log().len(), 2);
}

#[test]
fn close_hides_then_clears_focus_then_notifies() {
    let mut harness = bottom_dropdown(PopupSpec::new().max_rows(3.0).trigger(TriggerMode::Focus));
    assert!(harness.popup_mut().open().is_opened());
    harness.log().clear();

    assert_eq!(harness.popup_mut().close(), CloseOutcome::Closed);

    assert_event_kinds(
        &harness.log().events(),
        &["hide", "clear_focus", "hidden"],
        "close order",
    );
    assert_eq!(harness.popup().phase(), BuildPhase::Dismissed);
    assert_eq!(harness.popup().geometry(), None);
}

#[test]
fn tap_trigger_close_leaves_focus_alone() {
    let mut harness = bottom_dropdown(PopupSpec::new().max_rows(3.0));
    assert!(harness.popup_mut().open().is_opened());
    harness.log().clear();

    harness.popup_mut().close();

    assert_event_kinds(&harness.log().events(), &["hide", "hidden"], "tap close");
}

#[test]
fn close_when_dismissed_does_nothing() {
    let mut harness = bottom_dropdown(PopupSpec::new().max_rows(3.0).trigger(TriggerMode::Focus));

    assert_eq!(harness.popup_mut().close(), CloseOutcome::AlreadyClosed);
    assert!(harness.log().is_empty());
}

#[test]
fn open_before_layout_stays_dismissed_until_measured() {
    let host = ScriptedLayoutHost::unlaid(VIEWPORT).with_row_heights([40.0; 4]);
    let mut harness = PopupHarness::new(config(PopupSpec::new().max_rows(3.0)), candidates(4), host);

    assert_eq!(
        harness.popup_mut().open(),
        OpenOutcome::MeasurementPending(MeasureError::GeometryUnavailable)
    );
    assert_eq!(harness.popup().phase(), BuildPhase::Dismissed);
    assert!(harness.log().is_empty());

    harness.host().set_anchor(Some(anchor_at(100.0, 700.0)));
    assert!(harness.step_frame());
    assert!(harness.popup().coordinator().is_complete());

    let geometry = expect_opened(harness.popup_mut().open());
    assert_approx_eq(geometry.origin.y, 580.0, 0.001, "measured after layout");
}

#[test]
fn measurement_retries_each_frame_until_anchor_is_laid_out() {
    let host = ScriptedLayoutHost::unlaid(VIEWPORT);
    let mut harness = PopupHarness::new(config(PopupSpec::new().max_rows(3.0)), candidates(2), host);

    for _ in 0..3 {
        assert!(harness.step_frame());
    }
    assert_eq!(harness.popup().coordinator().passes(), 3);
    assert!(harness.popup().coordinator().is_pending());

    harness.host().set_anchor(Some(anchor_at(0.0, 0.0)));
    assert!(harness.step_frame());

    assert!(harness.popup().coordinator().is_complete());
    assert!(!harness.step_frame());
    assert_eq!(harness.host().measure_calls(), 2);
}

#[test]
fn unmeasurable_row_defers_open() {
    let host = ScriptedLayoutHost::laid_out(anchor_at(100.0, 100.0), VIEWPORT);
    host.limit_measurable_rows(2);
    let mut harness = PopupHarness::new(config(PopupSpec::new().max_rows(3.0)), candidates(4), host);

    assert_eq!(
        harness.popup_mut().open(),
        OpenOutcome::MeasurementPending(MeasureError::MeasurementIncomplete { index: 2 })
    );
    assert_eq!(harness.popup().measurement().anchor_width, Some(200.0));

    harness.host().limit_measurable_rows(usize::MAX);
    assert!(harness.open_when_measured(2).is_opened());
}

#[test]
fn missing_viewport_defers_open_without_queueing_a_retry() {
    let mut harness = bottom_dropdown(PopupSpec::new().max_rows(3.0));
    harness.host().set_viewport(None);

    assert_eq!(
        harness.popup_mut().open(),
        OpenOutcome::MeasurementPending(MeasureError::GeometryUnavailable)
    );
    assert!(harness.log().is_empty());
    assert!(harness.popup().coordinator().is_complete());
    assert!(!harness.popup().coordinator().is_pending());
    assert!(!harness.step_frame());

    harness.host().set_viewport(Some(VIEWPORT));
    assert!(harness.popup_mut().open().is_opened());
}

#[test]
fn anchor_lost_after_measurement_defers_open_without_queueing_a_retry() {
    let mut harness = bottom_dropdown(PopupSpec::new().max_rows(3.0));
    harness.host().set_anchor(None);

    assert_eq!(
        harness.popup_mut().open(),
        OpenOutcome::MeasurementPending(MeasureError::GeometryUnavailable)
    );
    assert!(!harness.step_frame());
    assert_eq!(harness.popup().phase(), BuildPhase::Dismissed);
}

#[test]
fn complete_measurement_is_reused_across_opens() {
    let mut harness = bottom_dropdown(PopupSpec::new().max_rows(3.0));
    let measured = harness.host().measure_calls();

    for _ in 0..3 {
        assert!(harness.popup_mut().open().is_opened());
        harness.popup_mut().close();
    }

    assert_eq!(harness.host().measure_calls(), measured);
}

#[test]
fn each_open_reads_the_current_anchor_position() {
    let mut harness = bottom_dropdown(PopupSpec::new().max_rows(3.0));
    assert!(expect_opened(harness.popup_mut().open()).is_y_inverted);
    harness.popup_mut().close();

    harness.host().move_anchor(Point::new(100.0, 100.0));
    let geometry = expect_opened(harness.popup_mut().open());

    assert!(!geometry.is_y_inverted);
    assert_approx_eq(geometry.origin.y, 140.0, 0.001, "below moved anchor");
}

#[test]
fn toggle_alternates_open_and_close() {
    let mut harness = bottom_dropdown(PopupSpec::new().max_rows(3.0));

    assert!(matches!(
        harness.popup_mut().toggle(),
        ToggleOutcome::Open(OpenOutcome::Opened(_))
    ));
    assert_eq!(
        harness.popup_mut().toggle(),
        ToggleOutcome::Close(CloseOutcome::Closed)
    );
    assert!(!harness.popup().is_open());
}

#[test]
fn barrier_tap_respects_dismissibility() {
    let mut dismissible = bottom_dropdown(PopupSpec::new().max_rows(3.0));
    dismissible.popup_mut().open();
    assert!(dismissible.popup_mut().on_barrier_tap());
    assert!(!dismissible.popup().is_open());
    assert!(!dismissible.popup_mut().on_barrier_tap());

    let mut modal = bottom_dropdown(PopupSpec::new().max_rows(3.0).barrier_dismissible(false));
    let geometry = expect_opened(modal.popup_mut().open());
    assert!(!geometry.barrier_dismissible);
    assert!(!modal.popup_mut().on_barrier_tap());
    assert!(modal.popup().is_open());
}

#[test]
fn new_values_while_open_apply_on_next_open() {
    let mut harness = bottom_dropdown(PopupSpec::new().max_rows(3.0));
    let shown = expect_opened(harness.popup_mut().open());

    assert!(harness.popup_mut().set_values(candidates(2)));
    assert!(harness.popup().is_open());
    assert_eq!(harness.popup().geometry(), Some(&shown));
    assert_eq!(harness.log().show_count(), 1);

    harness.popup_mut().close();
    let reopened = expect_opened(harness.open_when_measured(2));
    assert_approx_eq(reopened.size.height, 80.0, 0.001, "two rows");
    assert_eq!(reopened.rows.len(), 2);
}

#[test]
fn equal_values_do_not_remeasure() {
    let mut harness = bottom_dropdown(PopupSpec::new().max_rows(3.0));
    let measured = harness.host().measure_calls();

    assert!(!harness.popup_mut().set_values(candidates(4)));

    assert!(!harness.step_frame());
    assert_eq!(harness.host().measure_calls(), measured);
}

#[test]
fn fractional_row_cap_shows_part_of_the_last_row() {
    let host = ScriptedLayoutHost::laid_out(anchor_at(100.0, 100.0), VIEWPORT)
        .with_row_heights([50.0; 3]);
    let mut harness = PopupHarness::new(config(PopupSpec::new().max_rows(2.5)), candidates(3), host);

    let geometry = expect_opened(harness.open_when_measured(2));

    assert_approx_eq(geometry.size.height, 125.0, 0.001, "two and a half rows");
    assert_approx_eq(geometry.rows[2].height, 25.0, 0.001, "partial row");
    assert_approx_eq(geometry.rows[1].height, 50.0, 0.001, "full row");
}

#[test]
fn popup_taller_than_viewport_is_cut_to_fit() {
    let viewport = Size::new(400.0, 300.0);
    let host = ScriptedLayoutHost::laid_out(anchor_at(0.0, 0.0), viewport);
    let mut harness = PopupHarness::new(
        config(PopupSpec::new().max_height(1000.0)),
        candidates(30),
        host,
    );

    let geometry = expect_opened(harness.open_when_measured(2));

    assert_approx_eq(geometry.origin.y, 0.0, 0.001, "pinned to top");
    assert_approx_eq(geometry.size.height, 300.0, 0.001, "viewport height");
    assert_within_viewport(&geometry, viewport, "oversized popup");
}

#[test]
fn margin_separates_popup_from_anchor() {
    let host = ScriptedLayoutHost::laid_out(anchor_at(100.0, 100.0), VIEWPORT);
    let mut harness = PopupHarness::new(
        config(PopupSpec::new().max_rows(3.0).margin(8.0)),
        candidates(4),
        host,
    );

    let geometry = expect_opened(harness.open_when_measured(2));

    assert_approx_eq(geometry.origin.y, 148.0, 0.001, "gap below anchor");
}

#[test]
fn dropping_a_built_popup_hides_it() {
    let mut harness = bottom_dropdown(PopupSpec::new().max_rows(3.0));
    harness.popup_mut().open();
    harness.log().clear();

    let log = harness.finish();

    assert_eq!(log.events(), vec![PopupEvent::Hide]);
}

#[test]
fn dropping_a_dismissed_popup_records_nothing() {
    let harness = bottom_dropdown(PopupSpec::new().max_rows(3.0));
    assert!(harness.finish().is_empty());
}

proptest! {
    #[test]
    fn opened_popup_always_fits_viewport(
        anchor_y in 0u16..=760,
        row_count in 1usize..12,
        visible_rows in 1u8..8,
    ) {
        let host = ScriptedLayoutHost::laid_out(anchor_at(100.0, anchor_y as f32), VIEWPORT);
        let mut harness = PopupHarness::new(
            config(PopupSpec::new().max_rows(visible_rows as f32)),
            candidates(row_count),
            host,
        );

        let geometry = expect_opened(harness.open_when_measured(2));

        let bounds = geometry.bounds();
        prop_assert!(bounds.y >= 0.0);
        prop_assert!(bounds.bottom() <= VIEWPORT.height);
    }
}

use std::cell::Cell;
use std::rc::Rc;

use anyhow::{bail, Context};
use popover_core::prelude::*;
use popover_geometry::{AnchorGeometry, Point, Size};
use popover_runtime::Runtime;

const FRAME_NANOS: u64 = 16_666_667;
const VIEWPORT: Size = Size::new(480.0, 800.0);

/// Pretends to be a window whose layout settles after a couple of frames.
struct DemoHost {
    frame: Cell<u32>,
    settles_on_frame: u32,
    anchor: Cell<AnchorGeometry>,
}

impl DemoHost {
    fn advance(&self) {
        self.frame.set(self.frame.get() + 1);
    }

    fn is_laid_out(&self) -> bool {
        self.frame.get() >= self.settles_on_frame
    }
}

impl LayoutHost<String> for DemoHost {
    fn anchor_geometry(&self) -> Option<AnchorGeometry> {
        self.is_laid_out().then(|| self.anchor.get())
    }

    fn viewport_size(&self) -> Option<Size> {
        Some(VIEWPORT)
    }

    fn measure_row(&self, _index: usize, value: &String, max_width: f32) -> Option<Size> {
        if !self.is_laid_out() {
            return None;
        }
        // 16px padding plus 24px per wrapped line at roughly 9px per glyph.
        let chars_per_line = (max_width / 9.0).max(1.0) as usize;
        let lines = value.chars().count().div_ceil(chars_per_line).max(1);
        Some(Size::new(max_width, 16.0 + 24.0 * lines as f32))
    }
}

struct StdoutDisplay;

impl DisplayLayer for StdoutDisplay {
    fn show(&mut self, geometry: &PopupGeometry) {
        let bounds = geometry.bounds();
        println!(
            "  show: ({:.0}, {:.0}) {:.0}x{:.0}, {} rows{}",
            bounds.x,
            bounds.y,
            bounds.width,
            bounds.height,
            geometry.rows.len(),
            if geometry.is_y_inverted {
                ", flipped above anchor"
            } else {
                ""
            }
        );
        for row in &geometry.rows {
            println!("    row {} -> {:.1}px", row.index, row.height);
        }
    }

    fn hide(&mut self) {
        println!("  hide");
    }
}

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== Popover Demo ===");
    println!("A dropdown anchored near the bottom of an 800px window.");
    println!();

    let runtime = Runtime::default();
    let host = Rc::new(DemoHost {
        frame: Cell::new(0),
        settles_on_frame: 2,
        anchor: Cell::new(AnchorGeometry::new(
            Point::new(140.0, 700.0),
            Size::new(200.0, 40.0),
        )),
    });
    let values: Vec<String> = [
        "Apple",
        "Banana",
        "Cherry",
        "Dragon fruit from the far side of the orchard",
        "Elderberry",
    ]
    .into_iter()
    .map(String::from)
    .collect();

    let spec = PopupSpec::new().max_rows(3.5).margin(4.0);
    let mut popup = Popup::from_spec(
        &spec,
        values,
        host.clone(),
        Box::new(StdoutDisplay),
        runtime.frame_clock(),
    )
    .context("dropdown configuration")?
    .on_visibility_changed(|visible| log::info!("dropdown visible: {visible}"));

    let mut frame_time = 0;
    let mut opened = false;
    for frame in 0..8 {
        println!("frame {frame}: tap on anchor");
        match popup.open() {
            OpenOutcome::Opened(geometry) => {
                log::info!(
                    "opened on frame {frame} after {} measurement passes, inverted: {}",
                    popup.coordinator().passes(),
                    geometry.is_y_inverted
                );
                opened = true;
                break;
            }
            OpenOutcome::MeasurementPending(reason) => {
                log::debug!("frame {frame}: open deferred: {reason}");
                println!("  waiting: {reason}");
            }
            other => bail!("unexpected outcome while opening: {other:?}"),
        }
        host.advance();
        runtime.drain_frame_callbacks(frame_time);
        frame_time += FRAME_NANOS;
    }
    if !opened {
        bail!("layout never settled");
    }

    println!("tap outside the dropdown");
    if !popup.on_barrier_tap() {
        bail!("barrier tap did not dismiss the dropdown");
    }

    println!("anchor scrolled to the top; tap again");
    host.anchor
        .set(AnchorGeometry::new(Point::new(140.0, 60.0), Size::new(200.0, 40.0)));
    match popup.toggle() {
        ToggleOutcome::Open(OpenOutcome::Opened(geometry)) if !geometry.is_y_inverted => {}
        other => bail!("expected the dropdown below its anchor, got {other:?}"),
    }
    popup.close();

    println!();
    println!(
        "done after {} frames ({} measurement passes)",
        runtime.frames_drained(),
        popup.coordinator().passes()
    );
    Ok(())
}

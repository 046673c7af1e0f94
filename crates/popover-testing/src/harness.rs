//! Headless harness that drives a [`Popup`] frame by frame.

use std::rc::Rc;

use popover_core::{OpenOutcome, Popup, PopupConfig};
use popover_runtime::Runtime;

use crate::recording::{EventLog, RecordingDisplay, RecordingFocus, ScriptedLayoutHost};

/// Nominal frame interval used when stepping, 60 Hz.
pub const FRAME_INTERVAL_NANOS: u64 = 16_666_667;

/// A popup wired to recording collaborators and its own frame runtime.
///
/// Nothing advances on its own: tests call [`PopupHarness::step_frame`] to
/// stand in for the host finishing a layout pass.
pub struct PopupHarness<T> {
    popup: Popup<T>,
    host: Rc<ScriptedLayoutHost>,
    log: EventLog,
    runtime: Runtime,
    frame_time_nanos: u64,
}

impl<T: PartialEq + Clone + 'static> PopupHarness<T> {
    pub fn new(config: PopupConfig, values: Vec<T>, host: ScriptedLayoutHost) -> Self {
        let runtime = Runtime::default();
        let host = Rc::new(host);
        let log = EventLog::new();
        let popup = Popup::new(
            config,
            values,
            host.clone(),
            Box::new(RecordingDisplay::new(log.clone())),
            runtime.frame_clock(),
        )
        .with_focus(Box::new(RecordingFocus::new(log.clone())))
        .on_visibility_changed(log.visibility_observer());

        Self {
            popup,
            host,
            log,
            runtime,
            frame_time_nanos: 0,
        }
    }

    /// Runs one frame. Returns false if nothing was waiting for it.
    pub fn step_frame(&mut self) -> bool {
        if !self.runtime.has_frame_callbacks() {
            return false;
        }
        self.runtime.drain_frame_callbacks(self.frame_time_nanos);
        self.frame_time_nanos += FRAME_INTERVAL_NANOS;
        true
    }

    /// Steps frames until no callbacks remain or `max_frames` have run.
    /// Returns the number of frames run.
    pub fn pump_until_idle(&mut self, max_frames: usize) -> usize {
        let mut frames = 0;
        while frames < max_frames && self.step_frame() {
            frames += 1;
        }
        frames
    }

    /// Keeps requesting an open, stepping a frame after each pending attempt.
    pub fn open_when_measured(&mut self, max_frames: usize) -> OpenOutcome {
        let mut outcome = self.popup.open();
        for _ in 0..max_frames {
            if !matches!(outcome, OpenOutcome::MeasurementPending(_)) {
                break;
            }
            self.step_frame();
            outcome = self.popup.open();
        }
        outcome
    }

    pub fn popup(&self) -> &Popup<T> {
        &self.popup
    }

    pub fn popup_mut(&mut self) -> &mut Popup<T> {
        &mut self.popup
    }

    pub fn host(&self) -> &ScriptedLayoutHost {
        &self.host
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    /// Drops the popup, returning everything it recorded, teardown included.
    pub fn finish(self) -> EventLog {
        let Self { popup, log, .. } = self;
        drop(popup);
        log
    }
}

#[cfg(test)]
#[path = "tests/popup_tests.rs"]
mod tests;

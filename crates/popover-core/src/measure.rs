//! Offstage measurement of the anchor width and the popup's rows.
//!
//! Measurement needs the host to have completed at least one layout pass, so
//! the coordinator polls the [`LayoutHost`] from frame callbacks and keeps
//! rescheduling itself until every row has a size. Failures along the way are
//! expected during the first frames; they are logged and retried, never
//! returned to the host.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use popover_layout::RowHeights;
use popover_runtime::{FrameCallbackRegistration, FrameClock};
use thiserror::Error;

use crate::host::LayoutHost;

/// Why a measurement pass could not complete. Always transient.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MeasureError {
    #[error("anchor or viewport has not been laid out yet")]
    GeometryUnavailable,
    #[error("row {index} could not be measured yet")]
    MeasurementIncomplete { index: usize },
}

/// What is known so far about the popup's dimensions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeasurementSnapshot {
    pub anchor_width: Option<f32>,
    pub row_heights: Option<RowHeights>,
}

impl MeasurementSnapshot {
    /// True once the popup can be sized. An empty candidate set only needs its
    /// (empty) row heights.
    pub fn is_complete(&self) -> bool {
        match &self.row_heights {
            Some(rows) if rows.is_empty() => true,
            Some(_) => self.anchor_width.is_some(),
            None => false,
        }
    }
}

struct CoordinatorState<T> {
    values: Vec<T>,
    snapshot: MeasurementSnapshot,
    passes: u32,
    pending: Option<FrameCallbackRegistration>,
}

/// Owns the measurement snapshot for one popup instance.
pub struct MeasurementCoordinator<T> {
    state: Rc<RefCell<CoordinatorState<T>>>,
    host: Rc<dyn LayoutHost<T>>,
    clock: FrameClock,
}

impl<T: PartialEq + Clone + 'static> MeasurementCoordinator<T> {
    /// Creates a coordinator and schedules the first pass for the next frame.
    pub fn new(values: Vec<T>, host: Rc<dyn LayoutHost<T>>, clock: FrameClock) -> Self {
        let coordinator = Self {
            state: Rc::new(RefCell::new(CoordinatorState {
                values,
                snapshot: MeasurementSnapshot::default(),
                passes: 0,
                pending: None,
            })),
            host,
            clock,
        };
        schedule_pass(&coordinator.state, &coordinator.clock, &coordinator.host);
        coordinator
    }

    /// Replaces the candidate values. Returns false, and keeps the snapshot, if
    /// they compare equal to the current ones.
    pub fn set_values(&self, values: Vec<T>) -> bool {
        {
            let mut state = self.state.borrow_mut();
            if state.values == values {
                return false;
            }
            state.values = values;
        }
        self.invalidate();
        true
    }

    /// Discards the snapshot and schedules a fresh measurement.
    pub fn invalidate(&self) {
        {
            let mut state = self.state.borrow_mut();
            state.snapshot = MeasurementSnapshot::default();
            state.passes = 0;
            log::debug!(
                "measurement invalidated for {} candidates",
                state.values.len()
            );
        }
        schedule_pass(&self.state, &self.clock, &self.host);
    }

    /// Returns the snapshot, running a pass right away if it is not complete.
    ///
    /// On failure another pass is scheduled for the next frame.
    pub fn ensure_measured(&self) -> Result<MeasurementSnapshot, MeasureError> {
        if let Some(snapshot) = self.complete_snapshot() {
            return Ok(snapshot);
        }
        match run_pass(&self.state, &*self.host) {
            Ok(()) => {
                // Nothing left for the queued pass to do.
                let pending = self.state.borrow_mut().pending.take();
                drop(pending);
                Ok(self.snapshot())
            }
            Err(err) => {
                schedule_pass(&self.state, &self.clock, &self.host);
                Err(err)
            }
        }
    }

    pub fn snapshot(&self) -> MeasurementSnapshot {
        self.state.borrow().snapshot.clone()
    }

    pub fn is_complete(&self) -> bool {
        self.state.borrow().snapshot.is_complete()
    }

    /// True while a pass is waiting for the next frame.
    pub fn is_pending(&self) -> bool {
        self.state.borrow().pending.is_some()
    }

    pub fn candidate_count(&self) -> usize {
        self.state.borrow().values.len()
    }

    /// Passes attempted since the last invalidation.
    pub fn passes(&self) -> u32 {
        self.state.borrow().passes
    }

    fn complete_snapshot(&self) -> Option<MeasurementSnapshot> {
        let state = self.state.borrow();
        state
            .snapshot
            .is_complete()
            .then(|| state.snapshot.clone())
    }
}

fn schedule_pass<T: PartialEq + Clone + 'static>(
    state: &Rc<RefCell<CoordinatorState<T>>>,
    clock: &FrameClock,
    host: &Rc<dyn LayoutHost<T>>,
) {
    clock.runtime_handle().assert_ui_thread();
    {
        let state = state.borrow();
        if state.pending.is_some() || state.snapshot.is_complete() {
            return;
        }
    }

    let weak: Weak<RefCell<CoordinatorState<T>>> = Rc::downgrade(state);
    let next_clock = clock.clone();
    let next_host = host.clone();
    let registration = clock.with_frame_nanos(move |_| {
        let Some(state) = weak.upgrade() else {
            log::trace!("popup dropped before its measurement frame");
            return;
        };
        // This registration has fired; clear it so a retry can take its place.
        state.borrow_mut().pending = None;
        if run_pass(&state, &*next_host).is_err() {
            schedule_pass(&state, &next_clock, &next_host);
        }
    });

    if registration.is_active() {
        state.borrow_mut().pending = Some(registration);
    } else {
        log::debug!("frame runtime is gone; measurement stays incomplete");
    }
}

fn run_pass<T: Clone>(
    state: &RefCell<CoordinatorState<T>>,
    host: &dyn LayoutHost<T>,
) -> Result<(), MeasureError> {
    // Hosts have no handle back to the coordinator; values stay fixed for the whole pass.
    let (values, pass) = {
        let mut state = state.borrow_mut();
        state.passes += 1;
        if state.values.is_empty() {
            state.snapshot.row_heights = Some(RowHeights::new());
            return Ok(());
        }
        (state.values.clone(), state.passes)
    };

    let result = measure_all(&values, host);
    let mut state = state.borrow_mut();
    match result {
        Ok((anchor_width, row_heights)) => {
            log::debug!(
                "measured {} rows at anchor width {anchor_width:.1} in pass {pass}",
                row_heights.len()
            );
            state.snapshot = MeasurementSnapshot {
                anchor_width: Some(anchor_width),
                row_heights: Some(row_heights),
            };
            Ok(())
        }
        Err((anchor_width, err)) => {
            log::debug!("measurement pass {pass} incomplete: {err}; retrying next frame");
            state.snapshot.anchor_width = anchor_width;
            Err(err)
        }
    }
}

fn measure_all<T>(
    values: &[T],
    host: &dyn LayoutHost<T>,
) -> Result<(f32, RowHeights), (Option<f32>, MeasureError)> {
    let anchor = host
        .anchor_geometry()
        .ok_or((None, MeasureError::GeometryUnavailable))?;
    let width = anchor.width();

    let mut heights = RowHeights::with_capacity(values.len());
    for (index, value) in values.iter().enumerate() {
        let size = host
            .measure_row(index, value, width)
            .ok_or((Some(width), MeasureError::MeasurementIncomplete { index }))?;
        heights.push(size.height);
    }
    Ok((width, heights))
}

#[cfg(test)]
#[path = "tests/measure_tests.rs"]
mod tests;

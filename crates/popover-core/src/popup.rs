//! Open/close lifecycle of an anchored popup.
//!
//! A [`Popup`] is either [`BuildPhase::Dismissed`] or [`BuildPhase::Built`].
//! Only the Dismissed to Built edge measures, places and clamps; every other
//! request either hides the popup or does nothing.

use std::rc::Rc;

use popover_geometry::{Point, Size};
use popover_layout::{
    clamp_to_viewport, resolve_height, resolve_placement_with_margin, InvalidHeightSpec,
};
use popover_runtime::FrameClock;

use crate::config::{ConfigError, PopupConfig, PopupSpec};
use crate::host::{DisplayLayer, FocusHandle, LayoutHost, PopupGeometry, RowDescriptor};
use crate::measure::{MeasureError, MeasurementCoordinator, MeasurementSnapshot};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BuildPhase {
    #[default]
    Dismissed,
    Built,
}

/// Result of [`Popup::open`].
#[derive(Clone, Debug, PartialEq)]
pub enum OpenOutcome {
    /// The popup is now shown with this geometry.
    Opened(PopupGeometry),
    AlreadyOpen,
    /// There is nothing to list; the popup stays dismissed.
    NoCandidates,
    /// The rows, the anchor or the viewport are not available yet. A frame
    /// retry is queued only while the measurement itself is incomplete; a
    /// missing anchor or viewport on an already measured popup queues nothing,
    /// so the caller opens again once the host has laid it out.
    MeasurementPending(MeasureError),
    /// The height cap could not be applied to the measured rows.
    Rejected(InvalidHeightSpec),
}

impl OpenOutcome {
    pub fn is_opened(&self) -> bool {
        matches!(self, OpenOutcome::Opened(_))
    }
}

/// Result of [`Popup::close`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseOutcome {
    Closed,
    AlreadyClosed,
}

/// Result of [`Popup::toggle`], tagged with the request it dispatched to.
#[derive(Clone, Debug, PartialEq)]
pub enum ToggleOutcome {
    Open(OpenOutcome),
    Close(CloseOutcome),
}

enum OpenError {
    Measure(MeasureError),
    Height(InvalidHeightSpec),
}

impl From<MeasureError> for OpenError {
    fn from(err: MeasureError) -> Self {
        OpenError::Measure(err)
    }
}

impl From<InvalidHeightSpec> for OpenError {
    fn from(err: InvalidHeightSpec) -> Self {
        OpenError::Height(err)
    }
}

type VisibilityObserver = Box<dyn FnMut(bool)>;

/// One popup instance anchored to one host element.
pub struct Popup<T> {
    config: PopupConfig,
    phase: BuildPhase,
    host: Rc<dyn LayoutHost<T>>,
    coordinator: MeasurementCoordinator<T>,
    display: Box<dyn DisplayLayer>,
    focus: Option<Box<dyn FocusHandle>>,
    on_visibility_changed: Option<VisibilityObserver>,
    geometry: Option<PopupGeometry>,
}

impl<T: PartialEq + Clone + 'static> Popup<T> {
    /// Creates a dismissed popup. Measurement of `values` starts on the next frame.
    pub fn new(
        config: PopupConfig,
        values: Vec<T>,
        host: Rc<dyn LayoutHost<T>>,
        display: Box<dyn DisplayLayer>,
        clock: FrameClock,
    ) -> Self {
        let coordinator = MeasurementCoordinator::new(values, host.clone(), clock);
        Self {
            config,
            phase: BuildPhase::Dismissed,
            host,
            coordinator,
            display,
            focus: None,
            on_visibility_changed: None,
            geometry: None,
        }
    }

    /// Validates `spec` and creates a dismissed popup from it.
    pub fn from_spec(
        spec: &PopupSpec,
        values: Vec<T>,
        host: Rc<dyn LayoutHost<T>>,
        display: Box<dyn DisplayLayer>,
        clock: FrameClock,
    ) -> Result<Self, ConfigError> {
        let config = spec.build()?;
        Ok(Self::new(config, values, host, display, clock))
    }

    /// Focus to clear on close. Only used with [`crate::TriggerMode::Focus`].
    pub fn with_focus(mut self, focus: Box<dyn FocusHandle>) -> Self {
        self.focus = Some(focus);
        self
    }

    pub fn on_visibility_changed(mut self, observer: impl FnMut(bool) + 'static) -> Self {
        self.on_visibility_changed = Some(Box::new(observer));
        self
    }

    pub fn open(&mut self) -> OpenOutcome {
        if self.phase == BuildPhase::Built {
            log::trace!("open ignored: popup already built");
            return OpenOutcome::AlreadyOpen;
        }
        if self.coordinator.candidate_count() == 0 {
            log::trace!("open ignored: no candidates");
            return OpenOutcome::NoCandidates;
        }

        match self.resolve_geometry() {
            Ok(geometry) => {
                self.display.show(&geometry);
                self.phase = BuildPhase::Built;
                self.geometry = Some(geometry.clone());
                log::debug!(
                    "popup built at ({:.1}, {:.1}) size {:.1}x{:.1}{}",
                    geometry.origin.x,
                    geometry.origin.y,
                    geometry.size.width,
                    geometry.size.height,
                    if geometry.is_y_inverted { ", inverted" } else { "" }
                );
                self.notify(true);
                OpenOutcome::Opened(geometry)
            }
            Err(OpenError::Measure(err)) => {
                log::debug!("open deferred: {err}");
                OpenOutcome::MeasurementPending(err)
            }
            Err(OpenError::Height(err)) => {
                log::warn!("open rejected: {err}");
                OpenOutcome::Rejected(err)
            }
        }
    }

    pub fn close(&mut self) -> CloseOutcome {
        if self.phase == BuildPhase::Dismissed {
            return CloseOutcome::AlreadyClosed;
        }

        self.display.hide();
        if self.config.trigger().supports_focus() {
            if let Some(focus) = self.focus.as_mut() {
                focus.clear_focus();
            }
        }
        self.phase = BuildPhase::Dismissed;
        self.geometry = None;
        log::debug!("popup dismissed");
        self.notify(false);
        CloseOutcome::Closed
    }

    /// Closes a built popup, opens a dismissed one.
    pub fn toggle(&mut self) -> ToggleOutcome {
        match self.phase {
            BuildPhase::Built => ToggleOutcome::Close(self.close()),
            BuildPhase::Dismissed => ToggleOutcome::Open(self.open()),
        }
    }

    /// A tap landed outside the popup. Returns true if that closed it.
    pub fn on_barrier_tap(&mut self) -> bool {
        if !self.config.barrier_dismissible() {
            return false;
        }
        self.close() == CloseOutcome::Closed
    }

    /// Replaces the candidate values. A popup that is already shown keeps its
    /// geometry; the new values take effect on the next open.
    pub fn set_values(&mut self, values: Vec<T>) -> bool {
        self.coordinator.set_values(values)
    }

    /// Forces remeasurement, e.g. after the host's fonts or row layout changed.
    pub fn invalidate_measurement(&mut self) {
        self.coordinator.invalidate();
    }

    pub fn phase(&self) -> BuildPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase == BuildPhase::Built
    }

    /// Geometry of the shown popup, `None` while dismissed.
    pub fn geometry(&self) -> Option<&PopupGeometry> {
        self.geometry.as_ref()
    }

    pub fn config(&self) -> &PopupConfig {
        &self.config
    }

    pub fn measurement(&self) -> MeasurementSnapshot {
        self.coordinator.snapshot()
    }

    pub fn coordinator(&self) -> &MeasurementCoordinator<T> {
        &self.coordinator
    }

    fn resolve_geometry(&self) -> Result<PopupGeometry, OpenError> {
        let snapshot = self.coordinator.ensure_measured()?;
        let (Some(anchor_width), Some(row_heights)) = (snapshot.anchor_width, snapshot.row_heights)
        else {
            return Err(MeasureError::GeometryUnavailable.into());
        };
        let anchor = self
            .host
            .anchor_geometry()
            .ok_or(MeasureError::GeometryUnavailable)?;
        let viewport = self
            .host
            .viewport_size()
            .ok_or(MeasureError::GeometryUnavailable)?;

        let resolution = resolve_height(&row_heights, self.config.height())?;
        let size = Size::new(anchor_width, resolution.height);
        let placement = resolve_placement_with_margin(
            self.config.alignment(),
            &anchor,
            size,
            viewport.height,
            self.config.invert_on_overflow(),
            self.config.margin(),
        );
        let top = placement.absolute_origin(&anchor).y;
        let clamp = clamp_to_viewport(top, size.height, viewport.height);
        if clamp.is_adjusted(size.height) {
            log::trace!(
                "clamped popup: top {top:.1} moved by {:.1}, height {:.1} -> {:.1}",
                clamp.top_adjustment,
                size.height,
                clamp.clamped_height
            );
        }

        let offset = Point::new(placement.offset.x, placement.offset.y + clamp.top_adjustment);
        let rows = resolution
            .row_heights
            .iter()
            .enumerate()
            .map(|(index, &height)| RowDescriptor { index, height })
            .collect();

        Ok(PopupGeometry {
            offset,
            origin: anchor.position + offset,
            size: size.with_height(clamp.clamped_height),
            rows,
            is_y_inverted: placement.is_y_inverted,
            barrier_dismissible: self.config.barrier_dismissible(),
        })
    }

    fn notify(&mut self, visible: bool) {
        if let Some(observer) = self.on_visibility_changed.as_mut() {
            observer(visible);
        }
    }
}

impl<T> Drop for Popup<T> {
    fn drop(&mut self) {
        if self.phase == BuildPhase::Built {
            self.display.hide();
        }
    }
}

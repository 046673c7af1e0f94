//! Recording collaborators and a scripted layout host.
//!
//! Every collaborator pushes into one shared [`EventLog`], so tests can assert
//! on the relative order of display, focus and visibility calls.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use popover_core::{DisplayLayer, FocusHandle, LayoutHost, PopupGeometry};
use popover_geometry::{AnchorGeometry, Point, Size};

/// A side effect observed by a test collaborator.
#[derive(Clone, Debug, PartialEq)]
pub enum PopupEvent {
    Show(PopupGeometry),
    Hide,
    ClearFocus,
    Visibility(bool),
}

/// Shared, ordered record of [`PopupEvent`]s.
#[derive(Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<PopupEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: PopupEvent) {
        self.events.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<PopupEvent> {
        self.events.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    /// Number of `Show` events recorded so far.
    pub fn show_count(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| matches!(event, PopupEvent::Show(_)))
            .count()
    }

    /// Geometry passed to the most recent `Show`.
    pub fn last_shown(&self) -> Option<PopupGeometry> {
        self.events.borrow().iter().rev().find_map(|event| match event {
            PopupEvent::Show(geometry) => Some(geometry.clone()),
            _ => None,
        })
    }

    /// Returns a visibility observer that records into this log.
    pub fn visibility_observer(&self) -> impl FnMut(bool) + 'static {
        let log = self.clone();
        move |visible| log.push(PopupEvent::Visibility(visible))
    }
}

pub struct RecordingDisplay {
    log: EventLog,
}

impl RecordingDisplay {
    pub fn new(log: EventLog) -> Self {
        Self { log }
    }
}

impl DisplayLayer for RecordingDisplay {
    fn show(&mut self, geometry: &PopupGeometry) {
        self.log.push(PopupEvent::Show(geometry.clone()));
    }

    fn hide(&mut self) {
        self.log.push(PopupEvent::Hide);
    }
}

pub struct RecordingFocus {
    log: EventLog,
}

impl RecordingFocus {
    pub fn new(log: EventLog) -> Self {
        Self { log }
    }
}

impl FocusHandle for RecordingFocus {
    fn clear_focus(&mut self) {
        self.log.push(PopupEvent::ClearFocus);
    }
}

/// Layout host whose geometry is set by the test.
///
/// Row `i` measures to the `i`-th configured height, falling back to the
/// default row height once the list runs out. Nothing is measurable until an
/// anchor has been placed.
pub struct ScriptedLayoutHost {
    anchor: Cell<Option<AnchorGeometry>>,
    viewport: Cell<Option<Size>>,
    row_heights: RefCell<Vec<f32>>,
    /// Row indices at or past this one report no size.
    measurable_rows: Cell<usize>,
    measure_calls: Cell<usize>,
}

impl ScriptedLayoutHost {
    pub const DEFAULT_ROW_HEIGHT: f32 = 40.0;

    /// A host that has not run its first layout pass yet.
    pub fn unlaid(viewport: Size) -> Self {
        Self {
            anchor: Cell::new(None),
            viewport: Cell::new(Some(viewport)),
            row_heights: RefCell::new(Vec::new()),
            measurable_rows: Cell::new(usize::MAX),
            measure_calls: Cell::new(0),
        }
    }

    pub fn laid_out(anchor: AnchorGeometry, viewport: Size) -> Self {
        let host = Self::unlaid(viewport);
        host.set_anchor(Some(anchor));
        host
    }

    pub fn with_row_heights(self, heights: impl Into<Vec<f32>>) -> Self {
        self.set_row_heights(heights);
        self
    }

    pub fn set_anchor(&self, anchor: Option<AnchorGeometry>) {
        self.anchor.set(anchor);
    }

    /// Moves the anchor, keeping its size. Does nothing before the first layout.
    pub fn move_anchor(&self, position: Point) {
        if let Some(anchor) = self.anchor.get() {
            self.anchor.set(Some(AnchorGeometry::new(position, anchor.size)));
        }
    }

    pub fn set_viewport(&self, viewport: Option<Size>) {
        self.viewport.set(viewport);
    }

    pub fn set_row_heights(&self, heights: impl Into<Vec<f32>>) {
        *self.row_heights.borrow_mut() = heights.into();
    }

    /// Makes rows from `count` onwards unmeasurable until reset with `usize::MAX`.
    pub fn limit_measurable_rows(&self, count: usize) {
        self.measurable_rows.set(count);
    }

    /// Number of rows measured successfully so far.
    pub fn measure_calls(&self) -> usize {
        self.measure_calls.get()
    }
}

impl<T> LayoutHost<T> for ScriptedLayoutHost {
    fn anchor_geometry(&self) -> Option<AnchorGeometry> {
        self.anchor.get()
    }

    fn viewport_size(&self) -> Option<Size> {
        self.viewport.get()
    }

    fn measure_row(&self, index: usize, _value: &T, max_width: f32) -> Option<Size> {
        self.anchor.get()?;
        if index >= self.measurable_rows.get() {
            return None;
        }
        let height = self
            .row_heights
            .borrow()
            .get(index)
            .copied()
            .unwrap_or(Self::DEFAULT_ROW_HEIGHT);
        self.measure_calls.set(self.measure_calls.get() + 1);
        Some(Size::new(max_width, height))
    }
}

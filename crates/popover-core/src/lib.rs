//! Measurement coordination and open/close lifecycle for anchored popups
//!
//! [`Popup`] ties the pieces together: a [`MeasurementCoordinator`] sizes the
//! rows offstage over one or more frames, and each open resolves height,
//! placement and viewport clamping before handing the result to the host's
//! [`DisplayLayer`].

mod config;
mod host;
mod measure;
mod popup;

pub use config::*;
pub use host::*;
pub use measure::*;
pub use popup::*;

pub mod prelude {
    pub use crate::config::{PopupConfig, PopupSpec, TriggerMode};
    pub use crate::host::{DisplayLayer, FocusHandle, LayoutHost, PopupGeometry, RowDescriptor};
    pub use crate::popup::{BuildPhase, CloseOutcome, OpenOutcome, Popup, ToggleOutcome};
    pub use popover_layout::BiasAlignment;
}

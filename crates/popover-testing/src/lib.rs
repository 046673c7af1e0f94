//! Testing utilities and scenario harness for popover

pub mod assertions;
pub mod harness;
pub mod recording;

pub use harness::*;
pub use recording::*;

pub mod prelude {
    pub use crate::assertions;
    pub use crate::harness::PopupHarness;
    pub use crate::recording::{
        EventLog, PopupEvent, RecordingDisplay, RecordingFocus, ScriptedLayoutHost,
    };
}

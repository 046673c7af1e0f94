//! Single-threaded frame callback runtime for popup measurement
//!
//! Work that must wait for the host's next layout pass registers a one-shot
//! frame callback through a [`FrameClock`]. The host drives the runtime by
//! calling [`Runtime::drain_frame_callbacks`] once per rendered frame.

mod frame_clock;
mod platform;
mod runtime;

pub use frame_clock::*;
pub use platform::*;
pub use runtime::*;

pub(crate) type FrameCallbackId = u64;

pub mod prelude {
    pub use crate::frame_clock::{FrameCallbackRegistration, FrameClock};
    pub use crate::platform::RuntimeScheduler;
    pub use crate::runtime::{Runtime, RuntimeHandle};
}

//! Host hooks for the frame runtime.

/// Lets the runtime ask the host for another frame.
///
/// Called whenever a frame callback is registered, so a host that renders
/// on demand knows a continuation is waiting.
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}

/// Scheduler for hosts that render continuously and need no wake-up.
#[derive(Default)]
pub struct DefaultScheduler;

impl RuntimeScheduler for DefaultScheduler {
    fn schedule_frame(&self) {}
}

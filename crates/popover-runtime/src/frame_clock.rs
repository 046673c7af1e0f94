use crate::runtime::RuntimeHandle;
use crate::FrameCallbackId;

/// Schedules one-shot callbacks against the next frame of a runtime.
#[derive(Clone)]
pub struct FrameClock {
    runtime: RuntimeHandle,
}

impl FrameClock {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self { runtime }
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.clone()
    }

    /// Runs `callback` with the frame time at the next drain.
    ///
    /// The returned registration cancels the callback when dropped, so keep it
    /// alive for as long as the callback should stay pending. If the runtime is
    /// already gone the registration is inactive and the callback never runs.
    pub fn with_frame_nanos(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        let id = self.runtime.register_frame_callback(callback);
        FrameCallbackRegistration {
            runtime: self.runtime.clone(),
            id,
        }
    }
}

/// Keeps a frame callback queued. Ids are never reused, so releasing one that
/// already ran is a no-op.
pub struct FrameCallbackRegistration {
    runtime: RuntimeHandle,
    id: Option<FrameCallbackId>,
}

impl FrameCallbackRegistration {
    /// False if the runtime was gone when the callback was registered.
    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }

    /// Removes the callback from the queue now rather than at drop.
    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_frame_callback(id);
        }
    }
}

impl Drop for FrameCallbackRegistration {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for FrameCallbackRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameCallbackRegistration")
            .field("id", &self.id)
            .finish()
    }
}

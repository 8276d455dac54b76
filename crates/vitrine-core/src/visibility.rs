use tracing::debug;
use vitrine_platform::{FrameHandle, FrameScheduler};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Idle,
    /// Loop running; the handle is the one pending frame.
    Active(FrameHandle),
}

/// Runs a per-frame loop only while the observed region intersects the
/// viewport. Holds at most one pending frame handle.
#[derive(Debug)]
pub struct VisibilityGate {
    state: GateState,
}

impl VisibilityGate {
    pub fn new() -> Self {
        Self {
            state: GateState::Idle,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, GateState::Active(_))
    }

    /// Apply an intersection signal. Returns whether the state changed.
    pub fn on_intersection(&mut self, intersecting: bool, frames: &mut dyn FrameScheduler) -> bool {
        match (self.state, intersecting) {
            (GateState::Idle, true) => {
                let handle = frames.request_frame();
                debug!("visibility gate: idle -> active ({handle:?})");
                self.state = GateState::Active(handle);
                true
            }
            (GateState::Active(handle), false) => {
                frames.cancel_frame(handle);
                debug!("visibility gate: active -> idle (cancelled {handle:?})");
                self.state = GateState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Called when a frame fires. Returns true when the loop body should run,
    /// in which case the next frame is already requested. Stale handles are
    /// ignored.
    pub fn on_frame(&mut self, fired: FrameHandle, frames: &mut dyn FrameScheduler) -> bool {
        match self.state {
            GateState::Active(pending) if pending == fired => {
                self.state = GateState::Active(frames.request_frame());
                true
            }
            _ => false,
        }
    }

    /// Teardown: release any pending frame.
    pub fn stop(&mut self, frames: &mut dyn FrameScheduler) {
        self.on_intersection(false, frames);
    }
}

impl Default for VisibilityGate {
    fn default() -> Self {
        Self::new()
    }
}

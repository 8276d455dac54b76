//! Deterministic headless host for Vitrine.
//!
//! Implements every capability trait from `vitrine-platform` in memory: a
//! manually advanced clock, explicit frame delivery, a document tree built by
//! the caller, an animator that records what it was asked to play, a lerping
//! smooth-scroll emulator and a scripted input queue.
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use tracing::debug;
use vitrine_platform::{Clock, FrameHandle, FrameScheduler, Platform, Services, SmoothScroll};

mod animator;
mod document;
mod input;

pub use animator::{PlayedSequence, RecordingAnimator};
pub use document::MemoryDocument;
pub use input::ScriptedInput;

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    pub fn set(&self, at: Duration) {
        self.now.set(at);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Frame scheduler that hands out handles and lets the driver fire them.
#[derive(Debug, Default)]
pub struct ManualFrames {
    next_handle: u64,
    pending: Vec<FrameHandle>,
    cancelled: u64,
}

impl ManualFrames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return every handle due this frame.
    pub fn take_pending(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn cancelled_count(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for ManualFrames {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_handle += 1;
        let handle = FrameHandle(self.next_handle);
        self.pending.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let before = self.pending.len();
        self.pending.retain(|pending| *pending != handle);
        if self.pending.len() != before {
            self.cancelled += 1;
        }
    }
}

/// Smooth-scroll emulator: eases the current offset toward a target each tick.
#[derive(Debug)]
pub struct EmulatedScroll {
    current: f32,
    target: f32,
    lerp: f32,
    running: bool,
}

impl EmulatedScroll {
    pub fn new(lerp: f32) -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            lerp: lerp.clamp(0.01, 1.0),
            running: false,
        }
    }

    pub fn position(&self) -> f32 {
        self.current
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl Default for EmulatedScroll {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl SmoothScroll for EmulatedScroll {
    fn start(&mut self) {
        self.running = true;
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn raf(&mut self, _now: Duration) -> Option<f32> {
        if !self.running || self.current == self.target {
            return None;
        }
        let delta = self.target - self.current;
        if delta.abs() < 0.5 {
            self.current = self.target;
        } else {
            self.current += delta * self.lerp;
        }
        Some(self.current)
    }

    fn scroll_to(&mut self, y: f32) {
        debug!("smooth scroll target {} -> {}", self.target, y);
        self.target = y.max(0.0);
    }
}

/// The full headless host.
pub struct HeadlessPlatform {
    pub clock: Rc<ManualClock>,
    pub document: MemoryDocument,
    pub animator: RecordingAnimator,
    pub frames: ManualFrames,
    pub scroll: EmulatedScroll,
}

impl HeadlessPlatform {
    pub fn new(document: MemoryDocument) -> Self {
        let clock = Rc::new(ManualClock::new());
        Self {
            animator: RecordingAnimator::new(Rc::clone(&clock)),
            clock,
            document,
            frames: ManualFrames::new(),
            scroll: EmulatedScroll::default(),
        }
    }
}

impl Platform for HeadlessPlatform {
    fn services(&mut self) -> Services<'_> {
        Services {
            clock: &*self.clock,
            document: &mut self.document,
            animator: &mut self.animator,
            frames: &mut self.frames,
            scroll: &mut self.scroll,
        }
    }
}

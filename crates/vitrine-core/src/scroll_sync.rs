use tracing::info;
use vitrine_platform::{Animator, Clock, SmoothScroll};

/// Drives the smooth-scroll emulator from the animation ticker and feeds its
/// offset back to the scroll-linked triggers.
#[derive(Debug, Default)]
pub struct ScrollSync {
    running: bool,
    offset: f32,
}

impl ScrollSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, scroll: &mut dyn SmoothScroll) {
        if self.running {
            return;
        }
        info!("smooth scroll sync started");
        scroll.start();
        self.running = true;
    }

    pub fn stop(&mut self, scroll: &mut dyn SmoothScroll) {
        if self.running {
            scroll.stop();
            self.running = false;
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// One ticker step. Returns the new offset when it moved.
    pub fn tick(
        &mut self,
        clock: &dyn Clock,
        scroll: &mut dyn SmoothScroll,
        animator: &mut dyn Animator,
    ) -> Option<f32> {
        if !self.running {
            return None;
        }
        let offset = scroll.raf(clock.now())?;
        self.offset = offset;
        animator.update_scroll(offset);
        Some(offset)
    }
}

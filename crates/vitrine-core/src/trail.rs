//! Continuous image trail: stamps the next pool image whenever the pointer
//! has travelled far enough since the last stamp.

use glam::Vec2;
use tracing::{debug, info};
use vitrine_platform::{
    Animator, Document, ElementId, Ease, FrameHandle, FrameScheduler, PointerEvent, Props,
    Sequence, Services, Tween,
};

use crate::config::TrailConfig;
use crate::geometry;
use crate::pointer::PointerTracker;
use crate::pool::ImagePool;
use crate::visibility::VisibilityGate;

/// One placed image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stamp {
    pub image: ElementId,
    pub index: usize,
    pub position: Vec2,
    pub rotation: f32,
    pub z_index: u32,
}

/// Uniform rotation in `[-max, max]` degrees.
pub(crate) fn random_rotation(rng: &mut fastrand::Rng, max_deg: f32) -> f32 {
    (rng.f32() * 2.0 - 1.0) * max_deg
}

pub struct TrailRenderer {
    tracker: PointerTracker,
    pool: ImagePool,
    gate: VisibilityGate,
    last_stamp: Vec2,
    config: TrailConfig,
    rng: fastrand::Rng,
    stamps: u64,
}

impl TrailRenderer {
    pub fn new(container: ElementId, pool: ImagePool, config: TrailConfig, rng: fastrand::Rng) -> Self {
        Self {
            tracker: PointerTracker::new(container),
            pool,
            gate: VisibilityGate::new(),
            last_stamp: Vec2::ZERO,
            config,
            rng,
            stamps: 0,
        }
    }

    pub fn on_pointer_move(&mut self, event: &PointerEvent, document: &dyn Document) {
        self.tracker.track(event, document);
    }

    pub fn on_intersection(&mut self, intersecting: bool, frames: &mut dyn FrameScheduler) {
        if self.gate.on_intersection(intersecting, frames) {
            info!(
                "image trail {}",
                if intersecting { "started" } else { "paused" }
            );
        }
    }

    /// Frame callback. Runs the distance check only for the gate's current
    /// frame.
    pub fn on_frame(&mut self, fired: FrameHandle, svc: &mut Services<'_>) -> Option<Stamp> {
        if !self.gate.on_frame(fired, svc.frames) {
            return None;
        }
        self.check(svc.animator)
    }

    /// Stamp if the pointer moved past the threshold since the last stamp.
    pub fn check(&mut self, animator: &mut dyn Animator) -> Option<Stamp> {
        let current = self.tracker.position();
        if geometry::distance(current, self.last_stamp) <= self.config.threshold_px {
            return None;
        }
        let stamp = self.stamp(current, animator)?;
        self.last_stamp = current;
        Some(stamp)
    }

    fn stamp(&mut self, position: Vec2, animator: &mut dyn Animator) -> Option<Stamp> {
        let slot = self.pool.next_slot()?;
        let rotation = random_rotation(&mut self.rng, self.config.max_rotation_deg);
        let stamp = Stamp {
            image: slot.image,
            index: slot.index,
            position,
            rotation,
            z_index: slot.z_index,
        };

        animator.set(
            &[stamp.image],
            &Props::new()
                .x(position.x)
                .y(position.y)
                .x_percent(-50.0)
                .y_percent(-50.0)
                .rotation(rotation)
                .z_index(stamp.z_index)
                .scale(self.config.start_scale)
                .opacity(0.0)
                .visible(true),
        );
        animator.play(self.sequence_for(stamp.image));

        self.stamps += 1;
        debug!(
            "trail stamp #{} image {} at ({:.0}, {:.0}) rot {:.1}",
            self.stamps, stamp.index, position.x, position.y, rotation
        );
        Some(stamp)
    }

    fn sequence_for(&self, image: ElementId) -> Sequence {
        Sequence::new()
            .then(
                Tween::to(image, Props::new().opacity(1.0).scale(1.0))
                    .duration_ms(self.config.fade_in_ms)
                    .ease(Ease::Power2Out),
            )
            .then(
                Tween::to(image, Props::new().opacity(0.0).scale(self.config.start_scale))
                    .duration_ms(self.config.fade_out_ms)
                    .delay_ms(self.config.hold_ms)
                    .ease(Ease::Power3Out),
            )
    }

    pub fn stop(&mut self, frames: &mut dyn FrameScheduler) {
        self.gate.stop(frames);
    }

    pub fn pool(&self) -> &ImagePool {
        &self.pool
    }

    pub fn gate(&self) -> &VisibilityGate {
        &self.gate
    }

    pub fn last_stamp(&self) -> Vec2 {
        self.last_stamp
    }

    pub fn pointer(&self) -> Vec2 {
        self.tracker.position()
    }

    pub fn stamp_count(&self) -> u64 {
        self.stamps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_headless::{HeadlessPlatform, MemoryDocument};
    use vitrine_platform::{Platform, Rect};

    struct Fixture {
        platform: HeadlessPlatform,
        trail: TrailRenderer,
        images: Vec<ElementId>,
    }

    fn fixture(pool_size: usize) -> Fixture {
        let mut doc = MemoryDocument::new();
        let container = doc.add_with_bounds(".image-trail", Rect::new(0.0, 0.0, 1000.0, 800.0));
        let images: Vec<ElementId> = (0..pool_size).map(|_| doc.add(".image-trail img")).collect();
        let trail = TrailRenderer::new(
            container,
            ImagePool::new(images.clone()),
            TrailConfig::default(),
            fastrand::Rng::with_seed(42),
        );
        Fixture {
            platform: HeadlessPlatform::new(doc),
            trail,
            images,
        }
    }

    impl Fixture {
        fn move_to(&mut self, x: f32, y: f32) {
            self.trail
                .on_pointer_move(&PointerEvent::mouse(x, y), &self.platform.document);
        }

        fn set_visible(&mut self, visible: bool) {
            self.trail.on_intersection(visible, &mut self.platform.frames);
        }

        /// Deliver every pending frame once.
        fn pump(&mut self) -> Vec<Stamp> {
            let pending = self.platform.frames.take_pending();
            let mut svc = self.platform.services();
            pending
                .into_iter()
                .filter_map(|handle| self.trail.on_frame(handle, &mut svc))
                .collect()
        }
    }

    #[test]
    fn threshold_scenario_from_rest() {
        let mut fx = fixture(3);
        fx.set_visible(true);

        fx.move_to(0.0, 100.0);
        let stamps = fx.pump();
        assert_eq!(stamps.len(), 1);
        assert_eq!(stamps[0].index, 0);
        assert_eq!(stamps[0].image, fx.images[0]);
        assert_eq!(stamps[0].position, Vec2::new(0.0, 100.0));
        assert_eq!(fx.trail.pool().cursor(), 1);

        fx.move_to(0.0, 150.0);
        assert!(fx.pump().is_empty());
        assert_eq!(fx.trail.pool().cursor(), 1);

        fx.move_to(0.0, 250.0);
        let stamps = fx.pump();
        assert_eq!(stamps.len(), 1);
        assert_eq!(stamps[0].index, 1);
        assert_eq!(fx.trail.pool().cursor(), 2);
        assert_eq!(fx.trail.last_stamp(), Vec2::new(0.0, 250.0));
    }

    #[test]
    fn exactly_threshold_does_not_stamp() {
        let mut fx = fixture(2);
        fx.set_visible(true);
        fx.move_to(80.0, 0.0);
        assert!(fx.pump().is_empty());
        fx.move_to(80.5, 0.0);
        assert_eq!(fx.pump().len(), 1);
    }

    #[test]
    fn one_stamp_per_frame_even_after_long_travel() {
        let mut fx = fixture(3);
        fx.set_visible(true);
        fx.move_to(0.0, 900.0);
        assert_eq!(fx.pump().len(), 1);
        // pointer rests; baseline caught up
        assert!(fx.pump().is_empty());
    }

    #[test]
    fn cursor_returns_after_pool_len_stamps() {
        let mut fx = fixture(3);
        fx.set_visible(true);
        let mut indices = Vec::new();
        for step in 1..=3 {
            fx.move_to(0.0, step as f32 * 100.0);
            indices.extend(fx.pump().iter().map(|s| s.index));
        }
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(fx.trail.pool().cursor(), 0);
        assert_eq!(fx.trail.stamp_count(), 3);
    }

    #[test]
    fn hidden_hero_stops_stamping_and_resumes() {
        let mut fx = fixture(3);
        fx.set_visible(true);
        fx.set_visible(false);
        fx.move_to(0.0, 500.0);
        assert!(fx.pump().is_empty());
        assert_eq!(fx.trail.stamp_count(), 0);

        fx.set_visible(true);
        assert_eq!(fx.pump().len(), 1);
    }

    #[test]
    fn stamp_sets_rotation_within_range_and_raises_z() {
        let mut fx = fixture(2);
        fx.set_visible(true);
        let mut last_z = 0;
        for step in 1..=6 {
            fx.move_to(step as f32 * 100.0, 0.0);
            for stamp in fx.pump() {
                assert!(stamp.rotation.abs() <= 15.0);
                assert!(stamp.z_index > last_z);
                last_z = stamp.z_index;
                let props = fx.platform.animator.resolved(stamp.image);
                assert_eq!(props.z_index, Some(stamp.z_index));
                assert_eq!(props.rotation, Some(stamp.rotation));
            }
        }
        assert_eq!(fx.platform.animator.played().len(), 6);
    }

    #[test]
    fn stamp_sequence_fades_in_then_out() {
        let mut fx = fixture(1);
        fx.set_visible(true);
        fx.move_to(200.0, 0.0);
        fx.pump();
        let played = &fx.platform.animator.played()[0];
        let steps = played.sequence.steps();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].tween.to.opacity, Some(1.0));
        assert_eq!(steps[1].tween.to.opacity, Some(0.0));
        assert_eq!(played.sequence.duration().as_millis(), 400 + 600 + 800);
    }

    #[test]
    fn empty_pool_skips_silently() {
        let mut fx = fixture(0);
        fx.set_visible(true);
        fx.move_to(0.0, 300.0);
        assert!(fx.pump().is_empty());
        assert_eq!(fx.trail.last_stamp(), Vec2::ZERO);
        assert!(fx.platform.animator.played().is_empty());
    }
}

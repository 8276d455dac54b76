//! Discrete variant of the trail: one image per accepted tap or click.

use std::time::Duration;

use tracing::debug;
use vitrine_platform::{ElementId, Ease, PointerEvent, PointerKind, Props, Sequence, Services, Tween};

use crate::config::TapConfig;
use crate::pointer::PointerTracker;
use crate::pool::ImagePool;
use crate::trail::{random_rotation, Stamp};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TapOutcome {
    Stamped(Stamp),
    /// Within the cooldown of the previous accepted tap.
    Cooldown,
    /// Mouse click on a touch-capable device; the touch event wins.
    IgnoredClick,
    EmptyPool,
}

impl TapOutcome {
    pub fn stamp(&self) -> Option<Stamp> {
        match self {
            TapOutcome::Stamped(stamp) => Some(*stamp),
            _ => None,
        }
    }
}

pub struct TapEffect {
    tracker: PointerTracker,
    pool: ImagePool,
    config: TapConfig,
    rng: fastrand::Rng,
    last_accepted: Option<Duration>,
}

impl TapEffect {
    pub fn new(container: ElementId, pool: ImagePool, config: TapConfig, rng: fastrand::Rng) -> Self {
        Self {
            tracker: PointerTracker::new(container),
            pool,
            config,
            rng,
            last_accepted: None,
        }
    }

    pub fn on_tap(&mut self, event: &PointerEvent, svc: &mut Services<'_>) -> TapOutcome {
        if event.kind == PointerKind::Mouse && svc.document.is_touch_capable() {
            debug!("tap: click ignored on touch device");
            return TapOutcome::IgnoredClick;
        }
        let now = svc.clock.now();
        if let Some(last) = self.last_accepted {
            if now.saturating_sub(last) < self.config.cooldown() {
                debug!("tap: dropped within cooldown");
                return TapOutcome::Cooldown;
            }
        }
        let position = self.tracker.track(event, svc.document);
        let Some(slot) = self.pool.next_slot() else {
            return TapOutcome::EmptyPool;
        };
        self.last_accepted = Some(now);

        let rotation = random_rotation(&mut self.rng, self.config.max_rotation_deg);
        let stamp = Stamp {
            image: slot.image,
            index: slot.index,
            position,
            rotation,
            z_index: slot.z_index,
        };
        svc.animator.set(
            &[stamp.image],
            &Props::new()
                .x(position.x)
                .y(position.y)
                .x_percent(-50.0)
                .y_percent(-50.0)
                .rotation(rotation)
                .z_index(stamp.z_index)
                .scale(0.0)
                .opacity(0.0)
                .visible(true),
        );
        svc.animator.play(self.sequence_for(stamp.image, position.y));
        debug!(
            "tap stamp image {} at ({:.0}, {:.0})",
            stamp.index, position.x, position.y
        );
        TapOutcome::Stamped(stamp)
    }

    fn sequence_for(&self, image: ElementId, y: f32) -> Sequence {
        Sequence::new()
            .then(
                Tween::to(image, Props::new().scale(1.0).opacity(1.0))
                    .duration_ms(self.config.pop_ms)
                    .ease(Ease::BackOut(self.config.overshoot)),
            )
            .then(
                Tween::to(image, Props::new().opacity(0.0).y(y + self.config.drop_px))
                    .duration_ms(self.config.fade_ms)
                    .delay_ms(self.config.hold_ms)
                    .ease(Ease::Power2Out),
            )
            .then(Tween::to(image, Props::new().visible(false)).duration_ms(0))
    }

    pub fn pool(&self) -> &ImagePool {
        &self.pool
    }

    pub fn last_position(&self) -> glam::Vec2 {
        self.tracker.position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use vitrine_headless::{HeadlessPlatform, MemoryDocument};
    use vitrine_platform::{Platform, Rect};

    fn setup(touch: bool) -> (HeadlessPlatform, TapEffect) {
        let mut doc = MemoryDocument::new();
        doc.set_touch_capable(touch);
        let container = doc.add_with_bounds(".tap-trail", Rect::new(0.0, 0.0, 400.0, 800.0));
        let images = (0..3).map(|_| doc.add(".tap-trail img")).collect();
        let tap = TapEffect::new(
            container,
            ImagePool::new(images),
            TapConfig::default(),
            fastrand::Rng::with_seed(1),
        );
        (HeadlessPlatform::new(doc), tap)
    }

    fn tap(platform: &mut HeadlessPlatform, effect: &mut TapEffect, event: PointerEvent) -> TapOutcome {
        let mut svc = platform.services();
        effect.on_tap(&event, &mut svc)
    }

    #[test]
    fn second_tap_within_cooldown_is_dropped() {
        let (mut platform, mut effect) = setup(true);
        let first = tap(&mut platform, &mut effect, PointerEvent::touch(50.0, 50.0));
        assert_eq!(first.stamp().unwrap().position, Vec2::new(50.0, 50.0));
        platform.clock.advance_ms(40);
        let second = tap(&mut platform, &mut effect, PointerEvent::touch(52.0, 52.0));
        assert_eq!(second, TapOutcome::Cooldown);
        assert_eq!(effect.pool().cursor(), 1);
    }

    #[test]
    fn taps_beyond_cooldown_both_stamp() {
        let (mut platform, mut effect) = setup(false);
        assert!(tap(&mut platform, &mut effect, PointerEvent::mouse(10.0, 10.0)).stamp().is_some());
        platform.clock.advance_ms(151);
        let second = tap(&mut platform, &mut effect, PointerEvent::mouse(20.0, 20.0));
        assert_eq!(second.stamp().unwrap().index, 1);
        assert_eq!(effect.pool().cursor(), 2);
    }

    #[test]
    fn cooldown_boundary_is_accepted() {
        let (mut platform, mut effect) = setup(false);
        tap(&mut platform, &mut effect, PointerEvent::mouse(10.0, 10.0));
        platform.clock.advance_ms(150);
        assert!(tap(&mut platform, &mut effect, PointerEvent::mouse(10.0, 10.0)).stamp().is_some());
    }

    #[test]
    fn dropped_taps_do_not_extend_cooldown() {
        let (mut platform, mut effect) = setup(false);
        tap(&mut platform, &mut effect, PointerEvent::mouse(0.0, 0.0));
        platform.clock.advance_ms(100);
        assert_eq!(
            tap(&mut platform, &mut effect, PointerEvent::mouse(0.0, 0.0)),
            TapOutcome::Cooldown
        );
        platform.clock.advance_ms(60);
        assert!(tap(&mut platform, &mut effect, PointerEvent::mouse(0.0, 0.0)).stamp().is_some());
    }

    #[test]
    fn click_ignored_on_touch_device() {
        let (mut platform, mut effect) = setup(true);
        assert_eq!(
            tap(&mut platform, &mut effect, PointerEvent::mouse(5.0, 5.0)),
            TapOutcome::IgnoredClick
        );
        assert_eq!(effect.pool().cursor(), 0);
        // a rejected click does not start a cooldown
        assert!(tap(&mut platform, &mut effect, PointerEvent::touch(5.0, 5.0)).stamp().is_some());
    }

    #[test]
    fn tap_pops_from_zero_and_hides() {
        let (mut platform, mut effect) = setup(false);
        let stamp = tap(&mut platform, &mut effect, PointerEvent::mouse(100.0, 200.0))
            .stamp()
            .unwrap();
        let (targets, initial) = &platform.animator.sets()[0];
        assert_eq!(targets, &vec![stamp.image]);
        assert_eq!(initial.scale, Some(0.0));
        assert_eq!(initial.opacity, Some(0.0));

        let seq = &platform.animator.played()[0].sequence;
        assert_eq!(seq.steps()[0].tween.ease, Ease::BackOut(1.7));
        assert_eq!(seq.steps()[1].tween.to.y, Some(230.0));
        assert_eq!(platform.animator.resolved(stamp.image).visible, Some(false));
    }
}

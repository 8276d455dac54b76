use glam::Vec2;
use vitrine_platform::{ElementId, Ease, PointerEvent, Props, Rect, Result, Sequence, Services, Tween};

use super::Section;
use crate::geometry;

/// `(rotate_x, rotate_y)` in degrees for a pointer over `rect`: pointer to
/// the right turns the cloud around y, pointer below tips it back around x.
pub fn tilt_angles(pointer: Vec2, rect: Rect, max_deg: f32) -> (f32, f32) {
    let offset = geometry::normalized_offset(pointer, rect);
    (-offset.y * max_deg, offset.x * max_deg)
}

/// 3D tilt of a cloud of items following the pointer.
pub struct TiltCloud {
    cloud_selector: String,
    items_selector: String,
    max_deg: f32,
    cloud: Option<ElementId>,
    items: Vec<ElementId>,
    tilted: bool,
}

impl TiltCloud {
    pub fn new(cloud: &str, items: &str, max_deg: f32) -> Self {
        Self {
            cloud_selector: cloud.to_string(),
            items_selector: items.to_string(),
            max_deg,
            cloud: None,
            items: Vec::new(),
            tilted: false,
        }
    }

    fn tilt_to(&mut self, rotate_x: f32, rotate_y: f32, ease: Ease, ms: u64, svc: &mut Services<'_>) {
        svc.animator.play(Sequence::single(
            Tween::to_all(
                self.items.clone(),
                Props::new().rotate_x(rotate_x).rotate_y(rotate_y),
            )
            .duration_ms(ms)
            .ease(ease),
        ));
    }

    fn reset(&mut self, svc: &mut Services<'_>) {
        if self.tilted {
            self.tilt_to(0.0, 0.0, Ease::Power3Out, 800, svc);
            self.tilted = false;
        }
    }
}

impl Section for TiltCloud {
    fn name(&self) -> &'static str {
        "tilt_cloud"
    }

    fn init(&mut self, svc: &mut Services<'_>) -> Result<()> {
        self.cloud = Some(svc.document.require(&self.cloud_selector)?);
        self.items = svc.document.require_all(&self.items_selector)?;
        Ok(())
    }

    fn on_pointer_move(&mut self, event: &PointerEvent, svc: &mut Services<'_>) {
        let Some(rect) = self.cloud.and_then(|cloud| svc.document.bounds(cloud)) else {
            return;
        };
        if !rect.contains(event.client) {
            self.reset(svc);
            return;
        }
        let (rotate_x, rotate_y) = tilt_angles(event.client, rect, self.max_deg);
        self.tilt_to(rotate_x, rotate_y, Ease::Power2Out, 400, svc);
        self.tilted = true;
    }

    fn on_pointer_leave(&mut self, svc: &mut Services<'_>) {
        self.reset(svc);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_headless::{HeadlessPlatform, MemoryDocument};
    use vitrine_platform::Platform;

    #[test]
    fn angles_follow_pointer_and_clamp() {
        let rect = Rect::new(0.0, 0.0, 200.0, 200.0);
        assert_eq!(tilt_angles(rect.center(), rect, 12.0), (-0.0, 0.0));
        assert_eq!(tilt_angles(Vec2::new(200.0, 100.0), rect, 12.0), (-0.0, 12.0));
        assert_eq!(tilt_angles(Vec2::new(100.0, 150.0), rect, 12.0), (-6.0, 0.0));
        assert_eq!(tilt_angles(Vec2::new(900.0, -900.0), rect, 12.0), (12.0, 12.0));
    }

    #[test]
    fn tilts_inside_and_resets_on_leave() {
        let mut doc = MemoryDocument::new();
        doc.add_with_bounds(".tilt-cloud", Rect::new(0.0, 0.0, 200.0, 200.0));
        let item = doc.add(".tilt-cloud__item");
        doc.add(".tilt-cloud__item");
        let mut platform = HeadlessPlatform::new(doc);
        let mut tilt = TiltCloud::new(".tilt-cloud", ".tilt-cloud__item", 12.0);
        tilt.init(&mut platform.services()).unwrap();

        tilt.on_pointer_move(&PointerEvent::mouse(200.0, 100.0), &mut platform.services());
        assert_eq!(platform.animator.resolved(item).rotate_y, Some(12.0));

        tilt.on_pointer_leave(&mut platform.services());
        assert_eq!(platform.animator.resolved(item).rotate_y, Some(0.0));
        assert_eq!(platform.animator.played().len(), 2);

        // already at rest: no extra tween
        tilt.on_pointer_leave(&mut platform.services());
        tilt.on_pointer_move(&PointerEvent::mouse(500.0, 500.0), &mut platform.services());
        assert_eq!(platform.animator.played().len(), 2);
    }

    #[test]
    fn cloud_without_items_is_skipped() {
        let mut doc = MemoryDocument::new();
        doc.add(".tilt-cloud");
        let mut platform = HeadlessPlatform::new(doc);
        let mut tilt = TiltCloud::new(".tilt-cloud", ".tilt-cloud__item", 12.0);
        assert!(tilt.init(&mut platform.services()).is_err());
    }
}

use glam::Vec2;
use tracing::debug;
use vitrine_platform::{ElementId, Ease, PointerEvent, Props, Rect, Result, Sequence, Services, Tween};

use super::Section;

/// Translation that pulls a button toward the pointer.
pub fn magnetic_offset(pointer: Vec2, rect: Rect, strength: f32) -> Vec2 {
    (pointer - rect.center()) * strength
}

/// Buttons that lean toward a nearby pointer and spring back when it leaves.
pub struct MagneticButtons {
    selector: String,
    strength: f32,
    radius: f32,
    buttons: Vec<(ElementId, bool)>,
}

impl MagneticButtons {
    pub fn new(selector: &str, strength: f32, radius: f32) -> Self {
        Self {
            selector: selector.to_string(),
            strength,
            radius,
            buttons: Vec::new(),
        }
    }

    fn release(button: ElementId, svc: &mut Services<'_>) {
        svc.animator.play(Sequence::single(
            Tween::to(button, Props::new().x(0.0).y(0.0))
                .duration_ms(700)
                .ease(Ease::ElasticOut),
        ));
    }
}

impl Section for MagneticButtons {
    fn name(&self) -> &'static str {
        "magnetic"
    }

    fn init(&mut self, svc: &mut Services<'_>) -> Result<()> {
        self.buttons = svc
            .document
            .require_all(&self.selector)?
            .into_iter()
            .map(|button| (button, false))
            .collect();
        debug!("{} magnetic buttons", self.buttons.len());
        Ok(())
    }

    fn on_pointer_move(&mut self, event: &PointerEvent, svc: &mut Services<'_>) {
        for (button, engaged) in &mut self.buttons {
            let Some(rect) = svc.document.bounds(*button) else {
                continue;
            };
            if rect.expanded(self.radius).contains(event.client) {
                let pull = magnetic_offset(event.client, rect, self.strength);
                svc.animator.play(Sequence::single(
                    Tween::to(*button, Props::new().x(pull.x).y(pull.y))
                        .duration_ms(300)
                        .ease(Ease::Power2Out),
                ));
                *engaged = true;
            } else if *engaged {
                Self::release(*button, svc);
                *engaged = false;
            }
        }
    }

    fn on_pointer_leave(&mut self, svc: &mut Services<'_>) {
        for (button, engaged) in &mut self.buttons {
            if *engaged {
                Self::release(*button, svc);
                *engaged = false;
            }
        }
    }
}

use vitrine_platform::{Ease, Props, Result, ScrollTrigger, Sequence, Services, Tween};

use super::Section;

/// Each card drifts up at its own rate while it crosses the viewport.
pub struct CardParallax {
    selector: String,
    speed: f32,
}

impl CardParallax {
    pub fn new(selector: &str, speed: f32) -> Self {
        Self {
            selector: selector.to_string(),
            speed,
        }
    }
}

impl Section for CardParallax {
    fn name(&self) -> &'static str {
        "card_parallax"
    }

    fn init(&mut self, svc: &mut Services<'_>) -> Result<()> {
        let cards = svc.document.require_all(&self.selector)?;
        for (index, card) in cards.into_iter().enumerate() {
            let shift = -((index + 1) as f32) * self.speed;
            svc.animator.scroll_trigger(
                ScrollTrigger::new(card)
                    .start("top bottom")
                    .end("bottom top")
                    .scrub(0.5)
                    .animation(Sequence::single(
                        Tween::to(card, Props::new().y_percent(shift)).ease(Ease::Linear),
                    )),
            );
        }
        Ok(())
    }
}

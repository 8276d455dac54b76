use vitrine_platform::{Ease, Props, Result, ScrollTrigger, Sequence, Services, Tween};

use super::Section;

/// Timeline entries slide in from alternating sides and gain `visible`.
pub struct TimelineReveal {
    selector: String,
    offset_px: f32,
}

impl TimelineReveal {
    pub fn new(selector: &str, offset_px: f32) -> Self {
        Self {
            selector: selector.to_string(),
            offset_px,
        }
    }
}

impl Section for TimelineReveal {
    fn name(&self) -> &'static str {
        "timeline_reveal"
    }

    fn init(&mut self, svc: &mut Services<'_>) -> Result<()> {
        let items = svc.document.require_all(&self.selector)?;
        for (index, item) in items.into_iter().enumerate() {
            let from_x = if index % 2 == 0 {
                -self.offset_px
            } else {
                self.offset_px
            };
            svc.animator
                .set(&[item], &Props::new().x(from_x).opacity(0.0));
            svc.animator.scroll_trigger(
                ScrollTrigger::new(item)
                    .start("top 80%")
                    .toggle_class("visible")
                    .animation(Sequence::single(
                        Tween::to(item, Props::new().x(0.0).opacity(1.0))
                            .duration_ms(700)
                            .ease(Ease::Power3Out),
                    )),
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_headless::{HeadlessPlatform, MemoryDocument};
    use vitrine_platform::Platform;

    #[test]
    fn alternates_entry_side() {
        let mut doc = MemoryDocument::new();
        for _ in 0..3 {
            doc.add(".timeline__item");
        }
        let mut platform = HeadlessPlatform::new(doc);
        TimelineReveal::new(".timeline__item", 60.0)
            .init(&mut platform.services())
            .unwrap();
        let starts: Vec<f32> = platform
            .animator
            .sets()
            .iter()
            .map(|(_, props)| props.x.unwrap())
            .collect();
        assert_eq!(starts, vec![-60.0, 60.0, -60.0]);
        assert!(platform
            .animator
            .triggers()
            .iter()
            .all(|t| t.toggle_class.as_deref() == Some("visible")));
    }
}

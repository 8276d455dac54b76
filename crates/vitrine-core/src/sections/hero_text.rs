use tracing::debug;
use vitrine_platform::{Ease, Props, Result, Sequence, Services, Tween};

use super::Section;

/// Splits the hero title into characters and staggers them up into place.
pub struct HeroText {
    selector: String,
    stagger_ms: u64,
}

impl HeroText {
    pub fn new(selector: &str, stagger_ms: u64) -> Self {
        Self {
            selector: selector.to_string(),
            stagger_ms,
        }
    }
}

impl Section for HeroText {
    fn name(&self) -> &'static str {
        "hero_text"
    }

    fn init(&mut self, svc: &mut Services<'_>) -> Result<()> {
        let title = svc.document.require(&self.selector)?;
        let chars = svc.document.split_chars(title);
        if chars.is_empty() {
            debug!("hero title is empty; nothing to reveal");
            return Ok(());
        }
        svc.animator
            .set(&chars, &Props::new().y_percent(100.0).opacity(0.0));
        svc.animator.play(Sequence::single(
            Tween::to_all(chars, Props::new().y_percent(0.0).opacity(1.0))
                .duration_ms(800)
                .ease(Ease::Power3Out)
                .stagger_ms(self.stagger_ms),
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_headless::{HeadlessPlatform, MemoryDocument};
    use vitrine_platform::{Document, Platform};

    #[test]
    fn staggers_each_character() {
        let mut doc = MemoryDocument::new();
        let title = doc.add(".hero__title");
        doc.set_text(title, "Ada L");
        let mut platform = HeadlessPlatform::new(doc);
        HeroText::new(".hero__title", 30)
            .init(&mut platform.services())
            .unwrap();

        let (hidden, props) = &platform.animator.sets()[0];
        assert_eq!(hidden.len(), 4);
        assert_eq!(props.y_percent, Some(100.0));
        let tween = &platform.animator.played()[0].sequence.steps()[0].tween;
        assert_eq!(tween.targets, *hidden);
        assert_eq!(tween.span().as_millis(), 800 + 3 * 30);
    }

    #[test]
    fn missing_title_is_reported() {
        let mut platform = HeadlessPlatform::new(MemoryDocument::new());
        assert!(HeroText::new(".hero__title", 30)
            .init(&mut platform.services())
            .is_err());
    }
}

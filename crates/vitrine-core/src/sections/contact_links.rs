use tracing::{debug, warn};
use vitrine_platform::{ElementId, Ease, Props, Result, ScrollTrigger, Sequence, Services, Tween};

use super::Section;

/// Staggered reveal of the contact links plus the footer's back-to-top
/// button, which is optional.
pub struct ContactLinks {
    links_selector: String,
    footer_selector: String,
    stagger_ms: u64,
    footer_top: Option<ElementId>,
}

impl ContactLinks {
    pub fn new(links: &str, footer_top: &str, stagger_ms: u64) -> Self {
        Self {
            links_selector: links.to_string(),
            footer_selector: footer_top.to_string(),
            stagger_ms,
            footer_top: None,
        }
    }
}

impl Section for ContactLinks {
    fn name(&self) -> &'static str {
        "contact_links"
    }

    fn init(&mut self, svc: &mut Services<'_>) -> Result<()> {
        self.footer_top = svc.document.query(&self.footer_selector);
        if self.footer_top.is_none() {
            debug!("no back-to-top button ({})", self.footer_selector);
        }

        let links = match svc.document.require_all(&self.links_selector) {
            Ok(links) => links,
            // The footer button stands on its own
            Err(err) if self.footer_top.is_some() => {
                warn!("contact links not revealed: {err}");
                return Ok(());
            }
            Err(err) => return Err(err),
        };
        svc.animator
            .set(&links, &Props::new().y(20.0).opacity(0.0));
        svc.animator.scroll_trigger(
            ScrollTrigger::new(links[0])
                .start("top 90%")
                .animation(Sequence::single(
                    Tween::to_all(links, Props::new().y(0.0).opacity(1.0))
                        .duration_ms(600)
                        .ease(Ease::Power2Out)
                        .stagger_ms(self.stagger_ms),
                )),
        );
        Ok(())
    }

    fn on_click(&mut self, target: ElementId, svc: &mut Services<'_>) -> bool {
        if self.footer_top != Some(target) {
            return false;
        }
        svc.scroll.scroll_to(0.0);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_headless::{HeadlessPlatform, MemoryDocument};
    use vitrine_platform::{Platform, SmoothScroll};

    #[test]
    fn back_to_top_scrolls_to_zero() {
        let mut doc = MemoryDocument::new();
        doc.add(".contact__link");
        doc.add(".contact__link");
        let top = doc.add(".footer__top");
        let mut platform = HeadlessPlatform::new(doc);
        let mut contact = ContactLinks::new(".contact__link", ".footer__top", 80);
        contact.init(&mut platform.services()).unwrap();

        platform.scroll.start();
        platform.scroll.scroll_to(500.0);
        for _ in 0..200 {
            platform.scroll.raf(std::time::Duration::ZERO);
        }
        assert!(contact.on_click(top, &mut platform.services()));
        assert!(!contact.on_click(ElementId(999), &mut platform.services()));
        for _ in 0..200 {
            platform.scroll.raf(std::time::Duration::ZERO);
        }
        assert_eq!(platform.scroll.position(), 0.0);

        let reveal = &platform.animator.triggers()[0];
        assert_eq!(reveal.animation.as_ref().unwrap().steps()[0].tween.targets.len(), 2);
    }

    #[test]
    fn missing_footer_button_is_fine() {
        let mut doc = MemoryDocument::new();
        doc.add(".contact__link");
        let mut platform = HeadlessPlatform::new(doc);
        let mut contact = ContactLinks::new(".contact__link", ".footer__top", 80);
        assert!(contact.init(&mut platform.services()).is_ok());
        assert!(!contact.on_click(ElementId(0), &mut platform.services()));
    }

    #[test]
    fn back_to_top_works_without_links() {
        let mut doc = MemoryDocument::new();
        let top = doc.add(".footer__top");
        let mut platform = HeadlessPlatform::new(doc);
        let mut contact = ContactLinks::new(".contact__link", ".footer__top", 80);
        assert!(contact.init(&mut platform.services()).is_ok());
        assert!(platform.animator.triggers().is_empty());

        platform.scroll.start();
        platform.scroll.scroll_to(500.0);
        for _ in 0..200 {
            platform.scroll.raf(std::time::Duration::ZERO);
        }
        assert!(contact.on_click(top, &mut platform.services()));
        for _ in 0..200 {
            platform.scroll.raf(std::time::Duration::ZERO);
        }
        assert_eq!(platform.scroll.position(), 0.0);
    }

    #[test]
    fn nothing_to_guard_is_skipped() {
        let mut platform = HeadlessPlatform::new(MemoryDocument::new());
        let mut contact = ContactLinks::new(".contact__link", ".footer__top", 80);
        assert!(contact.init(&mut platform.services()).is_err());
    }
}

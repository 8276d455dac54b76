use vitrine_platform::{Ease, Props, Result, ScrollTrigger, Sequence, Services, Tween};

use super::Section;

/// Horizontal travel needed to bring the end of the track into view.
/// Never positive; zero when the track already fits.
pub fn horizontal_distance(track_width: f32, viewport_width: f32) -> f32 {
    -(track_width - viewport_width).max(0.0)
}

/// Pins the section and scrubs its track sideways while it scrolls past.
pub struct HorizontalScroll {
    section: String,
    track: String,
}

impl HorizontalScroll {
    pub fn new(section: &str, track: &str) -> Self {
        Self {
            section: section.to_string(),
            track: track.to_string(),
        }
    }
}

impl Section for HorizontalScroll {
    fn name(&self) -> &'static str {
        "horizontal_scroll"
    }

    fn init(&mut self, svc: &mut Services<'_>) -> Result<()> {
        let section = svc.document.require(&self.section)?;
        let track = svc.document.require(&self.track)?;
        let track_width = svc.document.bounds(track).map(|r| r.width).unwrap_or(0.0);
        let distance = horizontal_distance(track_width, svc.document.viewport().width);

        svc.animator.scroll_trigger(
            ScrollTrigger::new(section)
                .start("top top")
                .end(&format!("+={}", distance.abs()))
                .scrub(1.0)
                .pin()
                .animation(Sequence::single(
                    Tween::to(track, Props::new().x(distance)).ease(Ease::Linear),
                )),
        );
        Ok(())
    }
}

//! One-shot section initializers that run after the site unlocks.
//!
//! Every selector lookup fails soft: a section whose elements are missing
//! reports `FxError::MissingElement`, the registry logs it and moves on.

use tracing::{info, warn};
use vitrine_platform::{ElementId, PointerEvent, Result, Services};

use crate::config::EngineConfig;

mod card_parallax;
mod contact_links;
mod hero_text;
mod horizontal_scroll;
mod magnetic;
mod tilt_cloud;
mod timeline_reveal;

pub use card_parallax::CardParallax;
pub use contact_links::ContactLinks;
pub use hero_text::HeroText;
pub use horizontal_scroll::{horizontal_distance, HorizontalScroll};
pub use magnetic::{magnetic_offset, MagneticButtons};
pub use tilt_cloud::{tilt_angles, TiltCloud};
pub use timeline_reveal::TimelineReveal;

pub trait Section {
    fn name(&self) -> &'static str;

    fn init(&mut self, svc: &mut Services<'_>) -> Result<()>;

    fn on_pointer_move(&mut self, _event: &PointerEvent, _svc: &mut Services<'_>) {}

    fn on_pointer_leave(&mut self, _svc: &mut Services<'_>) {}

    /// Returns true when the click was handled.
    fn on_click(&mut self, _target: ElementId, _svc: &mut Services<'_>) -> bool {
        false
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InitOutcome {
    Pending,
    Ready,
    Skipped(String),
}

struct Entry {
    section: Box<dyn Section>,
    outcome: InitOutcome,
}

/// Ordered set of sections, initialized exactly once.
#[derive(Default)]
pub struct SectionRegistry {
    entries: Vec<Entry>,
    initialized: bool,
}

impl SectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The site's sections in their fixed initialization order.
    pub fn standard(config: &EngineConfig) -> Self {
        let selectors = &config.selectors;
        let tuning = &config.sections;
        Self::new()
            .with(HeroText::new(&selectors.hero_title, tuning.hero_stagger_ms))
            .with(HorizontalScroll::new(
                &selectors.horizontal_section,
                &selectors.horizontal_track,
            ))
            .with(TiltCloud::new(
                &selectors.tilt_cloud,
                &selectors.tilt_items,
                tuning.tilt_max_deg,
            ))
            .with(CardParallax::new(&selectors.cards, tuning.parallax_speed))
            .with(TimelineReveal::new(
                &selectors.timeline_items,
                tuning.timeline_offset_px,
            ))
            .with(MagneticButtons::new(
                &selectors.magnetic,
                tuning.magnetic_strength,
                tuning.magnetic_radius_px,
            ))
            .with(ContactLinks::new(
                &selectors.contact_links,
                &selectors.footer_top,
                tuning.contact_stagger_ms,
            ))
    }

    pub fn with(mut self, section: impl Section + 'static) -> Self {
        self.push(Box::new(section));
        self
    }

    pub fn push(&mut self, section: Box<dyn Section>) {
        self.entries.push(Entry {
            section,
            outcome: InitOutcome::Pending,
        });
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Run every initializer once, in order. Later calls are no-ops.
    /// Returns how many sections came up.
    pub fn init_all(&mut self, svc: &mut Services<'_>) -> usize {
        if self.initialized {
            warn!("sections already initialized; ignoring");
            return 0;
        }
        self.initialized = true;
        let mut ready = 0;
        for entry in &mut self.entries {
            entry.outcome = match entry.section.init(svc) {
                Ok(()) => {
                    ready += 1;
                    InitOutcome::Ready
                }
                Err(err) => {
                    warn!("section {} skipped: {err}", entry.section.name());
                    InitOutcome::Skipped(err.to_string())
                }
            };
        }
        info!("{ready}/{} sections initialized", self.entries.len());
        ready
    }

    pub fn outcomes(&self) -> Vec<(&'static str, InitOutcome)> {
        self.entries
            .iter()
            .map(|entry| (entry.section.name(), entry.outcome.clone()))
            .collect()
    }

    fn ready(&mut self) -> impl Iterator<Item = &mut Box<dyn Section>> {
        self.entries
            .iter_mut()
            .filter(|entry| entry.outcome == InitOutcome::Ready)
            .map(|entry| &mut entry.section)
    }

    pub fn dispatch_pointer_move(&mut self, event: &PointerEvent, svc: &mut Services<'_>) {
        for section in self.ready() {
            section.on_pointer_move(event, svc);
        }
    }

    pub fn dispatch_pointer_leave(&mut self, svc: &mut Services<'_>) {
        for section in self.ready() {
            section.on_pointer_leave(svc);
        }
    }

    pub fn dispatch_click(&mut self, target: ElementId, svc: &mut Services<'_>) -> bool {
        self.ready().any(|section| section.on_click(target, svc))
    }
}

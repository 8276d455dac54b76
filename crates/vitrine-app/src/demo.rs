//! The demo page layout the runner replays sessions against.

use vitrine_core::config::Selectors;
use vitrine_headless::MemoryDocument;
use vitrine_platform::{Document, Rect};

pub const PLACEHOLDER_IMAGES: usize = 6;
const SIGNATURE_LENGTH: f32 = 1800.0;

/// Build a page containing every element the site looks for. Placeholder
/// trail images are added only when no asset directory will supply them.
pub fn document(selectors: &Selectors, viewport: Rect, touch: bool, placeholders: bool) -> MemoryDocument {
    let mut doc = MemoryDocument::new();
    doc.set_viewport(viewport);
    doc.set_touch_capable(touch);

    let full = Rect::new(0.0, 0.0, viewport.width, viewport.height);
    doc.add_with_bounds(&selectors.hero, full);
    doc.add_with_bounds(&selectors.trail_container, full);
    doc.add_with_bounds(&selectors.tap_container, full);
    if placeholders {
        for _ in 0..PLACEHOLDER_IMAGES {
            doc.add(&selectors.trail_images);
            doc.add(&selectors.tap_images);
        }
    }

    doc.add_with_bounds(&selectors.preloader, full);
    let text = doc.add(&selectors.preloader_text);
    doc.set_text(text, "");
    let path = doc.add(&selectors.signature_path);
    doc.set_path_length(path, SIGNATURE_LENGTH);

    let title = doc.add(&selectors.hero_title);
    doc.set_text(title, "Selected Work");

    let below = viewport.height;
    doc.add_with_bounds(
        &selectors.horizontal_section,
        Rect::new(0.0, below, viewport.width, viewport.height),
    );
    doc.add_with_bounds(
        &selectors.horizontal_track,
        Rect::new(0.0, below, viewport.width * 3.0, viewport.height),
    );

    doc.add_with_bounds(
        &selectors.tilt_cloud,
        Rect::new(viewport.width * 0.25, below * 2.0, viewport.width * 0.5, 400.0),
    );
    for _ in 0..6 {
        doc.add(&selectors.tilt_items);
    }
    for _ in 0..4 {
        doc.add(&selectors.cards);
    }
    for _ in 0..5 {
        doc.add(&selectors.timeline_items);
    }

    doc.add_with_bounds(
        &selectors.magnetic,
        Rect::new(viewport.width * 0.5 - 80.0, viewport.height * 0.7, 160.0, 48.0),
    );
    for _ in 0..3 {
        doc.add(&selectors.contact_links);
    }
    doc.add(&selectors.footer_top);
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_page_has_every_selector() {
        let selectors = Selectors::default();
        let doc = document(&selectors, Rect::new(0.0, 0.0, 1280.0, 800.0), false, true);
        for selector in [
            &selectors.hero,
            &selectors.trail_images,
            &selectors.tap_images,
            &selectors.preloader_text,
            &selectors.signature_path,
            &selectors.horizontal_track,
            &selectors.tilt_items,
            &selectors.cards,
            &selectors.timeline_items,
            &selectors.magnetic,
            &selectors.contact_links,
            &selectors.footer_top,
        ] {
            assert!(doc.query(selector).is_some(), "{selector} missing");
        }
        assert_eq!(doc.query_all(&selectors.trail_images).len(), PLACEHOLDER_IMAGES);
    }
}

use glam::Vec2;
use tracing::debug;
use vitrine_platform::{Document, ElementId, PointerEvent};

use crate::geometry;

/// Latest pointer position in a container's local coordinates.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    container: ElementId,
    position: Vec2,
}

impl PointerTracker {
    pub fn new(container: ElementId) -> Self {
        Self {
            container,
            position: Vec2::ZERO,
        }
    }

    /// Store the event position relative to the container. The container is
    /// measured on every call since layout may have moved it.
    pub fn track(&mut self, event: &PointerEvent, document: &dyn Document) -> Vec2 {
        let bounds = document.bounds(self.container);
        if bounds.is_none() {
            debug!("container {:?} has no bounds; using client position", self.container);
        }
        self.position = geometry::to_local(event.client, bounds);
        self.position
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn container(&self) -> ElementId {
        self.container
    }
}

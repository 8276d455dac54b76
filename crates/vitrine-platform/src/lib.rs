//! Platform abstraction traits so `vitrine-core` stays host-agnostic.
//!
//! Everything the effects layer needs from its host (a clock, frame
//! scheduling, a document, an animation engine, smooth scrolling and an input
//! feed) is described here. A browser binding and the headless test host both
//! implement the same set.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub mod tween;

pub use tween::{At, Ease, Props, ScrollTrigger, Sequence, Step, Tween};

pub type Result<T> = std::result::Result<T, FxError>;

#[derive(Debug, thiserror::Error)]
pub enum FxError {
    #[error("element not found: {0}")]
    MissingElement(String),
    #[error("failed to decode asset {path}: {reason}")]
    AssetDecode { path: String, reason: String },
    #[error("cannot read asset directory {path}: {source}")]
    AssetDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("platform error: {0}")]
    Platform(String),
}

/// Opaque handle to a node owned by the host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TriggerId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.origin() + self.size() * 0.5
    }

    /// Grow the rect by `margin` on every side.
    pub fn expanded(&self, margin: f32) -> Rect {
        Rect {
            x: self.x - margin,
            y: self.y - margin,
            width: self.width + margin * 2.0,
            height: self.height + margin * 2.0,
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && point.x <= self.x + self.width
            && point.y <= self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    Mouse,
    Touch,
    Pen,
}

/// A pointer sample in client (viewport) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub client: Vec2,
    pub kind: PointerKind,
}

impl PointerEvent {
    pub fn mouse(x: f32, y: f32) -> Self {
        Self {
            client: Vec2::new(x, y),
            kind: PointerKind::Mouse,
        }
    }

    pub fn touch(x: f32, y: f32) -> Self {
        Self {
            client: Vec2::new(x, y),
            kind: PointerKind::Touch,
        }
    }
}

/// Input delivered by the host, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerMove(PointerEvent),
    PointerLeave,
    /// A tap (touch) or click (mouse) at a client position.
    Tap(PointerEvent),
    /// Activation of a specific element, e.g. a button.
    Click(ElementId),
    /// The hero region entered or left the viewport.
    Intersection(bool),
}

/// Monotonic time since the page session started.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Next-frame callback scheduling. The host calls back into the requester
/// with the handle it was given.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// The host document: element lookup plus the handful of mutations the
/// effects layer performs outside the animation engine.
pub trait Document {
    fn query(&self, selector: &str) -> Option<ElementId>;
    fn query_all(&self, selector: &str) -> Vec<ElementId>;
    fn bounds(&self, element: ElementId) -> Option<Rect>;
    fn viewport(&self) -> Rect;
    fn body(&self) -> ElementId;
    fn set_class(&mut self, element: ElementId, class: &str, enabled: bool);
    fn has_class(&self, element: ElementId, class: &str) -> bool;
    fn text(&self, element: ElementId) -> Option<String>;
    fn set_text(&mut self, element: ElementId, text: &str);
    fn insert_image(&mut self, container: ElementId, src: &str) -> ElementId;
    fn set_favicon(&mut self, href: &str);
    fn set_scroll_locked(&mut self, locked: bool);
    /// Total stroke length of an SVG path element.
    fn path_length(&self, element: ElementId) -> Option<f32>;
    fn is_touch_capable(&self) -> bool;
    /// Split an element's text into one child element per character.
    fn split_chars(&mut self, element: ElementId) -> Vec<ElementId>;

    fn require(&self, selector: &str) -> Result<ElementId> {
        self.query(selector)
            .ok_or_else(|| FxError::MissingElement(selector.to_string()))
    }

    fn require_all(&self, selector: &str) -> Result<Vec<ElementId>> {
        let found = self.query_all(selector);
        if found.is_empty() {
            return Err(FxError::MissingElement(selector.to_string()));
        }
        Ok(found)
    }
}

/// External tweening engine with scroll-linked triggers.
pub trait Animator {
    fn set(&mut self, targets: &[ElementId], props: &Props);
    fn play(&mut self, sequence: Sequence) -> TweenId;
    fn scroll_trigger(&mut self, trigger: ScrollTrigger) -> TriggerId;
    fn update_scroll(&mut self, scroll_y: f32);
}

/// Smooth-scroll emulator driven from the animation ticker.
pub trait SmoothScroll {
    fn start(&mut self);
    fn stop(&mut self);
    /// Advance one tick; returns the new scroll offset when it moved.
    fn raf(&mut self, now: Duration) -> Option<f32>;
    fn scroll_to(&mut self, y: f32);
}

/// Source of pointer, tap and visibility events.
pub trait InputSource {
    fn start(&mut self) -> Result<()>;
    fn stop(&mut self) -> Result<()>;
}

/// Disjoint borrows of every host capability for one call into the core.
pub struct Services<'a> {
    pub clock: &'a dyn Clock,
    pub document: &'a mut dyn Document,
    pub animator: &'a mut dyn Animator,
    pub frames: &'a mut dyn FrameScheduler,
    pub scroll: &'a mut dyn SmoothScroll,
}

pub trait Platform {
    fn services(&mut self) -> Services<'_>;
}

use std::collections::{BTreeSet, HashMap};

use tracing::debug;
use vitrine_platform::{Document, ElementId, Rect};

#[derive(Debug, Default)]
struct Node {
    classes: BTreeSet<String>,
    text: Option<String>,
    bounds: Option<Rect>,
    path_length: Option<f32>,
    src: Option<String>,
    children: Vec<ElementId>,
}

/// In-memory document. Selectors are matched verbatim: an element is
/// registered under the exact selector strings callers will query.
#[derive(Debug)]
pub struct MemoryDocument {
    nodes: Vec<Node>,
    by_selector: HashMap<String, Vec<ElementId>>,
    viewport: Rect,
    favicon: Option<String>,
    scroll_locked: bool,
    touch_capable: bool,
}

impl MemoryDocument {
    pub fn new() -> Self {
        let mut document = Self {
            nodes: Vec::new(),
            by_selector: HashMap::new(),
            viewport: Rect::new(0.0, 0.0, 1280.0, 800.0),
            favicon: None,
            scroll_locked: false,
            touch_capable: false,
        };
        let body = document.add("body");
        document.set_bounds(body, Rect::new(0.0, 0.0, 1280.0, 800.0));
        document
    }

    /// Register a new element under `selector`.
    pub fn add(&mut self, selector: &str) -> ElementId {
        let id = ElementId(self.nodes.len() as u32);
        self.nodes.push(Node::default());
        self.by_selector
            .entry(selector.to_string())
            .or_default()
            .push(id);
        id
    }

    pub fn add_with_bounds(&mut self, selector: &str, bounds: Rect) -> ElementId {
        let id = self.add(selector);
        self.set_bounds(id, bounds);
        id
    }

    pub fn set_bounds(&mut self, element: ElementId, bounds: Rect) {
        if let Some(node) = self.node_mut(element) {
            node.bounds = Some(bounds);
        }
    }

    pub fn set_path_length(&mut self, element: ElementId, length: f32) {
        if let Some(node) = self.node_mut(element) {
            node.path_length = Some(length);
        }
    }

    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    pub fn set_touch_capable(&mut self, touch: bool) {
        self.touch_capable = touch;
    }

    pub fn favicon(&self) -> Option<&str> {
        self.favicon.as_deref()
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    pub fn children(&self, element: ElementId) -> &[ElementId] {
        self.node(element)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn image_src(&self, element: ElementId) -> Option<&str> {
        self.node(element).and_then(|node| node.src.as_deref())
    }

    fn node(&self, element: ElementId) -> Option<&Node> {
        self.nodes.get(element.0 as usize)
    }

    fn node_mut(&mut self, element: ElementId) -> Option<&mut Node> {
        self.nodes.get_mut(element.0 as usize)
    }

    fn push_child(&mut self, parent: ElementId) -> ElementId {
        let id = ElementId(self.nodes.len() as u32);
        self.nodes.push(Node::default());
        if let Some(node) = self.node_mut(parent) {
            node.children.push(id);
        }
        id
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl Document for MemoryDocument {
    fn query(&self, selector: &str) -> Option<ElementId> {
        self.by_selector
            .get(selector)
            .and_then(|found| found.first().copied())
    }

    fn query_all(&self, selector: &str) -> Vec<ElementId> {
        self.by_selector.get(selector).cloned().unwrap_or_default()
    }

    fn bounds(&self, element: ElementId) -> Option<Rect> {
        self.node(element).and_then(|node| node.bounds)
    }

    fn viewport(&self) -> Rect {
        self.viewport
    }

    fn body(&self) -> ElementId {
        ElementId(0)
    }

    fn set_class(&mut self, element: ElementId, class: &str, enabled: bool) {
        if let Some(node) = self.node_mut(element) {
            if enabled {
                node.classes.insert(class.to_string());
            } else {
                node.classes.remove(class);
            }
        }
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.node(element)
            .map(|node| node.classes.contains(class))
            .unwrap_or(false)
    }

    fn text(&self, element: ElementId) -> Option<String> {
        self.node(element).and_then(|node| node.text.clone())
    }

    fn set_text(&mut self, element: ElementId, text: &str) {
        if let Some(node) = self.node_mut(element) {
            node.text = Some(text.to_string());
        }
    }

    fn insert_image(&mut self, container: ElementId, src: &str) -> ElementId {
        let id = self.push_child(container);
        if let Some(node) = self.node_mut(id) {
            node.src = Some(src.to_string());
        }
        debug!("inserted image {src} into {container:?} as {id:?}");
        id
    }

    fn set_favicon(&mut self, href: &str) {
        self.favicon = Some(href.to_string());
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }

    fn path_length(&self, element: ElementId) -> Option<f32> {
        self.node(element).and_then(|node| node.path_length)
    }

    fn is_touch_capable(&self) -> bool {
        self.touch_capable
    }

    fn split_chars(&mut self, element: ElementId) -> Vec<ElementId> {
        let text = self.text(element).unwrap_or_default();
        let mut chars = Vec::new();
        for ch in text.chars().filter(|ch| !ch.is_whitespace()) {
            let id = self.push_child(element);
            self.set_text(id, &ch.to_string());
            chars.push(id);
        }
        chars
    }
}

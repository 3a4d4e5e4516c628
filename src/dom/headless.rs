use std::collections::{BTreeMap, BTreeSet};

use crate::dom::{Document, PinPlacement};
use crate::foundation::core::{ElementId, Rect, Viewport};
use crate::foundation::error::{ScrollError, ScrollResult};

/// Serializable description of one element of a [`HeadlessDocument`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElementDef {
    /// Optional `id` attribute, matched by `#id` selectors.
    #[serde(default)]
    pub id: Option<String>,
    /// Tag name, matched by bare selectors.
    #[serde(default = "default_tag")]
    pub tag: String,
    /// Class list, matched by `.class` selectors.
    #[serde(default)]
    pub classes: Vec<String>,
    /// Natural document-space box as `[x, y, width, height]`.
    pub rect: [f64; 4],
    /// Initial string attributes.
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
}

fn default_tag() -> String {
    "div".to_owned()
}

impl ElementDef {
    /// Element with a class list and a natural box.
    pub fn with_class(class: &str, rect: [f64; 4]) -> Self {
        Self {
            id: None,
            tag: default_tag(),
            classes: vec![class.to_owned()],
            rect,
            attrs: BTreeMap::new(),
        }
    }
}

#[derive(Clone, Debug)]
struct Node {
    id: Option<String>,
    tag: String,
    classes: BTreeSet<String>,
    natural: Rect,
    attached: bool,
    styles: BTreeMap<String, f64>,
    attrs: BTreeMap<String, String>,
    pin: PinPlacement,
    spacing: f64,
}

/// In-memory document with static natural layout.
///
/// Layout is not reflowed by resizing; hosts simulate reflow with [`Self::set_rect`].
/// Pin spacing pushes every element that starts below the spaced element down by the
/// reserved amount, which is enough to model how pinned sections lengthen the page.
#[derive(Clone, Debug)]
pub struct HeadlessDocument {
    viewport: Viewport,
    scroll_y: f64,
    base_height: f64,
    nodes: Vec<Node>,
}

impl HeadlessDocument {
    /// Empty document of `content_height` pixels.
    pub fn new(viewport: Viewport, content_height: f64) -> Self {
        Self {
            viewport,
            scroll_y: 0.0,
            base_height: content_height.max(0.0),
            nodes: Vec::new(),
        }
    }

    /// Build a document from element definitions, validating every box.
    pub fn from_defs(
        viewport: Viewport,
        content_height: f64,
        defs: &[ElementDef],
    ) -> ScrollResult<Self> {
        let mut doc = Self::new(viewport, content_height);
        for def in defs {
            doc.insert(def.clone())?;
        }
        Ok(doc)
    }

    /// Append an element; returns its handle.
    pub fn insert(&mut self, def: ElementDef) -> ScrollResult<ElementId> {
        let [x, y, w, h] = def.rect;
        if !def.rect.iter().all(|v| v.is_finite()) || w < 0.0 || h < 0.0 {
            return Err(ScrollError::validation(format!(
                "element box must be finite with non-negative size, got {:?}",
                def.rect
            )));
        }
        let idx = u32::try_from(self.nodes.len())
            .map_err(|_| ScrollError::validation("too many elements"))?;
        self.nodes.push(Node {
            id: def.id,
            tag: def.tag,
            classes: def.classes.into_iter().collect(),
            natural: Rect::new(x, y, x + w, y + h),
            attached: true,
            styles: BTreeMap::new(),
            attrs: def.attrs,
            pin: PinPlacement::default(),
            spacing: 0.0,
        });
        Ok(ElementId(idx))
    }

    /// Set the scroll offset (not clamped).
    pub fn set_scroll_y(&mut self, y: f64) {
        self.scroll_y = y;
    }

    /// Replace the viewport size.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Replace an element's natural box (simulated reflow).
    pub fn set_rect(&mut self, el: ElementId, rect: Rect) {
        if let Some(n) = self.node_mut(el) {
            n.natural = rect;
        }
    }

    /// Detach or re-attach an element.
    pub fn set_attached(&mut self, el: ElementId, attached: bool) {
        if let Some(n) = self.node_mut(el) {
            n.attached = attached;
        }
    }

    /// Current pin placement of an element.
    pub fn pin_placement(&self, el: ElementId) -> Option<PinPlacement> {
        self.node(el).map(|n| n.pin)
    }

    /// Where `el` is drawn on screen (viewport coordinates), taking pins into account.
    pub fn screen_rect(&self, el: ElementId) -> Option<Rect> {
        let n = self.node(el)?;
        match n.pin {
            PinPlacement::Fixed { screen } => Some(screen),
            PinPlacement::Flow { offset_y } => {
                let r = self.layout_rect(el)?;
                let dy = offset_y + self.style(el, "y").unwrap_or(0.0) - self.scroll_y;
                Some(Rect::new(r.x0, r.y0 + dy, r.x1, r.y1 + dy))
            }
        }
    }

    /// Snapshot of styles, attributes and classes for inspection.
    pub fn snapshot(&self) -> serde_json::Value {
        let elements: Vec<serde_json::Value> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| {
                serde_json::json!({
                    "index": i,
                    "id": n.id,
                    "tag": n.tag,
                    "classes": n.classes,
                    "styles": n.styles,
                    "attrs": n.attrs,
                    "pin": n.pin,
                })
            })
            .collect();
        serde_json::json!({
            "scroll_y": self.scroll_y,
            "viewport": self.viewport,
            "elements": elements,
        })
    }

    fn node(&self, el: ElementId) -> Option<&Node> {
        self.nodes.get(el.0 as usize)
    }

    fn node_mut(&mut self, el: ElementId) -> Option<&mut Node> {
        self.nodes.get_mut(el.0 as usize)
    }

    fn spacing_above(&self, target: &Node) -> f64 {
        self.nodes
            .iter()
            .filter(|n| {
                n.attached
                    && n.spacing > 0.0
                    && !std::ptr::eq(*n, target)
                    && n.natural.y1 <= target.natural.y0
            })
            .map(|n| n.spacing)
            .sum()
    }

    fn matches(n: &Node, selector: &str) -> bool {
        if let Some(class) = selector.strip_prefix('.') {
            n.classes.contains(class)
        } else if let Some(id) = selector.strip_prefix('#') {
            n.id.as_deref() == Some(id)
        } else {
            n.tag == selector
        }
    }
}

impl Document for HeadlessDocument {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn scroll_height(&self) -> f64 {
        let spacing: f64 = self
            .nodes
            .iter()
            .filter(|n| n.attached)
            .map(|n| n.spacing)
            .sum();
        self.base_height + spacing
    }

    fn query_all(&self, selector: &str) -> Vec<ElementId> {
        let selector = selector.trim();
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.attached && Self::matches(n, selector))
            .map(|(i, _)| ElementId(i as u32))
            .collect()
    }

    fn layout_rect(&self, el: ElementId) -> Option<Rect> {
        let n = self.node(el).filter(|n| n.attached)?;
        let dy = self.spacing_above(n);
        let r = n.natural;
        Some(Rect::new(r.x0, r.y0 + dy, r.x1, r.y1 + dy))
    }

    fn style(&self, el: ElementId, property: &str) -> Option<f64> {
        self.node(el)?.styles.get(property).copied()
    }

    fn set_style(&mut self, el: ElementId, property: &str, value: f64) {
        if let Some(n) = self.node_mut(el) {
            n.styles.insert(property.to_owned(), value);
        }
    }

    fn set_class(&mut self, el: ElementId, class: &str, on: bool) {
        if let Some(n) = self.node_mut(el) {
            if on {
                n.classes.insert(class.to_owned());
            } else {
                n.classes.remove(class);
            }
        }
    }

    fn has_class(&self, el: ElementId, class: &str) -> bool {
        self.node(el).is_some_and(|n| n.classes.contains(class))
    }

    fn attr(&self, el: ElementId, name: &str) -> Option<String> {
        self.node(el)?.attrs.get(name).cloned()
    }

    fn set_attr(&mut self, el: ElementId, name: &str, value: &str) {
        if let Some(n) = self.node_mut(el) {
            n.attrs.insert(name.to_owned(), value.to_owned());
        }
    }

    fn set_pin(&mut self, el: ElementId, placement: PinPlacement) {
        if let Some(n) = self.node_mut(el) {
            n.pin = placement;
        }
    }

    fn set_pin_spacing(&mut self, el: ElementId, extra: f64) {
        if let Some(n) = self.node_mut(el) {
            n.spacing = extra.max(0.0);
        }
    }

    fn pin_spacing(&self, el: ElementId) -> f64 {
        self.node(el).map_or(0.0, |n| n.spacing)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dom/headless.rs"]
mod tests;

//! Document/layout interface consumed by the orchestrator.
//!
//! The orchestrator never touches a real DOM directly. Hosts implement [`Document`] over
//! whatever element tree they own; [`HeadlessDocument`] is a complete in-memory
//! implementation used by the replay tool and tests.

pub(crate) mod headless;

use crate::foundation::core::{ElementId, Rect, Viewport};

/// Where a pinnable element is currently placed.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PinPlacement {
    /// In normal document flow, translated by `offset_y` from its natural position.
    Flow {
        /// Vertical translation applied to the element's natural box.
        offset_y: f64,
    },
    /// Removed from flow and fixed at `screen` (viewport coordinates).
    Fixed {
        /// Fixed box in viewport coordinates.
        screen: Rect,
    },
}

impl Default for PinPlacement {
    fn default() -> Self {
        Self::Flow { offset_y: 0.0 }
    }
}

/// DOM/layout layer as seen by the orchestrator.
///
/// All geometry is in CSS pixels. `layout_rect` is the element's box in *document*
/// coordinates under normal flow: for a pinned element it must report the placeholder
/// that reserves its space, never the fixed box, so that geometry resolution is not
/// affected by the pin itself.
pub trait Document {
    /// Current viewport size.
    fn viewport(&self) -> Viewport;

    /// Current vertical scroll offset of the page.
    fn scroll_y(&self) -> f64;

    /// Total scrollable document height (including pin spacing).
    fn scroll_height(&self) -> f64;

    /// All elements matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<ElementId>;

    /// First element matching `selector`.
    fn query(&self, selector: &str) -> Option<ElementId> {
        self.query_all(selector).into_iter().next()
    }

    /// Document-space layout box of `el`, or `None` if it is not attached.
    fn layout_rect(&self, el: ElementId) -> Option<Rect>;

    /// Numeric style property, if one has been set.
    fn style(&self, el: ElementId, property: &str) -> Option<f64>;

    /// Set a numeric style property.
    fn set_style(&mut self, el: ElementId, property: &str, value: f64);

    /// Add (`on == true`) or remove a class.
    fn set_class(&mut self, el: ElementId, class: &str, on: bool);

    /// `true` if `el` carries `class`.
    fn has_class(&self, el: ElementId, class: &str) -> bool;

    /// Read a string attribute.
    fn attr(&self, el: ElementId, name: &str) -> Option<String>;

    /// Set a string attribute (image `src`, `data-*`).
    fn set_attr(&mut self, el: ElementId, name: &str, value: &str);

    /// Move `el` in or out of normal flow.
    fn set_pin(&mut self, el: ElementId, placement: PinPlacement);

    /// Reserve `extra` pixels after `el`'s placeholder so that content below is pushed
    /// down by the pinned scroll distance.
    fn set_pin_spacing(&mut self, el: ElementId, extra: f64);

    /// Pixels currently reserved after `el` by [`Self::set_pin_spacing`].
    fn pin_spacing(&self, el: ElementId) -> f64;
}

pub use headless::{ElementDef, HeadlessDocument};

//! Reading-progress indicator with a contrast switch over light sections.

use crate::dom::Document;
use crate::foundation::core::{ElementId, Rect, Vec2};

/// Class toggled on the bar while a light section is on screen.
pub const DARK_CLASS: &str = "dark";

/// Fraction of the scrollable distance covered at `scroll_y`, in `[0, 1]`.
///
/// Documents that fit in the viewport have nothing to scroll and report 0.
pub fn scroll_fraction(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> f64 {
    let scrollable = scroll_height - viewport_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_y / scrollable).clamp(0.0, 1.0)
}

/// `true` when `screen` (viewport coordinates) overlaps the viewport vertically.
pub fn intersects_viewport(screen: Rect, viewport_height: f64) -> bool {
    screen.y0 < viewport_height && screen.y1 > 0.0
}

/// Drives a progress bar element's `width` (percent) and its dark variant.
#[derive(Clone, Debug)]
pub struct PageProgress {
    bar: ElementId,
    light_section: Option<ElementId>,
    width: Option<f64>,
    dark: Option<bool>,
}

impl PageProgress {
    /// Bar element plus an optional light section (typically the footer).
    pub fn new(bar: ElementId, light_section: Option<ElementId>) -> Self {
        Self {
            bar,
            light_section,
            width: None,
            dark: None,
        }
    }

    /// Bar element.
    pub fn bar(&self) -> ElementId {
        self.bar
    }

    /// Last width written, in percent.
    pub fn width(&self) -> Option<f64> {
        self.width
    }

    /// Recompute from the document's current scroll state; returns `true` if anything
    /// was written.
    pub fn update(&mut self, doc: &mut dyn Document) -> bool {
        let vh = doc.viewport().height;
        let scroll_y = doc.scroll_y();
        let width = scroll_fraction(scroll_y, doc.scroll_height(), vh) * 100.0;
        let dark = self
            .light_section
            .and_then(|el| doc.layout_rect(el))
            .is_some_and(|r| intersects_viewport(r - Vec2::new(0.0, scroll_y), vh));

        let mut changed = false;
        if self.width != Some(width) {
            doc.set_style(self.bar, "width", width);
            self.width = Some(width);
            changed = true;
        }
        if self.dark != Some(dark) {
            doc.set_class(self.bar, DARK_CLASS, dark);
            self.dark = Some(dark);
            changed = true;
        }
        changed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/progress_bar.rs"]
mod tests;

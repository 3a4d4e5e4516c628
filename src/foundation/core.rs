use crate::foundation::error::{ScrollError, ScrollResult};

pub use kurbo::{Point, Rect, Size, Vec2};

/// Opaque identity of a registered trigger.
///
/// Ids are handed out in registration order, so comparing two ids also compares their
/// registration order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TriggerId(pub u32);

impl std::fmt::Display for TriggerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle of an element owned by the document layer.
///
/// The orchestrator only borrows elements; it never creates or frees them.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ElementId(pub u32);

/// Viewport dimensions in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Viewport {
    /// Create a validated viewport; both sides must be finite and non-negative.
    pub fn new(width: f64, height: f64) -> ScrollResult<Self> {
        if !(width.is_finite() && height.is_finite()) || width < 0.0 || height < 0.0 {
            return Err(ScrollError::validation(format!(
                "viewport must be finite and non-negative, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Viewport as a kurbo size.
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Normalize a viewport-space point into `[-1, 1]` on both axes (center is zero).
    ///
    /// Zero-sized viewports map every point to the center.
    pub fn normalized(self, p: Point) -> Vec2 {
        fn axis(v: f64, len: f64) -> f64 {
            if len <= 0.0 {
                return 0.0;
            }
            ((v / len - 0.5) * 2.0).clamp(-1.0, 1.0)
        }
        Vec2::new(axis(p.x, self.width), axis(p.y, self.height))
    }
}

/// Direction of travel between two consecutive scroll samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Scroll offset increased (or stayed equal).
    Forward,
    /// Scroll offset decreased.
    Backward,
}

impl Direction {
    /// Direction implied by moving from `prev` to `next`.
    pub fn between(prev: f64, next: f64) -> Self {
        if next < prev {
            Self::Backward
        } else {
            Self::Forward
        }
    }
}

/// Absolute document-scroll window `[start, end]` of a trigger, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollWindow {
    /// Scroll offset at which progress leaves 0.
    pub start: f64,
    /// Scroll offset at which progress reaches 1.
    pub end: f64,
}

impl ScrollWindow {
    /// Build a window, collapsing an inverted window onto its start.
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Scroll distance covered by the window.
    pub fn span(self) -> f64 {
        self.end - self.start
    }

    /// `true` when start and end coincide.
    pub fn is_degenerate(self) -> bool {
        self.span() <= 0.0
    }

    /// Normalized progress of `scroll_y` through the window, clamped to `[0, 1]`.
    ///
    /// A degenerate window jumps straight to 1 once `scroll_y` reaches its start.
    pub fn progress(self, scroll_y: f64) -> f64 {
        if self.is_degenerate() {
            return if scroll_y >= self.start { 1.0 } else { 0.0 };
        }
        ((scroll_y - self.start) / self.span()).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

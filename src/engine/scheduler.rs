//! Frame scheduler: coalesces raw input events into one batch per animation frame.

use crate::foundation::core::{ElementId, Point, Viewport};

/// Raw input as delivered by the host's event subscriptions.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RawEvent {
    /// The page scrolled to `y`.
    Scroll {
        /// New vertical scroll offset.
        y: f64,
    },
    /// The viewport was resized.
    Resize {
        /// New viewport size.
        viewport: Viewport,
    },
    /// The device orientation changed.
    OrientationChange,
    /// The pointer moved to `position` (viewport coordinates).
    PointerMove {
        /// Pointer position.
        position: Point,
    },
    /// The pointer entered an element.
    PointerEnter {
        /// Entered element.
        target: ElementId,
    },
    /// The pointer left an element.
    PointerLeave {
        /// Left element.
        target: ElementId,
    },
    /// A key was pressed.
    Key {
        /// Key name, e.g. `Escape`.
        key: String,
    },
}

/// Everything that happened since the previous frame.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct FrameBatch {
    /// Frame timestamp, in seconds.
    pub now: f64,
    /// Seconds since the previous frame (0 for the first one).
    pub dt: f64,
    /// Last scroll offset seen, if any scroll event arrived.
    pub scroll: Option<f64>,
    /// Last viewport size seen, if any resize event arrived.
    pub viewport: Option<Viewport>,
    /// `true` when geometry must be re-resolved (resize or orientation change).
    pub invalidate: bool,
    /// Last pointer position seen.
    pub pointer: Option<Point>,
    /// Enter/leave/key events in arrival order.
    pub discrete: Vec<RawEvent>,
    /// Raw events folded into this batch.
    pub coalesced: usize,
}

impl FrameBatch {
    /// `true` when nothing arrived.
    pub fn is_idle(&self) -> bool {
        self.coalesced == 0
    }
}

/// Collects raw events between frames.
///
/// Scroll and pointer-move samples are last-value-wins; intermediate values are
/// discarded. Resize and orientation changes collapse into one invalidation. Discrete
/// events keep their order.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    pending: FrameBatch,
    last_tick: Option<f64>,
    closed: bool,
}

impl FrameScheduler {
    /// Empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one raw event for the next frame.
    pub fn push(&mut self, event: RawEvent) {
        if self.closed {
            return;
        }
        let p = &mut self.pending;
        p.coalesced += 1;
        match event {
            RawEvent::Scroll { y } => p.scroll = Some(y),
            RawEvent::Resize { viewport } => {
                p.viewport = Some(viewport);
                p.invalidate = true;
            }
            RawEvent::OrientationChange => p.invalidate = true,
            RawEvent::PointerMove { position } => p.pointer = Some(position),
            other @ (RawEvent::PointerEnter { .. }
            | RawEvent::PointerLeave { .. }
            | RawEvent::Key { .. }) => p.discrete.push(other),
        }
    }

    /// Close the current frame at `now` (seconds) and return its batch.
    pub fn tick(&mut self, now: f64) -> FrameBatch {
        let dt = self.last_tick.map(|t| (now - t).max(0.0)).unwrap_or(0.0);
        self.last_tick = Some(now);
        let mut batch = std::mem::take(&mut self.pending);
        batch.now = now;
        batch.dt = dt;
        if batch.coalesced > 1 {
            tracing::trace!(events = batch.coalesced, "coalesced raw events");
        }
        batch
    }

    /// Stop accepting events and drop anything pending.
    pub fn close(&mut self) {
        self.closed = true;
        self.pending = FrameBatch::default();
    }

    /// `true` after [`Self::close`].
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/scheduler.rs"]
mod tests;

//! Pin Controller: holds an anchor fixed on screen while its trigger is active.

use std::collections::BTreeMap;

use crate::dom::{Document, PinPlacement};
use crate::foundation::core::{ElementId, Rect, ScrollWindow, TriggerId};
use crate::geometry::provider::ResolvedGeometry;

/// Document-space displacement of a pinned element from its natural position at `p`.
///
/// While pinned the element appears fixed, which in document space means it has
/// travelled `p * span` pixels along with the scroll.
pub fn pinned_offset(window: ScrollWindow, p: f64) -> f64 {
    p.clamp(0.0, 1.0) * window.span()
}

/// Where a pinned trigger's anchor currently lives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinPhase {
    /// In flow at its natural position (progress 0).
    #[default]
    AtStart,
    /// Fixed on screen (progress strictly inside the window).
    Pinned,
    /// In flow, shifted down by the full pinned distance (progress 1).
    AtEnd,
}

impl PinPhase {
    fn for_progress(p: f64) -> Self {
        if p <= 0.0 {
            Self::AtStart
        } else if p >= 1.0 {
            Self::AtEnd
        } else {
            Self::Pinned
        }
    }
}

/// Structural pin change applied during a frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PinEvent {
    /// The anchor left normal flow and is fixed at `screen`.
    Pinned {
        /// Trigger owning the pin.
        trigger: TriggerId,
        /// Fixed box in viewport coordinates.
        screen: Rect,
    },
    /// The anchor returned to normal flow.
    Released {
        /// Trigger owning the pin.
        trigger: TriggerId,
        /// Resting translation from the natural position.
        offset_y: f64,
    },
    /// The fixed box was recomputed after a geometry refresh.
    Reanchored {
        /// Trigger owning the pin.
        trigger: TriggerId,
        /// New fixed box in viewport coordinates.
        screen: Rect,
    },
}

#[derive(Clone, Copy, Debug, Default)]
struct PinRecord {
    phase: PinPhase,
    spacing: f64,
}

/// Tracks pin phase and spacing for every pinned trigger.
#[derive(Debug, Default)]
pub struct PinController {
    records: BTreeMap<TriggerId, PinRecord>,
}

impl PinController {
    /// Empty controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase of `id` (pins that were never observed are at start).
    pub fn phase(&self, id: TriggerId) -> PinPhase {
        self.records.get(&id).map(|r| r.phase).unwrap_or_default()
    }

    /// Reserve the pinned scroll distance after the anchor's placeholder.
    ///
    /// Returns `true` when the spacing changed, which moves everything below the anchor.
    pub fn sync_spacing(
        &mut self,
        id: TriggerId,
        resolved: ResolvedGeometry,
        doc: &mut dyn Document,
    ) -> bool {
        let record = self.records.entry(id).or_default();
        let span = resolved.window.span();
        if record.spacing == span {
            return false;
        }
        record.spacing = span;
        doc.set_pin_spacing(resolved.anchor, span);
        tracing::debug!(trigger = %id, span, "pin spacing reserved");
        true
    }

    /// Move the anchor into the phase implied by `p`; returns the structural change.
    ///
    /// At most one event is produced per call, so a single direction of travel never pins
    /// or releases twice.
    pub fn update(
        &mut self,
        id: TriggerId,
        resolved: ResolvedGeometry,
        p: f64,
        doc: &mut dyn Document,
    ) -> Option<PinEvent> {
        let next = PinPhase::for_progress(p);
        if next == self.phase(id) {
            return None;
        }

        let event = match next {
            PinPhase::Pinned => {
                let screen = fixed_box(resolved, doc)?;
                doc.set_pin(resolved.anchor, PinPlacement::Fixed { screen });
                PinEvent::Pinned {
                    trigger: id,
                    screen,
                }
            }
            PinPhase::AtStart | PinPhase::AtEnd => {
                let offset_y = pinned_offset(resolved.window, p);
                doc.set_pin(resolved.anchor, PinPlacement::Flow { offset_y });
                PinEvent::Released {
                    trigger: id,
                    offset_y,
                }
            }
        };
        self.records.entry(id).or_default().phase = next;
        tracing::debug!(trigger = %id, ?event, "pin changed");
        Some(event)
    }

    /// Recompute the fixed box of an active pin from the placeholder's current layout.
    ///
    /// Progress is left alone; only the screen position is re-derived.
    pub fn reanchor(
        &mut self,
        id: TriggerId,
        resolved: ResolvedGeometry,
        doc: &mut dyn Document,
    ) -> Option<PinEvent> {
        if self.phase(id) != PinPhase::Pinned {
            return None;
        }
        let screen = fixed_box(resolved, doc)?;
        doc.set_pin(resolved.anchor, PinPlacement::Fixed { screen });
        tracing::debug!(trigger = %id, ?screen, "pin re-anchored");
        Some(PinEvent::Reanchored {
            trigger: id,
            screen,
        })
    }

    /// Return every pinned anchor to its natural position and drop all spacing.
    pub fn release_all(&mut self, anchors: &[(TriggerId, ElementId)], doc: &mut dyn Document) {
        for &(id, el) in anchors {
            if self.records.remove(&id).is_some() {
                doc.set_pin(el, PinPlacement::default());
                doc.set_pin_spacing(el, 0.0);
            }
        }
        self.records.clear();
    }
}

/// Screen box the anchor occupied at progress 0, measured from its placeholder.
fn fixed_box(resolved: ResolvedGeometry, doc: &dyn Document) -> Option<Rect> {
    let placeholder = doc.layout_rect(resolved.anchor)?;
    let dy = -resolved.window.start;
    Some(Rect::new(
        placeholder.x0,
        placeholder.y0 + dy,
        placeholder.x1,
        placeholder.y1 + dy,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/engine/pin.rs"]
mod tests;

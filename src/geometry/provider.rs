//! Viewport Geometry Provider: resolves trigger geometry into absolute scroll windows.

use std::collections::BTreeMap;

use crate::dom::Document;
use crate::foundation::core::{ElementId, ScrollWindow, TriggerId, Vec2};
use crate::foundation::error::{ScrollError, ScrollResult};
use crate::geometry::edge::{Anchor, EdgeSpec, EndSpec};

/// Geometry inputs of one trigger.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TriggerGeometry {
    /// Element whose box defines the window.
    pub anchor: Anchor,
    /// Where progress leaves 0.
    #[serde(default = "default_start")]
    pub start: EdgeSpec,
    /// Where progress reaches 1.
    #[serde(default)]
    pub end: EndSpec,
    /// Element the end edge is measured against, when it differs from the anchor.
    #[serde(default)]
    pub end_anchor: Option<Anchor>,
}

fn default_start() -> EdgeSpec {
    EdgeSpec::TOP_BOTTOM
}

impl TriggerGeometry {
    /// Geometry with default `top bottom` / `bottom top` edges.
    pub fn new(anchor: impl Into<Anchor>) -> Self {
        Self {
            anchor: anchor.into(),
            start: default_start(),
            end: EndSpec::default(),
            end_anchor: None,
        }
    }
}

/// A resolved window plus the anchor element it was measured from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedGeometry {
    /// Anchor element at resolution time.
    pub anchor: ElementId,
    /// Absolute scroll window.
    pub window: ScrollWindow,
}

/// Resolves and caches trigger windows.
///
/// Resolution is lazy: a window is computed on first use and kept until
/// [`Self::invalidate`] is called. The provider has no invalidation signal of its own;
/// callers invalidate on resize, orientation change and layout-affecting content loads.
#[derive(Debug, Default)]
pub struct GeometryProvider {
    cache: BTreeMap<TriggerId, ResolvedGeometry>,
    generation: u64,
}

impl GeometryProvider {
    /// Empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every cached window.
    pub fn invalidate(&mut self) {
        self.cache.clear();
        self.generation += 1;
        tracing::debug!(generation = self.generation, "geometry invalidated");
    }

    /// Number of invalidations so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Cached window for `id`, if resolved since the last invalidation.
    pub fn cached(&self, id: TriggerId) -> Option<ResolvedGeometry> {
        self.cache.get(&id).copied()
    }

    /// Cached window, resolving (and caching) it on a miss.
    pub fn window(
        &mut self,
        id: TriggerId,
        geometry: &TriggerGeometry,
        pinned: bool,
        doc: &dyn Document,
    ) -> ScrollResult<ResolvedGeometry> {
        if let Some(hit) = self.cache.get(&id) {
            return Ok(*hit);
        }
        let resolved = Self::resolve(id, geometry, pinned, doc)?;
        self.cache.insert(id, resolved);
        Ok(resolved)
    }

    /// Resolve `geometry` against the current layout without touching the cache.
    ///
    /// For a `pinned` trigger, an end anchor laid out below the anchor is measured
    /// without the anchor's own pin spacing, so the window never depends on the spacing
    /// it reserves.
    ///
    /// Fails with [`ScrollError::MissingAnchor`] when the anchor (or end anchor) is not
    /// in the document.
    pub fn resolve(
        id: TriggerId,
        geometry: &TriggerGeometry,
        pinned: bool,
        doc: &dyn Document,
    ) -> ScrollResult<ResolvedGeometry> {
        let (anchor, anchor_rect) = lookup(id, &geometry.anchor, doc)?;
        let viewport = doc.viewport();
        let start = geometry.start.resolve(anchor_rect, viewport);

        let end_rect = match &geometry.end_anchor {
            Some(end_anchor) => {
                let (end_el, rect) = lookup(id, end_anchor, doc)?;
                let own = doc.pin_spacing(anchor);
                if pinned && end_el != anchor && own > 0.0 && rect.y0 >= anchor_rect.y1 {
                    rect - Vec2::new(0.0, own)
                } else {
                    rect
                }
            }
            None => anchor_rect,
        };
        let end = geometry.end.resolve(start, end_rect, viewport);
        if end < start {
            tracing::debug!(trigger = %id, start, end, "inverted window collapsed to its start");
        }

        Ok(ResolvedGeometry {
            anchor,
            window: ScrollWindow::new(start, end),
        })
    }
}

fn lookup(
    id: TriggerId,
    anchor: &Anchor,
    doc: &dyn Document,
) -> ScrollResult<(ElementId, kurbo::Rect)> {
    anchor
        .lookup(doc)
        .and_then(|el| doc.layout_rect(el).map(|r| (el, r)))
        .ok_or_else(|| ScrollError::missing_anchor(id, anchor.describe()))
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/provider.rs"]
mod tests;

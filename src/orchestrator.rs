//! Public facade tying registry, geometry, pins and the progress engine to one frame tick.

use crate::animation::tween::Tweener;
use crate::dom::Document;
use crate::engine::pin::{PinController, PinEvent};
use crate::engine::progress::{FrameReport, ProgressEngine};
use crate::engine::scheduler::{FrameBatch, FrameScheduler, RawEvent};
use crate::foundation::core::{ElementId, TriggerId};
use crate::foundation::error::{ScrollError, ScrollResult};
use crate::geometry::provider::GeometryProvider;
use crate::policy::ResponsivePolicy;
use crate::trigger::registry::{Trigger, TriggerHandle, TriggerRegistry};
use crate::trigger::spec::TriggerSpec;

/// Everything one [`ScrollOrchestrator::tick`] did.
#[derive(Clone, Debug, Default, serde::Serialize)]
pub struct TickReport {
    /// The coalesced input the tick consumed.
    pub batch: FrameBatch,
    /// Pins re-anchored by a geometry refresh during this tick.
    pub refreshed: Vec<PinEvent>,
    /// The progress pass, when the batch carried a scroll sample.
    pub progress: Option<FrameReport>,
}

/// Scroll-linked animation orchestrator.
///
/// Owns the trigger registry and every piece of per-trigger runtime state. The document
/// and tween engine are borrowed per call; the orchestrator never holds on to them.
#[derive(Debug)]
pub struct ScrollOrchestrator {
    policy: ResponsivePolicy,
    registry: TriggerRegistry,
    geometry: GeometryProvider,
    pins: PinController,
    engine: ProgressEngine,
    scheduler: FrameScheduler,
    torn_down: bool,
}

impl ScrollOrchestrator {
    /// Orchestrator parameterized by a device-class policy computed once at startup.
    pub fn new(policy: ResponsivePolicy) -> Self {
        Self {
            policy,
            registry: TriggerRegistry::new(),
            geometry: GeometryProvider::new(),
            pins: PinController::new(),
            engine: ProgressEngine::new(),
            scheduler: FrameScheduler::new(),
            torn_down: false,
        }
    }

    /// Device-class policy this orchestrator was built with.
    pub fn policy(&self) -> ResponsivePolicy {
        self.policy
    }

    /// Register a trigger; it takes part in the next progress pass.
    pub fn register_trigger(&mut self, spec: TriggerSpec) -> ScrollResult<TriggerHandle> {
        if self.torn_down {
            return Err(ScrollError::validation("orchestrator has been torn down"));
        }
        self.registry.register(spec)
    }

    /// Trigger by handle.
    pub fn trigger(&self, handle: TriggerHandle) -> Option<&Trigger> {
        self.registry.get(handle)
    }

    /// All triggers in registration order.
    pub fn triggers(&self) -> impl Iterator<Item = &Trigger> {
        self.registry.iter()
    }

    /// Pin controller state, read-only.
    pub fn pins(&self) -> &PinController {
        &self.pins
    }

    /// Geometry cache, read-only.
    pub fn geometry(&self) -> &GeometryProvider {
        &self.geometry
    }

    /// Queue a raw input event for the next [`Self::tick`].
    pub fn push_event(&mut self, event: RawEvent) {
        self.scheduler.push(event);
    }

    /// Run one animation frame at `now` (seconds).
    ///
    /// Invalidation is handled before the scroll sample so the progress pass sees fresh
    /// geometry. Scrub smoothing advances every frame, scroll or not.
    #[tracing::instrument(level = "debug", skip(self, doc, tweens))]
    pub fn tick(
        &mut self,
        now: f64,
        doc: &mut dyn Document,
        tweens: &mut dyn Tweener,
    ) -> TickReport {
        let batch = self.scheduler.tick(now);
        if self.torn_down {
            return TickReport {
                batch,
                ..TickReport::default()
            };
        }

        let refreshed = if batch.invalidate {
            self.refresh_geometry(doc)
        } else {
            Vec::new()
        };
        let progress = match batch.scroll {
            Some(y) => Some(self.on_scroll(y, doc, tweens)),
            None => None,
        };
        self.engine
            .advance_scrubs(batch.dt, &mut self.registry, tweens);

        TickReport {
            batch,
            refreshed,
            progress,
        }
    }

    /// Evaluate every trigger against one scroll sample.
    ///
    /// Hosts that do their own frame coalescing may call this directly, at most once per
    /// frame.
    pub fn on_scroll(
        &mut self,
        scroll_y: f64,
        doc: &mut dyn Document,
        tweens: &mut dyn Tweener,
    ) -> FrameReport {
        if self.torn_down {
            return FrameReport::default();
        }
        self.engine.on_scroll(
            scroll_y,
            &mut self.registry,
            &mut self.geometry,
            &mut self.pins,
            doc,
            tweens,
        )
    }

    /// Re-resolve every trigger's window and re-anchor active pins.
    ///
    /// Call after resize, orientation change or any layout-affecting content load.
    /// Progress is not recomputed here; the next scroll sample does that.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn refresh_geometry(&mut self, doc: &mut dyn Document) -> Vec<PinEvent> {
        self.geometry.invalidate();
        let mut spacing_changed = false;
        for trigger in self.registry.iter().filter(|t| t.is_pinned()) {
            if let Ok(resolved) = self
                .geometry
                .window(trigger.id(), trigger.geometry(), true, doc)
            {
                spacing_changed |= self.pins.sync_spacing(trigger.id(), resolved, doc);
            }
        }
        if spacing_changed {
            // Spacing moved everything below the pinned anchors.
            self.geometry.invalidate();
        }

        let mut events = Vec::new();
        for trigger in self.registry.iter() {
            let resolved = match self.geometry.window(
                trigger.id(),
                trigger.geometry(),
                trigger.is_pinned(),
                doc,
            ) {
                Ok(r) => r,
                Err(err) => {
                    tracing::warn!(trigger = %trigger.id(), %err, "geometry refresh skipped");
                    continue;
                }
            };
            if trigger.is_pinned() {
                events.extend(self.pins.reanchor(trigger.id(), resolved, doc));
            }
        }
        tracing::debug!(
            triggers = self.registry.len(),
            reanchored = events.len(),
            "geometry refreshed"
        );
        events
    }

    /// Release every pin, drop every trigger and stop accepting input.
    ///
    /// Anchors are left in normal flow at their natural positions.
    pub fn teardown(&mut self, doc: &mut dyn Document) {
        if self.torn_down {
            return;
        }
        let mut anchors: Vec<(TriggerId, ElementId)> = Vec::new();
        for trigger in self.registry.iter().filter(|t| t.is_pinned()) {
            if let Ok(resolved) = self
                .geometry
                .window(trigger.id(), trigger.geometry(), true, doc)
            {
                anchors.push((trigger.id(), resolved.anchor));
            }
        }
        self.pins.release_all(&anchors, doc);
        self.registry.clear();
        self.geometry.invalidate();
        self.engine.reset();
        self.scheduler.close();
        self.torn_down = true;
        tracing::debug!(released = anchors.len(), "orchestrator torn down");
    }

    /// `true` after [`Self::teardown`].
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}

#[cfg(test)]
#[path = "../tests/unit/orchestrator.rs"]
mod tests;

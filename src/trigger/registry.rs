use crate::animation::tween::TweenHandle;
use crate::engine::scrub::ScrubSmoother;
use crate::foundation::core::TriggerId;
use crate::foundation::error::{ScrollError, ScrollResult};
use crate::geometry::provider::TriggerGeometry;
use crate::select::{BucketTracker, Thresholds};
use crate::trigger::spec::{Callbacks, ToggleActions, TriggerSpec, TriggerState};

/// Handle returned to the page bootstrap on registration.
pub type TriggerHandle = TriggerId;

/// A registered trigger: configuration plus the state carried between frames.
#[derive(Debug)]
pub struct Trigger {
    pub(crate) id: TriggerId,
    pub(crate) label: Option<String>,
    pub(crate) geometry: TriggerGeometry,
    pub(crate) pin: bool,
    pub(crate) scrub: Option<ScrubSmoother>,
    pub(crate) toggle_actions: ToggleActions,
    pub(crate) animation: Option<TweenHandle>,
    pub(crate) buckets: Option<BucketTracker>,
    pub(crate) callbacks: Callbacks,
    pub(crate) last_state: TriggerState,
    pub(crate) last_progress: f64,
}

impl Trigger {
    /// Identity.
    pub fn id(&self) -> TriggerId {
        self.id
    }

    /// Label, or the id when none was given.
    pub fn name(&self) -> String {
        self.label.clone().unwrap_or_else(|| self.id.to_string())
    }

    /// Geometry inputs.
    pub fn geometry(&self) -> &TriggerGeometry {
        &self.geometry
    }

    /// `true` for pinned triggers.
    pub fn is_pinned(&self) -> bool {
        self.pin
    }

    /// `true` when the associated tween follows progress instead of toggle actions.
    pub fn is_scrubbed(&self) -> bool {
        self.scrub.is_some()
    }

    /// Most recently emitted discrete state.
    pub fn state(&self) -> TriggerState {
        self.last_state
    }

    /// Last computed progress.
    pub fn progress(&self) -> f64 {
        self.last_progress
    }

    /// Current bucket, for triggers with thresholds.
    pub fn bucket(&self) -> Option<usize> {
        self.buckets.as_ref().map(BucketTracker::current)
    }

    /// Associated tween, if any.
    pub fn animation(&self) -> Option<TweenHandle> {
        self.animation
    }
}

/// All registered triggers, in registration order.
#[derive(Debug, Default)]
pub struct TriggerRegistry {
    triggers: Vec<Trigger>,
    next_id: u32,
}

impl TriggerRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `spec` and append it.
    ///
    /// Rejected specs (bad thresholds, negative scrub) are not registered and consume no
    /// id.
    pub fn register(&mut self, spec: TriggerSpec) -> ScrollResult<TriggerHandle> {
        let buckets = spec
            .thresholds
            .as_deref()
            .map(Thresholds::new)
            .transpose()?
            .map(|t| BucketTracker::new(t, 0));
        let scrub = match spec.scrub {
            Some(lag) if !(lag.is_finite() && lag >= 0.0) => {
                return Err(ScrollError::validation(format!(
                    "scrub lag must be finite and non-negative, got {lag}"
                )));
            }
            Some(lag) => Some(ScrubSmoother::new(lag)),
            None => None,
        };

        let id = TriggerId(self.next_id);
        self.next_id += 1;
        tracing::debug!(trigger = %id, label = ?spec.label, pin = spec.pin, "trigger registered");
        self.triggers.push(Trigger {
            id,
            label: spec.label,
            geometry: spec.geometry,
            pin: spec.pin,
            scrub,
            toggle_actions: spec.toggle_actions,
            animation: spec.animation,
            buckets,
            callbacks: spec.callbacks,
            last_state: TriggerState::Before,
            last_progress: 0.0,
        });
        Ok(id)
    }

    /// Trigger by id.
    pub fn get(&self, id: TriggerId) -> Option<&Trigger> {
        // Ids are dense and never reused, but `clear` empties the vector.
        self.triggers
            .get(id.0 as usize)
            .filter(|t| t.id == id)
            .or_else(|| self.triggers.iter().find(|t| t.id == id))
    }

    /// Triggers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Trigger> {
        self.triggers.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Trigger> {
        self.triggers.iter_mut()
    }

    /// Number of registered triggers.
    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    /// `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    /// Drop every trigger (and its callbacks).
    pub fn clear(&mut self) {
        self.triggers.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trigger/registry.rs"]
mod tests;

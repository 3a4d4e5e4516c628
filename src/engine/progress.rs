//! Progress Engine: turns one scroll sample into per-trigger progress, crossings and
//! callback invocations.

use smallvec::SmallVec;

use crate::animation::tween::{ToggleAction, Tweener};
use crate::dom::Document;
use crate::engine::pin::{PinController, PinEvent};
use crate::foundation::core::{Direction, TriggerId};
use crate::geometry::provider::{GeometryProvider, ResolvedGeometry};
use crate::trigger::registry::{Trigger, TriggerRegistry};
use crate::trigger::spec::{CallbackCtx, Crossing, TriggerState};

/// Crossings needed to get from `from` to `to`, in the order they happen.
///
/// Skipped intermediate states are replayed: `before -> after` yields `Enter` then
/// `Leave`, `after -> before` yields `EnterBack` then `LeaveBack`.
pub fn crossings(from: TriggerState, to: TriggerState) -> SmallVec<[Crossing; 2]> {
    use TriggerState::{Active, After, Before};
    let mut out = SmallVec::new();
    match (from, to) {
        (Before, Active) => out.push(Crossing::Enter),
        (Active, After) => out.push(Crossing::Leave),
        (Before, After) => out.extend([Crossing::Enter, Crossing::Leave]),
        (After, Active) => out.push(Crossing::EnterBack),
        (Active, Before) => out.push(Crossing::LeaveBack),
        (After, Before) => out.extend([Crossing::EnterBack, Crossing::LeaveBack]),
        (Before, Before) | (Active, Active) | (After, After) => {}
    }
    out
}

/// One crossing emitted during a frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TransitionRecord {
    /// Frame counter at emission.
    pub frame: u64,
    /// Trigger that crossed.
    pub trigger: TriggerId,
    /// Trigger label, when one was given.
    pub label: Option<String>,
    /// Which boundary, in which direction.
    pub crossing: Crossing,
    /// Progress after the sample that caused it.
    pub progress: f64,
    /// Toggle action applied to the associated tween, if any.
    pub action: Option<ToggleAction>,
}

/// Outcome of one progress pass.
#[derive(Clone, Debug, Default, serde::Serialize)]
pub struct FrameReport {
    /// Frame counter of this pass.
    pub frame: u64,
    /// Scroll offset the pass evaluated, if any.
    pub scroll_y: Option<f64>,
    /// Crossings, grouped by trigger in registration order.
    pub transitions: Vec<TransitionRecord>,
    /// Structural pin changes.
    pub pins: Vec<PinEvent>,
    /// Triggers skipped because their anchor was missing.
    pub skipped: Vec<TriggerId>,
}

/// Drives every registered trigger from scroll samples.
#[derive(Debug, Default)]
pub struct ProgressEngine {
    frame: u64,
    last_scroll: Option<f64>,
}

impl ProgressEngine {
    /// Fresh engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate every trigger against `scroll_y`, in registration order.
    ///
    /// A trigger whose anchor is missing is skipped for this pass without affecting the
    /// others.
    #[tracing::instrument(level = "trace", skip_all, fields(scroll_y = scroll_y))]
    #[allow(clippy::too_many_arguments)]
    pub fn on_scroll(
        &mut self,
        scroll_y: f64,
        registry: &mut TriggerRegistry,
        geometry: &mut GeometryProvider,
        pins: &mut PinController,
        doc: &mut dyn Document,
        tweens: &mut dyn Tweener,
    ) -> FrameReport {
        self.frame += 1;
        let mut report = FrameReport {
            frame: self.frame,
            scroll_y: Some(scroll_y),
            ..FrameReport::default()
        };
        let direction = Direction::between(self.last_scroll.unwrap_or(scroll_y), scroll_y);

        for trigger in registry.iter_mut() {
            let pinned = trigger.pin;
            let resolved = match geometry.window(trigger.id, &trigger.geometry, pinned, doc) {
                Ok(r) => r,
                Err(err) => {
                    tracing::warn!(trigger = %trigger.id, %err, "trigger skipped this frame");
                    report.skipped.push(trigger.id);
                    continue;
                }
            };
            if trigger.pin && pins.sync_spacing(trigger.id, resolved, doc) {
                // Everything below the anchor moved; re-measure it lazily.
                geometry.invalidate();
            }
            self.evaluate(trigger, resolved, scroll_y, direction, pins, doc, tweens, &mut report);
        }

        self.last_scroll = Some(scroll_y);
        report
    }

    #[allow(clippy::too_many_arguments)]
    fn evaluate(
        &self,
        trigger: &mut Trigger,
        resolved: ResolvedGeometry,
        scroll_y: f64,
        scroll_direction: Direction,
        pins: &mut PinController,
        doc: &mut dyn Document,
        tweens: &mut dyn Tweener,
        report: &mut FrameReport,
    ) {
        let p = resolved.window.progress(scroll_y);
        let state = TriggerState::from_progress(p);
        let direction = if p == trigger.last_progress {
            scroll_direction
        } else {
            Direction::between(trigger.last_progress, p)
        };
        tracing::trace!(trigger = %trigger.id, p, ?state, "sample");

        if trigger.pin {
            report.pins.extend(pins.update(trigger.id, resolved, p, doc));
        }

        let mut ctx = CallbackCtx {
            trigger: trigger.id,
            anchor: resolved.anchor,
            progress: p,
            direction,
            doc,
            tweens,
        };

        for crossing in crossings(trigger.last_state, state) {
            let action = match trigger.animation {
                Some(handle) if trigger.scrub.is_none() => {
                    let action = trigger.toggle_actions.for_crossing(crossing);
                    ctx.tweens.control(handle, action);
                    Some(action)
                }
                _ => None,
            };
            tracing::debug!(trigger = %trigger.id, ?crossing, p, "crossing");

            if let Some(cb) = trigger.callbacks.for_crossing(crossing) {
                cb(&mut ctx);
            }
            let was_active = trigger.last_state == TriggerState::Active;
            let is_active = crossing.target_state() == TriggerState::Active;
            if was_active != is_active
                && let Some(cb) = trigger.callbacks.on_toggle.as_mut()
            {
                cb(&mut ctx, is_active);
            }
            trigger.last_state = crossing.target_state();

            report.transitions.push(TransitionRecord {
                frame: self.frame,
                trigger: trigger.id,
                label: trigger.label.clone(),
                crossing,
                progress: p,
                action,
            });
        }

        if p != trigger.last_progress {
            if let Some(cb) = trigger.callbacks.on_update.as_mut() {
                cb(&mut ctx);
            }
            if let Some(tracker) = trigger.buckets.as_mut()
                && let Some(bucket) = tracker.update(p)
                && let Some(cb) = trigger.callbacks.on_bucket.as_mut()
            {
                cb(&mut ctx, bucket);
            }
            if let Some(scrub) = trigger.scrub.as_mut() {
                scrub.set_target(p);
            }
        }

        trigger.last_state = state;
        trigger.last_progress = p;
    }

    /// Step every scrub smoother by `dt` and seek its tween.
    ///
    /// Runs every frame, including frames without a scroll sample, so lagging scrubs keep
    /// converging after scrolling stops.
    pub fn advance_scrubs(
        &self,
        dt: f64,
        registry: &mut TriggerRegistry,
        tweens: &mut dyn Tweener,
    ) {
        for trigger in registry.iter_mut() {
            let (Some(scrub), Some(handle)) = (trigger.scrub.as_mut(), trigger.animation) else {
                continue;
            };
            if let Some(v) = scrub.step(dt) {
                tweens.seek(handle, v);
            }
        }
    }

    /// Forget the scroll history (used on teardown).
    pub fn reset(&mut self) {
        self.last_scroll = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/progress.rs"]
mod tests;

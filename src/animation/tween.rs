//! Tweening engine interface and an in-memory implementation.
//!
//! The orchestrator only ever talks to [`Tweener`]; hosts that already own an animation
//! engine adapt it behind the trait. [`TweenEngine`] interpolates numeric style
//! properties over wall-clock time and writes them into a [`Document`] on every tick.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::animation::ease::Ease;
use crate::dom::Document;
use crate::foundation::core::ElementId;
use crate::foundation::error::ScrollError;

/// Numeric style properties keyed by name (`x`, `y`, `opacity`, `rotationY`, ...).
pub type PropertySet = BTreeMap<String, f64>;

/// Handle to a tween created through a [`Tweener`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TweenHandle(pub u32);

/// What a boundary crossing does to a trigger's associated tween.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleAction {
    /// Play forward from the current position.
    Play,
    /// Leave the tween untouched.
    #[default]
    None,
    /// Play backward from the current position.
    Reverse,
    /// Rewind to the start and pause.
    Reset,
    /// Hold at the current position.
    Pause,
}

impl FromStr for ToggleAction {
    type Err = ScrollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "play" => Ok(Self::Play),
            "none" => Ok(Self::None),
            "reverse" => Ok(Self::Reverse),
            "reset" => Ok(Self::Reset),
            "pause" => Ok(Self::Pause),
            other => Err(ScrollError::validation(format!(
                "unknown toggle action '{other}'"
            ))),
        }
    }
}

/// Timing options for a tween.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TweenOptions {
    /// Duration of one target's animation, in seconds.
    pub duration: f64,
    /// Easing applied to each target's local progress.
    pub ease: Ease,
    /// Delay before the first target starts, in seconds.
    pub delay: f64,
    /// Extra delay per subsequent target, in seconds.
    pub stagger: f64,
    /// Create the tween paused at its start.
    pub paused: bool,
    /// Kill tracks of other tweens animating the same element property.
    pub overwrite: bool,
}

impl Default for TweenOptions {
    fn default() -> Self {
        Self {
            duration: 0.5,
            ease: Ease::OutQuad,
            delay: 0.0,
            stagger: 0.0,
            paused: false,
            overwrite: false,
        }
    }
}

/// Tweening engine as consumed by the orchestrator.
///
/// Calls are fire-and-forget except where a trigger keeps the handle to apply toggle
/// actions or to scrub.
pub trait Tweener {
    /// Animate `targets` from their current values to `to`.
    fn animate(&mut self, targets: &[ElementId], to: PropertySet, opts: TweenOptions)
    -> TweenHandle;

    /// Animate `targets` from explicit `from` values to `to`.
    ///
    /// Start values are applied on the next render even when the tween is paused.
    fn animate_from(
        &mut self,
        targets: &[ElementId],
        from: PropertySet,
        to: PropertySet,
        opts: TweenOptions,
    ) -> TweenHandle;

    /// Apply a toggle action to a previously returned handle.
    fn control(&mut self, handle: TweenHandle, action: ToggleAction);

    /// Jump to normalized `progress` and pause (scrubbing).
    fn seek(&mut self, handle: TweenHandle, progress: f64);

    /// Normalized playhead position, or `None` for unknown handles.
    fn progress(&self, handle: TweenHandle) -> Option<f64>;
}

/// Value a property is assumed to have before anything has been written.
pub fn neutral_value(property: &str) -> f64 {
    match property {
        "opacity" | "scale" | "scaleX" | "scaleY" => 1.0,
        _ => 0.0,
    }
}

// Instant tweens still get a non-zero timeline so that play/reverse have an end to reach.
const MIN_SPAN: f64 = 1e-9;

#[derive(Clone, Debug)]
struct Track {
    el: ElementId,
    property: String,
    from: Option<f64>,
    to: f64,
    offset: f64,
}

#[derive(Clone, Debug)]
struct TweenState {
    tracks: Vec<Track>,
    opts: TweenOptions,
    total: f64,
    playhead: f64,
    rate: f64,
    playing: bool,
    dirty: bool,
}

impl TweenState {
    fn progress(&self) -> f64 {
        (self.playhead / self.total).clamp(0.0, 1.0)
    }

    fn render(&mut self, doc: &mut dyn Document) {
        let duration = self.opts.duration;
        let delay = self.opts.delay;
        for track in &mut self.tracks {
            let local_time = self.playhead - delay - track.offset;
            let local = if duration <= 0.0 {
                if local_time > 0.0 { 1.0 } else { 0.0 }
            } else {
                (local_time / duration).clamp(0.0, 1.0)
            };
            let from = *track.from.get_or_insert_with(|| {
                doc.style(track.el, &track.property)
                    .unwrap_or_else(|| neutral_value(&track.property))
            });
            let eased = self.opts.ease.apply(local);
            doc.set_style(track.el, &track.property, from + (track.to - from) * eased);
        }
        self.dirty = false;
    }
}

/// In-memory tween engine driven by [`TweenEngine::tick`].
#[derive(Debug, Default)]
pub struct TweenEngine {
    tweens: BTreeMap<TweenHandle, TweenState>,
    next_id: u32,
}

impl TweenEngine {
    /// Empty engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live tweens.
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    /// `true` when no tweens are live.
    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// `true` while the tween is advancing on its own.
    pub fn is_playing(&self, handle: TweenHandle) -> bool {
        self.tweens.get(&handle).is_some_and(|t| t.playing)
    }

    /// Advance every playing tween by `dt` seconds and write values into `doc`.
    pub fn tick(&mut self, dt: f64, doc: &mut dyn Document) {
        let dt = dt.max(0.0);
        for state in self.tweens.values_mut() {
            if state.playing {
                state.playhead = (state.playhead + state.rate * dt).clamp(0.0, state.total);
                let at_edge = if state.rate > 0.0 {
                    state.playhead >= state.total
                } else {
                    state.playhead <= 0.0
                };
                if at_edge {
                    state.playing = false;
                }
                state.render(doc);
            } else if state.dirty {
                state.render(doc);
            }
        }
    }

    fn insert(
        &mut self,
        targets: &[ElementId],
        from: Option<PropertySet>,
        to: PropertySet,
        opts: TweenOptions,
    ) -> TweenHandle {
        if opts.overwrite {
            self.kill_overlapping(targets, &to);
        }

        let mut tracks = Vec::with_capacity(targets.len() * to.len());
        for (i, &el) in targets.iter().enumerate() {
            let offset = opts.stagger.max(0.0) * i as f64;
            for (property, &value) in &to {
                tracks.push(Track {
                    el,
                    property: property.clone(),
                    from: from.as_ref().and_then(|f| f.get(property).copied()),
                    to: value,
                    offset,
                });
            }
        }

        let span = opts.stagger.max(0.0) * targets.len().saturating_sub(1) as f64;
        let total = (opts.delay.max(0.0) + opts.duration.max(0.0) + span).max(MIN_SPAN);
        let handle = TweenHandle(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.tweens.insert(
            handle,
            TweenState {
                tracks,
                opts,
                total,
                playhead: 0.0,
                rate: 1.0,
                playing: !opts.paused,
                dirty: from.is_some(),
            },
        );
        handle
    }

    fn kill_overlapping(&mut self, targets: &[ElementId], to: &PropertySet) {
        for state in self.tweens.values_mut() {
            state
                .tracks
                .retain(|t| !(targets.contains(&t.el) && to.contains_key(&t.property)));
        }
        self.tweens.retain(|_, s| !s.tracks.is_empty());
    }
}

impl Tweener for TweenEngine {
    fn animate(
        &mut self,
        targets: &[ElementId],
        to: PropertySet,
        opts: TweenOptions,
    ) -> TweenHandle {
        self.insert(targets, None, to, opts)
    }

    fn animate_from(
        &mut self,
        targets: &[ElementId],
        from: PropertySet,
        to: PropertySet,
        opts: TweenOptions,
    ) -> TweenHandle {
        self.insert(targets, Some(from), to, opts)
    }

    fn control(&mut self, handle: TweenHandle, action: ToggleAction) {
        let Some(state) = self.tweens.get_mut(&handle) else {
            tracing::trace!(?handle, "toggle action on unknown tween");
            return;
        };
        match action {
            ToggleAction::None => {}
            ToggleAction::Play => {
                state.rate = 1.0;
                state.playing = state.playhead < state.total;
            }
            ToggleAction::Reverse => {
                state.rate = -1.0;
                state.playing = state.playhead > 0.0;
            }
            ToggleAction::Reset => {
                state.playhead = 0.0;
                state.rate = 1.0;
                state.playing = false;
                state.dirty = true;
            }
            ToggleAction::Pause => state.playing = false,
        }
    }

    fn seek(&mut self, handle: TweenHandle, progress: f64) {
        if let Some(state) = self.tweens.get_mut(&handle) {
            state.playhead = progress.clamp(0.0, 1.0) * state.total;
            state.playing = false;
            state.dirty = true;
        }
    }

    fn progress(&self, handle: TweenHandle) -> Option<f64> {
        self.tweens.get(&handle).map(TweenState::progress)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;

use std::str::FromStr;

use crate::animation::tween::{ToggleAction, TweenHandle, Tweener};
use crate::dom::Document;
use crate::foundation::core::{Direction, ElementId, TriggerId};
use crate::foundation::error::ScrollError;
use crate::geometry::provider::TriggerGeometry;

/// Discrete state of a trigger relative to its window.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TriggerState {
    /// Progress is 0: the window has not been reached.
    #[default]
    Before,
    /// Progress is strictly between 0 and 1.
    Active,
    /// Progress is 1: the window has been passed.
    After,
}

impl TriggerState {
    /// State implied by a clamped progress value.
    pub fn from_progress(p: f64) -> Self {
        if p <= 0.0 {
            Self::Before
        } else if p >= 1.0 {
            Self::After
        } else {
            Self::Active
        }
    }
}

/// A boundary crossing, named by the direction it was taken in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Crossing {
    /// `before -> active` while scrolling forward.
    Enter,
    /// `active -> after` while scrolling forward.
    Leave,
    /// `after -> active` while scrolling backward.
    EnterBack,
    /// `active -> before` while scrolling backward.
    LeaveBack,
}

impl Crossing {
    /// Direction of travel this crossing implies.
    pub fn direction(self) -> Direction {
        match self {
            Self::Enter | Self::Leave => Direction::Forward,
            Self::EnterBack | Self::LeaveBack => Direction::Backward,
        }
    }

    /// State the trigger is in after the crossing.
    pub fn target_state(self) -> TriggerState {
        match self {
            Self::Enter | Self::EnterBack => TriggerState::Active,
            Self::Leave => TriggerState::After,
            Self::LeaveBack => TriggerState::Before,
        }
    }
}

/// Toggle actions for the four crossings, in `enter leave enter-back leave-back` order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ToggleActions {
    /// Applied on [`Crossing::Enter`].
    pub on_enter: ToggleAction,
    /// Applied on [`Crossing::Leave`].
    pub on_leave: ToggleAction,
    /// Applied on [`Crossing::EnterBack`].
    pub on_enter_back: ToggleAction,
    /// Applied on [`Crossing::LeaveBack`].
    pub on_leave_back: ToggleAction,
}

impl Default for ToggleActions {
    fn default() -> Self {
        Self {
            on_enter: ToggleAction::Play,
            on_leave: ToggleAction::None,
            on_enter_back: ToggleAction::None,
            on_leave_back: ToggleAction::None,
        }
    }
}

impl ToggleActions {
    /// Action for one crossing.
    pub fn for_crossing(self, crossing: Crossing) -> ToggleAction {
        match crossing {
            Crossing::Enter => self.on_enter,
            Crossing::Leave => self.on_leave,
            Crossing::EnterBack => self.on_enter_back,
            Crossing::LeaveBack => self.on_leave_back,
        }
    }
}

impl FromStr for ToggleActions {
    type Err = ScrollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = s.split_whitespace().collect();
        let [enter, leave, enter_back, leave_back] = words.as_slice() else {
            return Err(ScrollError::validation(format!(
                "toggle actions need exactly four words, got '{s}'"
            )));
        };
        Ok(Self {
            on_enter: enter.parse()?,
            on_leave: leave.parse()?,
            on_enter_back: enter_back.parse()?,
            on_leave_back: leave_back.parse()?,
        })
    }
}

fn action_word(a: ToggleAction) -> &'static str {
    match a {
        ToggleAction::Play => "play",
        ToggleAction::None => "none",
        ToggleAction::Reverse => "reverse",
        ToggleAction::Reset => "reset",
        ToggleAction::Pause => "pause",
    }
}

impl std::fmt::Display for ToggleActions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            action_word(self.on_enter),
            action_word(self.on_leave),
            action_word(self.on_enter_back),
            action_word(self.on_leave_back)
        )
    }
}

impl TryFrom<String> for ToggleActions {
    type Error = ScrollError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ToggleActions> for String {
    fn from(value: ToggleActions) -> Self {
        value.to_string()
    }
}

/// Everything a callback may touch while it runs.
///
/// The registry itself is deliberately absent, so a callback cannot register triggers
/// into the pass that is invoking it.
pub struct CallbackCtx<'a> {
    /// Trigger being processed.
    pub trigger: TriggerId,
    /// Anchor element as resolved for this frame.
    pub anchor: ElementId,
    /// Progress after this frame's sample.
    pub progress: f64,
    /// Direction of travel for this trigger.
    pub direction: Direction,
    /// Document/layout layer.
    pub doc: &'a mut dyn Document,
    /// Tweening engine.
    pub tweens: &'a mut dyn Tweener,
}

/// Plain trigger callback.
pub type Callback = Box<dyn FnMut(&mut CallbackCtx<'_>)>;
/// Callback receiving a flag (`on_toggle`) or bucket index (`on_bucket`).
pub type ValueCallback<T> = Box<dyn FnMut(&mut CallbackCtx<'_>, T)>;

/// Optional callbacks of a trigger.
#[derive(Default)]
pub struct Callbacks {
    pub(crate) on_enter: Option<Callback>,
    pub(crate) on_leave: Option<Callback>,
    pub(crate) on_enter_back: Option<Callback>,
    pub(crate) on_leave_back: Option<Callback>,
    pub(crate) on_update: Option<Callback>,
    pub(crate) on_toggle: Option<ValueCallback<bool>>,
    pub(crate) on_bucket: Option<ValueCallback<usize>>,
}

impl Callbacks {
    pub(crate) fn for_crossing(&mut self, crossing: Crossing) -> Option<&mut Callback> {
        match crossing {
            Crossing::Enter => self.on_enter.as_mut(),
            Crossing::Leave => self.on_leave.as_mut(),
            Crossing::EnterBack => self.on_enter_back.as_mut(),
            Crossing::LeaveBack => self.on_leave_back.as_mut(),
        }
    }
}

impl std::fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_enter", &self.on_enter.is_some())
            .field("on_leave", &self.on_leave.is_some())
            .field("on_enter_back", &self.on_enter_back.is_some())
            .field("on_leave_back", &self.on_leave_back.is_some())
            .field("on_update", &self.on_update.is_some())
            .field("on_toggle", &self.on_toggle.is_some())
            .field("on_bucket", &self.on_bucket.is_some())
            .finish()
    }
}

/// Registration request for one trigger.
#[derive(Debug)]
pub struct TriggerSpec {
    pub(crate) label: Option<String>,
    pub(crate) geometry: TriggerGeometry,
    pub(crate) pin: bool,
    pub(crate) scrub: Option<f64>,
    pub(crate) toggle_actions: ToggleActions,
    pub(crate) animation: Option<TweenHandle>,
    pub(crate) thresholds: Option<Vec<f64>>,
    pub(crate) callbacks: Callbacks,
}

impl TriggerSpec {
    /// Trigger over `geometry` with default toggle actions (`play none none none`).
    pub fn new(geometry: TriggerGeometry) -> Self {
        Self {
            label: None,
            geometry,
            pin: false,
            scrub: None,
            toggle_actions: ToggleActions::default(),
            animation: None,
            thresholds: None,
            callbacks: Callbacks::default(),
        }
    }

    /// Name used in logs and reports.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Pin the anchor while the trigger is active.
    pub fn pin(mut self, pin: bool) -> Self {
        self.pin = pin;
        self
    }

    /// Couple the associated tween to progress, with `lag` seconds of smoothing.
    pub fn scrub(mut self, lag: f64) -> Self {
        self.scrub = Some(lag);
        self
    }

    /// Toggle actions for the associated tween.
    pub fn toggle_actions(mut self, actions: ToggleActions) -> Self {
        self.toggle_actions = actions;
        self
    }

    /// Tween controlled by this trigger.
    pub fn animation(mut self, handle: TweenHandle) -> Self {
        self.animation = Some(handle);
        self
    }

    /// Bucket boundaries for [`Self::on_bucket`]; validated at registration.
    pub fn thresholds(mut self, thresholds: Vec<f64>) -> Self {
        self.thresholds = Some(thresholds);
        self
    }

    /// Called on `before -> active` while scrolling forward.
    pub fn on_enter(mut self, f: impl FnMut(&mut CallbackCtx<'_>) + 'static) -> Self {
        self.callbacks.on_enter = Some(Box::new(f));
        self
    }

    /// Called on `active -> after` while scrolling forward.
    pub fn on_leave(mut self, f: impl FnMut(&mut CallbackCtx<'_>) + 'static) -> Self {
        self.callbacks.on_leave = Some(Box::new(f));
        self
    }

    /// Called on `after -> active` while scrolling backward.
    pub fn on_enter_back(mut self, f: impl FnMut(&mut CallbackCtx<'_>) + 'static) -> Self {
        self.callbacks.on_enter_back = Some(Box::new(f));
        self
    }

    /// Called on `active -> before` while scrolling backward.
    pub fn on_leave_back(mut self, f: impl FnMut(&mut CallbackCtx<'_>) + 'static) -> Self {
        self.callbacks.on_leave_back = Some(Box::new(f));
        self
    }

    /// Called on every frame where progress changed.
    pub fn on_update(mut self, f: impl FnMut(&mut CallbackCtx<'_>) + 'static) -> Self {
        self.callbacks.on_update = Some(Box::new(f));
        self
    }

    /// Called with `true` when the trigger becomes active and `false` when it stops being.
    pub fn on_toggle(mut self, f: impl FnMut(&mut CallbackCtx<'_>, bool) + 'static) -> Self {
        self.callbacks.on_toggle = Some(Box::new(f));
        self
    }

    /// Called with the new bucket index whenever it changes.
    pub fn on_bucket(mut self, f: impl FnMut(&mut CallbackCtx<'_>, usize) + 'static) -> Self {
        self.callbacks.on_bucket = Some(Box::new(f));
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trigger/spec.rs"]
mod tests;

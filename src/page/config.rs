//! JSON page configuration.
//!
//! A page is a headless document plus the triggers and effects wired onto it. Values that
//! differ between compact and full devices are written as [`Responsive`] values.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::animation::tween::{PropertySet, TweenOptions};
use crate::dom::ElementDef;
use crate::foundation::core::Viewport;
use crate::foundation::error::{ScrollError, ScrollResult};
use crate::geometry::edge::{Anchor, EdgeSpec, EndSpec};
use crate::geometry::provider::TriggerGeometry;
use crate::policy::{DEFAULT_BREAKPOINT_PX, DeviceClass, Responsive, ResponsivePolicy};
use crate::select::Thresholds;
use crate::trigger::spec::ToggleActions;

fn default_breakpoint() -> f64 {
    DEFAULT_BREAKPOINT_PX
}

fn default_attr() -> String {
    "src".to_owned()
}

/// Whole page: document, triggers and page-level effects.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageConfig {
    /// Widths at or below this are compact.
    #[serde(default = "default_breakpoint")]
    pub breakpoint: f64,
    /// The document the page runs against.
    pub document: DocumentConfig,
    /// Triggers, in registration order.
    #[serde(default)]
    pub triggers: Vec<TriggerConfig>,
    /// Reading-progress bar.
    #[serde(default)]
    pub progress_bar: Option<ProgressBarConfig>,
    /// Pointer tilt on hero text.
    #[serde(default)]
    pub hover_tilt: Option<HoverTiltConfig>,
    /// Cursor-following image over category items.
    #[serde(default)]
    pub hover_image: Option<HoverImageConfig>,
}

/// Initial headless document.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DocumentConfig {
    /// Initial viewport.
    pub viewport: Viewport,
    /// Scroll height before any pin spacing.
    pub content_height: f64,
    /// Elements with their natural boxes.
    #[serde(default)]
    pub elements: Vec<ElementDef>,
}

/// One trigger.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TriggerConfig {
    /// Name used in logs and replay output.
    #[serde(default)]
    pub label: Option<String>,
    /// Element (selector or index) whose box defines the window.
    pub anchor: Anchor,
    /// Start edge; defaults to `top bottom`.
    #[serde(default)]
    pub start: Option<Responsive<EdgeSpec>>,
    /// End edge; defaults to `bottom top`.
    #[serde(default)]
    pub end: Option<Responsive<EndSpec>>,
    /// Element the end edge is measured against.
    #[serde(default)]
    pub end_anchor: Option<Anchor>,
    /// Pin the anchor while active.
    #[serde(default)]
    pub pin: bool,
    /// Scrub lag in seconds; absent means toggle-driven.
    #[serde(default)]
    pub scrub: Option<Responsive<f64>>,
    /// Tween control per crossing.
    #[serde(default)]
    pub toggle_actions: ToggleActions,
    /// What the trigger does.
    #[serde(default)]
    pub action: Option<TriggerAction>,
    /// Register the trigger only on this device class; absent means every class.
    #[serde(default)]
    pub only: Option<DeviceClass>,
}

impl TriggerConfig {
    /// Geometry for `policy`.
    pub fn geometry(&self, policy: ResponsivePolicy) -> TriggerGeometry {
        let mut geometry = TriggerGeometry::new(self.anchor.clone());
        if let Some(start) = &self.start {
            geometry.start = start.resolve(policy);
        }
        if let Some(end) = &self.end {
            geometry.end = end.resolve(policy);
        }
        geometry.end_anchor = self.end_anchor.clone();
        geometry
    }

    /// `true` when the trigger is registered under `policy`.
    pub fn applies_to(&self, policy: ResponsivePolicy) -> bool {
        self.only.is_none_or(|class| class == policy.class())
    }

    fn name(&self, index: usize) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| format!("triggers[{index}]"))
    }

    fn validate(&self, index: usize) -> ScrollResult<()> {
        let name = self.name(index);
        if let Some(scrub) = &self.scrub {
            for lag in both(scrub) {
                if !(lag.is_finite() && lag >= 0.0) {
                    return Err(ScrollError::validation(format!(
                        "trigger '{name}': scrub must be finite and >= 0, got {lag}"
                    )));
                }
            }
        }
        match &self.action {
            None | Some(TriggerAction::ToggleClass { .. }) => Ok(()),
            Some(TriggerAction::Tween { options, .. }) => {
                if !(options.duration.is_finite() && options.duration >= 0.0) {
                    return Err(ScrollError::validation(format!(
                        "trigger '{name}': tween duration must be finite and >= 0"
                    )));
                }
                Ok(())
            }
            Some(TriggerAction::ImageSequence {
                frames, thresholds, ..
            }) => {
                for t in both(thresholds) {
                    let t = Thresholds::new(&t).map_err(|e| match e {
                        ScrollError::InvalidThresholds(msg) => {
                            ScrollError::invalid_thresholds(format!("trigger '{name}': {msg}"))
                        }
                        other => other,
                    })?;
                    if t.buckets() != frames.len() {
                        return Err(ScrollError::validation(format!(
                            "trigger '{name}': {} thresholds need {} frames, got {}",
                            t.as_slice().len(),
                            t.buckets(),
                            frames.len()
                        )));
                    }
                }
                Ok(())
            }
        }
    }
}

/// Behavior attached to a trigger.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TriggerAction {
    /// A tween owned by the trigger: toggle-driven, or seeked when scrubbed.
    Tween {
        /// Selector of the animated elements.
        targets: String,
        /// Explicit start values (rendered immediately).
        #[serde(default)]
        from: Option<PropertySet>,
        /// End values.
        to: Responsive<PropertySet>,
        /// Timing. The tween is always created paused.
        #[serde(default)]
        options: TweenOptions,
    },
    /// Add `class` to the targets while the trigger is active.
    ToggleClass {
        /// Selector of the elements to toggle.
        targets: String,
        /// Class name.
        class: String,
    },
    /// Swap an attribute through `frames` as progress crosses `thresholds`.
    ImageSequence {
        /// Selector of the element whose attribute is swapped.
        target: String,
        /// Attribute name.
        #[serde(default = "default_attr")]
        attr: String,
        /// One value per bucket.
        frames: Vec<String>,
        /// Bucket boundaries.
        thresholds: Responsive<Vec<f64>>,
    },
}

/// Reading-progress bar.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProgressBarConfig {
    /// Selector of the bar.
    pub bar: String,
    /// Selector of the light section that switches the bar to its dark variant.
    #[serde(default)]
    pub light_section: Option<String>,
}

/// Pointer tilt.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HoverTiltConfig {
    /// Selector of the tilted elements.
    pub targets: String,
}

/// Cursor-following image.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HoverImageConfig {
    /// Selector of the moving container.
    pub container: String,
    /// Selector of the image receiving `src`; defaults to the container.
    #[serde(default)]
    pub image: Option<String>,
    /// Selector of the hoverable items (each with a `data-image` attribute).
    pub items: String,
}

impl PageConfig {
    /// Parse a page from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ScrollResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ScrollError::serde(format!("parse page JSON: {e}")))
    }

    /// Parse a page from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ScrollResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ScrollError::validation(format!("open page JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Device class of this page, decided once from the initial viewport.
    pub fn policy(&self) -> ResponsivePolicy {
        ResponsivePolicy::classify(self.document.viewport.width, self.breakpoint)
    }

    /// Check everything that can be checked without a live document.
    pub fn validate(&self) -> ScrollResult<()> {
        if !(self.breakpoint.is_finite() && self.breakpoint > 0.0) {
            return Err(ScrollError::validation("breakpoint must be finite and > 0"));
        }
        let vp = self.document.viewport;
        Viewport::new(vp.width, vp.height)?;
        if !(self.document.content_height.is_finite() && self.document.content_height >= 0.0) {
            return Err(ScrollError::validation(
                "document content_height must be finite and >= 0",
            ));
        }
        for (i, trigger) in self.triggers.iter().enumerate() {
            trigger.validate(i)?;
        }
        Ok(())
    }
}

/// Both per-class values of a responsive setting (the same value twice when fixed).
fn both<T: Clone>(value: &Responsive<T>) -> [T; 2] {
    [
        value.resolve(ResponsivePolicy::fixed(DeviceClass::Compact)),
        value.resolve(ResponsivePolicy::fixed(DeviceClass::Full)),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/page/config.rs"]
mod tests;

//! Responsive policy: a device class computed once at startup and passed explicitly.

/// Default breakpoint, in CSS pixels. Widths at or below it are compact.
pub const DEFAULT_BREAKPOINT_PX: f64 = 768.0;

/// Coarse device classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceClass {
    /// Narrow viewports: reduced magnitudes, no pointer effects.
    Compact,
    /// Everything else.
    Full,
}

/// Read-once classification threaded into every component that needs it.
///
/// It is never re-evaluated: rotating a device or resizing a window after startup does
/// not change the class. This is a known limitation of the design.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ResponsivePolicy {
    class: DeviceClass,
    breakpoint: f64,
}

impl ResponsivePolicy {
    /// Classify `viewport_width` against `breakpoint`.
    pub fn classify(viewport_width: f64, breakpoint: f64) -> Self {
        let class = if viewport_width <= breakpoint {
            DeviceClass::Compact
        } else {
            DeviceClass::Full
        };
        tracing::debug!(viewport_width, breakpoint, ?class, "device class");
        Self { class, breakpoint }
    }

    /// Fixed class, for tests and hosts that already know.
    pub fn fixed(class: DeviceClass) -> Self {
        Self {
            class,
            breakpoint: DEFAULT_BREAKPOINT_PX,
        }
    }

    /// The device class.
    pub fn class(self) -> DeviceClass {
        self.class
    }

    /// Breakpoint used for classification.
    pub fn breakpoint(self) -> f64 {
        self.breakpoint
    }

    /// `true` for compact devices.
    pub fn is_compact(self) -> bool {
        self.class == DeviceClass::Compact
    }

    /// Hover tilt and cursor-following imagery run only on full devices.
    pub fn pointer_effects_enabled(self) -> bool {
        !self.is_compact()
    }

    /// Pick the value for this device class.
    pub fn pick<T>(self, compact: T, full: T) -> T {
        match self.class {
            DeviceClass::Compact => compact,
            DeviceClass::Full => full,
        }
    }
}

/// A configuration value that may differ by device class.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Responsive<T> {
    /// Per-class values.
    ByClass {
        /// Value for compact devices.
        compact: T,
        /// Value for full devices.
        full: T,
    },
    /// Same value everywhere.
    Fixed(T),
}

impl<T: Clone> Responsive<T> {
    /// Value for `policy`.
    pub fn resolve(&self, policy: ResponsivePolicy) -> T {
        match self {
            Self::Fixed(v) => v.clone(),
            Self::ByClass { compact, full } => policy.pick(compact, full).clone(),
        }
    }
}

impl<T> From<T> for Responsive<T> {
    fn from(value: T) -> Self {
        Self::Fixed(value)
    }
}

#[cfg(test)]
#[path = "../tests/unit/policy.rs"]
mod tests;

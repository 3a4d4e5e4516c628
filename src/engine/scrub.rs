/// Progress below this distance from the target snaps onto it.
const SNAP_EPSILON: f64 = 1e-4;

/// Smooths scrubbed progress toward the trigger's raw progress.
///
/// A lag of `0` couples the visual progress to scroll directly. A positive lag `s`
/// closes `1 - exp(-dt / s)` of the remaining distance per frame.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrubSmoother {
    lag: f64,
    current: f64,
    target: f64,
    dirty: bool,
}

impl ScrubSmoother {
    /// Smoother starting at progress 0.
    pub fn new(lag: f64) -> Self {
        Self {
            lag: lag.max(0.0),
            current: 0.0,
            target: 0.0,
            dirty: false,
        }
    }

    /// Configured lag, in seconds.
    pub fn lag(&self) -> f64 {
        self.lag
    }

    /// Visual progress as of the last step.
    pub fn current(&self) -> f64 {
        self.current
    }

    /// `true` once the visual progress has caught up.
    pub fn is_settled(&self) -> bool {
        !self.dirty && self.current == self.target
    }

    /// Set the raw progress to chase.
    pub fn set_target(&mut self, target: f64) {
        if target != self.target {
            self.target = target;
            self.dirty = true;
        }
    }

    /// Advance by `dt` seconds; returns the new visual progress when it moved.
    pub fn step(&mut self, dt: f64) -> Option<f64> {
        if !self.dirty {
            return None;
        }
        let next = if self.lag <= 0.0 {
            self.target
        } else {
            let alpha = 1.0 - (-dt.max(0.0) / self.lag).exp();
            let v = self.current + (self.target - self.current) * alpha;
            if (self.target - v).abs() < SNAP_EPSILON {
                self.target
            } else {
                v
            }
        };
        if next == self.target {
            self.dirty = false;
        }
        if next == self.current {
            return None;
        }
        self.current = next;
        Some(next)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/scrub.rs"]
mod tests;

//! Recorded input traces for headless replay.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::engine::scheduler::RawEvent;
use crate::foundation::error::{ScrollError, ScrollResult};

/// Events delivered between two frames, closed by a frame at `at` seconds.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TraceStep {
    /// Frame timestamp in seconds.
    pub at: f64,
    /// Raw events in arrival order.
    #[serde(default)]
    pub events: Vec<RawEvent>,
}

/// A sequence of frames with their raw input.
///
/// Accepts either `{"steps": [...]}` or a bare array of steps.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct ReplayTrace {
    /// Frames in time order.
    pub steps: Vec<TraceStep>,
}

impl<'de> Deserialize<'de> for ReplayTrace {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Obj { steps: Vec<TraceStep> },
            Arr(Vec<TraceStep>),
        }

        let steps = match Repr::deserialize(deserializer)? {
            Repr::Obj { steps } | Repr::Arr(steps) => steps,
        };
        Ok(Self { steps })
    }
}

impl ReplayTrace {
    /// Scroll to each offset on consecutive frames `1/fps` apart.
    pub fn from_scroll_offsets(offsets: &[f64], fps: f64) -> Self {
        let dt = if fps > 0.0 { 1.0 / fps } else { 0.0 };
        let steps = offsets
            .iter()
            .enumerate()
            .map(|(i, &y)| TraceStep {
                at: i as f64 * dt,
                events: vec![RawEvent::Scroll { y }],
            })
            .collect();
        Self { steps }
    }

    /// Parse a trace from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ScrollResult<Self> {
        let trace: Self = serde_json::from_reader(r)
            .map_err(|e| ScrollError::serde(format!("parse trace JSON: {e}")))?;
        trace.validate()?;
        Ok(trace)
    }

    /// Parse a trace from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ScrollResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ScrollError::validation(format!("open trace JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Timestamps must be finite and non-decreasing.
    pub fn validate(&self) -> ScrollResult<()> {
        let mut prev = f64::NEG_INFINITY;
        for (i, step) in self.steps.iter().enumerate() {
            if !step.at.is_finite() || step.at < prev {
                return Err(ScrollError::validation(format!(
                    "trace step {i}: timestamp {} is not finite and non-decreasing",
                    step.at
                )));
            }
            prev = step.at;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/trace.rs"]
mod tests;

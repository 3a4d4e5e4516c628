//! Threshold-mapped state selection: buckets continuous progress into discrete states.

use smallvec::SmallVec;

use crate::foundation::error::{ScrollError, ScrollResult};

/// Strictly increasing, finite threshold boundaries.
///
/// `k` thresholds define `k + 1` buckets.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Thresholds(SmallVec<[f64; 4]>);

impl Thresholds {
    /// Validate and wrap a boundary sequence.
    pub fn new(values: &[f64]) -> ScrollResult<Self> {
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(ScrollError::invalid_thresholds(format!(
                "threshold {bad} is not finite"
            )));
        }
        if let Some(w) = values.windows(2).find(|w| w[0] >= w[1]) {
            return Err(ScrollError::invalid_thresholds(format!(
                "thresholds must be strictly increasing, found {} then {}",
                w[0], w[1]
            )));
        }
        Ok(Self(values.iter().copied().collect()))
    }

    /// Number of buckets (`len + 1`).
    pub fn buckets(&self) -> usize {
        self.0.len() + 1
    }

    /// Boundary values.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Bucket index of `p`: the number of thresholds `<= p`.
    pub fn select(&self, p: f64) -> usize {
        self.0.partition_point(|t| *t <= p)
    }
}

impl TryFrom<Vec<f64>> for Thresholds {
    type Error = ScrollError;

    fn try_from(value: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Thresholds> for Vec<f64> {
    fn from(value: Thresholds) -> Self {
        value.0.into_vec()
    }
}

/// Select the bucket of `p` for an unvalidated threshold sequence.
pub fn select_state(p: f64, thresholds: &[f64]) -> ScrollResult<usize> {
    Ok(Thresholds::new(thresholds)?.select(p))
}

/// Remembers the current bucket and reports only changes.
///
/// Swaps driven by this are instantaneous at the boundary; nothing is tweened.
#[derive(Clone, Debug)]
pub struct BucketTracker {
    thresholds: Thresholds,
    current: usize,
}

impl BucketTracker {
    /// Tracker starting in bucket `initial`.
    pub fn new(thresholds: Thresholds, initial: usize) -> Self {
        Self {
            thresholds,
            current: initial,
        }
    }

    /// Current bucket.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Thresholds in use.
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Feed a new progress value; returns the new bucket if it changed.
    pub fn update(&mut self, p: f64) -> Option<usize> {
        let next = self.thresholds.select(p);
        if next == self.current {
            return None;
        }
        self.current = next;
        Some(next)
    }
}

#[cfg(test)]
#[path = "../tests/unit/select.rs"]
mod tests;

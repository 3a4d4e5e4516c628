use crate::foundation::core::TriggerId;

/// Convenience result type used across scrollcast.
pub type ScrollResult<T> = Result<T, ScrollError>;

/// Top-level error taxonomy used by orchestrator APIs.
#[derive(thiserror::Error, Debug)]
pub enum ScrollError {
    /// The trigger's anchor element is not present in the document.
    ///
    /// Recoverable: the trigger is skipped for the current cycle.
    #[error("missing anchor for trigger {trigger}: '{selector}'")]
    MissingAnchor {
        /// Trigger whose geometry could not be resolved.
        trigger: TriggerId,
        /// Selector of the absent element.
        selector: String,
    },

    /// Threshold boundaries are not strictly increasing (or not finite).
    #[error("invalid thresholds: {0}")]
    InvalidThresholds(String),

    /// Invalid user-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrollError {
    /// Build a [`ScrollError::MissingAnchor`] value.
    pub fn missing_anchor(trigger: TriggerId, selector: impl Into<String>) -> Self {
        Self::MissingAnchor {
            trigger,
            selector: selector.into(),
        }
    }

    /// Build a [`ScrollError::InvalidThresholds`] value.
    pub fn invalid_thresholds(msg: impl Into<String>) -> Self {
        Self::InvalidThresholds(msg.into())
    }

    /// Build a [`ScrollError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScrollError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` for errors that only affect one trigger for one cycle.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::MissingAnchor { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

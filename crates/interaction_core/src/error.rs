//! Configuration error types
//!
//! Only misconfiguration is an error. Geometric misses and redundant
//! add/remove calls are reported as `None`/`false`, never as errors.

/// Errors raised when building interaction components
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum InteractionError {
    /// A grab interactable was created without any collider
    #[error("grab interactable needs at least one collider")]
    NoColliders,

    /// A size, radius, distance or duration that must be positive was not
    #[error("{name} must be positive, got {value}")]
    NonPositive {
        /// Field name
        name: &'static str,
        /// Offending value
        value: f32,
    },

    /// A value that must not be negative was
    #[error("{name} must not be negative, got {value}")]
    Negative {
        /// Field name
        name: &'static str,
        /// Offending value
        value: f32,
    },

    /// A hysteresis band whose start/stop thresholds are the wrong way round
    #[error("{name}: start threshold {start} must be inside stop threshold {stop}")]
    InvertedThresholds {
        /// Band name
        name: &'static str,
        /// Start threshold
        start: f32,
        /// Stop threshold
        stop: f32,
    },

    /// A capacity limit of zero would make the interactable unusable
    #[error("{0} must be at least 1 when limited")]
    ZeroCapacity(&'static str),

    /// A log level string that `log` does not recognise
    #[error("unknown log level: {0}")]
    UnknownLogLevel(String),

    /// The global logger could not be installed
    #[error("logger initialisation failed: {0}")]
    Logging(String),
}

/// Fail with [`InteractionError::NonPositive`] unless `value > 0`
pub(crate) fn ensure_positive(name: &'static str, value: f32) -> Result<(), InteractionError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(InteractionError::NonPositive { name, value })
    }
}

/// Fail with [`InteractionError::Negative`] unless `value >= 0`
pub(crate) fn ensure_non_negative(name: &'static str, value: f32) -> Result<(), InteractionError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(InteractionError::Negative { name, value })
    }
}

// Typed failures for session construction and sensor reads.
// Invariants: undefined velocity is not an error and never appears here.

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("history capacity must be positive")]
    ZeroCapacity,
    #[error("history of {capacity} samples cannot hold a derivative window of {window}")]
    CapacityTooSmall { capacity: usize, window: usize },
    #[error("sampling period must be positive")]
    ZeroPeriod,
    #[error("rep end velocity {end} must stay below start velocity {start}")]
    ThresholdOrder { start: f32, end: f32 },
}

#[derive(Debug, Error)]
#[error("sensor unavailable: {reason}")]
pub struct SensorUnavailable {
    pub reason: String,
}

impl SensorUnavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for SensorUnavailable {
    fn from(err: std::io::Error) -> Self {
        Self::new(err.to_string())
    }
}

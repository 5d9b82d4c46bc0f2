// Session configuration: sampling cadence, history depth, rep thresholds.
// All values are fixed for a session's lifetime.

use serde::Serialize;

use crate::error::ConfigError;
use crate::estimator::DERIVATIVE_WINDOW;
use crate::rep::RepThresholds;

#[derive(Clone, Copy, Debug, Serialize)]
pub struct SessionConfig {
    pub sampling_period_ms: u64,
    pub history_duration_ms: u64,
    pub rep_start_velocity: f32,
    pub rep_end_velocity: f32,
    pub rep_speed_cutoff: f32,
    pub unit_scale: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sampling_period_ms: 100,
            history_duration_ms: 5 * 60 * 1000,
            rep_start_velocity: 0.1,
            rep_end_velocity: 0.02,
            rep_speed_cutoff: 1.5,
            unit_scale: 1.0,
        }
    }
}

impl SessionConfig {
    // Ring capacity: how many samples the history window holds.
    pub fn capacity(&self) -> usize {
        if self.sampling_period_ms == 0 {
            return 0;
        }
        (self.history_duration_ms / self.sampling_period_ms) as usize
    }

    pub fn thresholds(&self) -> RepThresholds {
        RepThresholds {
            start_velocity: self.rep_start_velocity,
            end_velocity: self.rep_end_velocity,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sampling_period_ms == 0 {
            return Err(ConfigError::ZeroPeriod);
        }
        let capacity = self.capacity();
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if capacity <= DERIVATIVE_WINDOW {
            return Err(ConfigError::CapacityTooSmall {
                capacity,
                window: DERIVATIVE_WINDOW,
            });
        }
        if self.rep_end_velocity >= self.rep_start_velocity {
            return Err(ConfigError::ThresholdOrder {
                start: self.rep_start_velocity,
                end: self.rep_end_velocity,
            });
        }
        Ok(())
    }
}

// Centered finite-difference velocity estimation over the sample ring.
// Invariants: missing history is reported as None, never as a number.

use crate::buffers::RingBuffer;

// One-sample step of the two-point formula (f(x+h) - f(x-h)) / 2h.
pub const SAMPLE_STEP: usize = 1;

// Offset behind the newest write at which the derivative is evaluated. The
// look-ahead neighbor is then the just-written sample and the look-behind
// neighbor sits one step older on the other side.
pub const EVAL_OFFSET: usize = SAMPLE_STEP;

// Samples that must exist before the formula has both neighbors.
pub const DERIVATIVE_WINDOW: usize = 2 * SAMPLE_STEP + 1;

#[derive(Clone, Copy, Debug)]
pub struct VelocityEstimator {
    dt_s: f32,
}

impl VelocityEstimator {
    pub fn new(sampling_period_ms: u64) -> Self {
        Self {
            dt_s: sampling_period_ms as f32 / 1000.0,
        }
    }

    // Raw-units-per-second velocity at `from_latest` samples behind the
    // newest write, or None while either neighbor has never been written.
    pub fn estimate(&self, ring: &RingBuffer<f32>, from_latest: usize) -> Option<f32> {
        if from_latest < SAMPLE_STEP {
            return None;
        }
        let oldest_needed = from_latest + SAMPLE_STEP;
        if ring.samples_written() <= oldest_needed {
            return None;
        }
        let ahead = ring.at_offset((from_latest - SAMPLE_STEP) as isize);
        let behind = ring.at_offset(oldest_needed as isize);
        Some((ahead - behind) / (2.0 * SAMPLE_STEP as f32 * self.dt_s))
    }
}

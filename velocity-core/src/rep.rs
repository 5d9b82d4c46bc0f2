// Rep segmentation over the velocity stream.
// Invariants: the start threshold sits above the end threshold, so a signal
// hovering between the two never toggles the machine.

use crate::model::RepClass;

#[derive(Clone, Copy, Debug)]
pub struct RepThresholds {
    pub start_velocity: f32,
    pub end_velocity: f32,
}

#[derive(Clone, Debug)]
pub struct RepDetector {
    thresholds: RepThresholds,
    in_rep: bool,
    peak_velocity: f32,
}

impl RepDetector {
    pub fn new(thresholds: RepThresholds) -> Self {
        Self {
            thresholds,
            in_rep: false,
            peak_velocity: 0.0,
        }
    }

    pub fn in_rep(&self) -> bool {
        self.in_rep
    }

    // Advances the machine by one velocity reading. Returns the running peak
    // in raw units when this reading closed a rep.
    pub fn update(&mut self, velocity: f32) -> Option<f32> {
        if !self.in_rep && velocity > self.thresholds.start_velocity {
            self.in_rep = true;
            self.peak_velocity = velocity;
        }

        if self.in_rep {
            if velocity > self.peak_velocity {
                self.peak_velocity = velocity;
            }
            if velocity < self.thresholds.end_velocity {
                self.in_rep = false;
                return Some(self.peak_velocity);
            }
        }
        None
    }
}

// Pure classification of a finished rep against the speed cutoff; no feedback
// into the detector.
pub fn classify(peak_velocity: f32, speed_cutoff: f32) -> RepClass {
    if peak_velocity < speed_cutoff {
        RepClass::Slow
    } else {
        RepClass::Fast
    }
}

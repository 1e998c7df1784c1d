//! Shake filter: accelerometer magnitude → smoothed shake intensity.
//!
//! ```text
//!  (x, y, z) ──▶ |a| ──▶ Δ|a| ──▶ EMA (decay 0.9) ──▶ > threshold ? ──▶ ShakeDetected
//! ```
//!
//! The intensity is the exponentially smoothed rate of change of the
//! acceleration magnitude.  Gravity alone contributes a constant
//! magnitude, so a device at rest settles at zero intensity regardless of
//! how it is held.
//!
//! Detection is edge-triggered: the filter fires on the sample where the
//! intensity rises above the threshold, then stays silent until the
//! intensity has decayed back to or below it.

use super::SampleTriple;

/// Output of one [`ShakeFilter::observe`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShakeSignal {
    /// Smoothed magnitude delta after this sample.
    pub intensity: f32,
    /// True only on the sample that crossed the threshold.
    pub shake_detected: bool,
}

/// Persistent filter state.  Reset only at process start.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShakeFilterState {
    pub last_magnitude: f32,
    pub smoothed_delta: f32,
}

pub struct ShakeFilter {
    state: ShakeFilterState,
    threshold: f32,
    decay: f32,
    /// False until the first valid sample has seeded `last_magnitude`.
    primed: bool,
    /// Latched while the intensity sits above the threshold.
    above_threshold: bool,
}

impl ShakeFilter {
    pub fn new(threshold: f32, decay: f32) -> Self {
        Self {
            state: ShakeFilterState::default(),
            threshold,
            decay,
            primed: false,
            above_threshold: false,
        }
    }

    /// Swap tuning parameters without losing the running state.
    pub fn retune(&mut self, threshold: f32, decay: f32) {
        self.threshold = threshold;
        self.decay = decay;
    }

    /// Feed one accelerometer sample.
    ///
    /// Non-finite samples leave the state untouched and never fire.
    pub fn observe(&mut self, sample: SampleTriple) -> ShakeSignal {
        if !sample.is_finite() {
            return ShakeSignal {
                intensity: self.state.smoothed_delta,
                shake_detected: false,
            };
        }

        let magnitude = sample.magnitude();
        if !magnitude.is_finite() {
            // Components near f32::MAX overflow when squared.
            return ShakeSignal {
                intensity: self.state.smoothed_delta,
                shake_detected: false,
            };
        }
        if !self.primed {
            self.state.last_magnitude = magnitude;
            self.primed = true;
        }

        let delta = magnitude - self.state.last_magnitude;
        self.state.smoothed_delta =
            (self.state.smoothed_delta * self.decay + delta).clamp(-f32::MAX, f32::MAX);
        self.state.last_magnitude = magnitude;

        let intensity = self.state.smoothed_delta;
        let mut shake_detected = false;
        if intensity > self.threshold {
            if !self.above_threshold {
                self.above_threshold = true;
                shake_detected = true;
            }
        } else {
            self.above_threshold = false;
        }

        ShakeSignal {
            intensity,
            shake_detected,
        }
    }

    pub fn intensity(&self) -> f32 {
        self.state.smoothed_delta
    }

    pub fn state(&self) -> ShakeFilterState {
        self.state
    }
}

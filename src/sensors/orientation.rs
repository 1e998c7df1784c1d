//! Orientation debouncer: pitch angle → discrete Landscape/Portrait events.
//!
//! | |pitch|          | Classification |
//! |------------------|----------------|
//! | < 30°            | Landscape      |
//! | 30° – 60°        | none (dead zone) |
//! | > 60°            | Portrait       |
//!
//! Two layers keep the output quiet: the dead zone stops flapping at a
//! single boundary, and the debounce window (1000 ms by default) drops
//! every sample that arrives too soon after an accepted change.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Landscape,
    Portrait,
}

/// Debouncer state.  Mutated only on accepted transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrientationState {
    pub current: Orientation,
    /// Timestamp of the last accepted change; `None` until the first one.
    pub last_change_ms: Option<u64>,
}

impl Default for OrientationState {
    fn default() -> Self {
        // Device starts lying flat.
        Self {
            current: Orientation::Landscape,
            last_change_ms: None,
        }
    }
}

pub struct OrientationDebouncer {
    state: OrientationState,
    landscape_max_deg: f32,
    portrait_min_deg: f32,
    window_ms: u64,
}

impl OrientationDebouncer {
    pub fn new(landscape_max_deg: f32, portrait_min_deg: f32, window_ms: u32) -> Self {
        Self {
            state: OrientationState::default(),
            landscape_max_deg,
            portrait_min_deg,
            window_ms: u64::from(window_ms),
        }
    }

    pub fn retune(&mut self, landscape_max_deg: f32, portrait_min_deg: f32, window_ms: u32) {
        self.landscape_max_deg = landscape_max_deg;
        self.portrait_min_deg = portrait_min_deg;
        self.window_ms = u64::from(window_ms);
    }

    /// Feed one pitch reading taken at `now_ms`.
    ///
    /// Returns the new orientation only when it differs from the current
    /// one and the debounce window since the last change has elapsed.
    pub fn observe(&mut self, pitch_deg: f32, now_ms: u64) -> Option<Orientation> {
        if !pitch_deg.is_finite() {
            return None;
        }

        if let Some(last) = self.state.last_change_ms {
            // A timestamp behind the last change counts as inside the window.
            if now_ms < last || now_ms - last < self.window_ms {
                return None;
            }
        }

        let next = self.classify(pitch_deg)?;
        if next == self.state.current {
            return None;
        }

        self.state.current = next;
        self.state.last_change_ms = Some(now_ms);
        Some(next)
    }

    fn classify(&self, pitch_deg: f32) -> Option<Orientation> {
        let tilt = pitch_deg.abs();
        if tilt < self.landscape_max_deg {
            Some(Orientation::Landscape)
        } else if tilt > self.portrait_min_deg {
            Some(Orientation::Portrait)
        } else {
            None
        }
    }

    pub fn current(&self) -> Orientation {
        self.state.current
    }

    pub fn state(&self) -> OrientationState {
        self.state
    }
}

//! Sensor subsystem: sample records, the two signal filters, and the
//! aggregating [`GestureDetector`].
//!
//! The detector owns both filters and turns one batch of raw
//! [`SensorRecord`]s into the discrete [`Gesture`]s the state machine
//! consumes.
//!
//! ```text
//!  SensorBatch ──▶ accelerometer pass ──▶ ShakeFilter ──▶ shake?  ──yes──▶ [Shake]
//!                                                           │
//!                                                           no
//!                                                           ▼
//!                  orientation pass ──▶ OrientationDebouncer ──▶ [Landscape | Portrait]*
//! ```
//!
//! A shake anywhere in the batch wins: the orientation samples of that
//! batch are never evaluated, so the debouncer cannot accept a change the
//! state machine never saw.

pub mod orientation;
pub mod shake;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;
use crate::error::FeedError;
use orientation::{Orientation, OrientationDebouncer};
use shake::ShakeFilter;

/// Maximum records per batch.
pub const MAX_BATCH: usize = 32;

/// Maximum gestures a single batch can yield.
pub const MAX_GESTURES: usize = 4;

/// Index of the pitch angle within an orientation record's `values`
/// (`[azimuth, pitch, roll]`).
const PITCH_INDEX: usize = 1;

// ---------------------------------------------------------------------------
// Raw records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    Accelerometer,
    Orientation,
}

/// One reading from the sensor feed.
///
/// Accelerometer: `values = [x, y, z]` in m/s².
/// Orientation: `values = [azimuth, pitch, roll]` in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorRecord {
    pub kind: SensorKind,
    pub values: [f32; 3],
    pub timestamp_ms: u64,
}

impl SensorRecord {
    pub fn accelerometer(x: f32, y: f32, z: f32, timestamp_ms: u64) -> Self {
        Self {
            kind: SensorKind::Accelerometer,
            values: [x, y, z],
            timestamp_ms,
        }
    }

    pub fn orientation(pitch_deg: f32, timestamp_ms: u64) -> Self {
        Self {
            kind: SensorKind::Orientation,
            values: [0.0, pitch_deg, 0.0],
            timestamp_ms,
        }
    }
}

/// A bounded group of records delivered together by the feed.
pub type SensorBatch = heapless::Vec<SensorRecord, MAX_BATCH>;

/// One accelerometer reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleTriple {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl SampleTriple {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl TryFrom<&SensorRecord> for SampleTriple {
    type Error = FeedError;

    fn try_from(record: &SensorRecord) -> Result<Self, Self::Error> {
        let [x, y, z] = record.values;
        let sample = Self::new(x, y, z);
        if sample.is_finite() {
            Ok(sample)
        } else {
            Err(FeedError::NonFinite)
        }
    }
}

// ---------------------------------------------------------------------------
// Gestures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Shake,
    Orientation(Orientation),
}

/// Result of evaluating one batch.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// Gestures in delivery order.  At most one `Shake`, never mixed with
    /// orientation changes.
    pub gestures: heapless::Vec<Gesture, MAX_GESTURES>,
    /// Records dropped as malformed.
    pub rejected: u32,
}

// ---------------------------------------------------------------------------
// GestureDetector
// ---------------------------------------------------------------------------

/// Owns the shake filter and the orientation debouncer.
pub struct GestureDetector {
    shake: ShakeFilter,
    orientation: OrientationDebouncer,
    rejected_total: u64,
}

impl GestureDetector {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            shake: ShakeFilter::new(config.shake_threshold, config.shake_decay),
            orientation: OrientationDebouncer::new(
                config.landscape_max_pitch_deg,
                config.portrait_min_pitch_deg,
                config.orientation_debounce_ms,
            ),
            rejected_total: 0,
        }
    }

    /// Apply new tuning without resetting filter state.
    pub fn reconfigure(&mut self, config: &SessionConfig) {
        self.shake
            .retune(config.shake_threshold, config.shake_decay);
        self.orientation.retune(
            config.landscape_max_pitch_deg,
            config.portrait_min_pitch_deg,
            config.orientation_debounce_ms,
        );
    }

    /// Evaluate one batch.  Malformed records are counted and skipped;
    /// a single flaky sample must not disturb either filter.
    pub fn observe_batch(&mut self, batch: &[SensorRecord]) -> BatchOutcome {
        let mut out = BatchOutcome::default();
        let mut shaken = false;

        for record in batch
            .iter()
            .filter(|r| r.kind == SensorKind::Accelerometer)
        {
            match SampleTriple::try_from(record) {
                Ok(sample) => {
                    let signal = self.shake.observe(sample);
                    if signal.shake_detected {
                        debug!(
                            "SHAKE: intensity {:.1} at t={}ms",
                            signal.intensity, record.timestamp_ms
                        );
                        shaken = true;
                    }
                }
                Err(e) => {
                    out.rejected += 1;
                    warn!("Dropping accelerometer record at t={}ms: {}", record.timestamp_ms, e);
                }
            }
        }

        if shaken {
            // Capacity is MAX_GESTURES > 0; the vec is empty here.
            let _ = out.gestures.push(Gesture::Shake);
            self.rejected_total += u64::from(out.rejected);
            return out;
        }

        for record in batch.iter().filter(|r| r.kind == SensorKind::Orientation) {
            let pitch = record.values[PITCH_INDEX];
            if !pitch.is_finite() {
                out.rejected += 1;
                warn!(
                    "Dropping orientation record at t={}ms: {}",
                    record.timestamp_ms,
                    FeedError::NonFinite
                );
                continue;
            }
            if let Some(next) = self.orientation.observe(pitch, record.timestamp_ms) {
                debug!("TILT: {:?} at t={}ms", next, record.timestamp_ms);
                if out.gestures.push(Gesture::Orientation(next)).is_err() {
                    warn!("Gesture buffer full, dropping {:?}", next);
                }
            }
        }

        self.rejected_total += u64::from(out.rejected);
        out
    }

    /// Latest smoothed shake intensity.
    pub fn shake_intensity(&self) -> f32 {
        self.shake.intensity()
    }

    /// Current debounced orientation.
    pub fn orientation(&self) -> Orientation {
        self.orientation.current()
    }

    /// Total malformed records dropped since startup.
    pub fn rejected_total(&self) -> u64 {
        self.rejected_total
    }
}

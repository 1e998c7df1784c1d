//! Mock adapters for integration tests.
//!
//! Records every actuator call so tests can assert on the full command
//! history without a console, speaker or vibration motor.

use pomoshake::app::events::AppEvent;
use pomoshake::app::ports::{ActuatorPort, EventSink, SensorFeed};
use pomoshake::fsm::context::VibrationPattern;
use pomoshake::sensors::{SensorBatch, SensorRecord};

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ActuatorCall {
    CompletionAlert,
    BreakEndAlert,
    Vibrate(u32),
    Status(String),
    Timer(String),
    Celebration { title: String, message: String },
}

// ── MockHardware ──────────────────────────────────────────────

#[derive(Default)]
pub struct MockHardware {
    pub calls: Vec<ActuatorCall>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, call: &ActuatorCall) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    pub fn last_status(&self) -> Option<&str> {
        self.calls.iter().rev().find_map(|c| match c {
            ActuatorCall::Status(s) => Some(s.as_str()),
            _ => None,
        })
    }

    pub fn last_timer(&self) -> Option<&str> {
        self.calls.iter().rev().find_map(|c| match c {
            ActuatorCall::Timer(s) => Some(s.as_str()),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl ActuatorPort for MockHardware {
    fn play_completion_alert(&mut self) {
        self.calls.push(ActuatorCall::CompletionAlert);
    }

    fn play_break_end_alert(&mut self) {
        self.calls.push(ActuatorCall::BreakEndAlert);
    }

    fn vibrate(&mut self, pattern: VibrationPattern) {
        self.calls.push(ActuatorCall::Vibrate(pattern.duration_ms));
    }

    fn set_status_text(&mut self, text: &str) {
        self.calls.push(ActuatorCall::Status(text.to_string()));
    }

    fn set_timer_text(&mut self, text: &str) {
        self.calls.push(ActuatorCall::Timer(text.to_string()));
    }

    fn show_celebration(&mut self, title: &str, message: &str) {
        self.calls.push(ActuatorCall::Celebration {
            title: title.to_string(),
            message: message.to_string(),
        });
    }
}

// ── Event sink ────────────────────────────────────────────────

#[derive(Default)]
pub struct LogSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Scripted sensor feed ──────────────────────────────────────

/// Hands out pre-built batches in order.
#[allow(dead_code)]
pub struct ScriptedFeed {
    batches: std::vec::IntoIter<SensorBatch>,
}

#[allow(dead_code)]
impl ScriptedFeed {
    pub fn new(batches: Vec<SensorBatch>) -> Self {
        Self {
            batches: batches.into_iter(),
        }
    }
}

impl SensorFeed for ScriptedFeed {
    fn next_batch(&mut self) -> Option<SensorBatch> {
        self.batches.next()
    }
}

// ── Sample builders ───────────────────────────────────────────

pub const G: f32 = 9.806_65;

/// Device at rest then a hard jolt: exactly one shake.
pub fn shake_at(t_ms: u64) -> SensorBatch {
    batch(&[
        SensorRecord::accelerometer(0.0, 0.0, G, t_ms),
        SensorRecord::accelerometer(0.0, 0.0, 45.0, t_ms + 20),
        SensorRecord::accelerometer(0.0, 0.0, G, t_ms + 40),
    ])
}

pub fn tilt_at(pitch_deg: f32, t_ms: u64) -> SensorBatch {
    batch(&[SensorRecord::orientation(pitch_deg, t_ms)])
}

pub fn batch(records: &[SensorRecord]) -> SensorBatch {
    SensorBatch::from_slice(records).expect("test batch fits")
}

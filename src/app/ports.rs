//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ SessionService (domain)
//! ```
//!
//! Driven adapters (sensor feeds, actuators, event sinks, config sources)
//! implement these traits.  The [`SessionService`](super::service::SessionService)
//! consumes them via generics, so the domain core never touches a platform
//! API directly.

use crate::config::SessionConfig;
use crate::error::ConfigError;
use crate::fsm::context::VibrationPattern;
use crate::sensors::SensorBatch;

// ───────────────────────────────────────────────────────────────
// Sensor feed (driven adapter: platform → domain)
// ───────────────────────────────────────────────────────────────

/// Source of raw sensor batches, in delivery order.
pub trait SensorFeed {
    /// Next batch, or `None` once the feed is exhausted.
    fn next_batch(&mut self) -> Option<SensorBatch>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → sound / vibration / screen)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the service calls this to produce user feedback.
///
/// Every call is fire-and-forget.  Implementations log their own failures
/// and never report them back; a missing speaker must not stall a session.
pub trait ActuatorPort {
    /// Work session finished.
    fn play_completion_alert(&mut self);

    /// Break finished.
    fn play_break_end_alert(&mut self);

    fn vibrate(&mut self, pattern: VibrationPattern);

    /// Replace the status line.
    fn set_status_text(&mut self, text: &str);

    /// Replace the countdown display (`mm:ss`).
    fn set_timer_text(&mut self, text: &str);

    /// Show the end-of-session celebration.
    fn show_celebration(&mut self, title: &str, message: &str);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: config source → domain)
// ───────────────────────────────────────────────────────────────

/// Loads session configuration.
///
/// Implementations MUST validate before returning: out-of-range values are
/// rejected with [`ConfigError::ValidationFailed`], not silently clamped.
pub trait ConfigPort {
    fn load(&self) -> Result<SessionConfig, ConfigError>;
}

//! Outbound application events.
//!
//! The [`SessionService`](super::service::SessionService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on the
//! other side decide what to do with them.

use crate::control::countdown::CountdownState;
use crate::fsm::SessionState;
use crate::sensors::Gesture;
use crate::sensors::orientation::Orientation;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The service has started (carries initial state).
    Started(SessionState),

    /// The session moved between states.
    StateChanged { from: SessionState, to: SessionState },

    /// A gesture was recognised from the sensor feed.
    Gesture(Gesture),

    /// A work session ran to zero.  Carries the running total.
    SessionCompleted { count: u32 },

    /// Configuration was replaced at runtime.
    ConfigUpdated,

    /// The service stopped accepting sensor input.
    Stopped,

    /// Point-in-time snapshot, emitted once per tick.
    Telemetry(SessionSnapshot),
}

/// A point-in-time view of the session, suitable for logging or display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub work: CountdownState,
    pub break_timer: CountdownState,
    pub completed_sessions: u32,
    pub tick_count: u64,
    pub rejected_samples: u64,
    pub shake_intensity: f32,
    pub orientation: Orientation,
}

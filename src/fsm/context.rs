//! Shared mutable context threaded through every FSM handler.
//!
//! `SessionContext` is the single struct that state handlers read from and
//! write to.  It owns both countdowns, the live configuration, and the
//! outbox of actuator commands produced by the current dispatch.  Think of
//! it as the "blackboard" in a blackboard architecture.

use log::warn;

use crate::config::SessionConfig;
use crate::control::countdown::Countdown;

use super::SessionEvent;

/// Maximum actuator commands a single dispatch can queue.
///
/// The busiest path (final work tick falling through to the break) queues six.
pub const OUTBOX_CAP: usize = 8;

// ---------------------------------------------------------------------------
// Actuator commands (written by state handlers; flushed by the service)
// ---------------------------------------------------------------------------

/// Single vibration pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VibrationPattern {
    pub duration_ms: u32,
}

/// User-facing session status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Ready,
    Running,
    Paused,
    Break,
    Waiting,
}

impl SessionStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Ready => "Shake to start!",
            Self::Running => "Timer running...",
            Self::Paused => "Paused",
            Self::Break => "Break time...",
            Self::Waiting => "Break over. Shake to restart.",
        }
    }
}

/// One side effect requested by a state handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCommand {
    CompletionAlert,
    BreakEndAlert,
    Vibrate(VibrationPattern),
    Status(SessionStatus),
    /// Remaining seconds to display as `mm:ss`.
    TimerText(u32),
    /// Show the configured celebration title and message.
    Celebration,
}

pub type Outbox = heapless::Vec<ActuatorCommand, OUTBOX_CAP>;

// ---------------------------------------------------------------------------
// SessionContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct SessionContext {
    // -- Timers --
    pub work: Countdown,
    pub break_timer: Countdown,

    // -- Configuration --
    pub config: SessionConfig,

    // -- Outputs --
    /// Commands to be applied to the actuator port after the dispatch.
    pub outbox: Outbox,

    // -- Counters --
    /// Work sessions run to completion.
    pub completed_sessions: u32,
}

impl SessionContext {
    /// Create a new context with both timers loaded and stopped.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            work: Countdown::new(config.work_duration_secs),
            break_timer: Countdown::new(config.break_duration_secs),
            config,
            outbox: Outbox::new(),
            completed_sessions: 0,
        }
    }

    /// Queue an actuator command.  Overflow is logged and dropped; side
    /// effects never hold up a transition.
    pub fn push(&mut self, cmd: ActuatorCommand) {
        if self.outbox.push(cmd).is_err() {
            warn!("Actuator outbox full, dropping {:?}", cmd);
        }
    }

    /// Cancel, reload and start the work timer.
    pub fn restart_work(&mut self) {
        self.work.start(self.config.work_duration_secs);
    }

    /// Advance whichever timer is running by one second.
    ///
    /// Queues the new remaining time for display and maps an expiry onto
    /// the matching FSM event.
    pub fn tick_timers(&mut self) -> Option<SessionEvent> {
        if self.work.is_running() {
            let expired = self.work.tick();
            self.push(ActuatorCommand::TimerText(self.work.remaining_secs()));
            return expired.map(|_| SessionEvent::WorkExpired);
        }
        if self.break_timer.is_running() {
            let expired = self.break_timer.tick();
            self.push(ActuatorCommand::TimerText(self.break_timer.remaining_secs()));
            return expired.map(|_| SessionEvent::BreakExpired);
        }
        None
    }

    /// Number of countdowns currently running (0 or 1 by construction).
    pub fn running_timers(&self) -> usize {
        usize::from(self.work.is_running()) + usize::from(self.break_timer.is_running())
    }
}

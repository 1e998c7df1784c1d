//! Application service: the hexagonal core.
//!
//! [`SessionService`] owns the FSM, the gesture detector, and the shared
//! context.  It exposes a clean, platform-agnostic API.  All I/O flows
//! through port traits injected at call sites, making the entire service
//! testable with mock adapters.
//!
//! ```text
//!  SensorBatch ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!  Tick        ──▶ │      SessionService      │
//!  AppCommand  ──▶ │ Gestures · FSM · Timers  │ ──▶ ActuatorPort
//!                  └──────────────────────────┘
//! ```
//!
//! Every input runs to completion: FSM dispatch, then the outbox is
//! flushed into the actuator port, then events are emitted.

use log::{debug, info, warn};

use crate::config::SessionConfig;
use crate::control::countdown::{CountdownState, format_mm_ss};
use crate::error::ConfigError;
use crate::events::SessionInput;
use crate::fsm::context::{ActuatorCommand, SessionContext, SessionStatus};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, IdlePhase, SessionEvent, SessionState, StateId};
use crate::sensors::orientation::Orientation;
use crate::sensors::{Gesture, GestureDetector, SensorRecord};

use super::commands::AppCommand;
use super::events::{AppEvent, SessionSnapshot};
use super::ports::{ActuatorPort, EventSink};

// ───────────────────────────────────────────────────────────────
// SessionService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct SessionService {
    fsm: Fsm,
    ctx: SessionContext,
    detector: GestureDetector,
    /// Sensor batches are ignored while false.
    accepting_sensors: bool,
    started: bool,
    tick_count: u64,
}

impl SessionService {
    /// Construct the service from configuration.
    ///
    /// Rejects invalid configuration.  Does **not** start the FSM; call
    /// [`start`](Self::start) next.
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let detector = GestureDetector::new(&config);
        let ctx = SessionContext::new(config);
        let fsm = Fsm::new(build_state_table(), StateId::Idle);

        Ok(Self {
            fsm,
            ctx,
            detector,
            accepting_sensors: false,
            started: false,
            tick_count: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Start the FSM in Idle and begin accepting sensor input.
    ///
    /// A second call after [`stop`](Self::stop) only re-enables sensors.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        self.accepting_sensors = true;
        if self.started {
            info!("SessionService: sensor input resumed");
            return;
        }
        self.started = true;
        self.fsm.start(&mut self.ctx);
        self.push_ready();
        self.flush(hw);

        let state = self.state();
        sink.emit(&AppEvent::Started(state));
        info!("SessionService started in {:?}", state);
    }

    /// Stop accepting sensor input.  Ticks keep driving the timers.
    pub fn stop(&mut self, sink: &mut impl EventSink) {
        if !self.accepting_sensors {
            return;
        }
        self.accepting_sensors = false;
        sink.emit(&AppEvent::Stopped);
        info!("SessionService: sensor input stopped");
    }

    // ── Input handling ────────────────────────────────────────

    /// Process one queued input.
    ///
    /// Only a rejected [`AppCommand::UpdateConfig`] can fail; the session
    /// itself is unaffected by the error.
    pub fn handle_input(
        &mut self,
        input: SessionInput,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) -> Result<(), ConfigError> {
        match input {
            SessionInput::Sensors(batch) => self.handle_batch(&batch, hw, sink),
            SessionInput::Tick => self.tick(hw, sink),
            SessionInput::Command(cmd) => return self.handle_command(cmd, hw, sink),
            SessionInput::Start => self.start(hw, sink),
            SessionInput::Stop => self.stop(sink),
            SessionInput::Shutdown => self.stop(sink),
        }
        Ok(())
    }

    /// Turn one sensor batch into gestures and feed them to the FSM.
    pub fn handle_batch(
        &mut self,
        batch: &[SensorRecord],
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) {
        if !self.accepting_sensors {
            debug!("Sensor batch of {} ignored while stopped", batch.len());
            return;
        }

        let outcome = self.detector.observe_batch(batch);
        for gesture in outcome.gestures {
            sink.emit(&AppEvent::Gesture(gesture));
            let event = match gesture {
                Gesture::Shake => SessionEvent::ShakeDetected,
                Gesture::Orientation(Orientation::Portrait) => SessionEvent::OrientationPortrait,
                Gesture::Orientation(Orientation::Landscape) => SessionEvent::OrientationLandscape,
            };
            self.dispatch(Some(event), hw, sink);
        }
    }

    /// One second elapsed: advance the running countdown, if any.
    pub fn tick(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        self.tick_count += 1;
        let expiry = self.ctx.tick_timers();
        self.dispatch(expiry, hw, sink);
        sink.emit(&AppEvent::Telemetry(self.snapshot()));
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command.
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) -> Result<(), ConfigError> {
        match cmd {
            AppCommand::UpdateConfig(new_config) => {
                if let Err(e) = new_config.validate() {
                    warn!("Rejected config update: {}", e);
                    return Err(e);
                }
                self.detector.reconfigure(&new_config);
                let reload_display = matches!(
                    self.state(),
                    SessionState::Idle(IdlePhase::Fresh) | SessionState::WaitingForShake
                );
                self.ctx.config = new_config;
                if reload_display {
                    self.ctx.work.reset(self.ctx.config.work_duration_secs);
                    self.ctx
                        .push(ActuatorCommand::TimerText(self.ctx.work.total_secs()));
                    self.flush(hw);
                }
                sink.emit(&AppEvent::ConfigUpdated);
                info!("Configuration updated at runtime");
            }
            AppCommand::ResetSession => {
                let prev = self.state();
                self.ctx.work.reset(self.ctx.config.work_duration_secs);
                self.fsm.force_transition(StateId::Idle, &mut self.ctx);
                self.push_ready();
                self.flush(hw);
                self.emit_state_change(prev, sink);
                info!("Session reset");
            }
        }
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a snapshot from the current context.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state(),
            work: self.ctx.work.state(),
            break_timer: self.ctx.break_timer.state(),
            completed_sessions: self.ctx.completed_sessions,
            tick_count: self.tick_count,
            rejected_samples: self.detector.rejected_total(),
            shake_intensity: self.detector.shake_intensity(),
            orientation: self.detector.orientation(),
        }
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.fsm.session_state(&self.ctx)
    }

    pub fn work_timer(&self) -> CountdownState {
        self.ctx.work.state()
    }

    pub fn break_timer(&self) -> CountdownState {
        self.ctx.break_timer.state()
    }

    /// Work sessions completed since startup.
    pub fn completed_sessions(&self) -> u32 {
        self.ctx.completed_sessions
    }

    /// Total ticks delivered since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn is_accepting_sensors(&self) -> bool {
        self.accepting_sensors
    }

    /// The live configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.ctx.config
    }

    // ── Internal ──────────────────────────────────────────────

    /// Feed one event to the FSM, apply its side effects and report.
    fn dispatch(
        &mut self,
        event: Option<SessionEvent>,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) {
        let prev = self.state();
        let completed_before = self.ctx.completed_sessions;

        if let Some(event) = event {
            self.fsm.dispatch(&mut self.ctx, event);
        }
        self.flush(hw);

        if self.ctx.completed_sessions != completed_before {
            sink.emit(&AppEvent::SessionCompleted {
                count: self.ctx.completed_sessions,
            });
        }
        self.emit_state_change(prev, sink);
    }

    fn emit_state_change(&self, prev: SessionState, sink: &mut impl EventSink) {
        let now = self.state();
        if now != prev {
            sink.emit(&AppEvent::StateChanged {
                from: prev,
                to: now,
            });
        }
    }

    fn push_ready(&mut self) {
        self.ctx.push(ActuatorCommand::Status(SessionStatus::Ready));
        self.ctx
            .push(ActuatorCommand::TimerText(self.ctx.work.remaining_secs()));
    }

    /// Translate queued actuator commands into port calls.
    fn flush(&mut self, hw: &mut impl ActuatorPort) {
        let outbox = core::mem::take(&mut self.ctx.outbox);
        for cmd in &outbox {
            match *cmd {
                ActuatorCommand::CompletionAlert => hw.play_completion_alert(),
                ActuatorCommand::BreakEndAlert => hw.play_break_end_alert(),
                ActuatorCommand::Vibrate(pattern) => hw.vibrate(pattern),
                ActuatorCommand::Status(status) => hw.set_status_text(status.label()),
                ActuatorCommand::TimerText(secs) => hw.set_timer_text(&format_mm_ss(secs)),
                ActuatorCommand::Celebration => hw.show_celebration(
                    &self.ctx.config.celebration_title,
                    &self.ctx.config.celebration_message,
                ),
            }
        }
    }
}

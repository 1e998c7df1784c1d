//! Hardware adapter: bridges real peripherals to the actuator port.
//!
//! Owns the vibration motor and buzzer drivers and exposes them through
//! [`ActuatorPort`].  The board has no display, so status and timer text
//! go to the log and are kept for read-back.  Driver errors are logged
//! here and never reach the session.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;
use log::{info, warn};

use crate::app::ports::ActuatorPort;
use crate::drivers::buzzer::{BREAK_END_CHIME, Buzzer, COMPLETION_CHIME};
use crate::drivers::vibration::VibrationMotor;
use crate::error::ActuatorError;
use crate::fsm::context::VibrationPattern;

/// Longest status line kept for read-back; longer text is truncated.
const TEXT_CAP: usize = 48;

pub type DisplayText = heapless::String<TEXT_CAP>;

/// Concrete adapter that combines all output hardware behind [`ActuatorPort`].
pub struct HardwareActuator<P, B> {
    motor: VibrationMotor<P>,
    buzzer: Buzzer<B>,
    status: DisplayText,
    timer: DisplayText,
    failures: u32,
}

impl<P: OutputPin, B: SetDutyCycle> HardwareActuator<P, B> {
    pub fn new(motor: VibrationMotor<P>, buzzer: Buzzer<B>) -> Self {
        Self {
            motor,
            buzzer,
            status: DisplayText::new(),
            timer: DisplayText::new(),
            failures: 0,
        }
    }

    /// Put both outputs in a known-off state.
    pub fn init(&mut self) {
        let res = self.motor.stop();
        self.check("motor init", res);
        let res = self.buzzer.silence();
        self.check("buzzer init", res);
    }

    /// Advance running pulses and chimes.  Call from the main loop.
    pub fn poll(&mut self, elapsed_ms: u32) {
        let res = self.motor.poll(elapsed_ms);
        self.check("motor", res);
        let res = self.buzzer.poll(elapsed_ms);
        self.check("buzzer", res);
    }

    pub fn status_text(&self) -> &str {
        &self.status
    }

    pub fn timer_text(&self) -> &str {
        &self.timer
    }

    /// Driver errors swallowed since startup.
    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn motor(&self) -> &VibrationMotor<P> {
        &self.motor
    }

    pub fn buzzer(&self) -> &Buzzer<B> {
        &self.buzzer
    }

    fn check(&mut self, what: &str, res: Result<(), ActuatorError>) {
        if let Err(e) = res {
            self.failures = self.failures.saturating_add(1);
            warn!("Actuator {} failed: {}", what, e);
        }
    }
}

fn store(dst: &mut DisplayText, text: &str) {
    dst.clear();
    for c in text.chars() {
        if dst.push(c).is_err() {
            break;
        }
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<P: OutputPin, B: SetDutyCycle> ActuatorPort for HardwareActuator<P, B> {
    fn play_completion_alert(&mut self) {
        let res = self.buzzer.play(COMPLETION_CHIME);
        self.check("completion chime", res);
    }

    fn play_break_end_alert(&mut self) {
        let res = self.buzzer.play(BREAK_END_CHIME);
        self.check("break-end chime", res);
    }

    fn vibrate(&mut self, pattern: VibrationPattern) {
        let res = self.motor.start(pattern);
        self.check("vibration", res);
    }

    fn set_status_text(&mut self, text: &str) {
        store(&mut self.status, text);
        info!("STATUS | {}", text);
    }

    fn set_timer_text(&mut self, text: &str) {
        store(&mut self.timer, text);
        info!("TIMER | {}", text);
    }

    fn show_celebration(&mut self, title: &str, message: &str) {
        info!("CELEBRATE | {} {}", title, message);
    }
}

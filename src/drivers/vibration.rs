//! Vibration motor driver (coin ERM motor behind a low-side MOSFET).
//!
//! One digital output: high spins the motor, low stops it.  A pulse is
//! started with [`VibrationMotor::start`] and ended by [`VibrationMotor::poll`]
//! once its duration has elapsed; the driver never blocks or sleeps.
//!
//! Generic over any `embedded_hal::digital::OutputPin`, so the same code
//! drives a real GPIO or a test double.

use embedded_hal::digital::OutputPin;

use crate::error::ActuatorError;
use crate::fsm::context::VibrationPattern;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VibrationState {
    Idle,
    Pulsing { remaining_ms: u32 },
}

pub struct VibrationMotor<P> {
    pin: P,
    state: VibrationState,
}

impl<P: OutputPin> VibrationMotor<P> {
    /// Wrap `pin`.  Call [`stop`](Self::stop) once to force a known level.
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            state: VibrationState::Idle,
        }
    }

    /// Begin a pulse, replacing any pulse in progress.
    pub fn start(&mut self, pattern: VibrationPattern) -> Result<(), ActuatorError> {
        if pattern.duration_ms == 0 {
            return self.stop();
        }
        self.pin
            .set_high()
            .map_err(|_| ActuatorError::PinWriteFailed)?;
        self.state = VibrationState::Pulsing {
            remaining_ms: pattern.duration_ms,
        };
        Ok(())
    }

    /// Advance the pulse by `elapsed_ms`, stopping the motor when it runs out.
    pub fn poll(&mut self, elapsed_ms: u32) -> Result<(), ActuatorError> {
        if let VibrationState::Pulsing { remaining_ms } = self.state {
            let left = remaining_ms.saturating_sub(elapsed_ms);
            if left == 0 {
                return self.stop();
            }
            self.state = VibrationState::Pulsing { remaining_ms: left };
        }
        Ok(())
    }

    /// Motor off.  The state is cleared even if the pin write fails.
    pub fn stop(&mut self) -> Result<(), ActuatorError> {
        self.state = VibrationState::Idle;
        self.pin
            .set_low()
            .map_err(|_| ActuatorError::PinWriteFailed)
    }

    pub fn state(&self) -> VibrationState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.state, VibrationState::Idle)
    }
}

//! Piezo buzzer driver.
//!
//! Plays short chimes (a run of equal beeps separated by equal gaps) on a
//! PWM channel.  Like the vibration driver it is advanced by
//! [`Buzzer::poll`] and never blocks.

use embedded_hal::pwm::SetDutyCycle;

use crate::error::ActuatorError;

/// Duty while a beep sounds.  A square wave is loudest at 50 %.
const BEEP_DUTY_PERCENT: u8 = 50;

/// A run of `beeps` tones, each `beep_ms` on and `beep_ms` off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chime {
    pub beeps: u8,
    pub beep_ms: u32,
}

/// Rising triple for a finished work session.
pub const COMPLETION_CHIME: Chime = Chime {
    beeps: 3,
    beep_ms: 150,
};

/// Single long tone at the end of a break.
pub const BREAK_END_CHIME: Chime = Chime {
    beeps: 1,
    beep_ms: 300,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuzzerState {
    Silent,
    Beeping { beeps_left: u8, remaining_ms: u32 },
    Gap { beeps_left: u8, remaining_ms: u32 },
}

pub struct Buzzer<B> {
    pwm: B,
    beep_ms: u32,
    state: BuzzerState,
}

impl<B: SetDutyCycle> Buzzer<B> {
    pub fn new(pwm: B) -> Self {
        Self {
            pwm,
            beep_ms: 0,
            state: BuzzerState::Silent,
        }
    }

    /// Start `chime`, cutting off anything still sounding.
    pub fn play(&mut self, chime: Chime) -> Result<(), ActuatorError> {
        if chime.beeps == 0 || chime.beep_ms == 0 {
            return self.silence();
        }
        self.beep_ms = chime.beep_ms;
        self.tone_on()?;
        self.state = BuzzerState::Beeping {
            beeps_left: chime.beeps - 1,
            remaining_ms: chime.beep_ms,
        };
        Ok(())
    }

    /// Advance by `elapsed_ms`.  At most one phase change per call.
    pub fn poll(&mut self, elapsed_ms: u32) -> Result<(), ActuatorError> {
        match self.state {
            BuzzerState::Silent => Ok(()),
            BuzzerState::Beeping {
                beeps_left,
                remaining_ms,
            } => {
                let left = remaining_ms.saturating_sub(elapsed_ms);
                if left > 0 {
                    self.state = BuzzerState::Beeping {
                        beeps_left,
                        remaining_ms: left,
                    };
                    return Ok(());
                }
                if beeps_left == 0 {
                    return self.silence();
                }
                self.state = BuzzerState::Gap {
                    beeps_left,
                    remaining_ms: self.beep_ms,
                };
                self.tone_off()
            }
            BuzzerState::Gap {
                beeps_left,
                remaining_ms,
            } => {
                let left = remaining_ms.saturating_sub(elapsed_ms);
                if left > 0 {
                    self.state = BuzzerState::Gap {
                        beeps_left,
                        remaining_ms: left,
                    };
                    return Ok(());
                }
                self.state = BuzzerState::Beeping {
                    beeps_left: beeps_left - 1,
                    remaining_ms: self.beep_ms,
                };
                self.tone_on()
            }
        }
    }

    /// Stop immediately.
    pub fn silence(&mut self) -> Result<(), ActuatorError> {
        self.state = BuzzerState::Silent;
        self.tone_off()
    }

    pub fn state(&self) -> BuzzerState {
        self.state
    }

    pub fn is_sounding(&self) -> bool {
        !matches!(self.state, BuzzerState::Silent)
    }

    fn tone_on(&mut self) -> Result<(), ActuatorError> {
        self.pwm
            .set_duty_cycle_percent(BEEP_DUTY_PERCENT)
            .map_err(|_| ActuatorError::PwmWriteFailed)
    }

    fn tone_off(&mut self) -> Result<(), ActuatorError> {
        self.pwm
            .set_duty_cycle_fully_off()
            .map_err(|_| ActuatorError::PwmWriteFailed)
    }
}

#[cfg(test)]
pub(crate) mod test_pwm {
    use core::convert::Infallible;
    use embedded_hal::pwm::{ErrorType, SetDutyCycle};

    /// PWM channel that remembers its duty.
    #[derive(Default)]
    pub struct FakePwm {
        pub duty: u16,
        pub rising_edges: u32,
    }

    impl ErrorType for FakePwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for FakePwm {
        fn max_duty_cycle(&self) -> u16 {
            1000
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            if self.duty == 0 && duty > 0 {
                self.rising_edges += 1;
            }
            self.duty = duty;
            Ok(())
        }
    }
}

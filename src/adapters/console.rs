//! Console actuator for the host binary.
//!
//! Renders every actuator call as one line on a writer (stdout in the
//! binary).  Alerts become a bell character plus a tag so a replayed
//! trace reads like the phone's screen would have.

use std::io::Write;

use log::warn;

use crate::app::ports::ActuatorPort;
use crate::fsm::context::VibrationPattern;

pub struct ConsoleActuator<W: Write> {
    out: W,
}

impl ConsoleActuator<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ConsoleActuator<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, args: core::fmt::Arguments<'_>) {
        if let Err(e) = writeln!(self.out, "{}", args) {
            warn!("Console write failed: {}", e);
        }
    }
}

impl<W: Write> ActuatorPort for ConsoleActuator<W> {
    fn play_completion_alert(&mut self) {
        self.line(format_args!("\x07[sound] session complete"));
    }

    fn play_break_end_alert(&mut self) {
        self.line(format_args!("\x07[sound] break over"));
    }

    fn vibrate(&mut self, pattern: VibrationPattern) {
        self.line(format_args!("[vibrate] {} ms", pattern.duration_ms));
    }

    fn set_status_text(&mut self, text: &str) {
        self.line(format_args!("[status] {}", text));
    }

    fn set_timer_text(&mut self, text: &str) {
        self.line(format_args!("[timer] {}", text));
    }

    fn show_celebration(&mut self, title: &str, message: &str) {
        self.line(format_args!("[dialog] {} {}", title, message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_one_line_per_call() {
        let mut c = ConsoleActuator::new(Vec::new());
        c.set_status_text("Paused");
        c.set_timer_text("00:45");
        c.vibrate(VibrationPattern { duration_ms: 300 });
        let out = String::from_utf8(c.into_inner()).unwrap();
        assert_eq!(out, "[status] Paused\n[timer] 00:45\n[vibrate] 300 ms\n");
    }
}

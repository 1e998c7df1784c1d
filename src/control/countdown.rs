//! Tick-driven countdown engine
//!
//! One instance backs the work timer and another the break timer.  The
//! engine never schedules itself: the caller delivers one [`Countdown::tick`]
//! per elapsed second while the timer is running.
//!
//! ```text
//!  reset(to) ──▶ [stopped, remaining = total = to]
//!  start(d)  ──▶ [running, remaining = total = d] ──tick×d──▶ Expired ──▶ [stopped, remaining = 0]
//!  pause()   ──▶ [stopped, remaining frozen] ──resume()──▶ [running]
//! ```

use core::fmt::Write;

use serde::{Deserialize, Serialize};

/// Fixed step per tick.
pub const TICK_SECS: u32 = 1;

/// Emitted exactly once when a running countdown reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expired;

/// Observable countdown state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CountdownState {
    pub remaining_secs: u32,
    pub total_secs: u32,
    pub running: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Countdown {
    state: CountdownState,
}

impl Countdown {
    /// A stopped countdown loaded with `total_secs`.
    pub fn new(total_secs: u32) -> Self {
        Self {
            state: CountdownState {
                remaining_secs: total_secs,
                total_secs,
                running: false,
            },
        }
    }

    /// Load `duration_secs` and start running.  A zero duration stays stopped.
    pub fn start(&mut self, duration_secs: u32) {
        self.reset(duration_secs);
        self.state.running = duration_secs > 0;
    }

    /// Continue from the frozen remaining time.  No-op once expired.
    pub fn resume(&mut self) {
        if self.state.remaining_secs > 0 {
            self.state.running = true;
        }
    }

    /// Freeze the remaining time.  Idempotent.
    pub fn pause(&mut self) {
        self.state.running = false;
    }

    /// Set `remaining = total = to` and stop, whatever the prior state.
    pub fn reset(&mut self, to_secs: u32) {
        self.state = CountdownState {
            remaining_secs: to_secs,
            total_secs: to_secs,
            running: false,
        };
    }

    /// Advance one second.  Returns `Some(Expired)` on the tick that
    /// reaches zero; ticks while stopped do nothing.
    pub fn tick(&mut self) -> Option<Expired> {
        if !self.state.running {
            return None;
        }
        self.state.remaining_secs = self.state.remaining_secs.saturating_sub(TICK_SECS);
        if self.state.remaining_secs == 0 {
            self.state.running = false;
            return Some(Expired);
        }
        None
    }

    /// True when paused part-way: `0 < remaining < total` and stopped.
    pub fn can_resume(&self) -> bool {
        !self.state.running
            && self.state.remaining_secs > 0
            && self.state.remaining_secs < self.state.total_secs
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn remaining_secs(&self) -> u32 {
        self.state.remaining_secs
    }

    pub fn total_secs(&self) -> u32 {
        self.state.total_secs
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }
}

/// Timer display text, e.g. `"01:05"`.
pub type TimerText = heapless::String<12>;

/// Render seconds as zero-padded `mm:ss`.  Minutes are not wrapped into hours.
pub fn format_mm_ss(secs: u32) -> TimerText {
    let mut s = TimerText::new();
    // u32::MAX / 60 has 8 digits, so 8 + ":" + 2 always fits in 12.
    let _ = write!(s, "{:02}:{:02}", secs / 60, secs % 60);
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixty_ticks_expire_exactly_once() {
        let mut c = Countdown::new(0);
        c.start(60);
        let mut expiries = 0;
        for i in 1..=60 {
            if c.tick().is_some() {
                expiries += 1;
                assert_eq!(i, 60, "expired early on tick {i}");
            }
        }
        assert_eq!(expiries, 1);
        assert_eq!(c.remaining_secs(), 0);
        assert!(!c.is_running());

        for _ in 0..5 {
            assert_eq!(c.tick(), None);
        }
        assert_eq!(c.remaining_secs(), 0);
    }

    #[test]
    fn pause_is_idempotent() {
        let mut c = Countdown::new(0);
        c.start(60);
        for _ in 0..15 {
            c.tick();
        }
        c.pause();
        c.pause();
        c.pause();
        assert_eq!(c.remaining_secs(), 45);
        assert_eq!(c.tick(), None);
        assert_eq!(c.remaining_secs(), 45);
    }

    #[test]
    fn resume_continues_from_frozen_value() {
        let mut c = Countdown::new(0);
        c.start(60);
        for _ in 0..15 {
            c.tick();
        }
        c.pause();
        assert!(c.can_resume());
        c.resume();
        c.tick();
        assert_eq!(c.remaining_secs(), 44);
        assert_eq!(c.total_secs(), 60);
    }

    #[test]
    fn reset_stops_and_reloads() {
        let mut c = Countdown::new(0);
        c.start(60);
        c.tick();
        c.reset(10);
        assert_eq!(
            c.state(),
            CountdownState {
                remaining_secs: 10,
                total_secs: 10,
                running: false
            }
        );
        assert!(!c.can_resume());
    }

    #[test]
    fn fresh_timer_cannot_resume() {
        let mut c = Countdown::new(60);
        assert!(!c.can_resume());
        c.start(60);
        c.pause();
        // Paused before the first tick: nothing to resume from.
        assert!(!c.can_resume());
    }

    #[test]
    fn expired_timer_cannot_resume() {
        let mut c = Countdown::new(0);
        c.start(1);
        assert_eq!(c.tick(), Some(Expired));
        c.resume();
        assert!(!c.is_running());
    }

    #[test]
    fn zero_start_stays_stopped() {
        let mut c = Countdown::new(0);
        c.start(0);
        assert!(!c.is_running());
        assert_eq!(c.tick(), None);
    }

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_mm_ss(60).as_str(), "01:00");
        assert_eq!(format_mm_ss(9).as_str(), "00:09");
        assert_eq!(format_mm_ss(25 * 60).as_str(), "25:00");
        assert_eq!(format_mm_ss(6000).as_str(), "100:00");
        assert_eq!(format_mm_ss(u32::MAX).as_str(), "71582788:15");
    }
}

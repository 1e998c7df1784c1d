//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events
//! through the `log` facade.  Per-tick telemetry goes out at debug level
//! so an Info-level console only shows what changed.

use log::{debug, info};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::control::countdown::format_mm_ss;

/// Adapter that logs every [`AppEvent`].
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                debug!(
                    "TELEM | state={:?} | work={}{} | break={}{} | done={} | \
                     ticks={} | rejected={} | shake={:.1} | {:?}",
                    t.state,
                    format_mm_ss(t.work.remaining_secs),
                    if t.work.running { "*" } else { "" },
                    format_mm_ss(t.break_timer.remaining_secs),
                    if t.break_timer.running { "*" } else { "" },
                    t.completed_sessions,
                    t.tick_count,
                    t.rejected_samples,
                    t.shake_intensity,
                    t.orientation,
                );
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            AppEvent::Gesture(g) => {
                debug!("GESTURE | {:?}", g);
            }
            AppEvent::SessionCompleted { count } => {
                info!("SESSION | completed #{}", count);
            }
            AppEvent::ConfigUpdated => {
                info!("CONFIG | updated");
            }
            AppEvent::Stopped => {
                info!("STOP | sensor input paused");
            }
            AppEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
        }
    }
}

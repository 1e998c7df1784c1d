//! Concrete state handler functions and table builder.
//!
//! Each state is defined by plain `fn` pointers: no closures, no dynamic
//! dispatch, no heap.
//!
//! ```text
//!                 ┌────────[shake]────────┐
//!                 ▼                       │
//!  IDLE ──[shake]──▶ RUNNING ──[portrait]──▶ IDLE(paused) ──[landscape]──▶ RUNNING
//!                    │    ▲
//!             [work expired]
//!                    ▼    │[shake]
//!              CELEBRATING ─▶ ON_BREAK ──[break expired]──▶ WAITING_FOR_SHAKE
//!                               │                              │
//!                               └──[auto restart]──▶ RUNNING ◀─┘[shake]
//! ```
//!
//! Handlers match the event exhaustively so a new event cannot slip
//! through unhandled.

use super::context::{ActuatorCommand, SessionContext, SessionStatus, VibrationPattern};
use super::{SessionEvent, StateDescriptor, StateId};
use crate::config::AfterBreak;
use log::info;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0: Idle
        StateDescriptor {
            id: StateId::Idle,
            name: "Idle",
            on_enter: None,
            on_exit: None,
            on_event: idle_event,
            fall_through: None,
        },
        // Index 1: Running
        StateDescriptor {
            id: StateId::Running,
            name: "Running",
            on_enter: Some(running_enter),
            on_exit: None,
            on_event: running_event,
            fall_through: None,
        },
        // Index 2: Celebrating
        StateDescriptor {
            id: StateId::Celebrating,
            name: "Celebrating",
            on_enter: Some(celebrating_enter),
            on_exit: None,
            on_event: celebrating_event,
            fall_through: Some(StateId::OnBreak),
        },
        // Index 3: OnBreak
        StateDescriptor {
            id: StateId::OnBreak,
            name: "OnBreak",
            on_enter: Some(on_break_enter),
            on_exit: Some(on_break_exit),
            on_event: on_break_event,
            fall_through: None,
        },
        // Index 4: WaitingForShake
        StateDescriptor {
            id: StateId::WaitingForShake,
            name: "WaitingForShake",
            on_enter: Some(waiting_enter),
            on_exit: None,
            on_event: waiting_event,
            fall_through: None,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE state: fresh or paused
// ═══════════════════════════════════════════════════════════════════════════

fn idle_event(ctx: &mut SessionContext, event: SessionEvent) -> Option<StateId> {
    match event {
        SessionEvent::ShakeDetected => {
            ctx.restart_work();
            Some(StateId::Running)
        }
        SessionEvent::OrientationLandscape => {
            if !ctx.work.can_resume() {
                return None;
            }
            info!("IDLE: resuming work at {}s", ctx.work.remaining_secs());
            ctx.work.resume();
            Some(StateId::Running)
        }
        SessionEvent::OrientationPortrait
        | SessionEvent::WorkExpired
        | SessionEvent::BreakExpired => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  RUNNING state: work countdown active
// ═══════════════════════════════════════════════════════════════════════════

fn running_enter(ctx: &mut SessionContext) {
    ctx.push(ActuatorCommand::Status(SessionStatus::Running));
    ctx.push(ActuatorCommand::TimerText(ctx.work.remaining_secs()));
}

fn running_event(ctx: &mut SessionContext, event: SessionEvent) -> Option<StateId> {
    match event {
        SessionEvent::ShakeDetected => {
            info!("RUNNING: shake, restarting work timer");
            ctx.restart_work();
            Some(StateId::Running)
        }
        SessionEvent::OrientationPortrait => {
            ctx.work.pause();
            info!("RUNNING: paused at {}s", ctx.work.remaining_secs());
            ctx.push(ActuatorCommand::Status(SessionStatus::Paused));
            Some(StateId::Idle)
        }
        SessionEvent::WorkExpired => Some(StateId::Celebrating),
        SessionEvent::OrientationLandscape | SessionEvent::BreakExpired => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  CELEBRATING pseudo-state: falls through to ON_BREAK on entry
// ═══════════════════════════════════════════════════════════════════════════

fn celebrating_enter(ctx: &mut SessionContext) {
    ctx.completed_sessions = ctx.completed_sessions.saturating_add(1);
    info!("CELEBRATING: session {} complete", ctx.completed_sessions);
    ctx.push(ActuatorCommand::CompletionAlert);
    ctx.push(ActuatorCommand::Vibrate(VibrationPattern {
        duration_ms: ctx.config.completion_vibration_ms,
    }));
    ctx.push(ActuatorCommand::Celebration);
}

fn celebrating_event(_ctx: &mut SessionContext, _event: SessionEvent) -> Option<StateId> {
    // Never current between dispatches.
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  ON_BREAK state: break countdown active
// ═══════════════════════════════════════════════════════════════════════════

fn on_break_enter(ctx: &mut SessionContext) {
    ctx.break_timer.start(ctx.config.break_duration_secs);
    ctx.push(ActuatorCommand::Status(SessionStatus::Break));
    ctx.push(ActuatorCommand::TimerText(ctx.break_timer.remaining_secs()));
}

fn on_break_exit(ctx: &mut SessionContext) {
    ctx.break_timer.reset(ctx.config.break_duration_secs);
}

fn on_break_event(ctx: &mut SessionContext, event: SessionEvent) -> Option<StateId> {
    match event {
        SessionEvent::BreakExpired => {
            ctx.push(ActuatorCommand::BreakEndAlert);
            ctx.push(ActuatorCommand::Vibrate(VibrationPattern {
                duration_ms: ctx.config.break_end_vibration_ms,
            }));
            ctx.work.reset(ctx.config.work_duration_secs);
            match ctx.config.after_break {
                AfterBreak::WaitForShake => Some(StateId::WaitingForShake),
                AfterBreak::AutoRestart => {
                    info!("ON_BREAK: auto-restarting work timer");
                    ctx.restart_work();
                    Some(StateId::Running)
                }
            }
        }
        SessionEvent::ShakeDetected => {
            info!("ON_BREAK: shake, cutting break short");
            ctx.restart_work();
            Some(StateId::Running)
        }
        SessionEvent::OrientationPortrait
        | SessionEvent::OrientationLandscape
        | SessionEvent::WorkExpired => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  WAITING_FOR_SHAKE state: break over, nothing running
// ═══════════════════════════════════════════════════════════════════════════

fn waiting_enter(ctx: &mut SessionContext) {
    ctx.push(ActuatorCommand::Status(SessionStatus::Waiting));
    ctx.push(ActuatorCommand::TimerText(ctx.work.total_secs()));
}

fn waiting_event(ctx: &mut SessionContext, event: SessionEvent) -> Option<StateId> {
    match event {
        SessionEvent::ShakeDetected => {
            ctx.restart_work();
            Some(StateId::Running)
        }
        SessionEvent::OrientationPortrait
        | SessionEvent::OrientationLandscape
        | SessionEvent::WorkExpired
        | SessionEvent::BreakExpired => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_rows_are_indexed_by_id() {
        for (i, row) in build_state_table().iter().enumerate() {
            assert_eq!(row.id as usize, i, "row {} out of place", row.name);
        }
    }

    #[test]
    fn only_celebrating_falls_through() {
        let table = build_state_table();
        for row in &table {
            match row.id {
                StateId::Celebrating => assert_eq!(row.fall_through, Some(StateId::OnBreak)),
                _ => assert_eq!(row.fall_through, None),
            }
        }
    }
}

//! End-to-end session flows: sensor batches and ticks in, actuator calls out.

use crate::mock_hw::{ActuatorCall, LogSink, MockHardware, ScriptedFeed, shake_at, tilt_at};

use pomoshake::app::commands::AppCommand;
use pomoshake::app::events::AppEvent;
use pomoshake::app::ports::SensorFeed;
use pomoshake::app::service::SessionService;
use pomoshake::config::{AfterBreak, SessionConfig};
use pomoshake::events::{SessionInbox, SessionInput};
use pomoshake::fsm::{IdlePhase, SessionState};

fn make_app(config: SessionConfig) -> (SessionService, MockHardware, LogSink) {
    let mut app = SessionService::new(config).expect("valid config");
    let mut hw = MockHardware::new();
    let mut sink = LogSink::new();
    app.start(&mut hw, &mut sink);
    (app, hw, sink)
}

fn ticks(app: &mut SessionService, hw: &mut MockHardware, sink: &mut LogSink, n: u32) {
    for _ in 0..n {
        app.tick(hw, sink);
    }
}

// ── Full cycle: shake → work → break → wait → shake ──────────

#[test]
fn full_cycle_with_default_durations() {
    let (mut app, mut hw, mut sink) = make_app(SessionConfig::default());
    assert_eq!(app.state(), SessionState::Idle(IdlePhase::Fresh));
    assert_eq!(hw.last_status(), Some("Shake to start!"));
    assert_eq!(hw.last_timer(), Some("01:00"));

    app.handle_batch(&shake_at(0), &mut hw, &mut sink);
    assert_eq!(app.state(), SessionState::Running);
    assert_eq!(app.work_timer().remaining_secs, 60);
    assert_eq!(hw.last_status(), Some("Timer running..."));

    ticks(&mut app, &mut hw, &mut sink, 59);
    assert_eq!(app.state(), SessionState::Running);
    assert_eq!(hw.last_timer(), Some("00:01"));
    assert_eq!(hw.count(&ActuatorCall::CompletionAlert), 0);

    ticks(&mut app, &mut hw, &mut sink, 1);
    assert_eq!(app.state(), SessionState::OnBreak);
    assert_eq!(app.break_timer().remaining_secs, 10);
    assert!(app.break_timer().running);
    assert_eq!(hw.count(&ActuatorCall::CompletionAlert), 1);
    assert_eq!(hw.count(&ActuatorCall::Vibrate(500)), 1);
    assert!(hw.calls.contains(&ActuatorCall::Celebration {
        title: "Congratulations!".into(),
        message: "You completed a session.".into(),
    }));
    assert_eq!(hw.last_status(), Some("Break time..."));
    assert_eq!(hw.last_timer(), Some("00:10"));

    ticks(&mut app, &mut hw, &mut sink, 10);
    assert_eq!(app.state(), SessionState::WaitingForShake);
    assert_eq!(hw.count(&ActuatorCall::BreakEndAlert), 1);
    assert_eq!(hw.count(&ActuatorCall::Vibrate(300)), 1);
    assert_eq!(hw.last_status(), Some("Break over. Shake to restart."));
    assert_eq!(hw.last_timer(), Some("01:00"));
    assert!(!app.work_timer().running);
    assert!(!app.break_timer().running);

    // Idle ticks are harmless.
    ticks(&mut app, &mut hw, &mut sink, 5);
    assert_eq!(app.state(), SessionState::WaitingForShake);

    app.handle_batch(&shake_at(80_000), &mut hw, &mut sink);
    assert_eq!(app.state(), SessionState::Running);
    assert_eq!(app.work_timer().remaining_secs, 60);
    assert_eq!(app.completed_sessions(), 1);
}

#[test]
fn completion_commands_precede_break_status() {
    let (mut app, mut hw, mut sink) = make_app(SessionConfig::default());
    app.handle_batch(&shake_at(0), &mut hw, &mut sink);
    ticks(&mut app, &mut hw, &mut sink, 59);
    hw.clear();
    ticks(&mut app, &mut hw, &mut sink, 1);

    assert_eq!(
        hw.calls,
        vec![
            ActuatorCall::Timer("00:00".into()),
            ActuatorCall::CompletionAlert,
            ActuatorCall::Vibrate(500),
            ActuatorCall::Celebration {
                title: "Congratulations!".into(),
                message: "You completed a session.".into(),
            },
            ActuatorCall::Status("Break time...".into()),
            ActuatorCall::Timer("00:10".into()),
        ]
    );
}

// ── Pause / resume by orientation ─────────────────────────────

#[test]
fn portrait_pauses_at_45_and_landscape_resumes_at_45() {
    let (mut app, mut hw, mut sink) = make_app(SessionConfig::default());
    app.handle_batch(&shake_at(0), &mut hw, &mut sink);
    ticks(&mut app, &mut hw, &mut sink, 15);
    assert_eq!(app.work_timer().remaining_secs, 45);

    app.handle_batch(&tilt_at(85.0, 15_000), &mut hw, &mut sink);
    match app.state() {
        SessionState::Idle(IdlePhase::Paused(snap)) => assert_eq!(snap.remaining_secs, 45),
        other => panic!("expected paused, got {other:?}"),
    }
    assert_eq!(hw.last_status(), Some("Paused"));

    ticks(&mut app, &mut hw, &mut sink, 30);
    assert_eq!(app.work_timer().remaining_secs, 45);

    app.handle_batch(&tilt_at(3.0, 45_000), &mut hw, &mut sink);
    assert_eq!(app.state(), SessionState::Running);
    assert_eq!(app.work_timer().remaining_secs, 45);
    assert_eq!(hw.last_timer(), Some("00:45"));

    ticks(&mut app, &mut hw, &mut sink, 45);
    assert_eq!(app.state(), SessionState::OnBreak);
}

#[test]
fn tilt_back_inside_debounce_window_is_ignored() {
    let (mut app, mut hw, mut sink) = make_app(SessionConfig::default());
    app.handle_batch(&shake_at(0), &mut hw, &mut sink);
    ticks(&mut app, &mut hw, &mut sink, 5);

    app.handle_batch(&tilt_at(85.0, 5_000), &mut hw, &mut sink);
    app.handle_batch(&tilt_at(3.0, 5_400), &mut hw, &mut sink);
    assert!(matches!(
        app.state(),
        SessionState::Idle(IdlePhase::Paused(_))
    ));

    app.handle_batch(&tilt_at(3.0, 6_000), &mut hw, &mut sink);
    assert_eq!(app.state(), SessionState::Running);
}

#[test]
fn orientation_is_ignored_during_break() {
    let (mut app, mut hw, mut sink) = make_app(SessionConfig::default());
    app.handle_batch(&shake_at(0), &mut hw, &mut sink);
    ticks(&mut app, &mut hw, &mut sink, 62);

    app.handle_batch(&tilt_at(85.0, 62_000), &mut hw, &mut sink);
    assert_eq!(app.state(), SessionState::OnBreak);
    assert_eq!(app.break_timer().remaining_secs, 8);
    assert!(app.break_timer().running);
}

#[test]
fn shake_during_break_starts_new_work_session() {
    let (mut app, mut hw, mut sink) = make_app(SessionConfig::default());
    app.handle_batch(&shake_at(0), &mut hw, &mut sink);
    ticks(&mut app, &mut hw, &mut sink, 64);
    assert_eq!(app.state(), SessionState::OnBreak);

    app.handle_batch(&shake_at(64_000), &mut hw, &mut sink);
    assert_eq!(app.state(), SessionState::Running);
    assert!(!app.break_timer().running);
    assert_eq!(app.work_timer().remaining_secs, 60);
    assert_eq!(hw.count(&ActuatorCall::BreakEndAlert), 0);
}

#[test]
fn shake_while_running_restarts_work() {
    let (mut app, mut hw, mut sink) = make_app(SessionConfig::default());
    app.handle_batch(&shake_at(0), &mut hw, &mut sink);
    ticks(&mut app, &mut hw, &mut sink, 30);

    app.handle_batch(&shake_at(30_000), &mut hw, &mut sink);
    assert_eq!(app.state(), SessionState::Running);
    assert_eq!(app.work_timer().remaining_secs, 60);
    assert_eq!(hw.last_timer(), Some("01:00"));
}

// ── Configuration ─────────────────────────────────────────────

#[test]
fn auto_restart_skips_waiting() {
    let config = SessionConfig {
        work_duration_secs: 5,
        break_duration_secs: 2,
        after_break: AfterBreak::AutoRestart,
        ..Default::default()
    };
    let (mut app, mut hw, mut sink) = make_app(config);
    app.handle_batch(&shake_at(0), &mut hw, &mut sink);
    ticks(&mut app, &mut hw, &mut sink, 7);

    assert_eq!(app.state(), SessionState::Running);
    assert_eq!(app.work_timer().remaining_secs, 5);
    assert_eq!(hw.count(&ActuatorCall::BreakEndAlert), 1);
    assert_eq!(hw.last_status(), Some("Timer running..."));

    ticks(&mut app, &mut hw, &mut sink, 5);
    assert_eq!(app.completed_sessions(), 2);
}

#[test]
fn custom_durations_and_celebration_text() {
    let config = SessionConfig {
        work_duration_secs: 25 * 60,
        break_duration_secs: 5 * 60,
        celebration_title: "Nice!".into(),
        celebration_message: "Take five.".into(),
        ..Default::default()
    };
    let (mut app, mut hw, mut sink) = make_app(config);
    assert_eq!(hw.last_timer(), Some("25:00"));

    app.handle_batch(&shake_at(0), &mut hw, &mut sink);
    ticks(&mut app, &mut hw, &mut sink, 25 * 60);
    assert_eq!(hw.last_timer(), Some("05:00"));
    assert!(hw.calls.contains(&ActuatorCall::Celebration {
        title: "Nice!".into(),
        message: "Take five.".into(),
    }));
}

#[test]
fn rejected_config_update_leaves_session_untouched() {
    let (mut app, mut hw, mut sink) = make_app(SessionConfig::default());
    app.handle_batch(&shake_at(0), &mut hw, &mut sink);
    ticks(&mut app, &mut hw, &mut sink, 10);

    let bad = SessionConfig {
        landscape_max_pitch_deg: 70.0,
        portrait_min_pitch_deg: 60.0,
        ..Default::default()
    };
    assert!(
        app.handle_command(AppCommand::UpdateConfig(bad), &mut hw, &mut sink)
            .is_err()
    );
    assert_eq!(app.state(), SessionState::Running);
    assert_eq!(app.work_timer().remaining_secs, 50);
}

// ── Lifecycle and queueing ────────────────────────────────────

#[test]
fn stop_ignores_sensors_but_timers_keep_running() {
    let (mut app, mut hw, mut sink) = make_app(SessionConfig::default());
    app.handle_batch(&shake_at(0), &mut hw, &mut sink);
    app.stop(&mut sink);

    app.handle_batch(&tilt_at(85.0, 2_000), &mut hw, &mut sink);
    ticks(&mut app, &mut hw, &mut sink, 60);
    assert_eq!(app.state(), SessionState::OnBreak);
    assert!(sink.events.iter().any(|e| matches!(e, AppEvent::Stopped)));
}

#[test]
fn inbox_serialises_mixed_inputs() {
    let inbox: SessionInbox<8> = SessionInbox::new();
    let mut app = SessionService::new(SessionConfig {
        work_duration_secs: 2,
        ..Default::default()
    })
    .unwrap();
    let mut hw = MockHardware::new();
    let mut sink = LogSink::new();

    let mut feed = ScriptedFeed::new(vec![shake_at(0)]);
    inbox.try_send(SessionInput::Start).unwrap();
    inbox
        .try_send(SessionInput::Sensors(feed.next_batch().unwrap()))
        .unwrap();
    inbox.try_send(SessionInput::Tick).unwrap();
    inbox.try_send(SessionInput::Tick).unwrap();

    let n = inbox.drain(|input| {
        app.handle_input(input, &mut hw, &mut sink).unwrap();
    });
    assert_eq!(n, 4);
    assert_eq!(app.state(), SessionState::OnBreak);
    assert!(feed.next_batch().is_none());

    let completed = sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::SessionCompleted { count: 1 }))
        .count();
    assert_eq!(completed, 1);
}

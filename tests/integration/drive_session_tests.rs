//! Integration tests for the session → decoder → actuator pipeline.
//!
//! These run on the host (x86_64) and drive the full chain from an inbound
//! command line down to actuator calls, with a hand-advanced clock so the
//! watchdog behaviour is fully deterministic.

use crate::mock_hw::{ActuatorCall, MockHardware, RecordingSink};

use rover::app::command::Channel;
use rover::app::events::AppEvent;
use rover::app::service::{DriveSession, SessionState};
use rover::config::DriveConfig;

fn make_session() -> (DriveSession, MockHardware, RecordingSink) {
    // Default config: 50ms command timeout.
    let config = DriveConfig::default();
    let session = DriveSession::new(&config);
    (session, MockHardware::new(), RecordingSink::new())
}

fn connect(session: &mut DriveSession, hw: &mut MockHardware, sink: &mut RecordingSink, now: u32) {
    session.on_client_connected(now, hw, sink);
    assert_eq!(session.state(), SessionState::Active);
}

// ── Straight-line drive ──────────────────────────────────────

#[test]
fn half_speed_command_drives_both_channels_forward() {
    let (mut session, mut hw, mut sink) = make_session();
    connect(&mut session, &mut hw, &mut sink, 0);

    session.on_line("50,50", 10, &mut hw, &mut sink);

    assert_eq!(hw.power(Channel::Left), 50);
    assert_eq!(hw.power(Channel::Right), 50);
    assert_eq!(
        sink.count(AppEvent::CommandApplied {
            left: 50,
            right: 50
        }),
        1
    );
}

#[test]
fn opposing_full_power_spins_in_place() {
    let (mut session, mut hw, mut sink) = make_session();
    connect(&mut session, &mut hw, &mut sink, 0);

    session.on_line("-100,100", 10, &mut hw, &mut sink);

    assert_eq!(hw.power(Channel::Left), -100);
    assert_eq!(hw.power(Channel::Right), 100);
}

#[test]
fn out_of_range_power_is_clamped_before_applying() {
    let (mut session, mut hw, mut sink) = make_session();
    connect(&mut session, &mut hw, &mut sink, 0);

    session.on_line("150,-400", 10, &mut hw, &mut sink);

    assert_eq!(hw.power(Channel::Left), 100);
    assert_eq!(hw.power(Channel::Right), -100);
}

// ── Malformed input ──────────────────────────────────────────

#[test]
fn malformed_line_leaves_previous_command_in_effect() {
    let (mut session, mut hw, mut sink) = make_session();
    connect(&mut session, &mut hw, &mut sink, 0);

    session.on_line("60,30", 10, &mut hw, &mut sink);
    let calls_before = hw.calls.len();

    session.on_line("abc,50", 20, &mut hw, &mut sink);
    session.on_line("", 21, &mut hw, &mut sink);
    session.on_line("1;2", 22, &mut hw, &mut sink);

    assert_eq!(hw.calls.len(), calls_before, "no actuator call for garbage");
    assert_eq!(hw.power(Channel::Left), 60);
    assert_eq!(hw.power(Channel::Right), 30);
}

#[test]
fn malformed_line_does_not_rearm_the_watchdog() {
    let (mut session, mut hw, mut sink) = make_session();
    connect(&mut session, &mut hw, &mut sink, 0);

    session.on_line("40,40", 0, &mut hw, &mut sink);
    // Garbage at t=40 must not extend the deadline of the t=0 command.
    session.on_line("garbage", 40, &mut hw, &mut sink);

    session.poll(51, &mut hw, &mut sink);
    assert!(hw.is_stopped(), "watchdog must fire off the last valid command");
}

// ── Watchdog expiry ──────────────────────────────────────────

#[test]
fn silence_beyond_timeout_stops_both_channels() {
    let (mut session, mut hw, mut sink) = make_session();
    connect(&mut session, &mut hw, &mut sink, 0);

    session.on_line("100,100", 0, &mut hw, &mut sink);

    session.poll(50, &mut hw, &mut sink);
    assert!(!hw.is_stopped(), "exactly timeout is not yet expiry");

    session.poll(51, &mut hw, &mut sink);
    assert!(hw.is_stopped(), "timeout exceeded without input");
    assert_eq!(sink.count(AppEvent::WatchdogTripped), 1);
}

#[test]
fn expired_polls_keep_forcing_stop_idempotently() {
    let (mut session, mut hw, mut sink) = make_session();
    connect(&mut session, &mut hw, &mut sink, 0);
    session.on_line("100,100", 0, &mut hw, &mut sink);

    for now in [60, 70, 80, 90] {
        session.poll(now, &mut hw, &mut sink);
    }

    assert!(hw.is_stopped());
    // The stop repeats on every expired poll…
    let stops = hw
        .calls
        .iter()
        .filter(|c| **c == ActuatorCall::StopAll)
        .count();
    assert_eq!(stops, 4);
    // …but the trip event fires once per starvation episode.
    assert_eq!(sink.count(AppEvent::WatchdogTripped), 1);
}

#[test]
fn fresh_command_rearms_after_a_trip() {
    let (mut session, mut hw, mut sink) = make_session();
    connect(&mut session, &mut hw, &mut sink, 0);

    session.on_line("80,80", 0, &mut hw, &mut sink);
    session.poll(100, &mut hw, &mut sink);
    assert!(hw.is_stopped());

    // The controller resumes streaming.
    session.on_line("30,-30", 110, &mut hw, &mut sink);
    session.poll(120, &mut hw, &mut sink);

    assert_eq!(hw.power(Channel::Left), 30);
    assert_eq!(hw.power(Channel::Right), -30);

    // And a second starvation episode trips again.
    session.poll(161, &mut hw, &mut sink);
    assert!(hw.is_stopped());
    assert_eq!(sink.count(AppEvent::WatchdogTripped), 2);
}

#[test]
fn command_in_same_tick_wins_over_expiry() {
    let (mut session, mut hw, mut sink) = make_session();
    connect(&mut session, &mut hw, &mut sink, 0);
    session.on_line("90,90", 0, &mut hw, &mut sink);

    // Control-loop ordering: the line drained this tick resets the
    // watchdog before the poll runs at the same instant.
    session.on_line("20,20", 60, &mut hw, &mut sink);
    session.poll(60, &mut hw, &mut sink);

    assert!(!hw.is_stopped(), "fresh command must not be overridden");
    assert_eq!(hw.power(Channel::Left), 20);
}

// ── Disconnect ───────────────────────────────────────────────

#[test]
fn disconnect_forces_stop_independent_of_watchdog() {
    let (mut session, mut hw, mut sink) = make_session();
    connect(&mut session, &mut hw, &mut sink, 0);

    session.on_line("100,100", 5, &mut hw, &mut sink);
    assert!(!hw.is_stopped());

    // Disconnect arrives well inside the timeout window.
    session.on_client_disconnected(&mut hw, &mut sink);

    assert!(hw.is_stopped(), "stop must not wait for the timer");
    assert_eq!(session.state(), SessionState::AwaitingClient);
    assert!(!hw.client_led, "client indicator deasserted");
    assert_eq!(sink.count(AppEvent::ClientDisconnected), 1);
}

#[test]
fn session_indicator_follows_lifecycle() {
    let (mut session, mut hw, mut sink) = make_session();
    assert!(!hw.client_led);

    connect(&mut session, &mut hw, &mut sink, 0);
    assert!(hw.client_led);

    session.on_client_disconnected(&mut hw, &mut sink);
    assert!(!hw.client_led);
}

#[test]
fn reconnect_starts_a_fresh_watchdog_window() {
    let (mut session, mut hw, mut sink) = make_session();
    connect(&mut session, &mut hw, &mut sink, 0);
    session.on_line("70,70", 0, &mut hw, &mut sink);
    session.on_client_disconnected(&mut hw, &mut sink);

    // Much later a new controller attaches; the stale timestamp from the
    // previous session must not trip the watchdog immediately.
    connect(&mut session, &mut hw, &mut sink, 10_000);
    session.poll(10_040, &mut hw, &mut sink);
    assert_eq!(sink.count(AppEvent::WatchdogTripped), 0);

    session.poll(10_051, &mut hw, &mut sink);
    assert_eq!(sink.count(AppEvent::WatchdogTripped), 1);
}

// ── Full pipeline through the line decoder ───────────────────

#[test]
fn byte_stream_to_actuators_end_to_end() {
    use rover::net::codec::LineDecoder;

    let (mut session, mut hw, mut sink) = make_session();
    connect(&mut session, &mut hw, &mut sink, 0);

    let mut decoder = LineDecoder::new();
    let mut now = 0u32;
    decoder.feed(b"50,50\nabc,50\n-100,", |line| {
        now += 10;
        session.on_line(line, now, &mut hw, &mut sink);
    });
    decoder.feed(b"100\n", |line| {
        now += 10;
        session.on_line(line, now, &mut hw, &mut sink);
    });

    // "abc,50" dropped; the split "-100,100" reassembled and applied.
    assert_eq!(hw.power(Channel::Left), -100);
    assert_eq!(hw.power(Channel::Right), 100);
    assert_eq!(
        sink.events
            .iter()
            .filter(|e| matches!(e, AppEvent::CommandApplied { .. }))
            .count(),
        2
    );
}

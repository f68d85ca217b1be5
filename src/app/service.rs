//! Drive session — the hexagonal core.
//!
//! [`DriveSession`] is the state machine for one attached controller:
//!
//! ```text
//!   AwaitingClient ──connect──▶ Active ──disconnect──▶ AwaitingClient
//! ```
//!
//! While `Active`, the control loop feeds it two kinds of work every
//! iteration: inbound lines (decode → apply → re-arm watchdog) and a
//! watchdog poll (force-stop on starvation).  Lines are always drained
//! before the poll, so a command decoded in an iteration is never undone by
//! a stale expiry evaluation from the same instant.
//!
//! All I/O flows through port traits injected at call sites, making the
//! session fully testable with mock adapters.

use log::{debug, info, warn};

use crate::config::DriveConfig;
use crate::safety::CommandWatchdog;

use super::command::{self, Channel};
use super::events::AppEvent;
use super::ports::{ActuatorPort, EventSink, IndicatorPort};

// ───────────────────────────────────────────────────────────────
// Session state
// ───────────────────────────────────────────────────────────────

/// Lifecycle state of the command session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Listening; no controller attached, motors stopped.
    AwaitingClient,
    /// A controller is attached and streaming commands.
    Active,
}

// ───────────────────────────────────────────────────────────────
// DriveSession
// ───────────────────────────────────────────────────────────────

/// Orchestrates one connected controller from accept to disconnect.
pub struct DriveSession {
    state: SessionState,
    /// Armed while `Active`; discarded when the session ends.
    watchdog: Option<CommandWatchdog>,
    timeout_ms: u32,
}

impl DriveSession {
    /// Construct the session from configuration.  Starts in
    /// [`SessionState::AwaitingClient`] with no watchdog armed.
    pub fn new(config: &DriveConfig) -> Self {
        Self {
            state: SessionState::AwaitingClient,
            watchdog: None,
            timeout_ms: config.command_timeout_ms,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    // ── Transitions ───────────────────────────────────────────

    /// A controller connected: go `Active`, light the client indicator and
    /// arm the watchdog at `now_ms`.
    ///
    /// Only one session exists at a time — a connect while already `Active`
    /// is a protocol violation upstream and is ignored.
    pub fn on_client_connected(
        &mut self,
        now_ms: u32,
        hw: &mut (impl ActuatorPort + IndicatorPort),
        sink: &mut impl EventSink,
    ) {
        if self.state == SessionState::Active {
            warn!("Session: connect while active, ignoring");
            return;
        }

        self.state = SessionState::Active;
        self.watchdog = Some(CommandWatchdog::new(self.timeout_ms, now_ms));
        hw.set_client_attached(true);
        sink.emit(&AppEvent::ClientConnected);
        info!("Session: controller attached");
    }

    /// The controller went away (peer close or read failure).  Forces a
    /// stop unconditionally — disconnection is its own trigger, independent
    /// of the watchdog timer — and returns to `AwaitingClient`.
    pub fn on_client_disconnected(
        &mut self,
        hw: &mut (impl ActuatorPort + IndicatorPort),
        sink: &mut impl EventSink,
    ) {
        if self.state == SessionState::AwaitingClient {
            return;
        }

        self.state = SessionState::AwaitingClient;
        self.watchdog = None;
        hw.stop_all();
        hw.set_client_attached(false);
        sink.emit(&AppEvent::ClientDisconnected);
        info!("Session: controller detached, motors stopped");
    }

    // ── Per-iteration work ────────────────────────────────────

    /// Decode one inbound line and, if valid, apply it to both channels and
    /// re-arm the watchdog.  Malformed lines are dropped silently — the
    /// next line supersedes them.
    pub fn on_line(
        &mut self,
        line: &str,
        now_ms: u32,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) {
        if self.state != SessionState::Active {
            debug!("Session: line while idle, dropping");
            return;
        }

        let Some(cmd) = command::decode_line(line) else {
            debug!("Session: malformed line {:?}, dropping", line);
            return;
        };

        hw.apply(Channel::Left, cmd.left);
        hw.apply(Channel::Right, cmd.right);
        if let Some(wd) = self.watchdog.as_mut() {
            wd.reset(now_ms);
        }
        sink.emit(&AppEvent::CommandApplied {
            left: cmd.left,
            right: cmd.right,
        });
    }

    /// Watchdog poll.  Runs every loop iteration regardless of whether any
    /// data arrived; the forced stop repeats (idempotently) on every
    /// expired poll until a fresh command re-arms the timer.
    pub fn poll(&mut self, now_ms: u32, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        if self.state != SessionState::Active {
            return;
        }

        let Some(wd) = self.watchdog.as_mut() else {
            return;
        };
        if wd.expired(now_ms) {
            hw.stop_all();
            if wd.note_tripped() {
                sink.emit(&AppEvent::WatchdogTripped);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::events::AppEvent;

    struct NullHw {
        applies: u32,
        stops: u32,
        client_led: bool,
    }

    impl NullHw {
        fn new() -> Self {
            Self {
                applies: 0,
                stops: 0,
                client_led: false,
            }
        }
    }

    impl ActuatorPort for NullHw {
        fn apply(&mut self, _channel: Channel, _power: i8) {
            self.applies += 1;
        }
        fn stop_all(&mut self) {
            self.stops += 1;
        }
    }

    impl IndicatorPort for NullHw {
        fn set_link_up(&mut self, _up: bool) {}
        fn set_client_attached(&mut self, attached: bool) {
            self.client_led = attached;
        }
    }

    struct VecSink(Vec<AppEvent>);

    impl EventSink for VecSink {
        fn emit(&mut self, event: &AppEvent) {
            self.0.push(*event);
        }
    }

    #[test]
    fn starts_awaiting_client() {
        let session = DriveSession::new(&DriveConfig::default());
        assert_eq!(session.state(), SessionState::AwaitingClient);
    }

    #[test]
    fn lines_before_connect_are_dropped() {
        let mut session = DriveSession::new(&DriveConfig::default());
        let mut hw = NullHw::new();
        let mut sink = VecSink(Vec::new());

        session.on_line("50,50", 0, &mut hw, &mut sink);
        assert_eq!(hw.applies, 0);
        assert!(sink.0.is_empty());
    }

    #[test]
    fn double_connect_is_ignored() {
        let mut session = DriveSession::new(&DriveConfig::default());
        let mut hw = NullHw::new();
        let mut sink = VecSink(Vec::new());

        session.on_client_connected(0, &mut hw, &mut sink);
        session.on_client_connected(10, &mut hw, &mut sink);
        assert_eq!(session.state(), SessionState::Active);
        assert!(hw.client_led);
        assert_eq!(
            sink.0
                .iter()
                .filter(|e| **e == AppEvent::ClientConnected)
                .count(),
            1
        );
    }

    #[test]
    fn disconnect_while_awaiting_is_a_no_op() {
        let mut session = DriveSession::new(&DriveConfig::default());
        let mut hw = NullHw::new();
        let mut sink = VecSink(Vec::new());

        session.on_client_disconnected(&mut hw, &mut sink);
        assert_eq!(hw.stops, 0);
        assert!(sink.0.is_empty());
    }
}

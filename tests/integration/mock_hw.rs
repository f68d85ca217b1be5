//! Mock hardware adapter for integration tests.
//!
//! Records every actuator and indicator call so tests can assert on the
//! full command history without touching real GPIO/PWM registers.

use rover::app::command::Channel;
use rover::app::events::AppEvent;
use rover::app::ports::{ActuatorPort, EventSink, IndicatorPort};

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    Apply { channel: Channel, power: i8 },
    StopAll,
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub calls: Vec<ActuatorCall>,
    pub link_led: bool,
    pub client_led: bool,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            link_led: false,
            client_led: false,
        }
    }

    pub fn last_call(&self) -> Option<&ActuatorCall> {
        self.calls.last()
    }

    /// Effective power on `channel` after replaying the call history.
    pub fn power(&self, channel: Channel) -> i8 {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::Apply { channel: ch, power } if *ch == channel => Some(*power),
                ActuatorCall::StopAll => Some(0),
                _ => None,
            })
            .unwrap_or(0)
    }

    pub fn is_stopped(&self) -> bool {
        self.power(Channel::Left) == 0 && self.power(Channel::Right) == 0
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl ActuatorPort for MockHardware {
    fn apply(&mut self, channel: Channel, power: i8) {
        self.calls.push(ActuatorCall::Apply { channel, power });
    }

    fn stop_all(&mut self) {
        self.calls.push(ActuatorCall::StopAll);
    }
}

impl IndicatorPort for MockHardware {
    fn set_link_up(&mut self, up: bool) {
        self.link_led = up;
    }

    fn set_client_attached(&mut self, attached: bool) {
        self.client_led = attached;
    }
}

// ── Recording event sink ─────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count(&self, wanted: AppEvent) -> usize {
        self.events.iter().filter(|e| **e == wanted).count()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}

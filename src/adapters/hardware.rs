//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns both motor channel drivers and the status LEDs, exposing them
//! through [`ActuatorPort`] and [`IndicatorPort`].  This is the only
//! module in the system that touches actual actuator hardware.  On
//! non-espidf targets, the underlying drivers use cfg-gated simulation
//! stubs.

use crate::app::command::Channel;
use crate::app::ports::{ActuatorPort, IndicatorPort};
use crate::drivers::motor::MotorDriver;
use crate::drivers::status_led::StatusLeds;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    left: MotorDriver,
    right: MotorDriver,
    leds: StatusLeds,
}

impl HardwareAdapter {
    pub fn new(left: MotorDriver, right: MotorDriver, leds: StatusLeds) -> Self {
        Self { left, right, leds }
    }

    fn motor(&mut self, channel: Channel) -> &mut MotorDriver {
        match channel {
            Channel::Left => &mut self.left,
            Channel::Right => &mut self.right,
        }
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn apply(&mut self, channel: Channel, power: i8) {
        self.motor(channel).apply(power);
    }

    fn stop_all(&mut self) {
        self.left.stop();
        self.right.stop();
    }
}

// ── IndicatorPort implementation ──────────────────────────────

impl IndicatorPort for HardwareAdapter {
    fn set_link_up(&mut self, up: bool) {
        self.leds.set_link(up);
    }

    fn set_client_attached(&mut self, attached: bool) {
        self.leds.set_client(attached);
    }
}

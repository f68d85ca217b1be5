//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ DriveSession (domain)
//! ```
//!
//! Driven adapters (motor drivers, status LEDs, event sinks) implement these
//! traits.  The [`DriveSession`](super::service::DriveSession) consumes them
//! via generics, so the domain core never touches hardware directly.

use super::command::Channel;

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command the motors.
///
/// Implementations are assumed infallible — PWM and GPIO sinks are
/// configured before the session loop starts, and a write failure after
/// that is a fatal platform fault, not a recoverable error.
pub trait ActuatorPort {
    /// Drive `channel` at `power` (−100 … 100; sign selects direction,
    /// zero de-asserts both direction outputs).
    fn apply(&mut self, channel: Channel, power: i8);

    /// Force every channel to the stopped state (duty 0, directions
    /// de-asserted).  Idempotent — safe to call repeatedly.
    fn stop_all(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Indicator port (driven adapter: domain → status LEDs)
// ───────────────────────────────────────────────────────────────

/// Discrete status outputs reflecting link and session state.
pub trait IndicatorPort {
    /// Assert/deassert the "network link up" indicator.
    fn set_link_up(&mut self, up: bool);

    /// Assert/deassert the "controller session attached" indicator.
    fn set_client_attached(&mut self, attached: bool);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / diagnostics)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log today; a
/// telemetry uplink would implement the same trait).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

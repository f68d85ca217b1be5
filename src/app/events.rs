//! Outbound application events.
//!
//! The [`DriveSession`](super::service::DriveSession) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them — today they go to the serial log.

/// Structured events emitted by the drive session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// A controller connected and the session went active.
    ClientConnected,

    /// The controller went away; motors were forced to a stop.
    ClientDisconnected,

    /// A decoded command was applied to the motors.
    CommandApplied { left: i8, right: i8 },

    /// The inactivity watchdog fired and forced a stop.
    WatchdogTripped,
}

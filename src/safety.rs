//! Command inactivity watchdog.
//!
//! The watchdog is the safety core of the firmware: if the controller stops
//! streaming commands (link congestion, crashed app, cable pulled mid-drive),
//! the rover must not keep running on the last command it happened to hear.
//!
//! ## Lifecycle
//!
//! 1. The session arms the watchdog with the current timestamp on connect.
//! 2. Every accepted command calls [`CommandWatchdog::reset`].
//! 3. The session polls [`CommandWatchdog::expired`] on every loop
//!    iteration; once the silence exceeds the deadline the motors are forced
//!    to a stop.  The stop is idempotent — it repeats on every expired poll
//!    until a fresh command re-arms the timer.
//!
//! All timestamps are monotonic milliseconds supplied by the caller, which
//! keeps the timer fully deterministic under test.

use log::warn;

/// Expiring timer re-armed by command activity.
pub struct CommandWatchdog {
    timeout_ms: u32,
    last_command_at_ms: u32,
    /// Latched once per starvation episode so the trip is logged once.
    tripped: bool,
}

impl CommandWatchdog {
    /// Create a watchdog armed at `now_ms`.
    pub fn new(timeout_ms: u32, now_ms: u32) -> Self {
        Self {
            timeout_ms,
            last_command_at_ms: now_ms,
            tripped: false,
        }
    }

    /// Record command activity at `now_ms`, re-arming the deadline.
    pub fn reset(&mut self, now_ms: u32) {
        self.last_command_at_ms = now_ms;
        self.tripped = false;
    }

    /// True iff more than the configured timeout has elapsed since the last
    /// reset.  Exactly `timeout` milliseconds of silence is not yet expiry.
    pub fn expired(&self, now_ms: u32) -> bool {
        now_ms.wrapping_sub(self.last_command_at_ms) > self.timeout_ms
    }

    /// Latch the trip.  Returns `true` only on the first call of a
    /// starvation episode, so callers can log/emit once while still forcing
    /// the (idempotent) stop on every expired poll.
    pub fn note_tripped(&mut self) -> bool {
        if self.tripped {
            return false;
        }
        self.tripped = true;
        warn!(
            "Watchdog: no command for >{}ms, forcing stop",
            self.timeout_ms
        );
        true
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }
}

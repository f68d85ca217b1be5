//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured session events to the
//! ESP-IDF logger (which goes to UART / USB-CDC in production).  A future
//! telemetry uplink would implement the same trait.

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::ClientConnected => {
                info!("SESSION | controller connected");
            }
            AppEvent::ClientDisconnected => {
                info!("SESSION | controller disconnected, motors stopped");
            }
            AppEvent::CommandApplied { left, right } => {
                info!("DRIVE | left={} right={}", left, right);
            }
            AppEvent::WatchdogTripped => {
                info!("SAFETY | watchdog stop");
            }
        }
    }
}

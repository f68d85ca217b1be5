//! Link inter-task communication channel.
//!
//! Uses an `embassy-sync` bounded MPMC channel to bridge the async I/O
//! task with the synchronous control loop. Both tasks share the static
//! channel without heap allocation.
//!
//! ```text
//! ┌──────────────┐   LinkEvent   ┌───────────────┐
//! │   I/O Task   │──────────────▶│  Control Loop │
//! │  (async)     │               │  (sync)       │
//! └──────────────┘               └───────────────┘
//! ```
//!
//! A single channel carries connects, lines, and disconnects so their
//! relative order is preserved end to end — a line must never be processed
//! after the disconnect that followed it.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use super::codec::MAX_LINE_LEN;

/// One inbound link event, delivered to the control loop in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEvent {
    /// A controller connected (the single session slot was free).
    ClientConnected,
    /// One complete command line (terminator stripped).
    Line(heapless::String<MAX_LINE_LEN>),
    /// The controller went away (peer close or read failure).
    ClientDisconnected,
}

/// Channel depth.  The controller streams at ~20 Hz and the control loop
/// drains every few milliseconds; 16 entries absorbs bursts comfortably.
const EVENT_DEPTH: usize = 16;

/// Inbound link event channel: I/O task → control loop.
pub static LINK_EVENTS: Channel<CriticalSectionRawMutex, LinkEvent, EVENT_DEPTH> = Channel::new();

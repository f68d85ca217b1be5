//! Async link I/O task — reactor-driven TCP-to-channel bridge.
//!
//! Runs in a dedicated thread using `edge-executor` for cooperative
//! multi-task scheduling and `async-io-mini` for reactor-driven timers
//! (no busy-spinning). Two concurrent futures:
//!
//! 1. **Accept** — polls `try_accept()` every 50ms via reactor timer;
//!    never accepts while a session is attached.
//! 2. **Read** — polls the client socket every 1ms via reactor timer,
//!    feeds bytes through the line decoder and forwards complete lines
//!    to the control loop.
//!
//! ```text
//!  ┌───────────────────────────────────────────────────────────┐
//!  │  I/O Thread                                               │
//!  │  ┌─────────────────────────────────────────────────────┐  │
//!  │  │  futures_lite::block_on (drives reactor + futures)  │  │
//!  │  │  ┌─────────────────────────────────────────────────┐│  │
//!  │  │  │  edge_executor::LocalExecutor                   ││  │
//!  │  │  │                                                 ││  │
//!  │  │  │    ┌─────────┐        ┌──────────┐              ││  │
//!  │  │  │    │ Accept  │        │   Read   │              ││  │
//!  │  │  │    │ 50ms ⏱ │        │  1ms ⏱  │              ││  │
//!  │  │  │    └─────────┘        └──────────┘              ││  │
//!  │  │  └─────────────────────────────────────────────────┘│  │
//!  │  └─────────────────────────────────────────────────────┘  │
//!  └───────────────────────────────────────────────────────────┘
//! ```
//!
//! The bounded reactor waits keep the control loop's watchdog guarantee
//! intact: nothing here ever blocks on the network.

use core::cell::RefCell;
use core::time::Duration;
use log::{info, warn};
use std::rc::Rc;

use crate::adapters::tcp_transport::TcpLink;

use super::channels::{LINK_EVENTS, LinkEvent};
use super::codec::LineDecoder;

const READ_BUF_SIZE: usize = 512;

// ── Line feeding + channel dispatch ──────────────────────────

/// Feed raw transport bytes through the decoder, forwarding each complete
/// line to the control loop.  A full channel drops the line — the next
/// command supersedes it.
fn feed_bytes(decoder: &mut LineDecoder, data: &[u8]) {
    decoder.feed(data, |line| {
        let Ok(line) = heapless::String::try_from(line) else {
            return; // cannot happen: decoder bounds line length
        };
        if LINK_EVENTS.try_send(LinkEvent::Line(line)).is_err() {
            warn!("Link: event channel full, dropping line");
        }
    });
}

// ── Async I/O loop ───────────────────────────────────────────

type SharedLink = Rc<RefCell<TcpLink>>;

/// Accept task — checks for a new controller connection at 50ms intervals.
/// Lower frequency is fine since connection setup is infrequent; the
/// single-session constraint is enforced inside `try_accept()`.
async fn accept_loop(link: SharedLink) {
    loop {
        let accepted = link.borrow_mut().try_accept().is_some();
        if accepted {
            // Connect/disconnect events must not be lost — wait for space.
            LINK_EVENTS.send(LinkEvent::ClientConnected).await;
        }
        async_io_mini::Timer::after(Duration::from_millis(50)).await;
    }
}

/// Read task — polls the attached client at 1ms intervals.  The 1ms
/// reactor timer is wake-based (not thread::sleep), so the executor can
/// service the accept task between ticks.
async fn read_loop(link: SharedLink) {
    let mut decoder = LineDecoder::new();
    let mut read_buf = [0u8; READ_BUF_SIZE];
    loop {
        let mut disconnected = false;
        {
            let mut l = link.borrow_mut();
            if l.is_connected() {
                match l.read(&mut read_buf) {
                    Ok(0) => {}
                    Ok(n) => feed_bytes(&mut decoder, &read_buf[..n]),
                    Err(_) => {
                        // TcpLink has already freed the slot.
                        decoder.reset();
                        disconnected = true;
                    }
                }
            }
        }
        if disconnected {
            LINK_EVENTS.send(LinkEvent::ClientDisconnected).await;
        }
        async_io_mini::Timer::after(Duration::from_millis(1)).await;
    }
}

/// Entry point for the I/O thread. Sets up the executor, spawns the two
/// async tasks, and drives them via the `async-io-mini` reactor.
fn run_io_loop(link: TcpLink) {
    let executor: edge_executor::LocalExecutor<'_, 4> = edge_executor::LocalExecutor::new();

    let link: SharedLink = Rc::new(RefCell::new(link));

    executor.spawn(accept_loop(link.clone())).detach();
    executor.spawn(read_loop(link.clone())).detach();

    info!("Link I/O task started (async, reactor-driven, single client)");

    // block_on drives the reactor (timers, I/O events) while the executor
    // drives the two spawned tasks.
    futures_lite::future::block_on(executor.run(core::future::pending::<()>()));
}

// ── Thread spawn ─────────────────────────────────────────────

/// Spawn the link I/O task in a dedicated thread pinned to Core 0
/// (PRO_CPU). Takes ownership of the bound TCP listener.  Core 0
/// co-locates with lwIP for cache-local network I/O.
pub fn spawn(link: TcpLink) -> std::thread::JoinHandle<()> {
    crate::drivers::task_pin::spawn_on_core(
        crate::drivers::task_pin::Core::Pro,
        12,
        16,
        "link-io\0",
        move || run_io_loop(link),
    )
}

// ── Channel accessor for the control loop ────────────────────

/// Try to receive the next inbound link event, in arrival order.
pub fn try_recv_event() -> Option<LinkEvent> {
    LINK_EVENTS.try_receive().ok()
}

// ── Tests ────────────────────────────────────────────────────

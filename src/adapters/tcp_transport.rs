//! Single-client TCP command transport.
//!
//! Listens on a fixed port for the controller's persistent stream
//! connection.  Exactly one client is serviced at a time: while a session
//! is attached, further inbound connections simply wait in the listener
//! backlog and are only accepted once the current session has fully ended.
//!
//! ## Connection model
//!
//! 1. [`TcpLink::bind`] binds a non-blocking listener on the given port.
//! 2. [`TcpLink::try_accept`] polls for an incoming connection while the
//!    client slot is free.
//! 3. Reads are non-blocking — [`TcpLink::read`] returns `Ok(0)` when no
//!    data is available rather than blocking the caller, so the I/O loop
//!    can keep its bounded-wait guarantee.
//! 4. EOF or a hard I/O error tears the client down and frees the slot.
//!
//! `std::net` is backed by lwIP on ESP-IDF, so the same implementation
//! serves both the device and host-side tests.

use core::fmt;
use std::io::Read;
use std::net::{SocketAddr, TcpListener, TcpStream};

use log::{info, warn};

// ───────────────────────────────────────────────────────────────
// Error type
// ───────────────────────────────────────────────────────────────

/// Errors originating from the TCP command transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkError {
    /// Operation requires an attached client but none is present.
    NotConnected,
    /// The peer closed the connection or the socket failed hard.
    /// The client slot has already been freed when this is returned.
    Disconnected,
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConnected => write!(f, "no client connected"),
            Self::Disconnected => write!(f, "client disconnected"),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// TcpLink
// ───────────────────────────────────────────────────────────────

/// Non-blocking, single-client TCP server for the command stream.
pub struct TcpLink {
    listener: TcpListener,
    client: Option<TcpStream>,
}

impl TcpLink {
    /// Bind the listener on `0.0.0.0:port` in non-blocking mode.
    ///
    /// A bind failure is fatal at initialisation — the firmware must not
    /// proceed to the command loop without a listening endpoint.
    pub fn bind(port: u16) -> std::io::Result<Self> {
        let listener = TcpListener::bind(("0.0.0.0", port))?;
        listener.set_nonblocking(true)?;
        info!("TcpLink: listening on port {}", port);
        Ok(Self {
            listener,
            client: None,
        })
    }

    /// Poll for an incoming connection.  Returns the peer address when a
    /// client was accepted.  While a client is attached this never
    /// accepts — the single-session constraint lives here.
    pub fn try_accept(&mut self) -> Option<SocketAddr> {
        if self.client.is_some() {
            return None;
        }

        match self.listener.accept() {
            Ok((stream, peer)) => {
                if let Err(e) = stream.set_nonblocking(true) {
                    warn!("TcpLink: failed to set non-blocking ({}), dropping", e);
                    return None;
                }
                // Command stream latency matters more than throughput.
                let _ = stream.set_nodelay(true);
                info!("TcpLink: client connected from {}", peer);
                self.client = Some(stream);
                Some(peer)
            }
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => None,
            Err(e) => {
                warn!("TcpLink: accept failed ({})", e);
                None
            }
        }
    }

    /// Read up to `buf.len()` bytes from the attached client.
    ///
    /// Returns `Ok(0)` when no data is available.  On EOF or a hard I/O
    /// error the client is torn down and `Err(Disconnected)` is returned.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize, LinkError> {
        let Some(stream) = self.client.as_mut() else {
            return Err(LinkError::NotConnected);
        };

        match stream.read(buf) {
            // read() == 0 on a live socket means the peer closed.
            Ok(0) => {
                self.disconnect();
                Err(LinkError::Disconnected)
            }
            Ok(n) => Ok(n),
            Err(e)
                if e.kind() == std::io::ErrorKind::WouldBlock
                    || e.kind() == std::io::ErrorKind::Interrupted =>
            {
                Ok(0)
            }
            Err(e) => {
                warn!("TcpLink: read failed ({}), dropping client", e);
                self.disconnect();
                Err(LinkError::Disconnected)
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        self.client.is_some()
    }

    /// Drop the attached client, freeing the session slot.
    pub fn disconnect(&mut self) {
        if self.client.take().is_some() {
            info!("TcpLink: client disconnected");
        }
    }

    /// Local address the listener is bound to (useful when binding port 0
    /// in tests).
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

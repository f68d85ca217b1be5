//! Newline-delimited line codec.
//!
//! Wire format: one command per line, terminated by `\n`.
//!
//! The decoder accumulates incoming bytes into a fixed buffer and yields
//! complete lines. This handles partial reads gracefully — a single
//! transport read may return part of a line, or several lines concatenated.
//!
//! Garbage tolerance: lines longer than [`MAX_LINE_LEN`] and lines that are
//! not valid UTF-8 are discarded whole, matching the protocol's
//! silently-skip-on-malformed policy.

/// Maximum accepted line length (protects against memory exhaustion; a
/// well-formed command is under 12 bytes).
pub const MAX_LINE_LEN: usize = 128;

/// Streaming line decoder.
pub struct LineDecoder {
    buf: heapless::Vec<u8, MAX_LINE_LEN>,
    /// Set while discarding an overlong line up to its terminator.
    overflowed: bool,
}

impl LineDecoder {
    pub fn new() -> Self {
        Self {
            buf: heapless::Vec::new(),
            overflowed: false,
        }
    }

    /// Feed bytes into the decoder, invoking `sink` once per complete line
    /// (terminator stripped, `\r` left for the caller's trim).
    pub fn feed(&mut self, data: &[u8], mut sink: impl FnMut(&str)) {
        for &byte in data {
            if byte == b'\n' {
                if self.overflowed {
                    // Tail of a discarded overlong line.
                    self.overflowed = false;
                } else if let Ok(line) = core::str::from_utf8(&self.buf) {
                    sink(line);
                }
                self.buf.clear();
                continue;
            }

            if !self.overflowed && self.buf.push(byte).is_err() {
                self.overflowed = true;
                self.buf.clear();
            }
        }
    }

    /// Discard any partial line (e.g. after a client reconnect).
    pub fn reset(&mut self) {
        self.buf.clear();
        self.overflowed = false;
    }
}

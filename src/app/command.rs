//! Drive command data model and line decoder.
//!
//! The wire protocol is a fire-and-forget stream of text lines:
//!
//! ```text
//! <leftPower>,<rightPower>\n
//! ```
//!
//! Decoding is a pure transformation — no I/O, no state.  Malformed lines
//! yield `None` and are dropped by the caller; the next line simply
//! supersedes them.  There is no error channel back to the peer.

/// Lowest accepted power value (full reverse).
pub const POWER_MIN: i8 = -100;
/// Highest accepted power value (full forward).
pub const POWER_MAX: i8 = 100;

/// One independently driven motor channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Left,
    Right,
}

/// A decoded drive command: signed power per channel, already clamped to
/// `[POWER_MIN, POWER_MAX]`.  Transient — applied once and discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriveCommand {
    pub left: i8,
    pub right: i8,
}

impl DriveCommand {
    /// The stopped command (both channels at zero power).
    pub const STOP: DriveCommand = DriveCommand { left: 0, right: 0 };

    pub fn power(&self, channel: Channel) -> i8 {
        match channel {
            Channel::Left => self.left,
            Channel::Right => self.right,
        }
    }
}

/// Decode one line of text into a [`DriveCommand`].
///
/// The line is trimmed, split on a single `,`, and each field is parsed as a
/// signed decimal integer.  Out-of-range magnitudes are saturated into
/// `[-100, 100]`, not rejected.  Anything else — missing separator,
/// non-numeric field, empty input — returns `None`.
pub fn decode_line(line: &str) -> Option<DriveCommand> {
    let line = line.trim();
    let (left_s, right_s) = line.split_once(',')?;

    // i64 so magnitudes far beyond the power range still parse and clamp.
    let left: i64 = left_s.trim().parse().ok()?;
    let right: i64 = right_s.trim().parse().ok()?;

    Some(DriveCommand {
        left: clamp_power(left),
        right: clamp_power(right),
    })
}

fn clamp_power(raw: i64) -> i8 {
    raw.clamp(POWER_MIN as i64, POWER_MAX as i64) as i8
}

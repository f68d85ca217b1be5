//! Fuzz target: `decode_line`
//!
//! Feeds arbitrary strings to the drive-command decoder and asserts that
//! it never panics and that every accepted command is within the power
//! range.
//!
//! cargo fuzz run fuzz_command_decode

#![no_main]

use libfuzzer_sys::fuzz_target;
use rover::app::command::{POWER_MAX, POWER_MIN, decode_line};

fuzz_target!(|line: &str| {
    if let Some(cmd) = decode_line(line) {
        assert!((POWER_MIN..=POWER_MAX).contains(&cmd.left));
        assert!((POWER_MIN..=POWER_MAX).contains(&cmd.right));
    }
});

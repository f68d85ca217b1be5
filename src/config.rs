//! System configuration parameters
//!
//! All tunable parameters for the rover firmware.  There is no config file
//! and nothing is persisted — the defaults below are the build-time
//! configuration, constructed once in `main()` and passed explicitly into
//! the drive session.

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveConfig {
    // --- Network ---
    /// WiFi station SSID.
    pub wifi_ssid: heapless::String<32>,
    /// WiFi station password (empty for an open network).
    pub wifi_password: heapless::String<64>,
    /// TCP port the command listener binds to.
    pub listen_port: u16,

    // --- Safety ---
    /// Watchdog deadline: maximum silence (milliseconds) before the motors
    /// are forced to a stop.  Deliberately short — the controller streams
    /// commands continuously.
    pub command_timeout_ms: u32,

    // --- Timing ---
    /// Control loop interval (milliseconds).  Must stay well under the
    /// command timeout so watchdog enforcement is prompt.
    pub control_loop_interval_ms: u32,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            wifi_ssid: heapless::String::try_from("server").unwrap(),
            wifi_password: heapless::String::try_from("12345678").unwrap(),
            listen_port: 12345,

            command_timeout_ms: 50,

            control_loop_interval_ms: 5, // 200 Hz
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = DriveConfig::default();
        assert!(c.listen_port != 0);
        assert!(c.command_timeout_ms > 0);
        assert!(c.control_loop_interval_ms > 0);
        assert!(!c.wifi_ssid.is_empty());
    }

    #[test]
    fn loop_faster_than_watchdog_invariant() {
        let c = DriveConfig::default();
        assert!(
            c.control_loop_interval_ms * 2 <= c.command_timeout_ms,
            "loop must poll the watchdog at least twice per deadline window"
        );
    }

    #[test]
    fn serde_roundtrip() {
        let c = DriveConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: DriveConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c.wifi_ssid, c2.wifi_ssid);
        assert_eq!(c.listen_port, c2.listen_port);
        assert_eq!(c.command_timeout_ms, c2.command_timeout_ms);
    }

    #[test]
    fn postcard_roundtrip() {
        let c = DriveConfig::default();
        let bytes = postcard::to_allocvec(&c).unwrap();
        let c2: DriveConfig = postcard::from_bytes(&bytes).unwrap();
        assert_eq!(c.listen_port, c2.listen_port);
        assert_eq!(c.control_loop_interval_ms, c2.control_loop_interval_ms);
    }
}

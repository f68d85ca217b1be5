//! Rover Firmware — Main Entry Point
//!
//! Hexagonal architecture with a single sequential control loop.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                     │
//! │                                                               │
//! │  HardwareAdapter        WifiAdapter        TcpLink + io_task  │
//! │  (Actuator+Indicator)   (Connectivity)     (command stream)   │
//! │                                                               │
//! │  ──────────────── Port Trait Boundary ──────────────────      │
//! │                                                               │
//! │  ┌─────────────────────────────────────────────────────┐      │
//! │  │            DriveSession (pure logic)                │      │
//! │  │  decode · apply · command watchdog                  │      │
//! │  └─────────────────────────────────────────────────────┘      │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! The I/O thread forwards ordered link events (connect / line /
//! disconnect) over a bounded channel; this loop drains them, then polls
//! the command watchdog — in that order, so a fresh command is never
//! overridden by a stale expiry check from the same tick.
#![deny(unused_must_use)]

// ── Module declarations ───────────────────────────────────────
pub mod config;
mod esp_link_shims;
mod pins;
mod safety;

pub mod app;
mod adapters;
mod drivers;
pub mod net;

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use log::{info, warn};

use adapters::hardware::HardwareAdapter;
use adapters::log_sink::LogEventSink;
use adapters::time::Esp32TimeAdapter;
use adapters::wifi::{ConnectivityPort, WifiAdapter};
use app::ports::{ActuatorPort, IndicatorPort};
use app::service::DriveSession;
use config::DriveConfig;
use drivers::motor::MotorDriver;
use drivers::status_led::StatusLeds;
use net::channels::LinkEvent;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("Rover firmware v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Initialise hardware peripherals ────────────────────
    if let Err(e) = drivers::hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        // In production this triggers the watchdog reset after timeout.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    let task_wdt = drivers::watchdog::TaskWatchdog::new();

    // ── 3. Configuration ──────────────────────────────────────
    // No config file and no persistence — the build-time defaults are the
    // configuration, passed explicitly to the session below.
    let config = DriveConfig::default();

    // ── 4. Construct adapters ─────────────────────────────────
    let mut hw = HardwareAdapter::new(MotorDriver::left(), MotorDriver::right(), StatusLeds::new());
    // Motors must be in a known-stopped state before anything connects.
    hw.stop_all();

    let mut sink = LogEventSink::new();
    let time = Esp32TimeAdapter::new();

    // ── 5. WiFi link bring-up ─────────────────────────────────
    // The command loop must not start without a link; keep retrying with
    // the adapter's backoff until the station is up.
    let mut wifi = WifiAdapter::new();
    #[cfg(target_os = "espidf")]
    {
        use esp_idf_svc::eventloop::EspSystemEventLoop;
        use esp_idf_svc::hal::peripherals::Peripherals;
        use esp_idf_svc::wifi::{BlockingWifi, EspWifi};

        let peripherals = Peripherals::take()?;
        let sysloop = EspSystemEventLoop::take()?;
        let esp_wifi = EspWifi::new(peripherals.modem, sysloop.clone(), None)?;
        wifi.attach(BlockingWifi::wrap(esp_wifi, sysloop)?);
    }
    wifi.set_credentials(config.wifi_ssid.as_str(), config.wifi_password.as_str())
        .map_err(|e| anyhow::anyhow!("invalid WiFi credentials: {}", e))?;

    let _ = wifi.connect();
    while !wifi.is_connected() {
        warn!(
            "WiFi bring-up failed, retrying in {}s",
            wifi.backoff_secs()
        );
        std::thread::sleep(std::time::Duration::from_secs(wifi.backoff_secs() as u64));
        wifi.poll();
    }
    hw.set_link_up(true);

    // ── 6. TCP listener + link I/O thread ─────────────────────
    let link = adapters::tcp_transport::TcpLink::bind(config.listen_port)
        .map_err(|e| anyhow::anyhow!("TCP bind on port {} failed: {}", config.listen_port, e))?;
    let _io_thread = net::io_task::spawn(link);

    // ── 7. Drive session ──────────────────────────────────────
    let mut session = DriveSession::new(&config);

    info!("System ready. Entering control loop.");

    // ── 8. Control loop ───────────────────────────────────────
    let tick = std::time::Duration::from_millis(config.control_loop_interval_ms as u64);
    let mut link_was_up = true;
    let mut wifi_poll_ms: u32 = 0;

    loop {
        // Drain all pending link events, in arrival order.  Lines are
        // processed before the watchdog poll below, so a command decoded
        // this tick always wins over a same-instant expiry.
        while let Some(event) = net::io_task::try_recv_event() {
            let now_ms = time.uptime_ms();
            match event {
                LinkEvent::ClientConnected => {
                    session.on_client_connected(now_ms, &mut hw, &mut sink);
                }
                LinkEvent::Line(line) => {
                    session.on_line(line.as_str(), now_ms, &mut hw, &mut sink);
                }
                LinkEvent::ClientDisconnected => {
                    session.on_client_disconnected(&mut hw, &mut sink);
                }
            }
        }

        // Watchdog poll — every iteration, even with no inbound data.
        session.poll(time.uptime_ms(), &mut hw, &mut sink);

        // WiFi poll + link indicator.  Rate-limited: a reconnect attempt
        // can block for seconds, so it must not run on every 5ms tick —
        // once per second while up, at the adapter's backoff while down.
        wifi_poll_ms = wifi_poll_ms.saturating_add(config.control_loop_interval_ms);
        let wifi_due_ms = if wifi.is_connected() {
            1_000
        } else {
            wifi.backoff_secs() * 1_000
        };
        if wifi_poll_ms >= wifi_due_ms {
            wifi_poll_ms = 0;
            wifi.poll();
            let link_up = wifi.is_connected();
            if link_up != link_was_up {
                hw.set_link_up(link_up);
                link_was_up = link_up;
            }
        }

        // Feed the task watchdog on every iteration.
        task_wdt.feed();

        std::thread::sleep(tick);
    }
}

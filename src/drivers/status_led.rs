//! Discrete status LED driver.
//!
//! Two plain GPIO outputs: one lit while the WiFi link is up, one lit
//! while a controller session is attached.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives real GPIO via hw_init.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::pins;

pub struct StatusLeds {
    link_on: bool,
    client_on: bool,
}

impl StatusLeds {
    pub fn new() -> Self {
        Self {
            link_on: false,
            client_on: false,
        }
    }

    pub fn set_link(&mut self, on: bool) {
        hw_init::gpio_write(pins::LINK_LED_GPIO, on);
        self.link_on = on;
    }

    pub fn set_client(&mut self, on: bool) {
        hw_init::gpio_write(pins::CLIENT_LED_GPIO, on);
        self.client_on = on;
    }

    pub fn all_off(&mut self) {
        self.set_link(false);
        self.set_client(false);
    }

    pub fn link_on(&self) -> bool {
        self.link_on
    }

    pub fn client_on(&self) -> bool {
        self.client_on
    }
}

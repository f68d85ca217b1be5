//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the rover: the command
//! decoder, the session state machine, and the events it emits.  All
//! interaction with hardware happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without real peripherals.

pub mod command;
pub mod events;
pub mod ports;
pub mod service;

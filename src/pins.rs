//! GPIO / peripheral pin assignments for the rover main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.
//!
//! Pin assignments match the L298N carrier-board wiring harness.

// ---------------------------------------------------------------------------
// Left motor (L298N channel A)
// ---------------------------------------------------------------------------

/// Digital output: left H-bridge input 1.
pub const MOTOR_LEFT_IN1_GPIO: i32 = 26;
/// Digital output: left H-bridge input 2.
pub const MOTOR_LEFT_IN2_GPIO: i32 = 27;
/// LEDC PWM output: left enable pin (ENA) — speed control.
pub const MOTOR_LEFT_EN_GPIO: i32 = 14;

// ---------------------------------------------------------------------------
// Right motor (L298N channel B)
// ---------------------------------------------------------------------------

/// Digital output: right H-bridge input 1.
pub const MOTOR_RIGHT_IN1_GPIO: i32 = 33;
/// Digital output: right H-bridge input 2.
pub const MOTOR_RIGHT_IN2_GPIO: i32 = 25;
/// LEDC PWM output: right enable pin (ENB) — speed control.
pub const MOTOR_RIGHT_EN_GPIO: i32 = 32;

// ---------------------------------------------------------------------------
// Status LEDs
// ---------------------------------------------------------------------------

/// Digital output: lit while the WiFi station link is up.
pub const LINK_LED_GPIO: i32 = 19;
/// Digital output: lit while a controller session is attached.
pub const CLIENT_LED_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits).  8-bit gives 0 – 255 duty levels.
pub const PWM_RESOLUTION_BITS: u32 = 8;
/// Full-scale duty value for the configured resolution.
pub const PWM_MAX_DUTY: u32 = (1 << PWM_RESOLUTION_BITS) - 1;
/// LEDC base frequency for the motor enable pins (30 kHz — inaudible).
pub const MOTOR_PWM_FREQ_HZ: u32 = 30_000;

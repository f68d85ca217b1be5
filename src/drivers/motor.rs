//! Differential-drive motor channel driver (L298N H-bridge).
//!
//! One instance per channel.  Signed power (−100 … 100) maps to a direction
//! pin pair plus an LEDC PWM duty on the enable pin:
//!
//! - power > 0 → IN1 high, IN2 low (forward)
//! - power < 0 → IN1 low, IN2 high (reverse)
//! - power = 0 → both low (coast stop)
//! - duty = round(|power| · 255 / 100) at 8-bit resolution
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives real PWM and GPIO via hw_init helpers.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::pins;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorState {
    Stopped,
    Running { power: i8, dir: Direction },
}

pub struct MotorDriver {
    in1_gpio: i32,
    in2_gpio: i32,
    ledc_channel: u32,
    state: MotorState,
    hw_duty: u8,
}

impl MotorDriver {
    /// Driver for the left channel, wired per [`pins`].
    pub fn left() -> Self {
        Self::new(
            pins::MOTOR_LEFT_IN1_GPIO,
            pins::MOTOR_LEFT_IN2_GPIO,
            hw_init::LEDC_CH_MOTOR_LEFT,
        )
    }

    /// Driver for the right channel, wired per [`pins`].
    pub fn right() -> Self {
        Self::new(
            pins::MOTOR_RIGHT_IN1_GPIO,
            pins::MOTOR_RIGHT_IN2_GPIO,
            hw_init::LEDC_CH_MOTOR_RIGHT,
        )
    }

    pub fn new(in1_gpio: i32, in2_gpio: i32, ledc_channel: u32) -> Self {
        Self {
            in1_gpio,
            in2_gpio,
            ledc_channel,
            state: MotorState::Stopped,
            hw_duty: 0,
        }
    }

    /// Drive the channel at `power`.  Saturates into −100 … 100.
    pub fn apply(&mut self, power: i8) {
        let power = power.clamp(-100, 100);
        if power == 0 {
            self.stop();
            return;
        }

        let dir = if power > 0 {
            Direction::Forward
        } else {
            Direction::Reverse
        };
        let duty = duty_for(power);

        self.set_direction_hw(Some(dir));
        hw_init::ledc_set(self.ledc_channel, duty);

        self.hw_duty = duty;
        self.state = MotorState::Running { power, dir };
    }

    /// Stop the channel: duty 0, both direction pins de-asserted.
    /// Idempotent.
    pub fn stop(&mut self) {
        hw_init::ledc_set(self.ledc_channel, 0);
        self.set_direction_hw(None);
        self.hw_duty = 0;
        self.state = MotorState::Stopped;
    }

    fn set_direction_hw(&self, dir: Option<Direction>) {
        let (in1, in2) = match dir {
            Some(Direction::Forward) => (true, false),
            Some(Direction::Reverse) => (false, true),
            None => (false, false),
        };
        hw_init::gpio_write(self.in1_gpio, in1);
        hw_init::gpio_write(self.in2_gpio, in2);
    }

    pub fn state(&self) -> MotorState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        !matches!(self.state, MotorState::Stopped)
    }

    pub fn current_duty(&self) -> u8 {
        self.hw_duty
    }
}

/// Linear |power| → duty mapping with round-half-up, full scale at 255.
fn duty_for(power: i8) -> u8 {
    let magnitude = power.unsigned_abs() as u32;
    ((magnitude * pins::PWM_MAX_DUTY + 50) / 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duty_mapping_endpoints() {
        assert_eq!(duty_for(0), 0);
        assert_eq!(duty_for(100), 255);
        assert_eq!(duty_for(-100), 255);
    }

    #[test]
    fn duty_mapping_rounds_half_up() {
        // 50 · 255 / 100 = 127.5 → 128
        assert_eq!(duty_for(50), 128);
        assert_eq!(duty_for(-50), 128);
        // 1 · 255 / 100 = 2.55 → 3
        assert_eq!(duty_for(1), 3);
    }

    #[test]
    fn apply_sets_state_and_duty() {
        let mut m = MotorDriver::left();
        m.apply(50);
        assert_eq!(
            m.state(),
            MotorState::Running {
                power: 50,
                dir: Direction::Forward
            }
        );
        assert_eq!(m.current_duty(), 128);
    }

    #[test]
    fn negative_power_runs_reverse() {
        let mut m = MotorDriver::right();
        m.apply(-100);
        assert_eq!(
            m.state(),
            MotorState::Running {
                power: -100,
                dir: Direction::Reverse
            }
        );
        assert_eq!(m.current_duty(), 255);
    }

    #[test]
    fn zero_power_is_stop() {
        let mut m = MotorDriver::left();
        m.apply(80);
        m.apply(0);
        assert_eq!(m.state(), MotorState::Stopped);
        assert_eq!(m.current_duty(), 0);
        assert!(!m.is_running());
    }

    #[test]
    fn stop_is_idempotent() {
        let mut m = MotorDriver::left();
        m.apply(100);
        m.stop();
        let first = (m.state(), m.current_duty());
        m.stop();
        m.stop();
        assert_eq!((m.state(), m.current_duty()), first);
        assert_eq!(m.current_duty(), 0);
    }

    #[test]
    fn out_of_range_power_saturates() {
        let mut m = MotorDriver::left();
        m.apply(i8::MAX);
        assert_eq!(
            m.state(),
            MotorState::Running {
                power: 100,
                dir: Direction::Forward
            }
        );
        assert_eq!(m.current_duty(), 255);
    }
}

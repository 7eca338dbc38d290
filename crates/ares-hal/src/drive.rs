//! [`DriveActuator`] – differential-drive mixing and bounds enforcement.
//!
//! Converts a bounded-or-not [`DriveCommand`] into per-wheel
//! [`WheelOutput`]s:
//!
//! ```text
//! left  = speed + turn
//! right = speed - turn
//! ```
//!
//! Mixing is purely additive: when `speed + turn` exceeds the channel
//! range there is **no normalisation**: the excess is clamped per
//! channel, which can silently bias the turn-vs-forward ratio at
//! saturation. That is documented behaviour, not corrected here.
//!
//! Out-of-range inputs are never rejected and never logged as errors;
//! each clipped channel increments a saturation counter that flows to
//! status snapshots so the condition stays observable.

use ares_types::{AresError, DriveCommand, WheelOutput};
use tracing::debug;

use crate::motor::MotorChannel;

/// Maximum per-wheel magnitude. Channel values are clamped to
/// `[-MAX, MAX]` before conversion to a [`WheelOutput`].
pub const MAX_WHEEL_MAGNITUDE: i32 = 255;

/// Differential drive output stage. Owns the two wheel channels and no
/// decision state whatsoever.
pub struct DriveActuator {
    left: Box<dyn MotorChannel>,
    right: Box<dyn MotorChannel>,
    saturation_clips: u64,
}

impl DriveActuator {
    /// Build the actuator from its two wheel channel drivers.
    pub fn new(left: Box<dyn MotorChannel>, right: Box<dyn MotorChannel>) -> Self {
        Self {
            left,
            right,
            saturation_clips: 0,
        }
    }

    /// Mix `command` into per-wheel outputs and apply them.
    ///
    /// # Errors
    ///
    /// Returns [`AresError::HardwareFault`] only when an underlying
    /// channel driver fails; saturation is not an error.
    pub fn apply(&mut self, command: DriveCommand) -> Result<(), AresError> {
        let left = i32::from(command.speed) + i32::from(command.turn);
        let right = i32::from(command.speed) - i32::from(command.turn);

        let left = self.clamp_channel(left, "left_wheel");
        let right = self.clamp_channel(right, "right_wheel");

        self.left.set_output(WheelOutput::from_signed(left))?;
        self.right.set_output(WheelOutput::from_signed(right))?;
        Ok(())
    }

    /// Force both wheels to `{Stopped, 0}` unconditionally, bypassing
    /// mixing. This is the fail-safe halt path.
    ///
    /// # Errors
    ///
    /// Returns [`AresError::HardwareFault`] when a channel driver
    /// fails. Both channels are still attempted.
    pub fn stop(&mut self) -> Result<(), AresError> {
        let left = self.left.set_output(WheelOutput::stopped());
        let right = self.right.set_output(WheelOutput::stopped());
        left.and(right)
    }

    /// Running count of channel values clipped at saturation.
    pub fn saturation_clips(&self) -> u64 {
        self.saturation_clips
    }

    /// Most recently commanded left wheel output.
    pub fn left_output(&self) -> WheelOutput {
        self.left.output()
    }

    /// Most recently commanded right wheel output.
    pub fn right_output(&self) -> WheelOutput {
        self.right.output()
    }

    fn clamp_channel(&mut self, value: i32, channel: &str) -> i32 {
        if value.abs() > MAX_WHEEL_MAGNITUDE {
            self.saturation_clips += 1;
            debug!(channel, requested = value, "drive channel clipped at saturation");
            value.clamp(-MAX_WHEEL_MAGNITUDE, MAX_WHEEL_MAGNITUDE)
        } else {
            value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimMotor;
    use ares_types::WheelDirection;

    fn actuator() -> (DriveActuator, SimMotor, SimMotor) {
        let left = SimMotor::new("left_wheel");
        let right = SimMotor::new("right_wheel");
        let drive = DriveActuator::new(Box::new(left.clone()), Box::new(right.clone()));
        (drive, left, right)
    }

    #[test]
    fn forward_command_drives_both_wheels_forward() {
        let (mut drive, left, right) = actuator();
        drive.apply(DriveCommand::forward(150)).unwrap();

        assert_eq!(left.output().direction, WheelDirection::Forward);
        assert_eq!(left.output().magnitude, 150);
        assert_eq!(right.output().direction, WheelDirection::Forward);
        assert_eq!(right.output().magnitude, 150);
    }

    #[test]
    fn spin_command_counter_rotates_wheels() {
        let (mut drive, left, right) = actuator();
        drive.apply(DriveCommand::spin(150)).unwrap();

        assert_eq!(left.output().direction, WheelDirection::Forward);
        assert_eq!(left.output().magnitude, 150);
        assert_eq!(right.output().direction, WheelDirection::Reverse);
        assert_eq!(right.output().magnitude, 150);
    }

    #[test]
    fn channels_clamp_independently_at_boundary() {
        let (mut drive, left, right) = actuator();
        // s=200, t=100 → left = 300 clamps to 255, right = 100 untouched.
        drive.apply(DriveCommand { speed: 200, turn: 100 }).unwrap();

        assert_eq!(left.output().magnitude, 255);
        assert_eq!(right.output().magnitude, 100);
        assert_eq!(drive.saturation_clips(), 1);
    }

    #[test]
    fn negative_overrange_clamps_to_reverse_max() {
        let (mut drive, left, _right) = actuator();
        drive.apply(DriveCommand { speed: -200, turn: -100 }).unwrap();

        assert_eq!(left.output().direction, WheelDirection::Reverse);
        assert_eq!(left.output().magnitude, 255);
    }

    #[test]
    fn saturation_is_counted_never_rejected() {
        let (mut drive, _, _) = actuator();
        drive.apply(DriveCommand { speed: 300, turn: 300 }).unwrap();
        // Both channels over range on the same command: left = 600, right = 0.
        assert_eq!(drive.saturation_clips(), 1);
        drive.apply(DriveCommand { speed: 300, turn: 0 }).unwrap();
        assert_eq!(drive.saturation_clips(), 3);
    }

    #[test]
    fn stop_yields_stopped_zero_regardless_of_prior_state() {
        let (mut drive, left, right) = actuator();
        drive.apply(DriveCommand { speed: 255, turn: -80 }).unwrap();
        drive.stop().unwrap();

        assert_eq!(left.output(), WheelOutput::stopped());
        assert_eq!(right.output(), WheelOutput::stopped());
    }
}

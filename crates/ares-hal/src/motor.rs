//! Generic `MotorChannel` trait for a single drive wheel endpoint.
//!
//! Drivers implement this trait for whatever motor controller the
//! rover carries (an H-bridge channel, a CAN speed controller, a sim
//! stub). The rest of the system only ever talks to the trait through
//! [`DriveActuator`][crate::drive::DriveActuator].

use ares_types::{AresError, WheelOutput};

/// One wheel's direction + magnitude output endpoint.
///
/// Implementations must accept any [`WheelOutput`]; bounds enforcement
/// happens upstream in the drive actuator, so the value arriving here
/// is already within `[0, 255]`.
pub trait MotorChannel: Send + Sync {
    /// Stable identifier for this channel, e.g. `"left_wheel"`.
    fn id(&self) -> &str;

    /// Drive the wheel.
    ///
    /// # Errors
    ///
    /// Returns [`AresError::HardwareFault`] if the command cannot be
    /// applied (e.g. the controller link is down).
    fn set_output(&mut self, output: WheelOutput) -> Result<(), AresError>;

    /// The most recently commanded output.
    fn output(&self) -> WheelOutput;
}

#[cfg(test)]
mod tests {
    use super::*;
    use ares_types::WheelDirection;

    struct TestMotor {
        id: String,
        output: WheelOutput,
    }

    impl MotorChannel for TestMotor {
        fn id(&self) -> &str {
            &self.id
        }

        fn set_output(&mut self, output: WheelOutput) -> Result<(), AresError> {
            self.output = output;
            Ok(())
        }

        fn output(&self) -> WheelOutput {
            self.output
        }
    }

    #[test]
    fn motor_channel_set_and_get_output() {
        let mut motor = TestMotor {
            id: "left_wheel".to_string(),
            output: WheelOutput::stopped(),
        };
        assert_eq!(motor.id(), "left_wheel");

        motor
            .set_output(WheelOutput {
                direction: WheelDirection::Reverse,
                magnitude: 90,
            })
            .unwrap();
        assert_eq!(motor.output().direction, WheelDirection::Reverse);
        assert_eq!(motor.output().magnitude, 90);
    }
}

//! Open-loop manipulator contract.
//!
//! The arm is an external collaborator of the control core: pure
//! position commands, no feedback, no invariants to violate. It is
//! specified here only at its interface boundary.

use ares_types::AresError;

/// Joint angles for the four-servo inspection arm, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmPose {
    pub base_deg: u8,
    pub shoulder_deg: u8,
    pub elbow_deg: u8,
    pub gripper_deg: u8,
}

impl ArmPose {
    /// Stowed travel pose: joints centred, gripper closed.
    pub const HOME: ArmPose = ArmPose {
        base_deg: 90,
        shoulder_deg: 90,
        elbow_deg: 90,
        gripper_deg: 0,
    };
}

/// Open-loop arm positioning.
pub trait Arm: Send {
    /// Stable identifier, e.g. `"inspection_arm"`.
    fn id(&self) -> &str;

    /// Command all four joints to `pose`. Fire-and-forget; there is no
    /// way to observe whether the servos reached it.
    ///
    /// # Errors
    ///
    /// Returns [`AresError::HardwareFault`] if the command cannot be
    /// issued.
    fn set_pose(&mut self, pose: ArmPose) -> Result<(), AresError>;

    /// Return the arm to [`ArmPose::HOME`].
    fn home(&mut self) -> Result<(), AresError> {
        self.set_pose(ArmPose::HOME)
    }
}

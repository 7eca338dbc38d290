//! [`NavigationSupervisor`] – autonomous drive decisions and the
//! Manual/Autonomous mode flag.
//!
//! While Autonomous, this supervisor is the sole writer of drive
//! commands: each tick samples the distance source once and forwards
//! the policy's decision to the drive actuator. While Manual, the
//! control loop writes instead, through [`manual_drive`].
//!
//! Switching to Manual is fail-safe: the transition issues an
//! unconditional `stop()` exactly once, synchronously, rather than
//! holding the last autonomous command.
//!
//! [`manual_drive`]: NavigationSupervisor::manual_drive

use ares_hal::drive::DriveActuator;
use ares_hal::sensor::DistanceSource;
use ares_types::{DriveCommand, NavigationMode};
use tracing::{debug, error, info, warn};

use crate::policy::Policy;

/// Owns the mode flag, the avoidance policy and the drive actuator.
pub struct NavigationSupervisor {
    mode: NavigationMode,
    policy: Box<dyn Policy>,
    drive: DriveActuator,
    distance: Box<dyn DistanceSource>,
    /// Last decision forwarded to the actuator while Autonomous.
    /// Repeating ticks with an unchanged decision issue no additional
    /// actuator commands.
    last_decision: Option<DriveCommand>,
}

impl NavigationSupervisor {
    /// Starts in [`NavigationMode::Manual`]: the rover never moves
    /// until an operator or startup sequence explicitly enables
    /// autonomy.
    pub fn new(
        policy: Box<dyn Policy>,
        drive: DriveActuator,
        distance: Box<dyn DistanceSource>,
    ) -> Self {
        Self {
            mode: NavigationMode::Manual,
            policy,
            drive,
            distance,
            last_decision: None,
        }
    }

    /// Current drive authority.
    pub fn mode(&self) -> NavigationMode {
        self.mode
    }

    /// Read access to the drive actuator, for status snapshots.
    pub fn drive(&self) -> &DriveActuator {
        &self.drive
    }

    /// Toggle drive authority. A transition to Manual halts the drive
    /// synchronously before returning; re-asserting the current mode
    /// is a no-op.
    pub fn set_mode(&mut self, mode: NavigationMode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        self.last_decision = None;
        info!(policy = self.policy.name(), ?mode, "navigation mode changed");
        if mode == NavigationMode::Manual
            && let Err(e) = self.drive.stop()
        {
            error!(error = %e, "fail-safe stop on Manual transition failed");
        }
    }

    /// One navigation step. A no-op while Manual. While Autonomous,
    /// samples the distance source once and forwards the policy
    /// decision, but only when it differs from the last one issued,
    /// so a stable decision produces no repeated actuator traffic.
    pub fn tick(&mut self) {
        if self.mode == NavigationMode::Manual {
            return;
        }
        let distance = self.distance.read();
        let command = self.policy.decide(distance);
        if self.last_decision == Some(command) {
            return;
        }
        debug!(distance, ?command, "navigation decision");
        if let Err(e) = self.drive.apply(command) {
            // Degrade rather than halt: keep ticking, retry next cycle.
            error!(error = %e, "drive command failed");
            return;
        }
        self.last_decision = Some(command);
    }

    /// Operator drive command. Honored only while Manual; while
    /// Autonomous it is dropped and reported, never treated as an
    /// error. Returns whether the command was applied.
    pub fn manual_drive(&mut self, command: DriveCommand) -> bool {
        if self.mode != NavigationMode::Manual {
            warn!(?command, "manual drive ignored while autonomous");
            return false;
        }
        if let Err(e) = self.drive.apply(command) {
            error!(error = %e, "manual drive command failed");
        }
        true
    }
}

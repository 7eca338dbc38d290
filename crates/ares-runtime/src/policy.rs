//! Obstacle-avoidance policy seam.
//!
//! The navigation supervisor only ever talks to the [`Policy`] trait,
//! so the stock reactive policy can later be replaced by a planner
//! without touching actuation or mode handling.

use ares_types::DriveCommand;

/// Maps one distance sample to one drive decision.
pub trait Policy: Send {
    /// Human-readable name used in logs.
    fn name(&self) -> &str;

    /// Decide a drive command for the given distance-to-nearest-
    /// obstacle sample (same units as the configured threshold;
    /// non-positive means invalid / no reading).
    fn decide(&mut self, distance: f32) -> DriveCommand;
}

/// The stock two-state reactive policy: spin in place when an obstacle
/// is closer than the threshold, otherwise drive forward.
///
/// Deliberately memoryless; it can oscillate when an obstacle sits
/// exactly at the threshold boundary. The comparison is strict `<`, so
/// the threshold itself reads as clear. A non-positive sample (sensor
/// fault or no echo) also reads as clear: availability is favoured
/// over caution, matching the fitted ranging sensor's fault-value
/// convention.
pub struct AvoidancePolicy {
    /// Obstacle distance below which the rover turns, in the distance
    /// source's units (centimetres on the reference platform).
    pub obstacle_threshold: f32,
    /// Forward speed issued on a clear path.
    pub forward_rate: i16,
    /// Turn rate issued while avoiding.
    pub turn_rate: i16,
}

impl Policy for AvoidancePolicy {
    fn name(&self) -> &str {
        "avoidance"
    }

    fn decide(&mut self, distance: f32) -> DriveCommand {
        if distance > 0.0 && distance < self.obstacle_threshold {
            DriveCommand::spin(self.turn_rate)
        } else {
            DriveCommand::forward(self.forward_rate)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> AvoidancePolicy {
        AvoidancePolicy {
            obstacle_threshold: 30.0,
            forward_rate: 150,
            turn_rate: 150,
        }
    }

    #[test]
    fn obstacle_inside_threshold_turns() {
        assert_eq!(policy().decide(29.0), DriveCommand::spin(150));
        assert_eq!(policy().decide(0.5), DriveCommand::spin(150));
    }

    #[test]
    fn threshold_boundary_reads_as_clear() {
        assert_eq!(policy().decide(30.0), DriveCommand::forward(150));
    }

    #[test]
    fn clear_path_drives_forward() {
        assert_eq!(policy().decide(120.0), DriveCommand::forward(150));
    }

    #[test]
    fn invalid_sample_reads_as_clear() {
        assert_eq!(policy().decide(0.0), DriveCommand::forward(150));
        assert_eq!(policy().decide(-1.0), DriveCommand::forward(150));
    }
}

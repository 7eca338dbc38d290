//! [`ControlConfig`] – the named control constants.
//!
//! Historically these thresholds were hard-coded in the control flow;
//! here they live in one structure with documented units and valid
//! ranges, validated once at startup. They are **not**
//! runtime-reloadable: a change requires a restart.

use std::time::Duration;

use ares_kernel::safety::SafetyConfig;
use ares_types::AresError;
use serde::{Deserialize, Serialize};

use crate::policy::AvoidancePolicy;

/// Control-loop constants with their deployment defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlConfig {
    /// Obstacle distance below which the rover turns, in centimetres.
    /// Valid: finite, > 0.
    #[serde(default = "default_obstacle_threshold_cm")]
    pub obstacle_threshold_cm: f32,

    /// Forward speed on a clear path, raw wheel units.
    /// Valid: magnitude 1–255.
    #[serde(default = "default_forward_rate")]
    pub forward_rate: i16,

    /// In-place turn rate while avoiding, raw wheel units.
    /// Valid: magnitude 1–255.
    #[serde(default = "default_turn_rate")]
    pub turn_rate: i16,

    /// Thermal alarm threshold, °C. Valid: within the plausible
    /// calibrated range −40 to 300.
    #[serde(default = "default_critical_temp_c")]
    pub critical_temp_c: f32,

    /// Default nozzle aim for automatic triggers, degrees.
    /// Valid: 0–180.
    #[serde(default = "default_nozzle_angle_deg")]
    pub nozzle_angle_deg: u8,

    /// Pause between nozzle aim and pump activation, milliseconds.
    /// Valid: 0–10 000.
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Control loop cadence, milliseconds. Valid: 1–1000.
    #[serde(default = "default_tick_period_ms")]
    pub tick_period_ms: u64,
}

fn default_obstacle_threshold_cm() -> f32 {
    30.0
}
fn default_forward_rate() -> i16 {
    150
}
fn default_turn_rate() -> i16 {
    150
}
fn default_critical_temp_c() -> f32 {
    80.0
}
fn default_nozzle_angle_deg() -> u8 {
    90
}
fn default_settle_delay_ms() -> u64 {
    500
}
fn default_tick_period_ms() -> u64 {
    100
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            obstacle_threshold_cm: default_obstacle_threshold_cm(),
            forward_rate: default_forward_rate(),
            turn_rate: default_turn_rate(),
            critical_temp_c: default_critical_temp_c(),
            nozzle_angle_deg: default_nozzle_angle_deg(),
            settle_delay_ms: default_settle_delay_ms(),
            tick_period_ms: default_tick_period_ms(),
        }
    }
}

impl ControlConfig {
    /// Check every field against its documented valid range.
    ///
    /// # Errors
    ///
    /// Returns [`AresError::InvalidConfig`] naming the first offending
    /// field.
    pub fn validate(&self) -> Result<(), AresError> {
        if !self.obstacle_threshold_cm.is_finite() || self.obstacle_threshold_cm <= 0.0 {
            return Err(AresError::InvalidConfig(format!(
                "obstacle_threshold_cm must be finite and > 0, got {}",
                self.obstacle_threshold_cm
            )));
        }
        for (name, rate) in [("forward_rate", self.forward_rate), ("turn_rate", self.turn_rate)] {
            if rate == 0 || rate.unsigned_abs() > 255 {
                return Err(AresError::InvalidConfig(format!(
                    "{name} magnitude must be 1-255, got {rate}"
                )));
            }
        }
        if !self.critical_temp_c.is_finite()
            || !(-40.0..=300.0).contains(&self.critical_temp_c)
        {
            return Err(AresError::InvalidConfig(format!(
                "critical_temp_c must be within -40..=300, got {}",
                self.critical_temp_c
            )));
        }
        if self.nozzle_angle_deg > 180 {
            return Err(AresError::InvalidConfig(format!(
                "nozzle_angle_deg must be 0-180, got {}",
                self.nozzle_angle_deg
            )));
        }
        if self.settle_delay_ms > 10_000 {
            return Err(AresError::InvalidConfig(format!(
                "settle_delay_ms must be 0-10000, got {}",
                self.settle_delay_ms
            )));
        }
        if self.tick_period_ms == 0 || self.tick_period_ms > 1000 {
            return Err(AresError::InvalidConfig(format!(
                "tick_period_ms must be 1-1000, got {}",
                self.tick_period_ms
            )));
        }
        Ok(())
    }

    /// Control loop cadence.
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    /// The safety supervisor's slice of this configuration.
    pub fn safety(&self) -> SafetyConfig {
        SafetyConfig {
            critical_temp_c: self.critical_temp_c,
            nozzle_angle_deg: self.nozzle_angle_deg,
            settle: Duration::from_millis(self.settle_delay_ms),
        }
    }

    /// Build the stock avoidance policy from these constants.
    pub fn policy(&self) -> AvoidancePolicy {
        AvoidancePolicy {
            obstacle_threshold: self.obstacle_threshold_cm,
            forward_rate: self.forward_rate,
            turn_rate: self.turn_rate,
        }
    }
}

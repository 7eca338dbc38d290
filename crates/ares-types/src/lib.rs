//! `ares-types` – shared data model for the ARES rover control core.
//!
//! Every crate in the workspace speaks these types: the HAL consumes
//! [`DriveCommand`]s and produces [`WheelOutput`]s, the supervisors own
//! [`NavigationMode`] and [`SuppressionState`], and the control loop
//! publishes [`Event`]s and [`StatusSnapshot`]s on the bus.
//!
//! All entities here are plain data. Decision logic lives in
//! `ares-kernel` and `ares-runtime`; output arbitration lives in
//! `ares-hal`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

// ─────────────────────────────────────────────────────────────────────────────
// Drive
// ─────────────────────────────────────────────────────────────────────────────

/// A differential-drive request: signed forward speed plus signed turn
/// component, both in raw wheel units.
///
/// The command itself is deliberately *unclamped*; bounding is the
/// drive actuator's job, applied per output channel after mixing.
/// Out-of-range values are therefore representable and legal here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveCommand {
    /// Forward component. Positive drives forward, negative reverse.
    pub speed: i16,
    /// Turn component. Positive spins clockwise (right wheel slows).
    pub turn: i16,
}

impl DriveCommand {
    /// Straight-line motion at `rate`, no turn component.
    pub fn forward(rate: i16) -> Self {
        Self { speed: rate, turn: 0 }
    }

    /// In-place rotation at `rate`, no forward component.
    pub fn spin(rate: i16) -> Self {
        Self { speed: 0, turn: rate }
    }

    /// The zero command. Note this still goes through mixing; use the
    /// actuator's `stop()` for the unconditional fail-safe halt.
    pub fn halt() -> Self {
        Self { speed: 0, turn: 0 }
    }
}

/// Rotation sense of a single wheel channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WheelDirection {
    Forward,
    Reverse,
    Stopped,
}

/// Per-wheel output: direction plus an unsigned PWM-style magnitude in
/// `[0, 255]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelOutput {
    pub direction: WheelDirection,
    pub magnitude: u8,
}

impl WheelOutput {
    /// A stopped wheel: `{Stopped, 0}`.
    pub fn stopped() -> Self {
        Self {
            direction: WheelDirection::Stopped,
            magnitude: 0,
        }
    }

    /// Derive a wheel output from a signed channel value: the sign
    /// selects the direction, the magnitude is the absolute value
    /// saturated to 255. Zero maps to `{Stopped, 0}`.
    pub fn from_signed(value: i32) -> Self {
        let direction = match value {
            v if v > 0 => WheelDirection::Forward,
            v if v < 0 => WheelDirection::Reverse,
            _ => WheelDirection::Stopped,
        };
        let magnitude = value.unsigned_abs().min(u8::MAX as u32) as u8;
        Self { direction, magnitude }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Modes & safety states
// ─────────────────────────────────────────────────────────────────────────────

/// Drive authority. Mutated only by an explicit operator toggle; read
/// by the navigation supervisor on every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationMode {
    /// Operator drives; autonomous policy output is suppressed.
    Manual,
    /// Obstacle-avoidance policy drives.
    Autonomous,
}

/// Suppression actuator phase. Transitions are one-directional
/// triggers: `Idle → Aiming → Spraying` on command, and `→ Idle` only
/// on an explicit deactivate, never automatically on cooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuppressionState {
    Idle,
    Aiming,
    Spraying,
}

// ─────────────────────────────────────────────────────────────────────────────
// Sensors & snapshots
// ─────────────────────────────────────────────────────────────────────────────

/// One calibrated environmental reading, produced fresh on every read.
/// Staleness is not tracked; callers must re-sample each tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorSample {
    /// Degrees Celsius.
    pub temperature_c: f32,
    /// Hectopascals.
    pub pressure_hpa: f32,
    /// Raw ADC gas reading (MQ-2 class sensor).
    pub gas_level: u16,
    /// Radiation counts per minute.
    pub radiation_cpm: u16,
}

/// Point-in-time view of the control core, rendered by status displays
/// and published periodically on the telemetry topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub timestamp: DateTime<Utc>,
    pub mode: NavigationMode,
    /// Thermal alarm latch: stays `true` until an explicit reset.
    pub alarm: bool,
    pub suppression: SuppressionState,
    /// Most recent environmental sample, if one has been taken.
    pub last_sample: Option<SensorSample>,
    /// Running count of drive channel values clipped at saturation.
    pub saturation_clips: u64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Events
// ─────────────────────────────────────────────────────────────────────────────

/// Unified wrapper for everything published on the event bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    /// Emitting component, e.g. `"ares-runtime::control"`.
    pub source: String,
    pub payload: EventPayload,
}

impl Event {
    /// Build a fresh event stamped with the current wall-clock time.
    pub fn now(source: impl Into<String>, payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            source: source.into(),
            payload,
        }
    }
}

/// Variants routed over the internal event bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EventPayload {
    /// Periodic control-core status.
    Status(StatusSnapshot),
    /// Operator toggled drive authority.
    ModeChanged { mode: NavigationMode },
    /// A manual drive command arrived while Autonomous and was
    /// dropped. Not an error; surfaced so the operator can see it.
    ManualDriveIgnored { speed: i16, turn: i16 },
    /// The thermal alarm latched (first threshold crossing, or a
    /// manual trigger).
    AlarmLatched { temperature_c: Option<f32> },
    /// The pump relay was energised after the settle delay.
    SuppressionActivated,
    /// Operator cleared the latch and de-energised the pump.
    SuppressionReset,
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Global error type for the control core.
///
/// None of these are fatal to the loop: actuator faults are logged and
/// the tick continues degraded (stop, or hold suppression state).
#[derive(Error, Debug, Serialize, Deserialize)]
pub enum AresError {
    #[error("Hardware fault on {component}: {details}")]
    HardwareFault { component: String, details: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Event bus error: {0}")]
    Channel(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_output_from_signed_selects_direction() {
        assert_eq!(
            WheelOutput::from_signed(120),
            WheelOutput {
                direction: WheelDirection::Forward,
                magnitude: 120
            }
        );
        assert_eq!(
            WheelOutput::from_signed(-64),
            WheelOutput {
                direction: WheelDirection::Reverse,
                magnitude: 64
            }
        );
        assert_eq!(WheelOutput::from_signed(0), WheelOutput::stopped());
    }

    #[test]
    fn wheel_output_saturates_at_255() {
        assert_eq!(WheelOutput::from_signed(300).magnitude, 255);
        assert_eq!(WheelOutput::from_signed(-1000).magnitude, 255);
        // i32::MIN would overflow a naive abs().
        assert_eq!(WheelOutput::from_signed(i32::MIN).magnitude, 255);
    }

    #[test]
    fn drive_command_constructors() {
        assert_eq!(DriveCommand::forward(150), DriveCommand { speed: 150, turn: 0 });
        assert_eq!(DriveCommand::spin(150), DriveCommand { speed: 0, turn: 150 });
        assert_eq!(DriveCommand::halt(), DriveCommand { speed: 0, turn: 0 });
    }

    #[test]
    fn drive_command_roundtrip() {
        let cmd = DriveCommand { speed: 200, turn: -100 };
        let json = serde_json::to_string(&cmd).unwrap();
        let back: DriveCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(cmd, back);
    }

    #[test]
    fn event_roundtrip() {
        let event = Event::now(
            "ares-runtime::control",
            EventPayload::AlarmLatched {
                temperature_c: Some(83.2),
            },
        );
        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(event.id, back.id);
        assert_eq!(event.source, back.source);
    }

    #[test]
    fn snapshot_roundtrip() {
        let snap = StatusSnapshot {
            timestamp: Utc::now(),
            mode: NavigationMode::Autonomous,
            alarm: false,
            suppression: SuppressionState::Idle,
            last_sample: Some(SensorSample {
                temperature_c: 24.5,
                pressure_hpa: 1013.25,
                gas_level: 120,
                radiation_cpm: 18,
            }),
            saturation_clips: 3,
        };
        let json = serde_json::to_string(&snap).unwrap();
        let back: StatusSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snap, back);
    }

    #[test]
    fn ares_error_display() {
        let err = AresError::HardwareFault {
            component: "pump_relay".to_string(),
            details: "bus write failed".to_string(),
        };
        assert!(err.to_string().contains("pump_relay"));

        let err2 = AresError::InvalidConfig("tick_period_ms must be > 0".to_string());
        assert!(err2.to_string().contains("tick_period_ms"));
    }
}

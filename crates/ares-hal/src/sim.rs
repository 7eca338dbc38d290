//! Recording stub drivers for hardware-free testing.
//!
//! Every HAL trait gets a simulated implementation here. The stubs are
//! cheaply cloneable (clones share state through an `Arc<Mutex<_>>`)
//! so a test can hand one clone to an actuator and keep another as a
//! probe:
//!
//! ```rust
//! use ares_hal::drive::DriveActuator;
//! use ares_hal::sim::SimMotor;
//! use ares_hal::MotorChannel;
//! use ares_types::DriveCommand;
//!
//! let left = SimMotor::new("left_wheel");
//! let right = SimMotor::new("right_wheel");
//! let mut drive = DriveActuator::new(Box::new(left.clone()), Box::new(right.clone()));
//!
//! drive.apply(DriveCommand::forward(100)).unwrap();
//! assert_eq!(left.output().magnitude, 100);
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use ares_types::{AresError, SensorSample, StatusSnapshot, WheelOutput};
use tracing::info;

use crate::arm::{Arm, ArmPose};
use crate::display::StatusDisplay;
use crate::motor::MotorChannel;
use crate::nozzle::{NozzleServo, PumpRelay};
use crate::sensor::{DistanceSource, SensorArray};

// ─────────────────────────────────────────────────────────────────────────────
// Motor
// ─────────────────────────────────────────────────────────────────────────────

struct MotorState {
    output: WheelOutput,
    commands: u64,
}

/// Simulated wheel channel that records the latest output and counts
/// every command it receives. Always succeeds.
#[derive(Clone)]
pub struct SimMotor {
    id: String,
    state: Arc<Mutex<MotorState>>,
}

impl SimMotor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            state: Arc::new(Mutex::new(MotorState {
                output: WheelOutput::stopped(),
                commands: 0,
            })),
        }
    }

    /// Number of `set_output` calls received so far.
    pub fn commands(&self) -> u64 {
        self.state.lock().expect("sim motor lock").commands
    }
}

impl MotorChannel for SimMotor {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_output(&mut self, output: WheelOutput) -> Result<(), AresError> {
        let mut state = self.state.lock().expect("sim motor lock");
        state.output = output;
        state.commands += 1;
        Ok(())
    }

    fn output(&self) -> WheelOutput {
        self.state.lock().expect("sim motor lock").output
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Nozzle servo & pump relay
// ─────────────────────────────────────────────────────────────────────────────

struct ServoState {
    angle_deg: u8,
    commands: u64,
}

/// Simulated nozzle servo. Always succeeds.
#[derive(Clone)]
pub struct SimServo {
    id: String,
    state: Arc<Mutex<ServoState>>,
}

impl SimServo {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            state: Arc::new(Mutex::new(ServoState {
                angle_deg: 90,
                commands: 0,
            })),
        }
    }

    /// Number of `set_angle` calls received so far.
    pub fn commands(&self) -> u64 {
        self.state.lock().expect("sim servo lock").commands
    }
}

impl NozzleServo for SimServo {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_angle(&mut self, angle_deg: u8) -> Result<(), AresError> {
        let mut state = self.state.lock().expect("sim servo lock");
        state.angle_deg = angle_deg;
        state.commands += 1;
        Ok(())
    }

    fn angle(&self) -> u8 {
        self.state.lock().expect("sim servo lock").angle_deg
    }
}

struct RelayState {
    active: bool,
    commands: u64,
}

/// Simulated pump relay. Always succeeds.
#[derive(Clone)]
pub struct SimRelay {
    id: String,
    state: Arc<Mutex<RelayState>>,
}

impl SimRelay {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            state: Arc::new(Mutex::new(RelayState {
                active: false,
                commands: 0,
            })),
        }
    }

    /// Number of `set_state` calls received so far.
    pub fn commands(&self) -> u64 {
        self.state.lock().expect("sim relay lock").commands
    }
}

impl PumpRelay for SimRelay {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_state(&mut self, active: bool) -> Result<(), AresError> {
        let mut state = self.state.lock().expect("sim relay lock");
        state.active = active;
        state.commands += 1;
        Ok(())
    }

    fn state(&self) -> bool {
        self.state.lock().expect("sim relay lock").active
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Scripted sensors
// ─────────────────────────────────────────────────────────────────────────────

/// Distance source that replays a scripted sequence of readings, then
/// holds the final value. Useful for deterministic avoidance tests.
#[derive(Clone)]
pub struct ScriptedDistance {
    state: Arc<Mutex<ScriptState>>,
}

struct ScriptState {
    script: VecDeque<f32>,
    last: f32,
}

impl ScriptedDistance {
    /// `readings` are returned in order; after the script runs out the
    /// last value repeats forever. An empty script reads as `fallback`.
    pub fn new(readings: impl IntoIterator<Item = f32>, fallback: f32) -> Self {
        Self {
            state: Arc::new(Mutex::new(ScriptState {
                script: readings.into_iter().collect(),
                last: fallback,
            })),
        }
    }

    /// Append more readings to the script (shared across clones).
    pub fn push(&self, reading: f32) {
        self.state.lock().expect("sim distance lock").script.push_back(reading);
    }
}

impl DistanceSource for ScriptedDistance {
    fn read(&mut self) -> f32 {
        let mut state = self.state.lock().expect("sim distance lock");
        if let Some(next) = state.script.pop_front() {
            state.last = next;
        }
        state.last
    }
}

/// Sensor array that replays a scripted temperature sequence with
/// fixed nominal values for the other channels.
#[derive(Clone)]
pub struct ScriptedSensors {
    state: Arc<Mutex<ScriptState>>,
}

impl ScriptedSensors {
    /// `temperatures` are returned in order; the last one repeats once
    /// the script is exhausted. An empty script reads as `fallback_c`.
    pub fn new(temperatures: impl IntoIterator<Item = f32>, fallback_c: f32) -> Self {
        Self {
            state: Arc::new(Mutex::new(ScriptState {
                script: temperatures.into_iter().collect(),
                last: fallback_c,
            })),
        }
    }

    /// Append another temperature reading (shared across clones).
    pub fn push(&self, temperature_c: f32) {
        self.state
            .lock()
            .expect("sim sensors lock")
            .script
            .push_back(temperature_c);
    }
}

impl SensorArray for ScriptedSensors {
    fn read(&mut self) -> SensorSample {
        let mut state = self.state.lock().expect("sim sensors lock");
        if let Some(next) = state.script.pop_front() {
            state.last = next;
        }
        SensorSample {
            temperature_c: state.last,
            pressure_hpa: 1013.25,
            gas_level: 120,
            radiation_cpm: 18,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Arm & display
// ─────────────────────────────────────────────────────────────────────────────

/// Simulated inspection arm recording the last commanded pose.
#[derive(Clone)]
pub struct SimArm {
    id: String,
    pose: Arc<Mutex<Option<ArmPose>>>,
}

impl SimArm {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            pose: Arc::new(Mutex::new(None)),
        }
    }

    /// The last pose commanded, if any.
    pub fn last_pose(&self) -> Option<ArmPose> {
        *self.pose.lock().expect("sim arm lock")
    }
}

impl Arm for SimArm {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_pose(&mut self, pose: ArmPose) -> Result<(), AresError> {
        *self.pose.lock().expect("sim arm lock") = Some(pose);
        Ok(())
    }
}

/// Display that renders snapshots as structured log lines. Stands in
/// for the onboard OLED during bench runs.
#[derive(Default)]
pub struct LogDisplay;

impl StatusDisplay for LogDisplay {
    fn render(&mut self, snapshot: &StatusSnapshot) -> Result<(), AresError> {
        info!(
            mode = ?snapshot.mode,
            alarm = snapshot.alarm,
            suppression = ?snapshot.suppression,
            temperature_c = snapshot.last_sample.map(|s| s.temperature_c),
            saturation_clips = snapshot.saturation_clips,
            "rover status"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_distance_replays_then_holds() {
        let mut src = ScriptedDistance::new([50.0, 25.0], 0.0);
        assert_eq!(src.read(), 50.0);
        assert_eq!(src.read(), 25.0);
        assert_eq!(src.read(), 25.0); // holds last
    }

    #[test]
    fn scripted_distance_empty_reads_fallback() {
        let mut src = ScriptedDistance::new([], 120.0);
        assert_eq!(src.read(), 120.0);
    }

    #[test]
    fn scripted_sensors_replays_temperatures() {
        let mut array = ScriptedSensors::new([20.0, 85.0], 20.0);
        assert_eq!(array.read().temperature_c, 20.0);
        assert_eq!(array.read().temperature_c, 85.0);
        assert_eq!(array.read().temperature_c, 85.0);
    }

    #[test]
    fn sim_arm_records_last_pose() {
        let mut arm = SimArm::new("inspection_arm");
        assert!(arm.last_pose().is_none());
        arm.home().unwrap();
        assert_eq!(arm.last_pose(), Some(ArmPose::HOME));
    }

    #[test]
    fn clones_share_state() {
        let motor = SimMotor::new("left_wheel");
        let mut handle = motor.clone();
        handle
            .set_output(WheelOutput::from_signed(42))
            .unwrap();
        assert_eq!(motor.output().magnitude, 42);
        assert_eq!(motor.commands(), 1);
    }
}

//! `ares-hal` – hardware seams for the ARES rover.
//!
//! Every physical device sits behind a small trait so drivers can be
//! swapped (real serial/PWM drivers on the rover, recording stubs in
//! tests and the simulator) without touching supervisor logic.
//!
//! # Modules
//!
//! - [`motor`] – [`MotorChannel`][motor::MotorChannel]: one wheel's
//!   direction + magnitude endpoint.
//! - [`drive`] – [`DriveActuator`][drive::DriveActuator]: differential
//!   mixing and per-channel bounds enforcement. Owns no decision state.
//! - [`nozzle`] – [`NozzleServo`][nozzle::NozzleServo] and
//!   [`PumpRelay`][nozzle::PumpRelay]: the suppression hardware
//!   endpoints.
//! - [`suppression`] – [`SuppressionActuator`][suppression::SuppressionActuator]:
//!   nozzle aim + pump relay with the `Idle → Aiming → Spraying` state
//!   machine.
//! - [`sensor`] – [`DistanceSource`][sensor::DistanceSource] and
//!   [`SensorArray`][sensor::SensorArray]: black-box calibrated
//!   sampling contracts.
//! - [`arm`] – [`Arm`][arm::Arm]: open-loop manipulator pose commands,
//!   no feedback.
//! - [`display`] – [`StatusDisplay`][display::StatusDisplay]: pure
//!   snapshot render.
//! - [`sim`] – recording stub drivers for hardware-free testing.

pub mod arm;
pub mod display;
pub mod drive;
pub mod motor;
pub mod nozzle;
pub mod sensor;
pub mod sim;
pub mod suppression;

pub use arm::{Arm, ArmPose};
pub use display::StatusDisplay;
pub use drive::{DriveActuator, MAX_WHEEL_MAGNITUDE};
pub use motor::MotorChannel;
pub use nozzle::{NozzleServo, PumpRelay};
pub use sensor::{DistanceSource, SensorArray};
pub use suppression::SuppressionActuator;

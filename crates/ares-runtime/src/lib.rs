//! `ares-runtime` – navigation and the top-level control loop.
//!
//! # Modules
//!
//! - [`policy`] – the [`Policy`][policy::Policy] seam and the stock
//!   reactive [`AvoidancePolicy`][policy::AvoidancePolicy].
//! - [`navigation`] – [`NavigationSupervisor`][navigation::NavigationSupervisor]:
//!   owns the Manual/Autonomous mode flag, samples distance each tick
//!   and forwards policy decisions to the drive actuator.
//! - [`control`] – [`ControlLoop`][control::ControlLoop]: ticks the
//!   safety supervisor strictly before navigation and exposes the
//!   operator surface (`set_mode`, `manual_drive`, `manual_trigger`,
//!   `reset`, snapshots).
//! - [`bus`] – [`EventBus`][bus::EventBus]: two-topic broadcast bus
//!   for telemetry and alerts.
//! - [`config`] – [`ControlConfig`][config::ControlConfig]: named
//!   control constants with documented units, validated at startup.
//! - [`telemetry`] – `tracing` subscriber initialisation.

pub mod bus;
pub mod config;
pub mod control;
pub mod navigation;
pub mod policy;
pub mod telemetry;

pub use bus::{EventBus, Topic};
pub use config::ControlConfig;
pub use control::ControlLoop;
pub use navigation::NavigationSupervisor;
pub use policy::{AvoidancePolicy, Policy};

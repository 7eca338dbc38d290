//! `ares-kernel` – Safety & Supervision
//!
//! The rover's brainstem. It does not navigate; it watches the thermal
//! channel and regulates the suppression hardware regardless of what
//! the navigation layer is doing.
//!
//! # Modules
//!
//! - [`safety`] – [`SafetySupervisor`][safety::SafetySupervisor]:
//!   continuous threshold monitoring with an alarm latch and the
//!   non-blocking aim → settle → activate suppression sequence. Runs
//!   on every tick, never gated by navigation mode.
//! - [`watchdog`] – [`Watchdog`][watchdog::Watchdog]: tracks
//!   per-supervisor heartbeats so the outer loop can report tick
//!   overruns. Observational only; it never gates safety output.

pub mod safety;
pub mod watchdog;

pub use safety::{SafetyConfig, SafetySupervisor};
pub use watchdog::Watchdog;

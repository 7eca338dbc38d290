//! Sampling contracts for the rover's sensing front-ends.
//!
//! Acquisition drivers are a black box to the control core: whatever
//! ranging or environmental hardware is fitted, it surfaces here as a
//! synchronous, bounded, calibrated read. Samples are produced fresh
//! on every call; nothing in this crate caches, so staleness is the
//! caller's problem to avoid by re-sampling each tick.

use ares_types::SensorSample;

/// Distance-to-nearest-obstacle sampling.
pub trait DistanceSource: Send {
    /// One ranging sample, in the same distance units as the obstacle
    /// threshold (centimetres on the reference platform).
    ///
    /// A non-positive value denotes an invalid reading or no echo.
    /// Policy for that case belongs to the consumer, not the driver.
    fn read(&mut self) -> f32;
}

/// Environmental sensor cluster (thermal, gas, radiation, pressure).
pub trait SensorArray: Send {
    /// One fresh calibrated sample.
    fn read(&mut self) -> SensorSample;
}

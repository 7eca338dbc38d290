//! Suppression hardware endpoints: the aimable nozzle servo and the
//! pump power relay.
//!
//! Neither device carries feedback sensing; command issuance is
//! treated as the outcome. A mechanical pump failure is therefore
//! undetectable from software; that limitation is owned by the safety
//! supervisor's documentation, not silently worked around here.

use ares_types::AresError;

/// Position servo that points the suppression nozzle.
pub trait NozzleServo: Send + Sync {
    /// Stable identifier, e.g. `"nozzle_servo"`.
    fn id(&self) -> &str;

    /// Rotate the nozzle to `angle_deg` (0–180, 90 is straight ahead).
    ///
    /// # Errors
    ///
    /// Returns [`AresError::HardwareFault`] if the command cannot be
    /// applied.
    fn set_angle(&mut self, angle_deg: u8) -> Result<(), AresError>;

    /// The most recently commanded angle in degrees.
    fn angle(&self) -> u8;
}

/// Discrete on/off relay that powers the suppression pump.
pub trait PumpRelay: Send + Sync {
    /// Stable identifier, e.g. `"pump_relay"`.
    fn id(&self) -> &str;

    /// Drive the relay (`true` = energised / pumping).
    ///
    /// # Errors
    ///
    /// Returns [`AresError::HardwareFault`] if the command cannot be
    /// applied.
    fn set_state(&mut self, active: bool) -> Result<(), AresError>;

    /// Current relay state (`true` = energised).
    fn state(&self) -> bool;
}

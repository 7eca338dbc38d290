//! [`SuppressionActuator`] – nozzle aim and pump relay outputs.
//!
//! Owns the [`SuppressionState`] machine. Transitions are
//! one-directional triggers driven by the safety supervisor:
//!
//! ```text
//! Idle ──aim──▶ Aiming ──activate──▶ Spraying ──deactivate──▶ Idle
//! ```
//!
//! The actuator never advances on its own. In particular
//! `Spraying → Idle` happens only on an explicit [`deactivate`]
//! command, never automatically.
//!
//! [`deactivate`]: SuppressionActuator::deactivate

use ares_types::{AresError, SuppressionState};
use tracing::{info, warn};

use crate::nozzle::{NozzleServo, PumpRelay};

/// Suppression output stage: one nozzle servo plus one pump relay.
pub struct SuppressionActuator {
    servo: Box<dyn NozzleServo>,
    pump: Box<dyn PumpRelay>,
    state: SuppressionState,
}

impl SuppressionActuator {
    /// Build the actuator from its device drivers. Starts [`Idle`]
    /// with the pump de-energised.
    ///
    /// [`Idle`]: SuppressionState::Idle
    pub fn new(servo: Box<dyn NozzleServo>, pump: Box<dyn PumpRelay>) -> Self {
        Self {
            servo,
            pump,
            state: SuppressionState::Idle,
        }
    }

    /// Current phase of the suppression sequence.
    pub fn state(&self) -> SuppressionState {
        self.state
    }

    /// Point the nozzle at `angle_deg` and arm the sequence
    /// (`Idle → Aiming`).
    ///
    /// # Errors
    ///
    /// Returns [`AresError::HardwareFault`] when the servo driver
    /// fails; the state is not advanced in that case.
    pub fn aim(&mut self, angle_deg: u8) -> Result<(), AresError> {
        if self.state != SuppressionState::Idle {
            warn!(state = ?self.state, "aim commanded outside Idle; re-pointing nozzle only");
            return self.servo.set_angle(angle_deg);
        }
        self.servo.set_angle(angle_deg)?;
        self.state = SuppressionState::Aiming;
        info!(angle_deg, "suppression nozzle aimed");
        Ok(())
    }

    /// Energise the pump (`Aiming → Spraying`).
    ///
    /// # Errors
    ///
    /// Returns [`AresError::HardwareFault`] when the relay driver
    /// fails; the state is not advanced in that case.
    pub fn activate(&mut self) -> Result<(), AresError> {
        self.pump.set_state(true)?;
        self.state = SuppressionState::Spraying;
        info!("suppression pump energised");
        Ok(())
    }

    /// De-energise the pump and return to `Idle`. The only path out of
    /// `Spraying`.
    ///
    /// # Errors
    ///
    /// Returns [`AresError::HardwareFault`] when the relay driver
    /// fails. The state still returns to `Idle`: a dead relay must not
    /// leave the supervisor believing a spray is in progress.
    pub fn deactivate(&mut self) -> Result<(), AresError> {
        let result = self.pump.set_state(false);
        self.state = SuppressionState::Idle;
        info!("suppression pump de-energised");
        result
    }
}

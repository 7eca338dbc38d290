//! [`SafetySupervisor`] – thermal runaway monitoring and suppression
//! sequencing.
//!
//! On every tick the supervisor reads one environmental sample and
//! compares the temperature against the critical threshold (strict
//! `>`). The first crossing latches the alarm and starts the
//! suppression sequence:
//!
//! 1. aim the nozzle (on the triggering tick),
//! 2. wait out the settle delay **without blocking**: the armed time
//!    is recorded and activation happens on the first tick at or after
//!    `armed_at + settle`,
//! 3. energise the pump.
//!
//! While the alarm is latched further ticks are no-ops: no
//! re-triggering, no repeated pump pulses, no silent clear on cooling.
//! Only an explicit [`reset`] releases the latch; a reset arriving
//! while the sequence is between aim and activation is queued and
//! applied only after activation completes, so the armed sequence is
//! never torn.
//!
//! Suppression actuation has no feedback sensor. Command issuance is
//! treated as the outcome; a mechanical pump failure is undetectable
//! from here and is a documented limitation of the platform.
//!
//! [`reset`]: SafetySupervisor::reset

use std::time::{Duration, Instant};

use ares_hal::sensor::SensorArray;
use ares_hal::suppression::SuppressionActuator;
use ares_types::{EventPayload, SensorSample, SuppressionState};
use tracing::{error, info, warn};

/// Plausible physical range for a calibrated thermal reading, °C.
/// Anything outside is a sensor fault and must fail closed (treated as
/// below threshold) rather than trigger spuriously.
const PLAUSIBLE_TEMP_RANGE_C: std::ops::RangeInclusive<f32> = -40.0..=300.0;

/// Thermal safety parameters, validated upstream at startup.
#[derive(Debug, Clone, Copy)]
pub struct SafetyConfig {
    /// Alarm threshold, °C. Crossing is strict: exactly this value
    /// does not trigger.
    pub critical_temp_c: f32,
    /// Default nozzle aim for automatic triggers, degrees.
    pub nozzle_angle_deg: u8,
    /// Pause between aiming and energising the pump.
    pub settle: Duration,
}

/// Owns the alarm latch and the suppression actuator. Ticks
/// independently of navigation mode by construction: nothing in this
/// type knows the drive mode exists.
pub struct SafetySupervisor {
    sensors: Box<dyn SensorArray>,
    suppression: SuppressionActuator,
    config: SafetyConfig,
    alarm: bool,
    /// Set while the sequence is between aim and activation.
    armed_at: Option<Instant>,
    /// A reset arrived mid-sequence; apply it after activation.
    pending_reset: bool,
    last_sample: Option<SensorSample>,
}

impl SafetySupervisor {
    pub fn new(
        sensors: Box<dyn SensorArray>,
        suppression: SuppressionActuator,
        config: SafetyConfig,
    ) -> Self {
        Self {
            sensors,
            suppression,
            config,
            alarm: false,
            armed_at: None,
            pending_reset: false,
            last_sample: None,
        }
    }

    /// Whether the thermal alarm is latched.
    pub fn alarm(&self) -> bool {
        self.alarm
    }

    /// Current suppression phase.
    pub fn suppression_state(&self) -> SuppressionState {
        self.suppression.state()
    }

    /// The sample taken on the most recent tick.
    pub fn last_sample(&self) -> Option<SensorSample> {
        self.last_sample
    }

    /// One supervision step. Always executes in full regardless of
    /// navigation mode. Returns the telemetry events this step
    /// produced (usually none).
    pub fn tick(&mut self, now: Instant) -> Vec<EventPayload> {
        let mut events = Vec::new();

        let sample = self.sensors.read();
        self.last_sample = Some(sample);

        // An armed sequence takes precedence: finish it before looking
        // at the threshold again. The alarm is already latched here.
        if let Some(armed_at) = self.armed_at {
            if now.saturating_duration_since(armed_at) >= self.config.settle {
                self.armed_at = None;
                match self.suppression.activate() {
                    Ok(()) => events.push(EventPayload::SuppressionActivated),
                    Err(e) => error!(error = %e, "pump activation failed; holding latch"),
                }
                if self.pending_reset {
                    self.pending_reset = false;
                    info!("applying reset queued during suppression sequence");
                    self.apply_reset(&mut events);
                }
            }
            return events;
        }

        if self.alarm {
            // Latched and sequence complete: nothing to do until an
            // explicit reset, whatever the temperature does.
            return events;
        }

        let Some(temperature_c) = Self::valid_temperature(&sample) else {
            warn!(
                temperature_c = sample.temperature_c,
                "implausible thermal reading; failing closed (treated as below threshold)"
            );
            return events;
        };

        if temperature_c > self.config.critical_temp_c {
            warn!(
                temperature_c,
                threshold_c = self.config.critical_temp_c,
                "thermal runaway detected"
            );
            self.trigger(self.config.nozzle_angle_deg, Some(temperature_c), now, &mut events);
        }

        events
    }

    /// Operator-forced activation, independent of temperature, for use
    /// when fire is visually confirmed. Follows the same
    /// aim → settle → activate sequence and sets the latch.
    ///
    /// A no-op while the alarm is already latched: the latch exists to
    /// prevent repeated pump pulses, so a forced re-trigger must go
    /// through [`reset`](Self::reset) first.
    pub fn manual_trigger(&mut self, angle_deg: u8, now: Instant) -> Vec<EventPayload> {
        let mut events = Vec::new();
        if self.alarm {
            warn!("manual trigger ignored; alarm already latched");
            return events;
        }
        info!(angle_deg, "manual suppression trigger");
        self.trigger(angle_deg, None, now, &mut events);
        events
    }

    /// The only way to clear the alarm latch and return suppression to
    /// `Idle`. Never automatic, so suppression cannot restart mid-fire
    /// on a transient temperature dip.
    ///
    /// When the sequence is between aim and activation the reset is
    /// queued and applied right after the pump fires, preserving the
    /// armed sequence.
    pub fn reset(&mut self) -> Vec<EventPayload> {
        let mut events = Vec::new();
        if self.armed_at.is_some() {
            info!("reset queued: suppression sequence is armed");
            self.pending_reset = true;
            return events;
        }
        self.apply_reset(&mut events);
        events
    }

    fn trigger(
        &mut self,
        angle_deg: u8,
        temperature_c: Option<f32>,
        now: Instant,
        events: &mut Vec<EventPayload>,
    ) {
        self.alarm = true;
        events.push(EventPayload::AlarmLatched { temperature_c });
        if let Err(e) = self.suppression.aim(angle_deg) {
            // The servo may have failed but the pump can still douse
            // whatever is ahead: keep the sequence armed.
            error!(error = %e, "nozzle aim failed; sequence stays armed");
        }
        self.armed_at = Some(now);
    }

    fn apply_reset(&mut self, events: &mut Vec<EventPayload>) {
        self.alarm = false;
        if let Err(e) = self.suppression.deactivate() {
            error!(error = %e, "pump deactivation failed");
        }
        events.push(EventPayload::SuppressionReset);
        info!("alarm latch cleared; suppression idle");
    }

    fn valid_temperature(sample: &SensorSample) -> Option<f32> {
        let t = sample.temperature_c;
        if t.is_finite() && PLAUSIBLE_TEMP_RANGE_C.contains(&t) {
            Some(t)
        } else {
            None
        }
    }
}

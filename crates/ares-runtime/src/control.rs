//! [`ControlLoop`] – top-level tick driver and operator surface.
//!
//! Each tick runs the safety supervisor strictly before the
//! navigation supervisor, so a thermal trigger can never be skipped
//! because navigation occupied the cycle. Safety output is never
//! gated by navigation mode; the two supervisors share nothing but
//! the tick.
//!
//! Writer discipline (single logical thread of control): while
//! Autonomous the navigation supervisor is the sole writer of drive
//! commands; while Manual this loop is, through
//! [`manual_drive`](ControlLoop::manual_drive). The safety supervisor
//! is the sole writer of suppression outputs. No locking is needed as
//! long as ticks stay sequential; a preemptive port must add mutual
//! exclusion around each actuator.

use std::time::{Duration, Instant};

use ares_kernel::safety::SafetySupervisor;
use ares_kernel::watchdog::Watchdog;
use ares_types::{DriveCommand, Event, EventPayload, NavigationMode, StatusSnapshot};
use chrono::Utc;

use crate::bus::{EventBus, Topic};
use crate::navigation::NavigationSupervisor;

/// Event source tag for everything this loop publishes.
const SOURCE: &str = "ares-runtime::control";

/// Heartbeat deadline, in tick periods. Three gives the cadence room
/// for scheduler jitter without masking a genuinely wedged sensor.
const WATCHDOG_PERIODS: u32 = 3;

/// Owns both supervisors, the event bus handle and the watchdog.
pub struct ControlLoop {
    navigation: NavigationSupervisor,
    safety: SafetySupervisor,
    bus: EventBus,
    watchdog: Watchdog,
}

impl ControlLoop {
    pub fn new(
        navigation: NavigationSupervisor,
        safety: SafetySupervisor,
        bus: EventBus,
        tick_period: Duration,
    ) -> Self {
        let mut watchdog = Watchdog::new();
        watchdog.register("safety", tick_period * WATCHDOG_PERIODS);
        watchdog.register("navigation", tick_period * WATCHDOG_PERIODS);
        Self {
            navigation,
            safety,
            bus,
            watchdog,
        }
    }

    /// One full control cycle: safety first, then navigation.
    pub fn tick(&mut self, now: Instant) {
        for payload in self.safety.tick(now) {
            self.publish_alert(payload);
        }
        self.watchdog.beat("safety");

        self.navigation.tick();
        self.watchdog.beat("navigation");
    }

    /// Toggle drive authority and report it.
    pub fn set_mode(&mut self, mode: NavigationMode) {
        if self.navigation.mode() == mode {
            return;
        }
        self.navigation.set_mode(mode);
        self.publish_alert(EventPayload::ModeChanged { mode });
    }

    /// Operator drive command: honored only while Manual. When dropped
    /// it is surfaced on the alerts topic, never treated as an error.
    /// Returns whether the command was applied.
    pub fn manual_drive(&mut self, command: DriveCommand) -> bool {
        let applied = self.navigation.manual_drive(command);
        if !applied {
            self.publish_alert(EventPayload::ManualDriveIgnored {
                speed: command.speed,
                turn: command.turn,
            });
        }
        applied
    }

    /// Operator-forced suppression trigger (visually confirmed fire).
    pub fn manual_trigger(&mut self, angle_deg: u8, now: Instant) {
        for payload in self.safety.manual_trigger(angle_deg, now) {
            self.publish_alert(payload);
        }
    }

    /// Clear the alarm latch and return suppression to idle.
    pub fn reset(&mut self) {
        for payload in self.safety.reset() {
            self.publish_alert(payload);
        }
    }

    /// Current drive authority.
    pub fn mode(&self) -> NavigationMode {
        self.navigation.mode()
    }

    /// Point-in-time view of the control core.
    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            timestamp: Utc::now(),
            mode: self.navigation.mode(),
            alarm: self.safety.alarm(),
            suppression: self.safety.suppression_state(),
            last_sample: self.safety.last_sample(),
            saturation_clips: self.navigation.drive().saturation_clips(),
        }
    }

    /// Publish the current snapshot on the telemetry topic.
    pub fn publish_status(&self) {
        self.bus
            .publish(Topic::Telemetry, Event::now(SOURCE, EventPayload::Status(self.snapshot())));
    }

    /// Supervisors past their heartbeat deadline (tick overrun).
    pub fn overdue(&self) -> Vec<String> {
        self.watchdog.overdue()
    }

    /// Handle to the shared event bus.
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    fn publish_alert(&self, payload: EventPayload) {
        self.bus.publish(Topic::Alerts, Event::now(SOURCE, payload));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ControlConfig;
    use crate::policy::AvoidancePolicy;
    use ares_hal::drive::DriveActuator;
    use ares_hal::sim::{ScriptedDistance, ScriptedSensors, SimMotor, SimRelay, SimServo};
    use ares_hal::suppression::SuppressionActuator;
    use ares_hal::{MotorChannel, NozzleServo, PumpRelay};
    use ares_kernel::safety::SafetyConfig;
    use ares_types::{SuppressionState, WheelDirection};
    use tokio::sync::broadcast::Receiver;

    const SETTLE: Duration = Duration::from_millis(100);
    const PERIOD: Duration = Duration::from_millis(100);

    struct Harness {
        control: ControlLoop,
        left: SimMotor,
        right: SimMotor,
        servo: SimServo,
        pump: SimRelay,
        alerts: Receiver<Event>,
    }

    fn harness(
        distances: impl IntoIterator<Item = f32>,
        temps: impl IntoIterator<Item = f32>,
    ) -> Harness {
        let left = SimMotor::new("left_wheel");
        let right = SimMotor::new("right_wheel");
        let servo = SimServo::new("nozzle_servo");
        let pump = SimRelay::new("pump_relay");

        let drive = DriveActuator::new(Box::new(left.clone()), Box::new(right.clone()));
        let suppression =
            SuppressionActuator::new(Box::new(servo.clone()), Box::new(pump.clone()));

        let navigation = NavigationSupervisor::new(
            Box::new(AvoidancePolicy {
                obstacle_threshold: 30.0,
                forward_rate: 150,
                turn_rate: 150,
            }),
            drive,
            Box::new(ScriptedDistance::new(distances, 100.0)),
        );
        let safety = SafetySupervisor::new(
            Box::new(ScriptedSensors::new(temps, 20.0)),
            suppression,
            SafetyConfig {
                critical_temp_c: 80.0,
                nozzle_angle_deg: 90,
                settle: SETTLE,
            },
        );

        let bus = EventBus::default();
        let alerts = bus.subscribe(Topic::Alerts);
        Harness {
            control: ControlLoop::new(navigation, safety, bus, PERIOD),
            left,
            right,
            servo,
            pump,
            alerts,
        }
    }

    fn drain(rx: &mut Receiver<Event>) -> Vec<EventPayload> {
        let mut payloads = Vec::new();
        while let Ok(event) = rx.try_recv() {
            payloads.push(event.payload);
        }
        payloads
    }

    #[test]
    fn safety_runs_even_while_manual() {
        let mut h = harness([50.0], [85.0]);
        assert_eq!(h.control.mode(), NavigationMode::Manual);

        let t0 = Instant::now();
        h.control.tick(t0);
        h.control.tick(t0 + SETTLE);

        // No drive output, but the alarm latched and the pump fired.
        assert_eq!(h.left.commands(), 0);
        assert!(h.control.snapshot().alarm);
        assert!(h.pump.state());
    }

    #[test]
    fn thermal_trigger_in_same_tick_as_navigation() {
        // Safety must run first: the triggering tick also carries a
        // navigation decision, and both must land.
        let mut h = harness([50.0], [85.0]);
        h.control.set_mode(NavigationMode::Autonomous);

        h.control.tick(Instant::now());
        assert_eq!(h.servo.commands(), 1);
        assert_eq!(h.left.output().direction, WheelDirection::Forward);
    }

    #[test]
    fn manual_drive_gating_is_surfaced() {
        let mut h = harness([50.0], [20.0]);

        assert!(h.control.manual_drive(DriveCommand::forward(120)));
        assert_eq!(h.left.output().magnitude, 120);

        h.control.set_mode(NavigationMode::Autonomous);
        assert!(!h.control.manual_drive(DriveCommand::forward(90)));

        let payloads = drain(&mut h.alerts);
        assert!(payloads.iter().any(|p| matches!(
            p,
            EventPayload::ModeChanged {
                mode: NavigationMode::Autonomous
            }
        )));
        assert!(payloads.iter().any(|p| matches!(
            p,
            EventPayload::ManualDriveIgnored { speed: 90, turn: 0 }
        )));
    }

    #[test]
    fn snapshot_reflects_core_state() {
        let mut h = harness([20.0], [20.0]);
        h.control.set_mode(NavigationMode::Autonomous);
        h.control.tick(Instant::now());

        let snap = h.control.snapshot();
        assert_eq!(snap.mode, NavigationMode::Autonomous);
        assert!(!snap.alarm);
        assert_eq!(snap.suppression, SuppressionState::Idle);
        assert_eq!(snap.last_sample.unwrap().temperature_c, 20.0);
    }

    #[test]
    fn publish_status_lands_on_telemetry_topic() {
        let h = harness([50.0], [20.0]);
        let mut rx = h.control.bus().subscribe(Topic::Telemetry);
        h.control.publish_status();
        let event = rx.try_recv().unwrap();
        assert!(matches!(event.payload, EventPayload::Status(_)));
    }

    #[test]
    fn end_to_end_patrol_with_thermal_runaway() {
        // Patrol run with a thermal runaway mid-route: distances
        // [50,25,25,50] and temperatures [20,85,85,20] must yield
        // drive [forward,turn,turn,forward] with one suppression
        // sequence, and the alarm stays latched after cooling.
        let mut h = harness([50.0, 25.0, 25.0, 50.0], [20.0, 85.0, 85.0, 20.0]);
        h.control.set_mode(NavigationMode::Autonomous);
        let t0 = Instant::now();

        h.control.tick(t0);
        assert_eq!(h.left.output().direction, WheelDirection::Forward);
        assert!(!h.control.snapshot().alarm);

        h.control.tick(t0 + PERIOD);
        assert_eq!(h.right.output().direction, WheelDirection::Reverse); // turning
        assert!(h.control.snapshot().alarm);
        assert_eq!(h.servo.commands(), 1);

        h.control.tick(t0 + PERIOD * 2);
        // Still turning (suppressed repeat), settle elapsed → spraying.
        assert_eq!(h.right.output().direction, WheelDirection::Reverse);
        assert_eq!(h.control.snapshot().suppression, SuppressionState::Spraying);
        assert!(h.pump.state());

        h.control.tick(t0 + PERIOD * 3);
        assert_eq!(h.left.output().direction, WheelDirection::Forward);
        assert_eq!(h.left.output().magnitude, 150);

        // Already latched: one aim, one pump pulse, no extras; the cool
        // final sample did not clear the latch.
        assert_eq!(h.servo.commands(), 1);
        assert_eq!(h.pump.commands(), 1);
        assert!(h.control.snapshot().alarm);

        let payloads = drain(&mut h.alerts);
        let latches = payloads
            .iter()
            .filter(|p| matches!(p, EventPayload::AlarmLatched { .. }))
            .count();
        let activations = payloads
            .iter()
            .filter(|p| matches!(p, EventPayload::SuppressionActivated))
            .count();
        assert_eq!(latches, 1);
        assert_eq!(activations, 1);
    }

    #[test]
    fn reset_after_latch_reports_and_rearms() {
        let mut h = harness([50.0], [85.0, 85.0, 20.0]);
        let t0 = Instant::now();
        h.control.tick(t0);
        h.control.tick(t0 + SETTLE);
        assert!(h.control.snapshot().alarm);

        h.control.reset();
        assert!(!h.control.snapshot().alarm);
        assert_eq!(h.control.snapshot().suppression, SuppressionState::Idle);
        let payloads = drain(&mut h.alerts);
        assert!(payloads.iter().any(|p| matches!(p, EventPayload::SuppressionReset)));
    }

    #[test]
    fn manual_trigger_flows_through_the_loop() {
        let mut h = harness([50.0], [20.0, 20.0]);
        let t0 = Instant::now();

        h.control.manual_trigger(60, t0);
        assert!(h.control.snapshot().alarm);
        assert_eq!(h.servo.angle(), 60);

        h.control.tick(t0 + SETTLE);
        assert_eq!(h.control.snapshot().suppression, SuppressionState::Spraying);
    }

    #[test]
    fn config_defaults_build_a_working_loop() {
        let cfg = ControlConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.tick_period(), Duration::from_millis(100));
        assert_eq!(cfg.safety().critical_temp_c, 80.0);
        assert_eq!(cfg.policy().obstacle_threshold, 30.0);
    }
}

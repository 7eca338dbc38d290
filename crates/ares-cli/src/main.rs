//! `ares-cli` – A.R.E.S. rover bench console.
//!
//! This binary is the ignition switch for the control core. It:
//!
//! 1. Loads `~/.ares/control.toml` (stock constants when absent) and
//!    validates it before anything moves.
//! 2. Wires the control loop against the simulated bench hardware and
//!    homes the inspection arm.
//! 3. Runs the tick loop at the configured cadence, echoing alerts and
//!    periodic status to the console.
//! 4. Intercepts **Ctrl-C**: forces Manual mode (which halts the
//!    drive) before exiting.

mod config;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use colored::Colorize;
use tokio::sync::broadcast::error::TryRecvError;
use tracing::warn;

use ares_hal::arm::Arm;
use ares_hal::display::StatusDisplay;
use ares_hal::drive::DriveActuator;
use ares_hal::sim::{
    LogDisplay, ScriptedDistance, ScriptedSensors, SimArm, SimMotor, SimRelay, SimServo,
};
use ares_hal::suppression::SuppressionActuator;
use ares_kernel::safety::SafetySupervisor;
use ares_runtime::bus::{EventBus, Topic};
use ares_runtime::{ControlLoop, NavigationSupervisor, telemetry};
use ares_types::{AresError, Event, EventPayload, NavigationMode};

/// Status snapshots are published every this many ticks.
const STATUS_EVERY_TICKS: u64 = 10;

#[tokio::main]
async fn main() {
    telemetry::init_tracing();
    print_banner();

    let cfg = match config::load() {
        Ok(Some(cfg)) => {
            println!(
                "  Config loaded from {}",
                config::config_path().display().to_string().bold()
            );
            cfg
        }
        Ok(None) => {
            println!("  No config file; using deployment defaults.");
            ares_runtime::ControlConfig::default()
        }
        Err(e) => {
            println!("{}: {}", "Config error".red(), e);
            std::process::exit(1);
        }
    };

    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_flag = shutdown.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        println!();
        println!("{}", "⚠  Ctrl-C received; halting the rover …".yellow().bold());
        shutdown_flag.store(true, Ordering::SeqCst);
    }) {
        warn!(error = %e, "failed to install Ctrl-C handler; Ctrl-C will abort hard");
    }

    if let Err(e) = run(&cfg, shutdown).await {
        println!("{}: {}", "Fatal".red().bold(), e);
        std::process::exit(1);
    }
}

/// Build the control core against the bench simulators and drive the
/// tick loop until shutdown. Real hardware drivers implement the same
/// HAL traits and slot in here unchanged.
async fn run(
    cfg: &ares_runtime::ControlConfig,
    shutdown: Arc<AtomicBool>,
) -> Result<(), AresError> {
    let drive = DriveActuator::new(
        Box::new(SimMotor::new("left_wheel")),
        Box::new(SimMotor::new("right_wheel")),
    );
    let suppression = SuppressionActuator::new(
        Box::new(SimServo::new("nozzle_servo")),
        Box::new(SimRelay::new("pump_relay")),
    );

    // The bench distance script reads permanently clear; real runs
    // replace this with the ultrasonic driver.
    let distance = ScriptedDistance::new([], 100.0);
    let sensors = ScriptedSensors::new([], 22.0);

    let mut arm = SimArm::new("inspection_arm");
    arm.home()?;

    let navigation =
        NavigationSupervisor::new(Box::new(cfg.policy()), drive, Box::new(distance));
    let safety = SafetySupervisor::new(Box::new(sensors), suppression, cfg.safety());

    let bus = EventBus::default();
    let mut alerts = bus.subscribe(Topic::Alerts);
    let mut control = ControlLoop::new(navigation, safety, bus, cfg.tick_period());
    let mut display = LogDisplay;

    // Patrol starts immediately on the bench; a deployed rover waits
    // for the operator to enable autonomy.
    control.set_mode(NavigationMode::Autonomous);
    println!(
        "  Control loop running at {} ms cadence. Press Ctrl-C to stop.\n",
        cfg.tick_period_ms
    );

    let mut interval = tokio::time::interval(cfg.tick_period());
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    let mut ticks: u64 = 0;

    while !shutdown.load(Ordering::SeqCst) {
        interval.tick().await;
        control.tick(Instant::now());
        ticks += 1;

        echo_alerts(&mut alerts);
        for name in control.overdue() {
            warn!(supervisor = %name, "heartbeat overdue; tick loop is falling behind");
        }
        if ticks % STATUS_EVERY_TICKS == 0 {
            control.publish_status();
            // A dead display is cosmetic; the loop keeps ticking.
            if let Err(e) = display.render(&control.snapshot()) {
                warn!(error = %e, "status display render failed");
            }
        }
    }

    // Fail-safe: leave the bench with the drive halted and report it.
    control.set_mode(NavigationMode::Manual);
    if let Err(e) = display.render(&control.snapshot()) {
        warn!(error = %e, "status display render failed");
    }
    println!("{}", "  ✓ Drive halted. Goodbye.".green());
    Ok(())
}

fn echo_alerts(alerts: &mut tokio::sync::broadcast::Receiver<Event>) {
    loop {
        match alerts.try_recv() {
            Ok(event) => println!("  {} {}", "alert".red().bold(), describe(&event.payload)),
            Err(TryRecvError::Lagged(missed)) => {
                warn!(missed, "alert subscriber lagged; events dropped")
            }
            Err(_) => break,
        }
    }
}

fn describe(payload: &EventPayload) -> String {
    match payload {
        EventPayload::AlarmLatched {
            temperature_c: Some(t),
        } => format!("thermal alarm latched at {t:.1} °C"),
        EventPayload::AlarmLatched { temperature_c: None } => {
            "suppression triggered by operator".to_string()
        }
        EventPayload::SuppressionActivated => "pump energised".to_string(),
        EventPayload::SuppressionReset => "alarm cleared; suppression idle".to_string(),
        EventPayload::ModeChanged { mode } => format!("navigation mode: {mode:?}"),
        EventPayload::ManualDriveIgnored { speed, turn } => {
            format!("manual drive (speed {speed}, turn {turn}) ignored while autonomous")
        }
        EventPayload::Status(_) => "status".to_string(),
    }
}

fn print_banner() {
    println!();
    println!("{}", r#"    _     ____  _____ ____  "#.bold().cyan());
    println!("{}", r#"   / \   |  _ \| ____/ ___| "#.bold().cyan());
    println!("{}", r#"  / _ \  | |_) |  _| \___ \ "#.bold().cyan());
    println!("{}", r#" / ___ \ |  _ <| |___ ___) |"#.bold().cyan());
    println!("{}", r#"/_/   \_\|_| \_\_____|____/ "#.bold().cyan());
    println!();
    println!(
        "  {} {}",
        "A.R.E.S.".bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
    println!("  Autonomous Rover for Exploration and Surveying");
    println!();
}

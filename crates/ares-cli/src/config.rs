//! Reads the control configuration from `~/.ares/control.toml`.
//!
//! Missing file means stock deployment constants. Individual fields
//! may then be overridden through `ARES_*` environment variables,
//! which is the usual way to tweak one threshold on a bench without
//! editing the file.

use std::fs;
use std::path::PathBuf;

use ares_runtime::ControlConfig;
use ares_types::AresError;

/// Return the path to `~/.ares/control.toml`.
pub fn config_path() -> PathBuf {
    config_path_for_home(
        &std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .unwrap_or_else(|_| ".".to_string()),
    )
}

/// Build the config path relative to the given home directory.
/// Extracted for testability without mutating environment variables.
pub(crate) fn config_path_for_home(home: &str) -> PathBuf {
    PathBuf::from(home).join(".ares").join("control.toml")
}

/// Load the config from disk. Returns `None` if the file does not
/// exist; the caller falls back to [`ControlConfig::default`].
pub fn load() -> Result<Option<ControlConfig>, AresError> {
    load_from(&config_path())
}

/// Load the config from a specific path. Env overrides apply on top,
/// and the result is validated before it is returned.
pub(crate) fn load_from(path: &PathBuf) -> Result<Option<ControlConfig>, AresError> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path).map_err(|e| {
        AresError::InvalidConfig(format!("failed to read {}: {e}", path.display()))
    })?;
    let mut cfg: ControlConfig = toml::from_str(&raw)
        .map_err(|e| AresError::InvalidConfig(format!("failed to parse config: {e}")))?;
    apply_env_overrides(&mut cfg);
    cfg.validate()?;
    Ok(Some(cfg))
}

/// Apply `ARES_*` environment variable overrides to `cfg`. Values
/// that fail to parse are ignored.
///
/// | Variable | Config field |
/// |---|---|
/// | `ARES_CRITICAL_TEMP_C` | `critical_temp_c` |
/// | `ARES_OBSTACLE_THRESHOLD_CM` | `obstacle_threshold_cm` |
/// | `ARES_TICK_PERIOD_MS` | `tick_period_ms` |
pub fn apply_env_overrides(cfg: &mut ControlConfig) {
    if let Ok(v) = std::env::var("ARES_CRITICAL_TEMP_C")
        && let Ok(t) = v.parse::<f32>()
    {
        cfg.critical_temp_c = t;
    }
    if let Ok(v) = std::env::var("ARES_OBSTACLE_THRESHOLD_CM")
        && let Ok(d) = v.parse::<f32>()
    {
        cfg.obstacle_threshold_cm = d;
    }
    if let Ok(v) = std::env::var("ARES_TICK_PERIOD_MS")
        && let Ok(ms) = v.parse::<u64>()
    {
        cfg.tick_period_ms = ms;
    }
}

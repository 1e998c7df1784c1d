//! Session configuration parameters
//!
//! All tunable parameters for the gesture timer.  Values can be overridden
//! from a JSON file at startup or hot-swapped with
//! [`AppCommand::UpdateConfig`](crate::app::commands::AppCommand::UpdateConfig).
//! Every path that installs a config runs [`SessionConfig::validate`] first.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// What happens when the break countdown runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AfterBreak {
    /// Reset the work timer and wait for an explicit shake.
    #[default]
    WaitForShake,
    /// Reset and immediately restart the work timer.
    AutoRestart,
}

/// Core session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    // --- Timers ---
    /// Work session length (seconds)
    pub work_duration_secs: u32,
    /// Break length (seconds)
    pub break_duration_secs: u32,
    /// Behaviour once the break expires
    pub after_break: AfterBreak,

    // --- Shake detection ---
    /// Smoothed magnitude delta (m/s²) above which a shake fires
    pub shake_threshold: f32,
    /// Exponential decay applied to the smoothed delta per sample (0..1)
    pub shake_decay: f32,

    // --- Orientation ---
    /// |pitch| below this (degrees) reads as landscape
    pub landscape_max_pitch_deg: f32,
    /// |pitch| above this (degrees) reads as portrait
    pub portrait_min_pitch_deg: f32,
    /// Minimum gap between accepted orientation changes (milliseconds)
    pub orientation_debounce_ms: u32,

    // --- Alerts ---
    /// Vibration length on work completion (milliseconds)
    pub completion_vibration_ms: u32,
    /// Vibration length when the break ends (milliseconds)
    pub break_end_vibration_ms: u32,
    /// Celebration dialog title
    pub celebration_title: String,
    /// Celebration dialog body
    pub celebration_message: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            // Timers
            work_duration_secs: 60,
            break_duration_secs: 10,
            after_break: AfterBreak::WaitForShake,

            // Shake
            shake_threshold: 12.0,
            shake_decay: 0.9,

            // Orientation
            landscape_max_pitch_deg: 30.0,
            portrait_min_pitch_deg: 60.0,
            orientation_debounce_ms: 1000,

            // Alerts
            completion_vibration_ms: 500,
            break_end_vibration_ms: 300,
            celebration_title: "Congratulations!".into(),
            celebration_message: "You completed a session.".into(),
        }
    }
}

impl SessionConfig {
    /// Parse a JSON document and validate it.  Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Range-check every field.  Out-of-range values are rejected, not clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.work_duration_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "work_duration_secs must be > 0",
            ));
        }
        if self.break_duration_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "break_duration_secs must be > 0",
            ));
        }
        if !self.shake_threshold.is_finite() || self.shake_threshold <= 0.0 {
            return Err(ConfigError::ValidationFailed(
                "shake_threshold must be finite and > 0",
            ));
        }
        if !(0.0..1.0).contains(&self.shake_decay) {
            return Err(ConfigError::ValidationFailed(
                "shake_decay must be in [0, 1)",
            ));
        }
        if !self.landscape_max_pitch_deg.is_finite()
            || !self.portrait_min_pitch_deg.is_finite()
            || self.landscape_max_pitch_deg < 0.0
            || self.portrait_min_pitch_deg > 90.0
        {
            return Err(ConfigError::ValidationFailed(
                "orientation thresholds must lie within 0..=90 degrees",
            ));
        }
        if self.landscape_max_pitch_deg >= self.portrait_min_pitch_deg {
            return Err(ConfigError::ValidationFailed(
                "landscape_max_pitch_deg must be below portrait_min_pitch_deg",
            ));
        }
        Ok(())
    }
}

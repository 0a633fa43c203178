//! Configuration management for expression event detection

use crate::{
    constants::{
        ALPHA_MAX, ALPHA_MIN, BASELINE_ALPHA, CALIBRATION_FRAMES, DEFAULT_BLINK_DELTA, DEFAULT_BROW_DELTA,
        DEFAULT_COOLDOWN, DEFAULT_MIN_OFF, DEFAULT_MIN_ON, DEFAULT_MOUTH_DELTA, SMOOTHING_ALPHA,
    },
    hysteresis::HysteresisParams,
    landmarks::Expression,
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Thresholds and debounce parameters
    pub detection: DetectionConfig,

    /// Baseline calibration and smoothing
    pub calibration: CalibrationConfig,
}

/// Detection thresholds and debounce parameters
///
/// May be changed between frames; the detector reads it at the start of each frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// EAR drop below baseline that counts as eyes closed
    pub blink_delta: f64,

    /// MAR rise above baseline that counts as mouth open
    pub mouth_delta: f64,

    /// BROW rise above baseline that counts as brows raised
    pub brow_delta: f64,

    /// Consecutive active frames before an expression latches on
    pub min_on: u32,

    /// Consecutive inactive frames before a latched expression releases
    pub min_off: u32,

    /// Frames after an event during which the same expression cannot latch
    pub cooldown: u32,
}

/// Partial update to a [`DetectionConfig`]; fields left out keep their current value
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetectionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blink_delta: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mouth_delta: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brow_delta: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_on: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_off: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooldown: Option<u32>,
}

/// Calibration and smoothing parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Frames spent establishing the baseline
    pub frames_target: u32,

    /// Smoothing factor for the per-frame metric filter
    pub smoothing_alpha: f64,

    /// Smoothing factor for the baseline during calibration
    pub baseline_alpha: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            blink_delta: DEFAULT_BLINK_DELTA,
            mouth_delta: DEFAULT_MOUTH_DELTA,
            brow_delta: DEFAULT_BROW_DELTA,
            min_on: DEFAULT_MIN_ON,
            min_off: DEFAULT_MIN_OFF,
            cooldown: DEFAULT_COOLDOWN,
        }
    }
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            frames_target: CALIBRATION_FRAMES,
            smoothing_alpha: SMOOTHING_ALPHA,
            baseline_alpha: BASELINE_ALPHA,
        }
    }
}

impl DetectionConfig {
    /// Debounce parameters for an expression; the brow counter is stricter
    #[must_use]
    pub fn params_for(&self, expression: Expression) -> HysteresisParams {
        let base = HysteresisParams::new(self.min_on, self.min_off, self.cooldown);
        match expression {
            Expression::Blink | Expression::Mouth => base,
            Expression::Brow => base.stricter(),
        }
    }

    /// Validate thresholds and frame counts
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        for (name, delta) in [
            ("blink_delta", self.blink_delta),
            ("mouth_delta", self.mouth_delta),
            ("brow_delta", self.brow_delta),
        ] {
            if !delta.is_finite() || delta < 0.0 {
                return Err(Error::ConfigError(format!(
                    "{name} must be a finite, non-negative number, got {delta}"
                )));
            }
        }
        if self.min_on == 0 {
            return Err(Error::ConfigError("min_on must be greater than 0".to_string()));
        }
        if self.min_off == 0 {
            return Err(Error::ConfigError("min_off must be greater than 0".to_string()));
        }
        Ok(())
    }
}

impl DetectionPatch {
    /// `current` with every field this patch sets replaced
    #[must_use]
    pub fn apply(&self, current: &DetectionConfig) -> DetectionConfig {
        DetectionConfig {
            blink_delta: self.blink_delta.unwrap_or(current.blink_delta),
            mouth_delta: self.mouth_delta.unwrap_or(current.mouth_delta),
            brow_delta: self.brow_delta.unwrap_or(current.brow_delta),
            min_on: self.min_on.unwrap_or(current.min_on),
            min_off: self.min_off.unwrap_or(current.min_off),
            cooldown: self.cooldown.unwrap_or(current.cooldown),
        }
    }
}

impl CalibrationConfig {
    /// Validate calibration settings
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.frames_target == 0 {
            return Err(Error::ConfigError(
                "Calibration frames_target must be greater than 0".to_string(),
            ));
        }
        for (name, alpha) in [
            ("smoothing_alpha", self.smoothing_alpha),
            ("baseline_alpha", self.baseline_alpha),
        ] {
            if !(alpha > ALPHA_MIN && alpha <= ALPHA_MAX) {
                return Err(Error::ConfigError(format!("{name} must be in (0.0, 1.0], got {alpha}")));
            }
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::IoError(e.to_string()))?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content).map_err(|e| Error::IoError(e.to_string()))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.detection.validate()?;
        self.calibration.validate()
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Facial Event Detection Configuration

# Thresholds are offsets from the calibrated baseline
detection:
  blink_delta: 0.06
  mouth_delta: 0.09
  brow_delta: 0.08
  # Debounce, in frames (the brow counter adds 1/1/2 on top)
  min_on: 3
  min_off: 2
  cooldown: 8

# Baseline calibration
calibration:
  frames_target: 60
  smoothing_alpha: 0.35
  baseline_alpha: 0.1
"#;

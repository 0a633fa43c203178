//! Per-user baseline calibration.
//!
//! During a warm-up window the calibrator tracks the smoothed metrics with a
//! slow exponential average, settling on the user's resting expression. Once
//! the window is complete the baseline is frozen until a recalibration.

use crate::{
    constants::{BASELINE_ALPHA, CALIBRATION_FRAMES},
    filters::ExponentialFilter,
    metrics::{MetricSample, Metrics},
};
use log::info;
use serde::{Deserialize, Serialize};

/// Calibration phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalibrationPhase {
    /// Baseline still being accumulated
    Calibrating,
    /// Baseline frozen
    Ready,
}

/// Snapshot of calibration progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalibrationStatus {
    pub phase: CalibrationPhase,
    pub frames_seen: u32,
    pub frames_target: u32,
}

impl CalibrationStatus {
    /// Frames seen, clamped to the target for progress display
    #[must_use]
    pub fn progress(&self) -> u32 {
        self.frames_seen.min(self.frames_target)
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.phase == CalibrationPhase::Ready
    }
}

/// Resting reference value per metric channel
pub type BaselineState = Metrics<Option<f64>>;

/// Two-state calibrator: `Calibrating` until `frames_target` frames, then `Ready`
#[derive(Debug, Clone)]
pub struct Calibrator {
    baseline: ExponentialFilter,
    phase: CalibrationPhase,
    frames_seen: u32,
    frames_target: u32,
}

impl Default for Calibrator {
    fn default() -> Self {
        Self::new(CALIBRATION_FRAMES, BASELINE_ALPHA)
    }
}

impl Calibrator {
    /// Create a calibrator in the `Calibrating` phase
    #[must_use]
    pub fn new(frames_target: u32, alpha: f64) -> Self {
        Self {
            baseline: ExponentialFilter::new(alpha),
            phase: CalibrationPhase::Calibrating,
            frames_seen: 0,
            frames_target,
        }
    }

    /// Fold one smoothed sample into the baseline
    ///
    /// Does nothing once the calibrator is `Ready`.
    pub fn update(&mut self, smoothed: &MetricSample) {
        if self.phase == CalibrationPhase::Ready {
            return;
        }

        self.baseline.apply(smoothed);
        self.frames_seen = self.frames_seen.saturating_add(1);

        if self.frames_seen >= self.frames_target {
            self.phase = CalibrationPhase::Ready;
            info!(
                "Calibration complete after {} frames: EAR={:.3} MAR={:.3} BROW={:.3}",
                self.frames_seen,
                self.baseline.state().ear.unwrap_or_default(),
                self.baseline.state().mar.unwrap_or_default(),
                self.baseline.state().brow.unwrap_or_default(),
            );
        }
    }

    /// Clear the baseline and start calibrating again
    pub fn reset(&mut self) {
        self.baseline.reset();
        self.frames_seen = 0;
        self.phase = CalibrationPhase::Calibrating;
    }

    #[must_use]
    pub fn baseline(&self) -> &BaselineState {
        self.baseline.state()
    }

    #[must_use]
    pub fn is_calibrating(&self) -> bool {
        self.phase == CalibrationPhase::Calibrating
    }

    #[must_use]
    pub fn status(&self) -> CalibrationStatus {
        CalibrationStatus {
            phase: self.phase,
            frames_seen: self.frames_seen,
            frames_target: self.frames_target,
        }
    }
}

//! Per-frame orchestration of the detection pipeline.
//!
//! [`ExpressionDetector`] owns all session state: the metric smoother, the
//! calibrator and one hysteresis counter per expression. Each call to
//! [`ExpressionDetector::process`] runs one frame through
//! metrics → smoothing → calibration → thresholds → counters.

use crate::{
    calibration::{BaselineState, CalibrationStatus, Calibrator},
    config::{Config, DetectionConfig},
    filters::{default_smoothing_filter, smoothing_filter, ExponentialFilter},
    hysteresis::{CounterState, HysteresisCounter},
    landmarks::{Expression, Expressions, LandmarkFrame},
    metrics::{MetricSample, Metrics},
    threshold, Result,
};
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

/// Result of processing one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameOutput {
    /// Whether the frame carried a face
    pub face_detected: bool,
    /// Unsmoothed ratios for this frame
    pub raw: Option<MetricSample>,
    /// Smoothed ratios; unset when no face was detected
    pub smoothed: Metrics<Option<f64>>,
    /// Calibrated baseline
    pub baseline: BaselineState,
    /// Calibration progress
    pub calibration: CalibrationStatus,
    /// Per-expression threshold result for this frame
    pub active: Expressions<bool>,
    /// Expressions whose event completed on this frame
    pub completed: Expressions<bool>,
    /// Completed events per expression since the last counter reset
    pub counts: Expressions<u64>,
}

/// Session state for turning landmark frames into expression events
#[derive(Debug, Clone)]
pub struct ExpressionDetector {
    config: DetectionConfig,
    smoother: ExponentialFilter,
    calibrator: Calibrator,
    counters: Expressions<HysteresisCounter>,
    frames_processed: u64,
}

impl Default for ExpressionDetector {
    fn default() -> Self {
        Self::with_parts(DetectionConfig::default(), default_smoothing_filter(), Calibrator::default())
    }
}

impl ExpressionDetector {
    /// Create a detector with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector from a loaded configuration
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ConfigError`] if the configuration is invalid.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let smoother = smoothing_filter(config.calibration.smoothing_alpha)?;
        let calibrator = Calibrator::new(config.calibration.frames_target, config.calibration.baseline_alpha);
        Ok(Self::with_parts(config.detection, smoother, calibrator))
    }

    fn with_parts(config: DetectionConfig, smoother: ExponentialFilter, calibrator: Calibrator) -> Self {
        Self {
            config,
            smoother,
            calibrator,
            counters: Expressions::default(),
            frames_processed: 0,
        }
    }

    /// Process one detection cycle
    ///
    /// `None` means no face was found. A missed frame is neutral: the output
    /// carries no metrics and no state changes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MalformedFrame`] if the frame lacks a required
    /// landmark and [`crate::Error::DegenerateFrame`] if its geometry yields a
    /// non-finite ratio. Either way the frame is rejected before any state is
    /// touched.
    pub fn process(&mut self, frame: Option<&LandmarkFrame>) -> Result<FrameOutput> {
        let Some(frame) = frame else {
            trace!("No face in frame, state unchanged");
            return Ok(self.output(None, Metrics::unset(), Expressions::default(), Expressions::default()));
        };

        frame.validate()?;
        let raw = MetricSample::from_frame(frame)?;
        let smoothed = self.smoother.apply(&raw);

        if self.calibrator.is_calibrating() {
            self.calibrator.update(&smoothed);
        }

        let mut active = Expressions::default();
        let mut completed = Expressions::default();
        if self.calibrator.baseline().is_complete() {
            active = threshold::evaluate(self.smoother.state(), self.calibrator.baseline(), &self.config);
            completed = self.update_counters(&active);
        }

        self.frames_processed += 1;
        trace!(
            "Frame {}: EAR={:.3} MAR={:.3} BROW={:.3} active={:?}",
            self.frames_processed,
            smoothed.ear,
            smoothed.mar,
            smoothed.brow,
            active
        );

        Ok(self.output(Some(raw), smoothed.map(|v| Some(*v)), active, completed))
    }

    fn update_counters(&mut self, active: &Expressions<bool>) -> Expressions<bool> {
        let mut completed = Expressions::default();
        for expression in Expression::ALL {
            let params = self.config.params_for(expression);
            let is_active = *active.get(expression);
            let (counter, done) = match expression {
                Expression::Blink => (&mut self.counters.blink, &mut completed.blink),
                Expression::Mouth => (&mut self.counters.mouth, &mut completed.mouth),
                Expression::Brow => (&mut self.counters.brow, &mut completed.brow),
            };
            *done = counter.update(is_active, &params);
            if *done {
                debug!("{} event completed (total {})", expression.name(), counter.count());
            }
        }
        completed
    }

    fn output(
        &self,
        raw: Option<MetricSample>,
        smoothed: Metrics<Option<f64>>,
        active: Expressions<bool>,
        completed: Expressions<bool>,
    ) -> FrameOutput {
        FrameOutput {
            face_detected: raw.is_some(),
            raw,
            smoothed,
            baseline: *self.calibrator.baseline(),
            calibration: self.calibrator.status(),
            active,
            completed,
            counts: self.counts(),
        }
    }

    /// Zero all three event counters
    pub fn reset_counters(&mut self) {
        self.counters.blink.reset();
        self.counters.mouth.reset();
        self.counters.brow.reset();
        info!("Event counters reset");
    }

    /// Discard the baseline and calibrate again from the next frame
    pub fn recalibrate(&mut self) {
        self.calibrator.reset();
        info!("Recalibrating baseline");
    }

    #[must_use]
    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Mutable access for live tuning between frames
    pub fn config_mut(&mut self) -> &mut DetectionConfig {
        &mut self.config
    }

    pub fn set_config(&mut self, config: DetectionConfig) {
        self.config = config;
    }

    #[must_use]
    pub fn smoothed(&self) -> &Metrics<Option<f64>> {
        self.smoother.state()
    }

    #[must_use]
    pub fn baseline(&self) -> &BaselineState {
        self.calibrator.baseline()
    }

    #[must_use]
    pub fn calibration(&self) -> CalibrationStatus {
        self.calibrator.status()
    }

    #[must_use]
    pub fn counters(&self) -> Expressions<CounterState> {
        self.counters.map(|c| *c.state())
    }

    #[must_use]
    pub fn counts(&self) -> Expressions<u64> {
        self.counters.map(HysteresisCounter::count)
    }

    /// Frames that carried a face since the detector was created
    #[must_use]
    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }
}

//! Display text for a processed frame.
//!
//! Unset values render as `0.000` here and only here; the pipeline itself
//! never substitutes a default for a missing metric.

use crate::{
    calibration::{CalibrationPhase, CalibrationStatus},
    detector::FrameOutput,
    landmarks::Expressions,
};

/// `"smoothed / baseline"` with three decimals
#[must_use]
pub fn metric_cell(value: Option<f64>, baseline: Option<f64>) -> String {
    format!("{:.3} / {:.3}", value.unwrap_or(0.0), baseline.unwrap_or(0.0))
}

/// Calibration banner, e.g. `Calibrating… 12/60` or `Ready`
#[must_use]
pub fn calibration_message(status: &CalibrationStatus) -> String {
    match status.phase {
        CalibrationPhase::Calibrating => format!("Calibrating… {}/{}", status.progress(), status.frames_target),
        CalibrationPhase::Ready => "Ready".to_string(),
    }
}

/// Event totals line
#[must_use]
pub fn counts_line(counts: &Expressions<u64>) -> String {
    format!("blinks: {}  mouth: {}  brows: {}", counts.blink, counts.mouth, counts.brow)
}

/// One status line summarizing a frame
#[must_use]
pub fn status_line(frame_index: u64, output: &FrameOutput) -> String {
    let face = if output.face_detected { "face" } else { "no face" };
    format!(
        "#{frame_index:<6} {face:<7} EAR {}  MAR {}  BROW {}  | {} | {}",
        metric_cell(output.smoothed.ear, output.baseline.ear),
        metric_cell(output.smoothed.mar, output.baseline.mar),
        metric_cell(output.smoothed.brow, output.baseline.brow),
        calibration_message(&output.calibration),
        counts_line(&output.counts),
    )
}

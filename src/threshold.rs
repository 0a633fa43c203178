//! Threshold comparison of smoothed metrics against the calibrated baseline.

use crate::{config::DetectionConfig, landmarks::Expressions, metrics::Metrics};

/// Decide which expressions are active on this frame
///
/// All three are inactive unless every smoothed and baseline channel is set;
/// a partial baseline is not trusted for any expression.
#[must_use]
pub fn evaluate(
    smoothed: &Metrics<Option<f64>>,
    baseline: &Metrics<Option<f64>>,
    config: &DetectionConfig,
) -> Expressions<bool> {
    let (Some(current), Some(base)) = (smoothed.complete(), baseline.complete()) else {
        return Expressions::default();
    };

    Expressions {
        // Closing the eyes lowers EAR.
        blink: current.ear < base.ear - config.blink_delta,
        mouth: current.mar > base.mar + config.mouth_delta,
        brow: current.brow > base.brow + config.brow_delta,
    }
}

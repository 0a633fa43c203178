use crate::metrics::{MetricSample, Metrics};

/// One step of an exponential moving average
///
/// The first sample passes through unchanged.
#[must_use]
pub fn ema(previous: Option<f64>, value: f64, alpha: f64) -> f64 {
    match previous {
        Some(last) => last * (1.0 - alpha) + value * alpha,
        None => value,
    }
}

/// Exponential smoothing filter over the three metric channels
#[derive(Debug, Clone)]
pub struct ExponentialFilter {
    alpha: f64,
    state: Metrics<Option<f64>>,
}

impl ExponentialFilter {
    pub fn new(alpha: f64) -> Self {
        assert!(alpha > 0.0 && alpha <= 1.0, "Alpha must be in (0, 1]");
        Self {
            alpha,
            state: Metrics::unset(),
        }
    }

    /// Feed one sample and return the filtered values
    pub fn apply(&mut self, sample: &MetricSample) -> MetricSample {
        let alpha = self.alpha;
        let filtered = self.state.zip(sample, |last, value| ema(*last, *value, alpha));
        self.state = filtered.map(|v| Some(*v));
        filtered
    }

    /// Current filtered values, unset before the first sample
    #[must_use]
    pub fn state(&self) -> &Metrics<Option<f64>> {
        &self.state
    }

    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn reset(&mut self) {
        self.state = Metrics::unset();
    }
}

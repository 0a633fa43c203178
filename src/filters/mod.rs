//! Signal filtering for the metric streams.
//!
//! The same exponential moving average serves two roles: a fast filter that
//! takes the jitter out of the raw ratios, and a slow one that settles on the
//! user's resting baseline during calibration.

/// Exponential filter for responsive smoothing
pub mod exponential;

pub use exponential::{ema, ExponentialFilter};

use crate::{constants::SMOOTHING_ALPHA, Error, Result};

/// Build the per-frame smoothing filter
///
/// # Errors
///
/// Returns [`Error::ConfigError`] if `alpha` is outside `(0, 1]`.
pub fn smoothing_filter(alpha: f64) -> Result<ExponentialFilter> {
    if !(alpha > 0.0 && alpha <= 1.0) {
        return Err(Error::ConfigError(format!("Smoothing alpha must be in (0, 1], got {alpha}")));
    }
    Ok(ExponentialFilter::new(alpha))
}

/// Per-frame smoothing filter with the default factor
#[must_use]
pub fn default_smoothing_filter() -> ExponentialFilter {
    ExponentialFilter::new(SMOOTHING_ALPHA)
}

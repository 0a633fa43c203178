//! Facial expression event detection from landmark streams.
//!
//! This library turns a stream of facial landmark frames (MediaPipe face mesh
//! layout) into debounced blink, mouth-open and eyebrow-raise events:
//!
//! 1. Geometric ratios (EAR, MAR, BROW) are computed per frame
//! 2. An exponential moving average smooths each ratio
//! 3. A warm-up window calibrates a per-user resting baseline
//! 4. Thresholds relative to the baseline mark each expression active or not
//! 5. Hysteresis counters with cooldown turn that into completed-event counts
//!
//! # Examples
//!
//! ```no_run
//! use facial_event_detection::{detector::ExpressionDetector, landmarks::{LandmarkFrame, Point}};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut detector = ExpressionDetector::new();
//!
//! # fn face_mesh_points() -> Vec<Point> {
//! #     (0..468).map(|i| Point::new(f64::from(i % 26) / 26.0, f64::from(i / 26) / 18.0)).collect()
//! # }
//! // Landmarks from an upstream face mesh detector, normalized to [0, 1]
//! let points: Vec<Point> = face_mesh_points();
//! let frame = LandmarkFrame::new(points)?;
//!
//! let output = detector.process(Some(&frame))?;
//! println!("blinks so far: {}", output.counts.blink);
//!
//! // A cycle with no face leaves all state untouched
//! detector.process(None)?;
//!
//! // Tune live between frames
//! detector.config_mut().blink_delta = 0.05;
//! # Ok(())
//! # }
//! ```

/// Constants used throughout the library
pub mod constants;

/// Error types and result handling
pub mod error;

/// Landmark points, frames and the face mesh index scheme
pub mod landmarks;

/// EAR, MAR and BROW ratios from a landmark frame
pub mod metrics;

/// Exponential smoothing of the metric streams
pub mod filters;

/// Baseline calibration state machine
pub mod calibration;

/// Baseline-relative thresholds
pub mod threshold;

/// Debounced event counters
pub mod hysteresis;

/// Per-frame pipeline orchestration
pub mod detector;

/// Configuration management
pub mod config;

/// Debug overlay geometry
pub mod overlay;

/// Display formatting of frame results
pub mod report;

/// Replay application for recorded landmark streams
pub mod app;

pub use error::{Error, Result};

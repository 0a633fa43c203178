//! Constants used throughout the library

/// Number of landmarks produced by the MediaPipe face mesh
pub const NUM_FACE_MESH_LANDMARKS: usize = 468;

/// Number of landmarks with iris refinement enabled
pub const NUM_REFINED_FACE_MESH_LANDMARKS: usize = 478;

/// Smoothing factor for the per-frame metric filter (favors responsiveness)
pub const SMOOTHING_ALPHA: f64 = 0.35;

/// Smoothing factor for the calibration baseline (favors stability)
pub const BASELINE_ALPHA: f64 = 0.1;

/// Frames needed to establish a baseline (~2s at 30 fps)
pub const CALIBRATION_FRAMES: u32 = 60;

/// Default detection thresholds
pub const DEFAULT_BLINK_DELTA: f64 = 0.06;
pub const DEFAULT_MOUTH_DELTA: f64 = 0.09;
pub const DEFAULT_BROW_DELTA: f64 = 0.08;

/// Default debounce parameters, in frames
pub const DEFAULT_MIN_ON: u32 = 3;
pub const DEFAULT_MIN_OFF: u32 = 2;
pub const DEFAULT_COOLDOWN: u32 = 8;

/// Extra strictness applied to the brow counter, which sees a noisier signal
pub const BROW_EXTRA_MIN_ON: u32 = 1;
pub const BROW_EXTRA_MIN_OFF: u32 = 1;
pub const BROW_EXTRA_COOLDOWN: u32 = 2;

/// Initial off streak of a fresh counter
pub const OFF_STREAK_SENTINEL: u32 = 99;

/// Smoothing factor bounds
pub const ALPHA_MIN: f64 = 0.0;
pub const ALPHA_MAX: f64 = 1.0;

/// Debug overlay styling
pub const OVERLAY_POINT_RADIUS: f64 = 2.0;
pub const OVERLAY_LINE_WIDTH: f64 = 2.0;

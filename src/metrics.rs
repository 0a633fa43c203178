//! Geometric ratios derived from a single landmark frame.
//!
//! Each ratio divides a vertical separation by a horizontal width so the value
//! does not depend on how far the face is from the camera:
//!
//! - EAR (eye aspect ratio) drops while the eyes close
//! - MAR (mouth aspect ratio) rises while the mouth opens
//! - BROW rises while the eyebrows lift away from the eyes

use crate::{
    landmarks::{ApertureIndices, LandmarkFrame, LEFT_BROW, LEFT_EYE, MOUTH, RIGHT_BROW, RIGHT_EYE},
    Error, Result,
};
use serde::{Deserialize, Serialize};

/// One value per metric channel
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Metrics<T> {
    /// Eye aspect ratio channel
    pub ear: T,
    /// Mouth aspect ratio channel
    pub mar: T,
    /// Eyebrow raise channel
    pub brow: T,
}

impl<T> Metrics<T> {
    pub fn new(ear: T, mar: T, brow: T) -> Self {
        Self { ear, mar, brow }
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Metrics<U> {
        Metrics {
            ear: f(&self.ear),
            mar: f(&self.mar),
            brow: f(&self.brow),
        }
    }

    pub fn zip<U, V>(&self, other: &Metrics<U>, mut f: impl FnMut(&T, &U) -> V) -> Metrics<V> {
        Metrics {
            ear: f(&self.ear, &other.ear),
            mar: f(&self.mar, &other.mar),
            brow: f(&self.brow, &other.brow),
        }
    }
}

impl Metrics<Option<f64>> {
    /// Every channel unset
    #[must_use]
    pub const fn unset() -> Self {
        Self {
            ear: None,
            mar: None,
            brow: None,
        }
    }

    /// All three channels hold a value
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.ear.is_some() && self.mar.is_some() && self.brow.is_some()
    }

    /// The values, only if every channel is set
    #[must_use]
    pub fn complete(&self) -> Option<MetricSample> {
        Some(MetricSample {
            ear: self.ear?,
            mar: self.mar?,
            brow: self.brow?,
        })
    }
}

/// Raw ratios for one frame
pub type MetricSample = Metrics<f64>;

impl MetricSample {
    /// Compute EAR, MAR and BROW for a frame
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedFrame`] if a required landmark is missing and
    /// [`Error::DegenerateFrame`] if a ratio is not finite, as happens when a
    /// horizontal landmark pair coincides.
    pub fn from_frame(frame: &LandmarkFrame) -> Result<Self> {
        let sample = Self {
            ear: eye_aspect_ratio(frame)?,
            mar: mouth_aspect_ratio(frame)?,
            brow: brow_raise_ratio(frame)?,
        };

        for (metric, value) in [("EAR", sample.ear), ("MAR", sample.mar), ("BROW", sample.brow)] {
            if !value.is_finite() {
                return Err(Error::DegenerateFrame { metric, value });
            }
        }
        Ok(sample)
    }
}

/// Mean vertical opening over horizontal width for one eye or the mouth
fn aperture_ratio(frame: &LandmarkFrame, indices: &ApertureIndices) -> Result<f64> {
    let span = |pair: [usize; 2]| -> Result<f64> { Ok(frame.point(pair[0])?.distance(&frame.point(pair[1])?)) };

    let width = span(indices.horizontal)?;
    let height = (span(indices.vertical_1)? + span(indices.vertical_2)?) / 2.0;
    Ok(height / width)
}

/// Eye aspect ratio averaged over both eyes
///
/// # Errors
///
/// Returns [`Error::MalformedFrame`] if a required landmark is missing.
pub fn eye_aspect_ratio(frame: &LandmarkFrame) -> Result<f64> {
    Ok((aperture_ratio(frame, &LEFT_EYE)? + aperture_ratio(frame, &RIGHT_EYE)?) / 2.0)
}

/// Mouth aspect ratio
///
/// # Errors
///
/// Returns [`Error::MalformedFrame`] if a required landmark is missing.
pub fn mouth_aspect_ratio(frame: &LandmarkFrame) -> Result<f64> {
    aperture_ratio(frame, &MOUTH)
}

/// Brow height above the eye center, in eye widths, averaged over both sides
///
/// Image `y` grows downward, so a brow above the eye gives a positive value.
///
/// # Errors
///
/// Returns [`Error::MalformedFrame`] if a required landmark is missing.
pub fn brow_raise_ratio(frame: &LandmarkFrame) -> Result<f64> {
    let side = |eye: &ApertureIndices, brow: [usize; 2]| -> Result<f64> {
        let outer = frame.point(eye.horizontal[0])?;
        let inner = frame.point(eye.horizontal[1])?;
        let eye_center = outer.midpoint(&inner);
        let brow_mid = frame.point(brow[0])?.midpoint(&frame.point(brow[1])?);
        Ok((eye_center.y - brow_mid.y) / outer.distance(&inner))
    };

    Ok((side(&LEFT_EYE, LEFT_BROW)? + side(&RIGHT_EYE, RIGHT_BROW)?) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{tests::synthetic_face, Point};

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn test_synthetic_ratios() {
        let frame = synthetic_face(0.3, 0.1, 0.05);
        let sample = MetricSample::from_frame(&frame).unwrap();
        assert!((sample.ear - 0.3).abs() < TOLERANCE);
        assert!((sample.mar - 0.1).abs() < TOLERANCE);
        assert!((sample.brow - 0.05).abs() < TOLERANCE);
    }

    #[test]
    fn test_closed_eye_lowers_ear() {
        let open = eye_aspect_ratio(&synthetic_face(0.3, 0.1, 0.05)).unwrap();
        let closed = eye_aspect_ratio(&synthetic_face(0.05, 0.1, 0.05)).unwrap();
        assert!(closed < open);
    }

    #[test]
    fn test_raised_brow_raises_ratio() {
        let rest = brow_raise_ratio(&synthetic_face(0.3, 0.1, 0.05)).unwrap();
        let raised = brow_raise_ratio(&synthetic_face(0.3, 0.1, 0.2)).unwrap();
        assert!(raised > rest);
        assert!(rest > 0.0);
    }

    #[test]
    fn test_asymmetric_eyes_are_averaged() {
        let mut points = synthetic_face(0.3, 0.1, 0.05).points().to_vec();
        // Close the right eye fully.
        for i in [RIGHT_EYE.vertical_1, RIGHT_EYE.vertical_2].iter().flatten() {
            points[*i] = Point::new(0.65, 0.4);
        }
        let frame = LandmarkFrame::new(points).unwrap();
        let ear = eye_aspect_ratio(&frame).unwrap();
        assert!((ear - 0.15).abs() < TOLERANCE);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let frame = synthetic_face(0.25, 0.4, 0.1);
        let copy = frame.clone();
        let _ = MetricSample::from_frame(&frame).unwrap();
        assert_eq!(frame, copy);
    }

    #[test]
    fn test_missing_landmark_fails() {
        let frame: LandmarkFrame = serde_json::from_str("[{\"x\":0.0,\"y\":0.0}]").unwrap();
        assert!(matches!(MetricSample::from_frame(&frame), Err(Error::MalformedFrame { .. })));
    }

    #[test]
    fn test_coincident_corners_rejected() {
        let mut points = synthetic_face(0.3, 0.1, 0.05).points().to_vec();
        points[MOUTH.horizontal[1]] = points[MOUTH.horizontal[0]];
        let frame = LandmarkFrame::new(points).unwrap();

        let err = MetricSample::from_frame(&frame).unwrap_err();
        assert!(matches!(err, Error::DegenerateFrame { metric: "MAR", .. }));
    }

    #[test]
    fn test_collapsed_face_rejected() {
        let frame = LandmarkFrame::new(vec![Point::new(0.5, 0.5); 468]).unwrap();
        let err = MetricSample::from_frame(&frame).unwrap_err();
        assert!(matches!(err, Error::DegenerateFrame { metric: "EAR", .. }));
    }

    #[test]
    fn test_complete_requires_all_channels() {
        let partial = Metrics::new(Some(0.3), None, Some(0.05));
        assert!(!partial.is_complete());
        assert!(partial.complete().is_none());

        let full = Metrics::new(Some(0.3), Some(0.1), Some(0.05));
        assert_eq!(full.complete(), Some(Metrics::new(0.3, 0.1, 0.05)));
    }
}

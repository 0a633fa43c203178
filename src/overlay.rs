//! Debug overlay geometry for a rendering collaborator.
//!
//! Nothing here draws; it only resolves the feature landmarks to pixel
//! positions and styles so a canvas, window or image writer can paint them.

use crate::{
    constants::{OVERLAY_LINE_WIDTH, OVERLAY_POINT_RADIUS},
    landmarks::{overlay_indices, LandmarkFrame, Point, LEFT_EYE, MOUTH, RIGHT_EYE},
    Error, Result,
};
use serde::{Deserialize, Serialize};

/// RGBA color with alpha in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }
}

pub const LANDMARK_COLOR: Rgba = Rgba::new(0, 200, 255, 0.9);
pub const EYE_LINE_COLOR: Rgba = Rgba::new(0, 200, 255, 0.6);
pub const MOUTH_LINE_COLOR: Rgba = Rgba::new(0, 255, 160, 0.6);

/// A highlighted landmark
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayCircle {
    pub landmark: usize,
    pub center: Point,
    pub radius: f64,
    pub color: Rgba,
}

/// A line between two landmarks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlaySegment {
    pub from: Point,
    pub to: Point,
    pub color: Rgba,
}

/// Everything the debug view paints for one frame, in pixel coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugOverlay {
    pub width: u32,
    pub height: u32,
    pub line_width: f64,
    pub circles: Vec<OverlayCircle>,
    pub segments: Vec<OverlaySegment>,
}

impl DebugOverlay {
    /// Resolve the overlay for a frame drawn on a `width` × `height` surface
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for an empty surface and
    /// [`Error::MalformedFrame`] if a landmark is missing.
    pub fn build(frame: &LandmarkFrame, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidInput(format!(
                "Overlay surface must be non-empty, got {width}x{height}"
            )));
        }

        let to_pixels = |p: Point| Point::new(p.x * f64::from(width), p.y * f64::from(height));

        let circles = overlay_indices()
            .into_iter()
            .map(|landmark| -> Result<OverlayCircle> {
                Ok(OverlayCircle {
                    landmark,
                    center: to_pixels(frame.point(landmark)?),
                    radius: OVERLAY_POINT_RADIUS,
                    color: LANDMARK_COLOR,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let segments = [
            (LEFT_EYE.horizontal, EYE_LINE_COLOR),
            (RIGHT_EYE.horizontal, EYE_LINE_COLOR),
            (MOUTH.horizontal, MOUTH_LINE_COLOR),
        ]
        .into_iter()
        .map(|([a, b], color)| -> Result<OverlaySegment> {
            Ok(OverlaySegment {
                from: to_pixels(frame.point(a)?),
                to: to_pixels(frame.point(b)?),
                color,
            })
        })
        .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            width,
            height,
            line_width: OVERLAY_LINE_WIDTH,
            circles,
            segments,
        })
    }
}

/// Parse a `WIDTHxHEIGHT` surface size such as `960x540`
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if the text is not two positive integers separated by `x`.
pub fn parse_surface_size(text: &str) -> Result<(u32, u32)> {
    let invalid = || Error::InvalidInput(format!("Expected WIDTHxHEIGHT, got '{text}'"));
    let (w, h) = text.trim().split_once(|c: char| c.eq_ignore_ascii_case(&'x')).ok_or_else(invalid)?;
    let width: u32 = w.parse().map_err(|_| invalid())?;
    let height: u32 = h.parse().map_err(|_| invalid())?;
    if width == 0 || height == 0 {
        return Err(invalid());
    }
    Ok((width, height))
}

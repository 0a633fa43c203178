//! Landmark points, frames and the face mesh index scheme.
//!
//! Frames arrive from an external detector in normalized image coordinates:
//! `x` grows to the right and `y` grows downward, both in `[0, 1]`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A normalized 2D landmark position
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate, growing downward
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Point halfway between `self` and `other`
    #[must_use]
    pub fn midpoint(&self, other: &Self) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

/// Landmark indices for an eye or the mouth: one horizontal and two vertical pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApertureIndices {
    pub horizontal: [usize; 2],
    pub vertical_1: [usize; 2],
    pub vertical_2: [usize; 2],
}

impl ApertureIndices {
    fn all(&self) -> [usize; 6] {
        [
            self.horizontal[0],
            self.horizontal[1],
            self.vertical_1[0],
            self.vertical_1[1],
            self.vertical_2[0],
            self.vertical_2[1],
        ]
    }
}

pub const LEFT_EYE: ApertureIndices = ApertureIndices {
    horizontal: [33, 133],
    vertical_1: [159, 145],
    vertical_2: [160, 144],
};

pub const RIGHT_EYE: ApertureIndices = ApertureIndices {
    horizontal: [362, 263],
    vertical_1: [386, 374],
    vertical_2: [385, 380],
};

pub const MOUTH: ApertureIndices = ApertureIndices {
    horizontal: [78, 308],
    vertical_1: [13, 14],
    vertical_2: [82, 312],
};

pub const LEFT_BROW: [usize; 2] = [70, 105];
pub const RIGHT_BROW: [usize; 2] = [300, 334];

/// Highest index any metric reads; a frame must hold at least this many + 1 points
pub const MAX_REQUIRED_INDEX: usize = 386;

/// The three tracked expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expression {
    Blink,
    Mouth,
    Brow,
}

impl Expression {
    pub const ALL: [Expression; 3] = [Expression::Blink, Expression::Mouth, Expression::Brow];

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Expression::Blink => "blink",
            Expression::Mouth => "mouth",
            Expression::Brow => "brow",
        }
    }
}

/// One value per tracked expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Expressions<T> {
    pub blink: T,
    pub mouth: T,
    pub brow: T,
}

impl<T> Expressions<T> {
    pub fn new(blink: T, mouth: T, brow: T) -> Self {
        Self { blink, mouth, brow }
    }

    pub fn get(&self, expression: Expression) -> &T {
        match expression {
            Expression::Blink => &self.blink,
            Expression::Mouth => &self.mouth,
            Expression::Brow => &self.brow,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Expressions<U> {
        Expressions {
            blink: f(&self.blink),
            mouth: f(&self.mouth),
            brow: f(&self.brow),
        }
    }
}

/// Landmark indices that drive the given expression's metric
#[must_use]
pub fn expression_indices(expression: Expression) -> Vec<usize> {
    match expression {
        Expression::Blink => LEFT_EYE.all().into_iter().chain(RIGHT_EYE.all()).collect(),
        Expression::Mouth => MOUTH.all().to_vec(),
        Expression::Brow => vec![
            LEFT_EYE.horizontal[0],
            LEFT_EYE.horizontal[1],
            RIGHT_EYE.horizontal[0],
            RIGHT_EYE.horizontal[1],
            LEFT_BROW[0],
            LEFT_BROW[1],
            RIGHT_BROW[0],
            RIGHT_BROW[1],
        ],
    }
}

/// All landmarks highlighted by the debug overlay, in drawing order
#[must_use]
pub fn overlay_indices() -> Vec<usize> {
    LEFT_EYE
        .all()
        .into_iter()
        .chain(RIGHT_EYE.all())
        .chain(MOUTH.all())
        .chain(LEFT_BROW)
        .chain(RIGHT_BROW)
        .collect()
}

/// One detection cycle's worth of landmarks for a single face
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkFrame {
    points: Vec<Point>,
}

impl LandmarkFrame {
    /// Build a frame, rejecting it if any index the metrics read is missing
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedFrame`] when the frame has too few points.
    pub fn new(points: Vec<Point>) -> Result<Self> {
        let frame = Self { points };
        frame.validate()?;
        Ok(frame)
    }

    /// Check that every required landmark index is present
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedFrame`] when the frame has too few points.
    pub fn validate(&self) -> Result<()> {
        if self.points.len() <= MAX_REQUIRED_INDEX {
            return Err(Error::MalformedFrame {
                required: MAX_REQUIRED_INDEX,
                actual: self.points.len(),
            });
        }
        Ok(())
    }

    /// Landmark at `index`
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedFrame`] when the index is out of range.
    pub fn point(&self, index: usize) -> Result<Point> {
        self.points.get(index).copied().ok_or(Error::MalformedFrame {
            required: index,
            actual: self.points.len(),
        })
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

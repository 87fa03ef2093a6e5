//! Physical lengths used for column widths.

use serde::{Deserialize, Serialize};
use std::fmt;

const POINTS_PER_INCH: f32 = 72.0;
const CM_PER_INCH: f32 = 2.54;

/// A length stored in points (1 point = 1/72 inch).
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Length(f32);

impl Length {
    /// Length in points.
    pub const fn pt(points: f32) -> Self {
        Self(points)
    }

    /// Length in centimetres.
    pub fn cm(cm: f32) -> Self {
        Self(cm / CM_PER_INCH * POINTS_PER_INCH)
    }

    /// Length in millimetres.
    pub fn mm(mm: f32) -> Self {
        Self::cm(mm / 10.0)
    }

    /// Value in points.
    pub fn as_pt(self) -> f32 {
        self.0
    }

    /// Value in centimetres.
    pub fn as_cm(self) -> f32 {
        self.0 / POINTS_PER_INCH * CM_PER_INCH
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}cm", self.as_cm())
    }
}

use crate::shared::frame::Frame;

/// Minimal enclosing circle of a detected region, in input-image pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

/// The most prominent region matching the target color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Detection {
    /// Moment centroid of the region, in input-image pixels.
    pub centroid: (i32, i32),
    pub circle: Circle,
    /// Enclosed contour area, in input-image pixels.
    pub area: f64,
}

/// Outcome of one locator call.
///
/// The empty result carries neither a frame nor a detection. A valid frame
/// with annotation enabled yields a frame even when nothing was found.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DetectionResult {
    pub frame: Option<Frame>,
    pub detection: Option<Detection>,
}

impl DetectionResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn centroid(&self) -> Option<(i32, i32)> {
        self.detection.map(|d| d.centroid)
    }

    pub fn is_detected(&self) -> bool {
        self.detection.is_some()
    }
}

use image::imageops::replace;
use image::GrayImage;
use imageproc::contours::{find_contours, BorderType, Contour};
use imageproc::distance_transform::Norm;
use imageproc::morphology::{dilate, erode};
use thiserror::Error;

use crate::shared::frame::Frame;
use crate::tracking::domain::blob_locator::BlobLocator;
use crate::tracking::domain::color_preset::ColorPreset;
use crate::tracking::domain::detection::{Circle, Detection, DetectionResult};

use super::annotation::{draw_detection, AnnotationStyle};
use super::contour_geometry::{min_enclosing_circle, polygon_area, Moments};
use super::hsv::hsv_mask;

/// Why a frame produced no detection. Never leaves this module: every
/// variant becomes the empty result.
#[derive(Debug, Error, PartialEq)]
enum LocateError {
    #[error("frame is missing")]
    MissingFrame,
    #[error("frame has no pixels")]
    EmptyFrame,
    #[error("frame has {0} channel(s), need at least 3")]
    UnsupportedChannels(u8),
    #[error("scale factor {0} is not a positive finite number")]
    InvalidScale(f64),
    #[error("no region matches {0}")]
    NoDetection(ColorPreset),
    #[error("largest {0} region has zero area")]
    DegenerateRegion(ColorPreset),
}

#[derive(Clone, Debug, PartialEq)]
pub struct LocatorConfig {
    /// Resize factor applied before masking; 1.0 keeps full resolution.
    pub scale: f64,
    pub erode_iterations: u8,
    pub dilate_iterations: u8,
    /// Return an annotated copy of the input frame.
    pub draw: bool,
    /// Detections whose enclosing radius, measured at the working scale, is
    /// at or below this are not drawn.
    pub min_annotation_radius: f64,
    pub style: AnnotationStyle,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            erode_iterations: 2,
            dilate_iterations: 2,
            draw: true,
            min_annotation_radius: 2.0,
            style: AnnotationStyle::default(),
        }
    }
}

/// HSV threshold, morphological opening, then the largest external contour.
pub struct ColorBlobLocator {
    config: LocatorConfig,
}

impl ColorBlobLocator {
    pub fn new(config: LocatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LocatorConfig {
        &self.config
    }

    fn try_locate(
        &self,
        frame: Option<&Frame>,
        color: ColorPreset,
    ) -> Result<DetectionResult, LocateError> {
        let frame = frame.ok_or(LocateError::MissingFrame)?;
        if frame.is_empty() {
            return Err(LocateError::EmptyFrame);
        }
        if frame.channels() < 3 {
            return Err(LocateError::UnsupportedChannels(frame.channels()));
        }
        let scale = self.config.scale;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(LocateError::InvalidScale(scale));
        }

        let mut annotated = if self.config.draw {
            frame.to_rgb_image()
        } else {
            None
        };

        let detection = self.detect(frame, color);
        if let (Ok((d, working_radius)), Some(canvas)) = (&detection, annotated.as_mut()) {
            if *working_radius > self.config.min_annotation_radius {
                draw_detection(
                    canvas,
                    (d.circle.x, d.circle.y),
                    d.circle.radius,
                    d.centroid,
                    &self.config.style,
                );
            }
        }

        let frame_out = annotated.map(|img| Frame::from_rgb_image(img, frame.index()));
        match detection {
            Ok((d, _)) => Ok(DetectionResult {
                frame: frame_out,
                detection: Some(d),
            }),
            Err(e) => {
                log::debug!("frame {}: {e}", frame.index());
                Ok(DetectionResult {
                    frame: frame_out,
                    detection: None,
                })
            }
        }
    }

    /// The detection in input coordinates, plus the enclosing radius at the
    /// working scale.
    fn detect(&self, frame: &Frame, color: ColorPreset) -> Result<(Detection, f64), LocateError> {
        let scale = self.config.scale;
        let scaled;
        let work = if scale == 1.0 {
            frame
        } else {
            let w = ((frame.width() as f64 * scale).round() as u32).max(1);
            let h = ((frame.height() as f64 * scale).round() as u32).max(1);
            scaled = frame
                .resized(w, h)
                .ok_or(LocateError::UnsupportedChannels(frame.channels()))?;
            &scaled
        };
        // Per-axis factors, since rounding can make them differ slightly
        let sx = work.width() as f64 / frame.width() as f64;
        let sy = work.height() as f64 / frame.height() as f64;

        let mask = self.clean_mask(hsv_mask(work, &color.hsv_range()));
        let contour = largest_external_contour(&mask).ok_or(LocateError::NoDetection(color))?;

        let moments = Moments::of_polygon(&contour.points);
        let (mx, my) = moments
            .centroid()
            .ok_or(LocateError::DegenerateRegion(color))?;
        let circle = min_enclosing_circle(&contour.points);

        let max_x = frame.width() as i32 - 1;
        let max_y = frame.height() as i32 - 1;
        let centroid = (
            ((mx / sx).trunc() as i32).clamp(0, max_x),
            ((my / sy).trunc() as i32).clamp(0, max_y),
        );

        let detection = Detection {
            centroid,
            circle: Circle {
                x: circle.x / sx,
                y: circle.y / sy,
                radius: circle.radius / sx.min(sy),
            },
            area: moments.m00 / (sx * sy),
        };
        Ok((detection, circle.radius))
    }

    fn clean_mask(&self, mask: GrayImage) -> GrayImage {
        let mask = if self.config.erode_iterations > 0 {
            erode(&mask, Norm::LInf, self.config.erode_iterations)
        } else {
            mask
        };
        if self.config.dilate_iterations > 0 {
            dilate(&mask, Norm::LInf, self.config.dilate_iterations)
        } else {
            mask
        }
    }
}

impl Default for ColorBlobLocator {
    fn default() -> Self {
        Self::new(LocatorConfig::default())
    }
}

impl BlobLocator for ColorBlobLocator {
    fn locate(&self, frame: Option<&Frame>, color: ColorPreset) -> DetectionResult {
        self.try_locate(frame, color).unwrap_or_else(|e| {
            log::warn!("{e}");
            DetectionResult::empty()
        })
    }
}

/// Outer borders with no enclosing border; the largest by polygon area wins,
/// the first in scan order on ties.
///
/// The mask is traced inside a one-pixel background frame, so regions touching
/// the image edge still get an outer border. Points come back in mask
/// coordinates.
fn largest_external_contour(mask: &GrayImage) -> Option<Contour<i32>> {
    let mut best: Option<(f64, Contour<i32>)> = None;
    for mut contour in find_contours::<i32>(&with_background_border(mask)) {
        if !matches!(contour.border_type, BorderType::Outer) || contour.parent.is_some() {
            continue;
        }
        for p in contour.points.iter_mut() {
            p.x -= 1;
            p.y -= 1;
        }
        let area = polygon_area(&contour.points);
        if best.as_ref().map_or(true, |(a, _)| area > *a) {
            best = Some((area, contour));
        }
    }
    best.map(|(_, c)| c)
}

fn with_background_border(mask: &GrayImage) -> GrayImage {
    let mut padded = GrayImage::new(mask.width() + 2, mask.height() + 2);
    replace(&mut padded, mask, 1, 1);
    padded
}

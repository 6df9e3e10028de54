use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_circle_mut};

/// Styling for the detection overlay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnnotationStyle {
    /// Outline radius relative to the enclosing circle.
    pub circle_scale: f64,
    pub circle_thickness: u32,
    pub circle_color: [u8; 3],
    pub marker_radius: i32,
    pub marker_color: [u8; 3],
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self {
            circle_scale: 1.25,
            circle_thickness: 2,
            circle_color: [0, 255, 255],
            marker_radius: 2,
            marker_color: [0, 0, 255],
        }
    }
}

/// Draws the enclosing-circle outline and a filled centroid marker.
pub fn draw_detection(
    canvas: &mut RgbImage,
    circle_center: (f64, f64),
    circle_radius: f64,
    centroid: (i32, i32),
    style: &AnnotationStyle,
) {
    let center = (circle_center.0 as i32, circle_center.1 as i32);
    let outer = (circle_radius * style.circle_scale) as i32;

    for t in 0..style.circle_thickness as i32 {
        let r = outer - t;
        if r <= 0 {
            break;
        }
        draw_hollow_circle_mut(canvas, center, r, Rgb(style.circle_color));
    }

    draw_filled_circle_mut(canvas, centroid, style.marker_radius, Rgb(style.marker_color));
}

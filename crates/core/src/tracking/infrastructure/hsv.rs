use image::{GrayImage, Luma};

use crate::shared::frame::Frame;
use crate::tracking::domain::color_preset::{Hsv, HsvRange};

pub const MASK_ON: u8 = 255;

/// RGB to HSV with hue halved into `[0, 180)` so it fits a byte.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> Hsv {
    let (rf, gf, bf) = (r as f64, g as f64, b as f64);
    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let s = if max == 0.0 { 0.0 } else { delta * 255.0 / max };

    let hue_deg = if delta == 0.0 {
        0.0
    } else if max == rf {
        60.0 * (gf - bf) / delta
    } else if max == gf {
        120.0 + 60.0 * (bf - rf) / delta
    } else {
        240.0 + 60.0 * (rf - gf) / delta
    };
    let hue_deg = if hue_deg < 0.0 { hue_deg + 360.0 } else { hue_deg };

    let mut h = (hue_deg / 2.0).round() as u32;
    if h >= 180 {
        h -= 180;
    }

    Hsv::new(h as u8, s.round() as u8, max as u8)
}

/// Binary mask of the pixels whose HSV value lies inside `range`.
///
/// Foreground pixels are [`MASK_ON`], the rest zero. Channels past the
/// third are ignored. Frames with fewer than three channels produce an
/// all-background mask.
pub fn hsv_mask(frame: &Frame, range: &HsvRange) -> GrayImage {
    let mut mask = GrayImage::new(frame.width(), frame.height());
    if frame.channels() < 3 {
        return mask;
    }

    let view = frame.as_ndarray();
    for (y, row) in view.outer_iter().enumerate() {
        for (x, px) in row.outer_iter().enumerate() {
            if range.contains(rgb_to_hsv(px[0], px[1], px[2])) {
                mask.put_pixel(x as u32, y as u32, Luma([MASK_ON]));
            }
        }
    }
    mask
}

use opencv::core::{Mat, Scalar, CV_8UC3};
use opencv::highgui;
use opencv::prelude::*;

use crate::display::domain::frame_display::FrameDisplay;
use crate::shared::constants::{DISPLAY_WINDOW_NAME, DISPLAY_WINDOW_SIZE};
use crate::shared::frame::Frame;

/// Interactive OpenCV window.
///
/// The window is (re)created whenever it is not visible, so closing it by
/// hand just makes it reappear on the next frame. Each `show` polls the
/// keyboard for 1 ms to let the GUI event loop run.
pub struct HighGuiDisplay {
    window: String,
    size: i32,
}

impl HighGuiDisplay {
    pub fn new(window: &str, size: i32) -> Self {
        Self {
            window: window.to_string(),
            size,
        }
    }

    fn ensure_window(&self) -> opencv::Result<()> {
        let visible = highgui::get_window_property(&self.window, highgui::WND_PROP_VISIBLE)
            .unwrap_or(0.0);
        if visible < 1.0 {
            highgui::named_window(&self.window, highgui::WINDOW_NORMAL)?;
            highgui::resize_window(&self.window, self.size, self.size)?;
        }
        Ok(())
    }
}

impl Default for HighGuiDisplay {
    fn default() -> Self {
        Self::new(DISPLAY_WINDOW_NAME, DISPLAY_WINDOW_SIZE)
    }
}

fn to_bgr_mat(frame: &Frame) -> Result<Mat, Box<dyn std::error::Error>> {
    let rgb = frame
        .to_rgb_image()
        .ok_or("Frame has no color channels to display")?;
    let mut mat = Mat::new_rows_cols_with_default(
        frame.height() as i32,
        frame.width() as i32,
        CV_8UC3,
        Scalar::all(0.0),
    )?;
    let dst = mat.data_bytes_mut()?;
    for (out, px) in dst.chunks_exact_mut(3).zip(rgb.pixels()) {
        out[0] = px[2];
        out[1] = px[1];
        out[2] = px[0];
    }
    Ok(mat)
}

impl FrameDisplay for HighGuiDisplay {
    fn show(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        self.ensure_window()?;
        let mat = to_bgr_mat(frame)?;
        highgui::imshow(&self.window, &mat)?;
        highgui::wait_key(1)?;
        Ok(())
    }
}

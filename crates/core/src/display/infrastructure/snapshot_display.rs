use std::path::{Path, PathBuf};

use crate::camera::domain::image_writer::ImageWriter;
use crate::display::domain::frame_display::FrameDisplay;
use crate::shared::frame::Frame;

/// Offline stand-in for an interactive window: every shown frame lands in
/// `dir` as `<window>_<index>.png`.
pub struct SnapshotDisplay {
    dir: PathBuf,
    window: String,
    writer: Box<dyn ImageWriter>,
}

impl SnapshotDisplay {
    pub fn new(dir: &Path, window: &str, writer: Box<dyn ImageWriter>) -> Self {
        Self {
            dir: dir.to_path_buf(),
            window: window.to_string(),
            writer,
        }
    }

    pub fn path_for(&self, frame: &Frame) -> PathBuf {
        self.dir
            .join(format!("{}_{:06}.png", self.window, frame.index()))
    }
}

impl FrameDisplay for SnapshotDisplay {
    fn show(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        let path = self.path_for(frame);
        self.writer.write(&path, frame, None)?;
        log::trace!("Snapshot written to {}", path.display());
        Ok(())
    }
}

use std::path::Path;

use crate::shared::frame::Frame;

/// Persists annotated frames: the `locate --output` image and the
/// per-frame files behind the snapshot display.
pub trait ImageWriter: Send {
    /// `size` rescales the frame to `(width, height)` before encoding.
    fn write(
        &self,
        path: &Path,
        frame: &Frame,
        size: Option<(u32, u32)>,
    ) -> Result<(), Box<dyn std::error::Error>>;
}

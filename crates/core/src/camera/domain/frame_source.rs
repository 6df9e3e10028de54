use std::path::{Path, PathBuf};

use crate::shared::frame::Frame;

/// What a source knows about itself once opened.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceMetadata {
    /// Frames available, or `None` for an open-ended feed.
    pub total_frames: Option<usize>,
    pub source_path: Option<PathBuf>,
}

/// Camera frames in capture order.
///
/// Decoding happens lazily so a live loop only pays for the frames it
/// actually consumes.
pub trait FrameSource: Send {
    fn open(&mut self, path: &Path) -> Result<SourceMetadata, Box<dyn std::error::Error>>;

    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_>;

    fn close(&mut self);
}

use crate::shared::frame::Frame;
use crate::tracking::domain::color_preset::ColorPreset;
use crate::tracking::domain::detection::DetectionResult;

/// Domain interface for locating a colored blob in a single frame.
///
/// Implementations are stateless across calls and never fail: every
/// degenerate input collapses to [`DetectionResult::empty`], so a live
/// polling loop can keep going after a bad frame.
pub trait BlobLocator: Send + Sync {
    fn locate(&self, frame: Option<&Frame>, color: ColorPreset) -> DetectionResult;

    /// Looks the preset up by name; unknown names yield the empty result.
    fn locate_named(&self, frame: Option<&Frame>, color: &str) -> DetectionResult {
        match color.parse::<ColorPreset>() {
            Ok(preset) => self.locate(frame, preset),
            Err(e) => {
                log::warn!("{e}");
                DetectionResult::empty()
            }
        }
    }
}

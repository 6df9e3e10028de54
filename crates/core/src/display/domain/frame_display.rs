use crate::shared::frame::Frame;

/// Sink for annotated frames shown to a human while debugging.
///
/// Purely observational: nothing a display does feeds back into
/// detection.
pub trait FrameDisplay: Send {
    fn show(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;
}

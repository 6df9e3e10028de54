use crate::display::domain::frame_display::FrameDisplay;
use crate::shared::frame::Frame;

/// Headless display that discards every frame.
pub struct NullDisplay;

impl FrameDisplay for NullDisplay {
    fn show(&mut self, _frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_is_noop() {
        let frame = Frame::new(vec![0u8; 12], 2, 2, 3, 0);
        NullDisplay.show(&frame).unwrap();
    }
}

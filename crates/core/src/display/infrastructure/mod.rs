#[cfg(feature = "highgui")]
pub mod highgui_display;
pub mod null_display;
pub mod snapshot_display;

pub mod blob_locator;
pub mod color_preset;
pub mod detection;

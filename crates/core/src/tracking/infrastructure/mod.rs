pub mod annotation;
pub mod color_blob_locator;
mod contour_geometry;
pub mod hsv;

use image::imageops::FilterType;
use image::{DynamicImage, RgbImage};
use ndarray::{ArrayView3, ArrayViewMut3};

/// A single camera frame: contiguous row-major samples, RGB ordering.
///
/// Three-channel frames are plain RGB; four-channel frames carry a trailing
/// alpha sample which the tracking code ignores.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    /// Wraps an `image` buffer without copying.
    pub fn from_rgb_image(image: RgbImage, index: usize) -> Self {
        let (width, height) = image.dimensions();
        Self::new(image.into_raw(), width, height, 3, index)
    }

    /// Decoded images of any color type, normalized to RGB.
    pub fn from_dynamic_image(image: DynamicImage, index: usize) -> Self {
        Self::from_rgb_image(image.into_rgb8(), index)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    pub fn as_ndarray_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        ArrayViewMut3::from_shape(self.shape(), &mut self.data)
            .expect("Frame data length must match dimensions")
    }

    /// Copies the color samples into an RGB buffer, dropping any alpha.
    ///
    /// Returns `None` for frames with fewer than three channels.
    pub fn to_rgb_image(&self) -> Option<RgbImage> {
        let channels = self.channels as usize;
        if channels < 3 {
            return None;
        }
        if channels == 3 {
            return RgbImage::from_raw(self.width, self.height, self.data.clone());
        }
        let rgb: Vec<u8> = self
            .data
            .chunks_exact(channels)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();
        RgbImage::from_raw(self.width, self.height, rgb)
    }

    /// Bilinear resize to the given dimensions, keeping the frame index.
    ///
    /// The result is always three-channel RGB.
    pub fn resized(&self, width: u32, height: u32) -> Option<Frame> {
        let rgb = self.to_rgb_image()?;
        let out = image::imageops::resize(&rgb, width, height, FilterType::Triangle);
        Some(Frame::from_rgb_image(out, self.index))
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}

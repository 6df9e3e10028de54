use std::path::{Path, PathBuf};

use crate::camera::domain::frame_source::{FrameSource, SourceMetadata};
use crate::shared::constants::IMAGE_EXTENSIONS;
use crate::shared::frame::Frame;

/// Adapts a single image file, or a directory of image files, to the
/// [`FrameSource`] interface.
///
/// Directory entries are taken in file-name order, so numbered captures
/// (`frame_0001.png`, ...) replay in sequence. Files are decoded with the
/// `image` crate and normalized to RGB.
pub struct ImageFileReader {
    paths: Option<Vec<PathBuf>>,
}

impl ImageFileReader {
    pub fn new() -> Self {
        Self { paths: None }
    }
}

impl Default for ImageFileReader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

fn list_images(dir: &Path) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_image(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn decode(path: &Path, index: usize) -> Result<Frame, Box<dyn std::error::Error>> {
    let img = image::open(path).map_err(|e| format!("{}: {e}", path.display()))?;
    Ok(Frame::from_dynamic_image(img, index))
}

impl FrameSource for ImageFileReader {
    fn open(&mut self, path: &Path) -> Result<SourceMetadata, Box<dyn std::error::Error>> {
        let paths = if path.is_dir() {
            list_images(path)?
        } else if path.is_file() {
            vec![path.to_path_buf()]
        } else {
            return Err(format!("Input not found: {}", path.display()).into());
        };

        log::debug!("Opened {} with {} frame(s)", path.display(), paths.len());
        let metadata = SourceMetadata {
            total_frames: Some(paths.len()),
            source_path: Some(path.to_path_buf()),
        };
        self.paths = Some(paths);
        Ok(metadata)
    }

    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
        match self.paths.take() {
            Some(paths) => Box::new(
                paths
                    .into_iter()
                    .enumerate()
                    .map(|(index, path)| decode(&path, index)),
            ),
            None => Box::new(std::iter::once(Err("ImageFileReader: not opened".into()))),
        }
    }

    fn close(&mut self) {
        self.paths = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_test_image(dir: &Path, name: &str, rgb: [u8; 3]) -> PathBuf {
        let path = dir.join(name);
        let mut img = image::RgbImage::new(100, 80);
        for pixel in img.pixels_mut() {
            *pixel = image::Rgb(rgb);
        }
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_open_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_image(dir.path(), "test.png", [50, 100, 200]);
        let mut reader = ImageFileReader::new();
        let meta = reader.open(&path).unwrap();
        assert_eq!(meta.total_frames, Some(1));
        assert_eq!(meta.source_path, Some(path));
    }

    #[test]
    fn test_open_nonexistent_errors() {
        let mut reader = ImageFileReader::new();
        assert!(reader.open(Path::new("/nonexistent/test.png")).is_err());
    }

    #[test]
    fn test_frame_is_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_image(dir.path(), "test.png", [50, 100, 200]);
        let mut reader = ImageFileReader::new();
        reader.open(&path).unwrap();

        let frame = reader.frames().next().unwrap().unwrap();
        assert_eq!(frame.channels(), 3);
        assert_eq!((frame.width(), frame.height()), (100, 80));
        assert_eq!(&frame.data()[..3], &[50, 100, 200]);
    }

    #[test]
    fn test_directory_frames_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        write_test_image(dir.path(), "frame_002.png", [0, 0, 2]);
        write_test_image(dir.path(), "frame_001.png", [0, 0, 1]);
        write_test_image(dir.path(), "frame_003.png", [0, 0, 3]);
        std::fs::write(dir.path().join("notes.txt"), "not an image").unwrap();

        let mut reader = ImageFileReader::new();
        let meta = reader.open(dir.path()).unwrap();
        assert_eq!(meta.total_frames, Some(3));

        let frames: Vec<Frame> = reader.frames().map(|f| f.unwrap()).collect();
        let blues: Vec<u8> = frames.iter().map(|f| f.data()[2]).collect();
        let indices: Vec<usize> = frames.iter().map(|f| f.index()).collect();
        assert_eq!(blues, vec![1, 2, 3]);
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_corrupt_file_yields_error_item() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.png"), b"garbage").unwrap();
        let mut reader = ImageFileReader::new();
        reader.open(dir.path()).unwrap();
        let items: Vec<_> = reader.frames().collect();
        assert_eq!(items.len(), 1);
        assert!(items[0].is_err());
    }

    #[test]
    fn test_frames_without_open_returns_error() {
        let mut reader = ImageFileReader::new();
        let result = reader.frames().next().unwrap();
        assert!(result.is_err());
    }

    #[test]
    fn test_close_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_image(dir.path(), "test.png", [1, 2, 3]);
        let mut reader = ImageFileReader::new();
        reader.open(&path).unwrap();
        reader.close();
        reader.close();
    }

    #[test]
    fn test_is_image_extension_case_insensitive() {
        assert!(is_image(Path::new("a/b/FRAME.PNG")));
        assert!(is_image(Path::new("x.jpeg")));
        assert!(!is_image(Path::new("x.mp4")));
        assert!(!is_image(Path::new("noext")));
    }
}

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::pipeline::track_ball_use_case::{TrackBallUseCase, TrackingReport};
use crate::simulation::domain::environment::{Environment, EnvironmentKind};

/// Ball-tracking task driven by recorded camera frames instead of a live
/// simulator.
///
/// Each `run` replays the recording from the start.
pub struct ReplayEnvironment {
    recording: PathBuf,
    tracker: TrackBallUseCase,
    initialized: bool,
    last_report: Option<TrackingReport>,
}

impl ReplayEnvironment {
    pub fn new(recording: &Path, tracker: TrackBallUseCase) -> Self {
        Self {
            recording: recording.to_path_buf(),
            tracker,
            initialized: false,
            last_report: None,
        }
    }

    pub fn last_report(&self) -> Option<&TrackingReport> {
        self.last_report.as_ref()
    }
}

impl Environment for ReplayEnvironment {
    fn kind(&self) -> EnvironmentKind {
        EnvironmentKind::NaoTracking
    }

    fn initialize(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        if !self.recording.exists() {
            return Err(format!("Recording not found: {}", self.recording.display()).into());
        }
        self.last_report = None;
        self.initialized = true;
        log::info!("{} ready ({})", self.kind(), self.recording.display());
        Ok(())
    }

    fn run(&mut self, timeout: Duration) -> Result<(), Box<dyn std::error::Error>> {
        if !self.initialized {
            return Err(format!("{} is not initialized", self.kind()).into());
        }
        let report = self.tracker.execute(&self.recording, Some(timeout))?;
        log::info!(
            "{}: {}/{} frames with a detection",
            self.kind(),
            report.frames_detected,
            report.frames_processed
        );
        self.last_report = Some(report);
        Ok(())
    }

    fn close(&mut self) {
        self.initialized = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::infrastructure::image_file_reader::ImageFileReader;
    use crate::display::infrastructure::null_display::NullDisplay;
    use crate::pipeline::pipeline_logger::NullPipelineLogger;
    use crate::tracking::domain::color_preset::ColorPreset;
    use crate::tracking::infrastructure::color_blob_locator::ColorBlobLocator;
    use image::{Rgb, RgbImage};

    fn write_recording(dir: &Path) {
        for (i, cx) in [20u32, 40, 60].iter().enumerate() {
            let mut img = RgbImage::from_pixel(100, 80, Rgb([20, 20, 20]));
            for y in 0..80u32 {
                for x in 0..100u32 {
                    let dx = x as i32 - *cx as i32;
                    let dy = y as i32 - 40;
                    if dx * dx + dy * dy <= 100 {
                        img.put_pixel(x, y, Rgb([0, 0, 255]));
                    }
                }
            }
            img.save(dir.join(format!("frame_{i:03}.png"))).unwrap();
        }
    }

    fn environment(recording: &Path) -> ReplayEnvironment {
        let tracker = TrackBallUseCase::new(
            Box::new(ImageFileReader::new()),
            Box::new(ColorBlobLocator::default()),
            ColorPreset::Blue,
            Box::new(NullDisplay),
            Box::new(NullPipelineLogger),
        );
        ReplayEnvironment::new(recording, tracker)
    }

    #[test]
    fn test_replay_tracks_moving_ball() {
        let dir = tempfile::tempdir().unwrap();
        write_recording(dir.path());
        let mut env = environment(dir.path());

        env.initialize().unwrap();
        env.run(Duration::from_secs(30)).unwrap();
        env.close();

        let report = env.last_report().unwrap();
        assert_eq!(report.frames_processed, 3);
        assert_eq!(report.frames_detected, 3);
        let (x, y) = report.last_centroid.unwrap();
        assert!((x - 60).abs() <= 2, "x = {x}");
        assert!((y - 40).abs() <= 2, "y = {y}");
    }

    #[test]
    fn test_run_before_initialize_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut env = environment(dir.path());
        assert!(env.run(Duration::from_secs(1)).is_err());
    }

    #[test]
    fn test_missing_recording_fails_initialize() {
        let mut env = environment(Path::new("/nonexistent/recording"));
        assert!(env.initialize().is_err());
    }

    #[test]
    fn test_kind_is_tracking() {
        let dir = tempfile::tempdir().unwrap();
        let env = environment(dir.path());
        assert_eq!(env.kind(), EnvironmentKind::NaoTracking);
        assert!(env.kind().uses_camera());
    }
}

use std::path::Path;
use std::time::{Duration, Instant};

use crate::camera::domain::frame_source::FrameSource;
use crate::display::domain::frame_display::FrameDisplay;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::tracking::domain::blob_locator::BlobLocator;
use crate::tracking::domain::color_preset::ColorPreset;

/// Per-frame outcome: frame index and the centroid, if any.
pub type FrameResult = (usize, Option<(i32, i32)>);

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackingReport {
    pub frames_processed: usize,
    pub frames_detected: usize,
    /// Frames that failed to decode and were skipped.
    pub frames_skipped: usize,
    pub results: Vec<FrameResult>,
    pub last_centroid: Option<(i32, i32)>,
    pub timed_out: bool,
}

impl TrackingReport {
    pub fn detection_rate(&self) -> f64 {
        if self.frames_processed == 0 {
            return 0.0;
        }
        self.frames_detected as f64 / self.frames_processed as f64
    }
}

/// Polling loop: read → locate → show, one locator call per frame.
pub struct TrackBallUseCase {
    source: Box<dyn FrameSource>,
    locator: Box<dyn BlobLocator>,
    color: ColorPreset,
    display: Box<dyn FrameDisplay>,
    logger: Box<dyn PipelineLogger>,
}

impl TrackBallUseCase {
    pub fn new(
        source: Box<dyn FrameSource>,
        locator: Box<dyn BlobLocator>,
        color: ColorPreset,
        display: Box<dyn FrameDisplay>,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            source,
            locator,
            color,
            display,
            logger,
        }
    }

    /// Runs until the source is exhausted or `timeout` elapses.
    ///
    /// Frames that fail to decode are logged and skipped. Display failures
    /// are logged and never stop the loop.
    pub fn execute(
        &mut self,
        input_path: &Path,
        timeout: Option<Duration>,
    ) -> Result<TrackingReport, Box<dyn std::error::Error>> {
        let metadata = self.source.open(input_path)?;
        let total = metadata.total_frames;
        self.logger
            .info(&format!("Tracking {} in {}", self.color, input_path.display()));

        let start = Instant::now();
        let mut report = TrackingReport::default();

        for item in self.source.frames() {
            if timeout.is_some_and(|t| start.elapsed() >= t) {
                report.timed_out = true;
                break;
            }

            let frame = match item {
                Ok(frame) => frame,
                Err(e) => {
                    log::warn!("Skipping frame: {e}");
                    report.frames_skipped += 1;
                    continue;
                }
            };

            let t0 = Instant::now();
            let result = self.locator.locate(Some(&frame), self.color);
            self.logger
                .timing("locate", t0.elapsed().as_secs_f64() * 1000.0);

            let centroid = result.centroid();
            self.logger.detection(centroid.is_some());
            if let Some(detection) = result.detection {
                self.logger.metric("area", detection.area);
                report.frames_detected += 1;
                report.last_centroid = Some(detection.centroid);
            }

            if let Some(annotated) = result.frame.as_ref() {
                let t1 = Instant::now();
                if let Err(e) = self.display.show(annotated) {
                    log::warn!("Display failed on frame {}: {e}", frame.index());
                }
                self.logger
                    .timing("display", t1.elapsed().as_secs_f64() * 1000.0);
            }

            report.results.push((frame.index(), centroid));
            report.frames_processed += 1;
            self.logger.progress(report.frames_processed, total);
        }

        self.source.close();
        self.logger.summary();
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::domain::frame_source::SourceMetadata;
    use crate::shared::frame::Frame;
    use crate::tracking::domain::detection::{Circle, Detection, DetectionResult};
    use std::sync::{Arc, Mutex};

    // --- Stubs ---

    struct StubSource {
        items: Vec<Result<Frame, String>>,
        fail_open: bool,
    }

    impl StubSource {
        fn new(items: Vec<Result<Frame, String>>) -> Self {
            Self {
                items,
                fail_open: false,
            }
        }
    }

    impl FrameSource for StubSource {
        fn open(&mut self, _path: &Path) -> Result<SourceMetadata, Box<dyn std::error::Error>> {
            if self.fail_open {
                return Err("cannot open".into());
            }
            Ok(SourceMetadata {
                total_frames: Some(self.items.len()),
                source_path: None,
            })
        }

        fn frames(
            &mut self,
        ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
            Box::new(
                self.items
                    .drain(..)
                    .map(|item| item.map_err(|e| -> Box<dyn std::error::Error> { e.into() })),
            )
        }

        fn close(&mut self) {
            self.items.clear();
        }
    }

    /// Detects on even-indexed frames at `(index, index)`.
    struct EvenLocator {
        calls: Arc<Mutex<usize>>,
        delay: Duration,
    }

    impl BlobLocator for EvenLocator {
        fn locate(&self, frame: Option<&Frame>, _color: ColorPreset) -> DetectionResult {
            *self.calls.lock().unwrap() += 1;
            std::thread::sleep(self.delay);
            let frame = frame.unwrap();
            let i = frame.index() as i32;
            DetectionResult {
                frame: Some(frame.clone()),
                detection: (i % 2 == 0).then_some(Detection {
                    centroid: (i, i),
                    circle: Circle {
                        x: i as f64,
                        y: i as f64,
                        radius: 5.0,
                    },
                    area: 78.0,
                }),
            }
        }
    }

    struct RecordingDisplay {
        shown: Arc<Mutex<Vec<usize>>>,
        fail: bool,
    }

    impl FrameDisplay for RecordingDisplay {
        fn show(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
            self.shown.lock().unwrap().push(frame.index());
            if self.fail {
                return Err("window closed".into());
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct Events {
        timings: Vec<String>,
        detections: Vec<bool>,
        progress: Vec<(usize, Option<usize>)>,
        summaries: usize,
    }

    struct RecordingLogger {
        events: Arc<Mutex<Events>>,
    }

    impl PipelineLogger for RecordingLogger {
        fn progress(&mut self, current: usize, total: Option<usize>) {
            self.events.lock().unwrap().progress.push((current, total));
        }
        fn timing(&mut self, stage: &str, _duration_ms: f64) {
            self.events.lock().unwrap().timings.push(stage.to_string());
        }
        fn metric(&mut self, _name: &str, _value: f64) {}
        fn detection(&mut self, detected: bool) {
            self.events.lock().unwrap().detections.push(detected);
        }
        fn info(&mut self, _message: &str) {}
        fn summary(&self) {
            self.events.lock().unwrap().summaries += 1;
        }
    }

    // --- Helpers ---

    fn frame(index: usize) -> Frame {
        Frame::new(vec![0; 4 * 4 * 3], 4, 4, 3, index)
    }

    struct Harness {
        calls: Arc<Mutex<usize>>,
        shown: Arc<Mutex<Vec<usize>>>,
        events: Arc<Mutex<Events>>,
    }

    fn build(
        items: Vec<Result<Frame, String>>,
        delay: Duration,
        display_fails: bool,
    ) -> (TrackBallUseCase, Harness) {
        let harness = Harness {
            calls: Arc::new(Mutex::new(0)),
            shown: Arc::new(Mutex::new(Vec::new())),
            events: Arc::new(Mutex::new(Events::default())),
        };
        let uc = TrackBallUseCase::new(
            Box::new(StubSource::new(items)),
            Box::new(EvenLocator {
                calls: harness.calls.clone(),
                delay,
            }),
            ColorPreset::Red,
            Box::new(RecordingDisplay {
                shown: harness.shown.clone(),
                fail: display_fails,
            }),
            Box::new(RecordingLogger {
                events: harness.events.clone(),
            }),
        );
        (uc, harness)
    }

    // --- Tests ---

    #[test]
    fn test_one_locate_per_frame_until_exhausted() {
        let items = (0..5).map(|i| Ok(frame(i))).collect();
        let (mut uc, h) = build(items, Duration::ZERO, false);

        let report = uc.execute(Path::new("feed"), None).unwrap();

        assert_eq!(*h.calls.lock().unwrap(), 5);
        assert_eq!(report.frames_processed, 5);
        assert_eq!(report.frames_detected, 3);
        assert_eq!(report.last_centroid, Some((4, 4)));
        assert!(!report.timed_out);
        assert_eq!(
            report.results,
            vec![
                (0, Some((0, 0))),
                (1, None),
                (2, Some((2, 2))),
                (3, None),
                (4, Some((4, 4))),
            ]
        );
    }

    #[test]
    fn test_decode_errors_are_skipped() {
        let items = vec![Ok(frame(0)), Err("corrupt".to_string()), Ok(frame(2))];
        let (mut uc, h) = build(items, Duration::ZERO, false);

        let report = uc.execute(Path::new("feed"), None).unwrap();

        assert_eq!(report.frames_processed, 2);
        assert_eq!(report.frames_skipped, 1);
        assert_eq!(*h.calls.lock().unwrap(), 2);
        let indices: Vec<usize> = report.results.iter().map(|r| r.0).collect();
        assert_eq!(indices, vec![0, 2]);
    }

    #[test]
    fn test_timeout_stops_loop() {
        let items = (0..50).map(|i| Ok(frame(i))).collect();
        let (mut uc, h) = build(items, Duration::from_millis(20), false);

        let report = uc
            .execute(Path::new("feed"), Some(Duration::from_millis(50)))
            .unwrap();

        assert!(report.timed_out);
        assert!(report.frames_processed < 50);
        assert_eq!(*h.calls.lock().unwrap(), report.frames_processed);
    }

    #[test]
    fn test_zero_timeout_processes_nothing() {
        let items = (0..3).map(|i| Ok(frame(i))).collect();
        let (mut uc, _h) = build(items, Duration::ZERO, false);

        let report = uc.execute(Path::new("feed"), Some(Duration::ZERO)).unwrap();

        assert!(report.timed_out);
        assert_eq!(report.frames_processed, 0);
        assert_eq!(report.last_centroid, None);
    }

    #[test]
    fn test_annotated_frames_reach_display() {
        let items = (0..3).map(|i| Ok(frame(i))).collect();
        let (mut uc, h) = build(items, Duration::ZERO, false);

        uc.execute(Path::new("feed"), None).unwrap();

        assert_eq!(*h.shown.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_display_failure_does_not_stop_loop() {
        let items = (0..3).map(|i| Ok(frame(i))).collect();
        let (mut uc, h) = build(items, Duration::ZERO, true);

        let report = uc.execute(Path::new("feed"), None).unwrap();

        assert_eq!(report.frames_processed, 3);
        assert_eq!(h.shown.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_logger_receives_stage_timings_and_summary() {
        let items = (0..2).map(|i| Ok(frame(i))).collect();
        let (mut uc, h) = build(items, Duration::ZERO, false);

        uc.execute(Path::new("feed"), None).unwrap();

        let events = h.events.lock().unwrap();
        assert_eq!(events.timings.iter().filter(|s| *s == "locate").count(), 2);
        assert_eq!(events.detections, vec![true, false]);
        assert_eq!(events.progress, vec![(1, Some(2)), (2, Some(2))]);
        assert_eq!(events.summaries, 1);
    }

    #[test]
    fn test_open_failure_propagates() {
        let mut source = StubSource::new(vec![Ok(frame(0))]);
        source.fail_open = true;
        let mut uc = TrackBallUseCase::new(
            Box::new(source),
            Box::new(EvenLocator {
                calls: Arc::new(Mutex::new(0)),
                delay: Duration::ZERO,
            }),
            ColorPreset::Red,
            Box::new(RecordingDisplay {
                shown: Arc::new(Mutex::new(Vec::new())),
                fail: false,
            }),
            Box::new(RecordingLogger {
                events: Arc::new(Mutex::new(Events::default())),
            }),
        );

        assert!(uc.execute(Path::new("feed"), None).is_err());
    }

    #[test]
    fn test_detection_rate() {
        let report = TrackingReport {
            frames_processed: 4,
            frames_detected: 1,
            ..TrackingReport::default()
        };
        assert!((report.detection_rate() - 0.25).abs() < f64::EPSILON);
        assert_eq!(TrackingReport::default().detection_rate(), 0.0);
    }
}

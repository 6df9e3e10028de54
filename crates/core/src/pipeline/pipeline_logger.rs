use std::collections::HashMap;
use std::time::Instant;

/// Cross-cutting logger for tracking-loop events.
///
/// Keeps the loop independent of where observations end up (log output,
/// tests, a future UI).
pub trait PipelineLogger: Send {
    /// Report frame-level progress; `total` is `None` for open-ended feeds.
    fn progress(&mut self, current: usize, total: Option<usize>);

    /// Record how long a named stage took for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a point-in-time metric (e.g. detected area).
    fn metric(&mut self, name: &str, value: f64);

    /// Record whether the current frame produced a detection.
    fn detection(&mut self, detected: bool);

    fn info(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Discards all events.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn progress(&mut self, _current: usize, _total: Option<usize>) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn detection(&mut self, _detected: bool) {}
    fn info(&mut self, _message: &str) {}
}

/// Count, sum and maximum of a stream of samples, in constant space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunningStats {
    pub count: usize,
    pub sum: f64,
    pub max: f64,
}

impl RunningStats {
    pub fn push(&mut self, value: f64) {
        self.max = if self.count == 0 { value } else { self.max.max(value) };
        self.count += 1;
        self.sum += value;
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.sum / self.count as f64
    }
}

/// Aggregates per-stage timings, metrics and the detection hit rate, and
/// reports them through the `log` crate.
///
/// Progress lines are throttled to every `throttle_frames` frames.
pub struct SummaryPipelineLogger {
    throttle_frames: usize,
    timings: HashMap<String, RunningStats>,
    metrics: HashMap<String, RunningStats>,
    start_time: Instant,
    frames: usize,
    hits: usize,
}

impl SummaryPipelineLogger {
    pub fn new(throttle_frames: usize) -> Self {
        Self {
            throttle_frames: throttle_frames.max(1),
            timings: HashMap::new(),
            metrics: HashMap::new(),
            start_time: Instant::now(),
            frames: 0,
            hits: 0,
        }
    }

    /// Returns the formatted summary, or `None` before any frame was seen.
    pub fn summary_string(&self) -> Option<String> {
        if self.frames == 0 {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let frames = self.frames;
        let mut lines = vec![format!(
            "Tracking summary ({frames} frames, {:.1}s total):",
            elapsed_ms / 1000.0
        )];

        let rate = self.hits as f64 / frames as f64 * 100.0;
        lines.push(format!("  Detections: {}/{frames} ({rate:.1}%)", self.hits));

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let stats = &self.timings[stage];
            let (avg_ms, max_ms) = (stats.mean(), stats.max);
            lines.push(format!(
                "  {stage:12}: avg {avg_ms:6.1}ms  max {max_ms:6.1}ms"
            ));
        }

        let mut names: Vec<_> = self.metrics.keys().collect();
        names.sort();
        for name in names {
            let avg = self.metrics[name].mean();
            lines.push(format!("  {name}: avg {avg:.1}"));
        }

        if elapsed_ms > 0.0 {
            let fps = frames as f64 / (elapsed_ms / 1000.0);
            lines.push(format!("  Throughput: {fps:.1} fps"));
        }

        Some(lines.join("\n"))
    }

    pub fn timings_for(&self, stage: &str) -> Option<&RunningStats> {
        self.timings.get(stage)
    }

    pub fn metrics_for(&self, name: &str) -> Option<&RunningStats> {
        self.metrics.get(name)
    }

    pub fn hits(&self) -> usize {
        self.hits
    }
}

impl Default for SummaryPipelineLogger {
    fn default() -> Self {
        Self::new(30)
    }
}

impl PipelineLogger for SummaryPipelineLogger {
    fn progress(&mut self, current: usize, total: Option<usize>) {
        self.frames = self.frames.max(current);
        if current % self.throttle_frames != 0 && Some(current) != total {
            return;
        }
        match total {
            Some(total) if total > 0 => {
                let pct = current as f64 / total as f64 * 100.0;
                log::info!("Tracking: {current}/{total} frames ({pct:.1}%)");
            }
            _ => log::info!("Tracking: {current} frames"),
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics
            .entry(name.to_string())
            .or_default()
            .push(value);
    }

    fn detection(&mut self, detected: bool) {
        if detected {
            self.hits += 1;
        }
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}

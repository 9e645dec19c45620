use std::collections::HashMap;
use std::time::Instant;

use crate::shared::constants::CAPTION_PREVIEW_LINES;

/// Cross-cutting logger for pipeline orchestration events.
///
/// Decouples use cases from specific output mechanisms (log crate, HTTP
/// handlers, tests) so each caller can observe pipeline behavior without
/// changing the orchestration code. One logger belongs to one request.
pub trait PipelineLogger: Send {
    /// Record how long a named pipeline stage took.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a point-in-time metric (e.g. segment count, audio bytes).
    fn metric(&mut self, name: &str, value: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Record the caption text the request produced. Default: ignored.
    fn captions(&mut self, _srt: &str) {}

    /// Emit an end-of-pipeline summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Logger that forwards messages to the `log` crate and reports per-stage
/// timing, metrics and a short caption preview when the request ends.
pub struct LogPipelineLogger {
    label: String,
    timings: HashMap<String, Vec<f64>>,
    metrics: HashMap<String, Vec<f64>>,
    start_time: Instant,
    preview: Option<String>,
}

impl LogPipelineLogger {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            timings: HashMap::new(),
            metrics: HashMap::new(),
            start_time: Instant::now(),
            preview: None,
        }
    }

    /// Returns the formatted summary string, or `None` if no data recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() && self.metrics.is_empty() && self.preview.is_none() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let mut lines = Vec::new();

        lines.push(format!(
            "Pipeline summary for {} ({:.1}s total):",
            self.label,
            elapsed_ms / 1000.0
        ));

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let total_ms: f64 = self.timings[stage].iter().sum();
            let pct = if elapsed_ms > 0.0 {
                total_ms / elapsed_ms * 100.0
            } else {
                0.0
            };
            lines.push(format!("  {stage:10}: {total_ms:8.0}ms  ({pct:4.1}%)"));
        }

        let mut metric_names: Vec<_> = self.metrics.keys().collect();
        metric_names.sort();
        for name in metric_names {
            let values = &self.metrics[name];
            let last = values.last().copied().unwrap_or_default();
            lines.push(format!("  {name}: {last}"));
        }

        if let Some(preview) = &self.preview {
            lines.push("  Caption preview:".to_string());
            lines.extend(preview.lines().map(|l| format!("    {l}")));
        }

        Some(lines.join("\n"))
    }

    /// Returns the timing data for a given stage.
    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.timings.get(stage).map(|v| v.as_slice())
    }

    /// Returns the metric data for a given name.
    pub fn metrics_for(&self, name: &str) -> Option<&[f64]> {
        self.metrics.get(name).map(|v| v.as_slice())
    }
}

impl PipelineLogger for LogPipelineLogger {
    fn timing(&mut self, stage: &str, duration_ms: f64) {
        log::debug!("{}: {stage} took {duration_ms:.0}ms", self.label);
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

    fn info(&mut self, message: &str) {
        log::info!("{}: {message}", self.label);
    }

    fn captions(&mut self, srt: &str) {
        self.preview = Some(preview_lines(srt, CAPTION_PREVIEW_LINES));
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}

/// First `max_lines` lines of `text`, with `...` appended when truncated.
pub fn preview_lines(text: &str, max_lines: usize) -> String {
    let mut lines = text.lines();
    let head: Vec<&str> = lines.by_ref().take(max_lines).collect();
    let mut preview = head.join("\n");
    if lines.next().is_some() {
        preview.push_str("\n...");
    }
    preview
}

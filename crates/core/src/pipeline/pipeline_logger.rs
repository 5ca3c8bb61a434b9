use std::collections::HashMap;
use std::time::Instant;

/// Cross-cutting logger for subtitle build events.
///
/// Passed into the aligner and use cases so callers decide where progress,
/// recovered alignment problems and stage timings end up (log crate, test
/// capture, nowhere).
pub trait PipelineLogger {
    /// Report group-level progress of an alignment pass.
    fn progress(&mut self, current: usize, total: usize);

    /// Record how long a named pipeline stage took.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a point-in-time metric (e.g. records passed over per group).
    fn metric(&mut self, name: &str, value: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Log a recovered problem: a skipped group, a stopped pass, a fallback.
    fn warn(&mut self, message: &str);

    /// Emit an end-of-pipeline summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn progress(&mut self, _current: usize, _total: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
    fn warn(&mut self, _message: &str) {}
}

/// CLI-oriented logger that forwards to the `log` crate, tracks per-stage
/// timing and metrics, and prints a summary at the end.
///
/// Progress output is throttled to every `throttle_groups` groups.
pub struct StdoutPipelineLogger {
    throttle_groups: usize,
    timings: HashMap<String, Vec<f64>>,
    metrics: HashMap<String, Vec<f64>>,
    start_time: Instant,
    total_groups: usize,
    warnings: usize,
}

impl StdoutPipelineLogger {
    pub fn new(throttle_groups: usize) -> Self {
        Self {
            throttle_groups: throttle_groups.max(1),
            timings: HashMap::new(),
            metrics: HashMap::new(),
            start_time: Instant::now(),
            total_groups: 0,
            warnings: 0,
        }
    }

    /// Returns the formatted summary string, or `None` if no data recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() && self.metrics.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let groups = self.total_groups;
        let mut lines = Vec::new();

        lines.push(format!(
            "Subtitle build summary ({groups} groups, {} warnings, {:.2}s total):",
            self.warnings,
            elapsed_ms / 1000.0
        ));

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let total_ms: f64 = self.timings[stage].iter().sum();
            lines.push(format!("  {stage:12}: {total_ms:8.2}ms"));
        }

        let mut metric_names: Vec<_> = self.metrics.keys().collect();
        metric_names.sort();
        for name in metric_names {
            let values = &self.metrics[name];
            let total: f64 = values.iter().sum();
            let avg = if values.is_empty() {
                0.0
            } else {
                total / values.len() as f64
            };
            lines.push(format!("  {name}: avg {avg:.1}  total {total:.0}"));
        }

        Some(lines.join("\n"))
    }

    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.timings.get(stage).map(|v| v.as_slice())
    }

    pub fn metrics_for(&self, name: &str) -> Option<&[f64]> {
        self.metrics.get(name).map(|v| v.as_slice())
    }

    pub fn warnings(&self) -> usize {
        self.warnings
    }
}

impl Default for StdoutPipelineLogger {
    fn default() -> Self {
        Self::new(100)
    }
}

impl PipelineLogger for StdoutPipelineLogger {
    fn progress(&mut self, current: usize, total: usize) {
        self.total_groups = total;
        if total > 0 && (current % self.throttle_groups == 0 || current == total) {
            let pct = current as f64 / total as f64 * 100.0;
            log::info!("Aligning: {current}/{total} groups ({pct:.1}%)");
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

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn warn(&mut self, message: &str) {
        self.warnings += 1;
        log::warn!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}

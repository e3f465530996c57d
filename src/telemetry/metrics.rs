// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! In-process metrics.
//!
//! Tracks upstream request latency, handler outcomes and protocol message
//! counts. Nothing is exported; the server logs a report at shutdown.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::{Duration, Instant};

use once_cell::sync::Lazy;

/// Global metrics instance.
pub static GLOBAL_METRICS: Lazy<Metrics> = Lazy::new(Metrics::new);

/// Central metrics collection.
#[derive(Debug)]
pub struct Metrics {
    /// Dispatch outcomes keyed by `kind:name` (e.g. `tool:get_verse_by_reference`).
    handlers: RwLock<HashMap<String, HandlerMetrics>>,

    /// Timed operations (upstream requests, service calls).
    operations: RwLock<HashMap<String, OperationMetrics>>,

    messages: MessageCounters,

    start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
            operations: RwLock::new(HashMap::new()),
            messages: MessageCounters::default(),
            start_time: Instant::now(),
        }
    }

    /// Record one handler dispatch.
    pub fn record_handler(&self, name: &str, duration: Duration, success: bool) {
        if let Ok(mut handlers) = self.handlers.write() {
            handlers
                .entry(name.to_string())
                .or_default()
                .record(duration, success);
        }
    }

    /// Record a timed operation.
    pub fn record_operation(&self, name: &str, duration: Duration) {
        if let Ok(mut ops) = self.operations.write() {
            ops.entry(name.to_string()).or_default().record(duration);
        }
    }

    /// Count one handled tool call, resource read or prompt render and whether it failed.
    pub fn record_message(&self, is_error: bool) {
        self.messages.received.fetch_add(1, Ordering::Relaxed);
        if is_error {
            self.messages.errors.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn handler_metrics(&self, name: &str) -> Option<HandlerMetrics> {
        self.handlers.read().ok()?.get(name).cloned()
    }

    pub fn operation_metrics(&self, name: &str) -> Option<OperationMetrics> {
        self.operations.read().ok()?.get(name).cloned()
    }

    /// Take a snapshot of all metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            handlers: self
                .handlers
                .read()
                .map(|h| h.clone())
                .unwrap_or_default(),
            operations: self
                .operations
                .read()
                .map(|o| o.clone())
                .unwrap_or_default(),
            messages: self.messages.received.load(Ordering::Relaxed),
            message_errors: self.messages.errors.load(Ordering::Relaxed),
            uptime: self.start_time.elapsed(),
        }
    }

    /// Reset all metrics.
    pub fn reset(&self) {
        if let Ok(mut handlers) = self.handlers.write() {
            handlers.clear();
        }
        if let Ok(mut ops) = self.operations.write() {
            ops.clear();
        }
        self.messages.received.store(0, Ordering::Relaxed);
        self.messages.errors.store(0, Ordering::Relaxed);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Default)]
struct MessageCounters {
    received: AtomicU64,
    errors: AtomicU64,
}

/// Outcomes for one registered handler.
#[derive(Debug, Clone, Default)]
pub struct HandlerMetrics {
    pub calls: u64,
    pub failures: u64,
    pub total_duration: Duration,
}

impl HandlerMetrics {
    pub fn record(&mut self, duration: Duration, success: bool) {
        self.calls += 1;
        if !success {
            self.failures += 1;
        }
        self.total_duration += duration;
    }

    pub fn avg_duration(&self) -> Duration {
        if self.calls == 0 {
            Duration::ZERO
        } else {
            self.total_duration / self.calls as u32
        }
    }

    /// Fraction of calls that succeeded (1.0 when there were none).
    pub fn success_rate(&self) -> f64 {
        if self.calls == 0 {
            1.0
        } else {
            (self.calls - self.failures) as f64 / self.calls as f64
        }
    }
}

/// Latency summary for a timed operation.
#[derive(Debug, Clone, Default)]
pub struct OperationMetrics {
    pub count: u64,
    pub total_duration: Duration,
    pub max_duration: Duration,
    pub histogram: Histogram,
}

impl OperationMetrics {
    pub fn record(&mut self, duration: Duration) {
        self.count += 1;
        self.total_duration += duration;
        self.max_duration = self.max_duration.max(duration);
        self.histogram.record(duration);
    }

    pub fn avg_duration(&self) -> Duration {
        if self.count == 0 {
            Duration::ZERO
        } else {
            self.total_duration / self.count as u32
        }
    }
}

/// Fixed-bucket latency histogram.
///
/// Buckets are upper bounds in milliseconds, sized for network round trips.
#[derive(Debug, Clone)]
pub struct Histogram {
    bounds_ms: Vec<u64>,
    counts: Vec<u64>,
}

impl Histogram {
    pub fn with_bounds(bounds_ms: Vec<u64>) -> Self {
        let counts = vec![0; bounds_ms.len() + 1];
        Self { bounds_ms, counts }
    }

    pub fn record(&mut self, duration: Duration) {
        let ms = duration.as_millis() as u64;
        let idx = self
            .bounds_ms
            .iter()
            .position(|&b| ms <= b)
            .unwrap_or(self.bounds_ms.len());
        self.counts[idx] += 1;
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Upper bound of the bucket holding the `p`th percentile.
    /// The overflow bucket reports the largest bound.
    pub fn percentile(&self, p: f64) -> Duration {
        let total: u64 = self.counts.iter().sum();
        if total == 0 {
            return Duration::ZERO;
        }

        let target = ((total as f64 * p / 100.0).ceil() as u64).max(1);
        let mut cumulative = 0u64;
        for (i, &count) in self.counts.iter().enumerate() {
            cumulative += count;
            if cumulative >= target {
                let bound = self
                    .bounds_ms
                    .get(i)
                    .or_else(|| self.bounds_ms.last())
                    .copied()
                    .unwrap_or(0);
                return Duration::from_millis(bound);
            }
        }
        Duration::ZERO
    }

    pub fn p99(&self) -> Duration {
        self.percentile(99.0)
    }
}

impl Default for Histogram {
    fn default() -> Self {
        Self::with_bounds(vec![10, 50, 100, 250, 500, 1_000, 5_000, 30_000])
    }
}

/// A snapshot of all metrics at a point in time.
#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub handlers: HashMap<String, HandlerMetrics>,
    pub operations: HashMap<String, OperationMetrics>,
    pub messages: u64,
    pub message_errors: u64,
    pub uptime: Duration,
}

impl MetricsSnapshot {
    /// Format as a human-readable report, sorted by name.
    pub fn format_report(&self) -> String {
        let mut report = String::new();

        report.push_str(&format!("Uptime: {:.2?}\n", self.uptime));
        report.push_str(&format!(
            "Messages: {} received, {} errors\n",
            self.messages, self.message_errors
        ));

        let mut handlers: Vec<_> = self.handlers.iter().collect();
        handlers.sort_by(|a, b| a.0.cmp(b.0));
        for (name, m) in handlers {
            report.push_str(&format!(
                "  {}: {} calls, {:.1}% ok, avg {:.2?}\n",
                name,
                m.calls,
                m.success_rate() * 100.0,
                m.avg_duration()
            ));
        }

        let mut operations: Vec<_> = self.operations.iter().collect();
        operations.sort_by(|a, b| a.0.cmp(b.0));
        for (name, m) in operations {
            report.push_str(&format!(
                "  {}: {} ops, avg {:.2?}, p99 <= {:.2?}\n",
                name,
                m.count,
                m.avg_duration(),
                m.histogram.p99()
            ));
        }

        report
    }
}

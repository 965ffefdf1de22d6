use chrono::{DateTime, Utc};
use serde::Serialize;

/// Immutable record of host metrics, captured once per render request.
#[derive(Clone, Debug, Serialize)]
pub struct MetricsSnapshot {
    /// Global CPU usage sampled over a short interval, clamped to [0, 100].
    pub cpu_usage_percent: f32,
    pub total_memory_bytes: u64,
    /// Always <= `total_memory_bytes`.
    pub used_memory_bytes: u64,
    /// One fractional digit, e.g. "42.7".
    pub memory_percent: String,
    /// Runtime of this process in whole seconds.
    pub uptime_seconds: u64,
    pub runtime_language: String,
    pub runtime_version: String,
    /// Display string from the latency probe. The shipped probe is a
    /// synthetic placeholder, not a measured round-trip.
    pub ping_label: String,
    pub captured_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug)]
pub struct MemoryReading {
    pub total_bytes: u64,
    pub used_bytes: u64,
}

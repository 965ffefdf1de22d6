mod cpu;
mod memory;
mod probe;

pub use cpu::{CpuSampler, DeltaCpuSampler};
pub use probe::{LatencyProbe, SyntheticLatencyProbe};

use crate::error::CollectError;
use crate::format;
use crate::model::MetricsSnapshot;
use chrono::Utc;
use sysinfo::{ProcessesToUpdate, System};

const RUNTIME_LANGUAGE: &str = "Rust";

/// Collects one immutable snapshot per call. Holds no sysinfo state of its
/// own, so concurrent collections cannot interfere with each other.
pub struct MetricsCollector {
    sampler: Box<dyn CpuSampler>,
    probe: Box<dyn LatencyProbe>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            sampler: Box::new(DeltaCpuSampler::default()),
            probe: Box::new(SyntheticLatencyProbe),
        }
    }

    pub fn with_parts(sampler: Box<dyn CpuSampler>, probe: Box<dyn LatencyProbe>) -> Self {
        Self { sampler, probe }
    }

    pub async fn collect(&self) -> Result<MetricsSnapshot, CollectError> {
        let cpu_usage_percent = self.sampler.sample().await?;
        let memory = memory::collect()?;
        let uptime_seconds = process_uptime()?;
        let ping_label = self.probe.measure().await;

        Ok(MetricsSnapshot {
            cpu_usage_percent,
            total_memory_bytes: memory.total_bytes,
            used_memory_bytes: memory.used_bytes,
            memory_percent: format::format_percent(memory.used_bytes, memory.total_bytes),
            uptime_seconds,
            runtime_language: RUNTIME_LANGUAGE.to_string(),
            runtime_version: runtime_version(),
            ping_label,
            captured_at: Utc::now(),
        })
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

fn process_uptime() -> Result<u64, CollectError> {
    let pid = sysinfo::get_current_pid().map_err(|_| CollectError::ProcessUnavailable)?;
    let mut sys = System::new();
    sys.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
    sys.process(pid)
        .map(|p| p.run_time())
        .ok_or(CollectError::ProcessUnavailable)
}

fn runtime_version() -> String {
    option_env!("STATUS_CARD_RUSTC").unwrap_or("unknown").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn snapshot_holds_invariants() {
        let collector = MetricsCollector::new();
        let snapshot = collector.collect().await.expect("metrics available");

        assert!(snapshot.cpu_usage_percent >= 0.0);
        assert!(snapshot.cpu_usage_percent <= 100.0);
        assert!(snapshot.used_memory_bytes <= snapshot.total_memory_bytes);
        assert!(snapshot.total_memory_bytes > 0);

        let pct: f64 = snapshot.memory_percent.parse().expect("numeric percent");
        assert!((0.0..=100.0).contains(&pct));
        assert_eq!(snapshot.runtime_language, "Rust");
    }

    #[tokio::test]
    async fn process_uptime_is_available() {
        assert!(process_uptime().is_ok());
    }
}

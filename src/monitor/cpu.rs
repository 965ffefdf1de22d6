use crate::error::CollectError;
use async_trait::async_trait;
use std::time::Duration;
use sysinfo::System;

/// Strategy for producing one CPU usage figure. Pluggable so a different
/// sampling scheme can be substituted without touching the pipeline.
#[async_trait]
pub trait CpuSampler: Send + Sync {
    /// Global usage percentage in [0, 100].
    async fn sample(&self) -> Result<f32, CollectError>;
}

/// Takes two readings across a short interval and reports the usage over
/// that window. sysinfo needs a minimum gap between refreshes for the
/// delta to be meaningful.
pub struct DeltaCpuSampler {
    interval: Duration,
}

impl DeltaCpuSampler {
    pub fn new(interval: Duration) -> Self {
        let interval = interval.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
        Self { interval }
    }
}

impl Default for DeltaCpuSampler {
    fn default() -> Self {
        Self::new(Duration::from_millis(250))
    }
}

#[async_trait]
impl CpuSampler for DeltaCpuSampler {
    async fn sample(&self) -> Result<f32, CollectError> {
        let mut sys = System::new();
        sys.refresh_cpu_usage();
        if sys.cpus().is_empty() {
            return Err(CollectError::CpuUnavailable);
        }

        tokio::time::sleep(self.interval).await;
        sys.refresh_cpu_usage();

        Ok(sys.global_cpu_usage().clamp(0.0, 100.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sample_stays_in_range() {
        let sampler = DeltaCpuSampler::default();
        let usage = sampler.sample().await.expect("cpus present");
        assert!((0.0..=100.0).contains(&usage));
    }

    #[test]
    fn interval_never_undercuts_sysinfo_minimum() {
        let sampler = DeltaCpuSampler::new(Duration::ZERO);
        assert!(sampler.interval >= sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
    }
}

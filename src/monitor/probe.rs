use async_trait::async_trait;
use rand::Rng;

/// Produces the display string for the latency row. Behind a trait so a
/// real round-trip measurement can replace the stub without touching the
/// rendering code.
#[async_trait]
pub trait LatencyProbe: Send + Sync {
    async fn measure(&self) -> String;
}

/// Placeholder probe. Emits a random figure in the 5..100 ms range; the
/// "≈" prefix marks the value as approximate, not measured telemetry.
pub struct SyntheticLatencyProbe;

#[async_trait]
impl LatencyProbe for SyntheticLatencyProbe {
    async fn measure(&self) -> String {
        let ms: u32 = rand::thread_rng().gen_range(5..100);
        format!("≈ {ms} ms")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn label_is_marked_approximate() {
        let label = SyntheticLatencyProbe.measure().await;
        assert!(label.starts_with("≈ "));
        assert!(label.ends_with(" ms"));

        let figure: u32 = label
            .trim_start_matches("≈ ")
            .trim_end_matches(" ms")
            .parse()
            .expect("numeric figure");
        assert!((5..100).contains(&figure));
    }
}

use crate::background::BackgroundResolver;
use crate::delivery::{Delivery, StagedImage};
use crate::encode::encode_png;
use crate::error::Result;
use crate::model::MetricsSnapshot;
use crate::monitor::MetricsCollector;
use crate::render::{compose, FontCatalog};
use std::path::Path;
use tracing::{debug, info, warn};

pub const CAPTION: &str = "📈 Uptime & System Stats";
pub const FAILURE_NOTICE: &str = "❌ Failed to generate uptime image.";

const FONT_ASSET_DIR: &str = "assets";

/// A fully rendered card, ready for hand-off.
pub struct RenderedCard {
    pub caption: String,
    pub png: Vec<u8>,
}

/// One collector + resolver + font catalog wired together. All per-request
/// state (snapshot, background, pixel buffer, staged bytes) lives inside a
/// single `render`/`handle_request` call, so concurrent requests cannot
/// interfere.
pub struct RenderPipeline {
    collector: MetricsCollector,
    resolver: BackgroundResolver,
    fonts: FontCatalog,
}

impl RenderPipeline {
    pub fn new() -> Self {
        Self {
            collector: MetricsCollector::new(),
            resolver: BackgroundResolver::new(),
            fonts: FontCatalog::resolve(Path::new(FONT_ASSET_DIR)),
        }
    }

    pub fn with_parts(
        collector: MetricsCollector,
        resolver: BackgroundResolver,
        fonts: FontCatalog,
    ) -> Self {
        Self {
            collector,
            resolver,
            fonts,
        }
    }

    /// Runs the metric-to-PNG pipeline once. The background fetch and the
    /// metrics sampling overlap; the fetch is the only suspension point.
    pub async fn render(&self) -> Result<RenderedCard> {
        let (snapshot, background) = tokio::join!(self.collector.collect(), self.resolver.resolve());
        let snapshot: MetricsSnapshot = snapshot?;
        debug!(
            snapshot = %serde_json::to_string(&snapshot).unwrap_or_default(),
            "collected metrics snapshot"
        );

        let buffer = compose(&snapshot, &background, &self.fonts);
        let png = encode_png(&buffer)?;

        Ok(RenderedCard {
            caption: CAPTION.to_string(),
            png,
        })
    }

    /// All-or-nothing boundary: delivers a valid image with caption, or
    /// only the failure notice. No partial image is ever handed off.
    pub async fn handle_request(&self, request_id: &str, delivery: &dyn Delivery) -> Result<()> {
        let staged = async {
            let card = self.render().await?;
            let staged = StagedImage::write(&crate::delivery::staging_dir(), &card.png)?;
            Ok::<_, crate::Error>((card, staged))
        }
        .await;

        match staged {
            Ok((card, staged)) => {
                delivery.deliver_image(&card.caption, &staged).await?;
                info!(request_id, bytes = card.png.len(), "card delivered");
                Ok(())
            }
            Err(err) => {
                warn!(request_id, error = %err, "render failed, delivering notice");
                delivery.deliver_notice(FAILURE_NOTICE).await
            }
        }
    }
}

impl Default for RenderPipeline {
    fn default() -> Self {
        Self::new()
    }
}

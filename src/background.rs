use image::DynamicImage;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

const DEFAULT_URL: &str = "https://i.ibb.co/TDJN13P4/image.jpg";
const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Gradient stops used whenever the remote image cannot be obtained.
pub const GRADIENT_TOP: (u8, u8, u8) = (0x14, 0x1e, 0x30);
pub const GRADIENT_BOTTOM: (u8, u8, u8) = (0x24, 0x3b, 0x55);

/// A resolved background: either a decoded remote image or the synthetic
/// fallback gradient descriptor.
pub enum Background {
    Image(DynamicImage),
    Gradient {
        top: (u8, u8, u8),
        bottom: (u8, u8, u8),
    },
}

impl Background {
    pub fn fallback() -> Self {
        Background::Gradient {
            top: GRADIENT_TOP,
            bottom: GRADIENT_BOTTOM,
        }
    }
}

#[derive(Debug, Error)]
enum FetchError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("payload did not decode as an image: {0}")]
    Decode(#[from] image::ImageError),
}

pub struct BackgroundResolver {
    client: reqwest::Client,
    url: String,
}

impl BackgroundResolver {
    pub fn new() -> Self {
        Self::with_url(DEFAULT_URL)
    }

    /// Used by tests to point at an unreachable endpoint and force the
    /// fallback path.
    pub fn with_url(url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            url: url.into(),
        }
    }

    /// Never fails outward: a degraded background beats an aborted render.
    pub async fn resolve(&self) -> Background {
        match self.fetch().await {
            Ok(image) => Background::Image(image),
            Err(err) => {
                warn!(url = %self.url, error = %err, "background fetch failed, using gradient");
                Background::fallback()
            }
        }
    }

    async fn fetch(&self) -> Result<DynamicImage, FetchError> {
        let bytes = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(image::load_from_memory(&bytes)?)
    }
}

impl Default for BackgroundResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_url_yields_gradient() {
        let resolver = BackgroundResolver::with_url("http://127.0.0.1:9/none.jpg");
        match resolver.resolve().await {
            Background::Gradient { top, bottom } => {
                assert_eq!(top, GRADIENT_TOP);
                assert_eq!(bottom, GRADIENT_BOTTOM);
            }
            Background::Image(_) => panic!("fetch against closed port cannot succeed"),
        }
    }
}

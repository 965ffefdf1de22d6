use crate::error::Result;
use crate::render::PixelBuffer;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

/// Lossless PNG serialization of the composed buffer. Total over every
/// buffer the compositor can produce; a failure here is fatal.
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out).write_image(
        buffer.data(),
        buffer.width(),
        buffer.height(),
        ExtendedColorType::Rgb8,
    )?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::background::Background;
    use crate::model::MetricsSnapshot;
    use crate::render::{compose, FontCatalog};
    use chrono::{TimeZone, Utc};
    use std::path::Path;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

    fn snapshot() -> MetricsSnapshot {
        MetricsSnapshot {
            cpu_usage_percent: 12.0,
            total_memory_bytes: 1024,
            used_memory_bytes: 512,
            memory_percent: "50.0".to_string(),
            uptime_seconds: 59,
            runtime_language: "Rust".to_string(),
            runtime_version: "1.80.0".to_string(),
            ping_label: "≈ 9 ms".to_string(),
            captured_at: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn fallback_render_encodes_to_structurally_valid_png() {
        let fonts = FontCatalog::resolve(Path::new("no-such-assets"));
        let buffer = compose(&snapshot(), &Background::fallback(), &fonts);
        let bytes = encode_png(&buffer).expect("encode");

        assert_eq!(bytes[..8], PNG_MAGIC);
        let decoded = image::load_from_memory(&bytes).expect("decodable");
        assert_eq!(decoded.width(), buffer.width());
        assert_eq!(decoded.height(), buffer.height());
    }
}

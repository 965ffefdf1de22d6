use plotters::style::FontFamily;
use std::path::{Path, PathBuf};
use tracing::debug;

const BOLD_ASSET: &str = "Inter-Bold.ttf";
const REGULAR_ASSET: &str = "Inter-Regular.ttf";
const NAMED_FAMILY: &str = "Inter";

/// Resolved font families for the two text weights. Constructed once and
/// passed into the compositor; a missing or unreadable asset degrades that
/// weight to the platform default family, never to a render failure.
#[derive(Clone, Copy)]
pub struct FontCatalog {
    bold: FontFamily<'static>,
    regular: FontFamily<'static>,
}

impl FontCatalog {
    pub fn resolve(asset_dir: &Path) -> Self {
        Self {
            bold: probe(asset_dir.join(BOLD_ASSET)),
            regular: probe(asset_dir.join(REGULAR_ASSET)),
        }
    }

    pub fn bold(&self) -> FontFamily<'static> {
        self.bold
    }

    pub fn regular(&self) -> FontFamily<'static> {
        self.regular
    }
}

fn probe(path: PathBuf) -> FontFamily<'static> {
    match std::fs::read(&path) {
        Ok(bytes) if is_font_payload(&bytes) => FontFamily::Name(NAMED_FAMILY),
        Ok(_) => {
            debug!(path = %path.display(), "asset is not a font face, using platform default");
            FontFamily::SansSerif
        }
        Err(err) => {
            debug!(path = %path.display(), error = %err, "font asset unavailable, using platform default");
            FontFamily::SansSerif
        }
    }
}

fn is_font_payload(bytes: &[u8]) -> bool {
    // sfnt, OpenType CFF, legacy Apple TrueType and collection headers
    bytes.len() >= 4 && matches!(&bytes[..4], [0, 1, 0, 0] | b"OTTO" | b"true" | b"ttcf")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_assets_fall_back_to_platform_default() {
        let catalog = FontCatalog::resolve(Path::new("no-such-assets"));
        assert!(matches!(catalog.bold(), FontFamily::SansSerif));
        assert!(matches!(catalog.regular(), FontFamily::SansSerif));
    }

    #[test]
    fn non_font_payload_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(BOLD_ASSET), b"not a font").expect("write");
        let catalog = FontCatalog::resolve(dir.path());
        assert!(matches!(catalog.bold(), FontFamily::SansSerif));
    }

    #[test]
    fn sfnt_payload_resolves_named_family() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut bytes = vec![0u8, 1, 0, 0];
        bytes.extend_from_slice(&[0u8; 12]);
        std::fs::write(dir.path().join(REGULAR_ASSET), &bytes).expect("write");
        let catalog = FontCatalog::resolve(dir.path());
        assert!(matches!(catalog.regular(), FontFamily::Name(NAMED_FAMILY)));
    }
}

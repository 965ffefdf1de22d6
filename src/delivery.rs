use crate::error::{Error, Result};
use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

const STAGING_SUBDIR: &str = "status-card";
const STAGED_PREFIX: &str = "card-";
pub const ORPHAN_MAX_AGE: Duration = Duration::from_secs(3600);

/// Outbound hand-off capability. The messaging surface behind it is an
/// external collaborator; the pipeline only guarantees what it hands over.
#[async_trait]
pub trait Delivery: Send + Sync {
    async fn deliver_image(&self, caption: &str, image: &StagedImage) -> Result<()>;
    async fn deliver_notice(&self, text: &str) -> Result<()>;
}

/// Encoded bytes staged on disk for delivery. The backing temp file is
/// removed when this handle drops, on every exit path.
pub struct StagedImage {
    file: NamedTempFile,
}

impl StagedImage {
    pub fn write(dir: &Path, bytes: &[u8]) -> std::io::Result<Self> {
        std::fs::create_dir_all(dir)?;
        let mut file = tempfile::Builder::new()
            .prefix(STAGED_PREFIX)
            .suffix(".png")
            .tempfile_in(dir)?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

pub fn staging_dir() -> PathBuf {
    std::env::temp_dir().join(STAGING_SUBDIR)
}

/// Removes staged files a crashed earlier run left behind. The age guard
/// keeps a concurrently running instance's fresh files untouched.
pub fn sweep_orphans(dir: &Path, max_age: Duration) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return,
    };

    let mut removed = 0usize;
    for entry in entries.flatten() {
        let path = entry.path();
        if !is_stale(&path, max_age) {
            continue;
        }
        match std::fs::remove_file(&path) {
            Ok(()) => removed += 1,
            Err(err) => warn!(path = %path.display(), error = %err, "orphan removal failed"),
        }
    }
    if removed > 0 {
        debug!(removed, dir = %dir.display(), "swept orphaned staged files");
    }
}

fn is_stale(path: &Path, max_age: Duration) -> bool {
    let name_matches = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(STAGED_PREFIX) && n.ends_with(".png"));
    if !name_matches {
        return false;
    }

    std::fs::metadata(path)
        .and_then(|meta| meta.modified())
        .ok()
        .and_then(|modified| SystemTime::now().duration_since(modified).ok())
        .is_some_and(|age| age >= max_age)
}

/// Demo delivery collaborator for the CLI: persists the staged image at a
/// destination path and reports the caption on stdout.
pub struct FileSink {
    dest: PathBuf,
}

impl FileSink {
    pub fn new(dest: PathBuf) -> Self {
        Self { dest }
    }
}

#[async_trait]
impl Delivery for FileSink {
    async fn deliver_image(&self, caption: &str, image: &StagedImage) -> Result<()> {
        std::fs::copy(image.path(), &self.dest)
            .map_err(|err| Error::Delivery(format!("copy to {}: {err}", self.dest.display())))?;
        println!("{caption} -> {}", self.dest.display());
        Ok(())
    }

    async fn deliver_notice(&self, text: &str) -> Result<()> {
        println!("{text}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staged_file_is_released_on_drop() {
        let dir = tempfile::tempdir().expect("tempdir");
        let staged = StagedImage::write(dir.path(), b"png bytes").expect("stage");
        let path = staged.path().to_path_buf();
        assert!(path.exists());

        drop(staged);
        assert!(!path.exists());
    }

    #[test]
    fn sweep_removes_only_stale_staged_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let staged = StagedImage::write(dir.path(), b"bytes").expect("stage");
        let staged_path = staged.path().to_path_buf();
        let unrelated = dir.path().join("keep.txt");
        std::fs::write(&unrelated, b"keep").expect("write");

        // zero max age: everything matching the staging pattern is stale
        sweep_orphans(dir.path(), Duration::ZERO);

        assert!(!staged_path.exists());
        assert!(unrelated.exists());
    }

    #[test]
    fn sweep_keeps_fresh_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let staged = StagedImage::write(dir.path(), b"bytes").expect("stage");

        sweep_orphans(dir.path(), ORPHAN_MAX_AGE);
        assert!(staged.path().exists());
    }

    #[tokio::test]
    async fn file_sink_persists_and_reports() {
        let dir = tempfile::tempdir().expect("tempdir");
        let staged = StagedImage::write(dir.path(), b"png bytes").expect("stage");
        let dest = dir.path().join("out.png");

        let sink = FileSink::new(dest.clone());
        sink.deliver_image("caption", &staged).await.expect("deliver");
        assert_eq!(std::fs::read(&dest).expect("read"), b"png bytes");
    }
}

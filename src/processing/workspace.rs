//! On-disk working directories for uploads and derived text.
//!
//! ```text
//! <data_dir>/uploads/<uuid>_<name>                  raw upload, removed after extraction
//! <data_dir>/preprocessed/preprocessed_<name>.txt   cleaned text written by /summarize
//! <data_dir>/processed/processed_<stem>.txt         cleaned text the index was built from
//! <data_dir>/processed/vectorstore_<name>/          persisted index
//! ```

use std::path::{Path, PathBuf};

use super::sanitize::file_stem;

/// Resolved working directories rooted at the configured data directory.
#[derive(Debug, Clone)]
pub struct Workspace {
    uploads: PathBuf,
    preprocessed: PathBuf,
    processed: PathBuf,
}

impl Workspace {
    /// Workspace rooted at `data_dir`; directories are created by [`Workspace::ensure`].
    pub fn new(data_dir: &Path) -> Self {
        Self {
            uploads: data_dir.join("uploads"),
            preprocessed: data_dir.join("preprocessed"),
            processed: data_dir.join("processed"),
        }
    }

    /// Create every working directory that does not exist yet.
    pub fn ensure(&self) -> std::io::Result<()> {
        for dir in [&self.uploads, &self.preprocessed, &self.processed] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    /// Directory holding processed text and persisted indexes.
    pub fn processed_dir(&self) -> &Path {
        &self.processed
    }

    /// Cleaned-text artifact written before summarizing `filename`.
    pub fn preprocessed_path(&self, filename: &str) -> PathBuf {
        self.preprocessed
            .join(format!("preprocessed_{filename}.txt"))
    }

    /// Canonical cleaned text backing the index for `filename`.
    pub fn processed_text_path(&self, filename: &str) -> PathBuf {
        self.processed
            .join(format!("processed_{}.txt", file_stem(filename)))
    }

    /// Write `bytes` to the uploads directory, returning a guard that deletes the file on drop.
    pub async fn stage_upload(&self, filename: &str, bytes: &[u8]) -> std::io::Result<TempUpload> {
        tokio::fs::create_dir_all(&self.uploads).await?;
        let path = self
            .uploads
            .join(format!("{}_{filename}", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, bytes).await?;
        Ok(TempUpload { path })
    }
}

/// A raw upload on disk, removed when the guard goes out of scope.
#[derive(Debug)]
pub struct TempUpload {
    path: PathBuf,
}

impl TempUpload {
    /// Location of the staged file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempUpload {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "Removed staged upload"),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {}
            Err(error) => {
                tracing::warn!(path = %self.path.display(), error = %error, "Failed to remove staged upload")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn staged_upload_is_removed_on_drop() {
        let dir = tempfile::tempdir().expect("tempdir");
        let workspace = Workspace::new(dir.path());
        let staged = workspace
            .stage_upload("order.txt", b"text")
            .await
            .expect("stage");
        let path = staged.path().to_path_buf();
        assert!(path.exists());
        assert!(path.to_string_lossy().ends_with("_order.txt"));
        drop(staged);
        assert!(!path.exists());
    }

    #[test]
    fn artifact_paths_follow_naming_scheme() {
        let workspace = Workspace::new(Path::new("/data"));
        assert_eq!(
            workspace.preprocessed_path("case.pdf"),
            Path::new("/data/preprocessed/preprocessed_case.pdf.txt")
        );
        assert_eq!(
            workspace.processed_text_path("case.pdf"),
            Path::new("/data/processed/processed_case.txt")
        );
    }

    #[test]
    fn ensure_creates_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let workspace = Workspace::new(dir.path());
        workspace.ensure().expect("ensure");
        assert!(dir.path().join("uploads").is_dir());
        assert!(dir.path().join("preprocessed").is_dir());
        assert!(workspace.processed_dir().is_dir());
    }
}

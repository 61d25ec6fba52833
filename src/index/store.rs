//! On-disk copies of document indexes.

use std::path::PathBuf;

use super::{DocumentIndex, IndexError};

const INDEX_FILE: &str = "index.json";

/// Persists indexes under `<root>/vectorstore_<filename>/index.json`.
#[derive(Debug, Clone)]
pub struct IndexStore {
    root: PathBuf,
}

impl IndexStore {
    /// Store rooted at `root` (normally the processed-documents directory).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the persisted copy for `filename`.
    pub fn index_dir(&self, filename: &str) -> PathBuf {
        self.root.join(format!("vectorstore_{filename}"))
    }

    /// Write `index` to disk, replacing any previous copy for the same filename.
    pub async fn save(&self, index: &DocumentIndex) -> Result<PathBuf, IndexError> {
        let dir = self.index_dir(index.filename());
        tokio::fs::create_dir_all(&dir).await?;
        let path = dir.join(INDEX_FILE);
        let encoded = serde_json::to_vec(index)?;
        let staging = dir.join(format!("{INDEX_FILE}.tmp"));
        tokio::fs::write(&staging, encoded).await?;
        tokio::fs::rename(&staging, &path).await?;
        tracing::debug!(
            filename = index.filename(),
            chunks = index.len(),
            path = %path.display(),
            "Persisted index"
        );
        Ok(path)
    }

    /// Load the persisted copy for `filename`, or `None` when nothing was saved.
    pub async fn load(&self, filename: &str) -> Result<Option<DocumentIndex>, IndexError> {
        let path = self.index_dir(filename).join(INDEX_FILE);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::Chunk;

    #[tokio::test]
    async fn save_then_load_restores_index() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = IndexStore::new(dir.path());
        let index = DocumentIndex::new(
            "order.txt",
            "The writ petition is dismissed.",
            vec![Chunk {
                page_content: "The writ petition is dismissed.".into(),
                source: "processed_order.txt".into(),
            }],
            vec![vec![0.5, 0.5]],
        )
        .expect("index");

        let path = store.save(&index).await.expect("save");
        assert!(path.ends_with("vectorstore_order.txt/index.json"));

        let loaded = store
            .load("order.txt")
            .await
            .expect("load")
            .expect("persisted copy");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.dimension(), 2);
        assert_eq!(loaded.content_hash(), index.content_hash());
    }

    #[tokio::test]
    async fn load_missing_returns_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = IndexStore::new(dir.path());
        assert!(store.load("absent.pdf").await.expect("load").is_none());
    }
}

//! Per-document similarity indexes.
//!
//! A [`DocumentIndex`] owns the retrieval chunks of one uploaded judgment together with their
//! embedding vectors and answers nearest-neighbour queries by cosine similarity. Indexes are
//! written to disk by [`IndexStore`] and kept in memory by the bounded [`IndexCache`].

mod cache;
mod store;

pub use cache::IndexCache;
pub use store::IndexStore;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::cmp::Ordering;
use thiserror::Error;

/// Errors raised while building, querying, or persisting an index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Chunk and vector counts disagree.
    #[error("Received {vectors} vectors for {chunks} chunks")]
    VectorCountMismatch {
        /// Number of chunks supplied.
        chunks: usize,
        /// Number of vectors supplied.
        vectors: usize,
    },
    /// A vector does not match the index dimension.
    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimension of the index.
        expected: usize,
        /// Dimension of the offending vector.
        actual: usize,
    },
    /// Reading or writing the persisted copy failed.
    #[error("Index I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// The persisted copy could not be encoded or decoded.
    #[error("Index serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A contiguous span of cleaned document text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk text.
    pub page_content: String,
    /// Path of the processed text file the chunk came from.
    pub source: String,
}

/// A chunk paired with its similarity to a query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredChunk {
    /// Retrieved chunk.
    pub chunk: Chunk,
    /// Cosine similarity clamped to `[0, 1]`.
    pub score: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct IndexEntry {
    chunk: Chunk,
    vector: Vec<f32>,
}

/// Searchable set of chunks for one uploaded filename.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentIndex {
    filename: String,
    content_hash: String,
    created_at: String,
    dimension: usize,
    entries: Vec<IndexEntry>,
}

impl DocumentIndex {
    /// Assemble an index from chunks and their vectors (same order, same length).
    pub fn new(
        filename: &str,
        content: &str,
        chunks: Vec<Chunk>,
        vectors: Vec<Vec<f32>>,
    ) -> Result<Self, IndexError> {
        if chunks.len() != vectors.len() {
            return Err(IndexError::VectorCountMismatch {
                chunks: chunks.len(),
                vectors: vectors.len(),
            });
        }
        let dimension = vectors.first().map(Vec::len).unwrap_or(0);
        if let Some(bad) = vectors.iter().find(|vector| vector.len() != dimension) {
            return Err(IndexError::DimensionMismatch {
                expected: dimension,
                actual: bad.len(),
            });
        }

        let created_at = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_default();

        Ok(Self {
            filename: filename.to_string(),
            content_hash: content_hash(content),
            created_at,
            dimension,
            entries: chunks
                .into_iter()
                .zip(vectors)
                .map(|(chunk, vector)| IndexEntry { chunk, vector })
                .collect(),
        })
    }

    /// Filename the index was built for.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// SHA-256 of the cleaned text the index was built from.
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    /// Vector dimension shared by every entry.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of indexed chunks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return up to `k` chunks most similar to `query`, best first.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<ScoredChunk>, IndexError> {
        if !self.entries.is_empty() && query.len() != self.dimension {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let mut scored: Vec<ScoredChunk> = self
            .entries
            .iter()
            .map(|entry| ScoredChunk {
                chunk: entry.chunk.clone(),
                score: cosine_similarity(query, &entry.vector).clamp(0.0, 1.0),
            })
            .collect();
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored.truncate(k);
        Ok(scored)
    }
}

/// Hex-encoded SHA-256 of `content`.
pub fn content_hash(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}

/// Cosine similarity in `[-1, 1]`; `0.0` for empty or mismatched vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < f32::EPSILON {
        return 0.0;
    }

    dot / denom
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(text: &str) -> Chunk {
        Chunk {
            page_content: text.into(),
            source: "processed/processed_case.txt".into(),
        }
    }

    fn sample_index() -> DocumentIndex {
        DocumentIndex::new(
            "case.txt",
            "body",
            vec![chunk("bonus"), chunk("strike"), chunk("wages")],
            vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.6, 0.8]],
        )
        .expect("index")
    }

    #[test]
    fn search_orders_by_descending_score() {
        let results = sample_index().search(&[1.0, 0.0], 5).expect("search");
        let texts: Vec<&str> = results
            .iter()
            .map(|hit| hit.chunk.page_content.as_str())
            .collect();
        assert_eq!(texts, vec!["bonus", "wages", "strike"]);
        assert!((results[0].score - 1.0).abs() < 1e-6);
        assert!((results[1].score - 0.6).abs() < 1e-6);
    }

    #[test]
    fn search_truncates_to_k_and_clamps_negative_scores() {
        let results = sample_index().search(&[-1.0, 0.0], 2).expect("search");
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|hit| (0.0..=1.0).contains(&hit.score)));
    }

    #[test]
    fn search_rejects_wrong_dimension() {
        let error = sample_index().search(&[1.0, 0.0, 0.0], 2).unwrap_err();
        assert!(matches!(
            error,
            IndexError::DimensionMismatch {
                expected: 2,
                actual: 3
            }
        ));
    }

    #[test]
    fn new_rejects_count_mismatch() {
        let error = DocumentIndex::new("a.txt", "x", vec![chunk("a")], Vec::new()).unwrap_err();
        assert!(matches!(error, IndexError::VectorCountMismatch { .. }));
    }

    #[test]
    fn content_hash_is_stable_hex() {
        let hash = sample_index().content_hash().to_string();
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, content_hash("body"));
    }

    #[test]
    fn cosine_of_orthogonal_vectors_is_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }
}

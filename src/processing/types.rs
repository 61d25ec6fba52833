//! Core data types and error definitions for the processing pipeline.

use crate::{
    embedding::EmbeddingClientError, extract::ExtractError, index::IndexError,
    index::ScoredChunk,
};
use serde::Serialize;
use thiserror::Error;

/// Errors produced while splitting text into chunks.
#[derive(Debug, Error)]
pub enum ChunkingError {
    /// The configured character budget is zero.
    #[error("chunk size must be greater than zero")]
    InvalidChunkSize,
    /// Overlap must leave room for new content in every chunk.
    #[error("chunk overlap {overlap} must be smaller than chunk size {chunk_size}")]
    OverlapTooLarge {
        /// Requested overlap in characters.
        overlap: usize,
        /// Requested chunk size in characters.
        chunk_size: usize,
    },
}

/// Errors emitted by the document processing pipeline.
#[derive(Debug, Error)]
pub enum ProcessingError {
    /// No summarization model is configured.
    #[error("Model not loaded")]
    ModelUnavailable,
    /// The upload produced no usable text.
    #[error("Document contains no extractable text")]
    EmptyDocument,
    /// The uploaded file could not be parsed.
    #[error(transparent)]
    Extraction(#[from] ExtractError),
    /// Chunking step failed to segment the document.
    #[error("Failed to chunk document: {0}")]
    Chunking(#[from] ChunkingError),
    /// Embedding provider failed to produce vectors.
    #[error(transparent)]
    Embedding(#[from] EmbeddingClientError),
    /// Index construction, search, or persistence failed.
    #[error(transparent)]
    Index(#[from] IndexError),
    /// Every chunk summary came back empty.
    #[error("Failed to generate summary - empty result")]
    EmptySummary,
    /// Writing workspace files failed.
    #[error("Workspace I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// A blocking extraction task panicked or was cancelled.
    #[error("Background task failed: {0}")]
    Task(String),
}

/// A file received through a multipart upload.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-supplied filename, not yet sanitized.
    pub filename: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

/// Result of summarizing one uploaded document.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryOutcome {
    /// Normalized summary text.
    pub summary: String,
    /// Sanitized filename.
    pub filename: String,
    /// Wall-clock seconds spent in the summarizer.
    pub processing_secs: f64,
    /// Whitespace-delimited words in the cleaned text.
    pub word_count: usize,
    /// Whitespace-delimited words in the summary.
    pub summary_length: usize,
}

/// Result of indexing one uploaded document.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexOutcome {
    /// Sanitized filename the index is keyed by.
    pub filename: String,
    /// Number of retrieval chunks embedded.
    pub chunk_count: usize,
}

/// A passage surfaced in an accepted answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    /// Chunk text.
    pub content: String,
    /// Similarity to the question in `[0, 1]`.
    pub score: f32,
}

impl From<&ScoredChunk> for Section {
    fn from(hit: &ScoredChunk) -> Self {
        Self {
            content: hit.chunk.page_content.clone(),
            score: hit.score,
        }
    }
}

/// Outcome of the relevance gate for a question.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerKind {
    /// The question passed the gate; qualifying sections follow in score order.
    Relevant(Vec<Section>),
    /// The question was rejected; carries the message picked for the user.
    Irrelevant(String),
}

/// Answer to a question about an uploaded document.
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    /// Sanitized filename the question was asked against.
    pub filename: String,
    /// Gate decision and payload.
    pub kind: AnswerKind,
}

/// Readiness snapshot reported by `GET /health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthSnapshot {
    /// Whether a summarization model is configured.
    pub model_loaded: bool,
    /// Character budget per summary chunk.
    pub chunk_size: usize,
    /// Base maximum summary length.
    pub default_max_length: usize,
    /// Base minimum summary length.
    pub default_min_length: usize,
}

/// Errors raised while wiring the processing service at startup.
#[derive(Debug, Error)]
pub enum InitError {
    /// The embedding client could not be constructed.
    #[error(transparent)]
    Embedding(#[from] EmbeddingClientError),
    /// The summarization client could not be constructed.
    #[error(transparent)]
    Summarization(#[from] crate::summarization::SummarizationClientError),
    /// The translation providers could not be constructed.
    #[error("Failed to initialize translation providers: {0}")]
    Translation(#[from] crate::translation::ProviderError),
    /// The data directories could not be created.
    #[error("Failed to prepare data directory: {0}")]
    Io(#[from] std::io::Error),
}

//! Document processing pipeline: cleaning, chunking, summarization, and retrieval.

pub mod chunking;
pub mod preprocess;
pub mod sanitize;
mod service;
pub mod summarize;
pub mod types;
pub mod workspace;

pub use service::{LegalApi, ProcessingService};
pub use types::{
    Answer, AnswerKind, ChunkingError, HealthSnapshot, IndexOutcome, InitError, ProcessingError,
    Section, SummaryOutcome, UploadedFile,
};

#![deny(missing_docs)]

//! Core library for the LexiMind legal document service.

/// HTTP routing and REST handlers.
pub mod api;
/// Environment-driven configuration management.
pub mod config;
/// Embedding client abstraction and adapters.
pub mod embedding;
/// Text extraction for uploaded documents.
pub mod extract;
/// In-memory retrieval indexes, their cache, and on-disk persistence.
pub mod index;
/// Structured logging and tracing setup.
pub mod logging;
/// Request counters.
pub mod metrics;
/// Document processing pipeline utilities.
pub mod processing;
/// Per-client request throttling.
pub mod rate_limit;
/// Legal-domain relevance gate for questions.
pub mod relevance;
/// Summarization client abstraction and adapters.
pub mod summarization;
/// Translation providers with fallback and caching.
pub mod translation;

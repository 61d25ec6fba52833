use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters describing request activity.
#[derive(Default)]
pub struct ServiceMetrics {
    documents_summarized: AtomicU64,
    documents_indexed: AtomicU64,
    chunks_indexed: AtomicU64,
    questions_answered: AtomicU64,
    questions_rejected: AtomicU64,
    translations_served: AtomicU64,
    rate_limited: AtomicU64,
}

impl ServiceMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a summarized document.
    pub fn record_summary(&self) {
        self.documents_summarized.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a freshly built index and the number of chunks it holds.
    pub fn record_index(&self, chunk_count: u64) {
        self.documents_indexed.fetch_add(1, Ordering::Relaxed);
        self.chunks_indexed
            .fetch_add(chunk_count, Ordering::Relaxed);
    }

    /// Record the outcome of the relevance gate for one question.
    pub fn record_question(&self, relevant: bool) {
        if relevant {
            self.questions_answered.fetch_add(1, Ordering::Relaxed);
        } else {
            self.questions_rejected.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a completed translation request.
    pub fn record_translation(&self) {
        self.translations_served.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a request turned away by the rate limiter.
    pub fn record_rate_limited(&self) {
        self.rate_limited.fetch_add(1, Ordering::Relaxed);
    }

    /// Return a snapshot of the current counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            documents_summarized: self.documents_summarized.load(Ordering::Relaxed),
            documents_indexed: self.documents_indexed.load(Ordering::Relaxed),
            chunks_indexed: self.chunks_indexed.load(Ordering::Relaxed),
            questions_answered: self.questions_answered.load(Ordering::Relaxed),
            questions_rejected: self.questions_rejected.load(Ordering::Relaxed),
            translations_served: self.translations_served.load(Ordering::Relaxed),
            rate_limited: self.rate_limited.load(Ordering::Relaxed),
        }
    }
}

/// Immutable view of service counters used for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct MetricsSnapshot {
    /// Documents summarized since startup.
    pub documents_summarized: u64,
    /// Indexes built since startup (cache and disk hits excluded).
    pub documents_indexed: u64,
    /// Total chunks across all built indexes.
    pub chunks_indexed: u64,
    /// Questions that passed the relevance gate.
    pub questions_answered: u64,
    /// Questions answered with an irrelevant-response message.
    pub questions_rejected: u64,
    /// Successful translation requests.
    pub translations_served: u64,
    /// Requests rejected by the rate limiter.
    pub rate_limited: u64,
}

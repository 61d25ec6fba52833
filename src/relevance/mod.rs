//! Relevance gate for questions about an uploaded judgment.
//!
//! A question is answered only when retrieval found a strong match, the text reads like a
//! question, and both the question and a strong match use legal vocabulary. Rejected questions
//! receive one of a fixed set of polite refusals chosen by a [`ResponsePicker`].

mod gazetteer;

pub use gazetteer::LEGAL_TERMS;

use crate::index::ScoredChunk;
use rand::seq::SliceRandom;

/// Minimum distinct gazetteer hits for text to count as legal.
pub const MIN_LEGAL_TERMS: usize = 2;

/// Interrogatives that mark a query as a question wherever they appear, even inside longer
/// words ("show" contains "how").
pub const INTERROGATIVES: [&str; 7] = ["who", "what", "when", "where", "why", "how", "explain"];

/// Messages returned when a question is rejected.
pub const IRRELEVANT_RESPONSES: [&str; 5] = [
    "This question appears unrelated to the legal judgment document.",
    "The system only answers questions specifically about the uploaded court judgment.",
    "Your question doesn't appear relevant to this legal document.",
    "For questions about this specific judgment, please reference the case details.",
    "I can only answer questions about the legal judgment document.",
];

/// Number of distinct gazetteer entries found in `text` (case-insensitive substring match).
pub fn legal_term_count(text: &str) -> usize {
    let lowered = text.to_lowercase();
    LEGAL_TERMS
        .iter()
        .filter(|term| lowered.contains(*term))
        .count()
}

/// Whether `text` mentions at least [`MIN_LEGAL_TERMS`] legal terms.
pub fn contains_legal_terms(text: &str) -> bool {
    !text.is_empty() && legal_term_count(text) >= MIN_LEGAL_TERMS
}

/// Whether `query` ends with `?` or contains an interrogative as a substring.
pub fn looks_like_question(query: &str) -> bool {
    let lowered = query.trim().to_lowercase();
    lowered.ends_with('?') || INTERROGATIVES.iter().any(|word| lowered.contains(word))
}

/// Score, shape, and domain checks applied to retrieval results.
#[derive(Debug, Clone, Copy)]
pub struct RelevanceGate {
    threshold: f32,
}

impl RelevanceGate {
    /// Gate accepting chunks scoring at least `threshold`.
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    /// Decide whether `query` should be answered from `hits`.
    pub fn is_relevant(&self, query: &str, hits: &[ScoredChunk]) -> bool {
        if !hits.iter().any(|hit| hit.score >= self.threshold) {
            return false;
        }
        if !looks_like_question(query) {
            return false;
        }
        if !contains_legal_terms(query) {
            return false;
        }
        hits.iter()
            .filter(|hit| hit.score >= self.threshold)
            .any(|hit| contains_legal_terms(&hit.chunk.page_content))
    }

    /// Hits that clear the score threshold and use legal vocabulary, in input order.
    pub fn qualifying<'a>(&self, hits: &'a [ScoredChunk]) -> Vec<&'a ScoredChunk> {
        hits.iter()
            .filter(|hit| hit.score >= self.threshold && contains_legal_terms(&hit.chunk.page_content))
            .collect()
    }
}

/// Chooses the refusal shown for a rejected question.
pub trait ResponsePicker: Send + Sync {
    /// Pick one of `responses`.
    fn pick(&self, responses: &[&'static str]) -> &'static str;
}

/// Uniformly random choice.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPicker;

impl ResponsePicker for RandomPicker {
    fn pick(&self, responses: &[&'static str]) -> &'static str {
        responses
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(IRRELEVANT_RESPONSES[0])
    }
}

/// Always returns the response at a fixed position (wrapping).
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedPicker(pub usize);

impl ResponsePicker for FixedPicker {
    fn pick(&self, responses: &[&'static str]) -> &'static str {
        if responses.is_empty() {
            return IRRELEVANT_RESPONSES[0];
        }
        responses[self.0 % responses.len()]
    }
}

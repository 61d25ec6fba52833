//! Parallel chunked summarization.
//!
//! Long judgments exceed the summarizer's input window, so the text is packed into bounded
//! word chunks, each chunk is summarized independently, and the partial summaries are stitched
//! back together in document order. Chunk calls run concurrently up to a fixed width; results are
//! collected with an order-preserving buffered stream so completion order never leaks into the
//! output.

use crate::summarization::{GenerationParameters, SummarizationClient, SummarizationRequest};
use futures_util::{StreamExt, stream};
use regex::Regex;
use std::sync::OnceLock;

use super::chunking::pack_words;

/// Hard ceiling on the adaptive maximum summary length.
pub const MAX_LENGTH_CEILING: usize = 512;
/// Hard ceiling on the adaptive minimum summary length.
pub const MIN_LENGTH_CEILING: usize = 256;

/// Per-document summary length targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthTargets {
    /// Upper bound handed to the model for every chunk.
    pub max_length: usize,
    /// Lower bound handed to the model for every chunk.
    pub min_length: usize,
}

/// Splits text, fans chunk summaries out to the model, and joins the results.
pub struct ParallelSummarizer<'a> {
    client: &'a (dyn SummarizationClient + Send + Sync),
    chunk_size: usize,
    base_max_length: usize,
    base_min_length: usize,
    concurrency: usize,
}

impl<'a> ParallelSummarizer<'a> {
    /// Summarizer over `client` packing chunks of at most `chunk_size` characters.
    pub fn new(
        client: &'a (dyn SummarizationClient + Send + Sync),
        chunk_size: usize,
        base_max_length: usize,
        base_min_length: usize,
        concurrency: usize,
    ) -> Self {
        Self {
            client,
            chunk_size,
            base_max_length,
            base_min_length,
            concurrency: concurrency.max(1),
        }
    }

    /// Length targets scaled by document size.
    ///
    /// `max = min(base_max + words / 100, 512)` and `min = min(base_min + words / 200, 256)`;
    /// either bound can be pinned by the caller.
    pub fn length_targets(
        &self,
        word_count: usize,
        max_override: Option<usize>,
        min_override: Option<usize>,
    ) -> LengthTargets {
        LengthTargets {
            max_length: max_override
                .unwrap_or_else(|| (self.base_max_length + word_count / 100).min(MAX_LENGTH_CEILING)),
            min_length: min_override
                .unwrap_or_else(|| (self.base_min_length + word_count / 200).min(MIN_LENGTH_CEILING)),
        }
    }

    /// Summarize `text` with adaptive length targets.
    pub async fn summarize(&self, text: &str) -> String {
        self.summarize_with_lengths(text, None, None).await
    }

    /// Summarize `text`, optionally pinning either length bound.
    ///
    /// Returns an empty string for blank input. A chunk whose call fails contributes nothing.
    pub async fn summarize_with_lengths(
        &self,
        text: &str,
        max_override: Option<usize>,
        min_override: Option<usize>,
    ) -> String {
        if text.trim().is_empty() {
            return String::new();
        }

        let word_count = text.split_whitespace().count();
        let targets = self.length_targets(word_count, max_override, min_override);
        let parameters = GenerationParameters::with_lengths(targets.max_length, targets.min_length);
        let chunks = pack_words(text, self.chunk_size);
        tracing::debug!(
            words = word_count,
            chunks = chunks.len(),
            max_length = targets.max_length,
            min_length = targets.min_length,
            concurrency = self.concurrency,
            "Summarizing document"
        );

        let summaries: Vec<String> = stream::iter(chunks.into_iter().enumerate())
            .map(|(position, chunk)| self.summarize_chunk(position, chunk, parameters))
            .buffered(self.concurrency)
            .collect()
            .await;

        let joined = summaries
            .iter()
            .map(String::as_str)
            .filter(|summary| !summary.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        normalize_summary(&joined)
    }

    async fn summarize_chunk(
        &self,
        position: usize,
        text: String,
        parameters: GenerationParameters,
    ) -> String {
        let request = SummarizationRequest { text, parameters };
        match self.client.generate_summary(request).await {
            Ok(summary) => summary,
            Err(error) => {
                tracing::error!(chunk = position, error = %error, "Error summarizing chunk");
                String::new()
            }
        }
    }
}

struct SummaryPatterns {
    space_before_punctuation: Regex,
    doubled_period: Regex,
    whitespace: Regex,
}

static SUMMARY_PATTERNS: OnceLock<Result<SummaryPatterns, regex::Error>> = OnceLock::new();

fn compile_summary_patterns() -> Result<SummaryPatterns, regex::Error> {
    Ok(SummaryPatterns {
        space_before_punctuation: Regex::new(r"\s+([.,;:])")?,
        doubled_period: Regex::new(r"\.\s+\.")?,
        whitespace: Regex::new(r"\s+")?,
    })
}

/// Tidy stitched summaries: no space before punctuation, no doubled periods, single spaces.
pub fn normalize_summary(summary: &str) -> String {
    match SUMMARY_PATTERNS.get_or_init(compile_summary_patterns) {
        Ok(patterns) => {
            let text = patterns
                .space_before_punctuation
                .replace_all(summary, "$1");
            let text = patterns.doubled_period.replace_all(&text, ".");
            patterns.whitespace.replace_all(&text, " ").trim().to_string()
        }
        Err(error) => {
            tracing::error!(error = %error, "Summary patterns unavailable; collapsing whitespace only");
            summary.split_whitespace().collect::<Vec<_>>().join(" ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summarization::SummarizationClientError;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Echoes the first word of each chunk, sleeping longer for earlier chunks.
    struct EchoClient {
        calls: Mutex<Vec<SummarizationRequest>>,
        fail_on: Option<&'static str>,
    }

    impl EchoClient {
        fn new(fail_on: Option<&'static str>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_on,
            }
        }
    }

    #[async_trait]
    impl SummarizationClient for EchoClient {
        async fn generate_summary(
            &self,
            request: SummarizationRequest,
        ) -> Result<String, SummarizationClientError> {
            let first = request
                .text
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_string();
            self.calls.lock().unwrap().push(request);
            let delay = match first.as_str() {
                "alpha" => 30,
                "beta" => 15,
                _ => 0,
            };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            if self.fail_on == Some(first.as_str()) {
                return Err(SummarizationClientError::GenerationFailed("boom".into()));
            }
            Ok(format!("{first} ."))
        }
    }

    fn summarizer(client: &EchoClient, chunk_size: usize) -> ParallelSummarizer<'_> {
        ParallelSummarizer::new(client, chunk_size, 300, 100, 4)
    }

    #[tokio::test]
    async fn preserves_chunk_order_despite_completion_order() {
        let client = EchoClient::new(None);
        let summary = summarizer(&client, 11)
            .summarize("alpha one beta two gamma three")
            .await;
        assert_eq!(summary, "alpha. beta. gamma.");
        assert_eq!(client.calls.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn failed_chunks_are_skipped() {
        let client = EchoClient::new(Some("beta"));
        let summary = summarizer(&client, 11)
            .summarize("alpha one beta two gamma three")
            .await;
        assert_eq!(summary, "alpha. gamma.");
    }

    #[tokio::test]
    async fn short_text_is_single_chunk_summary() {
        let client = EchoClient::new(None);
        let summary = summarizer(&client, 1024)
            .summarize("gamma ray judgment on appeal")
            .await;
        assert_eq!(summary, "gamma.");
        assert_eq!(client.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn blank_text_skips_model() {
        let client = EchoClient::new(None);
        assert_eq!(summarizer(&client, 1024).summarize("  \n ").await, "");
        assert!(client.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn forwards_adaptive_lengths() {
        let client = EchoClient::new(None);
        let text = "word ".repeat(5000);
        summarizer(&client, 100_000).summarize(&text).await;
        let calls = client.calls.lock().unwrap();
        assert_eq!(calls[0].parameters.max_length, 350);
        assert_eq!(calls[0].parameters.min_length, 125);
        assert_eq!(calls[0].parameters.num_beams, 4);
    }

    #[test]
    fn length_targets_are_capped_and_overridable() {
        let client = EchoClient::new(None);
        let summarizer = summarizer(&client, 1024);
        assert_eq!(
            summarizer.length_targets(1_000_000, None, None),
            LengthTargets {
                max_length: 512,
                min_length: 256
            }
        );
        assert_eq!(
            summarizer.length_targets(250, Some(80), None),
            LengthTargets {
                max_length: 80,
                min_length: 101
            }
        );
    }

    #[test]
    fn normalize_summary_fixes_spacing_and_periods() {
        assert_eq!(
            normalize_summary("The appeal  is allowed . Costs ; none ,\n awarded ."),
            "The appeal is allowed. Costs; none, awarded."
        );
    }
}

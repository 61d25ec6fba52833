//! Client abstraction for the pretrained seq2seq summarizer.
//!
//! The model runs out of process behind an inference endpoint that accepts
//! `{"inputs": ..., "parameters": {...}}` and answers `[{"summary_text": ...}]`. Decoding
//! parameters mirror the legal T5 checkpoint the service was tuned against: beam search of
//! width 4, trigram blocking, a length penalty of 1.5, and early stopping.

use crate::config::Config;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced while attempting abstractive summarization.
#[derive(Debug, Error)]
pub enum SummarizationClientError {
    /// Provider was unreachable or the client could not be built.
    #[error("Summarization provider unavailable: {0}")]
    ProviderUnavailable(String),
    /// Provider returned an error response.
    #[error("Failed to generate summary: {0}")]
    GenerationFailed(String),
    /// Provider response could not be parsed.
    #[error("Malformed provider response: {0}")]
    InvalidResponse(String),
}

/// Decoding parameters forwarded to the summarization model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationParameters {
    /// Upper bound on generated tokens.
    pub max_length: usize,
    /// Lower bound on generated tokens.
    pub min_length: usize,
    /// Exponential length penalty applied during beam search.
    pub length_penalty: f32,
    /// Beam width.
    pub num_beams: usize,
    /// Size of n-grams that may not repeat.
    pub no_repeat_ngram_size: usize,
    /// Stop once every beam has finished.
    pub early_stopping: bool,
}

impl GenerationParameters {
    /// Standard decoding settings with the supplied length bounds.
    pub fn with_lengths(max_length: usize, min_length: usize) -> Self {
        Self {
            max_length,
            min_length,
            length_penalty: 1.5,
            num_beams: 4,
            no_repeat_ngram_size: 3,
            early_stopping: true,
        }
    }
}

/// Request payload passed to the summarization provider.
#[derive(Debug, Clone)]
pub struct SummarizationRequest {
    /// Text of a single chunk to summarize.
    pub text: String,
    /// Decoding parameters for this call.
    pub parameters: GenerationParameters,
}

/// Interface implemented by abstractive summarization providers.
#[async_trait]
pub trait SummarizationClient: Send + Sync {
    /// Summarize one chunk of text.
    async fn generate_summary(
        &self,
        request: SummarizationRequest,
    ) -> Result<String, SummarizationClientError>;
}

/// Build a summarization client from configuration; `None` when no endpoint is configured.
pub fn get_summarization_client(
    config: &Config,
) -> Result<Option<Box<dyn SummarizationClient + Send + Sync>>, SummarizationClientError> {
    match &config.summarizer_url {
        None => Ok(None),
        Some(url) => Ok(Some(Box::new(InferenceSummarizationClient::new(
            url.clone(),
            config.summarizer_model.clone(),
            config.summarizer_api_token.clone(),
        )?))),
    }
}

/// HTTP client for a hosted seq2seq inference endpoint.
pub struct InferenceSummarizationClient {
    http: Client,
    endpoint: String,
    model: String,
    api_token: Option<String>,
}

impl InferenceSummarizationClient {
    /// Build a client posting to `endpoint`.
    pub fn new(
        endpoint: String,
        model: String,
        api_token: Option<String>,
    ) -> Result<Self, SummarizationClientError> {
        let http = Client::builder()
            .user_agent("leximind/summary")
            .build()
            .map_err(|error| SummarizationClientError::ProviderUnavailable(error.to_string()))?;
        Ok(Self {
            http,
            endpoint,
            model,
            api_token,
        })
    }
}

#[derive(Debug, Deserialize)]
struct SummaryItem {
    summary_text: String,
}

#[async_trait]
impl SummarizationClient for InferenceSummarizationClient {
    async fn generate_summary(
        &self,
        request: SummarizationRequest,
    ) -> Result<String, SummarizationClientError> {
        let payload = json!({
            "model": self.model,
            "inputs": request.text,
            "parameters": request.parameters,
        });

        let mut builder = self.http.post(&self.endpoint).json(&payload);
        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|error| {
            SummarizationClientError::ProviderUnavailable(format!(
                "failed to reach summarizer at {}: {error}",
                self.endpoint
            ))
        })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(SummarizationClientError::ProviderUnavailable(format!(
                "summarizer endpoint {} returned 404",
                self.endpoint
            )));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizationClientError::GenerationFailed(format!(
                "summarizer returned {status}: {body}"
            )));
        }

        let items: Vec<SummaryItem> = response.json().await.map_err(|error| {
            SummarizationClientError::InvalidResponse(format!(
                "failed to decode summarizer response: {error}"
            ))
        })?;

        items
            .into_iter()
            .next()
            .map(|item| item.summary_text.trim().to_string())
            .ok_or_else(|| {
                SummarizationClientError::InvalidResponse("summarizer returned no items".into())
            })
    }
}

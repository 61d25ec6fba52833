//! Processing service coordinating extraction, summarization, indexing, and question answering.

use crate::{
    config::Config,
    embedding::{EmbeddingClient, EmbeddingClientError, get_embedding_client},
    extract::extract_text_from_file,
    index::{Chunk, DocumentIndex, IndexCache, IndexStore},
    metrics::{MetricsSnapshot, ServiceMetrics},
    processing::{
        chunking::split_recursive,
        preprocess::preprocess_text,
        sanitize::{count_words, secure_filename},
        summarize::ParallelSummarizer,
        types::{
            Answer, AnswerKind, HealthSnapshot, IndexOutcome, InitError, ProcessingError, Section,
            SummaryOutcome, UploadedFile,
        },
        workspace::Workspace,
    },
    relevance::{IRRELEVANT_RESPONSES, RandomPicker, RelevanceGate, ResponsePicker},
    summarization::{SummarizationClient, get_summarization_client},
    translation::{TranslationError, TranslationOutcome, Translator},
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

/// Abstraction over the pipeline consumed by the HTTP surface.
#[async_trait]
pub trait LegalApi: Send + Sync {
    /// Readiness details for `GET /health`.
    fn health(&self) -> HealthSnapshot;

    /// Extract, clean, and summarize an uploaded judgment.
    async fn summarize_document(&self, upload: UploadedFile)
    -> Result<SummaryOutcome, ProcessingError>;

    /// Build, persist, and cache the retrieval index for an uploaded judgment.
    async fn index_document(&self, upload: UploadedFile) -> Result<IndexOutcome, ProcessingError>;

    /// Answer `question` against the index for `upload`, building it if needed.
    async fn answer_question(
        &self,
        upload: UploadedFile,
        question: String,
    ) -> Result<Answer, ProcessingError>;

    /// Translate English `text` into `target_lang`.
    async fn translate(
        &self,
        text: String,
        target_lang: String,
        chunked: bool,
    ) -> Result<TranslationOutcome, TranslationError>;

    /// Count a request rejected by the rate limiter.
    fn record_rate_limited(&self);

    /// Retrieve the current metrics snapshot for diagnostics.
    fn metrics_snapshot(&self) -> MetricsSnapshot;
}

/// Owns the model clients, index storage, and shared caches.
///
/// Construct once near process start and share through an `Arc`.
pub struct ProcessingService {
    config: Config,
    embedding_client: Box<dyn EmbeddingClient + Send + Sync>,
    summarization_client: Option<Box<dyn SummarizationClient + Send + Sync>>,
    translator: Translator,
    workspace: Workspace,
    store: IndexStore,
    cache: IndexCache,
    gate: RelevanceGate,
    picker: Box<dyn ResponsePicker>,
    metrics: Arc<ServiceMetrics>,
}

impl ProcessingService {
    /// Build the service from configuration, creating the data directories.
    pub fn new(config: &Config) -> Result<Self, InitError> {
        tracing::info!(provider = ?config.embedding_provider, "Initializing embedding client");
        let embedding_client = get_embedding_client(config)?;
        let summarization_client = get_summarization_client(config)?;
        if summarization_client.is_none() {
            tracing::warn!("SUMMARIZER_URL not set; /summarize will report the model as unavailable");
        }
        let translator = Translator::from_config(config)?;
        Self::from_parts(config, embedding_client, summarization_client, translator)
    }

    /// Build the service around explicit clients.
    pub fn from_parts(
        config: &Config,
        embedding_client: Box<dyn EmbeddingClient + Send + Sync>,
        summarization_client: Option<Box<dyn SummarizationClient + Send + Sync>>,
        translator: Translator,
    ) -> Result<Self, InitError> {
        let workspace = Workspace::new(&config.data_dir);
        workspace.ensure()?;
        let store = IndexStore::new(workspace.processed_dir());
        tracing::debug!(data_dir = %config.data_dir.display(), "Workspace ready");

        Ok(Self {
            config: config.clone(),
            embedding_client,
            summarization_client,
            translator,
            workspace,
            store,
            cache: IndexCache::new(config.index_cache_capacity),
            gate: RelevanceGate::new(config.relevance_score_threshold),
            picker: Box::new(RandomPicker),
            metrics: Arc::new(ServiceMetrics::new()),
        })
    }

    /// Replace the strategy choosing refusals for irrelevant questions.
    pub fn with_picker(mut self, picker: Box<dyn ResponsePicker>) -> Self {
        self.picker = picker;
        self
    }

    /// Number of indexes held in memory.
    pub fn cached_indexes(&self) -> usize {
        self.cache.len()
    }

    /// Stage the upload, extract its text off the async runtime, and remove the staged file.
    async fn extract_upload(
        &self,
        filename: &str,
        bytes: &[u8],
    ) -> Result<String, ProcessingError> {
        let staged = self.workspace.stage_upload(filename, bytes).await?;
        let path = staged.path().to_path_buf();
        let name = filename.to_string();
        let extracted = tokio::task::spawn_blocking(move || extract_text_from_file(&path, &name))
            .await
            .map_err(|error| ProcessingError::Task(error.to_string()))?;
        drop(staged);
        Ok(extracted?)
    }

    /// Split cleaned text, embed every chunk, and assemble the index.
    async fn build_index(
        &self,
        cleaned: &str,
        filename: &str,
    ) -> Result<DocumentIndex, ProcessingError> {
        let processed_path = self.workspace.processed_text_path(filename);
        tokio::fs::write(&processed_path, cleaned).await?;
        let source = processed_path.display().to_string();

        let pieces = split_recursive(
            cleaned,
            self.config.text_splitter_chunk_size,
            self.config.text_splitter_chunk_overlap,
        )?;
        if pieces.is_empty() {
            return Err(ProcessingError::EmptyDocument);
        }
        tracing::debug!(
            filename,
            chunks = pieces.len(),
            chunk_size = self.config.text_splitter_chunk_size,
            overlap = self.config.text_splitter_chunk_overlap,
            "Split document for indexing"
        );

        let vectors = self
            .embedding_client
            .generate_embeddings(pieces.clone())
            .await?;
        let chunks = pieces
            .into_iter()
            .map(|page_content| Chunk {
                page_content,
                source: source.clone(),
            })
            .collect();
        Ok(DocumentIndex::new(filename, cleaned, chunks, vectors)?)
    }

    /// Extract, clean, index, persist, and cache `bytes` under `filename`.
    async fn ingest(
        &self,
        filename: &str,
        bytes: &[u8],
    ) -> Result<Arc<DocumentIndex>, ProcessingError> {
        let raw = self.extract_upload(filename, bytes).await?;
        if raw.trim().is_empty() {
            return Err(ProcessingError::EmptyDocument);
        }
        let cleaned = preprocess_text(&raw);
        let index = self.build_index(&cleaned, filename).await?;
        self.store.save(&index).await?;

        let index = Arc::new(index);
        self.cache.insert(filename, index.clone());
        self.metrics.record_index(index.len() as u64);
        tracing::info!(
            filename,
            chunks = index.len(),
            content_hash = index.content_hash(),
            "Document indexed"
        );
        Ok(index)
    }

    /// Memory cache, then the persisted copy, then a fresh build from the upload.
    async fn resolve_index(
        &self,
        filename: &str,
        bytes: &[u8],
    ) -> Result<Arc<DocumentIndex>, ProcessingError> {
        if let Some(index) = self.cache.get(filename) {
            tracing::debug!(filename, "Index cache hit");
            return Ok(index);
        }
        if let Some(index) = self.store.load(filename).await? {
            tracing::debug!(filename, chunks = index.len(), "Loaded persisted index");
            let index = Arc::new(index);
            self.cache.insert(filename, index.clone());
            return Ok(index);
        }
        self.ingest(filename, bytes).await
    }
}

#[async_trait]
impl LegalApi for ProcessingService {
    fn health(&self) -> HealthSnapshot {
        HealthSnapshot {
            model_loaded: self.summarization_client.is_some(),
            chunk_size: self.config.summary_chunk_size,
            default_max_length: self.config.summary_max_length,
            default_min_length: self.config.summary_min_length,
        }
    }

    async fn summarize_document(
        &self,
        upload: UploadedFile,
    ) -> Result<SummaryOutcome, ProcessingError> {
        let client = self
            .summarization_client
            .as_deref()
            .ok_or(ProcessingError::ModelUnavailable)?;
        let filename = secure_filename(&upload.filename);
        tracing::info!(filename = %filename, "Processing file");

        let raw = self.extract_upload(&filename, &upload.bytes).await?;
        if raw.trim().is_empty() {
            tracing::error!(filename = %filename, "Empty text extracted");
            return Err(ProcessingError::EmptyDocument);
        }

        let cleaned = preprocess_text(&raw);
        let word_count = count_words(&cleaned);
        tracing::info!(
            filename = %filename,
            chars = cleaned.chars().count(),
            words = word_count,
            "Cleaned document text"
        );
        tokio::fs::write(self.workspace.preprocessed_path(&filename), &cleaned).await?;

        let started = Instant::now();
        let summary = ParallelSummarizer::new(
            client,
            self.config.summary_chunk_size,
            self.config.summary_max_length,
            self.config.summary_min_length,
            self.config.summary_concurrency,
        )
        .summarize(&cleaned)
        .await;
        let processing_secs = started.elapsed().as_secs_f64();

        if summary.is_empty() {
            return Err(ProcessingError::EmptySummary);
        }

        let summary_length = count_words(&summary);
        self.metrics.record_summary();
        tracing::info!(
            filename = %filename,
            duration_ms = (processing_secs * 1000.0) as u64,
            summary_words = summary_length,
            "Generated summary"
        );
        Ok(SummaryOutcome {
            summary,
            filename,
            processing_secs,
            word_count,
            summary_length,
        })
    }

    async fn index_document(&self, upload: UploadedFile) -> Result<IndexOutcome, ProcessingError> {
        let filename = secure_filename(&upload.filename);
        let index = self.ingest(&filename, &upload.bytes).await?;
        Ok(IndexOutcome {
            chunk_count: index.len(),
            filename,
        })
    }

    async fn answer_question(
        &self,
        upload: UploadedFile,
        question: String,
    ) -> Result<Answer, ProcessingError> {
        let filename = secure_filename(&upload.filename);
        let index = self.resolve_index(&filename, &upload.bytes).await?;

        let query = self
            .embedding_client
            .generate_embeddings(vec![question.clone()])
            .await?
            .pop()
            .ok_or_else(|| {
                EmbeddingClientError::GenerationFailed("no vector returned for question".into())
            })?;
        let hits = index.search(&query, self.config.retrieval_top_k)?;
        let relevant = self.gate.is_relevant(&question, &hits);
        self.metrics.record_question(relevant);
        tracing::info!(
            filename = %filename,
            hits = hits.len(),
            top_score = hits.first().map(|hit| hit.score),
            relevant,
            "Answered question"
        );

        let kind = if relevant {
            AnswerKind::Relevant(
                self.gate
                    .qualifying(&hits)
                    .into_iter()
                    .map(Section::from)
                    .collect(),
            )
        } else {
            AnswerKind::Irrelevant(self.picker.pick(&IRRELEVANT_RESPONSES).to_string())
        };
        Ok(Answer { filename, kind })
    }

    async fn translate(
        &self,
        text: String,
        target_lang: String,
        chunked: bool,
    ) -> Result<TranslationOutcome, TranslationError> {
        let outcome = self.translator.translate(&text, &target_lang, chunked).await?;
        self.metrics.record_translation();
        Ok(outcome)
    }

    fn record_rate_limited(&self) {
        self.metrics.record_rate_limited();
    }

    fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

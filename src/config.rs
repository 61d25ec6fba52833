use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Runtime configuration for the LexiMind server.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Optional override for the HTTP server port.
    pub server_port: Option<u16>,
    /// Root directory holding `uploads/`, `preprocessed/`, and `processed/`.
    pub data_dir: PathBuf,
    /// Largest request body accepted by the upload endpoints.
    pub max_upload_bytes: usize,
    /// Embedding provider used to generate vector representations.
    pub embedding_provider: EmbeddingProvider,
    /// Embedding model identifier passed to the provider.
    pub embedding_model: String,
    /// Dimensionality of vectors produced by the hashed provider.
    pub embedding_dimension: usize,
    /// Base URL of the Ollama runtime.
    pub ollama_url: String,
    /// Seq2seq inference endpoint; `None` means the summarizer is not loaded.
    pub summarizer_url: Option<String>,
    /// Summarization model identifier reported to the endpoint.
    pub summarizer_model: String,
    /// Optional bearer token for the summarization endpoint.
    pub summarizer_api_token: Option<String>,
    /// Character budget for each summarization chunk.
    pub summary_chunk_size: usize,
    /// Base `max_length` before word-count scaling.
    pub summary_max_length: usize,
    /// Base `min_length` before word-count scaling.
    pub summary_min_length: usize,
    /// Number of chunk summaries requested concurrently.
    pub summary_concurrency: usize,
    /// Character budget for retrieval chunks.
    pub text_splitter_chunk_size: usize,
    /// Character overlap between adjacent retrieval chunks.
    pub text_splitter_chunk_overlap: usize,
    /// Number of neighbours retrieved per question.
    pub retrieval_top_k: usize,
    /// Minimum similarity for a chunk to count as relevant.
    pub relevance_score_threshold: f32,
    /// Number of document indexes kept in memory.
    pub index_cache_capacity: usize,
    /// Primary translation endpoint (MyMemory).
    pub mymemory_url: String,
    /// Fallback translation endpoint (LibreTranslate).
    pub libre_url: String,
    /// Timeout applied to each outbound translation request.
    pub translation_timeout_secs: u64,
    /// Number of memoized translations.
    pub translation_cache_size: usize,
    /// Translation requests allowed per client per minute.
    pub translate_rate_limit: usize,
}

/// Supported embedding backends for the retrieval pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProvider {
    /// Local Ollama runtime.
    Ollama,
    /// Deterministic in-process hashing, useful offline and in tests.
    Hashed,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: None,
            data_dir: PathBuf::from("."),
            max_upload_bytes: 16 * 1024 * 1024,
            embedding_provider: EmbeddingProvider::Ollama,
            embedding_model: "all-minilm".into(),
            embedding_dimension: 384,
            ollama_url: "http://127.0.0.1:11434".into(),
            summarizer_url: None,
            summarizer_model: "Ruthwik/LExiMinD_legal_t5_summarizer".into(),
            summarizer_api_token: None,
            summary_chunk_size: 1024,
            summary_max_length: 300,
            summary_min_length: 100,
            summary_concurrency: default_concurrency(),
            text_splitter_chunk_size: 1000,
            text_splitter_chunk_overlap: 200,
            retrieval_top_k: 5,
            relevance_score_threshold: 0.8,
            index_cache_capacity: 64,
            mymemory_url: "https://api.mymemory.translated.net/get".into(),
            libre_url: "https://libretranslate.de/translate".into(),
            translation_timeout_secs: 10,
            translation_cache_size: 1000,
            translate_rate_limit: 10,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, performing validation along the way.
    ///
    /// Every variable is optional; unset values keep the defaults from [`Config::default`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            server_port: parse_optional("SERVER_PORT")?,
            data_dir: load_env_optional("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            max_upload_bytes: parse_or("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            embedding_provider: match load_env_optional("EMBEDDING_PROVIDER") {
                Some(value) => value
                    .parse()
                    .map_err(|()| ConfigError::InvalidValue("EMBEDDING_PROVIDER".into()))?,
                None => defaults.embedding_provider,
            },
            embedding_model: load_env_optional("EMBEDDING_MODEL")
                .unwrap_or(defaults.embedding_model),
            embedding_dimension: parse_or("EMBEDDING_DIMENSION", defaults.embedding_dimension)?,
            ollama_url: load_env_optional("OLLAMA_URL").unwrap_or(defaults.ollama_url),
            summarizer_url: load_env_optional("SUMMARIZER_URL"),
            summarizer_model: load_env_optional("SUMMARIZER_MODEL")
                .unwrap_or(defaults.summarizer_model),
            summarizer_api_token: load_env_optional("SUMMARIZER_API_TOKEN"),
            summary_chunk_size: parse_or("SUMMARY_CHUNK_SIZE", defaults.summary_chunk_size)?,
            summary_max_length: parse_or("SUMMARY_MAX_LENGTH", defaults.summary_max_length)?,
            summary_min_length: parse_or("SUMMARY_MIN_LENGTH", defaults.summary_min_length)?,
            summary_concurrency: parse_or("SUMMARY_CONCURRENCY", defaults.summary_concurrency)?
                .max(1),
            text_splitter_chunk_size: parse_or(
                "TEXT_SPLITTER_CHUNK_SIZE",
                defaults.text_splitter_chunk_size,
            )?,
            text_splitter_chunk_overlap: parse_or(
                "TEXT_SPLITTER_CHUNK_OVERLAP",
                defaults.text_splitter_chunk_overlap,
            )?,
            retrieval_top_k: parse_or("RETRIEVAL_TOP_K", defaults.retrieval_top_k)?.max(1),
            relevance_score_threshold: parse_or(
                "RELEVANCE_SCORE_THRESHOLD",
                defaults.relevance_score_threshold,
            )?,
            index_cache_capacity: parse_or("INDEX_CACHE_CAPACITY", defaults.index_cache_capacity)?,
            mymemory_url: load_env_optional("MYMEMORY_URL").unwrap_or(defaults.mymemory_url),
            libre_url: load_env_optional("LIBRE_URL").unwrap_or(defaults.libre_url),
            translation_timeout_secs: parse_or(
                "TRANSLATION_TIMEOUT_SECS",
                defaults.translation_timeout_secs,
            )?,
            translation_cache_size: parse_or(
                "TRANSLATION_CACHE_SIZE",
                defaults.translation_cache_size,
            )?,
            translate_rate_limit: parse_or("TRANSLATE_RATE_LIMIT", defaults.translate_rate_limit)?,
        })
    }

    /// Whether an external summarizer has been configured.
    pub fn summarizer_configured(&self) -> bool {
        self.summarizer_url.is_some()
    }
}

fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(usize::from)
        .unwrap_or(4)
}

fn load_env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_optional<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    load_env_optional(key)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(key.to_string()))
        })
        .transpose()
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    Ok(parse_optional(key)?.unwrap_or(default))
}

impl std::str::FromStr for EmbeddingProvider {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "hashed" => Ok(Self::Hashed),
            _ => Err(()),
        }
    }
}

/// Global configuration cache populated during process start.
pub static CONFIG: OnceLock<Config> = OnceLock::new();

/// Retrieve the loaded configuration, panicking if initialization has not occurred.
pub fn get_config() -> &'static Config {
    CONFIG.get().expect("Config not initialized")
}

/// Load configuration from the environment and install it in the global cache.
pub fn init_config() {
    init_config_with(|_| {});
}

/// Load configuration, apply caller overrides (e.g. CLI flags), and install it globally.
pub fn init_config_with(overrides: impl FnOnce(&mut Config)) {
    dotenvy::dotenv().ok();
    let mut config = Config::from_env().expect("Failed to load config from environment");
    overrides(&mut config);
    tracing::debug!(
        data_dir = %config.data_dir.display(),
        server_port = ?config.server_port,
        embedding_provider = ?config.embedding_provider,
        embedding_model = %config.embedding_model,
        summarizer_configured = config.summarizer_configured(),
        "Loaded configuration"
    );
    CONFIG.set(config).expect("Failed to set config");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_service_constants() {
        let config = Config::default();
        assert_eq!(config.summary_chunk_size, 1024);
        assert_eq!(config.summary_max_length, 300);
        assert_eq!(config.summary_min_length, 100);
        assert_eq!(config.text_splitter_chunk_size, 1000);
        assert_eq!(config.text_splitter_chunk_overlap, 200);
        assert_eq!(config.translate_rate_limit, 10);
        assert_eq!(config.max_upload_bytes, 16 * 1024 * 1024);
        assert!(!config.summarizer_configured());
    }

    #[test]
    fn embedding_provider_parses_case_insensitively() {
        assert_eq!("Ollama".parse(), Ok(EmbeddingProvider::Ollama));
        assert_eq!(" hashed ".parse(), Ok(EmbeddingProvider::Hashed));
        assert!("openai".parse::<EmbeddingProvider>().is_err());
    }
}

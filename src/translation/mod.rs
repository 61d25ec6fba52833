//! English-to-target translation with provider fallback and memoization.
//!
//! [`Translator`] asks a primary provider first and a fallback provider second. Successful
//! results are kept in a bounded LRU keyed by `(text, target_lang)`, so a repeated request never
//! reaches the network. Long inputs are cut into fixed character windows translated one after
//! another and re-joined with spaces.

mod providers;

pub use providers::{LibreTranslateProvider, MyMemoryProvider, SOURCE_LANG, TranslationProvider};

use crate::config::Config;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Inputs longer than this many characters are always translated in windows.
pub const MAX_SINGLE_TRANSLATION_CHARS: usize = 500;

/// Failure of a single provider call.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network failure, timeout, or client construction error.
    #[error("transport error: {0}")]
    Transport(String),
    /// The provider asked us to slow down.
    #[error("rate limited")]
    RateLimited,
    /// The provider answered with a non-success status.
    #[error("unexpected status {0}")]
    Status(u16),
    /// The provider answered without a usable translation.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Failure of the whole provider chain.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TranslationError {
    /// The fallback provider rejected the request with 429.
    #[error("LibreTranslate rate limit exceeded")]
    RateLimited,
    /// The fallback provider could not be reached.
    #[error("All translation services failed")]
    AllServicesFailed,
    /// Both providers answered without a usable translation.
    #[error("Translation failed - no valid response from services")]
    NoValidResponse,
}

/// Result of a translation request.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationOutcome {
    /// Translated text.
    pub translation: String,
    /// Whether the input was translated in windows.
    pub was_chunked: bool,
}

/// Provider chain with a shared translation cache.
pub struct Translator {
    primary: Box<dyn TranslationProvider>,
    fallback: Box<dyn TranslationProvider>,
    cache: Mutex<LruCache<(String, String), String>>,
    window_chars: usize,
}

impl Translator {
    /// Translator over explicit providers.
    pub fn new(
        primary: Box<dyn TranslationProvider>,
        fallback: Box<dyn TranslationProvider>,
        cache_size: usize,
    ) -> Self {
        let capacity = NonZeroUsize::new(cache_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            primary,
            fallback,
            cache: Mutex::new(LruCache::new(capacity)),
            window_chars: MAX_SINGLE_TRANSLATION_CHARS,
        }
    }

    /// MyMemory first, LibreTranslate second, as configured.
    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        let timeout = Duration::from_secs(config.translation_timeout_secs);
        Ok(Self::new(
            Box::new(MyMemoryProvider::new(config.mymemory_url.clone(), timeout)?),
            Box::new(LibreTranslateProvider::new(config.libre_url.clone(), timeout)?),
            config.translation_cache_size,
        ))
    }

    /// Translate `text`, windowing it when `chunked` is set or the text is long.
    pub async fn translate(
        &self,
        text: &str,
        target_lang: &str,
        chunked: bool,
    ) -> Result<TranslationOutcome, TranslationError> {
        let started = Instant::now();
        let was_chunked = chunked || text.chars().count() > self.window_chars;

        let translation = if was_chunked {
            let mut parts = Vec::new();
            for window in char_windows(text, self.window_chars) {
                parts.push(self.translate_text(&window, target_lang).await?);
            }
            parts.join(" ")
        } else {
            self.translate_text(text, target_lang).await?
        };

        tracing::info!(
            length = text.chars().count(),
            target_lang,
            chunked = was_chunked,
            duration_ms = started.elapsed().as_millis() as u64,
            "Translated text"
        );
        Ok(TranslationOutcome {
            translation,
            was_chunked,
        })
    }

    /// Translate one piece of text through the cache and provider chain.
    pub async fn translate_text(
        &self,
        text: &str,
        target_lang: &str,
    ) -> Result<String, TranslationError> {
        let key = (text.to_string(), target_lang.to_string());
        let cached = self.lock_cache().get(&key).cloned();
        if let Some(hit) = cached {
            tracing::debug!(target_lang, "Translation cache hit");
            return Ok(hit);
        }

        let translated = self.call_providers(text, target_lang).await?;
        self.lock_cache().put(key, translated.clone());
        Ok(translated)
    }

    async fn call_providers(&self, text: &str, target_lang: &str) -> Result<String, TranslationError> {
        match self.primary.translate(text, target_lang).await {
            Ok(translated) => return Ok(translated),
            Err(error) => {
                tracing::warn!(provider = self.primary.name(), error = %error, "Primary translation failed")
            }
        }

        match self.fallback.translate(text, target_lang).await {
            Ok(translated) => Ok(translated),
            Err(ProviderError::RateLimited) => Err(TranslationError::RateLimited),
            Err(ProviderError::Transport(error)) => {
                tracing::warn!(provider = self.fallback.name(), error = %error, "Fallback translation failed");
                Err(TranslationError::AllServicesFailed)
            }
            Err(error) => {
                tracing::warn!(provider = self.fallback.name(), error = %error, "Fallback translation failed");
                Err(TranslationError::NoValidResponse)
            }
        }
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, LruCache<(String, String), String>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Cut `text` into consecutive windows of at most `size` characters.
pub fn char_windows(text: &str, size: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(size.max(1))
        .map(|window| window.iter().collect())
        .collect()
}

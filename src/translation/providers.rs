//! HTTP clients for the external translation services.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use super::ProviderError;

/// Source language assumed for every request.
pub const SOURCE_LANG: &str = "en";

/// A remote service able to translate English text.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Translate `text` from English into `target_lang`.
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, ProviderError>;
}

fn build_http(timeout: Duration) -> Result<Client, ProviderError> {
    Client::builder()
        .user_agent("leximind/translate")
        .timeout(timeout)
        .build()
        .map_err(|error| ProviderError::Transport(error.to_string()))
}

/// MyMemory `GET /get?q=..&langpair=en|xx` client.
pub struct MyMemoryProvider {
    http: Client,
    url: String,
}

impl MyMemoryProvider {
    /// Client for the endpoint at `url` with a per-request `timeout`.
    pub fn new(url: String, timeout: Duration) -> Result<Self, ProviderError> {
        Ok(Self {
            http: build_http(timeout)?,
            url,
        })
    }
}

#[derive(Debug, Deserialize)]
struct MyMemoryResponse {
    #[serde(rename = "responseData")]
    response_data: Option<MyMemoryData>,
}

#[derive(Debug, Deserialize)]
struct MyMemoryData {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

#[async_trait]
impl TranslationProvider for MyMemoryProvider {
    fn name(&self) -> &'static str {
        "mymemory"
    }

    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, ProviderError> {
        let langpair = format!("{SOURCE_LANG}|{target_lang}");
        let response = self
            .http
            .get(&self.url)
            .query(&[("q", text), ("langpair", langpair.as_str())])
            .send()
            .await
            .map_err(|error| ProviderError::Transport(error.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ProviderError::Status(status.as_u16()));
        }

        let body: MyMemoryResponse = response
            .json()
            .await
            .map_err(|error| ProviderError::InvalidResponse(error.to_string()))?;
        body.response_data
            .and_then(|data| data.translated_text)
            .ok_or_else(|| ProviderError::InvalidResponse("missing responseData.translatedText".into()))
    }
}

/// LibreTranslate `POST /translate` client.
pub struct LibreTranslateProvider {
    http: Client,
    url: String,
}

impl LibreTranslateProvider {
    /// Client for the endpoint at `url` with a per-request `timeout`.
    pub fn new(url: String, timeout: Duration) -> Result<Self, ProviderError> {
        Ok(Self {
            http: build_http(timeout)?,
            url,
        })
    }
}

#[derive(Debug, Deserialize)]
struct LibreResponse {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

#[async_trait]
impl TranslationProvider for LibreTranslateProvider {
    fn name(&self) -> &'static str {
        "libretranslate"
    }

    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, ProviderError> {
        let response = self
            .http
            .post(&self.url)
            .json(&json!({ "q": text, "source": SOURCE_LANG, "target": target_lang }))
            .send()
            .await
            .map_err(|error| ProviderError::Transport(error.to_string()))?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::TOO_MANY_REQUESTS => return Err(ProviderError::RateLimited),
            status => return Err(ProviderError::Status(status.as_u16())),
        }

        let body: LibreResponse = response
            .json()
            .await
            .map_err(|error| ProviderError::InvalidResponse(error.to_string()))?;
        body.translated_text
            .ok_or_else(|| ProviderError::InvalidResponse("missing translatedText".into()))
    }
}

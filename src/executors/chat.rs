//! Chat executor
//!
//! `ChatExecutor` is the seam between request preparation and the network:
//! it receives a fully built body and performs exactly one exchange.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::LlmError;
use crate::providers::openai::transformers::classify_http_error;
use crate::providers::openai::types::{OpenAiChatRequest, OpenAiChatResponse};

#[async_trait]
pub trait ChatExecutor: Send + Sync {
    /// Send one chat-completion request. Implementations must not retry.
    async fn execute(
        &self,
        body: &OpenAiChatRequest,
        api_key: Option<&SecretString>,
    ) -> Result<OpenAiChatResponse, LlmError>;
}

/// reqwest-backed executor posting to `{base_url}/chat/completions`.
#[derive(Debug, Clone)]
pub struct HttpChatExecutor {
    pub http_client: reqwest::Client,
    pub url: String,
}

impl HttpChatExecutor {
    pub fn new(http_client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            http_client,
            url: url.into(),
        }
    }

    fn build_headers(api_key: Option<&SecretString>) -> Result<HeaderMap, LlmError> {
        let mut headers = HeaderMap::new();
        if let Some(key) = api_key {
            let value = HeaderValue::from_str(&format!("Bearer {}", key.expose_secret()))
                .map_err(|e| LlmError::ConfigurationError(format!("Invalid API key: {e}")))?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }
}

#[async_trait]
impl ChatExecutor for HttpChatExecutor {
    async fn execute(
        &self,
        body: &OpenAiChatRequest,
        api_key: Option<&SecretString>,
    ) -> Result<OpenAiChatResponse, LlmError> {
        let headers = Self::build_headers(api_key)?;

        let resp = self
            .http_client
            .post(&self.url)
            .headers(headers)
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let error = classify_http_error(status.as_u16(), &text, status.canonical_reason());
            tracing::warn!(status = status.as_u16(), error = %error, "chat completion failed");
            return Err(error);
        }

        let text = resp.text().await?;
        serde_json::from_str::<OpenAiChatResponse>(&text)
            .map_err(|e| LlmError::ParseError(format!("Failed to parse response JSON: {e}")))
    }
}

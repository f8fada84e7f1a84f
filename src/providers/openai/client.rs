//! `OpenAI` Client Implementation
//!
//! Wraps one chat-completion exchange: request preparation, a single
//! executor call, and conversion into [`TextResponse`] or
//! [`StructuredResponse`].

use std::sync::Arc;

use secrecy::SecretString;
use serde::de::DeserializeOwned;

use super::transformers::{
    CallParams, build_chat_request, transform_structured_response, transform_text_response,
};
use super::types::OpenAiChatResponse;
use crate::config::{OpenAiConfig, build_http_client_from_config};
use crate::error::LlmError;
use crate::executors::{ChatExecutor, HttpChatExecutor};
use crate::request::{CallOptions, ChatMessage, ResponseRequest};
use crate::types::{CompletionResponse, OutputSchema, StructuredResponse, TextResponse};

/// `OpenAI` Client
#[derive(Clone)]
pub struct OpenAiClient {
    config: OpenAiConfig,
    executor: Arc<dyn ChatExecutor>,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("provider_name", &"openai")
            .field("config", &self.config)
            .finish()
    }
}

impl OpenAiClient {
    /// Create a client that talks HTTP to `config.base_url`.
    pub fn new(config: OpenAiConfig) -> Result<Self, LlmError> {
        let http_client = build_http_client_from_config(&config.http_config)?;
        let executor = HttpChatExecutor::new(http_client, config.chat_completions_url());
        Ok(Self::with_executor(config, Arc::new(executor)))
    }

    /// Create a client from the environment (see [`OpenAiConfig::from_env`]).
    pub fn from_env() -> Result<Self, LlmError> {
        Self::new(OpenAiConfig::from_env())
    }

    /// Create a client with a custom executor.
    pub fn with_executor(config: OpenAiConfig, executor: Arc<dyn ChatExecutor>) -> Self {
        Self { config, executor }
    }

    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    fn resolve_params(&self, options: &CallOptions) -> CallParams {
        CallParams {
            model: options
                .model
                .clone()
                .unwrap_or_else(|| self.config.model.clone()),
            temperature: options.temperature.unwrap_or(self.config.temperature),
        }
    }

    async fn send(
        &self,
        messages: &[ChatMessage],
        schema: Option<&OutputSchema>,
        options: &CallOptions,
    ) -> Result<OpenAiChatResponse, LlmError> {
        let params = self.resolve_params(options);
        let body = build_chat_request(messages, &params, schema);
        let api_key: Option<&SecretString> =
            options.api_key.as_ref().or(self.config.api_key.as_ref());

        tracing::debug!(
            model = %params.model,
            temperature = params.temperature,
            messages = body.messages.len(),
            structured = schema.is_some(),
            "sending chat completion"
        );

        let response = self.executor.execute(&body, api_key).await?;

        if let Some(usage) = &response.usage {
            tracing::info!(
                model = response.model.as_deref().unwrap_or(&params.model),
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "chat completion finished"
            );
        } else {
            tracing::info!(model = %params.model, "chat completion finished without usage");
        }
        Ok(response)
    }

    /// Send prepared messages.
    ///
    /// Without a schema the first choice's text is returned; with one, the
    /// content is validated and returned as a JSON value.
    pub async fn complete(
        &self,
        messages: &[ChatMessage],
        schema: Option<&OutputSchema>,
        options: &CallOptions,
    ) -> Result<CompletionResponse, LlmError> {
        let response = self.send(messages, schema, options).await?;
        match schema {
            None => Ok(CompletionResponse::Text(transform_text_response(&response))),
            Some(schema) => Ok(CompletionResponse::Structured(
                transform_structured_response::<serde_json::Value>(&response, schema)?,
            )),
        }
    }

    /// Text completion with an optional attachment.
    ///
    /// ```rust,ignore
    /// let client = OpenAiClient::new(OpenAiConfig::from_env())?;
    /// let reply = client
    ///     .make_response(ResponseRequest::new("Describe this").with_image_path("salad.jpg"))
    ///     .await?;
    /// println!("{reply} ({:?})", reply.usage());
    /// ```
    pub async fn make_response(&self, request: ResponseRequest) -> Result<TextResponse, LlmError> {
        let messages = request.build_messages()?;
        let response = self.send(&messages, None, &request.options).await?;
        Ok(transform_text_response(&response))
    }

    /// Structured completion with an optional attachment, decoded into `T`.
    pub async fn make_structured_response<T: DeserializeOwned>(
        &self,
        request: ResponseRequest,
        schema: &OutputSchema,
    ) -> Result<StructuredResponse<T>, LlmError> {
        let messages = request.build_messages()?;
        let response = self.send(&messages, Some(schema), &request.options).await?;
        transform_structured_response::<T>(&response, schema)
    }
}

//! Conversions between crate types and the OpenAI wire format.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

use super::types::*;
use crate::error::LlmError;
use crate::request::{ChatMessage, ContentPart, ImageDetail, MessageContent};
use crate::schema::decode_typed;
use crate::types::{
    FinishReason, OutputSchema, ResponseMetadata, StructuredResponse, TextResponse, Usage,
};

/// Per-call parameters that are not part of the message list.
#[derive(Debug, Clone, PartialEq)]
pub struct CallParams {
    pub model: String,
    pub temperature: f32,
}

fn convert_part(part: &ContentPart) -> OpenAiContentPart {
    match part {
        ContentPart::Text { text } => OpenAiContentPart::Text { text: text.clone() },
        ContentPart::Image { url, detail } => OpenAiContentPart::ImageUrl {
            image_url: OpenAiImageUrl {
                url: url.clone(),
                detail: Some(
                    match detail {
                        ImageDetail::Low => "low",
                        ImageDetail::High => "high",
                        ImageDetail::Auto => "auto",
                    }
                    .to_string(),
                ),
            },
        },
        ContentPart::File {
            filename,
            file_data,
        } => OpenAiContentPart::File {
            file: OpenAiFileData {
                filename: filename.clone(),
                file_data: file_data.clone(),
            },
        },
    }
}

/// Convert messages into OpenAI wire format.
pub fn convert_messages(messages: &[ChatMessage]) -> Vec<OpenAiMessage> {
    messages
        .iter()
        .map(|message| OpenAiMessage {
            role: message.role.as_str().to_string(),
            content: match &message.content {
                MessageContent::Text(text) => OpenAiContent::Text(text.clone()),
                MessageContent::MultiModal(parts) => {
                    OpenAiContent::Parts(parts.iter().map(convert_part).collect())
                }
            },
        })
        .collect()
}

/// Assemble the request body.
pub fn build_chat_request(
    messages: &[ChatMessage],
    params: &CallParams,
    schema: Option<&OutputSchema>,
) -> OpenAiChatRequest {
    OpenAiChatRequest {
        model: params.model.clone(),
        messages: convert_messages(messages),
        temperature: params.temperature,
        response_format: schema.map(OutputSchema::to_response_format),
    }
}

fn map_usage(usage: Option<&OpenAiUsage>) -> Option<Usage> {
    usage.map(|u| Usage::new(u.prompt_tokens, u.completion_tokens, u.total_tokens))
}

fn map_metadata(response: &OpenAiChatResponse) -> ResponseMetadata {
    ResponseMetadata {
        id: response.id.clone(),
        model: response.model.clone(),
        created: response
            .created
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0)),
        finish_reason: FinishReason::parse(
            response
                .choices
                .first()
                .and_then(|c| c.finish_reason.as_deref()),
        ),
    }
}

/// Text of the first choice, `""` when absent.
pub fn transform_text_response(response: &OpenAiChatResponse) -> TextResponse {
    let text = response
        .choices
        .first()
        .and_then(|c| c.message.content.clone())
        .unwrap_or_default();
    TextResponse::new(text, map_usage(response.usage.as_ref())).with_metadata(map_metadata(response))
}

/// Decode the first choice against `schema`.
pub fn transform_structured_response<T: DeserializeOwned>(
    response: &OpenAiChatResponse,
    schema: &OutputSchema,
) -> Result<StructuredResponse<T>, LlmError> {
    let message = response.choices.first().map(|c| &c.message).ok_or_else(|| {
        LlmError::SchemaValidationError("response contained no choices".to_string())
    })?;
    if let Some(refusal) = &message.refusal {
        return Err(LlmError::SchemaValidationError(format!(
            "model refused structured output: {refusal}"
        )));
    }
    let raw = message.content.clone().ok_or_else(|| {
        LlmError::SchemaValidationError("response contained no content".to_string())
    })?;
    let parsed = decode_typed::<T>(&raw, schema)?;
    Ok(StructuredResponse {
        parsed,
        usage: map_usage(response.usage.as_ref()),
        metadata: map_metadata(response),
        raw,
    })
}

/// Map a non-success response onto `LlmError::ApiError`.
pub fn classify_http_error(status: u16, body_text: &str, fallback_message: Option<&str>) -> LlmError {
    if let Ok(envelope) = serde_json::from_str::<OpenAiErrorEnvelope>(body_text) {
        let details = serde_json::json!({
            "status": status,
            "type": envelope.error.error_type,
            "code": envelope.error.code,
        });
        return LlmError::api_error_with_details(status, envelope.error.message, details);
    }

    // Limit body sample size to avoid noisy errors
    let body_sample = body_text.chars().take(200).collect::<String>();
    let message = if let Some(fallback) = fallback_message {
        fallback.to_string()
    } else if body_sample.trim().is_empty() {
        "api error".to_string()
    } else {
        body_sample.clone()
    };
    LlmError::api_error_with_details(
        status,
        message,
        serde_json::json!({ "status": status, "raw": body_sample }),
    )
}

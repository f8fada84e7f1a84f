//! Shared helpers for the integration tests.
#![allow(dead_code)]

use std::path::PathBuf;

use chatfile::{OpenAiClient, OpenAiConfig};
use serde_json::{Value, json};
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "test-api-key";

/// Chat completion body in the shape the service returns.
pub fn chat_completion(content: Value) -> Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1677652288,
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 15, "total_tokens": 25 }
    })
}

pub fn error_body(error_type: &str, message: &str, code: &str) -> Value {
    json!({
        "error": { "message": message, "type": error_type, "param": null, "code": code }
    })
}

pub fn config_for(server: &MockServer) -> OpenAiConfig {
    OpenAiConfig::new(TEST_API_KEY).with_base_url(server.uri())
}

pub fn client_for(server: &MockServer) -> OpenAiClient {
    OpenAiClient::new(config_for(server)).unwrap()
}

/// JSON bodies of every request the server has seen.
pub async fn received_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| r.body_json::<Value>().unwrap())
        .collect()
}

/// Write `bytes` to `name` inside a fresh temp dir.
pub fn temp_file(name: &str, bytes: &[u8]) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).unwrap();
    (dir, path)
}

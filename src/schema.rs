//! Structured output decoding.
//!
//! The model output is parsed as JSON, validated against the declared JSON
//! Schema with `jsonschema`, then deserialized into the caller's type. Any
//! failure surfaces as `LlmError::SchemaValidationError`; values are never
//! coerced and unknown fields are never dropped silently.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::LlmError;
use crate::types::OutputSchema;

/// Validate a JSON value against a JSON Schema.
///
/// Reports at most three violations to keep messages readable.
pub fn validate_json(schema: &Value, instance: &Value) -> Result<(), LlmError> {
    let compiled = jsonschema::validator_for(schema).map_err(|e| {
        LlmError::ConfigurationError(format!("Invalid JSON Schema: {}", e))
    })?;

    if !compiled.is_valid(instance) {
        let mut msgs = Vec::new();
        for err in compiled.iter_errors(instance) {
            msgs.push(format!("{} at {}", err, err.instance_path));
            if msgs.len() >= 3 {
                break;
            }
        }
        return Err(LlmError::SchemaValidationError(msgs.join("; ")));
    }

    Ok(())
}

/// Parse raw model text and validate it against `schema`.
pub fn decode_json_value(text: &str, schema: &OutputSchema) -> Result<Value, LlmError> {
    let value: Value = serde_json::from_str(text.trim()).map_err(|e| {
        LlmError::SchemaValidationError(format!("output is not valid JSON: {}", e))
    })?;
    validate_json(&schema.schema, &value)?;
    Ok(value)
}

/// Parse, validate and deserialize raw model text into `T`.
pub fn decode_typed<T: DeserializeOwned>(text: &str, schema: &OutputSchema) -> Result<T, LlmError> {
    let value = decode_json_value(text, schema)?;
    serde_json::from_value::<T>(value).map_err(|e| {
        LlmError::SchemaValidationError(format!("Failed to deserialize object: {}", e))
    })
}

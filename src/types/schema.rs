//! Structured output shape declarations.
//!
//! Callers describe the expected output as named, typed fields
//! ([`SchemaShape`]); the shape is rendered to a strict JSON Schema that is
//! both sent to the remote service and used to validate what comes back.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Type of a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    String,
    Integer,
    Number,
    Boolean,
    Array(Box<FieldType>),
    Object(SchemaShape),
    /// Field must be present but may be `null`.
    Optional(Box<FieldType>),
}

impl FieldType {
    pub fn array(item: FieldType) -> Self {
        Self::Array(Box::new(item))
    }

    pub fn optional(inner: FieldType) -> Self {
        Self::Optional(Box::new(inner))
    }

    fn to_json_schema(&self) -> Value {
        match self {
            Self::String => json!({ "type": "string" }),
            Self::Integer => json!({ "type": "integer" }),
            Self::Number => json!({ "type": "number" }),
            Self::Boolean => json!({ "type": "boolean" }),
            Self::Array(item) => json!({ "type": "array", "items": item.to_json_schema() }),
            Self::Object(shape) => shape.to_json_schema(),
            Self::Optional(inner) => json!({ "anyOf": [inner.to_json_schema(), { "type": "null" }] }),
        }
    }
}

/// Ordered set of named fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaShape {
    fields: Vec<(String, FieldType)>,
}

impl SchemaShape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field. A later field with the same name replaces the earlier one.
    pub fn field(mut self, name: impl Into<String>, ty: FieldType) -> Self {
        let name = name.into();
        self.fields.retain(|(n, _)| *n != name);
        self.fields.push((name, ty));
        self
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldType)> {
        self.fields.iter().map(|(n, t)| (n.as_str(), t))
    }

    /// Render as a strict JSON Schema object: every field required, no extras.
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        for (name, ty) in &self.fields {
            properties.insert(name.clone(), ty.to_json_schema());
        }
        let required: Vec<Value> = self
            .fields
            .iter()
            .map(|(n, _)| Value::String(n.clone()))
            .collect();
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": false,
        })
    }
}

/// Named JSON Schema describing the expected structured output.
///
/// ```rust,ignore
/// use chatfile::types::{FieldType, OutputSchema, SchemaShape};
///
/// let schema = OutputSchema::from_shape(
///     "user_info",
///     SchemaShape::new()
///         .field("name", FieldType::String)
///         .field("age", FieldType::Integer),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSchema {
    /// Schema name (required by the structured-output API)
    pub name: String,
    /// Optional description forwarded to the remote service
    pub description: Option<String>,
    /// The JSON schema for validation
    pub schema: Value,
    /// Ask the remote service to enforce the schema strictly
    pub strict: bool,
}

impl OutputSchema {
    /// Build from a field declaration.
    pub fn from_shape(name: impl Into<String>, shape: SchemaShape) -> Self {
        Self::new(name, shape.to_json_schema())
    }

    /// Build from a raw JSON Schema value.
    pub fn new(name: impl Into<String>, schema: Value) -> Self {
        Self {
            name: name.into(),
            description: None,
            schema,
            strict: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// `response_format` body for the chat completions request.
    pub fn to_response_format(&self) -> Value {
        let mut json_schema = json!({
            "name": self.name,
            "schema": self.schema,
            "strict": self.strict,
        });
        if let Some(description) = &self.description {
            json_schema["description"] = json!(description);
        }
        json!({ "type": "json_schema", "json_schema": json_schema })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_shape_renders_strict_object() {
        let shape = SchemaShape::new()
            .field("name", FieldType::String)
            .field("age", FieldType::Integer);
        assert_eq!(
            shape.to_json_schema(),
            json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "age": { "type": "integer" }
                },
                "required": ["name", "age"],
                "additionalProperties": false
            })
        );
    }

    #[test]
    fn nested_and_optional_fields() {
        let department = SchemaShape::new()
            .field("name", FieldType::String)
            .field("employee_count", FieldType::Integer)
            .field("budget", FieldType::optional(FieldType::Number));
        let company = SchemaShape::new()
            .field("company_name", FieldType::String)
            .field("departments", FieldType::array(FieldType::Object(department)))
            .field("is_public", FieldType::Boolean);

        let schema = company.to_json_schema();
        let dept = &schema["properties"]["departments"]["items"];
        assert_eq!(dept["additionalProperties"], json!(false));
        assert_eq!(
            dept["properties"]["budget"],
            json!({ "anyOf": [{ "type": "number" }, { "type": "null" }] })
        );
        assert_eq!(dept["required"], json!(["name", "employee_count", "budget"]));
    }

    #[test]
    fn redeclared_field_replaces_previous() {
        let shape = SchemaShape::new()
            .field("age", FieldType::String)
            .field("age", FieldType::Integer);
        assert_eq!(shape.fields().count(), 1);
        assert_eq!(shape.to_json_schema()["properties"]["age"]["type"], "integer");
    }

    #[test]
    fn response_format_body() {
        let schema = OutputSchema::from_shape(
            "user_info",
            SchemaShape::new().field("name", FieldType::String),
        )
        .with_description("Extracted user");
        let body = schema.to_response_format();
        assert_eq!(body["type"], "json_schema");
        assert_eq!(body["json_schema"]["name"], "user_info");
        assert_eq!(body["json_schema"]["strict"], true);
        assert_eq!(body["json_schema"]["description"], "Extracted user");
    }
}

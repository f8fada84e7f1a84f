//! Structured Output - schema-validated extraction
//!
//! ## Setup
//! ```bash
//! export OPENAI_API_KEY="your-key"
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example structured_output
//! ```

use chatfile::prelude::*;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize)]
struct UserInfo {
    name: String,
    age: i64,
    email: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let schema = OutputSchema::from_shape(
        "UserInfo",
        SchemaShape::new()
            .field("name", FieldType::String)
            .field("age", FieldType::Integer)
            .field("email", FieldType::optional(FieldType::String)),
    )
    .with_description("A person mentioned in the text");

    let client = OpenAiClient::new(OpenAiConfig::from_env())?;
    let response = client
        .make_structured_response::<UserInfo>(
            ResponseRequest::new("Extract user information: John Doe is 30 years old"),
            &schema,
        )
        .await?;

    let user = &response.parsed;
    println!("name={} age={} email={:?}", user.name, user.age, user.email);
    if let Some(usage) = response.usage() {
        println!("Usage: {usage}");
    }
    Ok(())
}

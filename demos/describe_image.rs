//! Describe Image - text completion with an attachment
//!
//! Downloads an image (or uses a local path) and asks the model to describe it.
//!
//! ## Setup
//! ```bash
//! export OPENAI_API_KEY="your-key"
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example describe_image -- ./images/gr_salad.jpg
//! cargo run --example describe_image -- https://example.com/photo.jpg
//! ```

use std::path::PathBuf;

use chatfile::download_file;
use chatfile::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let source = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "./images/gr_salad.jpg".to_string());

    let image: PathBuf = if source.starts_with("http://") || source.starts_with("https://") {
        download_file(&reqwest::Client::new(), &source, None).await?
    } else {
        PathBuf::from(source)
    };

    let client = OpenAiClient::new(OpenAiConfig::from_env())?;
    let reply = client
        .make_response(
            ResponseRequest::new("Describe this image in two sentences.")
                .with_system("You are a food critic.")
                .with_image_path(&image),
        )
        .await?;

    println!("AI: {reply}\n");
    if let Some(usage) = reply.usage() {
        println!(
            "Usage: {} tokens ({} input + {} output)",
            usage.total_tokens, usage.input_tokens, usage.output_tokens
        );
    }
    Ok(())
}

//! OpenAI Chat Completions provider.

pub mod client;
pub mod transformers;
pub mod types;

pub use client::OpenAiClient;
pub use transformers::CallParams;

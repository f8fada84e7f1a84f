//! # Chatfile - Chat Completions with File Attachments
//!
//! Chatfile sends one prompt (optionally preceded by a system instruction and
//! accompanied by a single file or image) to an OpenAI-compatible chat
//! completion endpoint and returns either plain text with token usage or a
//! payload validated against a JSON schema.
#![deny(unsafe_code)]

//! ## Features
//!
//! - **Data URLs**: Local files and in-memory handles are inlined as `data:` URIs.
//! - **Images and Documents**: Images become `image_url` parts, everything else a `file` part.
//! - **Usage-Carrying Text**: [`TextResponse`] behaves like a string and exposes token usage.
//! - **Structured Output**: Responses are checked against a schema before they are returned.
//! - **Local Errors First**: Bad arguments and unreadable files fail before any network I/O.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatfile::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OpenAiClient::new(OpenAiConfig::from_env())?;
//!
//!     let request = ResponseRequest::new("Describe this image")
//!         .with_image_path("./images/gr_salad.jpg");
//!     let reply = client.make_response(request).await?;
//!
//!     println!("{reply}");
//!     if let Some(usage) = reply.usage() {
//!         println!("tokens: {usage}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod defaults;
pub mod download;
pub mod encoding;
pub mod error;
pub mod executors;
pub mod providers;
pub mod request;
pub mod schema;
pub mod types;
pub mod utils;

pub use config::{HttpConfig, OpenAiConfig};
pub use download::download_file;
pub use encoding::{DataUrl, encode_file, make_data_url};
pub use error::{ErrorKind, LlmError};
pub use providers::openai::OpenAiClient;
pub use request::{CallOptions, ChatMessage, FileArgs, ResponseRequest, build_messages};
pub use types::{
    CompletionResponse, FieldType, FileHandle, FileReference, InMemoryFile, LoadedFile,
    OutputSchema, PathFile, SchemaShape, StructuredResponse, TextResponse, Usage,
};

/// Convenient imports for typical callers.
pub mod prelude {
    pub use crate::config::{HttpConfig, OpenAiConfig};
    pub use crate::error::{ErrorKind, LlmError};
    pub use crate::providers::openai::OpenAiClient;
    pub use crate::request::{CallOptions, ChatMessage, FileArgs, ResponseRequest};
    pub use crate::types::{
        CompletionResponse, FieldType, FileHandle, InMemoryFile, OutputSchema, PathFile,
        SchemaShape, StructuredResponse, TextResponse, Usage,
    };
}

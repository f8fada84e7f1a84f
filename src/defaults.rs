//! Default Configuration Values
//!
//! This module centralizes all default values used throughout the crate.

use std::time::Duration;

/// HTTP client default configurations
pub mod http {
    use super::*;

    /// Default request timeout for HTTP requests
    ///
    /// Multimodal requests carrying a base64 payload can take well over
    /// 10 seconds to be answered.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

    /// Default connection timeout for establishing HTTP connections
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Default User-Agent string for HTTP requests
    pub const USER_AGENT: &str = concat!("chatfile/", env!("CARGO_PKG_VERSION"));
}

/// Chat completion defaults
pub mod chat {
    /// Default model identifier
    pub const MODEL: &str = "gpt-4o-mini";

    /// Default sampling temperature
    pub const TEMPERATURE: f32 = 0.25;

    /// Default OpenAI endpoint
    pub const BASE_URL: &str = "https://api.openai.com/v1";
}

/// Media type used when nothing better is known
pub const OCTET_STREAM: &str = "application/octet-stream";

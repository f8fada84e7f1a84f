//! Response values returned to callers.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Deref};

use serde::{Deserialize, Serialize};

use super::usage::Usage;

/// Reason why the model stopped generating tokens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Model completed naturally or hit a stop sequence.
    Stop,
    /// Model reached `max_tokens`.
    Length,
    /// Model triggered tool/function calls.
    ToolCalls,
    /// Content was filtered due to safety/policy violations.
    ContentFilter,
    /// Other provider-specific finish reason.
    Other(String),
}

impl FinishReason {
    /// Parse the OpenAI wire value.
    pub fn parse(reason: Option<&str>) -> Option<Self> {
        match reason {
            Some("stop") => Some(Self::Stop),
            Some("length") => Some(Self::Length),
            Some("tool_calls") | Some("function_call") => Some(Self::ToolCalls),
            Some("content_filter") => Some(Self::ContentFilter),
            Some(other) => Some(Self::Other(other.to_string())),
            None => None,
        }
    }
}

/// Response metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseMetadata {
    /// Response ID
    pub id: Option<String>,
    /// Model that actually served the request
    pub model: Option<String>,
    /// Creation time
    pub created: Option<chrono::DateTime<chrono::Utc>>,
    /// Why generation stopped
    pub finish_reason: Option<FinishReason>,
}

/// Plain-text completion result.
///
/// Usable wherever a `&str` is expected (it derefs to the content), and
/// additionally carries the usage reported for the call.
///
/// ```rust,ignore
/// let reply = client.make_response(ResponseRequest::new("hello")).await?;
/// println!("{reply}");
/// if let Some(usage) = reply.usage() {
///     println!("{}", usage.total_tokens);
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextResponse {
    text: String,
    usage: Option<Usage>,
    #[serde(default)]
    metadata: ResponseMetadata,
}

impl TextResponse {
    pub fn new(text: impl Into<String>, usage: Option<Usage>) -> Self {
        Self {
            text: text.into(),
            usage,
            metadata: ResponseMetadata::default(),
        }
    }

    pub fn with_metadata(mut self, metadata: ResponseMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// The content as a string slice.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn usage(&self) -> Option<&Usage> {
        self.usage.as_ref()
    }

    pub fn metadata(&self) -> &ResponseMetadata {
        &self.metadata
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl Deref for TextResponse {
    type Target = str;

    fn deref(&self) -> &str {
        &self.text
    }
}

impl AsRef<str> for TextResponse {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl Borrow<str> for TextResponse {
    fn borrow(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for TextResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // forward so width/fill/precision behave as they do for `str`
        fmt::Display::fmt(self.text.as_str(), f)
    }
}

// Equality looks at the text only, like comparing two strings.
impl PartialEq for TextResponse {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for TextResponse {}

// Hash and order agree with `str` so the `Borrow<str>` lookups in maps and sets hold.
impl Hash for TextResponse {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl PartialOrd for TextResponse {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TextResponse {
    fn cmp(&self, other: &Self) -> Ordering {
        self.text.cmp(&other.text)
    }
}

impl PartialEq<str> for TextResponse {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for TextResponse {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

impl PartialEq<String> for TextResponse {
    fn eq(&self, other: &String) -> bool {
        &self.text == other
    }
}

impl PartialEq<TextResponse> for str {
    fn eq(&self, other: &TextResponse) -> bool {
        self == other.text
    }
}

impl PartialEq<TextResponse> for &str {
    fn eq(&self, other: &TextResponse) -> bool {
        *self == other.text
    }
}

impl PartialEq<TextResponse> for String {
    fn eq(&self, other: &TextResponse) -> bool {
        *self == other.text
    }
}

impl Add<&str> for TextResponse {
    type Output = String;

    fn add(self, rhs: &str) -> String {
        self.text + rhs
    }
}

impl Add<&str> for &TextResponse {
    type Output = String;

    fn add(self, rhs: &str) -> String {
        let mut out = String::with_capacity(self.text.len() + rhs.len());
        out.push_str(&self.text);
        out.push_str(rhs);
        out
    }
}

impl From<TextResponse> for String {
    fn from(response: TextResponse) -> Self {
        response.text
    }
}

/// Schema-validated completion result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredResponse<T> {
    /// Value decoded from the model output
    pub parsed: T,
    pub usage: Option<Usage>,
    #[serde(default)]
    pub metadata: ResponseMetadata,
    /// Raw JSON text `parsed` was decoded from
    pub raw: String,
}

impl<T> StructuredResponse<T> {
    pub fn usage(&self) -> Option<&Usage> {
        self.usage.as_ref()
    }

    /// Convert the parsed value, keeping usage and metadata.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> StructuredResponse<U> {
        StructuredResponse {
            parsed: f(self.parsed),
            usage: self.usage,
            metadata: self.metadata,
            raw: self.raw,
        }
    }
}

/// Result of [`crate::providers::openai::OpenAiClient::complete`]: text when no
/// schema was requested, structured otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionResponse {
    Text(TextResponse),
    Structured(StructuredResponse<serde_json::Value>),
}

impl CompletionResponse {
    pub fn usage(&self) -> Option<&Usage> {
        match self {
            Self::Text(t) => t.usage(),
            Self::Structured(s) => s.usage(),
        }
    }

    pub fn as_text(&self) -> Option<&TextResponse> {
        match self {
            Self::Text(t) => Some(t),
            Self::Structured(_) => None,
        }
    }

    pub fn into_text(self) -> Option<TextResponse> {
        match self {
            Self::Text(t) => Some(t),
            Self::Structured(_) => None,
        }
    }

    pub fn into_structured(self) -> Option<StructuredResponse<serde_json::Value>> {
        match self {
            Self::Structured(s) => Some(s),
            Self::Text(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply() -> TextResponse {
        TextResponse::new("Hello! How can I help?", Some(Usage::new(9, 12, 21)))
    }

    #[test]
    fn behaves_like_a_string() {
        let r = reply();
        assert_eq!(r.len(), "Hello! How can I help?".len());
        assert_eq!(r, "Hello! How can I help?");
        assert_eq!("Hello! How can I help?", r);
        assert!(r.starts_with("Hello"));
        assert_eq!(format!("{r}"), "Hello! How can I help?");
        assert_eq!(format!("[{r:>24}]"), "[  Hello! How can I help?]");
    }

    #[test]
    fn concatenation_matches_plain_content() {
        let r = reply();
        let plain = String::from("Hello! How can I help?");
        assert_eq!(&r + " Bye.", plain.clone() + " Bye.");
        assert_eq!(r + " Bye.", plain + " Bye.");
    }

    #[test]
    fn works_as_set_and_map_key() {
        use std::collections::{BTreeSet, HashMap};

        let mut seen = HashMap::new();
        seen.insert(TextResponse::new("yes", Some(Usage::new(1, 1, 2))), 1);
        *seen.entry(TextResponse::new("yes", None)).or_insert(0) += 1;
        assert_eq!(seen.len(), 1);
        assert_eq!(seen.get("yes"), Some(&2));

        let sorted: BTreeSet<TextResponse> = ["pear", "apple", "fig"]
            .into_iter()
            .map(|t| TextResponse::new(t, None))
            .collect();
        let order: Vec<&str> = sorted.iter().map(TextResponse::text).collect();
        assert_eq!(order, ["apple", "fig", "pear"]);
        assert!(sorted.contains("fig"));
        assert!(TextResponse::new("a", None) < TextResponse::new("b", None));
    }

    #[test]
    fn equality_ignores_usage() {
        let a = TextResponse::new("same", Some(Usage::new(1, 2, 3)));
        let b = TextResponse::new("same", None);
        assert_eq!(a, b);
    }

    #[test]
    fn finish_reason_parsing() {
        assert_eq!(FinishReason::parse(Some("stop")), Some(FinishReason::Stop));
        assert_eq!(
            FinishReason::parse(Some("function_call")),
            Some(FinishReason::ToolCalls)
        );
        assert_eq!(
            FinishReason::parse(Some("weird")),
            Some(FinishReason::Other("weird".into()))
        );
        assert_eq!(FinishReason::parse(None), None);
    }

    #[test]
    fn structured_map_keeps_usage() {
        let s = StructuredResponse {
            parsed: 30_i64,
            usage: Some(Usage::new(10, 15, 25)),
            metadata: ResponseMetadata::default(),
            raw: "30".into(),
        };
        let mapped = s.map(|age| age.to_string());
        assert_eq!(mapped.parsed, "30");
        assert_eq!(mapped.usage, Some(Usage::new(10, 15, 25)));
    }
}

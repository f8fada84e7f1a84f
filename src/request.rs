//! Request construction.
//!
//! Turns the caller's text, optional system prompt, and optional attachment
//! into the ordered message list sent to the chat-completion endpoint.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::encoding::DataUrl;
use crate::error::LlmError;
use crate::types::file::{FileHandle, FileReference, LoadedFile};
use crate::utils::mime::is_image_media_type;

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
}

impl MessageRole {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
        }
    }
}

/// Image fidelity hint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageDetail {
    Low,
    #[default]
    High,
    Auto,
}

/// One part of a multi-part message.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentPart {
    Text { text: String },
    /// Image sent inline as a data URL.
    Image { url: String, detail: ImageDetail },
    /// Any other file, sent as opaque file data.
    File { filename: String, file_data: String },
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Discriminator of the part: `"text"`, `"image"` or `"file"`.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Image { .. } => "image",
            Self::File { .. } => "file",
        }
    }

    /// Build the part carrying an attachment. Images use high detail.
    pub fn from_file(file: &LoadedFile) -> Self {
        Self::from_file_with_detail(file, ImageDetail::High)
    }

    /// Like [`Self::from_file`], with an explicit detail for image parts.
    pub fn from_file_with_detail(file: &LoadedFile, detail: ImageDetail) -> Self {
        let url = DataUrl::from(file).to_string();
        if is_image_media_type(&file.media_type) {
            Self::Image { url, detail }
        } else {
            Self::File {
                filename: file.filename.clone(),
                file_data: url,
            }
        }
    }
}

/// Message content
#[derive(Debug, Clone, PartialEq)]
pub enum MessageContent {
    Text(String),
    MultiModal(Vec<ContentPart>),
}

impl MessageContent {
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(t) => Some(t),
            Self::MultiModal(_) => None,
        }
    }

    pub fn parts(&self) -> &[ContentPart] {
        match self {
            Self::Text(_) => &[],
            Self::MultiModal(parts) => parts,
        }
    }
}

/// One conversational turn.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: MessageContent,
}

impl ChatMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn user_with_parts(parts: Vec<ContentPart>) -> Self {
        Self {
            role: MessageRole::User,
            content: MessageContent::MultiModal(parts),
        }
    }
}

/// Build the message list: optional system turn, then exactly one user turn.
///
/// With a file the user turn becomes `[text, image|file]`, text first.
pub fn build_messages(
    user_text: &str,
    file: Option<&LoadedFile>,
    system_text: Option<&str>,
) -> Vec<ChatMessage> {
    compose_messages(user_text, file.map(ContentPart::from_file), system_text)
}

fn compose_messages(
    user_text: &str,
    attachment: Option<ContentPart>,
    system_text: Option<&str>,
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = system_text.filter(|s| !s.is_empty()) {
        messages.push(ChatMessage::system(system));
    }
    let user = match attachment {
        Some(part) => ChatMessage::user_with_parts(vec![ContentPart::text(user_text), part]),
        None => ChatMessage::user(user_text),
    };
    messages.push(user);
    messages
}

/// Attachment arguments, including the legacy `image_*` names.
///
/// [`FileArgs::resolve`] normalizes them once: `file_path` beats
/// `image_path`, `file` beats `image_file`, and a path beats a handle.
#[derive(Clone, Default)]
pub struct FileArgs {
    pub file_path: Option<PathBuf>,
    pub file: Option<Arc<dyn FileHandle>>,
    pub image_path: Option<PathBuf>,
    pub image_file: Option<Arc<dyn FileHandle>>,
}

impl fmt::Debug for FileArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileArgs")
            .field("file_path", &self.file_path)
            .field("file", &self.file.as_ref().map(|h| h.name().to_string()))
            .field("image_path", &self.image_path)
            .field("image_file", &self.image_file.as_ref().map(|h| h.name().to_string()))
            .finish()
    }
}

impl FileArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    pub fn with_file(mut self, handle: impl FileHandle + 'static) -> Self {
        self.file = Some(Arc::new(handle));
        self
    }

    pub fn with_image_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.image_path = Some(path.into());
        self
    }

    pub fn with_image_file(mut self, handle: impl FileHandle + 'static) -> Self {
        self.image_file = Some(Arc::new(handle));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.file_path.is_none()
            && self.file.is_none()
            && self.image_path.is_none()
            && self.image_file.is_none()
    }

    /// Collapse to a single file reference. An empty path counts as absent.
    pub fn resolve(self) -> Result<FileReference, LlmError> {
        let non_empty = |p: &PathBuf| !p.as_os_str().is_empty();
        let file_path = self
            .file_path
            .filter(non_empty)
            .or(self.image_path.filter(non_empty));
        let file = self.file.or(self.image_file);
        match (file_path, file) {
            (Some(path), _) => Ok(FileReference::Path(path)),
            (None, Some(handle)) => Ok(FileReference::Handle(handle)),
            (None, None) => Err(LlmError::ConfigurationError(
                "file_path or file must be supplied".to_string(),
            )),
        }
    }
}

/// Per-call overrides of the client configuration.
#[derive(Clone, Default)]
pub struct CallOptions {
    /// Overrides the client's default model
    pub model: Option<String>,
    /// Overrides the client's default temperature
    pub temperature: Option<f32>,
    /// Overrides the client's credential
    pub api_key: Option<SecretString>,
}

impl fmt::Debug for CallOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallOptions")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("has_api_key", &self.api_key.is_some())
            .finish()
    }
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(api_key.into()));
        self
    }
}

/// Arguments of a single completion call.
///
/// ```rust,ignore
/// let request = ResponseRequest::new("Describe this image")
///     .with_image_path("./images/gr_salad.jpg")
///     .with_system("Answer in one sentence.");
/// let reply = client.make_response(request).await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResponseRequest {
    pub user_text: String,
    pub system_text: Option<String>,
    /// `None` means no attachment; `Some` with empty args is a configuration error.
    pub attachment: Option<FileArgs>,
    /// Detail requested for image attachments
    pub image_detail: ImageDetail,
    pub options: CallOptions,
}

impl ResponseRequest {
    pub fn new(user_text: impl Into<String>) -> Self {
        Self {
            user_text: user_text.into(),
            ..Self::default()
        }
    }

    pub fn with_system(mut self, system_text: impl Into<String>) -> Self {
        self.system_text = Some(system_text.into());
        self
    }

    pub fn with_attachment(mut self, args: FileArgs) -> Self {
        self.attachment = Some(args);
        self
    }

    pub fn with_file_path(self, path: impl Into<PathBuf>) -> Self {
        self.update_attachment(|a| a.with_file_path(path))
    }

    pub fn with_file(self, handle: impl FileHandle + 'static) -> Self {
        self.update_attachment(|a| a.with_file(handle))
    }

    /// Legacy name for [`Self::with_file_path`].
    pub fn with_image_path(self, path: impl Into<PathBuf>) -> Self {
        self.update_attachment(|a| a.with_image_path(path))
    }

    /// Legacy name for [`Self::with_file`].
    pub fn with_image_file(self, handle: impl FileHandle + 'static) -> Self {
        self.update_attachment(|a| a.with_image_file(handle))
    }

    pub fn with_image_detail(mut self, detail: ImageDetail) -> Self {
        self.image_detail = detail;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.options = self.options.with_model(model);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.options = self.options.with_temperature(temperature);
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.options = self.options.with_api_key(api_key);
        self
    }

    fn update_attachment(mut self, f: impl FnOnce(FileArgs) -> FileArgs) -> Self {
        self.attachment = Some(f(self.attachment.take().unwrap_or_default()));
        self
    }

    /// Normalize the attachment and build the message list.
    ///
    /// All local work (alias resolution, file read, encoding) happens here,
    /// before any network I/O.
    pub fn build_messages(&self) -> Result<Vec<ChatMessage>, LlmError> {
        let loaded = match &self.attachment {
            Some(args) => Some(args.clone().resolve()?.load()?),
            None => None,
        };
        Ok(compose_messages(
            &self.user_text,
            loaded
                .as_ref()
                .map(|file| ContentPart::from_file_with_detail(file, self.image_detail)),
            self.system_text.as_deref(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::file::InMemoryFile;
    use proptest::prelude::*;

    fn loaded(name: &str, media_type: &str) -> LoadedFile {
        LoadedFile {
            filename: name.to_string(),
            media_type: media_type.to_string(),
            bytes: vec![1, 2, 3, 4],
        }
    }

    #[test]
    fn text_only_user_turn() {
        let messages = build_messages("hi", None, None);
        assert_eq!(messages, vec![ChatMessage::user("hi")]);
    }

    #[test]
    fn system_turn_comes_first() {
        let messages = build_messages("hi", None, Some("be brief"));
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], ChatMessage::system("be brief"));
        assert_eq!(messages[1].role, MessageRole::User);
    }

    #[test]
    fn empty_system_text_is_skipped() {
        let messages = build_messages("hi", None, Some(""));
        assert_eq!(messages.len(), 1);
    }

    #[test]
    fn image_attachment_becomes_image_part() {
        let messages = build_messages("what is this?", Some(&loaded("salad.jpg", "image/jpeg")), None);
        let parts = messages[0].content.parts();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0], ContentPart::text("what is this?"));
        assert_eq!(parts[1].kind(), "image");
        match &parts[1] {
            ContentPart::Image { url, detail } => {
                assert_eq!(url, "data:image/jpeg;base64,AQIDBA==");
                assert_eq!(*detail, ImageDetail::High);
            }
            other => panic!("unexpected part: {other:?}"),
        }
    }

    #[test]
    fn non_image_attachment_becomes_file_part() {
        let messages = build_messages("summarize", Some(&loaded("report.pdf", "application/pdf")), None);
        let parts = messages[0].content.parts();
        assert_eq!(parts.iter().map(ContentPart::kind).collect::<Vec<_>>(), ["text", "file"]);
        assert_eq!(
            parts[1],
            ContentPart::File {
                filename: "report.pdf".into(),
                file_data: "data:application/pdf;base64,AQIDBA==".into(),
            }
        );
    }

    #[test]
    fn general_path_beats_legacy_alias() {
        let reference = FileArgs::new()
            .with_file_path("a")
            .with_image_path("b")
            .resolve()
            .unwrap();
        assert!(matches!(reference, FileReference::Path(p) if p == PathBuf::from("a")));
    }

    #[test]
    fn legacy_alias_is_promoted() {
        let reference = FileArgs::new().with_image_path("b").resolve().unwrap();
        assert!(matches!(reference, FileReference::Path(p) if p == PathBuf::from("b")));

        let reference = FileArgs::new()
            .with_image_file(InMemoryFile::new("legacy.png", "image/png", vec![]))
            .resolve()
            .unwrap();
        assert_eq!(reference.filename(), "legacy.png");
    }

    #[test]
    fn general_handle_beats_legacy_handle() {
        let reference = FileArgs::new()
            .with_file(InMemoryFile::new("new.pdf", "application/pdf", vec![]))
            .with_image_file(InMemoryFile::new("old.png", "image/png", vec![]))
            .resolve()
            .unwrap();
        assert_eq!(reference.filename(), "new.pdf");
    }

    #[test]
    fn empty_path_falls_through_to_alias() {
        let reference = FileArgs::new()
            .with_file_path("")
            .with_image_path("b.png")
            .resolve()
            .unwrap();
        assert!(matches!(reference, FileReference::Path(p) if p == PathBuf::from("b.png")));

        let err = FileArgs::new().with_file_path("").resolve().unwrap_err();
        assert!(matches!(err, LlmError::ConfigurationError(_)));
    }

    #[test]
    fn image_detail_can_be_lowered() {
        let messages = ResponseRequest::new("thumbnail")
            .with_image_detail(ImageDetail::Low)
            .with_image_file(InMemoryFile::new("t.png", "image/png", vec![1]))
            .build_messages()
            .unwrap();
        assert!(matches!(
            &messages[0].content.parts()[1],
            ContentPart::Image { detail: ImageDetail::Low, .. }
        ));

        let messages = ResponseRequest::new("default")
            .with_image_file(InMemoryFile::new("t.png", "image/png", vec![1]))
            .build_messages()
            .unwrap();
        assert!(matches!(
            &messages[0].content.parts()[1],
            ContentPart::Image { detail: ImageDetail::High, .. }
        ));
    }

    #[test]
    fn empty_args_are_configuration_error() {
        assert!(FileArgs::new().is_empty());
        let err = FileArgs::new().resolve().unwrap_err();
        assert!(matches!(err, LlmError::ConfigurationError(_)));

        let err = ResponseRequest::new("x")
            .with_attachment(FileArgs::new())
            .build_messages()
            .unwrap_err();
        assert!(matches!(err, LlmError::ConfigurationError(_)));
    }

    #[test]
    fn request_builds_multimodal_turn_from_handle() {
        let request = ResponseRequest::new("read this")
            .with_system("sys")
            .with_file(InMemoryFile::new("notes.txt", "text/plain", b"hi".to_vec()));
        let messages = request.build_messages().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].content.parts()[1].kind(), "file");
    }

    proptest! {
        // An attachment becomes an image part exactly when its type starts with `image/`.
        #[test]
        fn prop_image_part_iff_image_media_type(
            top in prop::sample::select(vec!["image", "application", "text", "video", "audio"]),
            sub in "[a-z0-9.+-]{1,12}",
            bytes in prop::collection::vec(any::<u8>(), 0..64),
        ) {
            let media_type = format!("{top}/{sub}");
            let file = LoadedFile {
                filename: "attachment".to_string(),
                media_type: media_type.clone(),
                bytes,
            };
            let kind = ContentPart::from_file(&file).kind();
            prop_assert_eq!(kind == "image", media_type.starts_with("image/"));
            prop_assert!(kind == "image" || kind == "file");
        }
    }
}

//! Payload encoding: turn an attachment into a `data:` URL.

use std::fmt;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::LlmError;
use crate::types::file::{FileHandle, FileReference, LoadedFile, declared_media_type};
use crate::utils::mime::get_mime_type;

/// `data:<media-type>;base64,<payload>`
#[derive(Clone, PartialEq, Eq)]
pub struct DataUrl {
    media_type: String,
    encoded: String,
}

impl DataUrl {
    /// Encode raw bytes.
    pub fn from_bytes(media_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            media_type: media_type.into(),
            encoded: STANDARD.encode(bytes),
        }
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// The base64 portion.
    pub fn base64(&self) -> &str {
        &self.encoded
    }

    /// Decode the payload back into bytes.
    pub fn decode(&self) -> Result<Vec<u8>, LlmError> {
        STANDARD
            .decode(&self.encoded)
            .map_err(|e| LlmError::ParseError(format!("invalid base64 payload: {e}")))
    }

    /// Parse a `data:<type>;base64,<payload>` string.
    pub fn parse(url: &str) -> Option<Self> {
        let rest = url.strip_prefix("data:")?;
        let (media_type, encoded) = rest.split_once(";base64,")?;
        Some(Self {
            media_type: media_type.to_string(),
            encoded: encoded.to_string(),
        })
    }
}

impl fmt::Display for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.media_type, self.encoded)
    }
}

impl fmt::Debug for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataUrl")
            .field("media_type", &self.media_type)
            .field("encoded_len", &self.encoded.len())
            .finish()
    }
}

impl From<&LoadedFile> for DataUrl {
    fn from(file: &LoadedFile) -> Self {
        Self::from_bytes(file.media_type.clone(), &file.bytes)
    }
}

/// Encode a file reference.
pub fn encode_file(file: &FileReference) -> Result<DataUrl, LlmError> {
    let loaded = file.load()?;
    Ok(DataUrl::from(&loaded))
}

/// Encode whichever of `file_path` / `file` is given; the path wins when both are.
///
/// Fails with `ConfigurationError` when neither is supplied.
pub fn make_data_url(
    file_path: Option<&Path>,
    file: Option<&dyn FileHandle>,
) -> Result<DataUrl, LlmError> {
    if let Some(path) = file_path {
        let bytes = std::fs::read(path)
            .map_err(|e| LlmError::IoError(format!("{}: {e}", path.display())))?;
        return Ok(DataUrl::from_bytes(get_mime_type(path), &bytes));
    }
    if let Some(handle) = file {
        let bytes = handle
            .read()
            .map_err(|e| LlmError::IoError(format!("{}: {e}", handle.name())))?;
        return Ok(DataUrl::from_bytes(declared_media_type(handle), &bytes));
    }
    Err(LlmError::ConfigurationError(
        "either a file path or a file handle must be supplied".to_string(),
    ))
}

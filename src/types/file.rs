//! File attachment types.
//!
//! A file can reach the encoder either as a filesystem path or as any value
//! implementing [`FileHandle`] (an uploaded buffer, a wrapped path, ...).
//! [`FileReference::load`] is the single place where both shapes are
//! normalized into bytes plus metadata.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::defaults::OCTET_STREAM;
use crate::error::LlmError;
use crate::utils::mime::get_mime_type;

/// Capability set of an attachable file.
pub trait FileHandle: Send + Sync {
    /// File name sent alongside non-image payloads.
    fn name(&self) -> &str;
    /// Declared media type.
    fn media_type(&self) -> &str;
    /// Read the whole payload.
    fn read(&self) -> std::io::Result<Vec<u8>>;
}

/// In-memory upload buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct InMemoryFile {
    name: String,
    media_type: String,
    bytes: Vec<u8>,
}

impl InMemoryFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }
}

impl fmt::Debug for InMemoryFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryFile")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl FileHandle for InMemoryFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn media_type(&self) -> &str {
        &self.media_type
    }

    fn read(&self) -> std::io::Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}

/// File-path wrapper exposing a path through the [`FileHandle`] interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathFile {
    path: PathBuf,
    name: String,
    media_type: String,
}

impl PathFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            name: file_name_of(&path),
            media_type: get_mime_type(&path),
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FileHandle for PathFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn media_type(&self) -> &str {
        &self.media_type
    }

    fn read(&self) -> std::io::Result<Vec<u8>> {
        std::fs::read(&self.path)
    }
}

/// A file attachment: either a path or a handle, never both.
#[derive(Clone)]
pub enum FileReference {
    Path(PathBuf),
    Handle(Arc<dyn FileHandle>),
}

impl fmt::Debug for FileReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(p) => f.debug_tuple("Path").field(p).finish(),
            Self::Handle(h) => f
                .debug_struct("Handle")
                .field("name", &h.name())
                .field("media_type", &h.media_type())
                .finish(),
        }
    }
}

impl FileReference {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    pub fn handle(handle: impl FileHandle + 'static) -> Self {
        Self::Handle(Arc::new(handle))
    }

    /// File name as it would be sent to the remote service.
    pub fn filename(&self) -> String {
        match self {
            Self::Path(p) => file_name_of(p),
            Self::Handle(h) => h.name().to_string(),
        }
    }

    /// Resolved media type, without reading the payload.
    pub fn media_type(&self) -> String {
        match self {
            Self::Path(p) => get_mime_type(p),
            Self::Handle(h) => declared_media_type(h.as_ref()),
        }
    }

    /// Read the full payload into memory.
    pub fn load(&self) -> Result<LoadedFile, LlmError> {
        let bytes = match self {
            Self::Path(p) => std::fs::read(p)
                .map_err(|e| LlmError::IoError(format!("{}: {e}", p.display())))?,
            Self::Handle(h) => h
                .read()
                .map_err(|e| LlmError::IoError(format!("{}: {e}", h.name())))?,
        };
        tracing::debug!(
            filename = %self.filename(),
            bytes = bytes.len(),
            "loaded attachment"
        );
        Ok(LoadedFile {
            filename: self.filename(),
            media_type: self.media_type(),
            bytes,
        })
    }
}

impl From<PathBuf> for FileReference {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for FileReference {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<Arc<dyn FileHandle>> for FileReference {
    fn from(handle: Arc<dyn FileHandle>) -> Self {
        Self::Handle(handle)
    }
}

/// Attachment payload after normalization.
#[derive(Clone, PartialEq, Eq)]
pub struct LoadedFile {
    pub filename: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for LoadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedFile")
            .field("filename", &self.filename)
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

pub(crate) fn declared_media_type(handle: &dyn FileHandle) -> String {
    let declared = handle.media_type().trim();
    if declared.is_empty() {
        OCTET_STREAM.to_string()
    } else {
        declared.to_string()
    }
}

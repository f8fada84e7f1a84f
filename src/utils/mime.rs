//! MIME type detection utilities

use std::path::Path;

use crate::defaults::OCTET_STREAM;

/// Guess MIME by file path (extension-based)
pub fn guess_mime_from_path(path: impl AsRef<Path>) -> Option<String> {
    mime_guess::from_path(path.as_ref())
        .first_raw()
        .map(|s| s.to_string())
}

/// Guess MIME by file path, falling back to `application/octet-stream`
pub fn get_mime_type(path: impl AsRef<Path>) -> String {
    guess_mime_from_path(path).unwrap_or_else(|| OCTET_STREAM.to_string())
}

/// Whether the media type should be sent as an image part.
pub fn is_image_media_type(media_type: &str) -> bool {
    media_type.starts_with("image/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_mime_from_path() {
        assert_eq!(guess_mime_from_path("photo.png").as_deref(), Some("image/png"));
        assert_eq!(
            guess_mime_from_path("./images/gr_salad.jpg").as_deref(),
            Some("image/jpeg")
        );
        assert_eq!(
            guess_mime_from_path("report.pdf").as_deref(),
            Some("application/pdf")
        );
        // case insensitive
        assert_eq!(guess_mime_from_path("IMAGE.JPG").as_deref(), Some("image/jpeg"));
        assert_eq!(guess_mime_from_path("file.unknownext"), None);
    }

    #[test]
    fn test_fallback_to_octet_stream() {
        assert_eq!(get_mime_type("archive.unknownext"), "application/octet-stream");
        assert_eq!(get_mime_type("no_extension"), "application/octet-stream");
        assert_eq!(get_mime_type("doc.pdf"), "application/pdf");
    }

    #[test]
    fn test_image_prefix() {
        assert!(is_image_media_type("image/png"));
        assert!(is_image_media_type("image/svg+xml"));
        assert!(!is_image_media_type("application/pdf"));
        assert!(!is_image_media_type("text/image"));
    }
}

//! Fetching remote files to disk.

use std::path::{Path, PathBuf};

use crate::error::LlmError;

/// Name used when the URL has no usable final segment.
const FALLBACK_FILENAME: &str = "download";

/// Download `url` to `dest`, or to the last URL path segment in the current
/// directory when `dest` is `None`.
///
/// Missing parent directories are created and an existing file is
/// overwritten. Returns the written path.
pub async fn download_file(
    client: &reqwest::Client,
    url: &str,
    dest: Option<&Path>,
) -> Result<PathBuf, LlmError> {
    let parsed = reqwest::Url::parse(url)
        .map_err(|e| LlmError::ConfigurationError(format!("Invalid download URL {url}: {e}")))?;
    let target = match dest {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(filename_from_url(&parsed)),
    };

    let response = client.get(parsed).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(LlmError::api_error(
            status.as_u16(),
            format!("Download of {url} failed: {status}"),
        ));
    }
    let bytes = response.bytes().await?;

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&target, &bytes).await?;

    tracing::info!(url, path = %target.display(), bytes = bytes.len(), "downloaded file");
    Ok(target)
}

fn filename_from_url(url: &reqwest::Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .unwrap_or(FALLBACK_FILENAME)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn filename_is_last_segment() {
        let url = reqwest::Url::parse("https://host/images/gr_salad.jpg?x=1").unwrap();
        assert_eq!(filename_from_url(&url), "gr_salad.jpg");
        let root = reqwest::Url::parse("https://host/").unwrap();
        assert_eq!(filename_from_url(&root), FALLBACK_FILENAME);
    }

    #[tokio::test]
    async fn writes_body_into_destination() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/files/report.pdf"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.4".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("report.pdf");
        std::fs::write(&dest, b"old").unwrap();

        let written = download_file(
            &reqwest::Client::new(),
            &format!("{}/files/report.pdf", server.uri()),
            Some(&dest),
        )
        .await
        .unwrap();

        assert_eq!(written, dest);
        assert_eq!(std::fs::read(&written).unwrap(), b"%PDF-1.4");
    }

    #[tokio::test]
    async fn creates_missing_parent_directories() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8, 2, 3]))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("a").join("b").join("x.bin");
        let written = download_file(
            &reqwest::Client::new(),
            &format!("{}/x.bin", server.uri()),
            Some(&dest),
        )
        .await
        .unwrap();
        assert_eq!(std::fs::read(written).unwrap(), vec![1u8, 2, 3]);
    }

    #[tokio::test]
    async fn non_success_status_is_remote_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let err = download_file(
            &reqwest::Client::new(),
            &format!("{}/missing.png", server.uri()),
            Some(&dir.path().join("missing.png")),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status_code(), Some(404));
        assert!(!dir.path().join("missing.png").exists());
    }

    #[tokio::test]
    async fn invalid_url_is_configuration_error() {
        let err = download_file(&reqwest::Client::new(), "not a url", None)
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::ConfigurationError(_)));
    }
}

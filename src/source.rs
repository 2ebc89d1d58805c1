use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::StatusCode;
use tracing::info;

/// Where the raw documentation bytes come from.
pub trait Source {
    fn open(&self) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// Local file on disk.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Source for FileSource {
    async fn open(&self) -> Result<Vec<u8>> {
        let meta = tokio::fs::metadata(&self.path)
            .await
            .with_context(|| format!("opening file {:?}", self.path))?;
        if meta.is_dir() {
            bail!("expected file, but {:?} is a directory", self.path);
        }
        info!("Reading {}", self.path.display());
        tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("reading file {:?}", self.path))
    }
}

/// Remote page fetched with a GET request.
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }

    /// Source using a fresh client with the given request timeout.
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("building HTTP client")?;
        Ok(Self::new(url, client))
    }
}

impl Source for HttpSource {
    async fn open(&self) -> Result<Vec<u8>> {
        info!("Fetching {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("executing request to {:?}", self.url))?;
        let status = response.status();
        if status != StatusCode::OK {
            bail!("unexpected status code {} for {:?}", status.as_u16(), self.url);
        }
        let body = response
            .bytes()
            .await
            .with_context(|| format!("reading response body from {:?}", self.url))?;
        Ok(body.to_vec())
    }
}

/// Picks HTTP or file access from the shape of the location string.
pub struct LocationSource {
    location: String,
    timeout: Duration,
}

impl LocationSource {
    pub fn new(location: impl Into<String>, timeout: Duration) -> Self {
        Self {
            location: location.into(),
            timeout,
        }
    }

    fn is_url(&self) -> bool {
        self.location.starts_with("http://") || self.location.starts_with("https://")
    }
}

impl Source for LocationSource {
    async fn open(&self) -> Result<Vec<u8>> {
        if self.is_url() {
            HttpSource::with_timeout(self.location.as_str(), self.timeout)?
                .open()
                .await
        } else {
            FileSource::new(self.location.as_str()).open().await
        }
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(5);

    /// Serve one canned HTTP response on a loopback port, return its URL.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        format!("http://{addr}/bots/api")
    }

    #[rstest]
    #[case("https://core.telegram.org/bots/api", true)]
    #[case("http://localhost:8080/api.html", true)]
    #[case("api.html", false)]
    #[case("/tmp/https/api.html", false)]
    #[case("ftp://example.com/api.html", false)]
    fn detects_urls(#[case] location: &str, #[case] is_url: bool) {
        assert_eq!(LocationSource::new(location, TIMEOUT).is_url(), is_url);
    }

    #[tokio::test]
    async fn file_source_reads_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api.html");
        std::fs::write(&path, "<h4>User</h4>").unwrap();
        let bytes = FileSource::new(&path).open().await.unwrap();
        assert_eq!(bytes, b"<h4>User</h4>");
    }

    #[tokio::test]
    async fn file_source_rejects_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileSource::new(dir.path()).open().await.unwrap_err();
        assert!(err.to_string().contains("is a directory"), "{err}");
    }

    #[tokio::test]
    async fn file_source_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.html");
        let err = FileSource::new(&path).open().await.unwrap_err();
        assert!(err.to_string().contains("missing.html"), "{err}");
    }

    #[tokio::test]
    async fn location_source_falls_back_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api.html");
        std::fs::write(&path, "local").unwrap();
        let source = LocationSource::new(path.to_string_lossy(), TIMEOUT);
        assert_eq!(source.open().await.unwrap(), b"local");
    }

    #[tokio::test]
    async fn http_source_returns_body() {
        let url = serve_once("200 OK", "<h4>User</h4>").await;
        let bytes = LocationSource::new(url, TIMEOUT).open().await.unwrap();
        assert_eq!(bytes, b"<h4>User</h4>");
    }

    #[tokio::test]
    async fn http_source_rejects_non_ok_status() {
        let url = serve_once("404 Not Found", "missing").await;
        let source = HttpSource::with_timeout(url, TIMEOUT).unwrap();
        let err = source.open().await.unwrap_err();
        assert!(err.to_string().contains("unexpected status code 404"), "{err}");
    }
}

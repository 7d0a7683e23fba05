//! HTTP downloads.

use async_trait::async_trait;
use std::path::Path;
use tokio::io::AsyncWriteExt;

use super::Transport;
use crate::provision::{Error, ErrorExt, Result};

/// Streams HTTP(S) responses to disk with `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport with a default client.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn download(&self, url: &str, dest: &Path) -> Result<u64> {
        log::info!("Downloading {}", url);

        let download_error = |reason: String| Error::Download {
            url: url.to_string(),
            reason,
        };

        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| download_error(e.to_string()))?;

        let mut file = tokio::fs::File::create(dest)
            .await
            .fs_context("creating download file", dest)?;

        let mut written = 0u64;
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| download_error(format!("failed to read response: {e}")))?
        {
            file.write_all(&chunk)
                .await
                .fs_context("writing download file", dest)?;
            written += chunk.len() as u64;
        }
        file.flush().await.fs_context("flushing download file", dest)?;

        log::debug!("Downloaded {} bytes to {}", written, dest.display());
        Ok(written)
    }
}

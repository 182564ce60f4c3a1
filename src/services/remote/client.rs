use crate::core::config::Config;
use crate::core::errors::{Error, Result};
use crate::models::entry::FileEntry;
use crate::models::path::FolderPath;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Url};
use tracing::debug;

/// Upload body is streamed in chunks of this size so byte-level progress
/// events fire while the request is on the wire.
const UPLOAD_CHUNK_SIZE: usize = 64 * 1024;

/// HTTP client for the storage service. Cheap to clone; all requests go to
/// the configured base URL. No timeouts and no retries anywhere: a hung
/// request hangs its caller.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    base_url: String,
}

impl RemoteClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the listing for one folder: `GET {base}/files?folder={path}`.
    /// Root is the empty `folder` parameter. Entries come back in service
    /// order and are not sorted here.
    pub async fn fetch_listing(&self, folder: &FolderPath) -> Result<Vec<FileEntry>> {
        let url = self.endpoint("/files")?;
        let resp = self
            .http
            .get(url)
            .query(&[("folder", folder.as_str())])
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Service {
                status: status.as_u16(),
                url: resp.url().to_string(),
            });
        }
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(Error::MalformedListing)
    }

    /// Upload a blob into `folder`: `POST {base}/upload` with multipart
    /// fields `file` and `folder`. `on_progress` is called with
    /// `(bytes_sent, bytes_total)` once up front and again as each chunk is
    /// handed to the transport. The success body is logged, never parsed.
    pub async fn upload<F>(
        &self,
        folder: &FolderPath,
        file_name: &str,
        data: Vec<u8>,
        mut on_progress: F,
    ) -> Result<()>
    where
        F: FnMut(u64, u64) + Send + 'static,
    {
        let url = self.endpoint("/upload")?;
        let total = data.len() as u64;
        on_progress(0, total);

        let chunks: Vec<Vec<u8>> = data
            .chunks(UPLOAD_CHUNK_SIZE)
            .map(|chunk| chunk.to_vec())
            .collect();
        let mut sent = 0u64;
        let body = Body::wrap_stream(futures::stream::iter(chunks.into_iter().map(
            move |chunk| {
                sent += chunk.len() as u64;
                on_progress(sent, total);
                Ok::<_, std::io::Error>(chunk)
            },
        )));

        let part = Part::stream_with_length(body, total).file_name(file_name.to_string());
        let form = Form::new()
            .text("folder", folder.as_str().to_string())
            .part("file", part);

        let resp = self.http.post(url).multipart(form).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Service {
                status: status.as_u16(),
                url: resp.url().to_string(),
            });
        }
        let body = resp.text().await.unwrap_or_default();
        debug!(response = %body, "upload accepted");
        Ok(())
    }

    /// Direct retrieval URL for a file:
    /// `{base}/download?folder={path}&filename={name}`. The caller hands it
    /// to the browser; saving is driven by the service's response headers.
    pub fn download_url(&self, folder: &FolderPath, file_name: &str) -> Result<Url> {
        let base = format!("{}/download", self.base_url);
        Url::parse_with_params(
            &base,
            &[("folder", folder.as_str()), ("filename", file_name)],
        )
        .map_err(|err| Error::InvalidBaseUrl(format!("{}: {}", self.base_url, err)))
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let joined = format!("{}{}", self.base_url, path);
        Url::parse(&joined).map_err(|err| Error::InvalidBaseUrl(format!("{}: {}", joined, err)))
    }
}

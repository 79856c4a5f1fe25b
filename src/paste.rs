//! A client for uploading oversized message bodies to Pastebin.
//!
//! When the SMS overflow strategy is `paste-fallback`, the appender uploads
//! the human-readable batch here and sends a pointer to the paste instead of
//! the full text. Every paste is unlisted, expires after one day and uses
//! the plain-text format.

use crate::core::{PasteClient, PasteReceipt, PasteRequest};
use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

/// The paste-service publish endpoint used when no override is configured.
pub const PASTEBIN_API_URL: &str = "https://pastebin.com/api/api_post.php";

/// Prefix the service puts on error response bodies.
const ERROR_PREFIX: &str = "Bad API request";

const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// A failed paste upload. The appender degrades to the truncate path on any
/// of these; none of them abort a flush.
#[derive(Error, Debug)]
pub enum PasteError {
    #[error("paste upload request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("paste service returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("paste service rejected the request: {0}")]
    Rejected(String),

    #[error("paste service returned an unusable URL: {0:?}")]
    MalformedUrl(String),
}

/// A client for the Pastebin publish API.
pub struct PastebinClient {
    endpoint: String,
    dev_key: String,
    client: reqwest::Client,
}

impl PastebinClient {
    /// Creates a new `PastebinClient` posting to `endpoint`, or to the real
    /// Pastebin API when no override is given.
    pub fn new(dev_key: String, endpoint: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");
        Self {
            endpoint: endpoint.unwrap_or_else(|| PASTEBIN_API_URL.to_string()),
            dev_key,
            client,
        }
    }
}

#[async_trait]
impl PasteClient for PastebinClient {
    /// Uploads the paste and extracts the identifier from the returned URL.
    async fn upload(&self, request: &PasteRequest) -> Result<PasteReceipt, PasteError> {
        let params = [
            ("api_dev_key", self.dev_key.as_str()),
            ("api_option", "paste"),
            ("api_paste_code", request.body.as_str()),
            ("api_paste_name", request.title.as_str()),
            // 1 = unlisted
            ("api_paste_private", "1"),
            ("api_paste_expire_date", "1D"),
            ("api_paste_format", "text"),
        ];

        let response = self.client.post(&self.endpoint).form(&params).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(PasteError::Status { status, body });
        }

        if let Some(rest) = body.strip_prefix(ERROR_PREFIX) {
            let detail = rest.trim_start_matches(',').trim().to_string();
            return Err(PasteError::Rejected(detail));
        }

        let url = body.trim().to_string();
        let id = match url.rsplit('/').next() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => return Err(PasteError::MalformedUrl(url)),
        };

        debug!(paste_id = %id, "Uploaded oversized batch to paste service");
        Ok(PasteReceipt { id, url })
    }
}

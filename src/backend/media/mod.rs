//! Media Upload
//!
//! Client for the external media host. Inline image payloads (data URIs) are
//! uploaded before a message is persisted and replaced with the hosted URL
//! the upload returns, so the stored record only ever carries a URL.
//!
//! The media host is an optional service: when `MEDIA_UPLOAD_URL` is unset
//! the store is `None` and sends carrying an image fail with a server error.

use serde::Deserialize;
use thiserror::Error;

/// Errors from the media host
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("media upload request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("media host rejected upload: {status}")]
    Rejected { status: reqwest::StatusCode },
}

/// Successful upload response from the media host
#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

/// Client for the external media host
#[derive(Clone)]
pub struct MediaStore {
    client: reqwest::Client,
    upload_url: String,
    api_key: Option<String>,
}

impl MediaStore {
    pub fn new(upload_url: String, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            upload_url,
            api_key,
        }
    }

    /// Build a media store from `MEDIA_UPLOAD_URL` / `MEDIA_API_KEY`
    ///
    /// Returns `None` when no upload URL is configured; the server then runs
    /// without image support.
    pub fn from_env() -> Option<Self> {
        let upload_url = match std::env::var("MEDIA_UPLOAD_URL") {
            Ok(url) => url,
            Err(_) => {
                tracing::warn!("MEDIA_UPLOAD_URL not set. Image uploads will be disabled.");
                return None;
            }
        };
        let api_key = std::env::var("MEDIA_API_KEY").ok();
        Some(Self::new(upload_url, api_key))
    }

    /// Upload an inline image payload and return its hosted URL
    pub async fn upload(&self, image: &str) -> Result<String, MediaError> {
        let mut request = self
            .client
            .post(&self.upload_url)
            .json(&serde_json::json!({ "file": image }));

        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(MediaError::Rejected {
                status: response.status(),
            });
        }

        let body: UploadResponse = response.json().await?;
        Ok(body.secure_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_response_parsing() {
        let json = r#"{"secure_url": "https://media.example.com/abc.png", "bytes": 1024}"#;
        let parsed: UploadResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.secure_url, "https://media.example.com/abc.png");
    }
}

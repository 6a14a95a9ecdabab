//! Upload client for the external image host.
//!
//! Cloudinary is the only real provider. Uploads are signed with the API
//! secret (SHA-256) and sent as a base64 `data:` URI in a form post.

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::ImageStoreConfig;
use crate::error::ApiError;

/// Content types accepted for upload.
pub const ALLOWED_CONTENT_TYPES: [&str; 4] = ["image/png", "image/jpeg", "image/webp", "image/gif"];

#[derive(Debug, Error)]
pub enum ImageStoreError {
    #[error("Image uploads are not configured")]
    Disabled,

    #[error("Unsupported image type '{0}'; expected png, jpeg, webp or gif")]
    UnsupportedContentType(String),

    #[error("Image is empty")]
    Empty,

    #[error("Image exceeds the {max} byte limit")]
    TooLarge { max: usize },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Image host rejected the upload: {0}")]
    Rejected(String),
}

impl From<ImageStoreError> for ApiError {
    fn from(err: ImageStoreError) -> Self {
        match err {
            ImageStoreError::Disabled => ApiError::ServiceUnavailable(err.to_string()),
            ImageStoreError::UnsupportedContentType(_) | ImageStoreError::Empty => {
                ApiError::Validation(err.to_string())
            }
            ImageStoreError::TooLarge { .. } => ApiError::PayloadTooLarge(err.to_string()),
            ImageStoreError::Http(e) => {
                warn!(error = %e, "Image upload request failed");
                ApiError::ServiceUnavailable("Image host unavailable".to_string())
            }
            ImageStoreError::Rejected(msg) => {
                warn!(error = %msg, "Image host rejected upload");
                ApiError::ServiceUnavailable("Image host rejected the upload".to_string())
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

#[derive(Debug, Deserialize)]
struct UploadErrorResponse {
    error: UploadErrorMessage,
}

#[derive(Debug, Deserialize)]
struct UploadErrorMessage {
    message: String,
}

/// Signed-upload client for Cloudinary.
pub struct CloudinaryClient {
    client: Client,
    upload_url: String,
    api_key: String,
    api_secret: String,
    folder: String,
}

impl CloudinaryClient {
    pub fn new(config: &ImageStoreConfig) -> Result<Self, ImageStoreError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            client,
            upload_url: format!(
                "{}/{}/image/upload",
                config.api_base_url.trim_end_matches('/'),
                config.cloud_name
            ),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            folder: config.folder.clone(),
        })
    }

    async fn upload(&self, bytes: &[u8], content_type: &str) -> Result<String, ImageStoreError> {
        let timestamp = Utc::now().timestamp().to_string();
        let signature = sign_params(
            &[("folder", &self.folder), ("timestamp", &timestamp)],
            &self.api_secret,
        );
        let file = format!("data:{};base64,{}", content_type, STANDARD.encode(bytes));

        let response = self
            .client
            .post(&self.upload_url)
            .form(&[
                ("file", file.as_str()),
                ("api_key", self.api_key.as_str()),
                ("timestamp", timestamp.as_str()),
                ("folder", self.folder.as_str()),
                ("signature", signature.as_str()),
                ("signature_algorithm", "sha256"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<UploadErrorResponse>()
                .await
                .map(|body| body.error.message)
                .unwrap_or_else(|_| format!("status {}", status));
            return Err(ImageStoreError::Rejected(message));
        }

        let body: UploadResponse = response.json().await?;
        Ok(body.secure_url)
    }
}

/// Upload signature: parameters sorted by name, joined as `k=v&k=v`, with
/// the secret appended, hashed with SHA-256.
pub fn sign_params(params: &[(&str, &str)], secret: &str) -> String {
    let mut sorted: Vec<_> = params.iter().filter(|(_, v)| !v.is_empty()).collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let joined = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    hex::encode(Sha256::digest(format!("{}{}", joined, secret).as_bytes()))
}

/// Configured image host.
pub enum ImageStore {
    Disabled,
    Cloudinary {
        client: CloudinaryClient,
        max_bytes: usize,
    },
}

impl ImageStore {
    pub fn from_config(
        config: &ImageStoreConfig,
        max_bytes: usize,
    ) -> Result<Self, ImageStoreError> {
        match config.provider.as_str() {
            "cloudinary" => Ok(ImageStore::Cloudinary {
                client: CloudinaryClient::new(config)?,
                max_bytes,
            }),
            _ => Ok(ImageStore::Disabled),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, ImageStore::Disabled)
    }

    /// Uploads an image and returns its public URL.
    pub async fn upload(
        &self,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<String, ImageStoreError> {
        let (client, max_bytes) = match self {
            ImageStore::Disabled => return Err(ImageStoreError::Disabled),
            ImageStore::Cloudinary { client, max_bytes } => (client, *max_bytes),
        };

        check_image(bytes, content_type, max_bytes)?;

        let url = client.upload(bytes, content_type).await?;
        info!(bytes = bytes.len(), url = %url, "Image uploaded");
        Ok(url)
    }
}

/// Checks content type and size before anything leaves the process.
pub fn check_image(
    bytes: &[u8],
    content_type: &str,
    max_bytes: usize,
) -> Result<(), ImageStoreError> {
    let content_type = content_type.to_lowercase();
    if !ALLOWED_CONTENT_TYPES.contains(&content_type.as_str()) {
        return Err(ImageStoreError::UnsupportedContentType(content_type));
    }
    if bytes.is_empty() {
        return Err(ImageStoreError::Empty);
    }
    if bytes.len() > max_bytes {
        return Err(ImageStoreError::TooLarge { max: max_bytes });
    }
    Ok(())
}

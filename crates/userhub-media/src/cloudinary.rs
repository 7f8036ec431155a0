//! Cloudinary-compatible signed upload client.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use userhub_core::config::MediaConfig;
use userhub_core::error::{AppError, ErrorKind};
use userhub_core::result::AppResult;
use userhub_core::traits::{MediaUploader, UploadedMedia};

/// Uploads files to `{api_base}/{cloud_name}/auto/upload` with a signed request.
#[derive(Clone)]
pub struct CloudinaryUploader {
    client: Client,
    upload_url: String,
    api_key: String,
    api_secret: String,
}

impl std::fmt::Debug for CloudinaryUploader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryUploader")
            .field("upload_url", &self.upload_url)
            .finish()
    }
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
    #[serde(default)]
    bytes: u64,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

impl CloudinaryUploader {
    /// Build the client once from configuration.
    pub fn new(config: &MediaConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    "Failed to build media HTTP client",
                    e,
                )
            })?;

        Ok(Self {
            client,
            upload_url: format!(
                "{}/{}/auto/upload",
                config.api_base.trim_end_matches('/'),
                config.cloud_name
            ),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
        })
    }
}

/// Signs upload parameters: `k1=v1&k2=v2` sorted by key, secret appended, SHA-256 hex.
pub fn sign_params(params: &[(&str, String)], api_secret: &str) -> String {
    let mut sorted: Vec<&(&str, String)> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let joined = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    hex::encode(Sha256::digest(format!("{joined}{api_secret}").as_bytes()))
}

#[async_trait]
impl MediaUploader for CloudinaryUploader {
    fn provider_name(&self) -> &str {
        "cloudinary"
    }

    async fn upload(&self, path: &Path) -> AppResult<UploadedMedia> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            AppError::with_source(ErrorKind::UploadFailed, "Failed to read staged file", e)
        })?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();

        let timestamp = Utc::now().timestamp().to_string();
        let signature = sign_params(&[("timestamp", timestamp.clone())], &self.api_secret);

        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name))
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp)
            .text("signature", signature)
            .text("signature_algorithm", "sha256");

        debug!(url = %self.upload_url, "Uploading media");

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::UploadFailed, "Media provider unreachable", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .map(|body| body.error.message)
                .unwrap_or_else(|_| status.to_string());
            return Err(AppError::upload_failed(format!(
                "Media provider rejected upload: {message}"
            )));
        }

        let body: UploadResponse = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::UploadFailed,
                "Unreadable media provider response",
                e,
            )
        })?;

        info!(public_id = %body.public_id, bytes = body.bytes, "Media uploaded");
        Ok(UploadedMedia {
            url: body.secure_url,
            public_id: body.public_id,
            bytes: body.bytes,
        })
    }
}

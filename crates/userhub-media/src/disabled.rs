//! Uploader used when no media provider is configured.

use std::path::Path;

use async_trait::async_trait;

use userhub_core::error::AppError;
use userhub_core::result::AppResult;
use userhub_core::traits::{MediaUploader, UploadedMedia};

/// Rejects every upload.
#[derive(Debug, Clone, Default)]
pub struct DisabledUploader;

#[async_trait]
impl MediaUploader for DisabledUploader {
    fn provider_name(&self) -> &str {
        "disabled"
    }

    async fn upload(&self, _path: &Path) -> AppResult<UploadedMedia> {
        Err(AppError::upload_failed("No media provider is configured"))
    }
}

//! Media uploader trait for relaying local files to a third-party host.

use std::path::Path;

use async_trait::async_trait;

use crate::result::AppResult;

/// A file accepted by the media provider.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UploadedMedia {
    /// Public URL of the uploaded asset.
    pub url: String,
    /// Provider-side identifier of the asset.
    pub public_id: String,
    /// Size in bytes as reported by the provider.
    pub bytes: u64,
}

/// Trait for third-party media hosts.
///
/// Implementations are configured once at process start and shared
/// behind an `Arc`. Failures surface as `ErrorKind::UploadFailed`.
/// Implementations do not delete the local file; callers go through
/// `userhub_media::upload_and_discard`, which does.
#[async_trait]
pub trait MediaUploader: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider name (e.g., "cloudinary").
    fn provider_name(&self) -> &str;

    /// Upload the file at `path` and return its public location.
    async fn upload(&self, path: &Path) -> AppResult<UploadedMedia>;
}

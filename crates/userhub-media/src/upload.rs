//! Upload with guaranteed removal of the local copy.

use std::io::ErrorKind as IoErrorKind;
use std::path::Path;

use tracing::warn;

use userhub_core::error::{AppError, ErrorKind};
use userhub_core::result::AppResult;
use userhub_core::traits::{MediaUploader, UploadedMedia};

/// Upload `path` and delete it afterwards, whether or not the upload succeeded.
///
/// Every failure is reported as `UploadFailed`.
pub async fn upload_and_discard(
    uploader: &dyn MediaUploader,
    path: &Path,
) -> AppResult<UploadedMedia> {
    let result = uploader.upload(path).await;
    discard(path).await;

    result.map_err(|e| {
        if e.kind == ErrorKind::UploadFailed {
            e
        } else {
            AppError::upload_failed(e.message)
        }
    })
}

/// Delete a staged file. A file that is already gone is not an error.
pub async fn discard(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == IoErrorKind::NotFound => {}
        Err(e) => warn!(path = %path.display(), error = %e, "Failed to delete staged file"),
    }
}

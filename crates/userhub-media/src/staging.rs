//! Writes multipart uploads to the temp directory before relay.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use userhub_core::result::AppResult;

/// A file written to the temp directory, awaiting upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    /// Location on disk.
    pub path: PathBuf,
    /// File name as sent by the client.
    pub original_name: Option<String>,
    /// Size in bytes.
    pub size: u64,
}

/// Stages uploads under a fresh UUID name, keeping a sanitized extension.
#[derive(Debug, Clone)]
pub struct TempStager {
    dir: PathBuf,
}

impl TempStager {
    /// Stage files under `dir`, created on first use.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The staging directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `bytes` to a new file in the staging directory.
    pub async fn stage(&self, original_name: Option<&str>, bytes: &[u8]) -> AppResult<StagedFile> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let file_name = match original_name.and_then(safe_extension) {
            Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
            None => Uuid::new_v4().to_string(),
        };
        let path = self.dir.join(file_name);
        tokio::fs::write(&path, bytes).await?;

        Ok(StagedFile {
            path,
            original_name: original_name.map(str::to_string),
            size: bytes.len() as u64,
        })
    }
}

/// Lowercased alphanumeric extension of at most 8 characters.
fn safe_extension(name: &str) -> Option<String> {
    let ext = Path::new(name).extension()?.to_str()?;
    if ext.is_empty() || ext.len() > 8 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
